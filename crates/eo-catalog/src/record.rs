//! Record model for the executive order catalog.
//!
//! Every descriptive field is optional: the generator that produces the
//! catalog payload is lenient, and absent values are rendered as a
//! placeholder rather than rejected.

use crate::error::{CatalogError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A date-like field as it appears in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Kept verbatim when no known format matches
    Raw(String),
}

impl DateValue {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return DateValue::Date(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return DateValue::DateTime(dt.naive_utc());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return DateValue::DateTime(dt);
            }
        }
        if let Some(date) = parse_long_date(trimmed) {
            return DateValue::Date(date);
        }

        DateValue::Raw(s.to_string())
    }

    /// Seconds since the Unix epoch, as written by the summary generator.
    /// Only the UTC calendar date is kept.
    pub fn from_epoch_seconds(secs: f64) -> Option<Self> {
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9).floor().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos).map(|dt| DateValue::Date(dt.date_naive()))
    }
}

/// "January 20, 2025", optionally followed by a time clause such as
/// ", 12:01 a.m." which is dropped.
fn parse_long_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split(',').map(str::trim);
    let month_day = parts.next()?;
    let year = parts.next()?;
    NaiveDate::parse_from_str(&format!("{month_day}, {year}"), "%B %d, %Y").ok()
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DateValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            DateValue::Raw(s) => f.write_str(s),
        }
    }
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Seconds(f64),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(s) => DateValue::parse(&s),
            Wire::Seconds(secs) => DateValue::from_epoch_seconds(secs)
                .unwrap_or_else(|| DateValue::Raw(secs.to_string())),
        })
    }
}

/// Ordered list of short text items. The payload may carry either an array
/// of strings or a single string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextList(pub Vec<String>);

impl TextList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TextList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Many(Vec<String>),
            One(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Many(items) => TextList(items),
            Wire::One(s) if s.trim().is_empty() => TextList::default(),
            Wire::One(s) => TextList(vec![s]),
        })
    }
}

impl<S: Into<String>> FromIterator<S> for TextList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TextList(iter.into_iter().map(Into::into).collect())
    }
}

/// Classification of an order along several policy axes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulatory_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constitutional_authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_of_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgetary_implications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precedential_value: Option<String>,
}

/// One executive order summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "deserialize_eo_number")]
    pub eo_number: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geopolitical_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deeper_dive: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateValue>,
    /// When the summary was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_impacts: Option<TextList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_impacts: Option<TextList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_industries: Option<TextList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Categories>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(default, alias = "pdf_path", skip_serializing_if = "Option::is_none")]
    pub pdf_file: Option<String>,
}

impl Record {
    pub fn new(eo_number: u32) -> Self {
        Self {
            eo_number,
            ..Default::default()
        }
    }

    /// Fragment identifier used for deep links to this record
    pub fn anchor_id(&self) -> String {
        format!("eo-{}", self.eo_number)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(crate::render::PLACEHOLDER)
    }
}

fn deserialize_eo_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(u32),
        Text(String),
    }

    match Wire::deserialize(deserializer)? {
        Wire::Number(n) => Ok(n),
        Wire::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid eo_number '{s}'"))),
    }
}

/// The full catalog as served to clients. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordCollection {
    #[serde(rename = "eos")]
    pub records: Vec<Record>,
    pub build_time: Option<String>,
}

#[derive(Deserialize)]
struct WrappedPayload {
    eos: Vec<Record>,
    #[serde(default)]
    build_time: Option<String>,
}

impl RecordCollection {
    pub fn new(records: Vec<Record>, build_time: Option<String>) -> Self {
        Self {
            records,
            build_time,
        }
    }

    /// Parse a catalog payload. Accepts `{ "eos": [...], "build_time": "..." }`
    /// as well as a bare array of records.
    pub fn from_json_slice(bytes: &[u8], origin: &str) -> Result<Self> {
        let parse_err = |source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        };

        let value: serde_json::Value = serde_json::from_slice(bytes).map_err(parse_err)?;
        match value {
            serde_json::Value::Array(_) => {
                let records: Vec<Record> = serde_json::from_value(value).map_err(parse_err)?;
                Ok(Self::new(records, None))
            }
            serde_json::Value::Object(_) => {
                let payload: WrappedPayload = serde_json::from_value(value).map_err(parse_err)?;
                Ok(Self::new(payload.eos, payload.build_time))
            }
            other => Err(CatalogError::Shape {
                origin: origin.to_string(),
                reason: format!("expected an object or array, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn find(&self, eo_number: u32) -> Option<&Record> {
        self.records.iter().find(|r| r.eo_number == eo_number)
    }

    /// Build timestamp as UTC, if it parses as ISO-8601
    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.build_time.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
