use crate::catalog;
use crate::config::Config;
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use eo_catalog::controller::Entry;
use serde::Serialize;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

const TITLE_WIDTH: usize = 60;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search terms; every term must match
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Show at most this many results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct JsonHit<'a> {
    eo_number: u32,
    title: Option<&'a str>,
    score: f64,
    signing_date: Option<String>,
    original_url: Option<&'a str>,
}

impl<'a> From<&Entry<'a>> for JsonHit<'a> {
    fn from(entry: &Entry<'a>) -> Self {
        let record = entry.record;
        Self {
            eo_number: record.eo_number,
            title: record.title.as_deref(),
            score: entry.score.unwrap_or_default(),
            signing_date: record.signing_date.as_ref().map(ToString::to_string),
            original_url: record.original_url.as_deref(),
        }
    }
}

/// Join the terms into one query, refusing input with nothing to search for
fn query_text(terms: &[String]) -> Result<String> {
    let query = terms.join(" ");
    if query.trim().is_empty() {
        bail!("Search query is empty; use `eo browse` to list every order");
    }
    Ok(query)
}

pub fn execute(args: SearchArgs, config: &Config) -> Result<()> {
    let query = query_text(&args.query)?;
    let store = catalog::open(config)?;
    let mut controller = catalog::controller(&store, config)?;
    controller.handle_input(&query);

    let limit = args.limit.unwrap_or(usize::MAX);
    let entries: Vec<&Entry> = controller.entries().iter().take(limit).collect();

    let mut out = io::stdout().lock();
    if args.json {
        let hits: Vec<JsonHit> = entries.iter().map(|e| JsonHit::from(*e)).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&hits)?)?;
        return Ok(());
    }

    if let Some(message) = controller.message() {
        writeln!(out, "{}", message.bold())?;
    }
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", results_table(&entries))?;
    if entries.len() < controller.entries().len() {
        writeln!(
            out,
            "{}",
            format!(
                "Showing {} of {}; use --limit to see more",
                entries.len(),
                controller.entries().len()
            )
            .dimmed()
        )?;
    }
    Ok(())
}

fn results_table(entries: &[&Entry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table.set_header(vec!["Score", "EO", "Title", "Signed", "Policy Domain"]);

    for entry in entries {
        let record = entry.record;
        let domain = record
            .categories
            .as_ref()
            .and_then(|c| c.policy_domain.as_deref())
            .unwrap_or(eo_catalog::render::PLACEHOLDER);
        table.add_row(vec![
            format!("{:.2}", entry.score.unwrap_or_default()),
            record.eo_number.to_string(),
            truncate(record.display_title(), TITLE_WIDTH),
            record
                .signing_date
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| eo_catalog::render::PLACEHOLDER.to_string()),
            domain.to_string(),
        ]);
    }
    table
}

/// Cut `text` to at most `max` display columns, marking the cut with "…"
pub fn truncate(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text() {
        let terms = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(query_text(&terms(&["energy", "dominance"])).unwrap(), "energy dominance");
        assert!(query_text(&terms(&[" "])).is_err());
        assert!(query_text(&terms(&["", "\t"])).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Restoring Energy Dominance", 10), "Restoring…");
        // wide characters count double
        assert_eq!(truncate("日本語のテキスト", 7), "日本語…");
    }
}
