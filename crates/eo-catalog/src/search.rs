//! Fuzzy full-text search over the record collection.
//!
//! Two phases, built once over the whole collection:
//! - Recall: every distinct term in the searchable fields is indexed by its
//!   space-padded character trigrams, so a query token finds the vocabulary
//!   terms it shares at least one trigram with.
//! - Scoring: each recalled term gets a similarity in `[0, 1]` (exact,
//!   prefix, substring, or normalized Levenshtein). A term matches when
//!   `1 - similarity <= threshold`.
//!
//! A record matches when every query token matches a term in at least one of
//! its searchable fields. Its relevance is the mean over query tokens of the
//! best `similarity * weight`, normalized by the largest key weight.

use crate::record::Record;
use crate::schema::Accessor;
use std::collections::{HashMap, HashSet};

/// Moderately permissive: tolerates one edit in words of four or more
/// characters, two edits from seven characters on.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

const PREFIX_SIMILARITY: f64 = 0.9;
const SUBSTRING_SIMILARITY: f64 = 0.8;
const MIN_TOKEN_LEN: usize = 2;
const EPSILON: f64 = 1e-9;

/// A searchable field and its weight in the relevance score
#[derive(Clone, Copy)]
pub struct SearchKey {
    pub name: &'static str,
    pub weight: f64,
    pub value: Accessor,
}

impl std::fmt::Debug for SearchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchKey")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

fn joined(value: &Option<crate::record::TextList>) -> Option<String> {
    value.as_ref().map(|l| l.0.join(" "))
}

pub const DEFAULT_KEYS: &[SearchKey] = &[
    SearchKey {
        name: "title",
        weight: 3.0,
        value: |r| r.title.clone(),
    },
    SearchKey {
        name: "summary",
        weight: 2.0,
        value: |r| r.summary.clone(),
    },
    SearchKey {
        name: "purpose",
        weight: 1.5,
        value: |r| r.purpose.clone(),
    },
    SearchKey {
        name: "deeper_dive",
        weight: 1.0,
        value: |r| r.deeper_dive.clone(),
    },
    SearchKey {
        name: "economic_effects",
        weight: 1.0,
        value: |r| r.economic_effects.clone(),
    },
    SearchKey {
        name: "geopolitical_effects",
        weight: 1.0,
        value: |r| r.geopolitical_effects.clone(),
    },
    SearchKey {
        name: "positive_impacts",
        weight: 1.0,
        value: |r| joined(&r.positive_impacts),
    },
    SearchKey {
        name: "negative_impacts",
        weight: 1.0,
        value: |r| joined(&r.negative_impacts),
    },
    SearchKey {
        name: "key_industries",
        weight: 1.2,
        value: |r| joined(&r.key_industries),
    },
    SearchKey {
        name: "categories.policy_domain",
        weight: 1.5,
        value: |r| r.categories.as_ref().and_then(|c| c.policy_domain.clone()),
    },
    SearchKey {
        name: "categories.regulatory_impact",
        weight: 1.0,
        value: |r| r.categories.as_ref().and_then(|c| c.regulatory_impact.clone()),
    },
    SearchKey {
        name: "categories.political_context",
        weight: 1.0,
        value: |r| r.categories.as_ref().and_then(|c| c.political_context.clone()),
    },
    SearchKey {
        name: "categories.legal_framework",
        weight: 1.0,
        value: |r| r.categories.as_ref().and_then(|c| c.legal_framework.clone()),
    },
];

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// 0 = exact token match only, 1 = match almost anything
    pub threshold: f64,
    pub keys: Vec<SearchKey>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            keys: DEFAULT_KEYS.to_vec(),
        }
    }
}

impl SearchOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// A matching record and its relevance (higher is better, at most 1.0)
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub record: &'a Record,
    /// Position of the record in source order
    pub position: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
struct Posting {
    record: u32,
    key: u16,
}

type Trigram = [char; 3];

pub struct SearchIndex<'a> {
    records: &'a [Record],
    options: SearchOptions,
    terms: Vec<String>,
    postings: Vec<Vec<Posting>>,
    trigrams: HashMap<Trigram, Vec<u32>>,
    max_weight: f64,
}

impl<'a> SearchIndex<'a> {
    pub fn build(records: &'a [Record], options: SearchOptions) -> Self {
        let mut term_ids: HashMap<String, u32> = HashMap::new();
        let mut terms: Vec<String> = Vec::new();
        let mut postings: Vec<Vec<Posting>> = Vec::new();

        for (record_idx, record) in records.iter().enumerate() {
            for (key_idx, key) in options.keys.iter().enumerate() {
                let Some(text) = (key.value)(record) else {
                    continue;
                };

                let mut seen = HashSet::new();
                for token in tokenize(&text) {
                    if !seen.insert(token.clone()) {
                        continue;
                    }
                    let id = *term_ids.entry(token).or_insert_with_key(|t| {
                        terms.push(t.clone());
                        postings.push(Vec::new());
                        (terms.len() - 1) as u32
                    });
                    postings[id as usize].push(Posting {
                        record: record_idx as u32,
                        key: key_idx as u16,
                    });
                }
            }
        }

        let mut trigrams: HashMap<Trigram, Vec<u32>> = HashMap::new();
        for (id, term) in terms.iter().enumerate() {
            for trigram in trigrams_of(term) {
                trigrams.entry(trigram).or_default().push(id as u32);
            }
        }

        let max_weight = options
            .keys
            .iter()
            .map(|k| k.weight)
            .fold(0.0_f64, f64::max);

        log::debug!(
            "Built search index: {} records, {} terms, {} trigrams",
            records.len(),
            terms.len(),
            trigrams.len()
        );

        Self {
            records,
            options,
            terms,
            postings,
            trigrams,
            max_weight,
        }
    }

    /// Ranked matches for `query`, best first; ties keep source order.
    /// A query with no usable tokens matches nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a>> {
        let mut tokens = tokenize(query);
        let mut seen = HashSet::new();
        tokens.retain(|t| seen.insert(t.clone()));
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut totals = vec![0.0_f64; self.records.len()];
        let mut matched = vec![0_usize; self.records.len()];

        for token in &tokens {
            let mut best: HashMap<u32, f64> = HashMap::new();
            for (term_id, similarity) in self.matching_terms(token) {
                for posting in &self.postings[term_id] {
                    let weighted = similarity * self.options.keys[posting.key as usize].weight;
                    let entry = best.entry(posting.record).or_insert(0.0);
                    if weighted > *entry {
                        *entry = weighted;
                    }
                }
            }
            for (record, score) in best {
                totals[record as usize] += score;
                matched[record as usize] += 1;
            }
        }

        let denominator = (tokens.len() as f64 * self.max_weight).max(EPSILON);
        let mut hits: Vec<SearchHit<'a>> = matched
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == tokens.len())
            .map(|(position, _)| SearchHit {
                record: &self.records[position],
                position,
                score: totals[position] / denominator,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.position.cmp(&b.position))
        });
        hits
    }

    /// Vocabulary terms within the threshold of `token`
    fn matching_terms(&self, token: &str) -> Vec<(usize, f64)> {
        let mut candidates: HashSet<u32> = HashSet::new();
        for trigram in trigrams_of(token) {
            if let Some(ids) = self.trigrams.get(&trigram) {
                candidates.extend(ids.iter().copied());
            }
        }

        candidates
            .into_iter()
            .filter_map(|id| {
                let sim = similarity(token, &self.terms[id as usize]);
                (1.0 - sim <= self.options.threshold + EPSILON).then_some((id as usize, sim))
            })
            .collect()
    }
}

/// Lowercase alphanumeric words, dropping single characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// Distinct space-padded trigrams, so two-letter words still have some
fn trigrams_of(term: &str) -> Vec<Trigram> {
    let padded: Vec<char> = std::iter::once(' ')
        .chain(term.chars())
        .chain(std::iter::once(' '))
        .collect();
    let mut out: Vec<Trigram> = padded.windows(3).map(|w| [w[0], w[1], w[2]]).collect();
    out.sort_unstable();
    out.dedup();
    out
}

fn similarity(query: &str, term: &str) -> f64 {
    if query == term {
        return 1.0;
    }

    let mut best = strsim::normalized_levenshtein(query, term);
    if term.starts_with(query) {
        best = best.max(PREFIX_SIMILARITY);
    } else if query.chars().count() >= 3 && term.contains(query) {
        best = best.max(SUBSTRING_SIMILARITY);
    }
    best
}
