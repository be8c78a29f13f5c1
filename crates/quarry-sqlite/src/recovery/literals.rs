//! String-literal rewriting

use super::matcher::ValueScorer;
use once_cell::sync::Lazy;
use quarry_core::{RecoveredQuery, ValueSuggestion};
use regex::Regex;
use std::collections::HashSet;

/// Single-quoted SQL string literal, `''` escapes a quote
static LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'((?:[^']|'')*)'").expect("literal pattern is valid"));

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern is valid"));

/// Stored values of one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateColumn {
    pub table: String,
    pub column: String,
    pub values: Vec<String>,
}

struct Match<'a> {
    column: &'a CandidateColumn,
    value: &'a str,
    score: u32,
}

/// Replace literals that are not stored verbatim with their best stored match
///
/// Columns whose table or column name appears in the query are searched
/// first. Within a group a case-insensitive exact match wins, otherwise the
/// highest fuzzy score at or above `min_score`. LIKE patterns (`%`) and empty
/// literals are left alone.
pub fn rewrite_literals(
    sql: &str,
    candidates: &[CandidateColumn],
    min_score: u32,
) -> RecoveredQuery {
    let named = referenced_identifiers(sql);
    let (preferred, others): (Vec<&CandidateColumn>, Vec<&CandidateColumn>) =
        candidates.iter().partition(|candidate| {
            named.contains(&candidate.table.to_lowercase())
                || named.contains(&candidate.column.to_lowercase())
        });

    let mut suggestions = Vec::new();
    let rewritten = LITERAL_RE.replace_all(sql, |caps: &regex::Captures<'_>| {
        let literal = caps[1].replace("''", "'");
        if literal.is_empty() || literal.contains('%') || is_stored(&literal, candidates) {
            return caps[0].to_string();
        }

        let found = best_match(&literal, &preferred, min_score)
            .or_else(|| best_match(&literal, &others, min_score));

        match found {
            Some(found) => {
                suggestions.push(ValueSuggestion {
                    original: literal,
                    replacement: found.value.to_string(),
                    table: found.column.table.clone(),
                    column: found.column.column.clone(),
                    score: found.score,
                });
                format!("'{}'", found.value.replace('\'', "''"))
            }
            None => caps[0].to_string(),
        }
    });

    RecoveredQuery {
        sql: rewritten.into_owned(),
        suggestions,
    }
}

fn is_stored(literal: &str, candidates: &[CandidateColumn]) -> bool {
    candidates
        .iter()
        .any(|candidate| candidate.values.iter().any(|value| value == literal))
}

fn best_match<'a>(
    literal: &str,
    columns: &[&'a CandidateColumn],
    min_score: u32,
) -> Option<Match<'a>> {
    let mut scorer = ValueScorer::new(literal);

    for &column in columns {
        if let Some(value) = column
            .values
            .iter()
            .find(|value| value.to_lowercase() == literal.to_lowercase())
        {
            return Some(Match {
                column,
                value,
                score: scorer.score(value).unwrap_or(0),
            });
        }
    }

    let mut best: Option<Match<'a>> = None;
    for &column in columns {
        for value in &column.values {
            let Some(score) = scorer.score(value) else {
                continue;
            };
            if score < min_score {
                continue;
            }
            if best.as_ref().map_or(true, |current| score > current.score) {
                best = Some(Match {
                    column,
                    value,
                    score,
                });
            }
        }
    }
    best
}

/// Lowercased identifiers outside string literals
fn referenced_identifiers(sql: &str) -> HashSet<String> {
    let without_literals = LITERAL_RE.replace_all(sql, "''");
    IDENTIFIER_RE
        .find_iter(&without_literals)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
