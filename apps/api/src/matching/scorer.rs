//! Keyword-overlap scorer — how much of a job's vocabulary a CV covers.
//!
//! Algorithm:
//! 1. Tokenize both texts and reduce each to its set of distinct tokens.
//! 2. ratio = |cv ∩ job| / max(1, |job|)  (coverage of the job, not symmetric)
//! 3. score = clamp(0.60 + 0.35 × ratio, 0.60, 0.95), rounded to 4 decimals
//! 4. Rank shared tokens by combined frequency across both texts.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matching::tokenizer::tokenize;

pub const DEFAULT_TOP_N: usize = 15;

pub const SCORE_FLOOR: f64 = 0.60;
pub const SCORE_CEILING: f64 = 0.95;
const SCORE_SPAN: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub n_common: usize,
    pub n_job_tokens: usize,
    pub n_cv_tokens: usize,
    pub ratio_job_to_cv: f64,
    pub top_common: Vec<String>,
}

/// Result of matching one CV against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64, // 0.60 – 0.95
    pub details: MatchDetails,
}

pub fn compute_match_score(cv_text: &str, job_text: &str, top_n: usize) -> MatchResult {
    let cv_tokens = tokenize(cv_text);
    let job_tokens = tokenize(job_text);

    let set_cv: HashSet<&str> = cv_tokens.iter().map(String::as_str).collect();
    let set_job: HashSet<&str> = job_tokens.iter().map(String::as_str).collect();
    let common: Vec<&str> = set_cv.intersection(&set_job).copied().collect();

    let n_common = common.len();
    let n_job = set_job.len();
    let ratio = n_common as f64 / n_job.max(1) as f64;
    let score = (SCORE_FLOOR + SCORE_SPAN * ratio).clamp(SCORE_FLOOR, SCORE_CEILING);

    MatchResult {
        score: round4(score),
        details: MatchDetails {
            n_common,
            n_job_tokens: n_job,
            n_cv_tokens: set_cv.len(),
            ratio_job_to_cv: round4(ratio),
            top_common: rank_common(common, &cv_tokens, &job_tokens, top_n),
        },
    }
}

/// Orders shared tokens by frequency in CV + job, highest first.
/// Ties go alphabetically so results are reproducible.
fn rank_common(
    common: Vec<&str>,
    cv_tokens: &[String],
    job_tokens: &[String],
    top_n: usize,
) -> Vec<String> {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for token in cv_tokens.iter().chain(job_tokens) {
        *freq.entry(token.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = common
        .into_iter()
        .map(|t| (t, freq.get(t).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by_key(|&(token, count)| (Reverse(count), token));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(token, _)| token.to_string())
        .collect()
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
