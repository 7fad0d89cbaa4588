//! Match strategies for scoring candidate text against the cursor value.
//!
//! A strategy is driven in three steps around one batch of candidates:
//! `before_match` (may reset the batch), `match_score` per candidate, `after_match`.
//! A score of [`NO_MATCH`] rejects the candidate; anything `>= 0` keeps it.
//! Only the abbreviation strategy produces graded scores; the others return `0.0` on match.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ranking::RankedCandidate;

mod abbr;
mod prefilter;

pub use abbr::abbreviation_score;
pub use prefilter::{MIN_PREFILTER_LEN, ScriptPrefilter, ScriptTranslator};

pub const NO_MATCH: f64 = -1.0;

pub trait MatchStrategy {
    fn before_match(&mut self, _candidates: &mut Vec<RankedCandidate>, _input: &str) {}

    fn match_score(&self, candidate: &str, input: &str) -> f64;

    fn after_match(&mut self, _candidates: &mut Vec<RankedCandidate>, _input: &str) {}
}

/// Which strategy a completion kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    BeginsWith,
    Partial,
    Abbr,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::BeginsWith => "begins_with",
            StrategyKind::Partial => "partial",
            StrategyKind::Abbr => "abbr",
        }
    }

    /// Builds a fresh strategy. The translator only affects `begins_with` and `partial`.
    pub fn build(self, translator: Option<Arc<dyn ScriptTranslator>>) -> Box<dyn MatchStrategy> {
        match self {
            StrategyKind::BeginsWith => Box::new(BeginsWith {
                prefilter: ScriptPrefilter::anchored(translator),
            }),
            StrategyKind::Partial => Box::new(Partial {
                prefilter: ScriptPrefilter::unanchored(translator),
            }),
            StrategyKind::Abbr => Box::new(Abbreviation),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "begins_with" => Ok(StrategyKind::BeginsWith),
            "partial" => Ok(StrategyKind::Partial),
            "abbr" => Ok(StrategyKind::Abbr),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Case-insensitive prefix match.
#[derive(Debug, Default)]
pub struct BeginsWith {
    prefilter: ScriptPrefilter,
}

impl BeginsWith {
    pub fn new(translator: Option<Arc<dyn ScriptTranslator>>) -> Self {
        Self {
            prefilter: ScriptPrefilter::anchored(translator),
        }
    }
}

impl MatchStrategy for BeginsWith {
    fn before_match(&mut self, candidates: &mut Vec<RankedCandidate>, input: &str) {
        self.prefilter.activate(candidates, input);
    }

    fn match_score(&self, candidate: &str, input: &str) -> f64 {
        if self.prefilter.is_match(candidate) {
            return 0.0;
        }
        if !comparable(candidate, input) {
            return NO_MATCH;
        }
        let (candidate, input) = (candidate.as_bytes(), input.as_bytes());
        if candidate[..input.len()].eq_ignore_ascii_case(input) {
            0.0
        } else {
            NO_MATCH
        }
    }

    fn after_match(&mut self, _candidates: &mut Vec<RankedCandidate>, _input: &str) {
        self.prefilter.release();
    }
}

/// Case-insensitive substring match.
#[derive(Debug, Default)]
pub struct Partial {
    prefilter: ScriptPrefilter,
}

impl Partial {
    pub fn new(translator: Option<Arc<dyn ScriptTranslator>>) -> Self {
        Self {
            prefilter: ScriptPrefilter::unanchored(translator),
        }
    }
}

impl MatchStrategy for Partial {
    fn before_match(&mut self, candidates: &mut Vec<RankedCandidate>, input: &str) {
        self.prefilter.activate(candidates, input);
    }

    fn match_score(&self, candidate: &str, input: &str) -> f64 {
        if self.prefilter.is_match(candidate) {
            return 0.0;
        }
        if !comparable(candidate, input) {
            return NO_MATCH;
        }
        let input = input.as_bytes();
        if candidate
            .as_bytes()
            .windows(input.len())
            .any(|window| window.eq_ignore_ascii_case(input))
        {
            0.0
        } else {
            NO_MATCH
        }
    }

    fn after_match(&mut self, _candidates: &mut Vec<RankedCandidate>, _input: &str) {
        self.prefilter.release();
    }
}

/// Subsequence match with graded scores, see [`abbreviation_score`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Abbreviation;

impl MatchStrategy for Abbreviation {
    fn match_score(&self, candidate: &str, input: &str) -> f64 {
        abbreviation_score(candidate, input)
    }
}

fn comparable(candidate: &str, input: &str) -> bool {
    !candidate.is_empty() && !input.is_empty() && input.len() <= candidate.len()
}
