//! Alternate-script pre-filter.
//!
//! A [`ScriptTranslator`] turns typed input (e.g. romaji) into a regex source matching the
//! target script. The compiled pattern lives for one batch: `activate` in `before_match`,
//! `release` in `after_match`.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::ranking::RankedCandidate;

/// Inputs shorter than this (in bytes) never activate the pre-filter.
pub const MIN_PREFILTER_LEN: usize = 3;

pub trait ScriptTranslator: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Regex source for `input`, or `None` when no translation is available.
    fn translate(&self, input: &str) -> Option<String>;
}

#[derive(Default)]
pub struct ScriptPrefilter {
    translator: Option<Arc<dyn ScriptTranslator>>,
    /// Whole-candidate match instead of search.
    anchored: bool,
    pattern: Option<Regex>,
}

impl fmt::Debug for ScriptPrefilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptPrefilter")
            .field("translator", &self.translator.is_some())
            .field("anchored", &self.anchored)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .finish()
    }
}

impl ScriptPrefilter {
    pub fn anchored(translator: Option<Arc<dyn ScriptTranslator>>) -> Self {
        Self {
            translator,
            anchored: true,
            pattern: None,
        }
    }

    pub fn unanchored(translator: Option<Arc<dyn ScriptTranslator>>) -> Self {
        Self {
            translator,
            anchored: false,
            pattern: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Compiles the translated pattern for `input`. On success the batch is cleared so
    /// candidates gathered in plain mode do not leak into the phonetic pass.
    pub fn activate(&mut self, candidates: &mut Vec<RankedCandidate>, input: &str) {
        self.pattern = None;
        let Some(translator) = self.translator.as_ref() else {
            return;
        };
        if !translator.is_enabled() || input.len() < MIN_PREFILTER_LEN {
            return;
        }
        let Some(source) = translator.translate(input) else {
            debug!(input, "no script translation; pre-filter inactive");
            return;
        };

        let source = if self.anchored {
            format!("^(?:{source})$")
        } else {
            source
        };
        match Regex::new(&source) {
            Ok(pattern) => {
                self.pattern = Some(pattern);
                candidates.clear();
            }
            Err(err) => debug!(input, %err, "script pattern rejected; pre-filter inactive"),
        }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(candidate))
    }

    pub fn release(&mut self) {
        self.pattern = None;
    }
}
