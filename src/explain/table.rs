use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Phase;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::sequence::script::Script;

/// Tooltip text shown while a phase is highlighted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Explanation {
    /// Tooltip heading.
    pub title: String,
    /// One-line label.
    pub short_description: String,
    /// Body text.
    pub detail: String,
}

impl Explanation {
    /// Build an explanation from its three parts.
    pub fn new(
        title: impl Into<String>,
        short_description: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            short_description: short_description.into(),
            detail: detail.into(),
        }
    }
}

/// Explanations keyed by phase. A phase without an entry shows no tooltip.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ExplanationTable {
    entries: BTreeMap<Phase, Explanation>,
}

impl ExplanationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `phase`.
    #[must_use]
    pub fn with(mut self, phase: impl Into<Phase>, explanation: Explanation) -> Self {
        self.insert(phase, explanation);
        self
    }

    /// Add or replace the entry for `phase` in place.
    pub fn insert(&mut self, phase: impl Into<Phase>, explanation: Explanation) {
        self.entries.insert(phase.into(), explanation);
    }

    /// Explanation for `phase`, if one was authored.
    pub fn lookup(&self, phase: &Phase) -> Option<&Explanation> {
        self.entries.get(phase)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Phases that have an explanation, in phase-name order.
    pub fn phases(&self) -> impl Iterator<Item = &Phase> {
        self.entries.keys()
    }

    /// Reject entries for phases the script never enters.
    pub fn validate_against(&self, script: &Script) -> ChoreoResult<()> {
        for phase in self.entries.keys() {
            if script.index_of(phase).is_none() {
                return Err(ChoreoError::script(format!(
                    "explanation for unknown phase '{phase}' in script '{}'",
                    script.name
                )));
            }
        }
        Ok(())
    }

    /// Parse a table from a JSON reader (`{"phase": {"title": ..}}`).
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse explanations JSON: {e}")))
    }

    /// Parse a table from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ChoreoResult<Self> {
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!(
                "open explanations JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/explain/table.rs"]
mod tests;
