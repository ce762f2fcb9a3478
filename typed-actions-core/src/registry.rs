//! Canonical type names, lifecycle suffixes and duplicate detection
//!
//! Every string-tagged action family gets its canonical name from a
//! [`TypeRegistry`]: the base name plus the suffix configured for the
//! lifecycle [`Phase`]. Registering a name twice is refused, which catches two
//! independently written definitions that would otherwise collide on the same
//! tag.
//!
//! # Example
//!
//! ```
//! use typed_actions_core::{Phase, SuffixOverrides, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! assert_eq!(registry.type_name("Load", Phase::Success), "Load Success");
//!
//! registry.set_suffixes(SuffixOverrides {
//!     success: Some("_SUCCESS".into()),
//!     ..Default::default()
//! });
//! assert_eq!(registry.type_name("LOAD", Phase::Success), "LOAD_SUCCESS");
//!
//! registry.register_type_name("LOAD", Phase::Start).unwrap();
//! assert!(registry.register_type_name("LOAD", Phase::Start).is_err());
//! ```

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Lifecycle phase of an action, selecting which suffix is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// A standalone action, not part of a scenario
    Empty,
    /// The action that kicks off a scenario
    Start,
    /// The scenario was abandoned
    Cancel,
    /// The scenario completed
    Success,
    /// The scenario failed
    Failure,
}

impl Phase {
    /// All phases, in declaration order
    pub const ALL: [Phase; 5] = [
        Phase::Empty,
        Phase::Start,
        Phase::Cancel,
        Phase::Success,
        Phase::Failure,
    ];

    /// Get the phase name as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::Start => "start",
            Phase::Cancel => "cancel",
            Phase::Success => "success",
            Phase::Failure => "failure",
        }
    }

    /// Parse a phase from its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.name() == name)
    }
}

/// Suffix appended to a base name for each phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixTable {
    pub empty: String,
    pub start: String,
    pub cancel: String,
    pub success: String,
    pub failure: String,
}

impl Default for SuffixTable {
    fn default() -> Self {
        Self {
            empty: String::new(),
            start: String::new(),
            cancel: " Cancel".to_string(),
            success: " Success".to_string(),
            failure: " Failure".to_string(),
        }
    }
}

impl SuffixTable {
    /// Get the suffix for a phase
    pub fn get(&self, phase: Phase) -> &str {
        match phase {
            Phase::Empty => &self.empty,
            Phase::Start => &self.start,
            Phase::Cancel => &self.cancel,
            Phase::Success => &self.success,
            Phase::Failure => &self.failure,
        }
    }

    /// Replace the suffix for a phase
    pub fn set(&mut self, phase: Phase, suffix: impl Into<String>) {
        let slot = match phase {
            Phase::Empty => &mut self.empty,
            Phase::Start => &mut self.start,
            Phase::Cancel => &mut self.cancel,
            Phase::Success => &mut self.success,
            Phase::Failure => &mut self.failure,
        };
        *slot = suffix.into();
    }

    /// Merge overrides into this table; phases left as `None` are untouched
    pub fn merge(&mut self, overrides: SuffixOverrides) {
        for (phase, suffix) in overrides.into_entries() {
            self.set(phase, suffix);
        }
    }
}

/// A partial suffix table used to reconfigure a registry
///
/// Deserializes from an object keyed by phase name. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuffixOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl SuffixOverrides {
    /// Parse overrides from a JSON object such as `{"start": "_START"}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build overrides from a map keyed by phase name
    pub fn from_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = Self::default();
        for (key, suffix) in map {
            let phase =
                Phase::from_name(key.as_ref()).ok_or_else(|| RegistryError::UnknownPhase {
                    phase: key.as_ref().to_string(),
                })?;
            overrides.set(phase, suffix);
        }
        Ok(overrides)
    }

    /// Set the override for one phase (builder style)
    pub fn with(mut self, phase: Phase, suffix: impl Into<String>) -> Self {
        self.set(phase, suffix);
        self
    }

    /// Set the override for one phase
    pub fn set(&mut self, phase: Phase, suffix: impl Into<String>) {
        let slot = match phase {
            Phase::Empty => &mut self.empty,
            Phase::Start => &mut self.start,
            Phase::Cancel => &mut self.cancel,
            Phase::Success => &mut self.success,
            Phase::Failure => &mut self.failure,
        };
        *slot = Some(suffix.into());
    }

    /// Whether no phase is overridden
    pub fn is_empty(&self) -> bool {
        self.empty.is_none()
            && self.start.is_none()
            && self.cancel.is_none()
            && self.success.is_none()
            && self.failure.is_none()
    }

    fn into_entries(self) -> impl Iterator<Item = (Phase, String)> {
        [
            (Phase::Empty, self.empty),
            (Phase::Start, self.start),
            (Phase::Cancel, self.cancel),
            (Phase::Success, self.success),
            (Phase::Failure, self.failure),
        ]
        .into_iter()
        .filter_map(|(phase, suffix)| suffix.map(|s| (phase, s)))
    }
}

/// Suffix configuration plus the set of canonical names already in use
///
/// Create one at start-up, configure its suffixes, then pass it to every
/// defining call. Only the `*_unique` definers and [`ActionFamily`](crate::ActionFamily)
/// claim names; claimed names are never released.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    suffixes: SuffixTable,
    registered: BTreeSet<String>,
}

impl TypeRegistry {
    /// Create a registry with the default suffixes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with a preconfigured suffix table
    pub fn with_suffixes(suffixes: SuffixTable) -> Self {
        Self {
            suffixes,
            registered: BTreeSet::new(),
        }
    }

    /// Merge suffix overrides into the table
    ///
    /// Only affects names computed afterwards; already registered names and
    /// already defined descriptors keep the tags they were given.
    pub fn set_suffixes(&mut self, overrides: SuffixOverrides) {
        tracing::debug!(overrides = ?overrides, "Configuring action suffixes");
        self.suffixes.merge(overrides);
    }

    /// Merge suffix overrides given as a JSON object
    pub fn configure_suffixes(&mut self, json: &str) -> Result<()> {
        let overrides = SuffixOverrides::from_json(json)?;
        self.set_suffixes(overrides);
        Ok(())
    }

    /// Get the current suffix table
    pub fn suffixes(&self) -> &SuffixTable {
        &self.suffixes
    }

    /// Get the current suffix for a phase
    pub fn suffix(&self, phase: Phase) -> &str {
        self.suffixes.get(phase)
    }

    /// Compute the canonical name for a base name in a phase
    pub fn type_name(&self, name: &str, phase: Phase) -> String {
        format!("{}{}", name, self.suffix(phase))
    }

    /// Compute and register the canonical name for a base name in a phase
    ///
    /// Returns the canonical name, or [`RegistryError::DuplicateName`] if it
    /// is already taken.
    pub fn register_type_name(&mut self, name: &str, phase: Phase) -> Result<String> {
        let type_name = self.type_name(name, phase);
        if self.registered.contains(&type_name) {
            tracing::warn!(action = %type_name, phase = phase.name(), "Duplicate action type");
            return Err(RegistryError::DuplicateName { name: type_name });
        }

        tracing::debug!(action = %type_name, phase = phase.name(), "Registered action type");
        self.registered.insert(type_name.clone());
        Ok(type_name)
    }

    /// Register the canonical names of several phases of one base name
    ///
    /// Either every name is registered or none is: a collision with an
    /// existing name, or between two phases whose suffixes coincide, leaves
    /// the registry unchanged. Names are returned in the order of `phases`.
    pub fn register_family(&mut self, name: &str, phases: &[Phase]) -> Result<Vec<String>> {
        let mut type_names: Vec<String> = Vec::with_capacity(phases.len());
        for &phase in phases {
            let type_name = self.type_name(name, phase);
            if self.registered.contains(&type_name) || type_names.contains(&type_name) {
                tracing::warn!(action = %type_name, phase = phase.name(), "Duplicate action type");
                return Err(RegistryError::DuplicateName { name: type_name });
            }
            type_names.push(type_name);
        }

        for type_name in &type_names {
            tracing::debug!(action = %type_name, "Registered action type");
            self.registered.insert(type_name.clone());
        }
        Ok(type_names)
    }

    /// Check whether a canonical name is registered
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.registered.contains(type_name)
    }

    /// All registered canonical names, sorted
    pub fn registered_names(&self) -> impl Iterator<Item = &str> {
        self.registered.iter().map(|s| s.as_str())
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

impl From<SuffixTable> for TypeRegistry {
    fn from(suffixes: SuffixTable) -> Self {
        Self::with_suffixes(suffixes)
    }
}

impl From<HashMap<Phase, String>> for SuffixOverrides {
    fn from(map: HashMap<Phase, String>) -> Self {
        let mut overrides = Self::default();
        for (phase, suffix) in map {
            overrides.set(phase, suffix);
        }
        overrides
    }
}
