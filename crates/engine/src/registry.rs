//! Lookup table of indicator descriptors keyed by canonical id.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::catalog::builtin_descriptors;
use crate::descriptor::IndicatorDescriptor;
use crate::error::EngineError;

static BUILTIN: LazyLock<IndicatorRegistry> =
    LazyLock::new(|| IndicatorRegistry::from_descriptors(builtin_descriptors()));

/// Immutable set of indicator descriptors.
#[derive(Debug, Clone, Default)]
pub struct IndicatorRegistry {
    descriptors: BTreeMap<&'static str, IndicatorDescriptor>,
}

impl IndicatorRegistry {
    /// Returns the process-wide built-in catalogue.
    pub fn builtin() -> &'static IndicatorRegistry {
        &BUILTIN
    }

    /// Builds a registry from descriptors; a later duplicate id replaces an
    /// earlier one.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = IndicatorDescriptor>) -> Self {
        let descriptors = descriptors
            .into_iter()
            .map(|d| (d.canonical_id(), d))
            .collect();
        Self { descriptors }
    }

    /// Returns the descriptor registered under `canonical_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndex`] if no descriptor is registered.
    pub fn lookup(&self, canonical_id: &str) -> Result<&IndicatorDescriptor, EngineError> {
        self.get(canonical_id).ok_or_else(|| EngineError::UnknownIndex {
            code: canonical_id.to_string(),
        })
    }

    pub fn get(&self, canonical_id: &str) -> Option<&IndicatorDescriptor> {
        self.descriptors.get(canonical_id)
    }

    pub fn contains(&self, canonical_id: &str) -> bool {
        self.descriptors.contains_key(canonical_id)
    }

    /// Iterates over descriptors in id order.
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorDescriptor> {
        self.descriptors.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Public parameter names of an indicator: its defaults plus the
    /// percentile arrays a caller may supply instead of having them computed.
    pub fn capabilities(descriptor: &IndicatorDescriptor) -> BTreeSet<&'static str> {
        descriptor
            .defaults()
            .iter()
            .map(|(name, _)| *name)
            .chain(descriptor.percentiles().iter().map(|p| p.output_param_name()))
            .collect()
    }
}
