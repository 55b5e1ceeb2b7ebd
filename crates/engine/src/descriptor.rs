//! Indicator descriptors: the static metadata the engine needs per index.

use std::collections::{BTreeMap, BTreeSet};

use xcalc_indices::{IndicatorFunction, Value};

use crate::config::DEFAULT_BASE_PERIOD;

/// Parameter names consumed by the engine rather than forwarded.
const START_DATE: &str = "start_date";
const END_DATE: &str = "end_date";
/// Base period parameter, bound as `{start, end}` or `[start, end]`.
pub const BASE_PERIOD_PARAM: &str = "base_period_time_range";

/// How the source variable is prepared before percentiles are taken.
#[derive(Debug, Clone, PartialEq)]
pub enum Preprocessing {
    /// Use the variable as stored.
    None,
    /// Mask days at or below a wet-day threshold.
    Precipitation {
        /// Bound parameter that overrides the threshold; the engine's
        /// configured wet-day threshold applies otherwise.
        thresh_param: Option<&'static str>,
    },
}

/// A day-of-year percentile the indicator needs as an input.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileSpec {
    output_param_name: &'static str,
    source_variable: &'static str,
    rank: f64,
    preprocessing: Preprocessing,
    base_period: Option<(String, String)>,
    rank_param: Option<&'static str>,
}

impl PercentileSpec {
    /// Creates a spec with no preprocessing and the default base period.
    pub fn new(output_param_name: &'static str, source_variable: &'static str, rank: f64) -> Self {
        Self {
            output_param_name,
            source_variable,
            rank,
            preprocessing: Preprocessing::None,
            base_period: None,
            rank_param: None,
        }
    }

    /// Masks dry days before computing; `thresh_param` may override the threshold.
    pub fn with_precipitation(mut self, thresh_param: Option<&'static str>) -> Self {
        self.preprocessing = Preprocessing::Precipitation { thresh_param };
        self
    }

    /// Lets a bound parameter override the rank.
    pub fn with_rank_param(mut self, name: &'static str) -> Self {
        self.rank_param = Some(name);
        self
    }

    /// Replaces the rank.
    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = rank;
        self
    }

    /// Fixes the base period. A bound `base_period_time_range` still wins.
    pub fn with_base_period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.base_period = Some((start.into(), end.into()));
        self
    }

    // --- Accessors ---

    /// Parameter name the computed array is passed under.
    pub fn output_param_name(&self) -> &'static str {
        self.output_param_name
    }

    /// Dataset variable the percentile is computed from.
    pub fn source_variable(&self) -> &'static str {
        self.source_variable
    }

    /// Percentile rank in `[0, 100]`.
    pub fn rank(&self) -> f64 {
        self.rank
    }

    /// Preprocessing applied to the source variable.
    pub fn preprocessing(&self) -> &Preprocessing {
        &self.preprocessing
    }

    /// Base period as two (partial) date strings, [`DEFAULT_BASE_PERIOD`]
    /// unless one was set.
    pub fn base_period(&self) -> (&str, &str) {
        self.explicit_base_period().unwrap_or(DEFAULT_BASE_PERIOD)
    }

    /// Base period set with [`Self::with_base_period`], if any.
    pub fn explicit_base_period(&self) -> Option<(&str, &str)> {
        self.base_period
            .as_ref()
            .map(|(start, end)| (start.as_str(), end.as_str()))
    }

    /// Bound parameter overriding the rank, if any.
    pub fn rank_param(&self) -> Option<&'static str> {
        self.rank_param
    }
}

/// Everything the engine knows about one computable indicator.
///
/// Built once when the registry is initialised and never mutated.
#[derive(Debug, Clone)]
pub struct IndicatorDescriptor {
    canonical_id: &'static str,
    summary: &'static str,
    defaults: Vec<(&'static str, Value)>,
    units: Vec<(&'static str, &'static str)>,
    embedded_param: Option<&'static str>,
    requires_date_bounds: bool,
    percentiles: Vec<PercentileSpec>,
    force_consistent_chunking: bool,
    compute_ref: &'static IndicatorFunction,
}

impl IndicatorDescriptor {
    /// Creates a descriptor with no defaults.
    pub fn new(
        canonical_id: &'static str,
        summary: &'static str,
        compute_ref: &'static IndicatorFunction,
    ) -> Self {
        Self {
            canonical_id,
            summary,
            defaults: Vec::new(),
            units: Vec::new(),
            embedded_param: None,
            requires_date_bounds: false,
            percentiles: Vec::new(),
            force_consistent_chunking: false,
            compute_ref,
        }
    }

    /// Adds (or replaces) a default parameter value.
    pub fn with_default(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.defaults.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.defaults.push((name, value)),
        }
        self
    }

    /// Declares the unit stamped onto bare numbers bound to `name`.
    pub fn with_unit(mut self, name: &'static str, unit: &'static str) -> Self {
        self.units.push((name, unit));
        self
    }

    /// Names the default that receives a number embedded in the index code.
    pub fn with_embedded_param(mut self, name: &'static str) -> Self {
        self.embedded_param = Some(name);
        self
    }

    /// Declares a `start_date`/`end_date` window forwarded as `date_bounds`.
    pub fn with_date_bounds(mut self, start: &'static str, end: &'static str) -> Self {
        self.requires_date_bounds = true;
        self.with_default(START_DATE, start).with_default(END_DATE, end)
    }

    /// Adds a percentile input.
    ///
    /// The base period becomes a default: the spec's own period when it has
    /// one, a provider-filled [`Value::None`] otherwise.
    pub fn with_percentile(mut self, spec: PercentileSpec) -> Self {
        if self.default(BASE_PERIOD_PARAM).is_none() {
            let default = match spec.explicit_base_period() {
                Some((start, end)) => Value::Map(BTreeMap::from([
                    ("start".to_string(), Value::from(start)),
                    ("end".to_string(), Value::from(end)),
                ])),
                None => Value::None,
            };
            self = self.with_default(BASE_PERIOD_PARAM, default);
        }
        self.percentiles.push(spec);
        self
    }

    /// Runs the indicator inside a [`xcalc_array::ChunkingScope`].
    pub fn with_consistent_chunking(mut self) -> Self {
        self.force_consistent_chunking = true;
        self
    }

    // --- Accessors ---

    /// Canonical id.
    pub fn canonical_id(&self) -> &'static str {
        self.canonical_id
    }

    /// One-line description.
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Default parameters in declaration order.
    pub fn defaults(&self) -> &[(&'static str, Value)] {
        &self.defaults
    }

    /// Default value of one parameter.
    pub fn default(&self, name: &str) -> Option<&Value> {
        self.defaults.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Unit annotation of one parameter.
    pub fn unit(&self, name: &str) -> Option<&'static str> {
        self.units.iter().find(|(n, _)| *n == name).map(|(_, u)| *u)
    }

    /// All unit annotations.
    pub fn units(&self) -> &[(&'static str, &'static str)] {
        &self.units
    }

    pub fn embedded_param(&self) -> Option<&'static str> {
        self.embedded_param
    }

    pub fn requires_date_bounds(&self) -> bool {
        self.requires_date_bounds
    }

    pub fn percentiles(&self) -> &[PercentileSpec] {
        &self.percentiles
    }

    pub fn force_consistent_chunking(&self) -> bool {
        self.force_consistent_chunking
    }

    /// The indicator function this descriptor dispatches to.
    pub fn compute_ref(&self) -> &'static IndicatorFunction {
        self.compute_ref
    }

    /// Parameter names consumed by later pipeline stages instead of the call.
    pub fn staged_params(&self) -> BTreeSet<&'static str> {
        let mut staged = BTreeSet::new();
        if self.requires_date_bounds {
            staged.insert(START_DATE);
            staged.insert(END_DATE);
        }
        if !self.percentiles.is_empty() {
            staged.insert(BASE_PERIOD_PARAM);
        }
        for spec in &self.percentiles {
            if let Some(name) = spec.rank_param {
                staged.insert(name);
            }
            if let Preprocessing::Precipitation {
                thresh_param: Some(name),
            } = spec.preprocessing
            {
                staged.insert(name);
            }
        }
        staged
    }
}
