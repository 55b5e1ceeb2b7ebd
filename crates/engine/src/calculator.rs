//! The `Calculator` façade: index code in, labelled result out.

use std::collections::BTreeMap;

use xcalc_array::{DataArray, Dataset};
use xcalc_indices::Value;

use crate::binder::{ParameterBinder, ParameterSet};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::invoker::IndicatorInvoker;
use crate::registry::IndicatorRegistry;
use crate::resolver::{NameResolver, ResolvedCode};

/// Outcome of [`Calculator::compute`].
#[derive(Debug, Clone)]
pub struct Computation {
    /// Canonical id the code resolved to.
    pub canonical_id: &'static str,
    /// How the code was resolved.
    pub resolved: ResolvedCode,
    /// Name for the result (e.g. `"RX3day"` for `"RXYYday"` with `window=3`).
    pub output_name: String,
    /// Parameters the indicator function was called with.
    pub parameters: ParameterSet,
    /// The indicator result.
    pub result: DataArray,
    /// Percentiles computed for this request.
    pub percentiles_computed: usize,
}

/// Computes indicators from index codes.
///
/// # Example
///
/// ```no_run
/// use std::collections::BTreeMap;
/// use xcalc_array::Dataset;
/// use xcalc_engine::{Calculator, EngineConfig};
///
/// # fn run(dataset: &Dataset) -> Result<(), xcalc_engine::EngineError> {
/// let calculator = Calculator::new(EngineConfig::new())?;
/// let out = calculator.compute("RX5day", dataset, &BTreeMap::new())?;
/// assert_eq!(out.canonical_id, "RXYYday");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Calculator<'r> {
    registry: &'r IndicatorRegistry,
    config: EngineConfig,
}

impl Calculator<'static> {
    /// Creates a calculator over the built-in catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Calculator::with_registry(IndicatorRegistry::builtin(), config)
    }
}

impl<'r> Calculator<'r> {
    /// Creates a calculator over a custom registry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `config` does not validate.
    pub fn with_registry(
        registry: &'r IndicatorRegistry,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn registry(&self) -> &'r IndicatorRegistry {
        self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves an index code without computing anything.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndex`] if the code matches nothing.
    pub fn resolve(&self, code: &str) -> Result<ResolvedCode, EngineError> {
        NameResolver::new(self.registry, self.config.placeholder()).resolve(code)
    }

    /// Resolves and binds without calling the indicator.
    ///
    /// `freq` is not filled in, since there is no dataset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndex`] if the code matches nothing.
    pub fn bind(
        &self,
        code: &str,
        overrides: &BTreeMap<String, Value>,
    ) -> Result<(ResolvedCode, String, ParameterSet), EngineError> {
        let resolver = NameResolver::new(self.registry, self.config.placeholder());
        let resolved = resolver.resolve(code)?;
        let descriptor = self.registry.lookup(resolved.canonical_id())?;
        let (overrides, overridden) = fold_embedded(descriptor.embedded_param(), &resolved, overrides);
        let params = ParameterBinder::bind(descriptor, &overrides, &self.config);
        let name = resolver.output_name(code, descriptor, &params, overridden);
        Ok((resolved, name, params))
    }

    /// Computes the indicator named by `code` on `dataset`.
    ///
    /// The number embedded in the code is bound unless `overrides` sets that
    /// parameter explicitly. `freq` defaults to the dataset's frequency token.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndex`] for unresolvable codes and
    /// propagates input, percentile and indicator errors.
    #[tracing::instrument(skip(self, dataset, overrides), fields(id = tracing::field::Empty))]
    pub fn compute(
        &self,
        code: &str,
        dataset: &Dataset,
        overrides: &BTreeMap<String, Value>,
    ) -> Result<Computation, EngineError> {
        let resolver = NameResolver::new(self.registry, self.config.placeholder());
        let resolved = resolver.resolve(code)?;
        let descriptor = self.registry.lookup(resolved.canonical_id())?;
        tracing::Span::current().record("id", descriptor.canonical_id());

        let (mut overrides, overridden) =
            fold_embedded(descriptor.embedded_param(), &resolved, overrides);
        if descriptor.compute_ref().accepts("freq") && !overrides.contains_key("freq") {
            if let Some(freq) = dataset.frequency() {
                overrides.insert("freq".to_string(), Value::from(freq));
            }
        }

        let params = ParameterBinder::bind(descriptor, &overrides, &self.config);
        let output_name = resolver.output_name(code, descriptor, &params, overridden);
        let invocation = IndicatorInvoker::new(&self.config).invoke(descriptor, params, dataset)?;

        tracing::info!(
            output = %output_name,
            steps = invocation.result.n_steps(),
            percentiles = invocation.percentiles_computed,
            "indicator computed"
        );
        Ok(Computation {
            canonical_id: descriptor.canonical_id(),
            resolved,
            output_name,
            parameters: invocation.params,
            result: invocation.result,
            percentiles_computed: invocation.percentiles_computed,
        })
    }
}

/// Adds the embedded value under its parameter unless it is overridden.
///
/// Returns the merged overrides and whether the caller set the parameter.
fn fold_embedded(
    param: Option<&'static str>,
    resolved: &ResolvedCode,
    overrides: &BTreeMap<String, Value>,
) -> (BTreeMap<String, Value>, bool) {
    let mut merged = overrides.clone();
    let Some(param) = param else {
        return (merged, false);
    };
    let overridden = overrides.get(param).is_some_and(|v| !v.is_none());
    if !overridden {
        if let Some(value) = resolved.embedded_value() {
            merged.insert(param.to_string(), value.clone());
        }
    }
    (merged, overridden)
}
