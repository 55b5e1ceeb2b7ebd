//! Final assembly of the call and the call itself.

use xcalc_array::{ChunkingScope, DataArray, Dataset};
use xcalc_calendar::MonthDay;
use xcalc_indices::Value;

use crate::binder::{DATE_BOUNDS, ParameterSet};
use crate::config::EngineConfig;
use crate::derive::complete_inputs;
use crate::descriptor::{BASE_PERIOD_PARAM, IndicatorDescriptor, PercentileSpec, Preprocessing};
use crate::error::EngineError;
use crate::percentile::{PercentileEngine, PercentileRequest};

/// Result of one indicator call.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The array returned by the indicator function.
    pub result: DataArray,
    /// Arguments the function was called with.
    pub params: ParameterSet,
    /// Percentiles computed (not passed through) for this call.
    pub percentiles_computed: usize,
}

/// Completes a [`ParameterSet`] and calls the indicator function once.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorInvoker<'c> {
    config: &'c EngineConfig,
}

impl<'c> IndicatorInvoker<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self { config }
    }

    /// Materialises percentiles and date bounds, drops unsupported
    /// arguments and calls `descriptor`'s function.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingVariable`] before any work if the dataset
    /// lacks an input of the function that cannot be derived, the percentile
    /// errors of
    /// [`PercentileEngine::materialize`], [`EngineError::InvalidParameter`]
    /// for unusable staged values, and the function's own error wrapped in
    /// [`EngineError::Indicator`].
    pub fn invoke(
        &self,
        descriptor: &IndicatorDescriptor,
        mut params: ParameterSet,
        dataset: &Dataset,
    ) -> Result<Invocation, EngineError> {
        let function = descriptor.compute_ref();
        let dataset = complete_inputs(function, dataset)?;
        let dataset = dataset.as_ref();

        let mut engine = PercentileEngine::new(self.config.percentile_window());
        for spec in descriptor.percentiles() {
            let request = self.request(spec, &params)?;
            let provided = params.args().get(spec.output_param_name()).cloned();
            let per = engine.materialize(&request, provided.as_ref(), dataset)?;
            params
                .args_mut()
                .insert(spec.output_param_name(), Value::Array(per));
        }

        if descriptor.requires_date_bounds() {
            let start = month_day(&params, "start_date")?;
            let end = month_day(&params, "end_date")?;
            params
                .args_mut()
                .insert(DATE_BOUNDS, Value::DateBounds(start, end));
        }

        params.retain_accepted(function);

        let result = if descriptor.force_consistent_chunking() {
            let _scope = ChunkingScope::disable_splitting();
            function.call(dataset, params.args())
        } else {
            function.call(dataset, params.args())
        }?;

        Ok(Invocation {
            result,
            params,
            percentiles_computed: engine.computations(),
        })
    }

    /// Applies staged rank, base period and wet-day threshold to `spec`.
    ///
    /// The base period comes from the bound parameter, else the spec's own
    /// period, else the configuration.
    fn request(
        &self,
        spec: &PercentileSpec,
        params: &ParameterSet,
    ) -> Result<PercentileRequest, EngineError> {
        let mut spec = spec.clone();
        if let Some(name) = spec.rank_param() {
            if let Some(value) = params.get(name) {
                spec = spec.with_rank(number(name, value)?);
            }
        }

        let (start, end) = match params.get(BASE_PERIOD_PARAM) {
            Some(value) => base_period(value)?,
            None => {
                let (s, e) = spec
                    .explicit_base_period()
                    .unwrap_or_else(|| self.config.base_period());
                (s.to_string(), e.to_string())
            }
        };
        spec = spec.with_base_period(start, end);

        let mut thresh = self.config.wet_day_threshold().to_string();
        if let Preprocessing::Precipitation {
            thresh_param: Some(name),
        } = spec.preprocessing()
        {
            if let Some(value) = params.get(name) {
                thresh = quantity_string(name, value)?;
            }
        }
        Ok(PercentileRequest::new(spec, thresh))
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn number(name: &str, value: &Value) -> Result<f64, EngineError> {
    match value {
        Value::Str(s) => xcalc_array::Quantity::parse(s)
            .map(|q| q.value())
            .map_err(|e| invalid(name, e.to_string())),
        other => other
            .as_f64()
            .ok_or_else(|| invalid(name, format!("expected a number, got {}", other.kind()))),
    }
}

fn quantity_string(name: &str, value: &Value) -> Result<String, EngineError> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        other => Err(invalid(
            name,
            format!("expected a quantity string, got {}", other.kind()),
        )),
    }
}

/// Accepts `{start, end}` maps and two-element lists; years may be numbers.
fn base_period(value: &Value) -> Result<(String, String), EngineError> {
    let text = |v: &Value| match v {
        Value::Str(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        other => Err(invalid(
            BASE_PERIOD_PARAM,
            format!("expected a date string, got {}", other.kind()),
        )),
    };
    match value {
        Value::Map(map) => match (map.get("start"), map.get("end")) {
            (Some(start), Some(end)) => Ok((text(start)?, text(end)?)),
            _ => Err(invalid(BASE_PERIOD_PARAM, "expected 'start' and 'end' keys")),
        },
        Value::List(items) if items.len() == 2 => Ok((text(&items[0])?, text(&items[1])?)),
        other => Err(invalid(
            BASE_PERIOD_PARAM,
            format!("expected a two-date range, got '{other}'"),
        )),
    }
}

fn month_day(params: &ParameterSet, name: &str) -> Result<MonthDay, EngineError> {
    let value = params
        .get(name)
        .ok_or_else(|| invalid(name, "required for date bounds"))?;
    let s = value
        .as_str()
        .ok_or_else(|| invalid(name, format!("expected \"MM-DD\", got {}", value.kind())))?;
    MonthDay::parse(s).map_err(|e| invalid(name, e.to_string()))
}
