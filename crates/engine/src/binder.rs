//! Parameter binding: overrides, registry defaults and provider fallbacks.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};
use xcalc_indices::{Args, IndicatorFunction, Value};

use crate::config::DefaultProvider;
use crate::descriptor::IndicatorDescriptor;

/// Synthetic parameter carrying a month-day window; always forwarded.
pub const DATE_BOUNDS: &str = "date_bounds";

/// Parameters of one invocation, split by where they go.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    args: Args,
    staged: BTreeMap<String, Value>,
    dropped: Vec<String>,
}

impl ParameterSet {
    /// Arguments forwarded to the indicator function.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Arguments forwarded to the indicator function, mutably.
    pub fn args_mut(&mut self) -> &mut Args {
        &mut self.args
    }

    /// Values consumed by the percentile and date-bounds stages.
    pub fn staged(&self) -> &BTreeMap<String, Value> {
        &self.staged
    }

    /// Names removed because nothing downstream accepts them.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Bound value of `name`, from the arguments first, then the staged set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name).or_else(|| self.staged.get(name))
    }

    /// Removes every argument `function` does not accept, keeping
    /// `date_bounds`, and records what was removed.
    pub fn retain_accepted(&mut self, function: &IndicatorFunction) {
        let mut removed = Vec::new();
        self.args.retain(|name, _| {
            let keep = function.accepts(name) || name == DATE_BOUNDS;
            if !keep {
                removed.push(name.to_string());
            }
            keep
        });
        for name in removed {
            warn!(
                parameter = %name,
                function = function.name(),
                "dropping unsupported parameter"
            );
            self.dropped.push(name);
        }
    }

    /// Consumes the set, returning the arguments.
    pub fn into_args(self) -> Args {
        self.args
    }
}

/// Merges the three parameter sources for one descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterBinder;

impl ParameterBinder {
    /// Binds parameters for `descriptor`.
    ///
    /// Explicit `overrides` win over descriptor defaults; defaults declared
    /// as [`Value::None`] are filled by `provider` or left out. Two maps are
    /// merged one level deep. Bare numbers get the descriptor's unit for that
    /// parameter; strings are left for the indicator to parse. Each bound name
    /// is then routed to the function arguments, the staged set, or dropped.
    pub fn bind(
        descriptor: &IndicatorDescriptor,
        overrides: &BTreeMap<String, Value>,
        provider: &dyn DefaultProvider,
    ) -> ParameterSet {
        let mut bound: BTreeMap<String, Value> = BTreeMap::new();

        for (name, default) in descriptor.defaults() {
            let base = if default.is_none() {
                provider.default_for(name)
            } else {
                Some(default.clone())
            };
            let given = overrides.get(*name).filter(|v| !v.is_none());
            let value = match (given, base) {
                (Some(Value::Map(over)), Some(Value::Map(mut merged))) => {
                    merged.extend(over.iter().map(|(k, v)| (k.clone(), v.clone())));
                    Value::Map(merged)
                }
                (Some(over), _) => over.clone(),
                (None, Some(base)) => base,
                (None, None) => {
                    debug!(parameter = *name, "no value bound");
                    continue;
                }
            };
            bound.insert(name.to_string(), value);
        }
        for (name, value) in overrides {
            if !bound.contains_key(name) && !value.is_none() {
                bound.insert(name.clone(), value.clone());
            }
        }

        for (name, unit) in descriptor.units() {
            if let Some(value) = bound.get_mut(*name) {
                stamp_units(value, unit);
            }
        }

        let function = descriptor.compute_ref();
        let staged_names = descriptor.staged_params();
        let mut params = ParameterSet::default();
        for (name, value) in bound {
            route(&mut params, function, &staged_names, name, value);
        }
        debug!(
            id = descriptor.canonical_id(),
            args = params.args.len(),
            staged = params.staged.len(),
            dropped = params.dropped.len(),
            "parameters bound"
        );
        params
    }
}

fn route(
    params: &mut ParameterSet,
    function: &IndicatorFunction,
    staged_names: &BTreeSet<&'static str>,
    name: String,
    value: Value,
) {
    let forwarded = function.accepts(&name) || name == DATE_BOUNDS;
    let staged = staged_names.contains(name.as_str());
    match (forwarded, staged) {
        (true, true) => {
            params.staged.insert(name.clone(), value.clone());
            params.args.insert(name, value);
        }
        (true, false) => params.args.insert(name, value),
        (false, true) => {
            params.staged.insert(name, value);
        }
        (false, false) => {
            warn!(
                parameter = %name,
                function = function.name(),
                "dropping unsupported parameter"
            );
            params.dropped.push(name);
        }
    }
}

/// Turns bare numbers into `"<number> <unit>"`, one map level deep.
fn stamp_units(value: &mut Value, unit: &str) {
    match value {
        Value::Int(_) | Value::Float(_) => {
            *value = Value::Str(format!("{value} {unit}"));
        }
        Value::Map(entries) => {
            for entry in entries.values_mut() {
                if entry.is_number() {
                    *entry = Value::Str(format!("{entry} {unit}"));
                }
            }
        }
        _ => {}
    }
}
