//! # xcalc-engine
//!
//! Turns a short index code (`"TG"`, `"RX5day"`, `"R95p"`) into one call of
//! an indicator function with a complete, unit-correct parameter set,
//! computing day-of-year percentile thresholds first when the indicator
//! needs them.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["index code"] --> B["NameResolver"]
//!     B -->|"ResolvedCode"| C["IndicatorRegistry::lookup()"]
//!     C -->|"IndicatorDescriptor"| D["ParameterBinder::bind()"]
//!     D -->|"ParameterSet"| E["IndicatorInvoker::invoke()"]
//!     E -->|"percentile specs"| F["PercentileEngine::materialize()"]
//!     F --> E
//!     E --> G["DataArray"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::collections::BTreeMap;
//! use xcalc_engine::{Calculator, EngineConfig};
//! use xcalc_indices::Value;
//!
//! let calculator = Calculator::new(EngineConfig::new().with_base_period("1971", "2000"))?;
//! let mut overrides = BTreeMap::new();
//! overrides.insert("freq".to_string(), Value::from("MS"));
//! let out = calculator.compute("R95p", &dataset, &overrides)?;
//! println!("{}: {} periods", out.output_name, out.result.n_steps());
//! ```
//!
//! ## Parameter precedence
//!
//! 1. Explicit overrides (a number embedded in the code counts as an override
//!    unless the caller sets that parameter).
//! 2. Descriptor defaults.
//! 3. [`DefaultProvider`] values for defaults declared as `None`.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `resolver` | Index code → canonical id + embedded value |
//! | `registry` | Descriptor lookup and the built-in catalogue |
//! | `descriptor` | Static per-indicator metadata |
//! | `binder` | Merging, unit stamping and routing of parameters |
//! | `percentile` | Day-of-year percentiles over a base period |
//! | `derive` | Missing inputs built from other variables (`sfcWind` from `uas`/`vas`) |
//! | `invoker` | Final argument assembly and the indicator call |
//! | `calculator` | The `Calculator::compute` entry point |
//! | `config` | Engine configuration |
//! | `error` | Error types |

mod binder;
mod calculator;
mod catalog;
mod config;
mod derive;
mod descriptor;
mod error;
mod invoker;
mod percentile;
mod registry;
mod resolver;

pub use binder::{DATE_BOUNDS, ParameterBinder, ParameterSet};
pub use calculator::{Calculator, Computation};
pub use config::{DEFAULT_BASE_PERIOD, DEFAULT_PLACEHOLDER, DefaultProvider, EngineConfig, NoDefaults};
pub use derive::complete_inputs;
pub use descriptor::{BASE_PERIOD_PARAM, IndicatorDescriptor, PercentileSpec, Preprocessing};
pub use error::EngineError;
pub use invoker::{IndicatorInvoker, Invocation};
pub use percentile::{PercentileEngine, PercentileRequest, STORED_PERCENTILE_VAR, percentile_doy};
pub use registry::IndicatorRegistry;
pub use resolver::{NameResolver, ResolvedCode};
