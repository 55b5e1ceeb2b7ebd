//! The indicator-function capability.

use xcalc_array::{DataArray, Dataset};

use crate::args::Args;
use crate::error::IndexError;

/// Signature of an indicator body.
pub type IndicatorFn = fn(&Dataset, &Args) -> Result<DataArray, IndexError>;

/// A callable indicator with its declared inputs and accepted parameters.
///
/// Instances are `static`s so that descriptors elsewhere can hold a
/// `&'static IndicatorFunction` as their compute reference.
#[derive(Debug)]
pub struct IndicatorFunction {
    name: &'static str,
    inputs: &'static [&'static str],
    params: &'static [&'static str],
    body: IndicatorFn,
}

impl IndicatorFunction {
    /// Declares a new indicator function.
    pub const fn new(
        name: &'static str,
        inputs: &'static [&'static str],
        params: &'static [&'static str],
        body: IndicatorFn,
    ) -> Self {
        Self {
            name,
            inputs,
            params,
            body,
        }
    }

    /// Function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Dataset variables the function reads.
    pub fn inputs(&self) -> &'static [&'static str] {
        self.inputs
    }

    /// Parameter names the function accepts.
    pub fn params(&self) -> &'static [&'static str] {
        self.params
    }

    /// Returns `true` if `param` is one of the accepted parameter names.
    pub fn accepts(&self, param: &str) -> bool {
        self.params.contains(&param)
    }

    /// Runs the indicator.
    ///
    /// # Errors
    ///
    /// Returns whatever the indicator body reports; missing input variables
    /// surface as [`xcalc_array::ArrayError::VariableNotFound`].
    pub fn call(&self, dataset: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
        tracing::debug!(function = self.name, args = args.len(), "calling indicator");
        (self.body)(dataset, args)
    }
}
