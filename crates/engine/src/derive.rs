//! Inputs built from other variables when the dataset lacks them.

use std::borrow::Cow;

use tracing::info;
use xcalc_array::{DataArray, Dataset};
use xcalc_indices::IndicatorFunction;

use crate::error::EngineError;

/// Signature of a derivation from the dataset to the missing variable.
type DeriveFn = fn(&Dataset) -> Result<DataArray, EngineError>;

/// Derivable variables and the variables they are built from.
const DERIVATIONS: &[(&str, &[&str], DeriveFn)] =
    &[("sfcWind", &["uas", "vas"], sfc_wind_from_components)];

/// Returns `dataset` with every missing input of `function` derived.
///
/// The dataset is only cloned when something has to be added.
///
/// # Errors
///
/// Returns [`EngineError::MissingVariable`] if an input is absent and cannot
/// be derived, and [`EngineError::Derivation`] if the sources do not line up.
pub fn complete_inputs<'a>(
    function: &IndicatorFunction,
    dataset: &'a Dataset,
) -> Result<Cow<'a, Dataset>, EngineError> {
    let mut dataset = Cow::Borrowed(dataset);
    for &input in function.inputs() {
        if dataset.contains(input) {
            continue;
        }
        let Some((_, sources, derive)) = DERIVATIONS
            .iter()
            .find(|(name, sources, _)| *name == input && sources.iter().all(|s| dataset.contains(s)))
        else {
            return Err(EngineError::MissingVariable {
                name: input.to_string(),
            });
        };
        let derived = derive(&dataset)?;
        info!(variable = input, from = ?sources, "derived missing input");
        dataset.to_mut().insert(derived);
    }
    Ok(dataset)
}

/// Wind speed `sqrt(uas² + vas²)` in the units of `uas`.
fn sfc_wind_from_components(ds: &Dataset) -> Result<DataArray, EngineError> {
    let uas = ds.get("uas")?;
    let vas = ds.get("vas")?.convert_units(uas.units())?;
    if uas.coord() != vas.coord() || uas.n_cells() != vas.n_cells() {
        return Err(EngineError::Derivation {
            variable: "sfcWind".to_string(),
            reason: "'uas' and 'vas' are on different grids".to_string(),
        });
    }
    let mut speed = uas.values().clone();
    speed.zip_mut_with(vas.values(), |u, &v| *u = u.hypot(v));
    Ok(DataArray::new("sfcWind", uas.coord().clone(), speed, uas.units())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use xcalc_calendar::daily_sequence;
    use xcalc_indices::wind::{SFC_WIND_MEAN, SFC_WINDMAX_MEAN};

    fn series(name: &str, values: Vec<f64>, units: &str) -> DataArray {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        DataArray::from_series(name, daily_sequence(start, values.len()), values, units).unwrap()
    }

    fn components() -> Dataset {
        Dataset::new()
            .with_variable(series("uas", vec![3.0, 0.0, -6.0], "m s-1"))
            .with_variable(series("vas", vec![4.0, 2.0, 8.0], "m s-1"))
    }

    #[test]
    fn present_inputs_are_borrowed() {
        let ds = Dataset::new().with_variable(series("sfcWind", vec![1.0], "m s-1"));
        let out = complete_inputs(&SFC_WIND_MEAN, &ds).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn wind_speed_from_components() {
        let ds = components();
        let out = complete_inputs(&SFC_WIND_MEAN, &ds).unwrap();
        let wind = out.get("sfcWind").unwrap();
        assert_eq!(wind.units(), "m s-1");
        assert_eq!(wind.column(0).to_vec(), vec![5.0, 2.0, 10.0]);
        assert!(!ds.contains("sfcWind"));
    }

    #[test]
    fn underivable_input_is_missing() {
        let err = complete_inputs(&SFC_WINDMAX_MEAN, &components()).unwrap_err();
        assert!(matches!(err, EngineError::MissingVariable { ref name } if name == "sfcWindmax"));

        let only_u = Dataset::new().with_variable(series("uas", vec![1.0], "m s-1"));
        let err = complete_inputs(&SFC_WIND_MEAN, &only_u).unwrap_err();
        assert!(matches!(err, EngineError::MissingVariable { ref name } if name == "sfcWind"));
    }

    #[test]
    fn misaligned_components() {
        let ds = Dataset::new()
            .with_variable(series("uas", vec![1.0, 2.0], "m s-1"))
            .with_variable(series("vas", vec![1.0], "m s-1"));
        let err = complete_inputs(&SFC_WIND_MEAN, &ds).unwrap_err();
        assert!(matches!(err, EngineError::Derivation { ref variable, .. } if variable == "sfcWind"));
    }
}
