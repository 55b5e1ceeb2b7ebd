//! Compute command: evaluate an index on inline daily series.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use xcalc_array::{Coord, DataArray};
use xcalc_engine::Calculator;

use crate::cli::ComputeArgs;
use crate::config::XcalcConfig;
use crate::{convert, input, resolve_cmd};

/// Run the computation and print the result as a table.
pub fn run(args: ComputeArgs) -> Result<()> {
    let _cmd = info_span!("compute", code = %args.code).entered();
    let config = XcalcConfig::load(args.config.as_deref())?;
    let engine = convert::build_engine_config(&config.engine)?;
    let overrides = convert::build_overrides(&args.set)?;

    info!(path = %args.input.display(), "reading input series");
    let series = input::read_series(&args.input)?;
    let dataset = convert::build_dataset(&series)?;
    info!(n_variables = dataset.len(), "input series loaded");

    let calculator = Calculator::new(engine)?;
    let out = calculator
        .compute(&args.code, &dataset, &overrides)
        .with_context(|| format!("failed to compute '{}'", args.code))?;

    println!(
        "# {} ({}) [{}]",
        out.output_name,
        out.canonical_id,
        out.result.units()
    );
    if args.show_params {
        resolve_cmd::print_parameters(&out.parameters);
    }
    print_table(&out.result);
    Ok(())
}

fn print_table(result: &DataArray) {
    let labels: Vec<String> = match result.coord() {
        Coord::Time(dates) => dates.iter().map(|d| d.to_string()).collect(),
        Coord::DayOfYear(doys) => doys.iter().map(|d| d.get().to_string()).collect(),
    };
    for (label, row) in labels.iter().zip(result.values().rows()) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        println!("{label}\t{}", cells.join("\t"));
    }
}
