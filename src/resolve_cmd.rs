//! Resolve command: show how an index code resolves and binds.

use anyhow::{Context, Result};
use tracing::info_span;

use xcalc_engine::{Calculator, ParameterSet, ResolvedCode};

use crate::cli::ResolveArgs;
use crate::config::XcalcConfig;
use crate::convert;

/// Resolve the code and print the bound parameters without computing.
pub fn run(args: ResolveArgs) -> Result<()> {
    let _cmd = info_span!("resolve", code = %args.code).entered();
    let config = XcalcConfig::load(args.config.as_deref())?;
    let engine = convert::build_engine_config(&config.engine)?;
    let overrides = convert::build_overrides(&args.set)?;

    let calculator = Calculator::new(engine)?;
    let (resolved, output_name, params) = calculator
        .bind(&args.code, &overrides)
        .with_context(|| format!("failed to resolve '{}'", args.code))?;

    println!("code:      {}", args.code);
    println!("canonical: {}", describe(&resolved));
    println!("output:    {output_name}");
    print_parameters(&params);
    Ok(())
}

fn describe(resolved: &ResolvedCode) -> String {
    match resolved {
        ResolvedCode::Exact { id } => format!("{id} (exact)"),
        ResolvedCode::AlphabeticStripped { id, value } => {
            format!("{id} (stripped, embedded {value})")
        }
        ResolvedCode::PlaceholderSubstituted { id, value, token } => {
            format!("{id} ({token} = {value})")
        }
    }
}

/// Print call arguments, staged parameters and dropped names.
pub fn print_parameters(params: &ParameterSet) {
    println!("args:");
    for (name, value) in params.args().iter() {
        println!("  {name} = {value}");
    }
    if !params.staged().is_empty() {
        println!("staged:");
        for (name, value) in params.staged() {
            println!("  {name} = {value}");
        }
    }
    if !params.dropped().is_empty() {
        println!("dropped:   {}", params.dropped().join(", "));
    }
}
