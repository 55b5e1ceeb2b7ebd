//! List command: print the indicator catalogue.

use anyhow::Result;

use xcalc_engine::IndicatorRegistry;

use crate::cli::ListArgs;

/// Print every registered indicator, one per line.
pub fn run(args: ListArgs) -> Result<()> {
    let registry = IndicatorRegistry::builtin();
    for descriptor in registry.iter() {
        println!("{:<10} {}", descriptor.canonical_id(), descriptor.summary());
        if args.long {
            let function = descriptor.compute_ref();
            println!("{:<10}   function: {}", "", function.name());
            println!("{:<10}   inputs:   {}", "", function.inputs().join(", "));
            let params: Vec<_> = IndicatorRegistry::capabilities(descriptor)
                .into_iter()
                .collect();
            println!("{:<10}   params:   {}", "", params.join(", "));
            if let Some(embedded) = descriptor.embedded_param() {
                println!("{:<10}   embedded: {embedded}", "");
            }
        }
    }
    Ok(())
}
