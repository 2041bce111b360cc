//! List the compressor parameters.

use clap::Args;
use compresor_core::ParamId;

/// List every parameter with its range and default.
#[derive(Args)]
pub struct ParamsArgs {}

/// Run the params command.
pub fn run(_args: ParamsArgs) -> anyhow::Result<()> {
    println!("Compressor Parameters:\n");
    println!(
        "  {:<12} {:<14} {:>8} {:>8} {:>8}",
        "Key", "Name", "Min", "Max", "Default"
    );

    for id in ParamId::ALL {
        let desc = id.descriptor();
        let unit = desc.unit.label();
        println!(
            "  {:<12} {:<14} {:>8} {:>8} {:>8} {}",
            desc.key, desc.name, desc.min, desc.max, desc.default, unit
        );
    }

    Ok(())
}
