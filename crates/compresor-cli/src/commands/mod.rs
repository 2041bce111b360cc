//! CLI subcommands.

pub mod info;
pub mod params;
pub mod process;
