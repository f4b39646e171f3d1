use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to loom.toml (defaults to ./loom.toml)
    #[arg(short, long, default_value = "loom.toml")]
    pub manifest: PathBuf,

    /// Print the loaded graph as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let loaded = ops::load(&self.manifest)?;

        if self.json {
            let json = serde_json::to_string_pretty(&loaded.graph)
                .wrap_err("failed to serialize the graph")?;
            println!("{json}");
            return Ok(());
        }

        ops::check(&loaded, &self.manifest).render(&mut TerminalOutput);
        Ok(())
    }
}
