use std::{collections::BTreeSet, path::PathBuf};

use clap::{Args, ValueEnum};
use eyre::{Result, bail};
use loom_mappers::Scenario;

use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    #[default]
    Default,
    Automation,
    Cache,
}

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to loom.toml (defaults to ./loom.toml)
    #[arg(short, long, default_value = "loom.toml")]
    pub manifest: PathBuf,

    /// Which pipeline to run
    #[arg(long, value_enum, default_value_t)]
    pub scenario: ScenarioArg,

    /// Absolute directory for derived state (automation only)
    #[arg(long, required_if_eq("scenario", "automation"))]
    pub automation_dir: Option<PathBuf>,

    /// Target to keep in the cache graph (cache only, repeatable)
    #[arg(long = "include-target", value_name = "NAME")]
    pub include_targets: Vec<String>,

    /// Print side effects without applying them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let scenario = self.scenario()?;
        let loaded = ops::load(&self.manifest)?;
        let report = ops::generate(
            loaded,
            GenerateOptions {
                scenario,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput);
        Ok(())
    }

    fn scenario(&self) -> Result<Scenario> {
        match self.scenario {
            ScenarioArg::Default => Ok(Scenario::Default),
            ScenarioArg::Automation => match &self.automation_dir {
                Some(dir) => Ok(Scenario::Automation {
                    workspace_directory: std::path::absolute(dir)?,
                }),
                None => bail!("--automation-dir is required for the automation scenario"),
            },
            ScenarioArg::Cache => {
                if self.include_targets.is_empty() {
                    bail!("--include-target is required for the cache scenario");
                }
                let included_targets: BTreeSet<String> =
                    self.include_targets.iter().cloned().collect();
                Ok(Scenario::Cache { included_targets })
            }
        }
    }
}
