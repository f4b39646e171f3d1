//! Generate operation - run a scenario's mappers and apply their effects.

use eyre::{Context, Result};
use loom_core::AppliedEffect;
use loom_loader::Loaded;
use loom_mappers::{Scenario, WorkspaceMapper, WorkspaceMapperFactory};
use tracing::info;

use crate::reports::{EffectsResult, GenerateReport};

/// Options for the generate operation.
pub struct GenerateOptions {
    pub scenario: Scenario,
    /// Describe the side effects instead of applying them.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(loaded: Loaded, opts: GenerateOptions) -> Result<GenerateReport> {
    let Loaded { graph, config } = loaded;
    let pipeline = WorkspaceMapperFactory::from_config(&config).pipeline(&config, &opts.scenario);
    let (graph, side_effects) = pipeline.map(&graph).wrap_err("Generation failed")?;

    let result = if opts.dry_run {
        EffectsResult::Preview(side_effects)
    } else {
        let mut applied = Vec::with_capacity(side_effects.len());
        for effect in side_effects {
            let outcome = effect
                .apply()
                .wrap_err_with(|| format!("failed to apply effect on {}", effect.path().display()))?;
            if outcome != AppliedEffect::Unchanged {
                info!(path = %effect.path().display(), ?outcome, "applied side effect");
            }
            applied.push((effect.path().to_path_buf(), outcome));
        }
        EffectsResult::Applied(applied)
    };

    Ok(GenerateReport {
        workspace_name: graph.workspace.name.clone(),
        scenario: opts.scenario.name(),
        output_path: graph.workspace.output_path.clone(),
        schemes: graph.schemes().map(|s| s.name.clone()).collect(),
        result,
    })
}
