//! Generate command report data structures.

use std::path::PathBuf;

use loom_core::{AppliedEffect, SideEffect};

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub workspace_name: String,
    /// Name of the scenario that ran.
    pub scenario: &'static str,
    /// Where the generated workspace lives.
    pub output_path: PathBuf,
    /// Every scheme in the final graph.
    pub schemes: Vec<String>,
    pub result: EffectsResult,
}

/// What happened to the side effects.
#[derive(Debug)]
pub enum EffectsResult {
    /// Effects were applied to disk.
    Applied(Vec<(PathBuf, AppliedEffect)>),
    /// Dry-run preview.
    Preview(Vec<SideEffect>),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("{} ({})", self.workspace_name, self.scenario));
        out.key_value("output", &self.output_path.display().to_string());
        out.newline();

        out.section(&format!("Schemes ({})", self.schemes.len()));
        for scheme in &self.schemes {
            out.list_item(scheme);
        }
        out.newline();

        match &self.result {
            EffectsResult::Applied(applied) => {
                let changed: Vec<_> = applied
                    .iter()
                    .filter(|(_, outcome)| *outcome != AppliedEffect::Unchanged)
                    .collect();
                if changed.is_empty() {
                    out.preformatted("Everything up to date");
                    return;
                }
                out.section("Updated");
                for (path, _) in changed {
                    out.added_item(&path.display().to_string());
                }
            }
            EffectsResult::Preview(effects) => {
                for effect in effects {
                    match effect {
                        SideEffect::WriteFile { path, content } => {
                            out.divider(&path.display().to_string());
                            out.preformatted(content);
                        }
                        SideEffect::CreateDirectory { path } => {
                            out.divider(&format!("{}/", path.display()));
                        }
                    }
                }
                out.divider("Summary");
                out.preformatted(&format!("{} effects would be applied", effects.len()));
            }
        }
    }
}
