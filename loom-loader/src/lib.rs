//! Maps a decoded [`Manifest`] into a validated [`Graph`].
//!
//! Loading is pure: paths go through the caller's [`PathResolver`] and
//! nothing touches the filesystem. Every target reference in the manifest
//! (dependencies, scheme actions, coverage lists) must name a target that
//! exists in the workspace.

mod context;
mod cycle;
mod error;
mod scope;

use std::path::{Path, PathBuf};

use loom_core::{PathResolver, Version, normalize};
use loom_graph::{
    AnalyzeAction, ArchiveAction, BuildAction, CodeCoverageMode, Config, ConfigurationName,
    ExecutionAction, GenerationOption, Graph, ProfileAction, Project, ProjectOptions, RunAction,
    Scheme, Target, TestAction, Workspace,
};
use loom_manifest::{self as manifest, Manifest, ProjectOption};
use tracing::debug;

pub use error::{Result, ValidationError};

use crate::{context::FieldPath, scope::Scope};

const DEFAULT_SHELL: &str = "/bin/sh";

/// A loaded manifest: the graph plus the validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub graph: Graph,
    pub config: Config,
}

/// Load both the graph and the configuration.
pub fn load(manifest: &Manifest, resolver: &dyn PathResolver) -> Result<Loaded> {
    let located = locate(manifest, resolver);
    let scope = Scope::new(resolver.resolve(Path::new(".")), &located);
    let config = load_config_in(&manifest.config, &scope)?;
    let graph = load_graph_in(manifest, resolver, &located, &scope, &config)?;
    Ok(Loaded { graph, config })
}

/// Load only the graph.
pub fn load_graph(manifest: &Manifest, resolver: &dyn PathResolver) -> Result<Graph> {
    load(manifest, resolver).map(|loaded| loaded.graph)
}

/// Load only the configuration.
pub fn load_config(manifest: &Manifest, resolver: &dyn PathResolver) -> Result<Config> {
    let located = locate(manifest, resolver);
    let scope = Scope::new(resolver.resolve(Path::new(".")), &located);
    load_config_in(&manifest.config, &scope)
}

fn locate<'m>(
    manifest: &'m Manifest,
    resolver: &dyn PathResolver,
) -> Vec<(PathBuf, &'m manifest::Project)> {
    manifest
        .projects
        .iter()
        .map(|project| (resolver.resolve(Path::new(&project.path)), project))
        .collect()
}

fn load_graph_in(
    manifest: &Manifest,
    resolver: &dyn PathResolver,
    located: &[(PathBuf, &manifest::Project)],
    scope: &Scope,
    config: &Config,
) -> Result<Graph> {
    let projects_ctx = FieldPath::root().push("projects");
    let projects = located
        .iter()
        .map(|(path, project)| {
            let ctx = projects_ctx.push(&project.name);
            load_project(project, path, scope, config, &ctx)
        })
        .collect::<Result<Vec<_>>>()?;

    cycle::check_acyclic(&projects)?;

    let workspace = Workspace::new(
        manifest.workspace.name.as_str(),
        resolver.resolve(Path::new(".")),
    );
    let graph = Graph::new(workspace, projects);
    debug!(
        workspace = %graph.workspace.name,
        projects = graph.projects.len(),
        "loaded graph"
    );
    Ok(graph)
}

fn load_config_in(config: &manifest::Config, scope: &Scope) -> Result<Config> {
    let ctx = FieldPath::root().push("config").push("generation_options");
    config
        .generation_options
        .iter()
        .map(|option| load_option(option, scope, &ctx))
        .collect::<Result<Vec<_>>>()
        .map(Config::new)
}

fn load_option(
    option: &manifest::GenerationOption,
    scope: &Scope,
    ctx: &FieldPath,
) -> Result<GenerationOption> {
    use manifest::GenerationOption as M;

    Ok(match option {
        M::ProjectName(template) => GenerationOption::ProjectName(template.clone()),
        M::OrganizationName(name) => GenerationOption::OrganizationName(name.clone()),
        M::DevelopmentRegion(region) => GenerationOption::DevelopmentRegion(region.clone()),
        M::DisableAutogeneratedSchemes => GenerationOption::DisableAutogeneratedSchemes,
        M::DisableSynthesizedResourceAccessors => {
            GenerationOption::DisableSynthesizedResourceAccessors
        }
        M::DisableShowEnvironmentVarsInScriptPhases => {
            GenerationOption::DisableShowEnvironmentVarsInScriptPhases
        }
        M::EnableCodeCoverage(mode) => GenerationOption::EnableCodeCoverage(match mode {
            manifest::CodeCoverageMode::All => CodeCoverageMode::All,
            manifest::CodeCoverageMode::Relevant => CodeCoverageMode::Relevant,
            manifest::CodeCoverageMode::Targets(targets) => CodeCoverageMode::Targets(
                targets
                    .iter()
                    .map(|t| scope.resolve_anywhere(t, || ctx.field("enable_code_coverage")))
                    .collect::<Result<Vec<_>>>()?,
            ),
        }),
        M::TestingOptions(options) => GenerationOption::TestingOptions(*options),
        M::ResolveDependenciesWithSystemScm => GenerationOption::ResolveDependenciesWithSystemScm,
        M::DisablePackageVersionLocking => GenerationOption::DisablePackageVersionLocking,
        M::DisableBundleAccessors => GenerationOption::DisableBundleAccessors,
        M::LastUpgradeCheck(value) => {
            GenerationOption::LastUpgradeCheck(parse_version(value, ctx.field("last_upgrade_check"))?)
        }
    })
}

fn parse_version(value: &str, field: String) -> Result<Version> {
    value
        .parse()
        .map_err(|reason| ValidationError::MalformedVersion {
            value: value.to_string(),
            field,
            reason,
        })
}

fn load_project(
    project: &manifest::Project,
    path: &Path,
    scope: &Scope,
    config: &Config,
    ctx: &FieldPath,
) -> Result<Project> {
    let mut seen: Vec<&str> = Vec::new();
    for target in &project.targets {
        if seen.contains(&target.name.as_str()) {
            return Err(ValidationError::DuplicateTarget {
                project: project.name.clone(),
                name: target.name.clone(),
            });
        }
        seen.push(&target.name);
    }

    let targets_ctx = ctx.push("targets");
    let targets = project
        .targets
        .iter()
        .map(|target| load_target(target, path, scope, &targets_ctx.push(&target.name)))
        .collect::<Result<Vec<_>>>()?;

    let schemes_ctx = ctx.push("schemes");
    let schemes = project
        .schemes
        .iter()
        .map(|scheme| load_scheme(scheme, path, scope, config, &schemes_ctx.push(&scheme.name)))
        .collect::<Result<Vec<_>>>()?;

    let mut loaded = Project::new(project.name.as_str(), path);
    loaded.organization_name = project.organization_name.clone();
    loaded.development_region = project.development_region.clone();
    loaded.options = fold_options(&project.options);
    loaded.file_header_template = project.file_header_template.clone();
    loaded.targets = targets;
    loaded.schemes = schemes;
    Ok(loaded)
}

/// Fold the project option list; the first entry of each kind wins.
fn fold_options(options: &[ProjectOption]) -> ProjectOptions {
    let mut folded = ProjectOptions::default();
    let mut automatic_schemes = None;
    for option in options {
        match option {
            ProjectOption::AutomaticSchemesOptions(schemes) => {
                automatic_schemes.get_or_insert_with(|| schemes.clone());
            }
            ProjectOption::DisableBundleAccessors => folded.disable_bundle_accessors = true,
            ProjectOption::DisableSynthesizedResourceAccessors => {
                folded.disable_synthesized_resource_accessors = true
            }
            ProjectOption::TextSettings(settings) => {
                folded.text_settings.get_or_insert_with(|| settings.clone());
            }
        }
    }
    if let Some(schemes) = automatic_schemes {
        folded.automatic_schemes = schemes;
    }
    folded
}

fn load_target(
    target: &manifest::Target,
    project_path: &Path,
    scope: &Scope,
    ctx: &FieldPath,
) -> Result<Target> {
    let dependencies = target
        .dependencies
        .iter()
        .map(|d| scope.resolve(project_path, d, || ctx.field("dependencies")))
        .collect::<Result<Vec<_>>>()?;

    let relative = |p: &String| normalize(&project_path.join(p));

    let mut loaded = Target::new(target.name.as_str(), target.product, target.bundle_id.as_str());
    if let Some(product_name) = &target.product_name {
        loaded.product_name = product_name.clone();
    }
    loaded.sources = target.sources.iter().map(relative).collect();
    loaded.resources = target.resources.iter().map(relative).collect();
    loaded.public_headers = target.public_headers.as_ref().map(relative);
    loaded.dependencies = dependencies;
    loaded.settings = target.settings.clone();
    Ok(loaded)
}

/// Shared state for loading one scheme's actions.
struct SchemeLoader<'a> {
    project_path: &'a Path,
    scope: &'a Scope,
    show_env_vars: bool,
}

impl SchemeLoader<'_> {
    fn targets(
        &self,
        targets: &[manifest::TargetReference],
        field: impl Fn() -> String,
    ) -> Result<Vec<loom_graph::TargetReference>> {
        targets
            .iter()
            .map(|t| self.scope.resolve(self.project_path, t, &field))
            .collect()
    }

    fn target(
        &self,
        target: Option<&manifest::TargetReference>,
        field: impl FnOnce() -> String,
    ) -> Result<Option<loom_graph::TargetReference>> {
        target
            .map(|t| self.scope.resolve(self.project_path, t, field))
            .transpose()
    }

    fn configuration(&self, name: &ConfigurationName, ctx: &FieldPath) -> Result<ConfigurationName> {
        if name.as_str().trim().is_empty() {
            return Err(ValidationError::InvalidConfigurationName {
                field: ctx.field("configuration"),
            });
        }
        Ok(name.clone())
    }

    fn hooks(
        &self,
        actions: &[manifest::ExecutionAction],
        ctx: &FieldPath,
        leaf: &str,
    ) -> Result<Vec<ExecutionAction>> {
        actions
            .iter()
            .map(|action| {
                Ok(ExecutionAction {
                    title: action.title.clone(),
                    script: action.script.clone(),
                    target: self.target(action.target.as_ref(), || {
                        format!("{}.target", ctx.field(leaf))
                    })?,
                    shell: action
                        .shell
                        .clone()
                        .unwrap_or_else(|| DEFAULT_SHELL.to_string()),
                    show_env_vars: self.show_env_vars,
                })
            })
            .collect()
    }
}

fn load_scheme(
    scheme: &manifest::Scheme,
    project_path: &Path,
    scope: &Scope,
    config: &Config,
    ctx: &FieldPath,
) -> Result<Scheme> {
    let loader = SchemeLoader {
        project_path,
        scope,
        show_env_vars: !config.show_environment_vars_disabled(),
    };

    let mut loaded = Scheme::new(scheme.name.as_str());
    loaded.shared = scheme.shared;

    if let Some(build) = &scheme.build {
        let ctx = ctx.push("build");
        loaded.build = Some(BuildAction {
            targets: loader.targets(&build.targets, || ctx.field("targets"))?,
            pre_actions: loader.hooks(&build.pre_actions, &ctx, "pre_actions")?,
            post_actions: loader.hooks(&build.post_actions, &ctx, "post_actions")?,
        });
    }

    if let Some(test) = &scheme.test {
        let ctx = ctx.push("test");
        loaded.test = Some(TestAction {
            targets: loader.targets(&test.targets, || ctx.field("targets"))?,
            configuration: loader.configuration(&test.configuration, &ctx)?,
            coverage: test.coverage,
            code_coverage_targets: loader
                .targets(&test.code_coverage_targets, || ctx.field("code_coverage_targets"))?,
            testing_options: test.testing_options,
            arguments: test.arguments.clone(),
            pre_actions: loader.hooks(&test.pre_actions, &ctx, "pre_actions")?,
            post_actions: loader.hooks(&test.post_actions, &ctx, "post_actions")?,
        });
    }

    if let Some(run) = &scheme.run {
        let ctx = ctx.push("run");
        loaded.run = Some(RunAction {
            configuration: loader.configuration(&run.configuration, &ctx)?,
            executable: loader.target(run.executable.as_ref(), || ctx.field("executable"))?,
            arguments: run.arguments.clone(),
            pre_actions: loader.hooks(&run.pre_actions, &ctx, "pre_actions")?,
            post_actions: loader.hooks(&run.post_actions, &ctx, "post_actions")?,
        });
    }

    if let Some(profile) = &scheme.profile {
        let ctx = ctx.push("profile");
        loaded.profile = Some(ProfileAction {
            configuration: loader.configuration(&profile.configuration, &ctx)?,
            pre_actions: loader.hooks(&profile.pre_actions, &ctx, "pre_actions")?,
            post_actions: loader.hooks(&profile.post_actions, &ctx, "post_actions")?,
            executable: loader.target(profile.executable.as_ref(), || ctx.field("executable"))?,
            arguments: profile.arguments.clone(),
        });
    }

    if let Some(analyze) = &scheme.analyze {
        let ctx = ctx.push("analyze");
        loaded.analyze = Some(AnalyzeAction {
            configuration: loader.configuration(&analyze.configuration, &ctx)?,
            pre_actions: loader.hooks(&analyze.pre_actions, &ctx, "pre_actions")?,
            post_actions: loader.hooks(&analyze.post_actions, &ctx, "post_actions")?,
        });
    }

    if let Some(archive) = &scheme.archive {
        let ctx = ctx.push("archive");
        loaded.archive = Some(ArchiveAction {
            configuration: loader.configuration(&archive.configuration, &ctx)?,
            reveal_archive_in_organizer: archive.reveal_archive_in_organizer,
            pre_actions: loader.hooks(&archive.pre_actions, &ctx, "pre_actions")?,
            post_actions: loader.hooks(&archive.post_actions, &ctx, "post_actions")?,
        });
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use loom_manifest::{AutomaticSchemesOptions, TextSettings};

    use super::*;

    #[test]
    fn test_fold_options_first_entry_wins() {
        let folded = fold_options(&[
            ProjectOption::AutomaticSchemesOptions(AutomaticSchemesOptions::Disabled),
            ProjectOption::TextSettings(TextSettings {
                uses_tabs: Some(true),
                ..Default::default()
            }),
            ProjectOption::AutomaticSchemesOptions(AutomaticSchemesOptions::default()),
            ProjectOption::TextSettings(TextSettings::default()),
            ProjectOption::DisableBundleAccessors,
        ]);

        assert_eq!(folded.automatic_schemes, AutomaticSchemesOptions::Disabled);
        assert_eq!(
            folded.text_settings.and_then(|t| t.uses_tabs),
            Some(true)
        );
        assert!(folded.disable_bundle_accessors);
        assert!(!folded.disable_synthesized_resource_accessors);
    }

    #[test]
    fn test_parse_version_reports_field() {
        let err = parse_version("thirteen", "config.generation_options.last_upgrade_check".into())
            .unwrap_err();
        match err {
            ValidationError::MalformedVersion { value, field, .. } => {
                assert_eq!(value, "thirteen");
                assert_eq!(field, "config.generation_options.last_upgrade_check");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
