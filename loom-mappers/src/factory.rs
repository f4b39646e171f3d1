//! Assembles the mapper lists for each generation scenario.
//!
//! Factories only select and parameterize mappers; nothing runs until the
//! returned list is composed and applied.

use std::{collections::BTreeSet, path::PathBuf};

use loom_graph::{CodeCoverageMode, Config};
use tracing::info;

use crate::{
    ProjectMapper, ProjectWorkspaceMapper, SequentialProjectMapper, SequentialWorkspaceMapper,
    WorkspaceMapper,
    project::{
        BundleAccessorMapper, DevelopmentRegionMapper, IdentifierNormalizationMapper,
        ProjectNameAndOrganizationMapper, TemplateMacrosMapper,
    },
    workspace::{
        AutogeneratedWorkspaceSchemeMapper, AutomationPathMapper, GenerateCacheableSchemesMapper,
        LastUpgradeVersionMapper, ModuleMapMapper, WorkspaceIdentifierMapper,
    },
};

/// What a generation run is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scenario {
    /// Regular project generation.
    Default,
    /// Generation driven by CI, with derived state under `workspace_directory`.
    Automation { workspace_directory: PathBuf },
    /// A minimal graph building only `included_targets`.
    Cache { included_targets: BTreeSet<String> },
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Automation { .. } => "automation",
            Self::Cache { .. } => "cache",
        }
    }
}

/// Builds the project-scoped mapper list.
pub struct ProjectMapperFactory;

impl ProjectMapperFactory {
    /// Project mappers for regular generation, in application order:
    ///
    /// 1. [`ProjectNameAndOrganizationMapper`]
    /// 2. [`DevelopmentRegionMapper`], when the config sets a region
    /// 3. [`IdentifierNormalizationMapper`]
    /// 4. [`TemplateMacrosMapper`]
    /// 5. [`BundleAccessorMapper`], unless bundle accessors are disabled
    pub fn default(config: &Config) -> Vec<Box<dyn ProjectMapper>> {
        let mut mappers: Vec<Box<dyn ProjectMapper>> =
            vec![Box::new(ProjectNameAndOrganizationMapper::new(
                config.project_name_template().map(str::to_string),
                config.organization_name().map(str::to_string),
            ))];
        if let Some(region) = config.development_region() {
            mappers.push(Box::new(DevelopmentRegionMapper::new(region)));
        }
        mappers.push(Box::new(IdentifierNormalizationMapper));
        mappers.push(Box::new(TemplateMacrosMapper));
        if !config.bundle_accessors_disabled() {
            mappers.push(Box::new(BundleAccessorMapper));
        }
        mappers
    }
}

/// Builds the workspace-scoped mapper list around a project mapper.
pub struct WorkspaceMapperFactory {
    project_mapper: Box<dyn ProjectMapper>,
}

impl WorkspaceMapperFactory {
    pub fn new(project_mapper: Box<dyn ProjectMapper>) -> Self {
        Self { project_mapper }
    }

    /// Factory fanning out the default project mappers for `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(SequentialProjectMapper::new(
            ProjectMapperFactory::default(config),
        )))
    }

    /// Workspace mappers for regular generation, in application order:
    ///
    /// 1. [`ProjectWorkspaceMapper`] running the project mapper
    /// 2. [`WorkspaceIdentifierMapper`]
    /// 3. [`AutogeneratedWorkspaceSchemeMapper`], unless disabled
    /// 4. [`ModuleMapMapper`]
    /// 5. [`LastUpgradeVersionMapper`], when the config sets a version
    pub fn default(self, config: &Config) -> Vec<Box<dyn WorkspaceMapper>> {
        self.build(config, config.autogenerated_schemes_disabled())
    }

    /// The default mappers with autogenerated schemes forced on, followed by
    /// an [`AutomationPathMapper`] for `workspace_directory`.
    pub fn automation(
        self,
        config: &Config,
        workspace_directory: PathBuf,
    ) -> Vec<Box<dyn WorkspaceMapper>> {
        let mut mappers = self.build(config, false);
        mappers.push(Box::new(AutomationPathMapper::new(workspace_directory)));
        mappers
    }

    /// The default mappers followed by a [`GenerateCacheableSchemesMapper`]
    /// for `included_targets`.
    pub fn cache(
        self,
        config: &Config,
        included_targets: BTreeSet<String>,
    ) -> Vec<Box<dyn WorkspaceMapper>> {
        let mut mappers = self.default(config);
        mappers.push(Box::new(GenerateCacheableSchemesMapper::new(included_targets)));
        mappers
    }

    /// Mappers for `scenario`.
    pub fn scenario(self, config: &Config, scenario: &Scenario) -> Vec<Box<dyn WorkspaceMapper>> {
        info!(scenario = scenario.name(), "assembling mapper pipeline");
        match scenario {
            Scenario::Default => self.default(config),
            Scenario::Automation {
                workspace_directory,
            } => self.automation(config, workspace_directory.clone()),
            Scenario::Cache { included_targets } => self.cache(config, included_targets.clone()),
        }
    }

    /// The scenario's mappers composed into one sequential mapper.
    pub fn pipeline(self, config: &Config, scenario: &Scenario) -> SequentialWorkspaceMapper {
        SequentialWorkspaceMapper::new(self.scenario(config, scenario))
    }

    fn build(self, config: &Config, skip_autogenerated_schemes: bool) -> Vec<Box<dyn WorkspaceMapper>> {
        let mut mappers: Vec<Box<dyn WorkspaceMapper>> = vec![
            Box::new(ProjectWorkspaceMapper::new(self.project_mapper)),
            Box::new(WorkspaceIdentifierMapper),
        ];
        if !skip_autogenerated_schemes {
            mappers.push(Box::new(AutogeneratedWorkspaceSchemeMapper::new(
                config.code_coverage_mode().is_some(),
                config
                    .code_coverage_mode()
                    .cloned()
                    .unwrap_or(CodeCoverageMode::All),
                config.testing_options().unwrap_or_default(),
            )));
        }
        mappers.push(Box::new(ModuleMapMapper));
        if let Some(version) = config.last_upgrade_check() {
            mappers.push(Box::new(LastUpgradeVersionMapper::new(version)));
        }
        mappers
    }
}

#[cfg(test)]
mod tests {
    use loom_core::Version;
    use loom_graph::GenerationOption;

    use super::*;

    fn names(mappers: &[Box<dyn WorkspaceMapper>]) -> Vec<&'static str> {
        mappers.iter().map(|m| m.name()).collect()
    }

    #[test]
    fn test_default_project_mappers() {
        let config = Config::new(vec![
            GenerationOption::DevelopmentRegion("fr".into()),
            GenerationOption::DisableBundleAccessors,
        ]);
        let mappers = ProjectMapperFactory::default(&config);
        let names: Vec<_> = mappers.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "project_name_and_organization",
                "development_region",
                "identifier_normalization",
                "template_macros",
            ]
        );
        let region = mappers[1].downcast_ref::<DevelopmentRegionMapper>().unwrap();
        assert_eq!(region.development_region, "fr");
    }

    #[test]
    fn test_default_workspace_mappers() {
        let config = Config::new(vec![GenerationOption::LastUpgradeCheck(Version::new(13, 1, 0))]);
        let mappers = WorkspaceMapperFactory::from_config(&config).default(&config);
        assert_eq!(
            names(&mappers),
            vec![
                "project_workspace",
                "workspace_identifier",
                "autogenerated_workspace_schemes",
                "module_map",
                "last_upgrade_version",
            ]
        );
        let last_upgrade = mappers[4].downcast_ref::<LastUpgradeVersionMapper>().unwrap();
        assert_eq!(last_upgrade.last_upgrade_version, Version::new(13, 1, 0));
    }

    #[test]
    fn test_scenario_dispatch() {
        let config = Config::default();
        let scenario = Scenario::Automation {
            workspace_directory: "/tmp/ci".into(),
        };
        let mappers = WorkspaceMapperFactory::from_config(&config).scenario(&config, &scenario);
        assert_eq!(names(&mappers).last(), Some(&"automation_path"));
        assert_eq!(scenario.name(), "automation");
    }
}
