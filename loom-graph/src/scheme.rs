//! Schemes and actions, with target references resolved.

use serde::Serialize;

use crate::{Arguments, ConfigurationName, TargetReference, TestingOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionAction {
    pub title: String,
    pub script: String,
    pub target: Option<TargetReference>,
    pub shell: String,
    /// Echo the environment before running the script.
    pub show_env_vars: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildAction {
    pub targets: Vec<TargetReference>,
    pub pre_actions: Vec<ExecutionAction>,
    pub post_actions: Vec<ExecutionAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestAction {
    pub targets: Vec<TargetReference>,
    pub configuration: ConfigurationName,
    pub coverage: bool,
    pub code_coverage_targets: Vec<TargetReference>,
    pub testing_options: TestingOptions,
    pub arguments: Option<Arguments>,
    pub pre_actions: Vec<ExecutionAction>,
    pub post_actions: Vec<ExecutionAction>,
}

impl TestAction {
    pub fn new(targets: Vec<TargetReference>) -> Self {
        Self {
            targets,
            configuration: ConfigurationName::debug(),
            coverage: false,
            code_coverage_targets: Vec::new(),
            testing_options: TestingOptions::empty(),
            arguments: None,
            pre_actions: Vec::new(),
            post_actions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunAction {
    pub configuration: ConfigurationName,
    pub executable: Option<TargetReference>,
    pub arguments: Option<Arguments>,
    pub pre_actions: Vec<ExecutionAction>,
    pub post_actions: Vec<ExecutionAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileAction {
    pub configuration: ConfigurationName,
    pub pre_actions: Vec<ExecutionAction>,
    pub post_actions: Vec<ExecutionAction>,
    pub executable: Option<TargetReference>,
    pub arguments: Option<Arguments>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeAction {
    pub configuration: ConfigurationName,
    pub pre_actions: Vec<ExecutionAction>,
    pub post_actions: Vec<ExecutionAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveAction {
    pub configuration: ConfigurationName,
    pub reveal_archive_in_organizer: bool,
    pub pre_actions: Vec<ExecutionAction>,
    pub post_actions: Vec<ExecutionAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scheme {
    pub name: String,
    pub shared: bool,
    pub build: Option<BuildAction>,
    pub test: Option<TestAction>,
    pub run: Option<RunAction>,
    pub profile: Option<ProfileAction>,
    pub analyze: Option<AnalyzeAction>,
    pub archive: Option<ArchiveAction>,
}

impl Scheme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shared: true,
            build: None,
            test: None,
            run: None,
            profile: None,
            analyze: None,
            archive: None,
        }
    }

    /// Targets this scheme builds.
    pub fn build_targets(&self) -> &[TargetReference] {
        self.build.as_ref().map_or(&[], |b| b.targets.as_slice())
    }

    /// Targets whose coverage this scheme gathers, when it gathers any.
    pub fn coverage_targets(&self) -> Vec<TargetReference> {
        match &self.test {
            Some(test) if test.coverage && test.code_coverage_targets.is_empty() => {
                self.build_targets().to_vec()
            }
            Some(test) if test.coverage => test.code_coverage_targets.clone(),
            _ => Vec::new(),
        }
    }
}
