//! Scheme actions and their execution hooks.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{TargetReference, TestingOptions};

/// Name of a build configuration (`Debug`, `Release`, or a custom one).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationName(pub String);

impl ConfigurationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn debug() -> Self {
        Self::new("Debug")
    }

    pub fn release() -> Self {
        Self::new("Release")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConfigurationName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A shell script run before or after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionAction {
    /// Title shown in the IDE.
    pub title: String,
    /// Script body.
    pub script: String,
    /// Target whose build settings are exported to the script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetReference>,
    /// Shell used to run the script, defaults to `/bin/sh`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl ExecutionAction {
    pub fn new(title: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            script: script.into(),
            target: None,
            shell: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<TargetReference>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// A launch argument toggled on or off in the IDE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchArgument {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Environment and launch arguments passed to an executable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub environment: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub launch_arguments: Vec<LaunchArgument>,
}

fn default_true() -> bool {
    true
}

/// Build action: which targets build, with hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAction {
    #[serde(default)]
    pub targets: Vec<TargetReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_actions: Vec<ExecutionAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_actions: Vec<ExecutionAction>,
}

/// Test action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAction {
    #[serde(default)]
    pub targets: Vec<TargetReference>,
    #[serde(default = "ConfigurationName::debug")]
    pub configuration: ConfigurationName,
    /// Gather code coverage.
    #[serde(default)]
    pub coverage: bool,
    /// Restrict coverage to these targets (empty means all).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_coverage_targets: Vec<TargetReference>,
    #[serde(default)]
    pub testing_options: TestingOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_actions: Vec<ExecutionAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_actions: Vec<ExecutionAction>,
}

/// Run action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAction {
    #[serde(default = "ConfigurationName::debug")]
    pub configuration: ConfigurationName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<TargetReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_actions: Vec<ExecutionAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_actions: Vec<ExecutionAction>,
}

/// Profile action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAction {
    /// Configuration used for profiling.
    #[serde(default = "ConfigurationName::release")]
    pub configuration: ConfigurationName,
    /// Actions run before profiling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_actions: Vec<ExecutionAction>,
    /// Actions run after profiling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_actions: Vec<ExecutionAction>,
    /// The executable to profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<TargetReference>,
    /// Arguments passed when launching the executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
}

impl ProfileAction {
    /// Build a profile action.
    pub fn profile_action(
        configuration: ConfigurationName,
        pre_actions: Vec<ExecutionAction>,
        post_actions: Vec<ExecutionAction>,
        executable: Option<TargetReference>,
        arguments: Option<Arguments>,
    ) -> Self {
        Self {
            configuration,
            pre_actions,
            post_actions,
            executable,
            arguments,
        }
    }

    /// Older argument order, kept so existing manifests keep building.
    #[deprecated(note = "use `ProfileAction::profile_action`")]
    pub fn new(
        configuration: ConfigurationName,
        executable: Option<TargetReference>,
        arguments: Option<Arguments>,
        pre_actions: Vec<ExecutionAction>,
        post_actions: Vec<ExecutionAction>,
    ) -> Self {
        Self::profile_action(configuration, pre_actions, post_actions, executable, arguments)
    }
}

impl Default for ProfileAction {
    fn default() -> Self {
        Self::profile_action(ConfigurationName::release(), vec![], vec![], None, None)
    }
}

/// Analyze action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeAction {
    /// Configuration used for analyzing.
    pub configuration: ConfigurationName,
    /// Actions run before analyzing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_actions: Vec<ExecutionAction>,
    /// Actions run after analyzing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_actions: Vec<ExecutionAction>,
}

impl AnalyzeAction {
    /// Build an analyze action.
    pub fn analyze_action(
        configuration: ConfigurationName,
        pre_actions: Vec<ExecutionAction>,
        post_actions: Vec<ExecutionAction>,
    ) -> Self {
        Self {
            configuration,
            pre_actions,
            post_actions,
        }
    }

    /// Older argument order, kept so existing manifests keep building.
    #[deprecated(note = "use `AnalyzeAction::analyze_action`")]
    pub fn new(
        pre_actions: Vec<ExecutionAction>,
        configuration: ConfigurationName,
        post_actions: Vec<ExecutionAction>,
    ) -> Self {
        Self::analyze_action(configuration, pre_actions, post_actions)
    }
}

/// Archive action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveAction {
    #[serde(default = "ConfigurationName::release")]
    pub configuration: ConfigurationName,
    #[serde(default = "default_true")]
    pub reveal_archive_in_organizer: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_actions: Vec<ExecutionAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_actions: Vec<ExecutionAction>,
}
