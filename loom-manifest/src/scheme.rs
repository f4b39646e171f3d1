use serde::{Deserialize, Serialize};

use crate::{AnalyzeAction, ArchiveAction, BuildAction, ProfileAction, RunAction, TestAction};

/// A scheme: a named collection of actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    /// Shared schemes are committed alongside the project.
    #[serde(default = "default_shared")]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<RunAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyze: Option<AnalyzeAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveAction>,
}

fn default_shared() -> bool {
    true
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
}
