use serde::{Deserialize, Serialize, Serializer};

/// A reference to a target, optionally in another project.
///
/// Written either as a bare target name (`"Core"`) for a target in the same
/// project, or as a table (`{ project = "../Core", target = "Core" }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "TargetReferenceFormat")]
pub struct TargetReference {
    /// Project directory relative to the referencing project, `None` for
    /// the enclosing project.
    pub project: Option<String>,
    /// Name of the target.
    pub target: String,
}

impl TargetReference {
    /// A target in the enclosing project.
    pub fn local(target: impl Into<String>) -> Self {
        Self {
            project: None,
            target: target.into(),
        }
    }

    /// A target in the project at `project`.
    pub fn project(project: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            target: target.into(),
        }
    }
}

impl From<&str> for TargetReference {
    fn from(target: &str) -> Self {
        Self::local(target)
    }
}

/// Untagged enum to support both string and table formats
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TargetReferenceFormat {
    Name(String),
    Table {
        #[serde(default)]
        project: Option<String>,
        target: String,
    },
}

impl From<TargetReferenceFormat> for TargetReference {
    fn from(format: TargetReferenceFormat) -> Self {
        match format {
            TargetReferenceFormat::Name(target) => Self::local(target),
            TargetReferenceFormat::Table { project, target } => Self { project, target },
        }
    }
}

impl Serialize for TargetReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Table<'a> {
            project: &'a str,
            target: &'a str,
        }

        match &self.project {
            None => serializer.serialize_str(&self.target),
            Some(project) => Table {
                project,
                target: &self.target,
            }
            .serialize(serializer),
        }
    }
}
