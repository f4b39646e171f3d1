use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// A manifest that decoded fine but does not describe a valid graph.
///
/// `field` is the dotted manifest path of the offending value, e.g.
/// `projects.App.schemes.App.profile.executable`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("target `{name}` referenced at `{field}` does not exist in the workspace")]
    #[diagnostic(
        code(loom::unresolved_reference),
        help("check the target name and, for other projects, the relative project path")
    )]
    UnresolvedReference { name: String, field: String },

    #[error("configuration name at `{field}` is empty")]
    #[diagnostic(code(loom::invalid_configuration_name))]
    InvalidConfigurationName { field: String },

    #[error("invalid version `{value}` at `{field}`: {reason}")]
    #[diagnostic(code(loom::malformed_version), help("versions are written as \"X.Y\" or \"X.Y.Z\""))]
    MalformedVersion {
        value: String,
        field: String,
        reason: String,
    },

    #[error("target `{name}` is declared more than once in project `{project}`")]
    #[diagnostic(code(loom::duplicate_target))]
    DuplicateTarget { project: String, name: String },

    #[error("target dependencies form a cycle: {}", .path.join(" -> "))]
    #[diagnostic(code(loom::dependency_cycle))]
    DependencyCycle {
        /// `Project/Target` entries, first entry repeated at the end.
        path: Vec<String>,
    },
}
