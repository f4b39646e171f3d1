use loom_graph::Project;
use thiserror::Error;

use crate::{MapResult, MapperError, ProjectMapper};

const PROJECT_NAME: &str = "{project_name}";

#[derive(Debug, Error)]
enum TemplateError {
    #[error("project name template `{template}` has an unknown placeholder")]
    UnknownPlaceholder { template: String },
    #[error("project name template `{template}` expands to an empty name for `{project}`")]
    Empty { template: String, project: String },
}

/// Applies the `project_name` template and the workspace-wide organization
/// name.
///
/// A project's own organization name takes precedence over the configured
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectNameAndOrganizationMapper {
    pub project_name_template: Option<String>,
    pub organization_name: Option<String>,
}

impl ProjectNameAndOrganizationMapper {
    pub fn new(project_name_template: Option<String>, organization_name: Option<String>) -> Self {
        Self {
            project_name_template,
            organization_name,
        }
    }

    fn expand(template: &str, project: &str) -> Result<String, TemplateError> {
        if template.replace(PROJECT_NAME, "").contains(['{', '}']) {
            return Err(TemplateError::UnknownPlaceholder {
                template: template.to_string(),
            });
        }
        let expanded = template.replace(PROJECT_NAME, project);
        if expanded.trim().is_empty() {
            return Err(TemplateError::Empty {
                template: template.to_string(),
                project: project.to_string(),
            });
        }
        Ok(expanded)
    }
}

impl ProjectMapper for ProjectNameAndOrganizationMapper {
    fn name(&self) -> &'static str {
        "project_name_and_organization"
    }

    fn map(&self, project: &Project) -> MapResult<Project> {
        let mut mapped = project.clone();

        if let Some(template) = &self.project_name_template {
            mapped.file_name = Self::expand(template, &project.name)
                .map_err(|e| MapperError::new(self.name(), e))?;
        }
        if mapped.organization_name.is_none() {
            mapped.organization_name = self.organization_name.clone();
        }

        Ok((mapped, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_expands_declared_name() {
        let mapper = ProjectNameAndOrganizationMapper::new(Some("{project_name}-iOS".into()), None);
        let (mapped, effects) = mapper.map(&Project::new("App", "/ws/App")).unwrap();
        assert_eq!(mapped.name, "App");
        assert_eq!(mapped.file_name, "App-iOS");
        assert!(effects.is_empty());
    }

    #[test]
    fn test_template_is_stable_when_reapplied() {
        let mapper = ProjectNameAndOrganizationMapper::new(Some("{project_name}-iOS".into()), None);
        let (once, _) = mapper.map(&Project::new("App", "/ws/App")).unwrap();
        let (twice, _) = mapper.map(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let mapper = ProjectNameAndOrganizationMapper::new(Some("{platform}".into()), None);
        let err = mapper.map(&Project::new("App", "/ws/App")).unwrap_err();
        assert_eq!(err.mapper, "project_name_and_organization");
    }

    #[test]
    fn test_braces_in_project_name_are_kept() {
        let mapper = ProjectNameAndOrganizationMapper::new(Some("{project_name}-iOS".into()), None);
        let (mapped, _) = mapper.map(&Project::new("App{Beta}", "/ws/App")).unwrap();
        assert_eq!(mapped.file_name, "App{Beta}-iOS");
    }

    #[test]
    fn test_project_organization_wins() {
        let mapper = ProjectNameAndOrganizationMapper::new(None, Some("Acme".into()));

        let (mapped, _) = mapper.map(&Project::new("App", "/ws/App")).unwrap();
        assert_eq!(mapped.organization_name.as_deref(), Some("Acme"));

        let mut own = Project::new("Core", "/ws/Core");
        own.organization_name = Some("Core Team".into());
        let (mapped, _) = mapper.map(&own).unwrap();
        assert_eq!(mapped.organization_name.as_deref(), Some("Core Team"));
    }
}
