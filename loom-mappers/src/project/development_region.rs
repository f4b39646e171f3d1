use loom_graph::Project;

use crate::{MapResult, ProjectMapper};

/// Fills in the configured development region for projects that don't
/// declare one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevelopmentRegionMapper {
    pub development_region: String,
}

impl DevelopmentRegionMapper {
    pub fn new(development_region: impl Into<String>) -> Self {
        Self {
            development_region: development_region.into(),
        }
    }
}

impl ProjectMapper for DevelopmentRegionMapper {
    fn name(&self) -> &'static str {
        "development_region"
    }

    fn map(&self, project: &Project) -> MapResult<Project> {
        let mut mapped = project.clone();
        mapped
            .development_region
            .get_or_insert_with(|| self.development_region.clone());
        Ok((mapped, Vec::new()))
    }
}
