use std::collections::BTreeSet;

use loom_graph::{BuildAction, Graph, Scheme, TargetReference};
use thiserror::Error;

use crate::{MapResult, MapperError, WorkspaceMapper};

#[derive(Debug, Error)]
#[error("targets not found in the workspace: {}", .0.join(", "))]
struct UnknownTargets(Vec<String>);

/// Narrows the workspace schemes to the targets being cached and adds a
/// `<Workspace>-Cache` scheme that builds exactly those targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCacheableSchemesMapper {
    pub included_targets: BTreeSet<String>,
}

impl GenerateCacheableSchemesMapper {
    pub fn new(included_targets: BTreeSet<String>) -> Self {
        Self { included_targets }
    }

    pub fn scheme_name(graph: &Graph) -> String {
        format!("{}-Cache", graph.workspace.name)
    }

    fn includes(&self, reference: &TargetReference) -> bool {
        self.included_targets.contains(&reference.name)
    }
}

impl WorkspaceMapper for GenerateCacheableSchemesMapper {
    fn name(&self) -> &'static str {
        "generate_cacheable_schemes"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        let cached: Vec<TargetReference> = graph
            .targets()
            .map(|(reference, _)| reference)
            .filter(|reference| self.includes(reference))
            .collect();

        let unknown: Vec<String> = self
            .included_targets
            .iter()
            .filter(|name| !cached.iter().any(|r| &r.name == *name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(MapperError::new(self.name(), UnknownTargets(unknown)));
        }

        let mut mapped = graph.clone();
        for scheme in &mut mapped.workspace.schemes {
            if let Some(build) = &mut scheme.build {
                build.targets.retain(|r| self.includes(r));
            }
            if let Some(test) = &mut scheme.test {
                test.targets.retain(|r| self.includes(r));
                test.code_coverage_targets.retain(|r| self.includes(r));
            }
        }

        let name = Self::scheme_name(graph);
        if mapped.workspace.scheme(&name).is_none() {
            let mut scheme = Scheme::new(name);
            scheme.shared = false;
            scheme.build = Some(BuildAction {
                targets: cached,
                ..BuildAction::default()
            });
            mapped.workspace.schemes.push(scheme);
        }
        Ok((mapped, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use loom_graph::{Product, Project, Target, TestAction, Workspace};

    use super::*;

    fn graph() -> Graph {
        let mut project = Project::new("App", "/ws/App");
        for name in ["App", "Core", "Utils"] {
            project
                .targets
                .push(Target::new(name, Product::Framework, format!("com.acme.{name}")));
        }
        let mut scheme = Scheme::new("Acme-Workspace");
        scheme.build = Some(BuildAction {
            targets: ["App", "Core", "Utils"]
                .into_iter()
                .map(|n| TargetReference::new("/ws/App", n))
                .collect(),
            ..BuildAction::default()
        });
        scheme.test = Some(TestAction::new(vec![]));
        let mut workspace = Workspace::new("Acme", "/ws");
        workspace.schemes.push(scheme);
        Graph::new(workspace, vec![project])
    }

    fn included(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_narrows_schemes_to_included_targets() {
        let mapper = GenerateCacheableSchemesMapper::new(included(&["Utils", "Core"]));
        let (mapped, _) = mapper.map(&graph()).unwrap();

        let expected = vec![
            TargetReference::new("/ws/App", "Core"),
            TargetReference::new("/ws/App", "Utils"),
        ];
        assert_eq!(mapped.workspace.schemes[0].build_targets(), expected.as_slice());
        let cache = mapped.workspace.scheme("Acme-Cache").unwrap();
        assert!(!cache.shared);
        assert_eq!(cache.build_targets(), expected.as_slice());

        let (again, _) = mapper.map(&mapped).unwrap();
        assert_eq!(again, mapped);
    }

    #[test]
    fn test_unknown_target_fails() {
        let mapper = GenerateCacheableSchemesMapper::new(included(&["Core", "Ghost"]));
        let err = mapper.map(&graph()).unwrap_err();
        assert_eq!(err.mapper, "generate_cacheable_schemes");
        assert_eq!(err.source.to_string(), "targets not found in the workspace: Ghost");
    }
}
