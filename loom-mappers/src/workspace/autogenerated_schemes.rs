use loom_graph::{
    AutomaticSchemesOptions, BuildAction, CodeCoverageMode, ConfigurationName, Graph, Project,
    RunAction, Scheme, TargetReference, TestAction, TestingOptions,
};

use crate::{MapResult, WorkspaceMapper};

/// Adds the schemes a workspace gets without declaring them.
///
/// Every project with automatic schemes enabled gets one scheme per
/// buildable target that has no scheme of the same name, testing the test
/// targets that depend on it. The workspace gets a `<Workspace>-Workspace`
/// scheme building every non-test target and testing every test target.
/// Coverage is gathered only when `code_coverage_enabled`, scoped by
/// `code_coverage_mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutogeneratedWorkspaceSchemeMapper {
    pub code_coverage_enabled: bool,
    pub code_coverage_mode: CodeCoverageMode,
    pub testing_options: TestingOptions,
}

impl AutogeneratedWorkspaceSchemeMapper {
    pub fn new(
        code_coverage_enabled: bool,
        code_coverage_mode: CodeCoverageMode,
        testing_options: TestingOptions,
    ) -> Self {
        Self {
            code_coverage_enabled,
            code_coverage_mode,
            testing_options,
        }
    }

    pub fn scheme_name(graph: &Graph) -> String {
        format!("{}-Workspace", graph.workspace.name)
    }

    fn workspace_scheme(&self, graph: &Graph) -> Option<Scheme> {
        let (tests, builds): (Vec<_>, Vec<_>) =
            graph.targets().partition(|(_, target)| target.product.is_tests());
        if tests.is_empty() && builds.is_empty() {
            return None;
        }

        let code_coverage_targets = match &self.code_coverage_mode {
            _ if !self.code_coverage_enabled => Vec::new(),
            CodeCoverageMode::All => Vec::new(),
            CodeCoverageMode::Relevant => {
                let mut relevant: Vec<TargetReference> = Vec::new();
                for reference in graph.schemes().flat_map(Scheme::coverage_targets) {
                    if !relevant.contains(&reference) {
                        relevant.push(reference);
                    }
                }
                relevant
            }
            CodeCoverageMode::Targets(targets) => targets.clone(),
        };

        let mut scheme = Scheme::new(Self::scheme_name(graph));
        scheme.build = Some(BuildAction {
            targets: builds.into_iter().map(|(reference, _)| reference).collect(),
            ..BuildAction::default()
        });
        let mut test = TestAction::new(tests.into_iter().map(|(reference, _)| reference).collect());
        test.coverage = self.code_coverage_enabled;
        test.code_coverage_targets = code_coverage_targets;
        test.testing_options = self.testing_options;
        scheme.test = Some(test);
        Some(scheme)
    }
}

fn target_schemes(project: &Project) -> Vec<Scheme> {
    let AutomaticSchemesOptions::Enabled {
        code_coverage_enabled,
        testing_options,
    } = &project.options.automatic_schemes
    else {
        return Vec::new();
    };

    project
        .targets
        .iter()
        .filter(|target| !target.product.is_tests() && project.scheme(&target.name).is_none())
        .map(|target| {
            let reference = project.reference(&target.name);
            let mut scheme = Scheme::new(target.name.clone());
            scheme.build = Some(BuildAction {
                targets: vec![reference.clone()],
                ..BuildAction::default()
            });

            let tests: Vec<_> = project
                .targets
                .iter()
                .filter(|t| t.product.is_tests() && t.depends_on(&reference))
                .map(|t| project.reference(&t.name))
                .collect();
            if !tests.is_empty() {
                let mut test = TestAction::new(tests);
                test.coverage = *code_coverage_enabled;
                if *code_coverage_enabled {
                    test.code_coverage_targets = vec![reference.clone()];
                }
                test.testing_options = *testing_options;
                scheme.test = Some(test);
            }

            if target.product.is_runnable() {
                scheme.run = Some(RunAction {
                    configuration: ConfigurationName::debug(),
                    executable: Some(reference),
                    arguments: None,
                    pre_actions: Vec::new(),
                    post_actions: Vec::new(),
                });
            }
            scheme
        })
        .collect()
}

impl WorkspaceMapper for AutogeneratedWorkspaceSchemeMapper {
    fn name(&self) -> &'static str {
        "autogenerated_workspace_schemes"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        let mut mapped = graph.clone();
        for project in &mut mapped.projects {
            let mut schemes = target_schemes(project);
            project.schemes.append(&mut schemes);
        }

        if mapped.workspace.scheme(&Self::scheme_name(graph)).is_none() {
            if let Some(scheme) = self.workspace_scheme(&mapped) {
                mapped.workspace.schemes.push(scheme);
            }
        }
        Ok((mapped, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use loom_graph::{Product, Target, TestingOption, Workspace};

    use super::*;

    fn graph() -> Graph {
        let mut app = Project::new("App", "/ws/App");
        app.targets.push(Target::new("App", Product::App, "com.acme.app"));
        let mut tests = Target::new("AppTests", Product::UnitTests, "com.acme.app.tests");
        tests.dependencies.push(TargetReference::new("/ws/App", "App"));
        app.targets.push(tests);

        let mut core = Project::new("Core", "/ws/Core");
        core.targets.push(Target::new("Core", Product::Framework, "com.acme.core"));
        core.options.automatic_schemes = AutomaticSchemesOptions::Disabled;
        let mut core_scheme = Scheme::new("CoreCoverage");
        core_scheme.build = Some(BuildAction {
            targets: vec![TargetReference::new("/ws/Core", "Core")],
            ..BuildAction::default()
        });
        let mut test = TestAction::new(vec![]);
        test.coverage = true;
        core_scheme.test = Some(test);
        core.schemes.push(core_scheme);

        Graph::new(Workspace::new("Acme", "/ws"), vec![app, core])
    }

    #[test]
    fn test_workspace_scheme_covers_all_targets() {
        let mapper = AutogeneratedWorkspaceSchemeMapper::new(
            true,
            CodeCoverageMode::All,
            TestingOptions::from([TestingOption::Parallelizable]),
        );
        let (mapped, effects) = mapper.map(&graph()).unwrap();
        assert!(effects.is_empty());

        let scheme = mapped.workspace.scheme("Acme-Workspace").unwrap();
        assert_eq!(
            scheme.build_targets(),
            &[
                TargetReference::new("/ws/App", "App"),
                TargetReference::new("/ws/Core", "Core"),
            ]
        );
        let test = scheme.test.as_ref().unwrap();
        assert_eq!(test.targets, vec![TargetReference::new("/ws/App", "AppTests")]);
        assert!(test.coverage);
        assert!(test.code_coverage_targets.is_empty());
        assert_eq!(test.testing_options, TestingOptions::from([TestingOption::Parallelizable]));
    }

    #[test]
    fn test_relevant_coverage_collects_declared_coverage() {
        let mapper = AutogeneratedWorkspaceSchemeMapper::new(
            true,
            CodeCoverageMode::Relevant,
            TestingOptions::empty(),
        );
        let (mapped, _) = mapper.map(&graph()).unwrap();
        let test = mapped.workspace.schemes[0].test.as_ref().unwrap();
        assert_eq!(
            test.code_coverage_targets,
            vec![TargetReference::new("/ws/Core", "Core")]
        );
    }

    #[test]
    fn test_workspace_scheme_without_coverage() {
        let mapper = AutogeneratedWorkspaceSchemeMapper::new(
            false,
            CodeCoverageMode::Relevant,
            TestingOptions::empty(),
        );
        let (mapped, _) = mapper.map(&graph()).unwrap();
        let test = mapped.workspace.scheme("Acme-Workspace").unwrap().test.as_ref().unwrap();
        assert!(!test.coverage);
        assert!(test.code_coverage_targets.is_empty());
    }

    #[test]
    fn test_target_schemes_only_for_enabled_projects() {
        let mapper = AutogeneratedWorkspaceSchemeMapper::new(
            false,
            CodeCoverageMode::All,
            TestingOptions::empty(),
        );
        let (mapped, _) = mapper.map(&graph()).unwrap();

        let app = &mapped.projects[0];
        let names: Vec<_> = app.schemes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["App"]);
        let scheme = &app.schemes[0];
        assert_eq!(
            scheme.test.as_ref().unwrap().targets,
            vec![TargetReference::new("/ws/App", "AppTests")]
        );
        assert_eq!(
            scheme.run.as_ref().unwrap().executable,
            Some(TargetReference::new("/ws/App", "App"))
        );

        let core = &mapped.projects[1];
        assert_eq!(core.schemes.len(), 1);
    }

    #[test]
    fn test_reapplying_adds_nothing() {
        let mapper = AutogeneratedWorkspaceSchemeMapper::new(
            false,
            CodeCoverageMode::All,
            TestingOptions::empty(),
        );
        let (once, _) = mapper.map(&graph()).unwrap();
        let (twice, _) = mapper.map(&once).unwrap();
        assert_eq!(twice, once);
    }
}
