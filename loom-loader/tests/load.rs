use std::path::PathBuf;

use loom_core::GeneratorPaths;
use loom_graph::{CodeCoverageMode, ConfigurationName, Product, TargetReference};
use loom_loader::{ValidationError, load, load_graph};
use loom_manifest::Manifest;

fn paths() -> GeneratorPaths {
    GeneratorPaths::new("/work/acme")
}

fn manifest(src: &str) -> Manifest {
    src.parse().unwrap()
}

const WORKSPACE: &str = r#"
[config]
generation_options = [
    { enable_code_coverage = { targets = ["Core", { project = "App", target = "App" }] } },
    { last_upgrade_check = "13.1" },
]

[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.targets]]
name = "App"
product = "app"
bundle_id = "com.acme.app"
sources = ["Sources/**"]
resources = ["Resources/**"]
dependencies = [{ project = "../Core", target = "Core" }]

[[projects.targets]]
name = "AppTests"
product = "unit_tests"
bundle_id = "com.acme.app.tests"
dependencies = ["App"]

[[projects.schemes]]
name = "App"
build = { targets = ["App"], pre_actions = [{ title = "Lint", script = "swiftlint", target = "App" }] }
test = { targets = ["AppTests"], coverage = true }
profile = { executable = "App" }

[[projects]]
name = "Core"
path = "Core"

[[projects.targets]]
name = "Core"
product = "framework"
bundle_id = "com.acme.core"
public_headers = "include"
"#;

#[test]
fn test_load_workspace() {
    let loaded = load(&manifest(WORKSPACE), &paths()).unwrap();
    let graph = loaded.graph;

    assert_eq!(graph.workspace.name, "Acme");
    assert_eq!(graph.workspace.path, PathBuf::from("/work/acme"));
    assert_eq!(
        graph.workspace.projects,
        vec![PathBuf::from("/work/acme/App"), PathBuf::from("/work/acme/Core")]
    );

    let app = &graph.projects[0];
    assert_eq!(app.file_name, "App");
    let target = app.target("App").unwrap();
    assert_eq!(target.product, Product::App);
    assert_eq!(target.sources, vec![PathBuf::from("/work/acme/App/Sources/**")]);
    assert_eq!(
        target.dependencies,
        vec![TargetReference::new("/work/acme/Core", "Core")]
    );

    let scheme = app.scheme("App").unwrap();
    let build = scheme.build.as_ref().unwrap();
    assert_eq!(build.pre_actions[0].shell, "/bin/sh");
    assert!(build.pre_actions[0].show_env_vars);
    assert_eq!(
        build.pre_actions[0].target,
        Some(TargetReference::new("/work/acme/App", "App"))
    );
    let profile = scheme.profile.as_ref().unwrap();
    assert_eq!(profile.configuration, ConfigurationName::release());
    assert_eq!(
        profile.executable,
        Some(TargetReference::new("/work/acme/App", "App"))
    );

    let core = graph.projects[1].target("Core").unwrap();
    assert_eq!(core.public_headers, Some(PathBuf::from("/work/acme/Core/include")));
}

#[test]
fn test_load_config_resolves_coverage_targets() {
    let loaded = load(&manifest(WORKSPACE), &paths()).unwrap();
    assert_eq!(
        loaded.config.code_coverage_mode(),
        Some(&CodeCoverageMode::Targets(vec![
            TargetReference::new("/work/acme/Core", "Core"),
            TargetReference::new("/work/acme/App", "App"),
        ]))
    );
    assert_eq!(
        loaded.config.last_upgrade_check(),
        Some(loom_core::Version::new(13, 1, 0))
    );
}

#[test]
fn test_profile_executable_must_exist() {
    let src = r#"
[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.targets]]
name = "App"
product = "app"
bundle_id = "com.acme.app"

[[projects.schemes]]
name = "App"
profile = { executable = "Missing" }
"#;
    let err = load_graph(&manifest(src), &paths()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnresolvedReference {
            name: "Missing".into(),
            field: "projects.App.schemes.App.profile.executable".into(),
        }
    );
}

#[test]
fn test_dependency_in_unknown_project() {
    let src = r#"
[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.targets]]
name = "App"
product = "app"
bundle_id = "com.acme.app"
dependencies = [{ project = "../Nowhere", target = "Core" }]
"#;
    let err = load_graph(&manifest(src), &paths()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::UnresolvedReference { ref name, ref field }
            if name == "Core" && field == "projects.App.targets.App.dependencies"
    ));
}

#[test]
fn test_coverage_target_must_exist() {
    let src = r#"
[config]
generation_options = [{ enable_code_coverage = { targets = ["Ghost"] } }]

[workspace]
name = "Acme"
"#;
    let err = load(&manifest(src), &paths()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnresolvedReference {
            name: "Ghost".into(),
            field: "config.generation_options.enable_code_coverage".into(),
        }
    );
}

#[test]
fn test_empty_configuration_name() {
    let src = r#"
[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.schemes]]
name = "Lint"
analyze = { configuration = "  " }
"#;
    let err = load_graph(&manifest(src), &paths()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidConfigurationName {
            field: "projects.App.schemes.Lint.analyze.configuration".into(),
        }
    );
}

#[test]
fn test_malformed_last_upgrade_check() {
    let src = r#"
[config]
generation_options = [{ last_upgrade_check = "latest" }]

[workspace]
name = "Acme"
"#;
    let err = load(&manifest(src), &paths()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::MalformedVersion { ref value, .. } if value == "latest"
    ));
}

#[test]
fn test_duplicate_target() {
    let src = r#"
[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.targets]]
name = "App"
product = "app"
bundle_id = "com.acme.app"

[[projects.targets]]
name = "App"
product = "framework"
bundle_id = "com.acme.app2"
"#;
    let err = load_graph(&manifest(src), &paths()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DuplicateTarget {
            project: "App".into(),
            name: "App".into(),
        }
    );
}

#[test]
fn test_dependency_cycle() {
    let src = r#"
[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.targets]]
name = "A"
product = "framework"
bundle_id = "com.acme.a"
dependencies = ["B"]

[[projects.targets]]
name = "B"
product = "framework"
bundle_id = "com.acme.b"
dependencies = ["C"]

[[projects.targets]]
name = "C"
product = "framework"
bundle_id = "com.acme.c"
dependencies = ["A"]
"#;
    let err = load_graph(&manifest(src), &paths()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DependencyCycle {
            path: vec![
                "App/A".into(),
                "App/B".into(),
                "App/C".into(),
                "App/A".into()
            ],
        }
    );
}

#[test]
fn test_show_env_vars_follows_config() {
    let src = r#"
[config]
generation_options = [{ disable_show_environment_vars_in_script_phases = true }]

[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.schemes]]
name = "App"
build = { post_actions = [{ title = "Notify", script = "echo done", shell = "/bin/zsh" }] }
"#;
    let graph = load_graph(&manifest(src), &paths()).unwrap();
    let hook = &graph.projects[0].schemes[0].build.as_ref().unwrap().post_actions[0];
    assert!(!hook.show_env_vars);
    assert_eq!(hook.shell, "/bin/zsh");
}

#[test]
fn test_loading_is_deterministic() {
    let manifest = manifest(WORKSPACE);
    assert_eq!(
        load(&manifest, &paths()).unwrap(),
        load(&manifest, &paths()).unwrap()
    );
}
