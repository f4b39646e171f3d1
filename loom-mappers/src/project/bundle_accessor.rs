use std::path::PathBuf;

use loom_core::{SideEffect, to_c99_identifier};
use loom_graph::{Product, Project, Target};

use crate::{MapResult, ProjectMapper};

/// Synthesizes a `Bundle.module` accessor for every target with resources.
///
/// Products that carry their own bundle resolve to it directly; static
/// products look up the companion `<Project>_<Target>.bundle` at runtime.
/// Projects that opt out through their options are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleAccessorMapper;

impl BundleAccessorMapper {
    fn path(project: &Project, target: &Target) -> PathBuf {
        project
            .derived_path()
            .join("Sources")
            .join(format!("Bundle+{}.swift", to_c99_identifier(&target.name)))
    }
}

fn render(project: &Project, target: &Target) -> String {
    let lookup = if target.product.bundles_resources() {
        "Bundle(for: BundleFinder.self)".to_string()
    } else {
        format!(
            r#"{{
        let bundleName = "{project}_{target}"
        let candidates = [
            Bundle.main.resourceURL,
            Bundle(for: BundleFinder.self).resourceURL,
            Bundle.main.bundleURL,
        ]
        for candidate in candidates {{
            let bundlePath = candidate?.appendingPathComponent(bundleName + ".bundle")
            if let bundle = bundlePath.flatMap(Bundle.init(url:)) {{
                return bundle
            }}
        }}
        fatalError("unable to find bundle named {project}_{target}")
    }}()"#,
            project = to_c99_identifier(&project.name),
            target = to_c99_identifier(&target.name),
        )
    };

    format!(
        r#"// Generated by loom. Do not edit.
import Foundation

private class BundleFinder {{}}

extension Foundation.Bundle {{
    /// Resource bundle of the {name} target.
    static let module: Bundle = {lookup}
}}
"#,
        name = target.name,
    )
}

impl ProjectMapper for BundleAccessorMapper {
    fn name(&self) -> &'static str {
        "bundle_accessor"
    }

    fn map(&self, project: &Project) -> MapResult<Project> {
        if project.options.disable_bundle_accessors {
            return Ok((project.clone(), Vec::new()));
        }

        let mut mapped = project.clone();
        let mut side_effects = Vec::new();
        for target in &mut mapped.targets {
            if target.resources.is_empty()
                || target.bundle_accessor.is_some()
                || target.product == Product::CommandLineTool
            {
                continue;
            }
            let path = Self::path(project, target);
            side_effects.push(SideEffect::write_file(path.clone(), render(project, target)));
            if !target.has_source(&path) {
                target.sources.push(path.clone());
            }
            target.bundle_accessor = Some(path);
        }
        Ok((mapped, side_effects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        let mut project = Project::new("App", "/ws/App");
        let mut app = Target::new("App", Product::App, "com.acme.app");
        app.resources.push("/ws/App/Resources/**".into());
        let mut kit = Target::new("Kit", Product::StaticLibrary, "com.acme.kit");
        kit.resources.push("/ws/App/Kit/Resources/**".into());
        let plain = Target::new("Plain", Product::Framework, "com.acme.plain");
        project.targets = vec![app, kit, plain];
        project
    }

    #[test]
    fn test_synthesizes_accessors_for_targets_with_resources() {
        let (mapped, effects) = BundleAccessorMapper.map(&project()).unwrap();

        let paths: Vec<_> = effects.iter().map(|e| e.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/ws/App/Derived/Sources/Bundle+App.swift"),
                PathBuf::from("/ws/App/Derived/Sources/Bundle+Kit.swift"),
            ]
        );
        assert!(mapped.targets[0].has_source(&paths[0]));
        assert_eq!(mapped.targets[1].bundle_accessor.as_ref(), Some(&paths[1]));
        assert!(mapped.targets[2].bundle_accessor.is_none());
    }

    #[test]
    fn test_app_accessor_uses_own_bundle() {
        let project = project();
        insta::assert_snapshot!(render(&project, &project.targets[0]), @r#"
        // Generated by loom. Do not edit.
        import Foundation

        private class BundleFinder {}

        extension Foundation.Bundle {
            /// Resource bundle of the App target.
            static let module: Bundle = Bundle(for: BundleFinder.self)
        }
        "#);
    }

    #[test]
    fn test_static_accessor_searches_companion_bundle() {
        let project = project();
        let rendered = render(&project, &project.targets[1]);
        assert!(rendered.contains(r#"let bundleName = "App_Kit""#));
        assert!(rendered.contains("fatalError(\"unable to find bundle named App_Kit\")"));
    }

    #[test]
    fn test_opted_out_project_is_untouched() {
        let mut project = project();
        project.options.disable_bundle_accessors = true;
        let (mapped, effects) = BundleAccessorMapper.map(&project).unwrap();
        assert_eq!(mapped, project);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_reapplying_adds_nothing() {
        let (once, _) = BundleAccessorMapper.map(&project()).unwrap();
        let (twice, effects) = BundleAccessorMapper.map(&once).unwrap();
        assert_eq!(twice, once);
        assert!(effects.is_empty());
    }
}
