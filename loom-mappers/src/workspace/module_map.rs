use std::{collections::HashMap, path::PathBuf};

use loom_core::{SideEffect, to_c99_identifier};
use loom_graph::{Graph, Product, Project, Target, TargetReference};

use crate::{MapResult, WorkspaceMapper};

const MODULEMAP_FILE: &str = "MODULEMAP_FILE";
const OTHER_SWIFT_FLAGS: &str = "OTHER_SWIFT_FLAGS";

/// Synthesizes a module map for module products that expose public headers,
/// and points every dependent target at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleMapMapper;

impl ModuleMapMapper {
    fn path(project: &Project, target: &Target) -> PathBuf {
        project
            .derived_path()
            .join("ModuleMaps")
            .join(format!("{}.modulemap", target.name))
    }
}

fn render(target: &Target, headers: &std::path::Path) -> String {
    let keyword = match target.product {
        Product::Framework | Product::StaticFramework => "framework module",
        _ => "module",
    };
    format!(
        "{keyword} {name} {{\n  umbrella \"{headers}\"\n\n  export *\n  module * {{ export * }}\n}}\n",
        name = to_c99_identifier(&target.product_name),
        headers = headers.display(),
    )
}

fn import_flag(module_map: &std::path::Path) -> String {
    format!("-Xcc -fmodule-map-file={}", module_map.display())
}

impl WorkspaceMapper for ModuleMapMapper {
    fn name(&self) -> &'static str {
        "module_map"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        let mut mapped = graph.clone();
        let mut side_effects = Vec::new();

        for project in &mut mapped.projects {
            let original = &*project;
            let paths: Vec<_> = original
                .targets
                .iter()
                .map(|target| Self::path(original, target))
                .collect();
            for (target, path) in project.targets.iter_mut().zip(paths) {
                let Some(headers) = &target.public_headers else {
                    continue;
                };
                if !target.product.is_module() || target.module_map.is_some() {
                    continue;
                }
                side_effects.push(SideEffect::write_file(path.clone(), render(target, headers)));
                target
                    .settings
                    .insert(MODULEMAP_FILE.to_string(), path.display().to_string());
                target.module_map = Some(path);
            }
        }

        let module_maps: HashMap<TargetReference, PathBuf> = mapped
            .targets()
            .filter_map(|(reference, target)| Some((reference, target.module_map.clone()?)))
            .collect();
        if module_maps.is_empty() {
            return Ok((mapped, side_effects));
        }

        for project in &mut mapped.projects {
            for target in &mut project.targets {
                for dependency in &target.dependencies {
                    let Some(module_map) = module_maps.get(dependency) else {
                        continue;
                    };
                    let flag = import_flag(module_map);
                    let flags = target.settings.entry(OTHER_SWIFT_FLAGS.to_string()).or_default();
                    if flags.contains(&flag) {
                        continue;
                    }
                    if !flags.is_empty() {
                        flags.push(' ');
                    }
                    flags.push_str(&flag);
                }
            }
        }
        Ok((mapped, side_effects))
    }
}
