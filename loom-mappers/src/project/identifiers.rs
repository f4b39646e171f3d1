use loom_core::to_c99_identifier;
use loom_graph::Project;

use crate::{MapResult, ProjectMapper};

/// Normalizes bundle identifiers and module product names.
///
/// Bundle identifiers may only hold ASCII alphanumerics, `-` and `.`; any
/// other character becomes `-`. Products other targets import are renamed
/// to a C99 identifier so the module name is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifierNormalizationMapper;

fn normalize_bundle_id(bundle_id: &str) -> String {
    bundle_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl ProjectMapper for IdentifierNormalizationMapper {
    fn name(&self) -> &'static str {
        "identifier_normalization"
    }

    fn map(&self, project: &Project) -> MapResult<Project> {
        let mut mapped = project.clone();
        for target in &mut mapped.targets {
            target.bundle_id = normalize_bundle_id(&target.bundle_id);
            if target.product.is_module() {
                target.product_name = to_c99_identifier(&target.product_name);
            }
        }
        Ok((mapped, Vec::new()))
    }
}
