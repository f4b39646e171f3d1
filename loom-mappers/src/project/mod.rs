//! Project-scoped passes.

mod bundle_accessor;
mod development_region;
mod identifiers;
mod name_and_organization;
mod template_macros;

pub use bundle_accessor::BundleAccessorMapper;
pub use development_region::DevelopmentRegionMapper;
pub use identifiers::IdentifierNormalizationMapper;
pub use name_and_organization::ProjectNameAndOrganizationMapper;
pub use template_macros::TemplateMacrosMapper;
