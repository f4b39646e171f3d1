//! Workspace-scoped passes.

mod automation_path;
mod autogenerated_schemes;
mod cacheable_schemes;
mod identifier;
mod last_upgrade;
mod module_map;

pub use automation_path::AutomationPathMapper;
pub use autogenerated_schemes::AutogeneratedWorkspaceSchemeMapper;
pub use cacheable_schemes::GenerateCacheableSchemesMapper;
pub use identifier::WorkspaceIdentifierMapper;
pub use last_upgrade::LastUpgradeVersionMapper;
pub use module_map::ModuleMapMapper;
