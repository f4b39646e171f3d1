use loom_core::Version;
use loom_graph::Graph;

use crate::{MapResult, WorkspaceMapper};

/// Records the last tool version the workspace was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastUpgradeVersionMapper {
    pub last_upgrade_version: Version,
}

impl LastUpgradeVersionMapper {
    pub fn new(last_upgrade_version: Version) -> Self {
        Self {
            last_upgrade_version,
        }
    }
}

impl WorkspaceMapper for LastUpgradeVersionMapper {
    fn name(&self) -> &'static str {
        "last_upgrade_version"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        let mut mapped = graph.clone();
        mapped.workspace.last_upgrade_check = Some(self.last_upgrade_version);
        Ok((mapped, Vec::new()))
    }
}
