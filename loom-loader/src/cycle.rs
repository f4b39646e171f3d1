use std::collections::HashMap;

use loom_graph::{Project, TargetReference};

use crate::{Result, ValidationError};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

struct Walk<'g> {
    projects: &'g [Project],
    marks: HashMap<&'g TargetReference, Mark>,
    stack: Vec<&'g TargetReference>,
}

/// Reject target dependency cycles.
///
/// Targets are visited in declaration order, so the reported cycle is
/// deterministic for a given manifest.
pub(crate) fn check_acyclic(projects: &[Project]) -> Result<()> {
    let roots: Vec<TargetReference> = projects
        .iter()
        .flat_map(|p| p.targets.iter().map(|t| p.reference(&t.name)))
        .collect();
    let mut walk = Walk {
        projects,
        marks: HashMap::new(),
        stack: Vec::new(),
    };
    for reference in &roots {
        walk.visit(reference)?;
    }
    Ok(())
}

impl<'g> Walk<'g> {
    fn dependencies(&self, node: &TargetReference) -> &'g [TargetReference] {
        self.projects
            .iter()
            .find(|p| p.path == node.project_path)
            .and_then(|p| p.targets.iter().find(|t| t.name == node.name))
            .map_or(&[], |t| t.dependencies.as_slice())
    }

    fn label(&self, node: &TargetReference) -> String {
        let project = self
            .projects
            .iter()
            .find(|p| p.path == node.project_path)
            .map_or_else(|| node.project_path.display().to_string(), |p| p.name.clone());
        format!("{project}/{}", node.name)
    }

    fn visit(&mut self, node: &'g TargetReference) -> Result<()> {
        match self.marks.get(node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = self.stack.iter().position(|n| *n == node).unwrap_or(0);
                let mut path: Vec<String> =
                    self.stack[start..].iter().map(|n| self.label(n)).collect();
                path.push(self.label(node));
                return Err(ValidationError::DependencyCycle { path });
            }
            None => {}
        }

        self.marks.insert(node, Mark::Visiting);
        self.stack.push(node);
        for dependency in self.dependencies(node) {
            self.visit(dependency)?;
        }
        self.stack.pop();
        self.marks.insert(node, Mark::Done);
        Ok(())
    }
}
