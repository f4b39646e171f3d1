use std::path::PathBuf;

use loom_core::SideEffect;
use loom_graph::Project;

use crate::{MapResult, ProjectMapper};

/// Writes the project's file header template as an `IDETemplateMacros.plist`
/// next to the generated project file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateMacrosMapper;

impl TemplateMacrosMapper {
    fn path(project: &Project) -> PathBuf {
        project
            .project_file_path()
            .join("xcshareddata")
            .join("IDETemplateMacros.plist")
    }
}

/// The IDE prefixes the header with `//` itself.
fn file_header(template: &str) -> String {
    let header = template.strip_prefix("//").unwrap_or(template);
    escape_xml(header)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn render(template: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>FILEHEADER</key>
  <string>{}</string>
</dict>
</plist>
"#,
        file_header(template)
    )
}

impl ProjectMapper for TemplateMacrosMapper {
    fn name(&self) -> &'static str {
        "template_macros"
    }

    fn map(&self, project: &Project) -> MapResult<Project> {
        let Some(template) = &project.file_header_template else {
            return Ok((project.clone(), Vec::new()));
        };

        let path = Self::path(project);
        if project.template_macros.as_ref() == Some(&path) {
            return Ok((project.clone(), Vec::new()));
        }

        let mut mapped = project.clone();
        mapped.template_macros = Some(path.clone());
        Ok((mapped, vec![SideEffect::write_file(path, render(template))]))
    }
}
