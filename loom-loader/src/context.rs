/// Tracks where in the manifest the loader currently is.
///
/// ```ignore
/// let ctx = FieldPath::root().push("projects").push("App");
/// assert_eq!(ctx.field("targets"), "projects.App.targets");
/// ```
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> FieldPath<'a> {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    /// Push a path segment and return a new context.
    pub(crate) fn push(&self, segment: &'a str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub(crate) fn path_string(&self) -> String {
        self.segments.join(".")
    }

    /// Path of a leaf field below the current position.
    pub(crate) fn field(&self, leaf: &str) -> String {
        if self.segments.is_empty() {
            leaf.to_string()
        } else {
            format!("{}.{leaf}", self.path_string())
        }
    }
}
