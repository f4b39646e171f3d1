use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A mapper failed; carries the failing mapper's name and the cause.
#[derive(Debug, Error)]
#[error("mapper `{mapper}` failed: {source}")]
pub struct MapperError {
    pub mapper: &'static str,
    #[source]
    pub source: BoxError,
}

impl MapperError {
    pub fn new(mapper: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            mapper,
            source: source.into(),
        }
    }
}
