use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for loom-manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a loom.toml next to your projects, or pass --manifest"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(loom::parse_error))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            filename: filename.to_string(),
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}

/// Failure to decode a discriminated union from its keyed form.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DecodeError {
    /// None of the discriminator keys the type knows about were present.
    #[error("no recognized {type_name} key in {{{}}}", .keys.join(", "))]
    #[diagnostic(
        code(loom::malformed_variant),
        help("check the option name for typos; each entry must hold exactly one known key")
    )]
    MalformedVariant {
        type_name: &'static str,
        /// Keys actually present, in sorted order.
        keys: Vec<String>,
    },

    /// A known discriminator key holds a payload of the wrong shape.
    #[error("invalid value for {type_name} `{key}`: {reason}")]
    #[diagnostic(code(loom::invalid_payload))]
    InvalidPayload {
        type_name: &'static str,
        key: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_variant_message_lists_keys() {
        let err = DecodeError::MalformedVariant {
            type_name: "GenerationOption",
            keys: vec!["colour".into(), "shape".into()],
        };
        assert_eq!(
            err.to_string(),
            "no recognized GenerationOption key in {colour, shape}"
        );
    }

    #[test]
    fn test_parse_error_keeps_span() {
        let src = "[workspace\nname = 1";
        let toml_err = toml::from_str::<toml::Value>(src).unwrap_err();
        let err = Error::parse(toml_err, src, "loom.toml");
        match *err {
            Error::Parse { span, filename, .. } => {
                assert!(span.is_some());
                assert_eq!(filename, "loom.toml");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
