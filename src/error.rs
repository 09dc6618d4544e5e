//! Error taxonomy for pattern resolution, compilation and sample output

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of a generation run
///
/// Unsatisfiable rounds are not errors: they are reported as a notice and
/// the enumeration continues.
#[derive(Debug, Error)]
pub enum Error {
    /// A pattern (or a group, or an alternative) contains no constructs
    #[error("regex is empty")]
    EmptyRegex,

    /// An anchor, boundary, or other construct the compiler does not model
    #[error("unsupported regex construct: {0}")]
    UnsupportedConstruct(String),

    /// The pattern text is not a well-formed regex
    #[error("invalid regex {pattern:?} at offset {offset}: {message}")]
    PatternSyntax {
        pattern: String,
        offset: usize,
        message: String,
    },

    /// A regex source names a file that could not be read
    #[error("cannot read regex file {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a sample or notice to the output failed
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Error::UnsupportedConstruct(construct.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::EmptyRegex.to_string(), "regex is empty");
        assert_eq!(
            Error::unsupported("anchor `^`").to_string(),
            "unsupported regex construct: anchor `^`"
        );
        let err = Error::PatternSyntax {
            pattern: "a**".to_string(),
            offset: 2,
            message: "multiple repeat".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid regex \"a**\" at offset 2: multiple repeat"
        );
    }

    #[test]
    fn test_output_error_from_io() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, Error::Output(_)));
        assert_eq!(err.to_string(), "cannot write output: closed");
    }
}
