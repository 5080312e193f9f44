use oxiri::IriParseError;
use peg::str::LineCol;
use std::io;

/// Error returned when registering an invalid prefix.
#[derive(Debug, thiserror::Error)]
pub enum PrefixError {
    #[error("Invalid prefix name '{0}'")]
    InvalidName(String),
    #[error("Invalid prefix namespace: {0}")]
    InvalidNamespace(#[from] IriParseError),
}

/// Error returned during functional-style syntax parsing.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct FunctionalSyntaxError {
    #[from]
    kind: FunctionalSyntaxErrorKind,
}

impl FunctionalSyntaxError {
    /// The position of the error, if it is a syntax error.
    pub fn location(&self) -> Option<LineCol> {
        match &self.kind {
            FunctionalSyntaxErrorKind::Syntax(e) => Some(e.location),
        }
    }
}

impl From<FunctionalSyntaxError> for io::Error {
    #[inline]
    fn from(error: FunctionalSyntaxError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum FunctionalSyntaxErrorKind {
    #[error(transparent)]
    Syntax(#[from] peg::error::ParseError<LineCol>),
}

/// Any error raised while reading or writing ontologies.
#[derive(Debug, thiserror::Error)]
pub enum OwlError {
    /// I/O error while reading or writing a document.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The document is not valid functional-style syntax.
    #[error(transparent)]
    Syntax(#[from] FunctionalSyntaxError),
    #[error(transparent)]
    Prefix(#[from] PrefixError),
    #[error(transparent)]
    Iri(#[from] IriParseError),
    #[error(transparent)]
    LanguageTag(#[from] oxilangtag::LanguageTagParseError),
}

impl From<OwlError> for io::Error {
    #[inline]
    fn from(error: OwlError) -> Self {
        match error {
            OwlError::Io(error) => error,
            OwlError::Syntax(error) => error.into(),
            OwlError::Prefix(error) => Self::new(io::ErrorKind::InvalidInput, error),
            OwlError::Iri(error) => Self::new(io::ErrorKind::InvalidInput, error),
            OwlError::LanguageTag(error) => Self::new(io::ErrorKind::InvalidInput, error),
        }
    }
}
