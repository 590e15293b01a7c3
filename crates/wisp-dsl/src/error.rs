use std::fmt;
use std::io;
use std::path::PathBuf;

/// A syntax error. The whole document is rejected.
///
/// Input after the closing `End.` is an error (`GUI: expected end of
/// file`), as is nesting panels deeper than [`crate::parser::MAX_PANEL_DEPTH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based index of the token at which recognition stopped.
    /// One past the last token when the input ended early.
    pub position: usize,
    /// Chain of unmet expectations, innermost rule first.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self { position, message: message.into() }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "incorrect syntax at token {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Failure to turn a file into a [`crate::WindowSpec`].
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read. Nothing was lexed.
    Source { path: PathBuf, source: io::Error },
    Parse(ParseError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Source { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            LoadError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Source { source, .. } => Some(source),
            LoadError::Parse(err) => Some(err),
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        LoadError::Parse(err)
    }
}
