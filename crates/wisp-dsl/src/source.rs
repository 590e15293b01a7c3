//! Reading window-spec files from disk.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::ast::WindowSpec;
use crate::error::LoadError;
use crate::lexer::{LexerOptions, tokenize_with};
use crate::parser::parse;

/// Read every line of `path`. The file is closed before this returns,
/// whether or not reading succeeded.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let source_err = |source: std::io::Error| LoadError::Source { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(source_err)?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(source_err)?;

    log::debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Read, lex, and parse `path`.
pub fn load_file(path: impl AsRef<Path>, options: LexerOptions) -> Result<WindowSpec, LoadError> {
    let lines = read_lines(path)?;
    let tokens = tokenize_with(&lines, options);
    Ok(parse(&tokens)?)
}
