//! Lexer, parser, and AST for the **wisp** window-spec language (`.wisp`).
//!
//! A `.wisp` file declares one window, its layout manager, and a tree of
//! widgets. This crate turns the text into a [`WindowSpec`] tree; drawing
//! it is left to a renderer (see the `wisp-render` crate).
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `WindowSpec`, `LayoutSpec`, `WidgetSpec` |
//! | [`error`] | `ParseError`, `LoadError` |
//! | [`lexer`] | `Lexer`, `Token`, `TokenKind`, `tokenize` |
//! | [`parser`] | `Parser`, `parse`, `parse_str` |
//! | [`source`] | `read_lines`, `load_file` |
//!
//! # Quick start
//!
//! ```rust
//! use wisp_dsl::{parse_str, LayoutSpec};
//!
//! let src = r#"
//! / a comment line
//! Window "Demo" (300,200) Layout Flow:
//!     Button "OK";
//!     Label "Hi";
//! End.
//! "#;
//!
//! let window = parse_str(src).unwrap();
//! assert_eq!(window.layout, LayoutSpec::Flow);
//! assert_eq!(window.children.len(), 2);
//! ```
//!
//! Anything after the closing `End.` is a syntax error, not ignored.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;

pub use ast::{LayoutSpec, WidgetSpec, WindowSpec};
pub use error::{LoadError, ParseError};
pub use lexer::{LexerOptions, Token, TokenKind, format_tokens, tokenize, tokenize_str};
pub use parser::{MAX_PANEL_DEPTH, parse, parse_str, parse_str_with};
pub use source::load_file;
