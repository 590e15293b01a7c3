//! Rendering side of wisp.
//!
//! The parser in `wisp-dsl` produces a [`WindowSpec`](wisp_dsl::WindowSpec);
//! anything that wants to display it implements [`Renderer`]. Native toolkit
//! backends live outside this workspace. [`OutlineRenderer`] is the one
//! backend bundled here and prints the tree as text.
//!
//! # Quick start
//!
//! ```rust
//! use wisp_render::{render, OutlineRenderer};
//!
//! let window = wisp_dsl::parse_str(r#"Window "Hi" (100,50) Layout Flow: Button "OK"; End."#).unwrap();
//! let text = render(&window, OutlineRenderer::new());
//! assert!(text.contains("Button \"OK\""));
//! ```

pub mod logging;
pub mod outline;
pub mod render;

pub use outline::{OutlineRenderer, describe_layout};
pub use render::{Renderer, render};
