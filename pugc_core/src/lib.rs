//! `pugc_core` compiles pug page templates into C++ render functions.
//!
//! ## Processing Pipeline
//!
//! ```text
//! .pug document
//!   → Parser (indentation-based lines into a Node tree)
//!   → Extractor (Node tree into text, variable and locale blocks)
//!   → Locale scanner (splits text and attribute values at `_(...)` markers)
//!   → Optimizer (merges adjacent text blocks)
//!   → Code generator (renders the header and source templates with minijinja)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loaded from `pugc.toml`. Sets the template
//!   locations, output extensions and translation function name.
//!
//! ## Key Types
//!
//! - [`Node`]: A node of the parsed document tree.
//! - [`Block`]: One text, variable, or locale fragment of the page.
//! - [`BuildParams`]: The record both output templates are rendered with.
//! - [`OutputTemplates`]: The declaration and definition template sources.
//! - [`Artifacts`]: The two rendered files for one document.
//!
//! ## Locale markers
//!
//! Any text or attribute value may mark a sub-string for translation:
//!
//! ```pug
//! h1 _(Welcome back)
//! input(placeholder="_(Search)")
//! ```
//!
//! Each marker renders as a call to the translation function, `_("Welcome
//! back")` by default. The marker ends at the first `)`, so the translated
//! text cannot itself contain a closing parenthesis.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pugc_core::{LocaleScanner, OutputConfig, OutputTemplates};
//! use pugc_core::{compile_file, generate, write_artifacts};
//! use std::path::Path;
//!
//! let params = compile_file(Path::new("pages/login.pug"), &LocaleScanner::default()).unwrap();
//! let artifacts = generate(&params, &OutputTemplates::builtin()).unwrap();
//! write_artifacts(&artifacts, Path::new("generated"), &OutputConfig::default()).unwrap();
//! ```

pub use ast::*;
pub use block::*;
pub use codegen::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use extract::*;
pub use locale::*;
pub use optimize::*;
pub use parser::*;

mod ast;
mod block;
mod codegen;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod extract;
pub(crate) mod lexer;
mod locale;
mod optimize;
mod parser;

#[cfg(test)]
mod __fixtures;
