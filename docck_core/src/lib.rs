//! `docck_core` checks generated HTML documentation against assertions
//! written in a template. A template is any text file (usually the source
//! the documentation was generated from) containing `@` directives:
//!
//! ```text
//! // @has foo/struct.Bar.html
//! // @has - '//h1[@class="fqn"]/span' 'Struct foo::Bar'
//! // @matches - '//pre' '^pub struct Bar'
//! // @count - '//*[@class="method"]' 3
//! // @!has foo/struct.Hidden.html
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template file
//!   → Directive parser (joins `\`-continued lines, finds `@cmd args`)
//!   → Check engine (one directive at a time, in order)
//!       → Resource cache (reads each document once, parses it once)
//!           → Markup parser (tolerant HTML → element tree)
//!       → Path queries (`//tag[@attr='v']/child[2]/@attr`)
//! ```
//!
//! The first directive that does not hold stops the run with an error
//! naming it and its line.
//!
//! ## Modules
//!
//! - [`directive`]: Template reading and directive extraction.
//! - [`markup`]: HTML tokenizer and tree builder.
//! - [`query`]: Restricted path-query parser and evaluator.
//! - [`cache`]: Per-path memoization of document text and trees.
//! - [`entities`]: Named character references and void elements.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docck_core::DocckConfig;
//! use docck_core::check_template;
//! use std::path::Path;
//!
//! let config = DocckConfig::default();
//! let report = check_template(Path::new("target/doc"), Path::new("tests/foo.rs"), &config).unwrap();
//! println!("{} directives passed", report.passed);
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use node::Node;

pub mod cache;
mod config;
pub mod directive;
mod engine;
pub mod entities;
#[allow(unused_assignments)]
mod error;
pub(crate) mod lexer;
pub mod markup;
mod node;
pub mod query;

#[cfg(test)]
mod __fixtures;
