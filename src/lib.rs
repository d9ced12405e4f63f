//! Composes insurance quotes and policy templates and renders them to PDF.
//!
//! Documents are assembled by the section builders on
//! [`sections::Composer`] into a [`model::Document`], which
//! [`builder::PdfBuilder`] renders with `genpdf` and [`text::to_text`]
//! previews as plain text. Templates keep `{field}` placeholders and
//! `{#expr}`/`{/expr}` conditional tokens for a later substitution pass.

pub mod builder;
pub mod condition;
pub mod currency;
pub mod documents;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod output;
pub mod payload;
pub mod richtext;
pub mod sections;
pub mod style;
pub mod text;
pub mod variables;

pub use error::{ComposeError, Notice, Result};
