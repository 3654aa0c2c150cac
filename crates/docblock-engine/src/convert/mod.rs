//! Markup-to-HTML conversion capabilities.
//!
//! The renderer only knows about the [`Converter`] trait. The converters in
//! this module are the ones the workspace ships with; anything else that can
//! turn text into HTML can be plugged in instead.

pub mod asciidoc;
pub mod markdown;

pub use asciidoc::AsciidocConverter;
pub use markdown::{MarkdownConverter, MarkdownOptions};

use crate::block::MarkupKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("{kind} conversion failed: {message}")]
    Rejected { kind: MarkupKind, message: String },
}

/// Turns source text of one markup language into an HTML fragment.
pub trait Converter: Send + Sync {
    fn kind(&self) -> MarkupKind;

    fn convert(&self, source: &str) -> Result<String, ConvertError>;
}

/// What to do with raw HTML written inside the markup source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawHtml {
    /// Pass it through to the output untouched.
    #[default]
    Allow,
    /// Escape it so it shows up as text.
    Escape,
}
