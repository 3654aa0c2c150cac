pub mod block;
pub mod convert;
pub mod render;
pub mod sanitize;
pub mod text;

// Re-export key types for easier usage
pub use block::{MarkupBlock, MarkupKind, UnknownMarkupKind};
pub use convert::{
    AsciidocConverter, ConvertError, Converter, MarkdownConverter, MarkdownOptions, RawHtml,
};
pub use render::Renderer;
pub use sanitize::{AllowlistSanitizer, HtmlPolicy, Sanitizer};
