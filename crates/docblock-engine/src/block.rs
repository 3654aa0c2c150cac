use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::text::text_content;

/// The markup language a block's source text is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    AsciiDoc,
    Markdown,
}

impl MarkupKind {
    /// Guess the markup kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "adoc" | "asciidoc" | "asc" => Some(Self::AsciiDoc),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsciiDoc => write!(f, "AsciiDoc"),
            Self::Markdown => write!(f, "Markdown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown markup kind: {0}")]
pub struct UnknownMarkupKind(pub String);

impl FromStr for MarkupKind {
    type Err = UnknownMarkupKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asciidoc" | "adoc" => Ok(Self::AsciiDoc),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(UnknownMarkupKind(s.to_string())),
        }
    }
}

/// A container holding marked-up text that is waiting to be rendered.
///
/// A block starts hidden with its raw source as content. Rendering replaces
/// the content with HTML and reveals the block. The original source is kept
/// so the block can be [`reset`](MarkupBlock::reset), but rendering always
/// reads the block's current [`text_content`](MarkupBlock::text_content),
/// so rendering an already rendered block does not reproduce the first result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupBlock {
    kind: MarkupKind,
    content: String,
    hidden: bool,
    rendered: bool,
    original: String,
}

impl MarkupBlock {
    pub fn new(kind: MarkupKind, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            kind,
            content: source.clone(),
            hidden: true,
            rendered: false,
            original: source,
        }
    }

    pub fn asciidoc(source: impl Into<String>) -> Self {
        Self::new(MarkupKind::AsciiDoc, source)
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Self::new(MarkupKind::Markdown, source)
    }

    pub fn kind(&self) -> MarkupKind {
        self.kind
    }

    /// Raw source before rendering, HTML afterwards.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// The source text the block was created with.
    pub fn original_source(&self) -> &str {
        &self.original
    }

    /// The block's text as a document tree would report it: the raw source
    /// while pending, the rendered HTML without markup once rendered.
    pub fn text_content(&self) -> Cow<'_, str> {
        if self.rendered {
            Cow::Owned(text_content(&self.content))
        } else {
            Cow::Borrowed(&self.content)
        }
    }

    /// Put the original source back and hide the block again.
    pub fn reset(&mut self) {
        self.content = self.original.clone();
        self.hidden = true;
        self.rendered = false;
    }

    pub(crate) fn reveal(&mut self, html: String) {
        self.content = html;
        self.hidden = false;
        self.rendered = true;
    }
}
