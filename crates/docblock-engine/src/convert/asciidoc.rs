use std::path::PathBuf;

use asciidocr::backends::htmls::render_htmlbook;
use asciidocr::parser::Parser;
use asciidocr::scanner::Scanner;

use super::{ConvertError, Converter};
use crate::block::MarkupKind;

/// AsciiDoc converter backed by asciidocr's HTMLBook backend.
///
/// Blocks are parsed as standalone documents read from standard input, so
/// `include::` targets resolve relative to the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciidocConverter;

impl AsciidocConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Converter for AsciidocConverter {
    fn kind(&self) -> MarkupKind {
        MarkupKind::AsciiDoc
    }

    fn convert(&self, source: &str) -> Result<String, ConvertError> {
        let graph = Parser::new(PathBuf::from("-"))
            .parse(Scanner::new(source))
            .map_err(|err| ConvertError::Rejected {
                kind: MarkupKind::AsciiDoc,
                message: err.to_string(),
            })?;
        render_htmlbook(&graph).map_err(|err| ConvertError::Rejected {
            kind: MarkupKind::AsciiDoc,
            message: err.to_string(),
        })
    }
}
