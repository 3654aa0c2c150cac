use crate::block::{MarkupBlock, MarkupKind};
use crate::convert::{ConvertError, Converter};
use crate::sanitize::HtmlPolicy;

/// Replaces the raw text of [`MarkupBlock`]s with rendered HTML and reveals
/// them.
///
/// The converters are built once by the caller and borrowed here, so a
/// single pair can back any number of renderers. The renderer keeps no
/// state between calls.
pub struct Renderer<'a> {
    asciidoc: &'a dyn Converter,
    markdown: &'a dyn Converter,
    policy: HtmlPolicy,
}

impl<'a> Renderer<'a> {
    pub fn new(asciidoc: &'a dyn Converter, markdown: &'a dyn Converter, policy: HtmlPolicy) -> Self {
        Self {
            asciidoc,
            markdown,
            policy,
        }
    }

    pub fn render_asciidoc(&self, block: &mut MarkupBlock) -> Result<(), ConvertError> {
        let source = block.text_content();
        log::info!("Parse AsciiDoc: {source}");
        let html = self.asciidoc.convert(&source)?;
        let html = self.policy.apply(html);
        block.reveal(html);
        Ok(())
    }

    pub fn render_markdown(&self, block: &mut MarkupBlock) -> Result<(), ConvertError> {
        let source = block.text_content();
        log::info!("Parse Markdown: {source}");
        let html = self.markdown.convert(&source)?;
        let html = self.policy.apply(html);
        block.reveal(html);
        Ok(())
    }

    /// Render with the converter matching the block's kind.
    pub fn render(&self, block: &mut MarkupBlock) -> Result<(), ConvertError> {
        match block.kind() {
            MarkupKind::AsciiDoc => self.render_asciidoc(block),
            MarkupKind::Markdown => self.render_markdown(block),
        }
    }

    /// Render every block, carrying on past failures. Returns the index and
    /// error of each block that could not be rendered; those blocks are left
    /// untouched.
    pub fn render_all<'b>(
        &self,
        blocks: impl IntoIterator<Item = &'b mut MarkupBlock>,
    ) -> Vec<(usize, ConvertError)> {
        blocks
            .into_iter()
            .enumerate()
            .filter_map(|(index, block)| {
                self.render(block).err().map(|err| {
                    log::warn!("Failed to render {} block {index}: {err}", block.kind());
                    (index, err)
                })
            })
            .collect()
    }
}
