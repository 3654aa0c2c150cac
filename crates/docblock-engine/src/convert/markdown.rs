use pulldown_cmark::{Event, Options, Parser, html};

use super::{ConvertError, Converter, RawHtml};
use crate::block::MarkupKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Tables, strikethrough and task lists.
    pub gfm: bool,
    pub raw_html: RawHtml,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            raw_html: RawHtml::Allow,
        }
    }
}

/// CommonMark converter backed by pulldown-cmark.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: MarkdownOptions,
}

impl MarkdownConverter {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
        }
        options
    }
}

impl Converter for MarkdownConverter {
    fn kind(&self) -> MarkupKind {
        MarkupKind::Markdown
    }

    fn convert(&self, source: &str) -> Result<String, ConvertError> {
        let escape = self.options.raw_html == RawHtml::Escape;
        let parser = Parser::new_ext(source, self.parser_options()).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) if escape => Event::Text(raw),
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn convert(source: &str) -> String {
        MarkdownConverter::default().convert(source).unwrap()
    }

    #[rstest]
    #[case("# Hello", "<h1>Hello</h1>\n")]
    #[case("## Hello", "<h2>Hello</h2>\n")]
    #[case("Some *emphasis* and **strong**", "<p>Some <em>emphasis</em> and <strong>strong</strong></p>\n")]
    #[case("`code`", "<p><code>code</code></p>\n")]
    #[case("", "")]
    fn converts_basic_markdown(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(convert(source), expected);
    }

    #[test]
    fn converts_lists() {
        assert_snapshot!(convert("- one\n- two"), @r"
        <ul>
        <li>one</li>
        <li>two</li>
        </ul>
        ");
    }

    #[test]
    fn gfm_strikethrough_enabled_by_default() {
        assert_eq!(convert("~~gone~~"), "<p><del>gone</del></p>\n");
    }

    #[test]
    fn gfm_can_be_disabled() {
        let converter = MarkdownConverter::new(MarkdownOptions {
            gfm: false,
            ..MarkdownOptions::default()
        });
        let html = converter.convert("| a |\n|---|\n| b |").unwrap();
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn gfm_tables() {
        let html = convert("| a |\n|---|\n| b |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>b</td>"));
    }

    #[test]
    fn raw_html_passes_through_by_default() {
        assert_eq!(
            convert("hi <span>there</span>"),
            "<p>hi <span>there</span></p>\n"
        );
    }

    #[test]
    fn raw_html_escaped_when_requested() {
        let converter = MarkdownConverter::new(MarkdownOptions {
            raw_html: RawHtml::Escape,
            ..MarkdownOptions::default()
        });
        assert_eq!(
            converter.convert("hi <span>there</span>").unwrap(),
            "<p>hi &lt;span&gt;there&lt;/span&gt;</p>\n"
        );
    }

    #[test]
    fn reports_markdown_kind() {
        assert_eq!(MarkdownConverter::default().kind(), MarkupKind::Markdown);
    }
}
