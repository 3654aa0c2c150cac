use regex::Regex;
use std::sync::OnceLock;

fn markup_regex() -> &'static Regex {
    static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_REGEX
        .get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("Invalid markup regex"))
}

/// Strip tags and comments from an HTML fragment and decode its entities.
pub fn text_content(html: &str) -> String {
    let stripped = markup_regex().replace_all(html, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}
