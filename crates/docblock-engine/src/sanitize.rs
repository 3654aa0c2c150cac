use regex::{Captures, Regex};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Cleans rendered HTML before it is written into a block.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}

/// How much the renderer trusts converter output.
#[derive(Clone)]
pub enum HtmlPolicy {
    /// Insert converter output as-is. Only for content from trusted authors.
    Trusted,
    /// Run converter output through a sanitizer first.
    Sanitized(Arc<dyn Sanitizer>),
}

impl HtmlPolicy {
    pub fn sanitized() -> Self {
        Self::Sanitized(Arc::new(AllowlistSanitizer::default()))
    }

    pub fn apply(&self, html: String) -> String {
        match self {
            Self::Trusted => html,
            Self::Sanitized(sanitizer) => sanitizer.sanitize(&html),
        }
    }
}

impl fmt::Debug for HtmlPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trusted => write!(f, "Trusted"),
            Self::Sanitized(_) => write!(f, "Sanitized"),
        }
    }
}

const DEFAULT_TAGS: &[&str] = &[
    "a", "abbr", "aside", "b", "blockquote", "br", "caption", "cite", "code", "col", "colgroup",
    "dd", "del", "details", "div", "dl", "dt", "em", "figcaption", "figure", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hr", "i", "img", "input", "ins", "kbd", "li", "mark", "nav",
    "ol", "p", "pre", "q", "s", "samp", "section", "small", "span", "strong", "sub", "summary",
    "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "u", "ul",
];

/// Elements removed together with everything inside them.
const STRIPPED_ELEMENTS: &[&str] = &["script", "style", "iframe", "object", "embed", "template"];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite", "action", "formaction"];

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^>'\x22]|'[^']*'|\x22[^\x22]*\x22)*)>|<")
            .expect("Invalid tag regex")
    })
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("Invalid attribute regex")
    })
}

fn stripped_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternatives = STRIPPED_ELEMENTS
            .iter()
            .map(|tag| format!(r"<{tag}\b.*?</{tag}\s*>|<{tag}\b[^>]*/?>"))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?is)<!--.*?-->|{alternatives}"))
            .expect("Invalid stripped element regex")
    })
}

/// Tag allowlist sanitizer.
///
/// Drops comments and active elements with their content, escapes any tag
/// outside the allowlist, and removes event handler, `style` and
/// `javascript:` URL attributes from the tags it keeps. A `<` that does not
/// open a well-formed tag is escaped; other text is left alone.
#[derive(Debug, Clone)]
pub struct AllowlistSanitizer {
    tags: HashSet<String>,
}

impl Default for AllowlistSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS.iter().copied())
    }
}

impl AllowlistSanitizer {
    pub fn new<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            tags: tags.into_iter().map(str::to_ascii_lowercase).collect(),
        }
    }

    pub fn allows(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_ascii_lowercase())
    }

    fn clean_tag(&self, caps: &Captures) -> String {
        // A `<` that does not open a well-formed tag.
        let Some(name) = caps.get(2) else {
            return "&lt;".to_string();
        };
        let name = name.as_str().to_ascii_lowercase();
        if !self.allows(&name) {
            return html_escape::encode_text(&caps[0]).into_owned();
        }
        if !caps[1].is_empty() {
            return format!("</{name}>");
        }

        let raw_attrs = &caps[3];
        let self_closing = raw_attrs.trim_end().ends_with('/');
        let mut tag = format!("<{name}");
        for attr in attribute_regex().captures_iter(raw_attrs) {
            let attr_name = attr[1].to_ascii_lowercase();
            if attr_name.starts_with("on") || attr_name == "style" {
                continue;
            }
            let value = attr.get(2).or(attr.get(3)).or(attr.get(4)).map(|m| m.as_str());
            match value {
                Some(value) => {
                    if URL_ATTRIBUTES.contains(&attr_name.as_str()) && is_script_url(value) {
                        continue;
                    }
                    tag.push_str(&format!(
                        " {attr_name}=\"{}\"",
                        html_escape::encode_double_quoted_attribute(value)
                    ));
                }
                None => tag.push_str(&format!(" {attr_name}")),
            }
        }
        if self_closing {
            tag.push_str(" /");
        }
        tag.push('>');
        tag
    }
}

fn is_script_url(value: &str) -> bool {
    let decoded = html_escape::decode_html_entities(value);
    let normalized: String = decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    normalized.starts_with("javascript:")
        || normalized.starts_with("vbscript:")
        || normalized.starts_with("data:text/html")
}

impl Sanitizer for AllowlistSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let without_active = stripped_regex().replace_all(html, "");
        tag_regex()
            .replace_all(&without_active, |caps: &Captures| self.clean_tag(caps))
            .into_owned()
    }
}
