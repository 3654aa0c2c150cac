use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Named colour tokens the site templates use. Each one resolves to a CSS
/// custom property so light and dark themes only differ in stylesheet
/// variables.
pub const DEFAULT_COLOR_TOKENS: &[&str] = &[
    "primary-bg",
    "secondary-bg",
    "primary-fg",
    "secondary-fg",
    "accent1",
    "accent2",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    Media,
    Selector,
    Class,
}

impl DarkMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Selector => "selector",
            Self::Class => "class",
        }
    }
}

/// Declarative input for the CSS generator: where to look for used classes
/// and which theme tokens to add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Glob patterns of files scanned for style classes.
    pub content: Vec<String>,
    pub dark_mode: Option<DarkMode>,
    pub font_family: BTreeMap<String, Vec<String>>,
    pub colors: BTreeMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content: vec!["./templates/**/*.html".to_string()],
            dark_mode: Some(DarkMode::Selector),
            font_family: BTreeMap::from([(
                "flow".to_string(),
                vec!["\"Flow Rounded\"".to_string(), "sans-serif".to_string()],
            )]),
            colors: DEFAULT_COLOR_TOKENS
                .iter()
                .map(|name| (name.to_string(), Self::color_var(name)))
                .collect(),
        }
    }
}

impl ThemeConfig {
    /// The CSS variable reference a colour token is bound to.
    pub fn color_var(name: &str) -> String {
        format!("var(--color-{name})")
    }

    /// Render the configuration as a `tailwind.config.js` module.
    pub fn to_tailwind_config(&self) -> String {
        let mut out = String::new();
        out.push_str("/** @type {import('tailwindcss').Config} */\n");
        out.push_str("module.exports = {\n");

        let content: Vec<String> = self.content.iter().map(|pattern| js_string(pattern)).collect();
        let _ = writeln!(out, "    content: [{}],", content.join(", "));
        if let Some(mode) = self.dark_mode {
            let _ = writeln!(out, "    darkMode: {},", js_string(mode.as_str()));
        }

        out.push_str("    theme: {\n        extend: {\n");
        if !self.font_family.is_empty() {
            out.push_str("            fontFamily: {\n");
            for (alias, stack) in &self.font_family {
                let stack: Vec<String> = stack.iter().map(|font| js_string(font)).collect();
                let _ = writeln!(
                    out,
                    "                {}: [{}],",
                    js_string(alias),
                    stack.join(", ")
                );
            }
            out.push_str("            },\n");
        }
        if !self.colors.is_empty() {
            out.push_str("            colors: {\n");
            for (name, value) in &self.colors {
                let _ = writeln!(out, "                {}: {},", js_string(name), js_string(value));
            }
            out.push_str("            },\n");
        }
        out.push_str("        },\n    },\n};\n");
        out
    }

    /// Resolve the content globs against `root`, expanding `~` and
    /// environment variables first. Matches are sorted and deduplicated.
    pub fn content_files(&self, root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        let mut files = BTreeSet::new();
        for pattern in &self.content {
            let expanded = shellexpand::full(pattern)
                .map(|p| p.into_owned())
                .unwrap_or_else(|_| pattern.clone());
            let relative = expanded.strip_prefix("./").unwrap_or(expanded.as_str());
            let full = if Path::new(relative).is_absolute() {
                PathBuf::from(relative)
            } else {
                root.join(relative)
            };
            let full = full.to_string_lossy();

            let paths = glob::glob(&full).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in paths {
                let path = entry.map_err(|source| ConfigError::ScanError { source })?;
                if path.is_file() {
                    files.insert(path);
                }
            }
        }
        Ok(files.into_iter().collect())
    }
}

/// JSON string literals are valid JavaScript string literals.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
