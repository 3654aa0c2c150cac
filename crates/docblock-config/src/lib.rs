mod theme;

pub use theme::{DEFAULT_COLOR_TOKENS, DarkMode, ThemeConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid content pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to scan content path: {source}")]
    ScanError { source: glob::GlobError },
}

/// How blocks are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Run rendered HTML through the allowlist sanitizer.
    pub sanitize: bool,
    /// Let raw HTML written in the markup through to the output. When off,
    /// Markdown escapes it and AsciiDoc output is sanitized.
    pub raw_html: bool,
    /// Enable GitHub-flavoured Markdown extensions.
    pub gfm: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            sanitize: false,
            raw_html: true,
            gfm: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderSettings,
    pub theme: ThemeConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load from `config_path` if given, else the default location, falling
    /// back to defaults when no file exists.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match config_path {
            Some(path) => Self::load_from_path(Self::expand_path(path).as_deref().unwrap_or(path))?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/docblock");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/docblock/config.toml"));
    }

    #[test]
    fn test_default_render_settings_match_site() {
        let settings = RenderSettings::default();

        assert!(!settings.sanitize);
        assert!(settings.raw_html);
        assert!(settings.gfm);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config_content = r#"
[render]
sanitize = true

[theme]
dark_mode = "class"
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert!(config.render.sanitize);
        assert!(config.render.gfm);
        assert_eq!(config.theme.dark_mode, Some(DarkMode::Class));
        assert_eq!(config.theme.content, ThemeConfig::default().content);
        assert_eq!(config.theme.colors.len(), 6);
    }

    #[test]
    fn test_theme_tokens_from_toml() {
        let config_content = r#"
[theme]
content = ["./pages/**/*.html"]

[theme.colors]
brand = "var(--color-brand)"

[theme.font_family]
mono = ["JetBrains Mono", "monospace"]
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.theme.content, vec!["./pages/**/*.html".to_string()]);
        assert_eq!(config.theme.colors.len(), 1);
        assert_eq!(config.theme.colors["brand"], ThemeConfig::color_var("brand"));
        assert!(config.theme.font_family.contains_key("mono"));
    }

    #[test]
    fn test_unknown_dark_mode_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[theme]\ndark_mode = \"sometimes\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let config = Config::load_or_default(Some(&missing)).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_expands_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("site.toml");
        std::fs::write(&config_file, "[render]\nsanitize = true\n").unwrap();
        unsafe {
            env::set_var("DOCBLOCK_TEST_CONFIG_DIR", temp_dir.path());
        }

        let config =
            Config::load_or_default(Some(Path::new("$DOCBLOCK_TEST_CONFIG_DIR/site.toml"))).unwrap();

        assert!(config.render.sanitize);
        unsafe {
            env::remove_var("DOCBLOCK_TEST_CONFIG_DIR");
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut test_config = Config::default();
        test_config.render.sanitize = true;
        test_config.theme.dark_mode = Some(DarkMode::Class);

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
