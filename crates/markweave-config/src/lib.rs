use log::debug;
use markweave_engine::{Options, RenderOptions};
use markweave_syntax::{ConstructName, ParseOptions};
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

    #[error("Unknown construct `{name}` in parse.disable")]
    UnknownConstruct { name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Enable tables, strikethrough, footnotes and literal autolinks.
    pub gfm: bool,
    /// Construct names to turn off, such as `code-indented`.
    pub disable: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub allow_dangerous_html: bool,
    pub footnote_label: Option<String>,
    pub footnote_back_label: Option<String>,
    pub clobber_prefix: Option<String>,
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

        debug!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
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

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markweave");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and environment variables in a path given on the command
    /// line or in the environment.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    pub fn to_options(&self) -> Result<Options, ConfigError> {
        let mut parse = if self.parse.gfm {
            ParseOptions::gfm()
        } else {
            ParseOptions::default()
        };
        for name in &self.parse.disable {
            let construct = ConstructName::from_name(name)
                .ok_or_else(|| ConfigError::UnknownConstruct { name: name.clone() })?;
            parse.disable.push(construct);
        }

        let render = RenderOptions {
            allow_dangerous_html: self.render.allow_dangerous_html,
            footnote_label: self.render.footnote_label.clone(),
            footnote_back_label: self.render.footnote_back_label.clone(),
            clobber_prefix: self.render.clobber_prefix.clone(),
            ..RenderOptions::default()
        };

        Ok(Options { parse, render })
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
        assert!(path_str.ends_with(".config/markweave/config.toml"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[parse]\ngfm = true\n").unwrap();

        assert!(config.parse.gfm);
        assert_eq!(config.parse.disable, Vec::<String>::new());
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            parse: ParseConfig {
                gfm: true,
                disable: vec!["code-indented".into()],
            },
            render: RenderConfig {
                allow_dangerous_html: true,
                footnote_label: Some("Notes".into()),
                ..RenderConfig::default()
            },
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("MARKWEAVE_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$MARKWEAVE_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("MARKWEAVE_TEST_VAR");
        }
    }

    #[test]
    fn test_to_options_maps_everything() {
        let config = Config {
            parse: ParseConfig {
                gfm: true,
                disable: vec!["code-indented".into()],
            },
            render: RenderConfig {
                allow_dangerous_html: true,
                clobber_prefix: Some("x-".into()),
                ..RenderConfig::default()
            },
        };

        let options = config.to_options().unwrap();

        assert_eq!(options.parse.extensions, ParseOptions::gfm().extensions);
        assert_eq!(options.parse.disable, vec![ConstructName::CodeIndented]);
        assert!(options.render.allow_dangerous_html);
        assert_eq!(options.render.clobber_prefix.as_deref(), Some("x-"));
    }

    #[test]
    fn test_unknown_construct_is_an_error() {
        let config = Config {
            parse: ParseConfig {
                gfm: false,
                disable: vec!["nope".into()],
            },
            ..Config::default()
        };

        let error = config.to_options().unwrap_err();
        assert!(matches!(error, ConfigError::UnknownConstruct { ref name } if name == "nope"));
    }

    #[test]
    fn test_load_from_nonexistent_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&config_path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let original = Config {
            parse: ParseConfig {
                gfm: true,
                disable: Vec::new(),
            },
            ..Config::default()
        };
        original.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "[parse\ngfm = ").unwrap();

        let result = Config::load_from_path(&config_path);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_loaded_config_renders() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[parse]\ngfm = true\n\n[render]\nallow_dangerous_html = true\n",
        )
        .unwrap();

        let options = Config::load_from_path(&config_path)
            .unwrap()
            .unwrap()
            .to_options()
            .unwrap();
        let html = markweave_engine::to_html("~~a~~\n\n<b>", &options).unwrap();

        assert_eq!(html, "<p><del>a</del></p>\n<b>");
    }
}
