//! Configuration management for rstdoc.
//!
//! Parses `rstdoc.toml` with serde and discovers it in the current directory
//! or its parents. Paths in the file are relative to the file itself.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [convert]
//! source_dir = "docs"
//! output_dir = "markdown"
//! extensions = ["rst", "txt"]
//! preserve_references = true
//!
//! [optimize]
//! enabled = false
//! chunk_size = 1000
//! add_context_headers = true
//! simplify_structure = true
//! remove_redundancy = true
//! chunks = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `convert.source_dir`
//! - `convert.output_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override reference preservation.
    pub preserve_references: Option<bool>,
    /// Override the optimize pass.
    pub optimize: Option<bool>,
    /// Override chunk set output.
    pub chunks: Option<bool>,
    /// Override chunk word budget.
    pub chunk_size: Option<usize>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "rstdoc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings (paths are relative strings from TOML).
    convert: ConvertConfigRaw,
    /// Optimizer settings.
    pub optimize: OptimizeConfig,

    /// Resolved conversion settings (set after loading).
    #[serde(skip)]
    pub convert_resolved: ConvertConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw conversion configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConvertConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    extensions: Option<Vec<String>>,
    preserve_references: Option<bool>,
}

/// Resolved conversion configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ConvertConfig {
    /// Directory scanned for source documents.
    pub source_dir: PathBuf,
    /// Directory receiving `.md` files.
    pub output_dir: PathBuf,
    /// File extensions treated as source documents, without the dot.
    pub extensions: Vec<String>,
    /// Render `:doc:` and `:ref:` roles as links.
    pub preserve_references: bool,
}

impl ConvertConfig {
    /// Whether `path` carries one of the configured extensions.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn default_extensions() -> Vec<String> {
    vec!["rst".to_owned(), "txt".to_owned()]
}

/// Optimizer configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptimizeConfig {
    /// Run the optimize pass on converted output.
    pub enabled: bool,
    /// Word budget per chunk.
    pub chunk_size: usize,
    /// Insert breadcrumbs under deep headings.
    pub add_context_headers: bool,
    /// Clamp headings, collapse blank lines, drop empty headings.
    pub simplify_structure: bool,
    /// Collapse triple emphasis and self-referential links.
    pub remove_redundancy: bool,
    /// Also write `<name>.chunks.json` next to each converted file.
    pub chunks: bool,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            chunk_size: 1000,
            add_context_headers: true,
            simplify_structure: true,
            remove_redundancy: true,
            chunks: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`convert.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `rstdoc.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after path resolution and take precedence
    /// over file values. The merged result is validated.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.convert_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.convert_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(preserve) = settings.preserve_references {
            self.convert_resolved.preserve_references = preserve;
        }
        if let Some(enabled) = settings.optimize {
            self.optimize.enabled = enabled;
        }
        if let Some(chunks) = settings.chunks {
            self.optimize.chunks = chunks;
        }
        if let Some(chunk_size) = settings.chunk_size {
            self.optimize.chunk_size = chunk_size;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            convert: ConvertConfigRaw::default(),
            optimize: OptimizeConfig::default(),
            convert_resolved: ConvertConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("markdown"),
                extensions: default_extensions(),
                preserve_references: true,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expansion happens before paths are joined onto the config directory
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called by [`Config::load`] after CLI settings are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_convert()?;
        self.validate_optimize()?;
        Ok(())
    }

    fn validate_convert(&self) -> Result<(), ConfigError> {
        let extensions = &self.convert_resolved.extensions;
        if extensions.is_empty() {
            return Err(ConfigError::Validation(
                "convert.extensions must list at least one extension".to_owned(),
            ));
        }
        for ext in extensions {
            if ext.is_empty() {
                return Err(ConfigError::Validation(
                    "convert.extensions cannot contain empty values".to_owned(),
                ));
            }
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "convert.extensions entry \"{ext}\" must not start with a dot"
                )));
            }
        }
        Ok(())
    }

    fn validate_optimize(&self) -> Result<(), ConfigError> {
        if self.optimize.chunk_size == 0 {
            return Err(ConfigError::Validation(
                "optimize.chunk_size must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.convert.source_dir {
            self.convert.source_dir = Some(expand::expand_env(dir, "convert.source_dir")?);
        }
        if let Some(ref dir) = self.convert.output_dir {
            self.convert.output_dir = Some(expand::expand_env(dir, "convert.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.convert_resolved = ConvertConfig {
            source_dir: resolve(self.convert.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.convert.output_dir.as_deref(), "markdown"),
            extensions: self
                .convert
                .extensions
                .clone()
                .unwrap_or_else(default_extensions),
            preserve_references: self.convert.preserve_references.unwrap_or(true),
        };
    }
}
