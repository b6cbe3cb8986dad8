//! Configuration types for gigil.
//!
//! [`Config::load`] layers `~/.config/gigil/config.toml` and `GIGIL_*`
//! environment variables over the embedded defaults. [`Config::defaults`]
//! returns the same defaults without touching the filesystem or environment
//! (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[cms]
base_url           = "http://localhost:1337/api"
api_suffix         = "/api"
blog_endpoint      = ""
timeout_ms         = 15000
image_placeholder  = "/images/blog/placeholder.jpg"
avatar_placeholder = "/images/blog/avatar-placeholder.jpg"

[gifting]
base_url   = "http://localhost:3001/api"
timeout_ms = 10000
"#;

/// Prefix for environment overrides, e.g. `GIGIL_CMS__BLOG_ENDPOINT`.
const ENV_PREFIX: &str = "GIGIL";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub gifting: GiftingConfig,
}

/// `[cms]` section: where blog content comes from.
#[derive(Debug, Clone, Deserialize)]
pub struct CmsConfig {
    /// CMS REST root, including its API suffix.
    #[serde(default = "default_cms_base_url")]
    pub base_url: String,
    /// Path suffix stripped from `base_url` to get the media origin.
    #[serde(default = "default_api_suffix")]
    pub api_suffix: String,
    /// Collection name override. Empty means "discover by probing".
    #[serde(default)]
    pub blog_endpoint: String,
    #[serde(default = "default_cms_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_image_placeholder")]
    pub image_placeholder: String,
    #[serde(default = "default_avatar_placeholder")]
    pub avatar_placeholder: String,
}

fn default_cms_base_url() -> String { "http://localhost:1337/api".to_string() }
fn default_api_suffix() -> String { "/api".to_string() }
fn default_cms_timeout_ms() -> u64 { 15_000 }
fn default_image_placeholder() -> String { "/images/blog/placeholder.jpg".to_string() }
fn default_avatar_placeholder() -> String { "/images/blog/avatar-placeholder.jpg".to_string() }

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: default_cms_base_url(),
            api_suffix: default_api_suffix(),
            blog_endpoint: String::new(),
            timeout_ms: default_cms_timeout_ms(),
            image_placeholder: default_image_placeholder(),
            avatar_placeholder: default_avatar_placeholder(),
        }
    }
}

impl CmsConfig {
    /// The configured collection name, if one was set to something other than
    /// whitespace.
    pub fn explicit_endpoint(&self) -> Option<&str> {
        let trimmed = self.blog_endpoint.trim().trim_matches('/');
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Origin that relative media paths are resolved against.
    ///
    /// `http://host:1337/api` with suffix `/api` gives `http://host:1337`. A
    /// base URL that does not end in the suffix is returned without its
    /// trailing slash.
    pub fn media_origin(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let suffix = self.api_suffix.trim_end_matches('/');
        if suffix.is_empty() {
            return base.to_string();
        }
        base.strip_suffix(suffix).unwrap_or(base).to_string()
    }
}

/// `[gifting]` section: the gift/gift-list CRUD service.
#[derive(Debug, Clone, Deserialize)]
pub struct GiftingConfig {
    #[serde(default = "default_gifting_base_url")]
    pub base_url: String,
    #[serde(default = "default_gifting_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_gifting_base_url() -> String { "http://localhost:3001/api".to_string() }
fn default_gifting_timeout_ms() -> u64 { 10_000 }

impl Default for GiftingConfig {
    fn default() -> Self {
        Self {
            base_url: default_gifting_base_url(),
            timeout_ms: default_gifting_timeout_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/gigil/config.toml` and the environment, layered on
    /// top of the built-in defaults. A missing file is not an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Like [`Config::load`] but reads the file layer from `path`.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Layer a TOML document over the built-in defaults. Ignores the
    /// environment.
    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("gigil")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
