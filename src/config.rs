//! Site configuration.
//!
//! Built once at startup from four layers, each overriding the previous one:
//!
//! ```text
//! stock defaults  →  <root>/config.toml  →  environment  →  CLI flags
//! ```
//!
//! The result is shared read-only with every request handler; nothing below
//! `main` reads the process environment.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! static_dir = "static"         # Photo root holding desktop/ and mobile/
//! bind = "127.0.0.1:5000"       # Listen address
//! development = false           # Enables /debug and pretty logs
//! redirect_not_found = true     # Unknown URLs redirect home instead of 404
//!
//! [site]
//! title = "Portfolio"
//! tagline = ""
//!
//! [contact]
//! form_action = "https://api.web3forms.com/submit"
//!
//! [theme]
//! background = "#0b0b0c"
//! text = "#f2f2f2"
//! text_muted = "#9a9a9a"
//! accent = "#d4af37"
//! ```
//!
//! Config files are sparse: override only the keys you need. Unknown keys are
//! rejected to catch typos early.
//!
//! ## Environment
//!
//! - `ACCESS_KEY`: contact form service key. Unset means empty. It is never
//!   read from `config.toml`, so it stays out of version control.
//! - `FOLIO_ENV=development`: same as `development = true`.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the contact form access key.
pub const ACCESS_KEY_VAR: &str = "ACCESS_KEY";
/// Environment variable selecting the run mode.
pub const ENV_VAR: &str = "FOLIO_ENV";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Photo root; variant directories live directly beneath it.
    pub static_dir: String,
    /// Socket address the server listens on.
    pub bind: String,
    /// Development mode: exposes `/debug`.
    pub development: bool,
    /// Redirect unmatched routes to `/` rather than answering 404.
    pub redirect_not_found: bool,
    pub site: SiteInfo,
    pub contact: ContactConfig,
    pub theme: ThemeConfig,
    /// Contact form access key. Environment only.
    #[serde(skip)]
    pub access_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
            bind: "127.0.0.1:5000".to_string(),
            development: false,
            redirect_not_found: true,
            site: SiteInfo::default(),
            contact: ContactConfig::default(),
            theme: ThemeConfig::default(),
            access_key: String::new(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.static_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "static_dir must not be empty".into(),
            ));
        }
        if self.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "bind must be a socket address like 127.0.0.1:5000, got {:?}",
                self.bind
            )));
        }
        let action = &self.contact.form_action;
        if !(action.starts_with("https://") || action.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "contact.form_action must be an http(s) URL".into(),
            ));
        }
        Ok(())
    }

    /// Listen address. Call after [`validate`](Self::validate).
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::Validation(format!("invalid bind address {:?}", self.bind)))
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Takes a lookup function rather than reading `std::env` so tests can
    /// feed a fixed environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.access_key = lookup(ACCESS_KEY_VAR).unwrap_or_default();
        if lookup(ENV_VAR).is_some_and(|v| v.eq_ignore_ascii_case("development")) {
            self.development = true;
        }
    }

    /// [`apply_env`](Self::apply_env) against the real process environment.
    pub fn apply_process_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    /// Access key summary that is safe to display.
    pub fn access_key_fingerprint(&self) -> KeyFingerprint {
        KeyFingerprint::of(&self.access_key)
    }
}

/// Identity of the site shown in page titles and the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    /// Shown under the title on the landing page. Empty hides it.
    pub tagline: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            tagline: String::new(),
        }
    }
}

/// Third-party form submission endpoint. The browser posts to it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub form_action: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_action: "https://api.web3forms.com/submit".to_string(),
        }
    }
}

/// Page colors, injected as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub background: String,
    pub text: String,
    /// Nav, captions, secondary labels.
    pub text_muted: String,
    /// Active filter button, hovered links.
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#0b0b0c".to_string(),
            text: "#f2f2f2".to_string(),
            text_muted: "#9a9a9a".to_string(),
            accent: "#d4af37".to_string(),
        }
    }
}

/// Masked view of a secret: whether it is set and a short SHA-256 prefix.
///
/// The prefix lets two deployments be compared without revealing the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFingerprint {
    pub set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl KeyFingerprint {
    pub fn of(secret: &str) -> Self {
        if secret.is_empty() {
            return Self {
                set: false,
                fingerprint: None,
            };
        }
        let digest = Sha256::digest(secret.as_bytes());
        let hex: String = digest[..4].iter().map(|b| format!("{b:02x}")).collect();
        Self {
            set: true,
            fingerprint: Some(format!("sha256:{hex}")),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Lay a sparse `config.toml` over the stock defaults.
///
/// `[site]`, `[contact]` and `[theme]` merge per key, so a file setting only
/// `theme.accent` keeps the default background. Scalars from the file win.
pub fn merge_toml(defaults: toml::Value, file: toml::Value) -> toml::Value {
    match (defaults, file) {
        (toml::Value::Table(mut merged), toml::Value::Table(file_table)) => {
            for (key, value) in file_table {
                let value = match merged.remove(&key) {
                    Some(default) => merge_toml(default, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, file) => file,
    }
}

/// The site's `config.toml`, parsed but not yet typed. `None` when the site
/// root has no config file.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = root.join("config.toml");
    match fs::read_to_string(&path) {
        Ok(text) => Ok(Some(toml::from_str(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load config from `config.toml` in `root`, on top of stock defaults.
///
/// Environment and CLI overrides are applied by the caller.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// CSS custom properties for the configured theme.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
}}"#,
        background = theme.background,
        text = theme.text,
        text_muted = theme.text_muted,
        accent = theme.accent,
    )
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-folio configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# The contact form access key is NOT configured here. Set it in the
# environment instead:  ACCESS_KEY=... photo-folio serve

# Photo root. Holds one directory per variant: desktop/ and mobile/.
static_dir = "static"

# Listen address.
bind = "127.0.0.1:5000"

# Development mode exposes /debug. Also enabled by FOLIO_ENV=development.
development = false

# Unknown URLs redirect to the landing page. Set to false for a plain 404.
redirect_not_found = true

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
# Shown under the title on the landing page.
tagline = ""

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# The browser posts the contact form here, with the access key attached.
form_action = "https://api.web3forms.com/submit"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[theme]
background = "#0b0b0c"
text = "#f2f2f2"
text_muted = "#9a9a9a"    # Nav, captions
accent = "#d4af37"        # Active filter, hovered links
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.bind, "127.0.0.1:5000");
        assert!(!config.development);
        assert!(config.redirect_not_found);
        assert!(config.access_key.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
static_dir = "public"

[theme]
accent = "#ff0000"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.theme.accent, "#ff0000");
        // Defaults preserved
        assert_eq!(config.theme.background, "#0b0b0c");
        assert_eq!(config.site.title, "Portfolio");
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("stattic_dir = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn access_key_not_accepted_from_toml() {
        let result: Result<SiteConfig, _> = toml::from_str("access_key = \"secret\"");
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.static_dir, defaults.static_dir);
        assert_eq!(config.bind, defaults.bind);
        assert_eq!(config.contact.form_action, defaults.contact.form_action);
        assert_eq!(config.theme.accent, defaults.theme.accent);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn invalid_bind_rejected() {
        let config = SiteConfig {
            bind: "localhost".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_static_dir_rejected() {
        let config = SiteConfig {
            static_dir: "  ".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_http_form_action_rejected() {
        let mut config = SiteConfig::default();
        config.contact.form_action = "javascript:alert(1)".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn load_config_merges_file_over_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
bind = "0.0.0.0:8080"

[site]
title = "Track Days"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.site.title, "Track Days");
        assert_eq!(config.site.tagline, "");
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "bind = \"nope\"").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn theme_override_keeps_other_colors() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[theme]\naccent = \"#00ff00\"").unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.theme.accent, "#00ff00");
        assert_eq!(config.theme.background, "#0b0b0c");
        assert_eq!(config.contact.form_action, "https://api.web3forms.com/submit");
    }

    #[test]
    fn missing_config_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn merge_toml_overrides_nested_keys_only() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    // =========================================================================
    // Environment
    // =========================================================================

    #[test]
    fn env_sets_access_key() {
        let mut config = SiteConfig::default();
        config.apply_env(env(&[("ACCESS_KEY", "abc-123")]));
        assert_eq!(config.access_key, "abc-123");
    }

    #[test]
    fn missing_access_key_is_empty() {
        let mut config = SiteConfig::default();
        config.apply_env(env(&[]));
        assert_eq!(config.access_key, "");
        assert!(!config.development);
    }

    #[test]
    fn env_enables_development() {
        let mut config = SiteConfig::default();
        config.apply_env(env(&[("FOLIO_ENV", "Development")]));
        assert!(config.development);
    }

    #[test]
    fn env_cannot_disable_configured_development() {
        let mut config = SiteConfig {
            development: true,
            ..SiteConfig::default()
        };
        config.apply_env(env(&[("FOLIO_ENV", "production")]));
        assert!(config.development);
    }

    // =========================================================================
    // Masking and CSS
    // =========================================================================

    #[test]
    fn fingerprint_hides_key() {
        let fp = KeyFingerprint::of("super-secret-key");
        assert!(fp.set);
        let shown = fp.fingerprint.unwrap();
        assert!(shown.starts_with("sha256:"));
        assert_eq!(shown.len(), "sha256:".len() + 8);
        assert!(!shown.contains("super-secret-key"));
    }

    #[test]
    fn fingerprint_of_empty_key() {
        assert_eq!(
            KeyFingerprint::of(""),
            KeyFingerprint {
                set: false,
                fingerprint: None
            }
        );
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(KeyFingerprint::of("k"), KeyFingerprint::of("k"));
        assert_ne!(KeyFingerprint::of("k1"), KeyFingerprint::of("k2"));
    }

    #[test]
    fn theme_css_uses_config_colors() {
        let theme = ThemeConfig {
            accent: "#123456".to_string(),
            ..ThemeConfig::default()
        };
        let css = generate_theme_css(&theme);
        assert!(css.contains("--color-accent: #123456"));
        assert!(css.contains("--color-bg: #0b0b0c"));
    }
}
