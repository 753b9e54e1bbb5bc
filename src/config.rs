//! Site configuration.
//!
//! Every class name, selector, message and timing the behaviors rely on lives
//! in [`SiteConfig`]. The stock defaults describe the page structure the
//! behaviors were designed for; a site with different markup overrides only
//! the keys that differ.
//!
//! ## Where Configuration Comes From
//!
//! - **Browser**: an inline block in the page,
//!   `<script type="application/toml" id="sitewire-config">…</script>`, or the
//!   string passed to the exported `start_with_config`.
//! - **Native hosts and tests**: `sitewire.toml` in a directory, via
//!   [`load_config`], or any string via [`SiteConfig::from_toml_str`].
//!
//! Either way the user TOML is merged over [`stock_defaults_value`] key by key,
//! deserialized, and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! [navigation]
//! toggle = ".menu-toggle"
//! menu = ".nav-menu"
//! open_class = "active"
//!
//! [slideshow]
//! slides = ".hero-slide"
//! interval_ms = 5000
//! active_class = "active"
//!
//! [gallery]
//! filters = ".filter-btn"
//! items = ".gallery-item"
//! filter_attribute = "data-filter"
//! category_attribute = "data-category"
//! show_all = "all"
//! active_class = "active"
//!
//! [lightbox]
//! overlay = ".lightbox"
//! image = ".lightbox img"
//! close = ".lightbox-close"
//! thumbnails = ".gallery-item img"
//! cancel_key = "Escape"
//! open_class = "active"
//!
//! [faq]
//! items = ".faq-item"
//! question = ".faq-question"
//! answer = ".faq-answer"
//! open_class = "active"
//!
//! [contact]
//! form = ".contact-form form"
//! required = ["name", "email", "phone", "message"]
//! error_color = "#e53e3e"
//!
//! [anchors]
//! links = 'a[href^="#"]'
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::behaviors::contact_form::Field;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "sitewire.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration for every behavior plus logging.
///
/// All fields have defaults matching the stock page markup. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Mobile menu toggle.
    pub navigation: NavigationConfig,
    /// Hero slideshow.
    pub slideshow: SlideshowConfig,
    /// Gallery category filter.
    pub gallery: GalleryConfig,
    /// Image overlay.
    pub lightbox: LightboxConfig,
    /// FAQ accordion.
    pub faq: FaqConfig,
    /// Contact form validation.
    pub contact: ContactConfig,
    /// In-page anchor smooth scrolling.
    pub anchors: AnchorsConfig,
    /// Log verbosity.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    pub toggle: String,
    pub menu: String,
    /// Class marking the menu as open.
    pub open_class: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            toggle: ".menu-toggle".to_string(),
            menu: ".nav-menu".to_string(),
            open_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowConfig {
    pub slides: String,
    /// Milliseconds between advances. Must be non-zero.
    pub interval_ms: u64,
    pub active_class: String,
}

impl SlideshowConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slides: ".hero-slide".to_string(),
            interval_ms: 5000,
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub filters: String,
    pub items: String,
    /// Attribute on a filter control naming the tag it selects.
    pub filter_attribute: String,
    /// Attribute on a gallery entry naming its category.
    pub category_attribute: String,
    /// Tag that shows every entry.
    pub show_all: String,
    pub active_class: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            filters: ".filter-btn".to_string(),
            items: ".gallery-item".to_string(),
            filter_attribute: "data-filter".to_string(),
            category_attribute: "data-category".to_string(),
            show_all: "all".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    pub overlay: String,
    /// The shared full-size image inside the overlay.
    pub image: String,
    /// Optional explicit close control.
    pub close: String,
    pub thumbnails: String,
    /// `KeyboardEvent.key` value that dismisses the overlay.
    pub cancel_key: String,
    pub open_class: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            overlay: ".lightbox".to_string(),
            image: ".lightbox img".to_string(),
            close: ".lightbox-close".to_string(),
            thumbnails: ".gallery-item img".to_string(),
            cancel_key: "Escape".to_string(),
            open_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaqConfig {
    pub items: String,
    /// Looked up inside each item.
    pub question: String,
    /// Looked up inside each item.
    pub answer: String,
    pub open_class: String,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            items: ".faq-item".to_string(),
            question: ".faq-question".to_string(),
            answer: ".faq-answer".to_string(),
            open_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub form: String,
    /// Fields that must be non-blank when present in the form.
    pub required: Vec<Field>,
    /// Border color applied to invalid fields.
    pub error_color: String,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form: ".contact-form form".to_string(),
            required: Field::ALL.to_vec(),
            error_color: "#e53e3e".to_string(),
            success_message:
                "Thank you for your message! We will get back to you within 24 hours.".to_string(),
            failure_message: "Please fill in all required fields correctly.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorsConfig {
    pub links: String,
}

impl Default for AnchorsConfig {
    fn default() -> Self {
        Self {
            links: r##"a[href^="#"]"##.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"sitewire=debug"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate selectors are present, class names are single tokens, timings are non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let selectors = [
            ("navigation.toggle", &self.navigation.toggle),
            ("navigation.menu", &self.navigation.menu),
            ("slideshow.slides", &self.slideshow.slides),
            ("gallery.filters", &self.gallery.filters),
            ("gallery.items", &self.gallery.items),
            ("lightbox.overlay", &self.lightbox.overlay),
            ("lightbox.image", &self.lightbox.image),
            ("lightbox.close", &self.lightbox.close),
            ("lightbox.thumbnails", &self.lightbox.thumbnails),
            ("faq.items", &self.faq.items),
            ("faq.question", &self.faq.question),
            ("faq.answer", &self.faq.answer),
            ("contact.form", &self.contact.form),
            ("anchors.links", &self.anchors.links),
        ];
        // Syntax is checked by the page that runs the query.
        for (key, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }

        let tokens = [
            ("navigation.open_class", &self.navigation.open_class),
            ("slideshow.active_class", &self.slideshow.active_class),
            ("gallery.filter_attribute", &self.gallery.filter_attribute),
            ("gallery.category_attribute", &self.gallery.category_attribute),
            ("gallery.active_class", &self.gallery.active_class),
            ("lightbox.cancel_key", &self.lightbox.cancel_key),
            ("lightbox.open_class", &self.lightbox.open_class),
            ("faq.open_class", &self.faq.open_class),
        ];
        for (key, value) in tokens {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be non-empty and contain no whitespace"
                )));
            }
        }

        if self.contact.error_color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "contact.error_color must not be empty".into(),
            ));
        }
        if self.slideshow.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "slideshow.interval_ms must be non-zero".into(),
            ));
        }
        tracing_subscriber::EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::Validation(format!("logging.level {:?}: {e}", self.logging.level))
        })?;
        Ok(())
    }

    /// Parse a user TOML document, merged over the stock defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let overlay: toml::Value = toml::from_str(content)?;
        resolve_config(stock_defaults_value(), Some(overlay))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load [`CONFIG_FILE`] from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from [`CONFIG_FILE`] in the given directory, falling back to
/// stock defaults when there is none.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `sitewire.toml` with every key.
pub fn stock_config_toml() -> &'static str {
    r##"# sitewire configuration
# ======================
# All settings are optional. Values shown below are the defaults.
# Override only the keys whose markup differs on your site.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Mobile navigation toggle
# ---------------------------------------------------------------------------
[navigation]
toggle = ".menu-toggle"
menu = ".nav-menu"
# Class added to the menu while it is open.
open_class = "active"

# ---------------------------------------------------------------------------
# Hero slideshow
# ---------------------------------------------------------------------------
[slideshow]
slides = ".hero-slide"
# Milliseconds between slides. The first advance happens one interval after load.
interval_ms = 5000
active_class = "active"

# ---------------------------------------------------------------------------
# Gallery filter
# ---------------------------------------------------------------------------
[gallery]
filters = ".filter-btn"
items = ".gallery-item"
filter_attribute = "data-filter"
category_attribute = "data-category"
# Filter tag that shows every gallery entry.
show_all = "all"
active_class = "active"

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
overlay = ".lightbox"
image = ".lightbox img"
# Optional; backdrop click and the cancel key close the overlay regardless.
close = ".lightbox-close"
thumbnails = ".gallery-item img"
cancel_key = "Escape"
open_class = "active"

# ---------------------------------------------------------------------------
# FAQ accordion
# ---------------------------------------------------------------------------
[faq]
items = ".faq-item"
# Question and answer are looked up inside each item.
question = ".faq-question"
answer = ".faq-answer"
open_class = "active"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
form = ".contact-form form"
# Any of: name, email, phone, message.
required = ["name", "email", "phone", "message"]
error_color = "#e53e3e"
success_message = "Thank you for your message! We will get back to you within 24 hours."
failure_message = "Please fill in all required fields correctly."

# ---------------------------------------------------------------------------
# In-page anchor smooth scrolling
# ---------------------------------------------------------------------------
[anchors]
links = 'a[href^="#"]'

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[logging]
# tracing filter directive, e.g. "debug" or "sitewire=debug,warn".
level = "info"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_stock_markup() {
        let config = SiteConfig::default();
        assert_eq!(config.navigation.toggle, ".menu-toggle");
        assert_eq!(config.slideshow.interval(), Duration::from_millis(5000));
        assert_eq!(config.gallery.show_all, "all");
        assert_eq!(config.lightbox.cancel_key, "Escape");
        assert_eq!(config.contact.required, Field::ALL.to_vec());
        assert_eq!(config.anchors.links, r##"a[href^="#"]"##);
    }

    #[test]
    fn parse_partial_config() {
        let config = SiteConfig::from_toml_str(
            r#"
[slideshow]
interval_ms = 8000
"#,
        )
        .unwrap();
        assert_eq!(config.slideshow.interval_ms, 8000);
        // Defaults preserved
        assert_eq!(config.slideshow.slides, ".hero-slide");
        assert_eq!(config.faq, FaqConfig::default());
    }

    #[test]
    fn required_fields_parse_lowercase() {
        let config = SiteConfig::from_toml_str(
            r#"
[contact]
required = ["name", "email"]
"#,
        )
        .unwrap();
        assert_eq!(config.contact.required, vec![Field::Name, Field::Email]);
    }

    #[test]
    fn unknown_required_field_rejected() {
        let result = SiteConfig::from_toml_str(
            r#"
[contact]
required = ["fax"]
"#,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_overlay_is_default() {
        assert_eq!(SiteConfig::from_toml_str("").unwrap(), SiteConfig::default());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r##"
[navigation]
toggle = "#burger"
open_class = "is-open"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.navigation.toggle, "#burger");
        assert_eq!(config.navigation.open_class, "is-open");
        // Unspecified values should be defaults
        assert_eq!(config.navigation.menu, ".nav-menu");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[slideshow]
interval_ms = 0
"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[faq]
items = ".faq-item"
open_class = "active"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[faq]
open_class = "open"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let faq = merged.get("faq").unwrap();
        assert_eq!(faq.get("open_class").unwrap().as_str(), Some("open"));
        assert_eq!(faq.get("items").unwrap().as_str(), Some(".faq-item"));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let overlay: toml::Value = toml::from_str(
            r#"
[contact]
required = ["message"]
"#,
        )
        .unwrap();
        let merged = merge_toml(stock_defaults_value(), overlay);
        let required = merged["contact"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result = SiteConfig::from_toml_str(
            r#"
[slideshow]
intervl_ms = 100
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        assert!(SiteConfig::from_toml_str("[carousel]\nslides = \".x\"\n").is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_selector() {
        let mut config = SiteConfig::default();
        config.gallery.items = "  ".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("gallery.items"));
    }

    #[test]
    fn browser_only_selectors_accepted() {
        let config = SiteConfig::from_toml_str(
            r#"
[navigation]
toggle = "header > .menu-toggle"
menu = ".nav-menu, .mobile-menu"

[anchors]
links = "a:not(.no-scroll)"
"#,
        )
        .unwrap();
        assert_eq!(config.navigation.toggle, "header > .menu-toggle");
        assert_eq!(config.navigation.menu, ".nav-menu, .mobile-menu");
        assert_eq!(config.anchors.links, "a:not(.no-scroll)");
    }

    #[test]
    fn validate_rejects_class_with_whitespace() {
        let mut config = SiteConfig::default();
        config.faq.open_class = "is open".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("faq.open_class"));
    }

    #[test]
    fn validate_rejects_empty_cancel_key() {
        let mut config = SiteConfig::default();
        config.lightbox.cancel_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_log_filter() {
        let mut config = SiteConfig::default();
        config.logging.level = "sitewire=loud".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("logging.level"));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[lightbox]
cancel_key = "q"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.lightbox.cancel_key, "q");
        assert_eq!(config.lightbox.overlay, ".lightbox");
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        let val = stock_defaults_value();
        for section in val.as_table().unwrap().keys() {
            assert!(
                content.contains(&format!("[{section}]")),
                "stock config is missing [{section}]"
            );
        }
    }
}
