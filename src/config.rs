//! Declarative menu configuration.
//!
//! Menus can be declared in code with [`NavRegistry::setup`] or, more
//! commonly, in a `navigation.toml` file loaded once after the application
//! boots. Each file is merged on top of the stock defaults (and on top of
//! the files before it when several are given), validated, and then every
//! menu in it is set up in a fresh registry.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Formatter for menus that don't name their own: "basic" or "subnav".
//! default_formatter = "basic"
//!
//! [[menus]]
//! name = "default"
//! formatter = "has_right"       # optional: basic | subnav | has_right
//! right_items = ["account"]     # has_right only
//!
//! [[menus.items]]
//! id = "home"
//! label = "Home"
//! url = "/"
//! active_on = ["home/*"]
//!
//! [[menus.items]]
//! id = "account"
//! label = "Your account"
//! title = "Settings and sign out"
//! resource = "edit"             # URL comes from the render-time resource
//! guard = "signed_in"           # shown only when the guard is true
//! ```
//!
//! ## Layering
//!
//! Later files override earlier ones key by key; tables merge, everything
//! else (including the `menus` array) is replaced wholesale:
//!
//! ```text
//! stock defaults  ←  navigation.toml  ←  navigation.local.toml
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::nav::{self, NavError, NavRegistry};

/// Conventional file name for menu configuration.
pub const NAV_CONFIG_FILE: &str = "navigation.toml";

const DEFAULT_FORMATTERS: &[&str] = &["basic", "subnav"];
const MENU_FORMATTERS: &[&str] = &["basic", "subnav", "has_right"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("menu {menu:?}: {source}")]
    Menu {
        menu: String,
        #[source]
        source: NavError,
    },
}

/// Top-level contents of `navigation.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Formatter for menus without their own.
    pub default_formatter: String,
    /// Menus in declaration order.
    pub menus: Vec<MenuConfig>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            default_formatter: "basic".to_string(),
            menus: Vec::new(),
        }
    }
}

/// One `[[menus]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    /// Item ids rendered as right-hand tabs by the `has_right` formatter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right_items: Vec<String>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// One `[[menus.items]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemConfig {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_on: Vec<String>,
}

impl NavConfig {
    /// Check names and formatter settings. Matcher patterns are checked when
    /// the menus are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DEFAULT_FORMATTERS.contains(&self.default_formatter.as_str()) {
            return Err(ConfigError::Validation(format!(
                "default_formatter must be one of {DEFAULT_FORMATTERS:?}, got {:?}",
                self.default_formatter
            )));
        }

        let mut seen = HashSet::new();
        for menu in &self.menus {
            if menu.name.trim().is_empty() {
                return Err(ConfigError::Validation("menu name must not be empty".into()));
            }
            if !seen.insert(menu.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "menu {:?} is defined more than once",
                    menu.name
                )));
            }
            menu.validate()?;
        }
        Ok(())
    }

    /// Set up every configured menu in a new registry.
    pub fn into_registry(&self) -> Result<NavRegistry, ConfigError> {
        self.validate()?;
        let default = nav::by_name(&self.default_formatter, &[]).ok_or_else(|| {
            ConfigError::Validation(format!(
                "unknown formatter {:?}",
                self.default_formatter
            ))
        })?;

        let mut registry = NavRegistry::with_default_formatter(default);
        for menu in &self.menus {
            menu.setup(&mut registry)?;
        }
        debug!(
            menus = registry.len(),
            default_formatter = %self.default_formatter,
            "navigation configured"
        );
        Ok(registry)
    }
}

impl MenuConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| ConfigError::Validation(format!("menu {:?}: {msg}", self.name));

        match self.formatter.as_deref() {
            Some(name) if !MENU_FORMATTERS.contains(&name) => {
                return Err(invalid(format!(
                    "formatter must be one of {MENU_FORMATTERS:?}, got {name:?}"
                )));
            }
            Some("has_right") if self.right_items.is_empty() => {
                return Err(invalid("has_right needs at least one right item".into()));
            }
            Some("has_right") => {}
            _ if !self.right_items.is_empty() => {
                return Err(invalid(
                    "right_items is only used with the has_right formatter".into(),
                ));
            }
            _ => {}
        }

        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(invalid("item id must not be empty".into()));
            }
        }
        Ok(())
    }

    fn setup(&self, registry: &mut NavRegistry) -> Result<(), ConfigError> {
        let formatter = self
            .formatter
            .as_deref()
            .and_then(|name| nav::by_name(name, &self.right_items));

        registry
            .setup_with_formatter(&self.name, formatter, |builder| {
                for item in &self.items {
                    let mut b = builder.add(&item.id, &item.label);
                    if let Some(title) = &item.title {
                        b = b.title(title);
                    }
                    if let Some(url) = &item.url {
                        b = b.url(url);
                    }
                    if let Some(verb) = &item.resource {
                        b = b.resource(verb);
                    }
                    if let Some(guard) = &item.guard {
                        b = b.guard(guard);
                    }
                    b.active_on(item.active_on.iter().cloned());
                }
            })
            .map_err(|source| ConfigError::Menu {
                menu: self.name.clone(),
                source,
            })?;
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user files are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(NavConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no navigation config file");
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded navigation config");
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<NavConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NavConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a single config file over the stock defaults.
///
/// A missing file yields the defaults (no menus).
pub fn load_config(path: &Path) -> Result<NavConfig, ConfigError> {
    load_layered(&[path])
}

/// Load several config files, each overriding the ones before it.
pub fn load_layered<P: AsRef<Path>>(paths: &[P]) -> Result<NavConfig, ConfigError> {
    let mut merged = stock_defaults_value();
    for path in paths {
        if let Some(layer) = load_raw_config(path.as_ref())? {
            merged = merge_toml(merged, layer);
        }
    }
    resolve_config(merged, None)
}

/// Returns a fully-commented stock `navigation.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Navigation Configuration
# ========================
# Menus declared here are set up once at startup and rendered per request
# with `display_navigation(name, context, options)`.
#
# Several files can be layered (e.g. navigation.toml then
# navigation.local.toml); later files override earlier ones key by key.
# Unknown keys will cause an error.

# Formatter used by menus that don't name their own.
# One of: "basic", "subnav".
default_formatter = "basic"

# ---------------------------------------------------------------------------
# Menus
# ---------------------------------------------------------------------------
# Each [[menus]] entry is one named menu. Items render in the order listed.
#
# formatter:   optional per-menu override ("basic", "subnav", "has_right")
# right_items: item ids drawn as right-hand tabs (has_right only)

[[menus]]
name = "default"
formatter = "has_right"
right_items = ["account"]

# Item keys:
#   id         unique key; rendered as <li id="nav_{id}">
#   label      link text; %s placeholders are filled by content injection
#   title      rollover title (defaults to the label)
#   url        static URL
#   resource   RESTful verb; the URL comes from the render-time resource
#              ("show" links to the resource itself)
#   guard      only show the item when this guard is true at render time
#   active_on  "controller/action" patterns marking the item active:
#              "users/show", "users/{index,show}", "users/*", "*"

[[menus.items]]
id = "home"
label = "Home"
url = "/"
active_on = ["home/*"]

[[menus.items]]
id = "comments"
label = "Comments (%s)"
url = "/comments"
active_on = ["comments/*"]

[[menus.items]]
id = "admin"
label = "Admin"
url = "/admin"
guard = "admin"
active_on = ["admin/*"]

[[menus.items]]
id = "account"
label = "Your account"
resource = "edit"
guard = "signed_in"
active_on = ["users/{edit,update}"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{RequestContext, RestResource};
    use crate::nav::{NavOptions, display_navigation};
    use tempfile::TempDir;

    fn parse(source: &str) -> NavConfig {
        resolve_config(stock_defaults_value(), Some(toml::from_str(source).unwrap())).unwrap()
    }

    #[test]
    fn default_config_is_empty_basic() {
        let config = NavConfig::default();
        assert_eq!(config.default_formatter, "basic");
        assert!(config.menus.is_empty());
    }

    #[test]
    fn parse_menu_with_items() {
        let config = parse(
            r#"
[[menus]]
name = "main"

[[menus.items]]
id = "home"
label = "Home"
url = "/"
active_on = ["home/*", "pages/{about,contact}"]
"#,
        );
        assert_eq!(config.default_formatter, "basic");
        assert_eq!(config.menus.len(), 1);
        let item = &config.menus[0].items[0];
        assert_eq!(item.id, "home");
        assert_eq!(item.url.as_deref(), Some("/"));
        assert_eq!(item.active_on, ["home/*", "pages/{about,contact}"]);
        assert_eq!(item.guard, None);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(NAV_CONFIG_FILE)).unwrap();
        assert_eq!(config, NavConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(NAV_CONFIG_FILE);
        fs::write(
            &path,
            r#"
default_formatter = "subnav"

[[menus]]
name = "tabs"
items = [{ id = "one", label = "One", url = "/1" }]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.default_formatter, "subnav");
        assert_eq!(config.menus[0].name, "tabs");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(NAV_CONFIG_FILE);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_layered_later_files_win() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join(NAV_CONFIG_FILE);
        let local = tmp.path().join("navigation.local.toml");
        fs::write(
            &base,
            r#"
[[menus]]
name = "main"
items = [{ id = "home", label = "Home" }]
"#,
        )
        .unwrap();
        fs::write(&local, r#"default_formatter = "subnav""#).unwrap();

        let config = load_layered(&[&base, &local]).unwrap();
        assert_eq!(config.default_formatter, "subnav");
        // Keys absent from the later layer are preserved.
        assert_eq!(config.menus[0].name, "main");
    }

    #[test]
    fn load_layered_skips_missing_layers() {
        let tmp = TempDir::new().unwrap();
        let config = load_layered(&[tmp.path().join("a.toml"), tmp.path().join("b.toml")]).unwrap();
        assert_eq!(config, NavConfig::default());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"default_formatter = "basic""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"default_formatter = "subnav""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["default_formatter"].as_str(), Some("subnav"));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let base: toml::Value = toml::from_str(
            r#"
[[menus]]
name = "a"
[[menus]]
name = "b"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[[menus]]
name = "c"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let menus = merged["menus"].as_array().unwrap();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0]["name"].as_str(), Some("c"));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str(r#"default_formater = "basic""#).unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_item_key_rejected() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[menus]]
name = "main"
items = [{ id = "home", label = "Home", href = "/" }]
"#,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn validate_unknown_default_formatter() {
        let config = NavConfig {
            default_formatter: "fancy".into(),
            ..NavConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_has_right_cannot_be_default() {
        let config = NavConfig {
            default_formatter: "has_right".into(),
            ..NavConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    fn menu(name: &str, formatter: Option<&str>, right_items: &[&str]) -> MenuConfig {
        MenuConfig {
            name: name.into(),
            formatter: formatter.map(String::from),
            right_items: right_items.iter().map(|s| s.to_string()).collect(),
            items: vec![],
        }
    }

    fn with_menus(menus: Vec<MenuConfig>) -> NavConfig {
        NavConfig {
            menus,
            ..NavConfig::default()
        }
    }

    #[test]
    fn validate_duplicate_menu_names() {
        let config = with_menus(vec![menu("main", None, &[]), menu("main", None, &[])]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn validate_empty_menu_name() {
        let config = with_menus(vec![menu(" ", None, &[])]);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_has_right_needs_right_items() {
        let config = with_menus(vec![menu("main", Some("has_right"), &[])]);
        assert!(config.validate().is_err());
        let config = with_menus(vec![menu("main", Some("has_right"), &["account"])]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_right_items_without_has_right() {
        let config = with_menus(vec![menu("main", Some("basic"), &["account"])]);
        assert!(config.validate().is_err());
        let config = with_menus(vec![menu("main", None, &["account"])]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_unknown_menu_formatter() {
        let config = with_menus(vec![menu("main", Some("tabs"), &[])]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_item_id() {
        let mut m = menu("main", None, &[]);
        m.items.push(ItemConfig {
            id: "".into(),
            label: "Nothing".into(),
            title: None,
            url: None,
            resource: None,
            guard: None,
            active_on: vec![],
        });
        assert!(with_menus(vec![m]).validate().is_err());
    }

    // =========================================================================
    // Registry construction
    // =========================================================================

    #[test]
    fn stock_config_parses_and_builds() {
        let overlay: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config, parse(stock_config_toml()));

        let registry = config.into_registry().unwrap();
        let menu = registry.get("default").unwrap();
        let ids: Vec<&str> = menu.items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["home", "comments", "admin", "account"]);
        assert_eq!(registry.default_formatter().name(), "basic");
        assert_eq!(
            menu.formatter_override().unwrap().name(),
            "has_right(account)"
        );
    }

    #[test]
    fn stock_config_renders() {
        let registry = parse(stock_config_toml()).into_registry().unwrap();
        let user = RestResource::new("users", 7);
        let options = NavOptions::new()
            .inject("comments", "3")
            .guard("signed_in", true)
            .resource(&user);
        let ctx = RequestContext::new("users", "edit");
        let html = display_navigation(&registry, "default", &ctx, &options)
            .unwrap()
            .unwrap();

        assert!(html.contains(">Comments (3)</a>"));
        assert!(!html.contains("nav_admin"));
        assert!(html.contains(
            r#"<li id="nav_account" class="active"><span class="right_border"><span class="bg"><a href="/users/7/edit""#
        ));
    }

    #[test]
    fn into_registry_reports_bad_patterns() {
        let config = parse(
            r#"
[[menus]]
name = "main"
items = [{ id = "dashboard", label = "Dashboard", active_on = ["*/index"] }]
"#,
        );
        let err = config.into_registry().unwrap_err();
        match err {
            ConfigError::Menu { menu, source } => {
                assert_eq!(menu, "main");
                assert!(matches!(source, NavError::InvalidMatcher { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn into_registry_uses_default_formatter() {
        let config = parse(
            r#"
default_formatter = "subnav"

[[menus]]
name = "tabs"
items = [{ id = "one", label = "One" }]
"#,
        );
        let registry = config.into_registry().unwrap();
        assert_eq!(registry.default_formatter().name(), "subnav");
        assert!(registry.get("tabs").unwrap().formatter_override().is_none());
    }
}
