//! Named menus, set up once and shared read-only afterwards.
//!
//! Applications typically own one [`NavRegistry`] in their state and fill it
//! during startup; [`global`] offers a process-wide instance for code that
//! has nowhere to keep one. Tests build their own registries, or call
//! [`NavRegistry::reset`] between cases.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use tracing::debug;

use super::formatter::{Basic, MenuFormatter};
use super::{Builder, Menu, NavError};

pub const DEFAULT_MENU: &str = "default";

#[derive(Debug)]
pub struct NavRegistry {
    menus: HashMap<String, Arc<Menu>>,
    default_formatter: Arc<dyn MenuFormatter>,
}

impl NavRegistry {
    /// An empty registry rendering with [`Basic`] unless told otherwise.
    pub fn new() -> Self {
        Self::with_default_formatter(Arc::new(Basic))
    }

    pub fn with_default_formatter(formatter: Arc<dyn MenuFormatter>) -> Self {
        Self {
            menus: HashMap::new(),
            default_formatter: formatter,
        }
    }

    /// The formatter used by menus without an override of their own.
    pub fn default_formatter(&self) -> &Arc<dyn MenuFormatter> {
        &self.default_formatter
    }

    pub fn set_default_formatter(&mut self, formatter: Arc<dyn MenuFormatter>) {
        self.default_formatter = formatter;
    }

    /// Build a menu named `name`, freeze it and register it.
    ///
    /// Setting up a name twice replaces the earlier menu.
    pub fn setup<F>(&mut self, name: &str, build_fn: F) -> Result<Arc<Menu>, NavError>
    where
        F: FnOnce(&mut Builder),
    {
        self.setup_with_formatter(name, None, build_fn)
    }

    /// [`setup`](Self::setup) with a per-menu formatter override.
    pub fn setup_with_formatter<F>(
        &mut self,
        name: &str,
        formatter: Option<Arc<dyn MenuFormatter>>,
        build_fn: F,
    ) -> Result<Arc<Menu>, NavError>
    where
        F: FnOnce(&mut Builder),
    {
        let menu = Arc::new(Builder::new(name, formatter).build(build_fn)?);
        debug!(
            menu = %name,
            items = menu.items().len(),
            matchers = menu.matchers().count(),
            "menu set up"
        );
        self.register(Arc::clone(&menu));
        Ok(menu)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Menu>> {
        self.menus.get(name)
    }

    /// The menu registered as [`DEFAULT_MENU`].
    pub fn get_default(&self) -> Option<&Arc<Menu>> {
        self.get(DEFAULT_MENU)
    }

    /// Insert a menu under its own name.
    pub fn register(&mut self, menu: Arc<Menu>) {
        let name = menu.name().to_string();
        if let Some(previous) = self.menus.insert(name, menu) {
            debug!(menu = %previous.name(), "replaced existing menu");
        }
    }

    /// Remove every menu. The default formatter is kept.
    pub fn reset(&mut self) {
        debug!(menus = self.menus.len(), "registry reset");
        self.menus.clear();
    }

    /// Registered menu names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.menus.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

impl Default for NavRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry.
///
/// Writers are expected only during startup and in test teardown.
pub fn global() -> &'static RwLock<NavRegistry> {
    static REGISTRY: OnceLock<RwLock<NavRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(NavRegistry::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Subnav;

    #[test]
    fn setup_registers_the_menu() {
        let mut registry = NavRegistry::new();
        assert!(registry.get("test").is_none());
        registry.setup("test", |_| {}).unwrap();
        assert_eq!(registry.get("test").unwrap().name(), "test");
    }

    #[test]
    fn setup_returns_the_registered_menu() {
        let mut registry = NavRegistry::new();
        let menu = registry
            .setup("test", |nav| {
                nav.add("home", "Home");
            })
            .unwrap();
        assert!(Arc::ptr_eq(&menu, registry.get("test").unwrap()));
    }

    #[test]
    fn registered_menu_is_frozen() {
        let mut registry = NavRegistry::new();
        let mut menu = registry
            .setup("test", |nav| {
                nav.add("home", "Home");
            })
            .unwrap();
        // Shared with the registry, so no mutable access can be obtained.
        assert!(Arc::get_mut(&mut menu).is_none());
    }

    #[test]
    fn setup_twice_replaces() {
        let mut registry = NavRegistry::new();
        registry
            .setup("test", |nav| {
                nav.add("old", "Old");
            })
            .unwrap();
        registry
            .setup("test", |nav| {
                nav.add("new", "New");
            })
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("test").unwrap().items()[0].id(), "new");
    }

    #[test]
    fn failed_setup_registers_nothing() {
        let mut registry = NavRegistry::new();
        let result = registry.setup("test", |nav| {
            nav.add("dashboard", "Dashboard").active_on(["*/index"]);
        });
        assert!(result.is_err());
        assert!(registry.get("test").is_none());
    }

    #[test]
    fn get_unknown_is_none() {
        assert!(NavRegistry::new().get("missing").is_none());
    }

    #[test]
    fn get_default_uses_default_name() {
        let mut registry = NavRegistry::new();
        registry.setup(DEFAULT_MENU, |_| {}).unwrap();
        assert!(registry.get_default().is_some());
    }

    #[test]
    fn register_keys_by_menu_name() {
        let mut registry = NavRegistry::new();
        registry.register(Arc::new(Menu::new("manual")));
        assert!(registry.get("manual").is_some());
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut registry = NavRegistry::new();
        registry.setup("Main", |_| {}).unwrap();
        assert!(registry.get("main").is_none());
        assert!(registry.get("Main").is_some());
    }

    #[test]
    fn reset_empties_the_registry() {
        let mut registry = NavRegistry::new();
        registry.setup("test", |_| {}).unwrap();
        registry.setup("other", |_| {}).unwrap();
        registry.reset();
        assert!(registry.get("test").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn reset_keeps_default_formatter() {
        let subnav: Arc<dyn MenuFormatter> = Arc::new(Subnav);
        let mut registry = NavRegistry::with_default_formatter(subnav.clone());
        registry.reset();
        assert!(Arc::ptr_eq(registry.default_formatter(), &subnav));
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = NavRegistry::new();
        registry.setup("b", |_| {}).unwrap();
        registry.setup("a", |_| {}).unwrap();
        assert_eq!(registry.names(), ["a", "b"]);
    }

    #[test]
    fn global_registry_is_shared() {
        let name = "registry-global-test";
        global()
            .write()
            .unwrap()
            .setup(name, |nav| {
                nav.add("home", "Home");
            })
            .unwrap();
        assert!(global().read().unwrap().get(name).is_some());
    }
}
