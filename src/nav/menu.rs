//! A named, ordered navigation menu.

use std::sync::Arc;

use super::formatter::MenuFormatter;
use super::matcher::{ItemMatcher, Specificity};
use super::{Item, NavError};
use crate::context::ControllerContext;

/// Items in render order plus the rules deciding which one is active.
///
/// Build menus with [`NavRegistry::setup`](super::NavRegistry::setup) rather
/// than by hand; the registry wraps them in an `Arc`, after which neither the
/// item list nor the matchers can change.
#[derive(Debug, Clone)]
pub struct Menu {
    name: String,
    items: Vec<Item>,
    specific: Vec<ItemMatcher>,
    controller: Vec<ItemMatcher>,
    generic: Vec<ItemMatcher>,
    formatter: Option<Arc<dyn MenuFormatter>>,
}

impl Menu {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            specific: Vec::new(),
            controller: Vec::new(),
            generic: Vec::new(),
            formatter: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub(super) fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(super) fn set_formatter(&mut self, formatter: Option<Arc<dyn MenuFormatter>>) {
        self.formatter = formatter;
    }

    /// Parse `pattern` and file the resulting matcher under its tier.
    pub fn add_active_match(
        &mut self,
        pattern: &str,
        item: &Item,
    ) -> Result<&ItemMatcher, NavError> {
        let matcher = ItemMatcher::new(pattern, item.id())?;
        let bucket = match matcher.specificity() {
            Specificity::Specific => &mut self.specific,
            Specificity::Controller => &mut self.controller,
            Specificity::Generic => &mut self.generic,
        };
        bucket.push(matcher);
        Ok(&bucket[bucket.len() - 1])
    }

    /// All matchers in evaluation order: specific, controller, generic.
    pub fn matchers(&self) -> impl Iterator<Item = &ItemMatcher> {
        self.specific
            .iter()
            .chain(&self.controller)
            .chain(&self.generic)
    }

    /// Id of the item the current request activates, if any.
    ///
    /// A matcher for a specific action beats one for the whole controller,
    /// which beats a catch-all, whatever order they were declared in. Within
    /// a tier the first declared matcher wins.
    pub fn active_item(&self, context: &dyn ControllerContext) -> Option<&str> {
        self.matchers()
            .find(|m| m.matches(context))
            .map(ItemMatcher::item_id)
    }

    /// The per-menu formatter override, if one was given at setup.
    pub fn formatter_override(&self) -> Option<&Arc<dyn MenuFormatter>> {
        self.formatter.as_ref()
    }

    /// The formatter this menu renders with: its own override, else `default`.
    pub fn formatter<'a>(
        &'a self,
        default: &'a Arc<dyn MenuFormatter>,
    ) -> &'a Arc<dyn MenuFormatter> {
        self.formatter.as_ref().unwrap_or(default)
    }
}
