//! The DSL used to declare menus.
//!
//! ```
//! use kin_nav::nav::Builder;
//!
//! let menu = Builder::new("default", None)
//!     .build(|nav| {
//!         nav.add("home", "Home").url("/").active_on(["home/*"]);
//!         nav.add("profile", "Profile").resource("show").guard("signed_in");
//!     })
//!     .unwrap();
//! assert_eq!(menu.items().len(), 2);
//! ```

use std::sync::Arc;

use super::formatter::MenuFormatter;
use super::{Item, Menu, NavError};

/// Collects items and active matches, then produces a [`Menu`].
#[derive(Debug)]
pub struct Builder {
    menu: Menu,
    items: Vec<Item>,
    /// `(pattern, index into items)` in declaration order.
    active_on: Vec<(String, usize)>,
}

impl Builder {
    pub fn new(name: impl Into<String>, formatter: Option<Arc<dyn MenuFormatter>>) -> Self {
        let mut menu = Menu::new(name);
        menu.set_formatter(formatter);
        Self {
            menu,
            items: Vec::new(),
            active_on: Vec::new(),
        }
    }

    /// Append an item, returning a builder to configure it.
    ///
    /// Items render in the order they are added.
    pub fn add(&mut self, id: impl Into<String>, label: impl Into<String>) -> ItemBuilder<'_> {
        self.items.push(Item::new(id, label));
        let index = self.items.len() - 1;
        ItemBuilder {
            builder: self,
            index,
        }
    }

    /// Run `build_fn` against this builder and assemble the menu.
    ///
    /// Active-match patterns are parsed here, in the order they were
    /// declared, so a bad pattern fails the whole menu.
    pub fn build<F>(mut self, build_fn: F) -> Result<Menu, NavError>
    where
        F: FnOnce(&mut Builder),
    {
        build_fn(&mut self);

        let Builder {
            mut menu,
            items,
            active_on,
        } = self;
        for (pattern, index) in &active_on {
            menu.add_active_match(pattern, &items[*index])?;
        }
        for item in items {
            menu.push_item(item);
        }
        Ok(menu)
    }
}

/// Configures one item. Every setter returns the builder for chaining.
#[derive(Debug)]
pub struct ItemBuilder<'a> {
    builder: &'a mut Builder,
    index: usize,
}

impl ItemBuilder<'_> {
    fn item(&mut self) -> &mut Item {
        &mut self.builder.items[self.index]
    }

    /// Rollover title for the link. Defaults to the label.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.item().title = Some(title.into());
        self
    }

    /// Resource verb used to build the URL from the render-time resource.
    pub fn resource(mut self, verb: impl Into<String>) -> Self {
        self.item().resource = Some(verb.into());
        self
    }

    pub fn url(mut self, url: impl ToString) -> Self {
        self.item().url = Some(url.to_string());
        self
    }

    /// Only display the item when `guard` is true at render time.
    pub fn guard(mut self, guard: impl Into<String>) -> Self {
        self.item().guard = Some(guard.into());
        self
    }

    /// Mark the item active for each `controller/action` pattern.
    pub fn active_on<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = self.index;
        self.builder
            .active_on
            .extend(patterns.into_iter().map(|p| (p.into(), index)));
        self
    }
}
