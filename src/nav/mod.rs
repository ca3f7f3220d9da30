//! Navigation menus: declare once at startup, render per request.
//!
//! | Piece | Role |
//! |---|---|
//! | [`Item`] | One tab/link: id, label, optional title, URL, resource verb, guard |
//! | [`ItemMatcher`] | Binds an item to a `controller/action` pattern for active-item detection |
//! | [`Menu`] | Ordered items plus matchers bucketed by [`Specificity`] |
//! | [`Builder`] / [`ItemBuilder`] | Fluent DSL used inside [`NavRegistry::setup`] |
//! | [`NavRegistry`] | Named menus, frozen behind `Arc` once registered |
//! | [`MenuFormatter`] | Turns a [`MenuView`] into `<ul>` markup ([`Basic`], [`HasRight`], [`Subnav`]) |
//! | [`display_navigation`] | The view-helper entrypoint templates call |
//!
//! ```
//! use kin_nav::context::RequestContext;
//! use kin_nav::nav::{NavOptions, NavRegistry, display_navigation};
//!
//! let mut registry = NavRegistry::new();
//! registry
//!     .setup("default", |nav| {
//!         nav.add("home", "Home").url("/").active_on(["home/*"]);
//!         nav.add("admin", "Admin").url("/admin").guard("admin");
//!     })
//!     .unwrap();
//!
//! let ctx = RequestContext::new("home", "index");
//! let html = display_navigation(&registry, "default", &ctx, &NavOptions::new())
//!     .unwrap()
//!     .unwrap();
//! assert!(html.contains(r#"<li id="nav_home" class="active">"#));
//! assert!(!html.contains("nav_admin"));
//! ```

mod builder;
mod formatter;
mod helper;
mod item;
mod matcher;
mod menu;
mod registry;

pub use builder::{Builder, ItemBuilder};
pub use formatter::{Basic, HasRight, MenuFormatter, MenuView, Subnav, by_name, has_right};
pub use helper::{NavOptions, display_navigation};
pub use item::{Guards, Item};
pub use matcher::{ItemMatcher, Specificity};
pub use menu::Menu;
pub use registry::{DEFAULT_MENU, NavRegistry, global};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("nav item {item:?} expected a resource to generate a URL, and none was given")]
    MissingResource { item: String },
    #[error("invalid active match {pattern:?}: {reason}")]
    InvalidMatcher { pattern: String, reason: String },
}
