//! Shared test utilities for the kin-nav test suite.
//!
//! Provides fixture menus mirroring the situations templates run into
//! (plain links, titles, injection, guards, resource URLs) and assertions
//! over rendered markup.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let menu = guarded_menu();
//! let ctx = RequestContext::new("home", "index");
//! let options = NavOptions::new();
//! let html = Basic.to_html(&MenuView::new(&menu, &ctx, &options))?.into_string();
//! assert_has_item(&html, "home");
//! assert_lacks_item(&html, "guard_one");
//! ```

use std::sync::Arc;

use crate::nav::{Menu, NavRegistry};

// =========================================================================
// Fixture menus
// =========================================================================

fn setup(build: impl FnOnce(&mut crate::nav::Builder)) -> Arc<Menu> {
    NavRegistry::new()
        .setup("test", build)
        .unwrap_or_else(|e| panic!("fixture menu failed to build: {e}"))
}

/// `home` (active on `home/*`) and `products` (active on `products/*`).
pub fn generic_menu() -> Arc<Menu> {
    setup(|nav| {
        nav.add("home", "Home").url("/").active_on(["home/*"]);
        nav.add("products", "Products")
            .url("/products")
            .active_on(["products/*"]);
    })
}

/// One item with an explicit title, one with a title and a placeholder, one
/// without a title.
pub fn title_menu() -> Arc<Menu> {
    setup(|nav| {
        nav.add("title", "Title").url("/").title("My item title");
        nav.add("inject_title", "Has %s")
            .url("/")
            .title("My item title");
        nav.add("no_title", "Has no title").url("/");
    })
}

/// `injection` takes one value, `pair` takes two.
pub fn injection_menu() -> Arc<Menu> {
    setup(|nav| {
        nav.add("injection", "Has %s injection").url("/");
        nav.add("pair", "Has %s %s").url("/");
    })
}

/// Guards `one`, `two` and `three` around two unguarded items.
pub fn guarded_menu() -> Arc<Menu> {
    setup(|nav| {
        nav.add("home", "Home").url("/");
        nav.add("guard_one", "One").url("/one").guard("one");
        nav.add("guard_two", "Two").url("/two").guard("two");
        nav.add("guard_three", "Three").url("/three").guard("three");
        nav.add("not_guarded", "Not guarded").url("/open");
    })
}

/// `resource` links to the `edit` form, `show_resource` to the member URL.
pub fn resource_menu() -> Arc<Menu> {
    setup(|nav| {
        nav.add("resource", "Edit").resource("edit");
        nav.add("show_resource", "View").resource("show");
    })
}

// =========================================================================
// Markup assertions
// =========================================================================

/// Assert the markup contains `<li id="nav_{id}"`.
pub fn assert_has_item(html: &str, id: &str) {
    assert!(
        html.contains(&format!(r#"<li id="nav_{id}""#)),
        "expected item '{id}' in:\n{html}"
    );
}

/// Assert the markup has no `<li id="nav_{id}"`.
pub fn assert_lacks_item(html: &str, id: &str) {
    assert!(
        !html.contains(&format!(r#"<li id="nav_{id}""#)),
        "did not expect item '{id}' in:\n{html}"
    );
}
