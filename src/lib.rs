//! # Kin Nav
//!
//! Declarative navigation menus for server-rendered web applications.
//! Menus are declared once at startup, either in code or in a
//! `navigation.toml` file, and rendered to HTML on every request.
//!
//! # Lifecycle: Declare, Freeze, Render
//!
//! ```text
//! 1. Declare  navigation.toml / Builder DSL  →  Menu        (items + matchers)
//! 2. Freeze   NavRegistry::setup             →  Arc<Menu>   (read-only from here on)
//! 3. Render   display_navigation(request)    →  <ul>…</ul>  (active item, guards, injection)
//! ```
//!
//! Everything that can go wrong with a declaration (a malformed matcher
//! pattern, an unknown formatter) fails at step 1 or 2, before any request is
//! served. Rendering only fails when an item needs a resource and the caller
//! didn't supply one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`nav`] | Items, matchers, menus, the setup DSL, the registry, and the formatters |
//! | [`config`] | `navigation.toml` loading, layering, validation, and registry construction |
//! | [`context`] | What a render needs to know about the request and the resource being viewed |
//! | [`html`] | Escaping for values injected into labels |
//! | [`output`] | CLI output formatting: menu listings and active-item reports |
//!
//! # Design Decisions
//!
//! ## Maud Over String Templates
//!
//! Markup is built with [Maud](https://maud.lambda.xyz/), so every formatter
//! is checked at compile time and attribute values are escaped on the way
//! out. Labels are author-controlled and may carry markup, so the link body
//! passes them through as pre-escaped, while the `title` attribute gets the
//! escaped text. Injected values come from the request and are escaped
//! exactly once when the view is built.
//!
//! ## Active Item by Specificity
//!
//! Each `active_on` pattern lands in one of three tiers. A request is matched
//! against every specific pattern first, then controller-wide ones, then
//! catch-alls, so a menu can say "Users is active for anything under
//! `users/*`, except `users/edit` which belongs to Account" without caring
//! about declaration order.
//!
//! ## Frozen Menus
//!
//! A registered menu is handed out as `Arc<Menu>` and nothing mutates it
//! afterwards. Redefining a name replaces the whole menu; renders already
//! holding the old one finish with it.

pub mod config;
pub mod context;
pub mod html;
pub mod nav;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
