//! CLI output formatting.
//!
//! Output is **menu-centric**: each menu is listed with its items in render
//! order, and every item shows where it links and what hides it as indented
//! context lines. Matchers follow in the order they are evaluated, so the
//! listing doubles as an explanation of which item a request activates.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! default (has_right(account))
//!     001 home: Home
//!         URL: /
//!     002 account: Your account
//!         Resource: edit
//!         Guard: signed_in
//!     Matchers
//!         specific    users/{edit,update} → account
//!         controller  home/* → home
//! ```
//!
//! ## Active
//!
//! ```text
//! default: users/edit → account
//! tabs: users/edit → (none)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::context::ControllerContext;
use crate::nav::{Item, Menu, MenuFormatter, NavRegistry, Specificity};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn tier(specificity: Specificity) -> &'static str {
    match specificity {
        Specificity::Specific => "specific",
        Specificity::Controller => "controller",
        Specificity::Generic => "generic",
    }
}

/// Item header plus indented `URL:`/`Resource:`/`Title:`/`Guard:` lines.
fn item_lines(index: usize, item: &Item) -> Vec<String> {
    let mut lines = vec![format!(
        "{}{} {}: {}",
        indent(1),
        format_index(index),
        item.id(),
        item.label(None)
    )];
    let detail = indent(2);
    if let Some(url) = item.static_url() {
        lines.push(format!("{detail}URL: {url}"));
    }
    if let Some(verb) = item.resource() {
        lines.push(format!("{detail}Resource: {verb}"));
    }
    let title = item.title(None);
    if title != item.label(None) {
        lines.push(format!("{detail}Title: {title}"));
    }
    if let Some(guard) = item.guard() {
        lines.push(format!("{detail}Guard: {guard}"));
    }
    lines
}

// ============================================================================
// List
// ============================================================================

/// Format one menu: header, items, then matchers in evaluation order.
pub fn format_menu(menu: &Menu, formatter: &dyn MenuFormatter) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", menu.name(), formatter.name())];
    for (i, item) in menu.items().iter().enumerate() {
        lines.extend(item_lines(i + 1, item));
    }

    let mut matchers = menu.matchers().peekable();
    if matchers.peek().is_some() {
        lines.push(format!("{}Matchers", indent(1)));
        for matcher in matchers {
            lines.push(format!(
                "{}{:<11} {} → {}",
                indent(2),
                tier(matcher.specificity()),
                matcher,
                matcher.item_id()
            ));
        }
    }
    lines
}

/// Format every registered menu, sorted by name, separated by blank lines.
pub fn format_registry(registry: &NavRegistry) -> Vec<String> {
    let mut lines = Vec::new();
    for name in registry.names() {
        let Some(menu) = registry.get(name) else {
            continue;
        };
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let formatter = menu.formatter(registry.default_formatter());
        lines.extend(format_menu(menu, formatter.as_ref()));
    }
    if lines.is_empty() {
        lines.push("No menus configured".to_string());
    }
    lines
}

pub fn print_registry(registry: &NavRegistry) {
    for line in format_registry(registry) {
        println!("{}", line);
    }
}

// ============================================================================
// Active
// ============================================================================

/// The item a request for `context` activates in `menu`.
pub fn format_active_line(menu: &Menu, context: &dyn ControllerContext) -> String {
    format!(
        "{}: {}/{} → {}",
        menu.name(),
        context.controller_name(),
        context.action_name(),
        menu.active_item(context).unwrap_or("(none)")
    )
}

/// For each menu, the item a request for `context` activates.
pub fn format_active(registry: &NavRegistry, context: &dyn ControllerContext) -> Vec<String> {
    registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|menu| format_active_line(menu, context))
        .collect()
}

pub fn print_active(registry: &NavRegistry, context: &dyn ControllerContext) {
    for line in format_active(registry, context) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// One-line summary after a successful check.
pub fn format_check_summary(registry: &NavRegistry) -> String {
    let menus = registry.len();
    let (items, matchers) = registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .fold((0, 0), |(items, matchers), menu| {
            (items + menu.items().len(), matchers + menu.matchers().count())
        });
    format!(
        "{} {}, {} {}, {} {}",
        menus,
        plural(menus, "menu", "menus"),
        items,
        plural(items, "item", "items"),
        matchers,
        plural(matchers, "matcher", "matchers")
    )
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
