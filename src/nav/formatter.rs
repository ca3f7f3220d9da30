//! Turning a menu into HTML.
//!
//! A render starts by building a [`MenuView`]: the menu, the id of the
//! active item for the current request, the render-time resource, escaped
//! injections and guard values. A [`MenuFormatter`] then turns the view into
//! a `<ul>` of `<li id="nav_{id}">` elements, skipping items whose guard is
//! not satisfied.
//!
//! | Formatter | `<li>` contents |
//! |---|---|
//! | [`Basic`] | `<a href title>label</a>` |
//! | [`HasRight`] | right items: `<span class="right_border"><span class="bg"><a>…</a></span></span>`, others as [`Basic`] |
//! | [`Subnav`] | `<a href title><span class="pill"><span class="icon">label</span></span></a>` |
//!
//! Labels come from configuration and are written into the link body as-is,
//! so they may contain markup. In the `title` attribute the configured text
//! is escaped. Injected values are escaped once, when the view is built.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use maud::{Markup, PreEscaped, html};

use super::helper::NavOptions;
use super::{Guards, Item, Menu, NavError};
use crate::context::{ControllerContext, Resource};
use crate::html::escape_xml;

/// Renders a [`MenuView`] as HTML.
pub trait MenuFormatter: fmt::Debug + Send + Sync {
    fn to_html(&self, view: &MenuView<'_>) -> Result<Markup, NavError>;

    /// Short name used in CLI listings.
    fn name(&self) -> String {
        "custom".to_string()
    }
}

/// Everything a formatter needs for one render.
pub struct MenuView<'a> {
    menu: &'a Menu,
    current: Option<&'a str>,
    resource: Option<&'a dyn Resource>,
    inject: HashMap<&'a str, Vec<String>>,
    guards: &'a Guards,
}

impl<'a> MenuView<'a> {
    /// Resolve the active item and escape injected content.
    pub fn new(
        menu: &'a Menu,
        context: &dyn ControllerContext,
        options: &'a NavOptions<'_>,
    ) -> Self {
        let inject = options
            .inject
            .iter()
            .map(|(id, values)| {
                let escaped = values.iter().map(|v| escape_xml(v)).collect();
                (id.as_str(), escaped)
            })
            .collect();
        Self {
            menu,
            current: menu.active_item(context),
            resource: options.resource,
            inject,
            guards: &options.guard,
        }
    }

    pub fn menu(&self) -> &'a Menu {
        self.menu
    }

    /// Id of the active item, if the request matched one.
    pub fn current(&self) -> Option<&'a str> {
        self.current
    }

    pub fn is_active(&self, item: &Item) -> bool {
        self.current == Some(item.id())
    }

    /// Items whose guard passes, in menu order.
    pub fn visible_items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.menu
            .items()
            .iter()
            .filter(|item| item.display(self.guards))
    }

    /// Escaped injection values for `item`, if any were given.
    pub fn inject(&self, item: &Item) -> Option<&[String]> {
        self.inject.get(item.id()).map(Vec::as_slice)
    }

    pub fn label(&self, item: &Item) -> String {
        item.label(self.inject(item))
    }

    pub fn title(&self, item: &Item) -> String {
        item.title(self.inject(item))
    }

    /// The title, escaped for use as an attribute value.
    pub fn title_attribute(&self, item: &Item) -> String {
        item.title_attribute(self.inject(item))
    }

    /// The item's URL, or an empty string when it has none.
    pub fn url(&self, item: &Item) -> Result<String, NavError> {
        Ok(item.url(self.resource)?.unwrap_or_default())
    }
}

// ============================================================================
// Shared markup
// ============================================================================

/// `<ul>` with one entry per visible item.
fn list<F>(view: &MenuView<'_>, mut render_item: F) -> Result<Markup, NavError>
where
    F: FnMut(&Item) -> Result<Markup, NavError>,
{
    let items = view
        .visible_items()
        .map(|item| render_item(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(html! {
        ul {
            @for item in &items {
                (item)
            }
        }
    })
}

fn list_item(view: &MenuView<'_>, item: &Item, content: Markup) -> Markup {
    html! {
        li id={ "nav_" (item.id()) } class=[view.is_active(item).then_some("active")] {
            (content)
        }
    }
}

fn link(view: &MenuView<'_>, item: &Item, body: Markup) -> Result<Markup, NavError> {
    let href = view.url(item)?;
    let title = view.title_attribute(item);
    Ok(html! {
        a href=(href) title=(PreEscaped(title)) { (body) }
    })
}

fn basic_item(view: &MenuView<'_>, item: &Item) -> Result<Markup, NavError> {
    let body = PreEscaped(view.label(item));
    Ok(list_item(view, item, link(view, item, body)?))
}

// ============================================================================
// Formatters
// ============================================================================

/// A plain list of links.
#[derive(Debug, Clone, Copy, Default)]
pub struct Basic;

impl MenuFormatter for Basic {
    fn to_html(&self, view: &MenuView<'_>) -> Result<Markup, NavError> {
        list(view, |item| basic_item(view, item))
    }

    fn name(&self) -> String {
        "basic".to_string()
    }
}

/// Two groups in one list: the configured right-hand items get extra
/// wrapping spans for styling, everything else renders as [`Basic`].
#[derive(Debug, Clone, Default)]
pub struct HasRight {
    right: BTreeSet<String>,
}

impl HasRight {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            right: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_right(&self, item: &Item) -> bool {
        self.right.contains(item.id())
    }

    pub fn right_items(&self) -> impl Iterator<Item = &str> {
        self.right.iter().map(String::as_str)
    }
}

/// Shorthand for [`HasRight::new`].
pub fn has_right<I, S>(ids: I) -> HasRight
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    HasRight::new(ids)
}

impl MenuFormatter for HasRight {
    fn to_html(&self, view: &MenuView<'_>) -> Result<Markup, NavError> {
        list(view, |item| {
            if !self.is_right(item) {
                return basic_item(view, item);
            }
            let anchor = link(view, item, PreEscaped(view.label(item)))?;
            let content = html! {
                span.right_border {
                    span.bg { (anchor) }
                }
            };
            Ok(list_item(view, item, content))
        })
    }

    fn name(&self) -> String {
        let ids: Vec<&str> = self.right_items().collect();
        format!("has_right({})", ids.join(","))
    }
}

/// Secondary tab rows: every label sits inside `pill`/`icon` spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct Subnav;

impl MenuFormatter for Subnav {
    fn to_html(&self, view: &MenuView<'_>) -> Result<Markup, NavError> {
        list(view, |item| {
            let label = PreEscaped(view.label(item));
            let body = html! {
                span.pill {
                    span.icon { (label) }
                }
            };
            Ok(list_item(view, item, link(view, item, body)?))
        })
    }

    fn name(&self) -> String {
        "subnav".to_string()
    }
}

/// Look up a built-in formatter by its configuration name.
///
/// `right_items` is only used by `has_right`.
pub fn by_name(name: &str, right_items: &[String]) -> Option<Arc<dyn MenuFormatter>> {
    match name {
        "basic" => Some(Arc::new(Basic)),
        "subnav" => Some(Arc::new(Subnav)),
        "has_right" => Some(Arc::new(HasRight::new(right_items.iter().cloned()))),
        _ => None,
    }
}
