//! The view-helper entrypoint.

use std::collections::HashMap;
use std::sync::Arc;

use super::formatter::{MenuFormatter, MenuView};
use super::{Guards, NavError, NavRegistry};
use crate::context::{ControllerContext, Resource};

/// Per-render options for [`display_navigation`].
///
/// ```
/// use kin_nav::context::RestResource;
/// use kin_nav::nav::NavOptions;
///
/// let user = RestResource::new("users", 7);
/// let options = NavOptions::new()
///     .inject("comments", "5")
///     .guard("admin", true)
///     .resource(&user);
/// assert_eq!(options.inject["comments"], ["5"]);
/// ```
#[derive(Default)]
pub struct NavOptions<'a> {
    /// Overrides both the menu's own formatter and the registry default.
    pub formatter: Option<Arc<dyn MenuFormatter>>,
    /// Raw values substituted into labels, keyed by item id. Escaped before use.
    pub inject: HashMap<String, Vec<String>>,
    pub guard: Guards,
    /// Handed to items configured with a resource verb.
    pub resource: Option<&'a dyn Resource>,
}

impl<'a> NavOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formatter(mut self, formatter: Arc<dyn MenuFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Inject a single value into the item's label.
    pub fn inject(self, item: impl Into<String>, value: impl Into<String>) -> Self {
        self.inject_all(item, [value])
    }

    /// Inject several values, filling `%s` placeholders in order.
    pub fn inject_all<I, S>(mut self, item: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inject
            .insert(item.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn guard(mut self, guard: impl Into<String>, value: bool) -> Self {
        self.guard.insert(guard.into(), value);
        self
    }

    pub fn resource(mut self, resource: &'a dyn Resource) -> Self {
        self.resource = Some(resource);
        self
    }
}

/// Render the menu registered as `name` for the current request.
///
/// The formatter is `options.formatter` if given, else the menu's own, else
/// the registry default. Returns `Ok(None)` when no such menu exists so the
/// caller can choose a fallback.
pub fn display_navigation(
    registry: &NavRegistry,
    name: &str,
    context: &dyn ControllerContext,
    options: &NavOptions<'_>,
) -> Result<Option<String>, NavError> {
    let Some(menu) = registry.get(name) else {
        return Ok(None);
    };
    let formatter = options
        .formatter
        .as_ref()
        .unwrap_or_else(|| menu.formatter(registry.default_formatter()));
    let view = MenuView::new(menu, context, options);
    Ok(Some(formatter.to_html(&view)?.into_string()))
}
