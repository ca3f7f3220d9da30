//! A single navigation entry.

use std::collections::HashMap;

use super::NavError;
use crate::context::Resource;
use crate::html::escape_xml;

/// Guard conditions supplied at render time, keyed by guard name.
pub type Guards = HashMap<String, bool>;

/// One item/tab in a navigation menu.
///
/// Items are created through [`Builder::add`](super::Builder::add) and
/// configured with [`ItemBuilder`](super::ItemBuilder). Once the owning menu
/// is registered nothing hands out `&mut Item` any more, so the fields below
/// are fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub(super) id: String,
    pub(super) label: String,
    pub(super) title: Option<String>,
    pub(super) resource: Option<String>,
    pub(super) url: Option<String>,
    pub(super) guard: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            title: None,
            resource: None,
            url: None,
            guard: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The guard condition this item depends on, if any.
    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// The resource verb used to build this item's URL, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// The static URL, ignoring any resource verb.
    pub fn static_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns whether this item may be shown given the render-time guards.
    ///
    /// Unguarded items are always shown. A guard missing from `guards` counts
    /// as false.
    pub fn display(&self, guards: &Guards) -> bool {
        match &self.guard {
            None => true,
            Some(guard) => guards.get(guard).copied().unwrap_or(false),
        }
    }

    /// The label, with `%s` placeholders filled from `inject`.
    ///
    /// Injected values are inserted verbatim; callers escape them first.
    pub fn label(&self, inject: Option<&[String]>) -> String {
        match inject {
            Some(values) => interpolate(&self.label, values),
            None => self.label.clone(),
        }
    }

    /// The explicit title if one was set, otherwise the (interpolated) label.
    pub fn title(&self, inject: Option<&[String]>) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self.label(inject),
        }
    }

    /// [`title`](Self::title) as attribute-safe text.
    ///
    /// The configured title or label is escaped; `inject` must already be
    /// escaped and is spliced in afterwards so it is not escaped twice.
    pub fn title_attribute(&self, inject: Option<&[String]>) -> String {
        match (&self.title, inject) {
            (Some(title), _) => escape_xml(title),
            (None, Some(values)) => interpolate(&escape_xml(&self.label), values),
            (None, None) => escape_xml(&self.label),
        }
    }

    /// Returns the URL for this item.
    ///
    /// Items with a resource verb need a render-time `resource` and fail with
    /// [`NavError::MissingResource`] without one. The `show` verb maps to the
    /// resource's plain member URL. Items without a verb return their static
    /// URL, which may be absent.
    pub fn url(&self, resource: Option<&dyn Resource>) -> Result<Option<String>, NavError> {
        let Some(verb) = &self.resource else {
            return Ok(self.url.clone());
        };
        let resource = resource.ok_or_else(|| NavError::MissingResource {
            item: self.id.clone(),
        })?;
        let url = match verb.as_str() {
            "show" => resource.resource_url(None),
            verb => resource.resource_url(Some(verb)),
        };
        Ok(Some(url))
    }
}

/// Replace each `%s` in `template` with the next value; `%%` is a literal `%`.
///
/// Placeholders beyond the supplied values are left in place.
fn interpolate(template: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') => {
                chars.next();
                match values.next() {
                    Some(value) => out.push_str(value),
                    None => out.push_str("%s"),
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
