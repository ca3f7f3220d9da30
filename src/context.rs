//! Boundary types between menus and the hosting web framework.
//!
//! Two collaborators are consumed at render time:
//!
//! - [`ControllerContext`]: whatever handles the current request, exposing
//!   the controller and action names used for active-item matching.
//! - [`Resource`]: a routable model object that knows how to produce its own
//!   URL for a RESTful verb. Items configured with a resource verb ask the
//!   render-time resource for their `href` instead of using a static URL.
//!
//! [`RequestContext`] and [`RestResource`] are plain implementations used by
//! the CLI and by tests; applications implement the traits on their own
//! controller and model types.

/// The current request, as seen by menus.
pub trait ControllerContext {
    /// Name of the controller handling the request, e.g. `"users"`.
    fn controller_name(&self) -> &str;
    /// Name of the action handling the request, e.g. `"show"`.
    fn action_name(&self) -> &str;
}

/// A routable object whose URL depends on a RESTful verb.
pub trait Resource {
    /// Returns the URL for this resource.
    ///
    /// `verb` is `None` for the plain member URL (what a `show` item links
    /// to) and `Some("edit")`, `Some("delete")`, ... otherwise.
    fn resource_url(&self, verb: Option<&str>) -> String;
}

/// A controller/action pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub controller: String,
    pub action: String,
}

impl RequestContext {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl ControllerContext for RequestContext {
    fn controller_name(&self) -> &str {
        &self.controller
    }

    fn action_name(&self) -> &str {
        &self.action
    }
}

/// A resource addressed as `/{collection}/{id}` with verbs appended as a
/// trailing segment (`/{collection}/{id}/{verb}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResource {
    pub collection: String,
    pub id: String,
}

impl RestResource {
    pub fn new(collection: impl Into<String>, id: impl ToString) -> Self {
        Self {
            collection: collection.into(),
            id: id.to_string(),
        }
    }

    /// Parse `collection/id`, as accepted on the command line.
    pub fn parse(value: &str) -> Option<Self> {
        let (collection, id) = value.trim_matches('/').split_once('/')?;
        if collection.is_empty() || id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Self::new(collection, id))
    }
}

impl Resource for RestResource {
    fn resource_url(&self, verb: Option<&str>) -> String {
        match verb {
            Some(verb) => format!("/{}/{}/{}", self.collection, self.id, verb),
            None => format!("/{}/{}", self.collection, self.id),
        }
    }
}
