//! Active-item matching rules.
//!
//! A matcher pattern is `controller/action`:
//!
//! | Pattern | Tier | Matches |
//! |---|---|---|
//! | `users/show` | [`Specificity::Specific`] | controller `users`, action `show` |
//! | `users/{index,show}` | [`Specificity::Specific`] | controller `users`, action `index` or `show` |
//! | `users/*`, `users` | [`Specificity::Controller`] | any action of `users` |
//! | `*/*`, `*` | [`Specificity::Generic`] | everything |
//!
//! `*/show` is rejected: an action means nothing without its controller.
//! So is anything with more than one `/`.

use std::fmt;

use super::NavError;
use crate::context::ControllerContext;

const WILDCARD: &str = "*";

/// Priority tier of a matcher. Earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    /// Concrete controller and action(s).
    Specific,
    /// Concrete controller, any action.
    Controller,
    /// Any controller, any action.
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Actions {
    Any,
    OneOf(Vec<String>),
}

/// Activates an item when the current request matches a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMatcher {
    item: String,
    controller: Option<String>,
    actions: Actions,
}

impl ItemMatcher {
    /// Parse `pattern` and bind it to the item identified by `item`.
    pub fn new(pattern: &str, item: impl Into<String>) -> Result<Self, NavError> {
        let invalid = |reason: &str| NavError::InvalidMatcher {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let (controller, action) = match pattern.split_once('/') {
            Some((c, a)) => (c.trim(), a.trim()),
            None => (pattern.trim(), WILDCARD),
        };
        if controller.is_empty() {
            return Err(invalid("controller is empty"));
        }
        if action.contains('/') {
            return Err(invalid("expected controller/action, found extra segments"));
        }
        let action = if action.is_empty() { WILDCARD } else { action };

        let controller = (controller != WILDCARD).then(|| controller.to_string());
        let actions = if action == WILDCARD {
            Actions::Any
        } else {
            Actions::OneOf(parse_actions(action).map_err(invalid)?)
        };

        if controller.is_none() && actions != Actions::Any {
            return Err(invalid(
                "a wildcard controller cannot be combined with a specific action",
            ));
        }

        Ok(Self {
            item: item.into(),
            controller,
            actions,
        })
    }

    /// Id of the item this matcher activates.
    pub fn item_id(&self) -> &str {
        &self.item
    }

    pub fn specificity(&self) -> Specificity {
        match (&self.controller, &self.actions) {
            (None, _) => Specificity::Generic,
            (Some(_), Actions::Any) => Specificity::Controller,
            (Some(_), Actions::OneOf(_)) => Specificity::Specific,
        }
    }

    pub fn matches(&self, context: &dyn ControllerContext) -> bool {
        let Some(controller) = &self.controller else {
            return true;
        };
        if controller != context.controller_name() {
            return false;
        }
        match &self.actions {
            Actions::Any => true,
            Actions::OneOf(actions) => actions.iter().any(|a| a == context.action_name()),
        }
    }
}

impl fmt::Display for ItemMatcher {
    /// Canonical pattern form, e.g. `users/{index,show}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controller = self.controller.as_deref().unwrap_or(WILDCARD);
        match &self.actions {
            Actions::Any => write!(f, "{controller}/*"),
            Actions::OneOf(actions) if actions.len() == 1 => {
                write!(f, "{controller}/{}", actions[0])
            }
            Actions::OneOf(actions) => write!(f, "{controller}/{{{}}}", actions.join(",")),
        }
    }
}

/// Expand `show` or `{index,show}` into action names.
fn parse_actions(action: &str) -> Result<Vec<String>, &'static str> {
    let Some(inner) = action.strip_prefix('{') else {
        if action.contains(['{', '}', ',']) {
            return Err("action alternatives must be wrapped in braces");
        }
        return Ok(vec![action.to_string()]);
    };
    let inner = inner
        .strip_suffix('}')
        .ok_or("unterminated action alternatives")?;

    let mut actions: Vec<String> = Vec::new();
    for name in inner.split(',').map(str::trim) {
        if name.is_empty() || name == WILDCARD {
            return Err("action alternatives must be non-empty names");
        }
        if !actions.iter().any(|a| a == name) {
            actions.push(name.to_string());
        }
    }
    Ok(actions)
}
