//! View state owned by an `ItemCollection`.
//!
//! Fields are only written through `ItemCollection` transitions; readers get
//! shared access through the accessors below.

use std::fmt;

use crate::types::{Item, ItemId};

/// Last known result of the health probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Health {
    /// No probe has completed yet.
    #[default]
    Unknown,
    /// Status string reported by the backend.
    Reported(String),
    /// The probe failed.
    Unreachable,
}

impl Health {
    /// Sentinel shown when the probe fails.
    pub const FAILURE: &'static str = "error";

    pub fn as_str(&self) -> &str {
        match self {
            Health::Unknown => "",
            Health::Reported(status) => status,
            Health::Unreachable => Self::FAILURE,
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsubmitted input fields for the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub(crate) items: Vec<Item>,
    pub(crate) pending: bool,
    pub(crate) last_error: Option<String>,
    pub(crate) health: Health,
    pub(crate) draft: Draft,
}

impl ViewState {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Drop every entry with `id`, keeping the rest in order.
    pub(crate) fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> Item {
        Item {
            id: ItemId(id),
            title: format!("title {id}"),
            description: format!("description {id}"),
        }
    }

    #[test]
    fn initial_state_is_idle_and_empty() {
        let state = ViewState::default();
        assert!(state.items().is_empty());
        assert!(!state.pending());
        assert!(state.last_error().is_none());
        assert_eq!(state.health(), &Health::Unknown);
        assert_eq!(state.health().to_string(), "");
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut state = ViewState {
            items: vec![item(1), item(2), item(3)],
            ..ViewState::default()
        };
        assert!(state.remove(ItemId(2)));
        let ids: Vec<_> = state.items().iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(!state.remove(ItemId(9)));
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn unreachable_renders_failure_sentinel() {
        assert_eq!(Health::Unreachable.as_str(), "error");
        assert_eq!(Health::Reported("healthy".into()).as_str(), "healthy");
    }
}
