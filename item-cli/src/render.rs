//! Plain-text rendering of view state.

use std::fmt::Write;

use item_core::{Health, Item, ViewState};

pub fn collection(state: &ViewState) -> String {
    let mut out = String::new();
    if *state.health() != Health::Unknown {
        let _ = writeln!(out, "backend: {}", state.health());
    }
    if let Some(error) = state.last_error() {
        let _ = writeln!(out, "error: {error}");
    }
    if state.items().is_empty() {
        out.push_str("(no items)\n");
    }
    for entry in state.items() {
        out.push_str(&item(entry));
    }
    out
}

pub fn item(item: &Item) -> String {
    format!("#{:<4} {}\n      {}\n", item.id, item.title, item.description)
}
