// src/typeahead.rs

//! Incremental, case-insensitive prefix search over the known titles, with
//! the suggestion-list state machine behind the popular-titles input.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{Category, DbCollections};

/// Most suggestions ever shown for one query.
pub const SUGGESTION_CAP: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    pub title: String,
    pub category: Category,
}

/// Flat, rebuildable snapshot of every searchable title. A rebuild is the
/// only mutation; staleness is acceptable until the next load.
#[derive(Debug, Default)]
pub struct TitleIndex {
    entries: Vec<TitleEntry>,
}

impl TitleIndex {
    /// Merges the two labeled sources, movies first, preserving server order.
    pub fn from_collections(collections: &DbCollections) -> Self {
        let mut entries =
            Vec::with_capacity(collections.movies.len() + collections.series.len());
        entries.extend(collections.movies.iter().map(|m| TitleEntry {
            title: m.title.clone(),
            category: Category::Movie,
        }));
        entries.extend(collections.series.iter().map(|s| TitleEntry {
            title: s.show_title.clone(),
            category: Category::Series,
        }));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive prefix matches in index order, capped at
    /// [`SUGGESTION_CAP`]. Scanning stops as soon as the cap is reached.
    pub fn prefix_search(&self, query: &str) -> Vec<&TitleEntry> {
        let query_upper = query.to_uppercase();
        let query_chars = query.chars().count();
        let mut matches = Vec::new();
        for entry in &self.entries {
            if matches.len() == SUGGESTION_CAP {
                break;
            }
            let prefix: String = entry.title.chars().take(query_chars).collect();
            if prefix.to_uppercase() == query_upper {
                matches.push(entry);
            }
        }
        matches
    }

    /// Category of an exact (case-insensitive) title match, defaulting to
    /// movie for unknown titles.
    pub fn category_of(&self, title: &str) -> Category {
        self.entries
            .iter()
            .find(|e| e.title.eq_ignore_ascii_case(title))
            .map(|e| e.category)
            .unwrap_or(Category::Movie)
    }
}

/// The transient suggestion list: `Closed` or `Open` with the rendered
/// titles. Selecting commits the full stored title; any outside interaction
/// closes it.
#[derive(Debug)]
pub struct TypeaheadController {
    index: Arc<TitleIndex>,
    suggestions: Option<Vec<String>>,
}

impl TypeaheadController {
    pub fn new(index: Arc<TitleIndex>) -> Self {
        Self {
            index,
            suggestions: None,
        }
    }

    /// Recomputes the list for the current input value. An empty value
    /// closes the list; anything else opens it with the capped matches.
    pub fn on_input(&mut self, value: &str) -> Option<&[String]> {
        if value.is_empty() {
            self.suggestions = None;
        } else {
            self.suggestions = Some(
                self.index
                    .prefix_search(value)
                    .into_iter()
                    .map(|e| e.title.clone())
                    .collect(),
            );
        }
        self.suggestions()
    }

    pub fn is_open(&self) -> bool {
        self.suggestions.is_some()
    }

    pub fn suggestions(&self) -> Option<&[String]> {
        self.suggestions.as_deref()
    }

    /// Commits the suggestion at `i`: returns the full stored title for the
    /// caller to copy into the input, and closes the list.
    pub fn select(&mut self, i: usize) -> Option<String> {
        let picked = self.suggestions.as_ref()?.get(i)?.clone();
        self.suggestions = None;
        Some(picked)
    }

    /// Closes the list. A no-op when already closed.
    pub fn close(&mut self) {
        self.suggestions = None;
    }
}

/// Explicit handler registry keyed by target input. Binding replaces any
/// previous controller for the same target, so repeated setup calls never
/// produce duplicate suggestion sets for one keystroke.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: HashMap<String, TypeaheadController>,
}

impl BindingRegistry {
    pub fn bind(&mut self, target: &str, index: Arc<TitleIndex>) {
        self.bindings
            .insert(target.to_string(), TypeaheadController::new(index));
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, target: &str) -> Option<&TypeaheadController> {
        self.bindings.get(target)
    }

    pub fn controller(&mut self, target: &str) -> Option<&mut TypeaheadController> {
        self.bindings.get_mut(target)
    }

    /// Routes one input event to the target's controller, yielding at most
    /// one suggestion render per event.
    pub fn handle_input(&mut self, target: &str, value: &str) -> Option<&[String]> {
        self.bindings.get_mut(target)?.on_input(value)
    }
}
