use leptos::prelude::*;

/// Shell-wide UI state shared through context.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub left_open: RwSignal<bool>,
    /// Debounced sidebar search query
    pub nav_search: RwSignal<String>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            left_open: RwSignal::new(true),
            nav_search: RwSignal::new(String::new()),
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    pub fn set_search(&self, query: String) {
        if self.nav_search.with_untracked(|current| *current != query) {
            self.nav_search.set(query);
        }
    }

    pub fn clear_search(&self) {
        self.set_search(String::new());
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
