//! Reactive wiring of the navigation resolver.
//!
//! The view is a `Memo` over the router path, the auth state and the search
//! query. It is never written to directly: whatever changes, the next read
//! reflects the latest inputs.

use contracts::system::navigation::NavigationTree;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::navigation::{resolve_navigation, NavigationView};
use crate::system::auth::context::use_auth;

/// Derived navigation view, provided to the shell through context
#[derive(Clone, Copy)]
pub struct NavigationState(pub Memo<NavigationView>);

/// Create the navigation memo and provide it to child components.
///
/// Must run inside the `Router` and `AuthProvider`.
pub fn provide_navigation_state(tree: &'static NavigationTree) -> NavigationState {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let pathname = use_location().pathname;

    let view = Memo::new(move |_| {
        let path = pathname.get();
        let query = ctx.nav_search.get();
        auth_state.with(|state| {
            resolve_navigation(tree, &state.roles(), state.loading, &path, &query)
        })
    });

    Effect::new(move |previous: Option<Option<String>>| {
        let active = view.with(|v| v.active_module.clone());
        if previous.as_ref() != Some(&active) {
            log::debug!(
                "Active module: {:?} (path '{}')",
                active,
                pathname.get_untracked()
            );
        }
        active
    });

    let state = NavigationState(view);
    provide_context(state);
    state
}

pub fn use_navigation() -> Memo<NavigationView> {
    use_context::<NavigationState>()
        .expect("NavigationState not provided")
        .0
}
