use contracts::system::navigation::NavigationTree;
use leptos::prelude::*;
use leptos_router::components::Router;

use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App(tree: &'static NavigationTree) -> impl IntoView {
    // Shell-wide UI state (sidebar visibility, navigation search)
    provide_context(AppGlobalContext::new());

    view! {
        <Router>
            <AuthProvider>
                <AppShell tree=tree />
            </AuthProvider>
        </Router>
    }
}
