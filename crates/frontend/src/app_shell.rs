//! Application shell: auth gate and main layout.

use contracts::system::navigation::NavigationTree;
use leptos::prelude::*;

use crate::layout::center::Center;
use crate::layout::left::Sidebar;
use crate::layout::navigation_state::provide_navigation_state;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;

/// Main layout with TopHeader, Sidebar and page area.
#[component]
fn MainLayout(tree: &'static NavigationTree) -> impl IntoView {
    provide_navigation_state(tree);

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Center /> }.into_any()
        />
    }
}

/// Auth gate.
///
/// Shows a placeholder while the session is being restored, then either the
/// `LoginPage` or the `MainLayout`.
#[component]
pub fn AppShell(tree: &'static NavigationTree) -> impl IntoView {
    let (auth_state, _) = use_auth();

    let is_loading = move || auth_state.with(|state| state.loading);
    let is_authenticated = move || auth_state.with(|state| state.is_authenticated());

    view! {
        <Show
            when=move || !is_loading()
            fallback=|| view! { <div class="app-loading">"Loading..."</div> }
        >
            <Show
                when=is_authenticated
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout tree=tree />
            </Show>
        </Show>
    }
}
