use contracts::system::navigation::RoleSet;
use leptos::prelude::*;

use super::context::use_auth;
use crate::shared::navigation::resolver::admits_all;

/// Shows children only when every role set in `requirements` admits the user.
///
/// An empty set admits any authenticated user. Nothing is shown while the
/// session is still loading.
#[component]
pub fn RequireRoles(
    #[prop(into)] requirements: Signal<Vec<RoleSet>>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();

    let allowed = move || {
        let state = auth_state.get();
        !state.loading && requirements.with(|required| admits_all(required, &state.roles()))
    };

    view! {
        <Show
            when=allowed
            fallback=|| view! { <div class="access-denied">"Access denied. Your roles do not include this page."</div> }
        >
            {children()}
        </Show>
    }
}
