use leptos::prelude::*;

use crate::layout::navigation_state::use_navigation;
use crate::system::auth::guard::RequireRoles;

/// Page area. Page bodies are rendered by the backend-driven views; the shell
/// only identifies the page and enforces role access to it.
#[component]
pub fn Center() -> impl IntoView {
    let navigation = use_navigation();

    let module_name = move || navigation.with(|v| v.active_module.clone().unwrap_or_default());
    let requirements = Signal::derive(move || {
        navigation.with(|v| v.active_item_requirements.clone())
    });

    view! {
        <div data-zone="center" class="app-main__content" style="flex: 1; overflow: auto;">
            <Show
                when=move || navigation.with(|v| v.active_item.is_some())
                fallback=|| view! {
                    <div class="page-empty">
                        <h2>"Page not found"</h2>
                        <p>"Pick a page from the navigation."</p>
                    </div>
                }
            >
                <RequireRoles requirements=requirements>
                    <div class="page-header">
                        <span class="page-header__module">{module_name}</span>
                        <h1 class="page-header__title">
                            {move || navigation.with(|v| {
                                v.active_item.as_ref().map(|item| item.title.clone()).unwrap_or_default()
                            })}
                        </h1>
                    </div>
                </RequireRoles>
            </Show>
        </div>
    }
}
