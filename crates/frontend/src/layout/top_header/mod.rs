//! TopHeader component - application top bar.
//!
//! Contains:
//! - Sidebar toggle and application title
//! - Module switcher (visible modules, active one highlighted)
//! - User info and logout

use crate::layout::global_context::AppGlobalContext;
use crate::layout::navigation_state::use_navigation;
use crate::shared::icons::icon;
use crate::shared::navigation::ModuleLink;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

#[component]
fn ModuleSwitcher() -> impl IntoView {
    let navigation = use_navigation();

    let module_tab = move |module: ModuleLink, active: Option<String>| {
        let is_active = active.as_deref() == Some(module.name.as_str());
        let icon_name = module.icon.clone().unwrap_or_default();
        let label = view! {
            {icon(&icon_name)}
            <span>{module.name.clone()}</span>
        };
        // a module without any openable page is shown but not linked
        match module.href {
            Some(href) => view! {
                <div class="top-header__module" class:top-header__module--active=is_active>
                    <A href=href>{label}</A>
                </div>
            }
            .into_any(),
            None => view! {
                <div class="top-header__module top-header__module--disabled">{label}</div>
            }
            .into_any(),
        }
    };

    view! {
        <nav class="top-header__modules">
            {move || {
                let nav = navigation.get();
                let active = nav.active_module.clone();
                nav.modules
                    .into_iter()
                    .map(|module| module_tab(module, active.clone()))
                    .collect_view()
            }}
        </nav>
    }
}

/// TopHeader component - main application top bar.
#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let logout = move |_| {
        spawn_local(async move {
            if let Err(e) = do_logout(set_auth_state).await {
                log::warn!("Logout failed: {}", e);
            }
        });
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"HR & Payroll"</span>
            </div>

            <ModuleSwitcher />

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.with(|state| {
                            state.user_info
                                .as_ref()
                                .map(|u| u.display_name().to_string())
                                .unwrap_or_else(|| "Guest".to_string())
                        })}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
