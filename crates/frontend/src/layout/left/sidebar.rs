//! Sidebar: search box, flat links and collapsible groups of the active module.

use contracts::system::navigation::{NavGroup, NavItem};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::Input;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::navigation_state::use_navigation;
use crate::shared::icons::icon;
use crate::shared::navigation::AccessPhase;

const SEARCH_DEBOUNCE_MS: u32 = 250;

fn nav_link(item: NavItem, active_url: Option<String>, padding: &'static str) -> impl IntoView {
    let is_active = active_url.as_deref() == Some(item.url.as_str());
    let icon_name = item.icon.clone().unwrap_or_default();

    view! {
        <div
            class="app-sidebar__item"
            class:app-sidebar__item--active=is_active
            style:padding-left=padding
        >
            <A href=item.url.clone()>
                <div class="app-sidebar__item-content">
                    {icon(&icon_name)}
                    <span>{item.title.clone()}</span>
                </div>
            </A>
        </div>
    }
}

#[component]
fn SidebarGroup(
    group: NavGroup,
    active_url: Option<String>,
    expanded_groups: RwSignal<Vec<String>>,
) -> impl IntoView {
    let title = group.title.clone();
    let default_open = group.is_active;

    // a click inverts whatever the resolver suggested for this group
    let title_for_state = title.clone();
    let is_expanded = move || {
        let toggled = expanded_groups.with(|toggled| toggled.contains(&title_for_state));
        default_open != toggled
    };

    let title_for_click = title.clone();
    let toggle = move |_| {
        let gid = title_for_click.clone();
        expanded_groups.update(move |items| {
            if let Some(pos) = items.iter().position(|x| x == &gid) {
                items.remove(pos);
            } else {
                items.push(gid);
            }
        });
    };

    let is_expanded_for_chevron = is_expanded.clone();
    let icon_name = group.icon.clone().unwrap_or_default();
    let items = StoredValue::new(group.items);

    view! {
        <div>
            <div class="app-sidebar__item" style:padding-left="12px" on:click=toggle>
                <div class="app-sidebar__item-content">
                    {icon(&icon_name)}
                    <span>{title}</span>
                </div>
                <div
                    class="app-sidebar__chevron"
                    class:app-sidebar__chevron--expanded=is_expanded_for_chevron
                >
                    {icon("chevron-right")}
                </div>
            </div>
            <Show when=is_expanded>
                <div class="app-sidebar__children">
                    {
                        let active_url = active_url.clone();
                        items
                            .get_value()
                            .into_iter()
                            .map(|item| nav_link(item, active_url.clone(), "10px"))
                            .collect_view()
                    }
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SidebarSearch() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let search_input = RwSignal::new(ctx.nav_search.get_untracked());
    let generation = StoredValue::new(0u32);

    Effect::new(move |_| {
        // surrounding whitespace typed into the box is not part of the search
        let query = search_input.with(|q| q.trim().to_string());
        generation.update_value(|g| *g = g.wrapping_add(1));
        let current = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            // only the latest keystroke reaches the resolver
            if generation.try_get_value() == Some(current) {
                ctx.set_search(query);
            }
        });
    });

    let clear = move |_| {
        search_input.set(String::new());
        ctx.clear_search();
    };

    view! {
        <div class="app-sidebar__search">
            {icon("search")}
            <Input value=search_input placeholder="Search pages..." />
            <Show when=move || !search_input.with(|q| q.trim().is_empty())>
                <button class="app-sidebar__search-clear" title="Clear" on:click=clear>
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let navigation = use_navigation();
    let expanded_groups = RwSignal::new(Vec::<String>::new());

    // toggles belong to the module they were made in
    Effect::new(move |previous: Option<Option<String>>| {
        let active = navigation.with(|v| v.active_module.clone());
        if previous.is_some_and(|prev| prev != active) {
            expanded_groups.set(Vec::new());
        }
        active
    });

    let is_rendered = move || {
        navigation.with(|v| v.phase == AccessPhase::Authorized && v.active_module.is_some())
    };

    view! {
        <Show when=is_rendered>
            <div class="app-sidebar__content">
                <SidebarSearch />
                {move || {
                    let nav = navigation.get();
                    let active_url = nav.active_item.as_ref().map(|item| item.url.clone());
                    let nothing_found = nav.nav_main.is_empty() && nav.nav_group.is_empty();

                    let main = nav
                        .nav_main
                        .into_iter()
                        .map(|item| nav_link(item, active_url.clone(), "12px"))
                        .collect_view();
                    let groups = nav
                        .nav_group
                        .into_iter()
                        .map(|group| view! {
                            <SidebarGroup
                                group=group
                                active_url=active_url.clone()
                                expanded_groups=expanded_groups
                            />
                        })
                        .collect_view();

                    view! {
                        {main}
                        {groups}
                        {nothing_found.then(|| view! {
                            <div class="app-sidebar__empty">"No pages found"</div>
                        })}
                    }
                }}
            </div>
        </Show>
    }
}
