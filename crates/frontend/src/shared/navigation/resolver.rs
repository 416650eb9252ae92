//! Role-gated navigation resolution for the application shell.
//!
//! Everything here is a pure function of `(tree, roles, path, query)`. The
//! shell recomputes the result on every input change instead of storing an
//! "active module" anywhere, so a stale selection cannot survive a route or
//! role change.

use contracts::system::navigation::{Module, NavGroup, NavItem, NavigationTree, RoleSet};

// ============================================================================
// Module visibility
// ============================================================================

/// Modules the user may see, in declaration order.
///
/// Fail-closed: nothing is visible while roles are loading or when the user
/// has no roles at all.
pub fn visible_modules<'a>(
    tree: &'a NavigationTree,
    roles: &RoleSet,
    is_loading: bool,
) -> Vec<&'a Module> {
    if is_loading || roles.is_empty() {
        return Vec::new();
    }
    tree.modules
        .iter()
        .filter(|module| module.is_visible_to(roles))
        .collect()
}

/// Authorization phase of the current user.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleAccess<'a> {
    /// Roles have not been resolved yet
    NotYetAuthorized,
    /// Roles are known; holds the visible modules (possibly none)
    Authorized(Vec<&'a Module>),
}

impl<'a> ModuleAccess<'a> {
    pub fn for_user(tree: &'a NavigationTree, roles: &RoleSet, is_loading: bool) -> Self {
        if is_loading {
            ModuleAccess::NotYetAuthorized
        } else {
            ModuleAccess::Authorized(visible_modules(tree, roles, false))
        }
    }
}

// ============================================================================
// Active module
// ============================================================================

/// Path-segment aligned match of `current_path` against an item url.
///
/// Exact equality always matches. Otherwise `current_path` must continue the
/// url with a `/`. The root url only matches exactly.
pub fn path_matches(item_url: &str, current_path: &str) -> bool {
    if item_url == current_path {
        return true;
    }
    let base = item_url.trim_end_matches('/');
    if base.is_empty() {
        return false;
    }
    match current_path.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn module_matches(module: &Module, current_path: &str) -> bool {
    module.items().any(|item| path_matches(&item.url, current_path))
}

/// Module to highlight for `current_path`.
///
/// Authorized users get the first visible module owning a matching item,
/// falling back to the first visible module. Before authorization only an
/// actual url match over `all_modules` is reported, never a default.
pub fn resolve_active_module<'a>(
    access: &ModuleAccess<'a>,
    all_modules: &'a [Module],
    current_path: &str,
) -> Option<&'a Module> {
    match access {
        ModuleAccess::Authorized(visible) => visible
            .iter()
            .copied()
            .find(|module| module_matches(module, current_path))
            .or_else(|| visible.first().copied()),
        ModuleAccess::NotYetAuthorized => all_modules
            .iter()
            .find(|module| module_matches(module, current_path)),
    }
}

/// Item of `module` that best describes `current_path` (longest matching url).
pub fn active_item<'a>(module: &'a Module, current_path: &str) -> Option<&'a NavItem> {
    module
        .items()
        .filter(|item| path_matches(&item.url, current_path))
        .max_by_key(|item| item.url.trim_end_matches('/').len())
}

/// Role requirements guarding `item_url` inside `module`, outermost first.
pub fn item_requirements(module: &Module, item_url: &str) -> Vec<RoleSet> {
    let mut requirements = vec![module.required_roles.clone()];
    if let Some(item) = module.nav_main.iter().find(|item| item.url == item_url) {
        requirements.push(item.required_roles.clone());
        return requirements;
    }
    for group in &module.nav_group {
        if let Some(item) = group.items.iter().find(|item| item.url == item_url) {
            requirements.push(group.required_roles.clone());
            requirements.push(item.required_roles.clone());
            break;
        }
    }
    requirements
}

/// Every level of `requirements` admits the user.
pub fn admits_all(requirements: &[RoleSet], roles: &RoleSet) -> bool {
    !roles.is_empty() && requirements.iter().all(|required| required.admits(roles))
}

// ============================================================================
// Filtering
// ============================================================================

/// Lowercased needle; only an empty query disables the search
fn normalize_query(query: &str) -> Option<String> {
    if query.is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

fn title_matches(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

/// Items whose own role requirement admits the user.
pub fn role_filter_items(items: &[NavItem], roles: &RoleSet) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| item.is_visible_to(roles))
        .cloned()
        .collect()
}

fn role_filter_group(group: &NavGroup, roles: &RoleSet) -> Option<NavGroup> {
    if !group.is_visible_to(roles) {
        return None;
    }
    let items = role_filter_items(&group.items, roles);
    // a group emptied by role filtering has nothing left to show
    if items.is_empty() && !group.items.is_empty() {
        return None;
    }
    Some(NavGroup {
        title: group.title.clone(),
        required_roles: group.required_roles.clone(),
        is_active: group.is_active,
        icon: group.icon.clone(),
        items,
    })
}

fn search_group(mut group: NavGroup, needle: &str) -> Option<NavGroup> {
    if title_matches(&group.title, needle) {
        group.is_active = true;
        return Some(group);
    }
    group.items.retain(|item| title_matches(&item.title, needle));
    if group.items.is_empty() {
        return None;
    }
    group.is_active = true;
    Some(group)
}

/// Role filter, then search filter, over the collapsible sections of a module.
///
/// A group whose title matches keeps all its items; otherwise only matching
/// items are kept and groups with no match are dropped. Matches are marked
/// expanded. Order is preserved.
pub fn filter_groups(groups: &[NavGroup], roles: &RoleSet, query: &str) -> Vec<NavGroup> {
    let role_filtered = groups.iter().filter_map(|group| role_filter_group(group, roles));
    match normalize_query(query) {
        None => role_filtered.collect(),
        Some(needle) => role_filtered
            .filter_map(|group| search_group(group, &needle))
            .collect(),
    }
}

/// Search filter over flat links. Case-insensitive, order preserving.
pub fn filter_flat_items(items: &[NavItem], query: &str) -> Vec<NavItem> {
    match normalize_query(query) {
        None => items.to_vec(),
        Some(needle) => items
            .iter()
            .filter(|item| title_matches(&item.title, &needle))
            .cloned()
            .collect(),
    }
}

// ============================================================================
// Composed view for the shell
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessPhase {
    #[default]
    NotYetAuthorized,
    Authorized,
}

/// Entry of the module switcher
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleLink {
    pub name: String,
    pub icon: Option<String>,
    /// First item the user can open in the module
    pub href: Option<String>,
}

/// Everything the shell renders for one `(roles, path, query)` input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationView {
    pub phase: AccessPhase,
    pub modules: Vec<ModuleLink>,
    pub active_module: Option<String>,
    pub nav_main: Vec<NavItem>,
    pub nav_group: Vec<NavGroup>,
    /// Item matching the current path, if any
    pub active_item: Option<NavItem>,
    /// Role sets that must all admit the user to open `active_item`
    pub active_item_requirements: Vec<RoleSet>,
}

fn first_visible_url(module: &Module, roles: &RoleSet) -> Option<String> {
    module
        .nav_main
        .iter()
        .filter(|item| item.is_visible_to(roles))
        .chain(
            module
                .nav_group
                .iter()
                .filter(|group| group.is_visible_to(roles))
                .flat_map(|group| group.items.iter())
                .filter(|item| item.is_visible_to(roles)),
        )
        .map(|item| item.url.clone())
        .next()
}

/// Resolve the whole navigation state for the shell in one pass.
pub fn resolve_navigation(
    tree: &NavigationTree,
    roles: &RoleSet,
    is_loading: bool,
    current_path: &str,
    query: &str,
) -> NavigationView {
    let access = ModuleAccess::for_user(tree, roles, is_loading);
    let active = resolve_active_module(&access, &tree.modules, current_path);

    let active_item = active.and_then(|module| active_item(module, current_path));
    let active_item_requirements = match (active, active_item) {
        (Some(module), Some(item)) => item_requirements(module, &item.url),
        _ => Vec::new(),
    };

    let ModuleAccess::Authorized(visible) = &access else {
        // nothing is rendered before roles resolve; only the page is identified
        return NavigationView {
            active_item: active_item.cloned(),
            active_item_requirements,
            ..NavigationView::default()
        };
    };

    let modules = visible
        .iter()
        .map(|module| ModuleLink {
            name: module.name.clone(),
            icon: module.icon.clone(),
            href: first_visible_url(module, roles),
        })
        .collect();

    let (nav_main, mut nav_group) = match active {
        Some(module) => (
            filter_flat_items(&role_filter_items(&module.nav_main, roles), query),
            filter_groups(&module.nav_group, roles, query),
        ),
        None => (Vec::new(), Vec::new()),
    };

    if let Some(item) = active_item {
        for group in &mut nav_group {
            if group.items.iter().any(|candidate| candidate.url == item.url) {
                group.is_active = true;
            }
        }
    }

    NavigationView {
        phase: AccessPhase::Authorized,
        modules,
        active_module: active.map(|module| module.name.clone()),
        nav_main,
        nav_group,
        active_item: active_item.cloned(),
        active_item_requirements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> RoleSet {
        names.iter().copied().collect()
    }

    fn item(title: &str, url: &str) -> NavItem {
        NavItem {
            title: title.to_string(),
            url: url.to_string(),
            required_roles: RoleSet::new(),
            icon: None,
        }
    }

    fn group(title: &str, required: &[&str], items: Vec<NavItem>) -> NavGroup {
        NavGroup {
            title: title.to_string(),
            required_roles: roles(required),
            is_active: false,
            icon: None,
            items,
        }
    }

    fn module(name: &str, required: &[&str], nav_main: Vec<NavItem>) -> Module {
        Module {
            name: name.to_string(),
            required_roles: roles(required),
            icon: None,
            nav_main,
            nav_group: vec![],
        }
    }

    /// Management (HR) and Accounts (Accountant)
    fn two_module_tree() -> NavigationTree {
        NavigationTree {
            modules: vec![
                module(
                    "Management",
                    &["HR"],
                    vec![item("Attendance", "/management/attendance")],
                ),
                module(
                    "Accounts",
                    &["Accountant"],
                    vec![item("Dashboard", "/accounts/dashboard")],
                ),
            ],
        }
    }

    fn names(modules: &[&Module]) -> Vec<String> {
        modules.iter().map(|m| m.name.clone()).collect()
    }

    fn payroll_groups() -> Vec<NavGroup> {
        vec![
            group(
                "Payroll",
                &[],
                vec![item("Salary Process", "/payroll/process"), item("Pay Slip", "/payroll/slip")],
            ),
            group(
                "Attendance",
                &["HR"],
                vec![item("Daily Input", "/management/attendance/daily-input")],
            ),
            group("Fund Transfer", &["Accountant"], vec![item("Payment", "/accounts/payment")]),
        ]
    }

    #[test]
    fn test_role_filter_correctness() {
        let mut tree = two_module_tree();
        tree.modules.push(module("Dashboard", &[], vec![item("Home", "/")]));
        tree.modules.push(module("Organogram", &["HR", "Admin"], vec![item("Chart", "/organogram")]));

        for user in [
            roles(&["HR"]),
            roles(&["Accountant"]),
            roles(&["Admin"]),
            roles(&["HR", "Accountant"]),
            roles(&["Guest"]),
        ] {
            let visible = visible_modules(&tree, &user, false);
            for m in &tree.modules {
                let expected = m.required_roles.is_empty() || m.required_roles.intersects(&user);
                assert_eq!(visible.iter().any(|v| v.name == m.name), expected, "{}", m.name);
            }
        }
    }

    #[test]
    fn test_fail_closed_on_loading() {
        let tree = two_module_tree();
        assert!(visible_modules(&tree, &roles(&["HR", "Accountant"]), true).is_empty());
        assert!(visible_modules(&tree, &roles(&[]), true).is_empty());
    }

    #[test]
    fn test_fail_closed_on_no_roles() {
        let mut tree = two_module_tree();
        tree.modules.push(module("Dashboard", &[], vec![item("Home", "/")]));
        assert!(visible_modules(&tree, &RoleSet::new(), false).is_empty());

        let access = ModuleAccess::for_user(&tree, &RoleSet::new(), false);
        assert_eq!(access, ModuleAccess::Authorized(vec![]));
        assert_eq!(resolve_active_module(&access, &tree.modules, "/"), None);
    }

    #[test]
    fn test_prefix_match_is_segment_aligned() {
        let tree = two_module_tree();
        let user = roles(&["HR", "Accountant"]);
        let access = ModuleAccess::for_user(&tree, &user, false);

        assert!(path_matches("/management/attendance", "/management/attendance/daily-input"));
        assert!(!path_matches("/management/attendance", "/management/attendance-archive"));

        let active = resolve_active_module(&access, &tree.modules, "/management/attendance/daily-input");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Management"));

        // Accounts comes second, so a fallback to the first module would hide a bad match
        let tree = NavigationTree {
            modules: vec![tree.modules[1].clone(), tree.modules[0].clone()],
        };
        let access = ModuleAccess::for_user(&tree, &user, false);
        let active = resolve_active_module(&access, &tree.modules, "/management/attendance-archive");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Accounts"));
    }

    #[test]
    fn test_root_path_exactness() {
        let tree = NavigationTree {
            modules: vec![
                module("Dashboard", &[], vec![item("Home", "/")]),
                module("Settings", &[], vec![item("General", "/settings")]),
            ],
        };
        let user = roles(&["HR"]);
        let access = ModuleAccess::for_user(&tree, &user, false);

        assert!(path_matches("/", "/"));
        assert!(!path_matches("/", "/anything"));

        let active = resolve_active_module(&access, &tree.modules, "/settings/roles");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Settings"));
        let active = resolve_active_module(&access, &tree.modules, "/");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Dashboard"));

        // unmatched path falls back to the first visible module
        let active = resolve_active_module(&access, &tree.modules, "/nowhere");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Dashboard"));
    }

    #[test]
    fn test_trailing_slash_urls() {
        assert!(path_matches("/accounts/", "/accounts"));
        assert!(path_matches("/accounts/", "/accounts/ledger"));
        assert!(path_matches("/accounts", "/accounts/"));
        assert!(!path_matches("/accounts/", "/accountsx"));
    }

    #[test]
    fn test_not_yet_authorized_matches_only() {
        let tree = two_module_tree();
        let access = ModuleAccess::for_user(&tree, &roles(&["HR"]), true);
        assert_eq!(access, ModuleAccess::NotYetAuthorized);

        let active = resolve_active_module(&access, &tree.modules, "/accounts/dashboard");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Accounts"));
        assert_eq!(resolve_active_module(&access, &tree.modules, "/unknown"), None);
    }

    #[test]
    fn test_search_filter_idempotence() {
        let groups = payroll_groups();
        let user = roles(&["HR"]);
        for query in ["", "slip", "PAY", "attendance", "zzz", " input", "pay "] {
            let once = filter_groups(&groups, &user, query);
            let twice = filter_groups(&once, &user, query);
            assert_eq!(once, twice, "query {:?}", query);
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec![
            item("Payroll Summary", "/payroll"),
            item("Pay Slip", "/payroll/slip"),
            item("Employees", "/management/employees"),
        ];
        let upper = filter_flat_items(&items, "PAY");
        let lower = filter_flat_items(&items, "pay");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let items = vec![item("Payroll", "/payroll"), item("Pay Slip", "/payroll/slip")];
        assert_eq!(filter_flat_items(&items, "pay "), vec![items[1].clone()]);
        assert_eq!(filter_flat_items(&items, " "), vec![items[1].clone()]);
        assert!(filter_flat_items(&items, " payroll").is_empty());

        let groups = payroll_groups();
        let filtered = filter_groups(&groups, &roles(&["HR"]), "pay ");
        assert_eq!(filtered.len(), 1);
        let titles: Vec<&str> = filtered[0].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Pay Slip"]);
    }

    #[test]
    fn test_empty_search_is_identity_after_role_filter() {
        let groups = payroll_groups();
        let user = roles(&["HR"]);
        let filtered = filter_groups(&groups, &user, "");
        let titles: Vec<&str> = filtered.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Payroll", "Attendance"]);
        assert_eq!(filtered[0], groups[0]);
        assert_eq!(filtered[1], groups[1]);

        let items = vec![item("Pay Slip", "/payroll/slip")];
        assert_eq!(filter_flat_items(&items, ""), items);
    }

    #[test]
    fn test_scenario_accountant_only() {
        let tree = two_module_tree();
        let user = roles(&["Accountant"]);
        let visible = visible_modules(&tree, &user, false);
        assert_eq!(names(&visible), vec!["Accounts"]);

        let access = ModuleAccess::Authorized(visible);
        let active = resolve_active_module(&access, &tree.modules, "/accounts/dashboard");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Accounts"));
    }

    #[test]
    fn test_scenario_hr_and_accountant() {
        let tree = two_module_tree();
        let user = roles(&["HR", "Accountant"]);
        let visible = visible_modules(&tree, &user, false);
        assert_eq!(names(&visible), vec!["Management", "Accounts"]);

        let access = ModuleAccess::Authorized(visible);
        let active =
            resolve_active_module(&access, &tree.modules, "/management/attendance/daily-input");
        assert_eq!(active.map(|m| m.name.as_str()), Some("Management"));
    }

    #[test]
    fn test_scenario_search_inside_group() {
        let groups = vec![group(
            "Payroll",
            &[],
            vec![item("Salary Process", "/payroll/process"), item("Pay Slip", "/payroll/slip")],
        )];
        let filtered = filter_groups(&groups, &roles(&["HR"]), "slip");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Payroll");
        assert!(filtered[0].is_active);
        let titles: Vec<&str> = filtered[0].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Pay Slip"]);
    }

    #[test]
    fn test_group_title_match_keeps_all_items() {
        let filtered = filter_groups(&payroll_groups(), &roles(&["HR"]), "attend");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Attendance");
        assert_eq!(filtered[0].items.len(), 1);
        assert!(filtered[0].is_active);
    }

    #[test]
    fn test_item_level_roles_apply_uniformly() {
        let mut restricted = item("Salary Sheet", "/payroll/sheet");
        restricted.required_roles = roles(&["Accountant"]);
        let open = item("Pay Slip", "/payroll/slip");

        let filtered = role_filter_items(&[restricted.clone(), open.clone()], &roles(&["HR"]));
        assert_eq!(filtered, vec![open.clone()]);

        // group emptied by item roles disappears, an empty group stays
        let groups = vec![
            group("Salary", &[], vec![restricted]),
            group("Empty", &[], vec![]),
        ];
        let filtered = filter_groups(&groups, &roles(&["HR"]), "");
        let titles: Vec<&str> = filtered.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Empty"]);
    }

    #[test]
    fn test_active_item_prefers_longest_url() {
        let mut m = module("Payroll", &[], vec![item("Overview", "/payroll")]);
        m.nav_group.push(group("Salary", &[], vec![item("Pay Slip", "/payroll/slip")]));

        let found = active_item(&m, "/payroll/slip/2024-01");
        assert_eq!(found.map(|i| i.title.as_str()), Some("Pay Slip"));
        let found = active_item(&m, "/payroll/other");
        assert_eq!(found.map(|i| i.title.as_str()), Some("Overview"));
        assert_eq!(active_item(&m, "/accounts"), None);
    }

    #[test]
    fn test_item_requirements_collects_every_level() {
        let mut restricted = item("Salary Sheet", "/payroll/sheet");
        restricted.required_roles = roles(&["Accountant"]);
        let mut m = module("Payroll", &["HR", "Accountant"], vec![]);
        m.nav_group.push(group("Salary", &["Accountant", "Admin"], vec![restricted]));

        let requirements = item_requirements(&m, "/payroll/sheet");
        assert_eq!(requirements.len(), 3);
        assert!(admits_all(&requirements, &roles(&["Accountant"])));
        assert!(!admits_all(&requirements, &roles(&["HR"])));
        assert!(!admits_all(&requirements, &RoleSet::new()));
    }

    #[test]
    fn test_resolve_navigation_loading_renders_nothing() {
        let tree = two_module_tree();
        let view = resolve_navigation(&tree, &roles(&["HR"]), true, "/management/attendance", "");
        assert_eq!(view.phase, AccessPhase::NotYetAuthorized);
        assert!(view.modules.is_empty());
        assert_eq!(view.active_module, None);
        assert!(view.nav_main.is_empty());
        assert!(view.nav_group.is_empty());
        assert_eq!(view.active_item.map(|i| i.title), Some("Attendance".to_string()));
    }

    #[test]
    fn test_resolve_navigation_authorized() {
        let mut tree = two_module_tree();
        tree.modules[0].nav_group = payroll_groups();
        let user = roles(&["HR"]);

        let view = resolve_navigation(&tree, &user, false, "/payroll/slip", "");
        assert_eq!(view.phase, AccessPhase::Authorized);
        assert_eq!(view.active_module.as_deref(), Some("Management"));
        assert_eq!(
            view.modules,
            vec![ModuleLink {
                name: "Management".to_string(),
                icon: None,
                href: Some("/management/attendance".to_string()),
            }]
        );
        let groups: Vec<(&str, bool)> = view
            .nav_group
            .iter()
            .map(|g| (g.title.as_str(), g.is_active))
            .collect();
        assert_eq!(groups, vec![("Payroll", true), ("Attendance", false)]);
        assert_eq!(view.active_item.as_ref().map(|i| i.url.as_str()), Some("/payroll/slip"));
        assert!(admits_all(&view.active_item_requirements, &user));

        let view = resolve_navigation(&tree, &user, false, "/payroll/slip", "daily");
        assert!(view.nav_main.is_empty());
        assert_eq!(view.nav_group.len(), 1);
        assert_eq!(view.nav_group[0].items[0].title, "Daily Input");
    }

    #[test]
    fn test_resolve_navigation_without_roles() {
        let tree = two_module_tree();
        let view = resolve_navigation(&tree, &RoleSet::new(), false, "/accounts/dashboard", "");
        assert_eq!(view.phase, AccessPhase::Authorized);
        assert!(view.modules.is_empty());
        assert_eq!(view.active_module, None);
        assert_eq!(view.active_item, None);
    }
}
