use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::NavigationConfigError;
use super::roles::RoleSet;

// ============================================================================
// Schema
// ============================================================================

/// Single navigable link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    /// Absolute path, unique within its module
    pub url: String,
    #[serde(default)]
    pub required_roles: RoleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Collapsible section of related items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavGroup {
    pub title: String,
    #[serde(default)]
    pub required_roles: RoleSet,
    /// Rendered expanded. Set by config as a default, or by search hits.
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub items: Vec<NavItem>,
}

/// Top-level functional area of the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Unique key
    pub name: String,
    #[serde(default)]
    pub required_roles: RoleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub nav_main: Vec<NavItem>,
    #[serde(default)]
    pub nav_group: Vec<NavGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationTree {
    pub modules: Vec<Module>,
}

// ============================================================================
// Visibility
// ============================================================================

impl NavItem {
    pub fn is_visible_to(&self, roles: &RoleSet) -> bool {
        self.required_roles.admits(roles)
    }
}

impl NavGroup {
    pub fn is_visible_to(&self, roles: &RoleSet) -> bool {
        self.required_roles.admits(roles)
    }
}

impl Module {
    pub fn is_visible_to(&self, roles: &RoleSet) -> bool {
        self.required_roles.admits(roles)
    }

    /// All items of the module: `nav_main` first, then every group in order
    pub fn items(&self) -> impl Iterator<Item = &NavItem> {
        self.nav_main
            .iter()
            .chain(self.nav_group.iter().flat_map(|group| group.items.iter()))
    }
}

// ============================================================================
// Loading & validation
// ============================================================================

impl NavigationTree {
    /// Parse a tree from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, NavigationConfigError> {
        let tree: NavigationTree = serde_json::from_str(json)
            .map_err(|e| NavigationConfigError::Parse(e.to_string()))?;
        tree.validate()?;
        Ok(tree)
    }

    /// Checks the structural rules the resolver relies on.
    ///
    /// Returns the first problem found, walking modules in declaration order.
    pub fn validate(&self) -> Result<(), NavigationConfigError> {
        let mut module_names = HashSet::new();

        for (index, module) in self.modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                return Err(NavigationConfigError::EmptyModuleName { index });
            }
            if !module_names.insert(module.name.as_str()) {
                return Err(NavigationConfigError::DuplicateModule {
                    module: module.name.clone(),
                });
            }
            check_roles(module, &module.name, &module.required_roles)?;

            for group in &module.nav_group {
                if group.title.trim().is_empty() {
                    return Err(NavigationConfigError::EmptyTitle {
                        module: module.name.clone(),
                        kind: "group",
                    });
                }
                check_roles(module, &group.title, &group.required_roles)?;
            }

            let mut urls = HashSet::new();
            for item in module.items() {
                if item.title.trim().is_empty() {
                    return Err(NavigationConfigError::EmptyTitle {
                        module: module.name.clone(),
                        kind: "item",
                    });
                }
                if item.url.trim().is_empty() {
                    return Err(NavigationConfigError::MissingUrl {
                        module: module.name.clone(),
                        item: item.title.clone(),
                    });
                }
                if !item.url.starts_with('/') {
                    return Err(NavigationConfigError::RelativeUrl {
                        module: module.name.clone(),
                        item: item.title.clone(),
                        url: item.url.clone(),
                    });
                }
                if !urls.insert(item.url.as_str()) {
                    return Err(NavigationConfigError::DuplicateUrl {
                        module: module.name.clone(),
                        url: item.url.clone(),
                    });
                }
                check_roles(module, &item.title, &item.required_roles)?;
            }
        }

        Ok(())
    }
}

fn check_roles(module: &Module, node: &str, roles: &RoleSet) -> Result<(), NavigationConfigError> {
    if roles.iter().any(|role| role.trim().is_empty()) {
        return Err(NavigationConfigError::EmptyRole {
            module: module.name.clone(),
            node: node.to_string(),
        });
    }
    Ok(())
}
