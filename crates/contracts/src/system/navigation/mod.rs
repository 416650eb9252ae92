//! Navigation tree schema shared by the application shell.
//!
//! The tree is static configuration: modules hold flat links (`nav_main`)
//! and collapsible sections (`nav_group`). Every node carries a concrete
//! `required_roles` set; an empty set means "any authenticated user".

mod error;
mod roles;
mod tree;

pub use error::NavigationConfigError;
pub use roles::RoleSet;
pub use tree::{Module, NavGroup, NavItem, NavigationTree};
