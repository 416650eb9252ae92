//! Navigation tree shipped with the application.
//!
//! Embedded at compile time, parsed and validated once at startup.

use contracts::system::navigation::{NavigationConfigError, NavigationTree};
use once_cell::sync::OnceCell;

/// Navigation tree embedded in the binary
const NAVIGATION_JSON: &str = include_str!("navigation.json");

static NAVIGATION: OnceCell<NavigationTree> = OnceCell::new();

/// Load and validate the embedded tree. Later calls return the same tree.
pub fn init_navigation() -> Result<&'static NavigationTree, NavigationConfigError> {
    NAVIGATION.get_or_try_init(|| {
        let tree = NavigationTree::from_json(NAVIGATION_JSON)?;
        log::info!("Navigation loaded: {} modules", tree.modules.len());
        Ok(tree)
    })
}
