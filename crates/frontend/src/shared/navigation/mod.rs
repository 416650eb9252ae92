pub mod config;
pub mod resolver;

pub use config::init_navigation;
pub use resolver::{resolve_navigation, AccessPhase, ModuleLink, NavigationView};
