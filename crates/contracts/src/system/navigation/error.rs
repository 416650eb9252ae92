use thiserror::Error;

/// Problems found while loading the navigation tree.
///
/// All of them are configuration mistakes: the shell refuses to start on any.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationConfigError {
    #[error("navigation config is not valid JSON: {0}")]
    Parse(String),

    #[error("module #{index} has an empty name")]
    EmptyModuleName { index: usize },

    #[error("module '{module}' is declared more than once")]
    DuplicateModule { module: String },

    #[error("module '{module}' contains a {kind} with an empty title")]
    EmptyTitle { module: String, kind: &'static str },

    #[error("item '{item}' in module '{module}' has no url")]
    MissingUrl { module: String, item: String },

    #[error("item '{item}' in module '{module}' has a relative url '{url}'")]
    RelativeUrl {
        module: String,
        item: String,
        url: String,
    },

    #[error("url '{url}' appears more than once in module '{module}'")]
    DuplicateUrl { module: String, url: String },

    #[error("'{node}' in module '{module}' requires an empty role name")]
    EmptyRole { module: String, node: String },
}
