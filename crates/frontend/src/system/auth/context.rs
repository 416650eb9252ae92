use contracts::system::auth::UserInfo;
use contracts::system::navigation::RoleSet;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

/// Authenticated user as seen by the shell.
///
/// `loading` starts `true` and flips to `false` once the stored session has
/// been checked. Navigation stays hidden until then.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            access_token: None,
            user_info: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// Signed-out state after the session check finished
    pub fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }

    pub fn signed_in(access_token: String, user_info: UserInfo) -> Self {
        Self {
            access_token: Some(access_token),
            user_info: Some(user_info),
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Granted roles; empty while loading or signed out
    pub fn roles(&self) -> RoleSet {
        match (&self.user_info, self.loading) {
            (Some(user), false) => user.role_set(),
            _ => RoleSet::new(),
        }
    }
}

async fn restore_session() -> AuthState {
    let Some(access_token) = storage::get_access_token() else {
        return AuthState::signed_out();
    };

    match api::get_current_user(&access_token).await {
        Ok(user_info) => return AuthState::signed_in(access_token, user_info),
        Err(e) => log::warn!("Stored access token rejected: {}", e),
    }

    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return AuthState::signed_out();
    };

    let refreshed = match api::refresh_token(refresh_token).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Session refresh failed: {}", e);
            storage::clear_tokens();
            return AuthState::signed_out();
        }
    };
    storage::save_access_token(&refreshed.access_token);

    match api::get_current_user(&refreshed.access_token).await {
        Ok(user_info) => AuthState::signed_in(refreshed.access_token, user_info),
        Err(e) => {
            log::warn!("Current user lookup failed after refresh: {}", e);
            storage::clear_tokens();
            AuthState::signed_out()
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // One-shot session restore; `loading` clears when it settles
    spawn_local(async move {
        let restored = restore_session().await;
        log::debug!(
            "Session restored: authenticated={}, roles={:?}",
            restored.is_authenticated(),
            restored.roles()
        );
        set_auth_state.set(restored);
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform login
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let response = api::login(username, password).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);

    set_auth_state.set(AuthState::signed_in(response.access_token, response.user));

    Ok(())
}

/// Helper: Perform logout
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) -> Result<(), String> {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("Logout request failed: {}", e);
        }
    }

    storage::clear_tokens();
    set_auth_state.set(AuthState::signed_out());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> UserInfo {
        UserInfo {
            id: "7".to_string(),
            username: "payroll.clerk".to_string(),
            full_name: None,
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_is_loading() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(!state.is_authenticated());
        assert!(state.roles().is_empty());
    }

    #[test]
    fn test_roles_hidden_while_loading() {
        let mut state = AuthState::signed_in("token".to_string(), user(&["HR"]));
        assert!(state.roles().contains("HR"));
        state.loading = true;
        assert!(state.roles().is_empty());
    }

    #[test]
    fn test_signed_out() {
        let state = AuthState::signed_out();
        assert!(!state.loading);
        assert!(!state.is_authenticated());
        assert!(state.roles().is_empty());
    }
}
