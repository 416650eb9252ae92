use leptos::prelude::*;

/// Shown instead of the shell when the navigation config fails validation
#[component]
pub fn ConfigErrorPage(message: String) -> impl IntoView {
    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Configuration error"</h1>
                <p>"The navigation configuration is invalid. The application cannot start."</p>
                <pre class="error-message">{message}</pre>
            </div>
        </div>
    }
}
