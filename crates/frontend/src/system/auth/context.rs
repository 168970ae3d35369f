use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn token(&self) -> String {
        self.access_token.clone().unwrap_or_default()
    }
}

/// Профиль из /me дополняется аватаркой, сохранённой при входе
fn with_saved_avatar(mut user: UserInfo) -> UserInfo {
    if user.profile_picture_url.is_none() {
        user.profile_picture_url = storage::get_user()
            .filter(|saved| saved.username == user.username)
            .and_then(|saved| saved.profile_picture_url);
    }
    user
}

async fn restore_session() -> Option<AuthState> {
    let access_token = storage::get_access_token()?;

    if let Ok(user) = api::get_current_user(&access_token).await {
        return Some(AuthState {
            access_token: Some(access_token),
            user_info: Some(with_saved_avatar(user)),
        });
    }

    // Token invalid, try refresh
    let refresh_token = storage::get_refresh_token()?;
    let response = api::refresh_token(refresh_token).await.ok()?;
    storage::save_access_token(&response.access_token);

    let user = api::get_current_user(&response.access_token).await.ok()?;
    Some(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(with_saved_avatar(user)),
    })
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());
    let (restoring, set_restoring) = signal(true);

    // Try to restore session from localStorage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match restore_session().await {
                Some(state) => set_auth_state.set(state),
                None => storage::clear_tokens(),
            }
            set_restoring.set(false);
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    view! {
        <Show
            when=move || !restoring.get()
            fallback=|| view! { <div class="app-loading">"Đang tải..."</div> }
        >
            {children()}
        </Show>
    }
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Save a fresh login and switch the app to the signed-in view
pub fn complete_login(set_auth_state: WriteSignal<AuthState>, access_token: String, refresh_token: &str, user: UserInfo) {
    storage::save_access_token(&access_token);
    storage::save_refresh_token(refresh_token);
    storage::save_user(&user);

    set_auth_state.set(AuthState {
        access_token: Some(access_token),
        user_info: Some(user),
    });
}

/// Revoke the refresh token and clear the session
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    spawn_local(async move {
        if let Some(refresh_token) = storage::get_refresh_token() {
            if let Err(e) = api::logout(refresh_token).await {
                log::warn!("Logout request failed: {}", e);
            }
        }
        storage::clear_tokens();
        set_auth_state.set(AuthState::default());
    });
}
