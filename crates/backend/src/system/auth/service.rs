use contracts::system::auth::{LoginRequest, LoginResponse, RefreshResponse};

use super::jwt;
use crate::shared::app_state::AppState;
use crate::shared::ingest::parse_profile;
use crate::shared::remote::RemoteError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("invalid or expired refresh token")]
    InvalidRefreshToken,
    #[error(transparent)]
    Remote(RemoteError),
    #[error(transparent)]
    Token(#[from] anyhow::Error),
}

/// Check credentials against the remote backend and open a session
pub async fn login(state: &AppState, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let payload = match state.source().login(username, &request.password).await {
        Ok(payload) => payload,
        Err(e) if e.is_unauthorized() => return Err(AuthError::InvalidCredentials),
        Err(e) => return Err(AuthError::Remote(e)),
    };

    let user = parse_profile(&payload).ok_or(AuthError::InvalidCredentials)?;

    let access_token = jwt::generate_access_token(&user, state.jwt_secret())?;
    let refresh_token = jwt::generate_refresh_token();
    state.sessions.store(&refresh_token, user.clone());

    tracing::info!("User {} signed in", user.username);

    Ok(LoginResponse {
        access_token,
        refresh_token,
        user,
    })
}

/// New access token for a known refresh token
pub fn refresh(state: &AppState, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
    let user = state
        .sessions
        .validate(refresh_token)
        .ok_or(AuthError::InvalidRefreshToken)?;

    let access_token = jwt::generate_access_token(&user, state.jwt_secret())?;
    Ok(RefreshResponse { access_token })
}

pub fn logout(state: &AppState, refresh_token: &str) {
    if !state.sessions.revoke(refresh_token) {
        tracing::debug!("Logout with unknown refresh token");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::app_state::test_support::test_state;
    use crate::shared::remote::memory::InMemorySheets;
    use serde_json::json;

    fn sheets() -> InMemorySheets {
        InMemorySheets::new().with_account(
            "linh",
            "secret",
            json!({
                "success": true,
                "user": {"UserName": "linh", "FullName": "Linh Tran", "Team": "North", "Role": "Admin"},
                "TeamsPages": "dashboard, map"
            }),
        )
    }

    fn credentials(password: &str) -> LoginRequest {
        LoginRequest {
            username: " linh ".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_login_refresh_logout() {
        let (state, _) = test_state(sheets());

        let response = login(&state, &credentials("secret")).await.unwrap();
        assert_eq!(response.user.username, "linh");
        assert!(response.user.is_admin);
        assert_eq!(response.user.pages, vec!["dashboard", "map"]);

        let claims = jwt::validate_token(&response.access_token, state.jwt_secret()).unwrap();
        assert_eq!(claims.team.as_deref(), Some("North"));

        let refreshed = refresh(&state, &response.refresh_token).unwrap();
        assert!(jwt::validate_token(&refreshed.access_token, state.jwt_secret()).is_ok());

        logout(&state, &response.refresh_token);
        assert!(matches!(
            refresh(&state, &response.refresh_token),
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let (state, _) = test_state(sheets());
        assert!(matches!(
            login(&state, &credentials("nope")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&state, &credentials("")).await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unsuccessful_profile_is_rejected() {
        let (state, _) = test_state(
            InMemorySheets::new().with_account("linh", "secret", json!({"success": false})),
        );
        assert!(matches!(
            login(&state, &credentials("secret")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
