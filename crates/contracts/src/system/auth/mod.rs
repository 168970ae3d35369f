use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Signed-in user as known to the remote backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub full_name: Option<String>,
    pub team: Option<String>,
    pub profile_picture_url: Option<String>,
    pub is_admin: bool,
    /// Dashboard pages the user may open; empty means all
    #[serde(default)]
    pub pages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // username
    pub full_name: Option<String>,
    pub team: Option<String>,
    pub is_admin: bool,
    #[serde(default)]
    pub pages: Vec<String>,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

impl TokenClaims {
    pub fn to_user_info(&self) -> UserInfo {
        UserInfo {
            username: self.sub.clone(),
            full_name: self.full_name.clone(),
            team: self.team.clone(),
            profile_picture_url: None,
            is_admin: self.is_admin,
            pages: self.pages.clone(),
        }
    }
}
