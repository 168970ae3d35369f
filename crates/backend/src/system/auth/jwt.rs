use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::{TokenClaims, UserInfo};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Generate JWT access token with 24 hours lifetime
pub fn generate_access_token(user: &UserInfo, secret: &str) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user.username.clone(),
        full_name: user.full_name.clone(),
        team: user.team.clone(),
        is_admin: user.is_admin,
        pages: user.pages.clone(),
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Generate refresh token (UUID-based)
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a random JWT secret (256 bits)
///
/// Used when `auth.jwt_secret` is not configured; tokens then do not survive a
/// restart.
pub fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            username: "linh".into(),
            full_name: Some("Linh Tran".into()),
            team: Some("North".into()),
            profile_picture_url: None,
            is_admin: false,
            pages: vec!["dashboard".into()],
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let secret = generate_jwt_secret();
        let token = generate_access_token(&user(), &secret).unwrap();
        let claims = validate_token(&token, &secret).unwrap();
        assert_eq!(claims.sub, "linh");
        assert_eq!(claims.team.as_deref(), Some("North"));
        assert_eq!(claims.pages, vec!["dashboard"]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_with_other_secret_is_rejected() {
        let token = generate_access_token(&user(), "secret-a").unwrap();
        assert!(validate_token(&token, "secret-b").is_err());
        assert!(validate_token("not-a-token", "secret-a").is_err());
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = generate_jwt_secret();
        let b = generate_jwt_secret();
        assert_eq!(a.len(), 44);
        assert_ne!(a, b);
    }
}
