use crate::error::{AppError, AppResult};
use crate::models::AuthUser;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_AUDIENCE: &str = "authenticated";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Claims of an access token issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // provider user id
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Verifies provider-issued access tokens locally with the shared HS256 secret.
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[ACCESS_TOKEN_AUDIENCE]);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<AuthUser> {
        let claims = self.verify_token(token)?;
        if claims.sub.is_empty() {
            return Err(AppError::AuthError("Invalid access token subject".to_string()));
        }

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email.unwrap_or_default(),
            role: claims
                .user_metadata
                .role
                .unwrap_or_else(|| "user".to_string()),
        })
    }
}

#[cfg(test)]
pub(crate) fn issue_test_token(
    secret: &str,
    sub: &str,
    role: Option<&str>,
    ttl_secs: i64,
) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let claims = Claims {
        sub: sub.to_string(),
        email: Some(format!("{sub}@example.com")),
        exp: chrono::Utc::now().timestamp() + ttl_secs,
        aud: Some(ACCESS_TOKEN_AUDIENCE.to_string()),
        user_metadata: UserMetadata {
            name: None,
            role: role.map(str::to_string),
        },
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
