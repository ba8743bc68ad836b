// src/services/auth.rs

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, CurrentUser},
};

// Os tokens são emitidos pelo provedor de identidade; aqui só validamos.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    audience: String,
}

impl AuthService {
    pub fn new(jwt_secret: String, audience: String) -> Self {
        Self { jwt_secret, audience }
    }

    pub fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("🔒 Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(CurrentUser {
            id: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn token(secret: &str, aud: &str, exp_offset: i64) -> (Uuid, String) {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: Some("dana@example.com".into()),
            aud: aud.into(),
            exp: (now + exp_offset) as usize,
            iat: now as usize,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref())).unwrap();
        (claims.sub, token)
    }

    fn service() -> AuthService {
        AuthService::new("segredo".into(), "authenticated".into())
    }

    #[test]
    fn accepts_valid_token() {
        let (id, token) = token("segredo", "authenticated", 3600);
        let user = service().validate_token(&token).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email.as_deref(), Some("dana@example.com"));
    }

    #[test]
    fn rejects_wrong_secret_audience_or_expired() {
        let (_, wrong_secret) = token("outro", "authenticated", 3600);
        let (_, wrong_aud) = token("segredo", "anon", 3600);
        let (_, expired) = token("segredo", "authenticated", -3600);

        for t in [wrong_secret, wrong_aud, expired] {
            assert!(matches!(service().validate_token(&t), Err(AppError::InvalidToken)));
        }
    }
}
