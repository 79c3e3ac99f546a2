use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use super::{Authorization, TokenError};

/// Access token claims issued by the todo-app sign-in endpoint.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct TokenClaims {
    pub user_id: i64,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
}

/// Errors building the verifier from configured key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("empty signing key")]
    Empty,
}

/// HS256 access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtAuthorization {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtAuthorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthorization")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtAuthorization {
    pub fn new(signing_key: &str, leeway_seconds: u64) -> Result<Self, KeyError> {
        if signing_key.is_empty() {
            return Err(KeyError::Empty);
        }

        let decoding_key = DecodingKey::from_secret(signing_key.as_bytes());

        // Validation::new already pins the algorithm and requires `exp`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

impl Authorization for JwtAuthorization {
    fn parse_token(&self, token: &str) -> Result<i64, TokenError> {
        let claims = self.verify(token)?;

        // Project convention: user ids are positive serial ids
        if claims.user_id <= 0 {
            return Err(TokenError::Rejected(
                "invalid user id in token claims".to_string(),
            ));
        }

        Ok(claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    const KEY: &str = "test-signing-key";

    fn sign(claims: &TokenClaims, key: &str, alg: Algorithm) -> String {
        encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .expect("failed to sign test token")
    }

    fn claims(user_id: i64, expires_in: Duration) -> TokenClaims {
        let now = Utc::now();
        TokenClaims {
            user_id,
            exp: (now + expires_in).timestamp() as u64,
            iat: Some(now.timestamp() as u64),
        }
    }

    #[test]
    fn parses_user_id_from_valid_token() {
        let auth = JwtAuthorization::new(KEY, 0).unwrap();
        let token = sign(&claims(42, Duration::hours(1)), KEY, Algorithm::HS256);

        assert_eq!(auth.parse_token(&token).unwrap(), 42);
    }

    #[test]
    fn rejects_token_signed_with_other_key() {
        let auth = JwtAuthorization::new(KEY, 0).unwrap();
        let token = sign(&claims(42, Duration::hours(1)), "other-key", Algorithm::HS256);

        assert!(matches!(auth.parse_token(&token), Err(TokenError::Jwt(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let auth = JwtAuthorization::new(KEY, 0).unwrap();
        let token = sign(&claims(42, Duration::hours(-2)), KEY, Algorithm::HS256);

        let err = auth.parse_token(&token).unwrap_err();
        match err {
            TokenError::Jwt(e) => assert!(matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            )),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn leeway_accepts_recently_expired_token() {
        let auth = JwtAuthorization::new(KEY, 120).unwrap();
        let token = sign(&claims(7, Duration::seconds(-30)), KEY, Algorithm::HS256);

        assert_eq!(auth.parse_token(&token).unwrap(), 7);
    }

    #[test]
    fn rejects_other_algorithm() {
        let auth = JwtAuthorization::new(KEY, 0).unwrap();
        let token = sign(&claims(42, Duration::hours(1)), KEY, Algorithm::HS512);

        assert!(auth.parse_token(&token).is_err());
    }

    #[test]
    fn rejects_non_positive_user_id() {
        let auth = JwtAuthorization::new(KEY, 0).unwrap();
        let token = sign(&claims(0, Duration::hours(1)), KEY, Algorithm::HS256);

        let err = auth.parse_token(&token).unwrap_err();
        assert!(matches!(err, TokenError::Rejected(_)));
        assert_eq!(err.to_string(), "invalid user id in token claims");
    }

    #[test]
    fn rejects_garbage() {
        let auth = JwtAuthorization::new(KEY, 0).unwrap();
        assert!(auth.parse_token("token").is_err());
    }

    #[test]
    fn empty_signing_key_is_refused() {
        assert!(matches!(JwtAuthorization::new("", 0), Err(KeyError::Empty)));
    }
}
