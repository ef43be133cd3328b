use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use streamhub_core::AppError;
use thiserror::Error;

/// Why a token could not be issued or verified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is malformed: {0}")]
    Malformed(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::unauthorized("Token has expired"),
            TokenError::InvalidSignature | TokenError::Malformed(_) => {
                AppError::unauthorized("Invalid token")
            }
            TokenError::Signing(reason) => {
                AppError::internal_error(format!("Failed to create token: {}", reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamhub_core::ErrorKind;

    #[test]
    fn test_app_error_mapping() {
        let err: AppError = TokenError::Expired.into();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Token has expired");

        let err: AppError = TokenError::Malformed("bad".into()).into();
        assert_eq!(err.message, "Invalid token");

        let err: AppError = TokenError::Signing("no key".into()).into();
        assert_eq!(err.kind, ErrorKind::Internal);
    }
}
