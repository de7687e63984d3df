pub mod middleware;
pub mod token;

use actix_web::{HttpMessage, HttpRequest};

use crate::error::AppError;

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use token::{generate_token, verify_token, Claims};

/// Returns the email of the authenticated caller for the given request.
///
/// `AuthMiddleware` verifies the bearer token and inserts the decoded `Claims`
/// into request extensions; this helper reads them back. Tokens are issued by
/// the external identity collaborator, so the email is the only identity the
/// server ever sees.
///
/// Returns `AppError::Unauthorized` if no claims are present, which means the
/// route was not guarded by `AuthMiddleware`.
pub fn caller_email(req: &HttpRequest) -> Result<String, AppError> {
    req.extensions()
        .get::<Claims>()
        .map(|claims| claims.sub.clone())
        .ok_or_else(|| {
            AppError::Unauthorized(
                "Caller identity not found in request. Ensure AuthMiddleware is active.".into(),
            )
        })
}
