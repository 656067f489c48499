//! Request Validation
//!
//! Turns request DTOs into validated use case inputs.

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignUpInput};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{SignInRequest, SignUpRequest};

/// Unwrap a JSON body, reporting malformed or incomplete bodies as
/// validation failures
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => Err(AuthError::Validation(rejection.body_text())),
    }
}

/// Validate a sign-up request against the configured policies
pub fn validate_sign_up(req: SignUpRequest, config: &AuthConfig) -> AuthResult<SignUpInput> {
    let user_name = UserName::new(&req.user_name, config.user_name_limits)
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let email = Email::new(&req.email).map_err(|e| AuthError::Validation(e.to_string()))?;

    let password = RawPassword::new(req.password, config.password_min_length)
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    Ok(SignUpInput {
        user_name,
        email,
        password,
    })
}

/// Sign-in only requires non-blank fields; everything else is decided by
/// the credential check
pub fn validate_sign_in(req: SignInRequest) -> AuthResult<SignInInput> {
    let user_name =
        UserName::for_lookup(&req.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;

    let password =
        RawPassword::for_sign_in(req.password).map_err(|e| AuthError::Validation(e.to_string()))?;

    Ok(SignInInput {
        user_name,
        password,
    })
}
