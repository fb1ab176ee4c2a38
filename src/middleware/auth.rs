//! Middleware de autenticación JWT
//!
//! Este módulo verifica el bearer token, resuelve el usuario en la base
//! y lo inyecta en las extensions de la request. Los handlers lo reciben
//! como parámetro explícito.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;
    let user_id = claims.user_id()?;

    // Verificar que el usuario existe en la base de datos
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    tracing::debug!("🔐 Usuario autenticado: {} (admin: {})", user.username, user.is_admin);

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    });

    Ok(next.run(request).await)
}
