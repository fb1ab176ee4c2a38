//! Modelo de User
//!
//! Identidad con bandera de administrador. El registro y el login viven
//! fuera de este servicio; aquí solo se resuelven usuarios existentes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Datos para crear un usuario (seed y tests)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 150))]
    pub username: String,

    #[validate(email, length(max = 254))]
    pub email: String,

    #[serde(default)]
    pub is_admin: bool,
}

impl NewUser {
    pub fn customer(username: &str, email: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            is_admin: false,
        }
    }

    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            email: self.email,
            is_admin: self.is_admin,
            created_at: Utc::now(),
        }
    }
}
