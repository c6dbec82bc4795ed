//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case to match the portfolio frontend.

use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// ============================================================================
// Verify / Logout
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub username: String,
    pub authenticated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
