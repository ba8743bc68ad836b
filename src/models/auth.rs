// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Estrutura de dados ("claims") dentro do JWT emitido pelo provedor de identidade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,             // Subject (ID do usuário)
    pub email: Option<String>, // Nem todo provedor manda
    pub aud: String,           // Audience (ex: "authenticated")
    pub exp: usize,            // Expiration time
    pub iat: usize,            // Issued At
}

/// Usuário autenticado, montado a partir do token.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
}
