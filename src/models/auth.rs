use serde::{Deserialize, Serialize};

use crate::models::session::{Identity, Session};

#[derive(Clone, Default, PartialEq, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct GoogleLoginRequest {
    #[serde(rename = "tokenId")]
    pub token_id: String,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct FacebookLoginRequest {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "isFirebase")]
    pub is_firebase: bool,
}

/// Respuesta común de los tres endpoints de login
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: Identity,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session::new(response.user, response.token)
    }
}
