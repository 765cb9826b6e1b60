use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::session::Role;
use crate::models::validation::{require_filled, ValidationError};
use crate::state::Filterable;

/// Cuenta de usuario (solo visible para sesiones admin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Filterable for UserAccount {
    type Key = Role;

    fn filter_key(&self) -> Role {
        self.role
    }
}

/// Payload de POST /api/auth/create-admin
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewAdmin {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_filled("name", &self.name)?;
        require_filled("email", &self.email)?;
        require_filled("password", &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_admin_requires_password() {
        let admin = NewAdmin {
            name: "Root".into(),
            email: "root@example.org".into(),
            password: "".into(),
        };
        assert_eq!(admin.validate().unwrap_err().field(), "password");
    }
}
