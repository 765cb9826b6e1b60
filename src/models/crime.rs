// ============================================================================
// CRIME REPORT - Reporte de crimen (propiedad del servidor)
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::validation::{require_filled, ValidationError};
use crate::state::Filterable;

/// Estado de un reporte. El cliente solo garantiza pertenencia al enum;
/// el orden del workflow (si existe) lo decide el backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrimeStatus {
    Pending,
    Investigating,
    Resolved,
}

impl CrimeStatus {
    pub const ALL: [CrimeStatus; 3] = [
        CrimeStatus::Pending,
        CrimeStatus::Investigating,
        CrimeStatus::Resolved,
    ];

    /// Pending -> Investigating -> Resolved -> Pending
    pub fn next(self) -> Self {
        match self {
            CrimeStatus::Pending => CrimeStatus::Investigating,
            CrimeStatus::Investigating => CrimeStatus::Resolved,
            CrimeStatus::Resolved => CrimeStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrimeStatus::Pending => "Pending",
            CrimeStatus::Investigating => "Investigating",
            CrimeStatus::Resolved => "Resolved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeReport {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: CrimeStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Filterable for CrimeReport {
    type Key = CrimeStatus;

    fn filter_key(&self) -> CrimeStatus {
        self.status
    }
}

/// Payload de creación (POST /api/crimes)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrimeDraft {
    pub title: String,
    pub description: String,
    pub location: String,
}

impl CrimeDraft {
    pub fn new(title: &str, description: &str, location: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            location: location.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_filled("title", &self.title)?;
        require_filled("description", &self.description)?;
        require_filled("location", &self.location)
    }
}

/// Payload de edición (PATCH /api/crimes/:id). El estado solo se envía desde
/// el formulario de administración.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrimeUpdate {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CrimeStatus>,
}

impl CrimeUpdate {
    /// Formulario precargado con los valores actuales del reporte
    pub fn from_report(report: &CrimeReport, include_status: bool) -> Self {
        Self {
            title: report.title.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            status: include_status.then_some(report.status),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_filled("title", &self.title)?;
        require_filled("description", &self.description)?;
        require_filled("location", &self.location)
    }
}
