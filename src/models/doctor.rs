use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DayOfWeek, Gender};

/// One day of the weekly availability grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub day: DayOfWeek,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub is_available: bool,
}

/// Seven entries, Monday first, all available with no set hours.
pub fn default_week() -> Vec<DayAvailability> {
    DayOfWeek::WEEK
        .into_iter()
        .map(|day| DayAvailability {
            day,
            start_time: None,
            end_time: None,
            is_available: true,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub mobile: String,
    pub employee_id: String,
    pub gender: Gender,
    pub avatar_url: Option<String>,
    pub availability: Vec<DayAvailability>,
    /// Ids of enquiries currently assigned to this doctor. Maintained by
    /// the enquiry module, never written directly through roster updates.
    pub queries_assigned: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctor {
    pub name: String,
    pub specialization: String,
    pub mobile: String,
    pub employee_id: String,
    pub gender: Gender,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Merge patch for a doctor. Absent fields are left unchanged; the
/// back-reference list and availability have their own update paths.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub mobile: Option<String>,
    pub employee_id: Option<String>,
    pub gender: Option<Gender>,
    pub avatar_url: Option<String>,
}
