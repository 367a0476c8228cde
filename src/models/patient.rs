use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Gender;

/// A deduplicated patient profile keyed by mobile number. Name and age
/// track the most recent enquiry filed under that number; the age is kept
/// as text, matching the directory's display-only use of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub patient_mob: String,
    pub patient_name: String,
    pub patient_age: String,
    pub patient_gender: Gender,
    pub queries_raised: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
