use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::enums::{EnquiryStatus, Gender, ServiceCategory};

/// An enquiry as stored: the assignee is a bare doctor id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Uuid,
    pub patient_name: String,
    pub patient_age: i64,
    pub patient_mob: String,
    pub patient_gender: Option<Gender>,
    pub message: String,
    pub service: ServiceCategory,
    pub status: EnquiryStatus,
    pub assignee: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Assignee display fields resolved for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssigneeView {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub employee_id: String,
}

/// An enquiry as returned to clients, with the assignee expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryView {
    pub id: Uuid,
    pub patient_name: String,
    pub patient_age: i64,
    pub patient_mob: String,
    pub patient_gender: Option<Gender>,
    pub message: String,
    pub service: ServiceCategory,
    pub status: EnquiryStatus,
    pub assignee: Option<AssigneeView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public intake payload. Status and assignee are deliberately absent:
/// a fresh enquiry is always `new` and unassigned, whatever the client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnquiry {
    pub patient_name: String,
    pub patient_age: i64,
    pub patient_mob: String,
    #[serde(default)]
    pub patient_gender: Option<Gender>,
    #[serde(default)]
    pub message: Option<String>,
    pub service: ServiceCategory,
}

/// Merge patch for an enquiry. Absent fields are left unchanged.
///
/// `assignee` distinguishes "absent" (outer `None`, keep current) from an
/// explicit `null` (`Some(None)`, clear the assignment).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnquiryPatch {
    pub patient_name: Option<String>,
    pub patient_age: Option<i64>,
    pub patient_mob: Option<String>,
    pub patient_gender: Option<Gender>,
    pub message: Option<String>,
    pub service: Option<ServiceCategory>,
    pub status: Option<EnquiryStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<Uuid>>,
}

impl EnquiryPatch {
    /// True when the patch touches nothing but `status` — the only shape a
    /// doctor-role caller is allowed to submit.
    pub fn is_status_only(&self) -> bool {
        self.patient_name.is_none()
            && self.patient_age.is_none()
            && self.patient_mob.is_none()
            && self.patient_gender.is_none()
            && self.message.is_none()
            && self.service.is_none()
            && self.assignee.is_none()
    }
}

/// Field present (possibly null) → `Some(inner)`; field absent → `None`
/// via `#[serde(default)]`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
