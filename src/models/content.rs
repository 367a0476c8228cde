use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable clinic service shown on the marketing site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub perks: Vec<String>,
    pub book_via: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub book_via: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub perks: Option<Vec<String>>,
    pub book_via: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreValue {
    pub id: Uuid,
    pub icon_url: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCoreValue {
    pub icon_url: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreValuePatch {
    pub icon_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialMedia {
    pub id: Uuid,
    pub title: String,
    pub icon_url: String,
    pub href: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSocialMedia {
    pub title: String,
    pub icon_url: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialMediaPatch {
    pub title: Option<String>,
    pub icon_url: Option<String>,
    pub href: Option<String>,
}

/// A leadership-page entry pointing at a roster doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadershipMember {
    pub id: Uuid,
    pub designation: String,
    pub member_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadershipMember {
    pub designation: String,
    pub member_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadershipMemberPatch {
    pub designation: Option<String>,
    pub member_id: Option<Uuid>,
}

/// The hero banner discount, a singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroDiscount {
    pub discount: i64,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetHeroDiscount {
    pub discount: i64,
    pub is_active: bool,
}
