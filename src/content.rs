//! Site content management — the records behind the marketing pages:
//! services, core values, social links, the leadership team, and the
//! hero banner discount. Public reads, admin-only mutation.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{
    CoreValue, CoreValuePatch, CreateCoreValue, CreateLeadershipMember, CreateService,
    CreateSocialMedia, HeroDiscount, LeadershipMember, LeadershipMemberPatch, Service,
    ServicePatch, SetHeroDiscount, SocialMedia, SocialMediaPatch,
};

static BOOK_VIA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

const DEFAULT_BOOK_VIA: &str = "0000000000";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{0}")]
    Validation(String),

    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },

    #[error(transparent)]
    Db(#[from] DatabaseError),
}

fn not_found(what: &'static str, id: impl ToString) -> ContentError {
    ContentError::NotFound {
        what,
        id: id.to_string(),
    }
}

// ── Services ────────────────────────────────────────────────

pub fn create_service(conn: &Connection, input: &CreateService) -> Result<Service, ContentError> {
    let book_via = input
        .book_via
        .clone()
        .unwrap_or_else(|| DEFAULT_BOOK_VIA.to_string());
    validate_book_via(&book_via)?;

    let now = Utc::now();
    let service = Service {
        id: Uuid::new_v4(),
        title: input.title.clone(),
        description: input.description.clone(),
        perks: input.perks.clone(),
        book_via,
        created_at: now,
        updated_at: now,
    };
    db::insert_service(conn, &service)?;
    Ok(service)
}

pub fn get_service(conn: &Connection, id: Uuid) -> Result<Service, ContentError> {
    db::get_service(conn, &id)?.ok_or_else(|| not_found("service", id))
}

pub fn update_service(
    conn: &Connection,
    id: Uuid,
    patch: &ServicePatch,
) -> Result<Service, ContentError> {
    let mut service = get_service(conn, id)?;
    if let Some(title) = &patch.title {
        service.title = title.clone();
    }
    if let Some(description) = &patch.description {
        service.description = description.clone();
    }
    if let Some(perks) = &patch.perks {
        service.perks = perks.clone();
    }
    if let Some(book_via) = &patch.book_via {
        validate_book_via(book_via)?;
        service.book_via = book_via.clone();
    }
    service.updated_at = Utc::now();
    db::update_service(conn, &service)?;
    Ok(service)
}

pub fn delete_service(conn: &Connection, id: Uuid) -> Result<(), ContentError> {
    if !db::delete_service(conn, &id)? {
        return Err(not_found("service", id));
    }
    Ok(())
}

pub fn list_services(conn: &Connection) -> Result<Vec<Service>, ContentError> {
    Ok(db::list_services(conn)?)
}

fn validate_book_via(book_via: &str) -> Result<(), ContentError> {
    if !BOOK_VIA_RE.is_match(book_via) {
        return Err(ContentError::Validation(
            "Booking number must be exactly 10 digits".into(),
        ));
    }
    Ok(())
}

// ── Core values ─────────────────────────────────────────────

pub fn create_core_value(
    conn: &Connection,
    input: &CreateCoreValue,
) -> Result<CoreValue, ContentError> {
    let now = Utc::now();
    let value = CoreValue {
        id: Uuid::new_v4(),
        icon_url: input.icon_url.clone(),
        title: input.title.clone(),
        description: input.description.clone(),
        created_at: now,
        updated_at: now,
    };
    db::insert_core_value(conn, &value)?;
    Ok(value)
}

pub fn update_core_value(
    conn: &Connection,
    id: Uuid,
    patch: &CoreValuePatch,
) -> Result<CoreValue, ContentError> {
    let mut value = db::get_core_value(conn, &id)?.ok_or_else(|| not_found("core value", id))?;
    if let Some(icon_url) = &patch.icon_url {
        value.icon_url = icon_url.clone();
    }
    if let Some(title) = &patch.title {
        value.title = title.clone();
    }
    if let Some(description) = &patch.description {
        value.description = description.clone();
    }
    value.updated_at = Utc::now();
    db::update_core_value(conn, &value)?;
    Ok(value)
}

pub fn delete_core_value(conn: &Connection, id: Uuid) -> Result<(), ContentError> {
    if !db::delete_core_value(conn, &id)? {
        return Err(not_found("core value", id));
    }
    Ok(())
}

pub fn list_core_values(conn: &Connection) -> Result<Vec<CoreValue>, ContentError> {
    Ok(db::list_core_values(conn)?)
}

// ── Social media links ──────────────────────────────────────

pub fn create_social_media(
    conn: &Connection,
    input: &CreateSocialMedia,
) -> Result<SocialMedia, ContentError> {
    let now = Utc::now();
    let link = SocialMedia {
        id: Uuid::new_v4(),
        title: input.title.clone(),
        icon_url: input.icon_url.clone(),
        href: input.href.clone(),
        created_at: now,
        updated_at: now,
    };
    db::insert_social_media(conn, &link)?;
    Ok(link)
}

pub fn update_social_media(
    conn: &Connection,
    id: Uuid,
    patch: &SocialMediaPatch,
) -> Result<SocialMedia, ContentError> {
    let mut link =
        db::get_social_media(conn, &id)?.ok_or_else(|| not_found("social media link", id))?;
    if let Some(title) = &patch.title {
        link.title = title.clone();
    }
    if let Some(icon_url) = &patch.icon_url {
        link.icon_url = icon_url.clone();
    }
    if let Some(href) = &patch.href {
        link.href = href.clone();
    }
    link.updated_at = Utc::now();
    db::update_social_media(conn, &link)?;
    Ok(link)
}

pub fn delete_social_media(conn: &Connection, id: Uuid) -> Result<(), ContentError> {
    if !db::delete_social_media(conn, &id)? {
        return Err(not_found("social media link", id));
    }
    Ok(())
}

pub fn list_social_media(conn: &Connection) -> Result<Vec<SocialMedia>, ContentError> {
    Ok(db::list_social_media(conn)?)
}

// ── Leadership team ─────────────────────────────────────────

pub fn create_leadership_member(
    conn: &Connection,
    input: &CreateLeadershipMember,
) -> Result<LeadershipMember, ContentError> {
    if db::get_doctor(conn, &input.member_id)?.is_none() {
        return Err(ContentError::Validation(format!(
            "No doctor with id {}",
            input.member_id
        )));
    }

    let now = Utc::now();
    let member = LeadershipMember {
        id: Uuid::new_v4(),
        designation: input.designation.clone(),
        member_id: input.member_id,
        created_at: now,
        updated_at: now,
    };
    db::insert_leadership_member(conn, &member)?;
    Ok(member)
}

pub fn update_leadership_member(
    conn: &Connection,
    id: Uuid,
    patch: &LeadershipMemberPatch,
) -> Result<LeadershipMember, ContentError> {
    let mut member =
        db::get_leadership_member(conn, &id)?.ok_or_else(|| not_found("leadership member", id))?;
    if let Some(designation) = &patch.designation {
        member.designation = designation.clone();
    }
    if let Some(member_id) = patch.member_id {
        if db::get_doctor(conn, &member_id)?.is_none() {
            return Err(ContentError::Validation(format!(
                "No doctor with id {member_id}"
            )));
        }
        member.member_id = member_id;
    }
    member.updated_at = Utc::now();
    db::update_leadership_member(conn, &member)?;
    Ok(member)
}

pub fn delete_leadership_member(conn: &Connection, id: Uuid) -> Result<(), ContentError> {
    if !db::delete_leadership_member(conn, &id)? {
        return Err(not_found("leadership member", id));
    }
    Ok(())
}

pub fn list_leadership_team(conn: &Connection) -> Result<Vec<LeadershipMember>, ContentError> {
    Ok(db::list_leadership_team(conn)?)
}

// ── Hero discount ───────────────────────────────────────────

pub fn get_hero_discount(conn: &Connection) -> Result<HeroDiscount, ContentError> {
    Ok(db::get_hero_discount(conn)?)
}

pub fn set_hero_discount(
    conn: &Connection,
    input: &SetHeroDiscount,
) -> Result<HeroDiscount, ContentError> {
    if !(0..=100).contains(&input.discount) {
        return Err(ContentError::Validation(
            "Discount must be between 0 and 100".into(),
        ));
    }
    let discount = HeroDiscount {
        discount: input.discount,
        is_active: input.is_active,
        updated_at: Utc::now(),
    };
    db::put_hero_discount(conn, &discount)?;
    Ok(discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{CreateDoctor, Gender};
    use crate::roster;

    fn conn() -> Connection {
        open_memory_database().unwrap()
    }

    #[test]
    fn service_crud_round_trip() {
        let conn = conn();
        let created = create_service(
            &conn,
            &CreateService {
                title: "Home Care".into(),
                description: "Round-the-clock nursing at home".into(),
                perks: vec!["Trained staff".into(), "Daily reports".into()],
                book_via: None,
            },
        )
        .unwrap();
        assert_eq!(created.book_via, DEFAULT_BOOK_VIA);

        let updated = update_service(
            &conn,
            created.id,
            &ServicePatch {
                book_via: Some("9876543210".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.book_via, "9876543210");
        assert_eq!(updated.perks.len(), 2);

        assert_eq!(list_services(&conn).unwrap().len(), 1);
        delete_service(&conn, created.id).unwrap();
        assert!(matches!(
            get_service(&conn, created.id).unwrap_err(),
            ContentError::NotFound { .. }
        ));
    }

    #[test]
    fn service_booking_number_validated() {
        let conn = conn();
        let err = create_service(
            &conn,
            &CreateService {
                title: "Home Care".into(),
                description: "desc".into(),
                perks: vec![],
                book_via: Some("call us".into()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
    }

    #[test]
    fn leadership_member_requires_existing_doctor() {
        let conn = conn();
        let err = create_leadership_member(
            &conn,
            &CreateLeadershipMember {
                designation: "Medical Director".into(),
                member_id: Uuid::new_v4(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));

        let doctor = roster::create_doctor(
            &conn,
            &CreateDoctor {
                name: "Dr. Jane Smith".into(),
                specialization: "Cardiology".into(),
                mobile: "9876543210".into(),
                employee_id: "DOC001".into(),
                gender: Gender::Female,
                avatar_url: None,
            },
        )
        .unwrap();

        let member = create_leadership_member(
            &conn,
            &CreateLeadershipMember {
                designation: "Medical Director".into(),
                member_id: doctor.id,
            },
        )
        .unwrap();
        assert_eq!(list_leadership_team(&conn).unwrap()[0].id, member.id);
    }

    #[test]
    fn hero_discount_singleton_updates_in_place() {
        let conn = conn();
        let initial = get_hero_discount(&conn).unwrap();
        assert_eq!(initial.discount, 0);
        assert!(initial.is_active);

        set_hero_discount(
            &conn,
            &SetHeroDiscount {
                discount: 15,
                is_active: false,
            },
        )
        .unwrap();

        let current = get_hero_discount(&conn).unwrap();
        assert_eq!(current.discount, 15);
        assert!(!current.is_active);

        assert!(matches!(
            set_hero_discount(
                &conn,
                &SetHeroDiscount {
                    discount: 150,
                    is_active: true,
                }
            )
            .unwrap_err(),
            ContentError::Validation(_)
        ));
    }

    #[test]
    fn core_value_and_social_media_crud() {
        let conn = conn();
        let value = create_core_value(
            &conn,
            &CreateCoreValue {
                icon_url: "https://cdn.example.com/heart.svg".into(),
                title: "Compassion".into(),
                description: "Care first".into(),
            },
        )
        .unwrap();
        let updated = update_core_value(
            &conn,
            value.id,
            &CoreValuePatch {
                title: Some("Compassionate care".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.title, "Compassionate care");
        delete_core_value(&conn, value.id).unwrap();
        assert!(list_core_values(&conn).unwrap().is_empty());

        let link = create_social_media(
            &conn,
            &CreateSocialMedia {
                title: "Instagram".into(),
                icon_url: "https://cdn.example.com/ig.svg".into(),
                href: "https://instagram.com/clinic".into(),
            },
        )
        .unwrap();
        assert_eq!(list_social_media(&conn).unwrap().len(), 1);
        delete_social_media(&conn, link.id).unwrap();
        assert!(matches!(
            delete_social_media(&conn, link.id).unwrap_err(),
            ContentError::NotFound { .. }
        ));
    }
}
