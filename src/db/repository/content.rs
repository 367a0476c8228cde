use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{CoreValue, HeroDiscount, LeadershipMember, Service, SocialMedia};

// ── Services ────────────────────────────────────────────────

pub fn insert_service(conn: &Connection, service: &Service) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO services (id, title, description, perks, book_via, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            service.id.to_string(),
            service.title,
            service.description,
            serde_json::to_string(&service.perks)?,
            service.book_via,
            service.created_at,
            service.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_service(conn: &Connection, id: &Uuid) -> Result<Option<Service>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, perks, book_via, created_at, updated_at
         FROM services WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, chrono::DateTime<chrono::Utc>>(5)?,
            row.get::<_, chrono::DateTime<chrono::Utc>>(6)?,
        ))
    });
    match result {
        Ok((id, title, description, perks, book_via, created_at, updated_at)) => {
            Ok(Some(Service {
                id: Uuid::parse_str(&id)
                    .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
                title,
                description,
                perks: serde_json::from_str(&perks)?,
                book_via,
                created_at,
                updated_at,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_service(conn: &Connection, service: &Service) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE services SET title = ?2, description = ?3, perks = ?4, book_via = ?5,
         updated_at = ?6 WHERE id = ?1",
        params![
            service.id.to_string(),
            service.title,
            service.description,
            serde_json::to_string(&service.perks)?,
            service.book_via,
            service.updated_at,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Service".into(),
            id: service.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_service(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM services WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

pub fn list_services(conn: &Connection) -> Result<Vec<Service>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, perks, book_via, created_at, updated_at
         FROM services ORDER BY created_at DESC, id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, chrono::DateTime<chrono::Utc>>(5)?,
            row.get::<_, chrono::DateTime<chrono::Utc>>(6)?,
        ))
    })?;

    let mut services = Vec::new();
    for row in rows {
        let (id, title, description, perks, book_via, created_at, updated_at) = row?;
        services.push(Service {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            title,
            description,
            perks: serde_json::from_str(&perks)?,
            book_via,
            created_at,
            updated_at,
        });
    }
    Ok(services)
}

pub fn count_services(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM services", [], |row| row.get(0))?;
    Ok(count)
}

// ── Core values ─────────────────────────────────────────────

pub fn insert_core_value(conn: &Connection, value: &CoreValue) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO core_values (id, icon_url, title, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            value.id.to_string(),
            value.icon_url,
            value.title,
            value.description,
            value.created_at,
            value.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_core_value(conn: &Connection, id: &Uuid) -> Result<Option<CoreValue>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, icon_url, title, description, created_at, updated_at
         FROM core_values WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id.to_string()], core_value_from_row);
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_core_value(conn: &Connection, value: &CoreValue) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE core_values SET icon_url = ?2, title = ?3, description = ?4, updated_at = ?5
         WHERE id = ?1",
        params![
            value.id.to_string(),
            value.icon_url,
            value.title,
            value.description,
            value.updated_at,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "CoreValue".into(),
            id: value.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_core_value(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM core_values WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

pub fn list_core_values(conn: &Connection) -> Result<Vec<CoreValue>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, icon_url, title, description, created_at, updated_at
         FROM core_values ORDER BY created_at DESC, id",
    )?;
    let rows = stmt.query_map([], core_value_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn core_value_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CoreValue> {
    Ok(CoreValue {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        icon_url: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

// ── Social media links ──────────────────────────────────────

pub fn insert_social_media(conn: &Connection, link: &SocialMedia) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO social_media (id, title, icon_url, href, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            link.id.to_string(),
            link.title,
            link.icon_url,
            link.href,
            link.created_at,
            link.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_social_media(conn: &Connection, id: &Uuid) -> Result<Option<SocialMedia>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, icon_url, href, created_at, updated_at
         FROM social_media WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id.to_string()], social_media_from_row);
    match result {
        Ok(link) => Ok(Some(link)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_social_media(conn: &Connection, link: &SocialMedia) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE social_media SET title = ?2, icon_url = ?3, href = ?4, updated_at = ?5
         WHERE id = ?1",
        params![
            link.id.to_string(),
            link.title,
            link.icon_url,
            link.href,
            link.updated_at,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "SocialMedia".into(),
            id: link.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_social_media(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM social_media WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

pub fn list_social_media(conn: &Connection) -> Result<Vec<SocialMedia>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, icon_url, href, created_at, updated_at
         FROM social_media ORDER BY created_at DESC, id",
    )?;
    let rows = stmt.query_map([], social_media_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn social_media_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SocialMedia> {
    Ok(SocialMedia {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        title: row.get(1)?,
        icon_url: row.get(2)?,
        href: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

// ── Leadership team ─────────────────────────────────────────

pub fn insert_leadership_member(
    conn: &Connection,
    member: &LeadershipMember,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO leadership_team (id, designation, member_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            member.id.to_string(),
            member.designation,
            member.member_id.to_string(),
            member.created_at,
            member.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_leadership_member(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<LeadershipMember>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, designation, member_id, created_at, updated_at
         FROM leadership_team WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id.to_string()], leadership_member_from_row);
    match result {
        Ok(member) => Ok(Some(member)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_leadership_member(
    conn: &Connection,
    member: &LeadershipMember,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE leadership_team SET designation = ?2, member_id = ?3, updated_at = ?4
         WHERE id = ?1",
        params![
            member.id.to_string(),
            member.designation,
            member.member_id.to_string(),
            member.updated_at,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "LeadershipMember".into(),
            id: member.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_leadership_member(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM leadership_team WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

pub fn list_leadership_team(conn: &Connection) -> Result<Vec<LeadershipMember>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, designation, member_id, created_at, updated_at
         FROM leadership_team ORDER BY created_at DESC, id",
    )?;
    let rows = stmt.query_map([], leadership_member_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn leadership_member_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LeadershipMember> {
    Ok(LeadershipMember {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        designation: row.get(1)?,
        member_id: Uuid::parse_str(&row.get::<_, String>(2)?).unwrap_or_default(),
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

// ── Hero discount (singleton row) ───────────────────────────

pub fn get_hero_discount(conn: &Connection) -> Result<HeroDiscount, DatabaseError> {
    let discount = conn.query_row(
        "SELECT discount, is_active, updated_at FROM hero_discount WHERE id = 1",
        [],
        |row| {
            Ok(HeroDiscount {
                discount: row.get(0)?,
                is_active: row.get::<_, i64>(1)? != 0,
                updated_at: row.get(2)?,
            })
        },
    )?;
    Ok(discount)
}

pub fn put_hero_discount(conn: &Connection, discount: &HeroDiscount) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE hero_discount SET discount = ?1, is_active = ?2, updated_at = ?3 WHERE id = 1",
        params![
            discount.discount,
            discount.is_active as i64,
            discount.updated_at,
        ],
    )?;
    Ok(())
}
