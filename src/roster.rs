//! Doctor roster — create (single and bulk), profile updates, weekly
//! availability, and the listings the admin screens consume.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{default_week, CreateDoctor, DayAvailability, Doctor, DoctorPatch, Page};

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap());
static MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("{0}")]
    Validation(String),

    #[error("doctor {0} not found")]
    NotFound(String),

    #[error("employee id {0} is already taken")]
    DuplicateEmployeeId(String),

    #[error(transparent)]
    Db(#[from] DatabaseError),
}

pub fn create_doctor(conn: &Connection, input: &CreateDoctor) -> Result<Doctor, RosterError> {
    validate_create(input)?;
    if db::get_doctor_by_employee_id(conn, &input.employee_id)?.is_some() {
        return Err(RosterError::DuplicateEmployeeId(input.employee_id.clone()));
    }

    let now = Utc::now();
    let doctor = Doctor {
        id: Uuid::new_v4(),
        name: input.name.clone(),
        specialization: input.specialization.clone(),
        mobile: input.mobile.clone(),
        employee_id: input.employee_id.clone(),
        gender: input.gender,
        avatar_url: input.avatar_url.clone(),
        availability: default_week(),
        queries_assigned: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    db::insert_doctor(conn, &doctor)?;
    tracing::info!(doctor = %doctor.id, employee_id = %doctor.employee_id, "doctor created");
    Ok(doctor)
}

/// Create a batch of doctors (the roster CSV import path — the file is
/// parsed client-side). Everything is validated before the first insert,
/// including duplicates within the batch itself.
pub fn bulk_create_doctors(
    conn: &Connection,
    inputs: &[CreateDoctor],
) -> Result<Vec<Doctor>, RosterError> {
    let mut seen = HashSet::new();
    for input in inputs {
        validate_create(input)?;
        if !seen.insert(input.employee_id.clone()) {
            return Err(RosterError::DuplicateEmployeeId(input.employee_id.clone()));
        }
        if db::get_doctor_by_employee_id(conn, &input.employee_id)?.is_some() {
            return Err(RosterError::DuplicateEmployeeId(input.employee_id.clone()));
        }
    }

    let mut created = Vec::with_capacity(inputs.len());
    for input in inputs {
        created.push(create_doctor(conn, input)?);
    }
    Ok(created)
}

pub fn get_doctor(conn: &Connection, id: Uuid) -> Result<Doctor, RosterError> {
    db::get_doctor(conn, &id)?.ok_or_else(|| RosterError::NotFound(id.to_string()))
}

pub fn get_doctor_by_employee_id(conn: &Connection, employee_id: &str) -> Result<Doctor, RosterError> {
    db::get_doctor_by_employee_id(conn, employee_id)?
        .ok_or_else(|| RosterError::NotFound(employee_id.to_string()))
}

pub fn update_doctor(conn: &Connection, id: Uuid, patch: &DoctorPatch) -> Result<Doctor, RosterError> {
    let mut doctor = get_doctor(conn, id)?;

    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(RosterError::Validation("Name is required".into()));
        }
        doctor.name = name.clone();
    }
    if let Some(specialization) = &patch.specialization {
        doctor.specialization = specialization.clone();
    }
    if let Some(mobile) = &patch.mobile {
        if !MOBILE_RE.is_match(mobile) {
            return Err(RosterError::Validation(
                "Mobile number must be exactly 10 digits".into(),
            ));
        }
        doctor.mobile = mobile.clone();
    }
    if let Some(employee_id) = &patch.employee_id {
        if *employee_id != doctor.employee_id {
            if db::get_doctor_by_employee_id(conn, employee_id)?.is_some() {
                return Err(RosterError::DuplicateEmployeeId(employee_id.clone()));
            }
            doctor.employee_id = employee_id.clone();
        }
    }
    if let Some(gender) = patch.gender {
        doctor.gender = gender;
    }
    if let Some(avatar_url) = &patch.avatar_url {
        doctor.avatar_url = Some(avatar_url.clone());
    }
    doctor.updated_at = Utc::now();

    db::update_doctor(conn, &doctor)?;
    Ok(doctor)
}

/// Replace the weekly availability grid: exactly one entry per day of the
/// week, times in `HH:MM` when present.
pub fn replace_availability(
    conn: &Connection,
    id: Uuid,
    entries: &[DayAvailability],
) -> Result<Doctor, RosterError> {
    if entries.len() != 7 {
        return Err(RosterError::Validation(
            "Availability must cover all seven days".into(),
        ));
    }
    let mut days = HashSet::new();
    for entry in entries {
        if !days.insert(entry.day.as_str()) {
            return Err(RosterError::Validation(format!(
                "Duplicate availability entry for {}",
                entry.day.as_str()
            )));
        }
        for time in [&entry.start_time, &entry.end_time].into_iter().flatten() {
            if !TIME_RE.is_match(time) {
                return Err(RosterError::Validation(format!(
                    "Invalid time '{time}', expected HH:MM"
                )));
            }
        }
    }

    let mut doctor = get_doctor(conn, id)?;
    doctor.availability = entries.to_vec();
    doctor.updated_at = Utc::now();
    db::update_doctor(conn, &doctor)?;
    Ok(doctor)
}

pub fn delete_doctor(conn: &Connection, id: Uuid) -> Result<(), RosterError> {
    if !db::delete_doctor(conn, &id)? {
        return Err(RosterError::NotFound(id.to_string()));
    }
    tracing::info!(doctor = %id, "doctor removed from roster");
    Ok(())
}

pub fn list_doctors(conn: &Connection, page: i64, limit: i64) -> Result<Page<Doctor>, RosterError> {
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1) * limit;

    let data = db::list_doctors(conn, limit, offset)?;
    let total = db::count_doctors(conn)?;
    Ok(Page::new(data, total, page, limit))
}

pub fn list_all_for_export(conn: &Connection) -> Result<Vec<Doctor>, RosterError> {
    Ok(db::list_doctors(conn, -1, 0)?)
}

fn validate_create(input: &CreateDoctor) -> Result<(), RosterError> {
    if input.name.trim().is_empty() {
        return Err(RosterError::Validation("Name is required".into()));
    }
    if input.specialization.trim().is_empty() {
        return Err(RosterError::Validation("Specialization is required".into()));
    }
    if input.employee_id.trim().is_empty() {
        return Err(RosterError::Validation("Employee id is required".into()));
    }
    if !MOBILE_RE.is_match(&input.mobile) {
        return Err(RosterError::Validation(
            "Mobile number must be exactly 10 digits".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{DayOfWeek, Gender};

    fn conn() -> Connection {
        open_memory_database().unwrap()
    }

    fn input(employee_id: &str) -> CreateDoctor {
        CreateDoctor {
            name: "Dr. Jane Smith".into(),
            specialization: "Cardiology".into(),
            mobile: "9876543210".into(),
            employee_id: employee_id.into(),
            gender: Gender::Female,
            avatar_url: None,
        }
    }

    #[test]
    fn create_seeds_default_availability() {
        let conn = conn();
        let doctor = create_doctor(&conn, &input("DOC001")).unwrap();
        assert_eq!(doctor.availability.len(), 7);
        assert!(doctor.queries_assigned.is_empty());

        let fetched = get_doctor(&conn, doctor.id).unwrap();
        assert_eq!(fetched.employee_id, "DOC001");
    }

    #[test]
    fn duplicate_employee_id_is_a_conflict() {
        let conn = conn();
        create_doctor(&conn, &input("DOC001")).unwrap();
        let err = create_doctor(&conn, &input("DOC001")).unwrap_err();
        assert!(matches!(err, RosterError::DuplicateEmployeeId(_)));
    }

    #[test]
    fn bulk_create_rejects_duplicates_within_batch_before_writing() {
        let conn = conn();
        let err =
            bulk_create_doctors(&conn, &[input("DOC001"), input("DOC001")]).unwrap_err();
        assert!(matches!(err, RosterError::DuplicateEmployeeId(_)));
        assert_eq!(db::count_doctors(&conn).unwrap(), 0);
    }

    #[test]
    fn bulk_create_inserts_all() {
        let conn = conn();
        let created =
            bulk_create_doctors(&conn, &[input("DOC001"), input("DOC002"), input("DOC003")])
                .unwrap();
        assert_eq!(created.len(), 3);
        assert_eq!(db::count_doctors(&conn).unwrap(), 3);
    }

    #[test]
    fn invalid_mobile_rejected() {
        let conn = conn();
        let mut bad = input("DOC001");
        bad.mobile = "98765".into();
        assert!(matches!(
            create_doctor(&conn, &bad).unwrap_err(),
            RosterError::Validation(_)
        ));
    }

    #[test]
    fn patch_merges_only_provided_fields() {
        let conn = conn();
        let doctor = create_doctor(&conn, &input("DOC001")).unwrap();

        let patch = DoctorPatch {
            specialization: Some("Neurology".into()),
            ..Default::default()
        };
        let updated = update_doctor(&conn, doctor.id, &patch).unwrap();
        assert_eq!(updated.specialization, "Neurology");
        assert_eq!(updated.name, "Dr. Jane Smith");
        assert_eq!(updated.employee_id, "DOC001");
    }

    #[test]
    fn patch_to_taken_employee_id_is_a_conflict() {
        let conn = conn();
        create_doctor(&conn, &input("DOC001")).unwrap();
        let other = create_doctor(&conn, &input("DOC002")).unwrap();

        let patch = DoctorPatch {
            employee_id: Some("DOC001".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_doctor(&conn, other.id, &patch).unwrap_err(),
            RosterError::DuplicateEmployeeId(_)
        ));
    }

    #[test]
    fn availability_must_cover_the_week_once() {
        let conn = conn();
        let doctor = create_doctor(&conn, &input("DOC001")).unwrap();

        let short = default_week()[..6].to_vec();
        assert!(matches!(
            replace_availability(&conn, doctor.id, &short).unwrap_err(),
            RosterError::Validation(_)
        ));

        let mut doubled = default_week();
        doubled[1].day = DayOfWeek::Monday;
        assert!(matches!(
            replace_availability(&conn, doctor.id, &doubled).unwrap_err(),
            RosterError::Validation(_)
        ));
    }

    #[test]
    fn availability_times_validated_and_persisted() {
        let conn = conn();
        let doctor = create_doctor(&conn, &input("DOC001")).unwrap();

        let mut week = default_week();
        week[0].start_time = Some("9:00".into());
        assert!(matches!(
            replace_availability(&conn, doctor.id, &week).unwrap_err(),
            RosterError::Validation(_)
        ));

        let mut week = default_week();
        week[0].start_time = Some("09:00".into());
        week[0].end_time = Some("17:30".into());
        week[6].is_available = false;
        let updated = replace_availability(&conn, doctor.id, &week).unwrap();
        assert_eq!(updated.availability[0].start_time.as_deref(), Some("09:00"));
        assert!(!updated.availability[6].is_available);

        let fetched = get_doctor(&conn, doctor.id).unwrap();
        assert_eq!(fetched.availability, week);
    }

    #[test]
    fn lookup_by_employee_id() {
        let conn = conn();
        let doctor = create_doctor(&conn, &input("DOC001")).unwrap();
        let fetched = get_doctor_by_employee_id(&conn, "DOC001").unwrap();
        assert_eq!(fetched.id, doctor.id);

        assert!(matches!(
            get_doctor_by_employee_id(&conn, "DOC999").unwrap_err(),
            RosterError::NotFound(_)
        ));
    }

    #[test]
    fn delete_and_listing() {
        let conn = conn();
        let a = create_doctor(&conn, &input("DOC001")).unwrap();
        create_doctor(&conn, &input("DOC002")).unwrap();

        let page = list_doctors(&conn, 1, 10).unwrap();
        assert_eq!(page.total, 2);

        delete_doctor(&conn, a.id).unwrap();
        assert!(matches!(
            delete_doctor(&conn, a.id).unwrap_err(),
            RosterError::NotFound(_)
        ));
        assert_eq!(list_doctors(&conn, 1, 10).unwrap().total, 1);
        assert_eq!(list_all_for_export(&conn).unwrap().len(), 1);
    }
}
