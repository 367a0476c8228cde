//! Enquiry intake and lifecycle — patient upsert on intake, doctor
//! assignment with back-reference reconciliation, and the read
//! projections the admin and doctor screens consume.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{
    AssigneeView, CreateEnquiry, Enquiry, EnquiryPatch, EnquiryStatus, EnquiryView, Page, Patient,
};

static MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

const MAX_MESSAGE_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum EnquiryError {
    #[error("{0}")]
    Validation(String),

    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },

    #[error(transparent)]
    Db(#[from] DatabaseError),
}

fn not_found(what: &'static str, id: impl ToString) -> EnquiryError {
    EnquiryError::NotFound {
        what,
        id: id.to_string(),
    }
}

// ── Intake ──────────────────────────────────────────────────

/// File a new enquiry from the public consultation form.
///
/// Validates everything up front — nothing is written on bad input.
/// Then, in order: upsert the patient profile keyed by mobile number,
/// insert the enquiry (status `new`, no assignee, whatever the caller
/// sent), and link the enquiry id into the patient's raised list.
/// The writes are sequential and not wrapped in a transaction; the
/// patient link is display-only so a failure between steps leaves
/// nothing load-bearing behind.
pub fn create_enquiry(
    conn: &Connection,
    input: &CreateEnquiry,
) -> Result<EnquiryView, EnquiryError> {
    validate_name(&input.patient_name)?;
    validate_age(input.patient_age)?;
    validate_mobile(&input.patient_mob)?;
    let message = input.message.clone().unwrap_or_default();
    validate_message(&message)?;

    let now = Utc::now();

    let patient = match db::get_patient_by_mobile(conn, &input.patient_mob)? {
        None => {
            let patient = Patient {
                patient_mob: input.patient_mob.clone(),
                patient_name: input.patient_name.clone(),
                patient_age: input.patient_age.to_string(),
                // Gender is only known when the form sends it; male is the
                // directory's historical default.
                patient_gender: input.patient_gender.unwrap_or(crate::models::Gender::Male),
                queries_raised: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            db::insert_patient(conn, &patient)?;
            tracing::info!(mobile = %patient.patient_mob, "new patient created");
            patient
        }
        Some(mut patient) => {
            let mut refreshed = false;
            if patient.patient_name != input.patient_name {
                patient.patient_name = input.patient_name.clone();
                refreshed = true;
            }
            if patient.patient_age != input.patient_age.to_string() {
                patient.patient_age = input.patient_age.to_string();
                refreshed = true;
            }
            if let Some(gender) = input.patient_gender {
                if patient.patient_gender != gender {
                    patient.patient_gender = gender;
                    refreshed = true;
                }
            }
            if refreshed {
                patient.updated_at = now;
                db::update_patient(conn, &patient)?;
                tracing::info!(mobile = %patient.patient_mob, "patient profile refreshed");
            }
            patient
        }
    };

    let enquiry = Enquiry {
        id: Uuid::new_v4(),
        patient_name: input.patient_name.clone(),
        patient_age: input.patient_age,
        patient_mob: input.patient_mob.clone(),
        patient_gender: input.patient_gender,
        message,
        service: input.service,
        status: EnquiryStatus::New,
        assignee: None,
        created_at: now,
        updated_at: now,
    };
    db::insert_enquiry(conn, &enquiry)?;
    tracing::info!(enquiry = %enquiry.id, mobile = %enquiry.patient_mob, "enquiry created");

    let mut patient = patient;
    if !patient.queries_raised.contains(&enquiry.id) {
        patient.queries_raised.push(enquiry.id);
        patient.updated_at = now;
        db::update_patient(conn, &patient)?;
    }

    expand(conn, enquiry)
}

// ── Update & reconciliation ─────────────────────────────────

/// Apply a merge patch to an enquiry, then bring the doctors'
/// back-reference lists in line with the assignee change.
///
/// An absent `assignee` field keeps the current assignment; an explicit
/// null clears it. Reassigning to the doctor already assigned touches no
/// list. A new assignee id that does not resolve to a doctor is kept on
/// the enquiry as-is and the back-reference append is skipped — callers
/// are expected to send valid ids, and the lists only feed counts.
pub fn update_enquiry(
    conn: &Connection,
    id: Uuid,
    patch: &EnquiryPatch,
) -> Result<EnquiryView, EnquiryError> {
    let mut enquiry = db::get_enquiry(conn, &id)?.ok_or_else(|| not_found("enquiry", id))?;

    let old_assignee = enquiry.assignee;
    let new_assignee = match patch.assignee {
        Some(value) => value,
        None => old_assignee,
    };

    if let Some(name) = &patch.patient_name {
        validate_name(name)?;
        enquiry.patient_name = name.clone();
    }
    if let Some(age) = patch.patient_age {
        validate_age(age)?;
        enquiry.patient_age = age;
    }
    if let Some(mobile) = &patch.patient_mob {
        validate_mobile(mobile)?;
        enquiry.patient_mob = mobile.clone();
    }
    if let Some(gender) = patch.patient_gender {
        enquiry.patient_gender = Some(gender);
    }
    if let Some(message) = &patch.message {
        validate_message(message)?;
        enquiry.message = message.clone();
    }
    if let Some(service) = patch.service {
        enquiry.service = service;
    }
    if let Some(status) = patch.status {
        enquiry.status = status;
    }
    enquiry.assignee = new_assignee;
    enquiry.updated_at = Utc::now();

    db::update_enquiry(conn, &enquiry)?;

    reconcile_assignment(conn, id, old_assignee, new_assignee)?;

    expand(conn, enquiry)
}

/// Keep `doctors.queries_assigned` mirroring the enquiry's assignee after
/// a change from `old` to `new`. No-op when they match.
fn reconcile_assignment(
    conn: &Connection,
    enquiry_id: Uuid,
    old: Option<Uuid>,
    new: Option<Uuid>,
) -> Result<(), EnquiryError> {
    if let Some(old_id) = old {
        if new != Some(old_id) {
            if let Some(mut doctor) = db::get_doctor(conn, &old_id)? {
                doctor.queries_assigned.retain(|q| *q != enquiry_id);
                doctor.updated_at = Utc::now();
                db::update_doctor(conn, &doctor)?;
                tracing::info!(enquiry = %enquiry_id, doctor = %old_id, "assignment removed");
            }
        }
    }

    if let Some(new_id) = new {
        if old != Some(new_id) {
            match db::get_doctor(conn, &new_id)? {
                Some(mut doctor) => {
                    if !doctor.queries_assigned.contains(&enquiry_id) {
                        doctor.queries_assigned.push(enquiry_id);
                        doctor.updated_at = Utc::now();
                        db::update_doctor(conn, &doctor)?;
                    }
                    tracing::info!(enquiry = %enquiry_id, doctor = %new_id, "enquiry assigned");
                }
                None => {
                    tracing::warn!(
                        enquiry = %enquiry_id,
                        doctor = %new_id,
                        "assignee does not resolve to a doctor; back-reference skipped"
                    );
                }
            }
        }
    }

    Ok(())
}

// ── Delete ──────────────────────────────────────────────────

/// Remove an enquiry and prune it from the assigned doctor's and the
/// patient's back-reference lists.
pub fn delete_enquiry(conn: &Connection, id: Uuid) -> Result<(), EnquiryError> {
    let enquiry = db::get_enquiry(conn, &id)?.ok_or_else(|| not_found("enquiry", id))?;

    db::delete_enquiry(conn, &id)?;

    if let Some(assignee) = enquiry.assignee {
        if let Some(mut doctor) = db::get_doctor(conn, &assignee)? {
            doctor.queries_assigned.retain(|q| *q != id);
            doctor.updated_at = Utc::now();
            db::update_doctor(conn, &doctor)?;
        }
    }

    if let Some(mut patient) = db::get_patient_by_mobile(conn, &enquiry.patient_mob)? {
        if patient.queries_raised.contains(&id) {
            patient.queries_raised.retain(|q| *q != id);
            patient.updated_at = Utc::now();
            db::update_patient(conn, &patient)?;
        }
    }

    tracing::info!(enquiry = %id, "enquiry deleted");
    Ok(())
}

// ── Read projections ────────────────────────────────────────

pub fn get_enquiry(conn: &Connection, id: Uuid) -> Result<EnquiryView, EnquiryError> {
    let enquiry = db::get_enquiry(conn, &id)?.ok_or_else(|| not_found("enquiry", id))?;
    expand(conn, enquiry)
}

pub fn list_enquiries(
    conn: &Connection,
    page: i64,
    limit: i64,
    status: Option<EnquiryStatus>,
    assignee: Option<Uuid>,
) -> Result<Page<EnquiryView>, EnquiryError> {
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1) * limit;

    let rows = db::list_enquiries(conn, status, assignee.as_ref(), limit, offset)?;
    let total = db::count_enquiries(conn, status, assignee.as_ref())?;

    let mut views = Vec::with_capacity(rows.len());
    for enquiry in rows {
        views.push(expand(conn, enquiry)?);
    }
    Ok(Page::new(views, total, page, limit))
}

/// The enquiries assigned to one doctor, newest first. The doctor must
/// exist; a doctor with nothing assigned gets an empty page.
pub fn list_by_assignee(
    conn: &Connection,
    doctor_id: Uuid,
    page: i64,
    limit: i64,
) -> Result<Page<EnquiryView>, EnquiryError> {
    if db::get_doctor(conn, &doctor_id)?.is_none() {
        return Err(not_found("doctor", doctor_id));
    }
    list_enquiries(conn, page, limit, None, Some(doctor_id))
}

/// The full filtered result set for export — no pagination, same order
/// and expansion as the listing.
pub fn list_all_for_export(
    conn: &Connection,
    status: Option<EnquiryStatus>,
    assignee: Option<Uuid>,
) -> Result<Vec<EnquiryView>, EnquiryError> {
    let rows = db::list_enquiries(conn, status, assignee.as_ref(), -1, 0)?;
    let mut views = Vec::with_capacity(rows.len());
    for enquiry in rows {
        views.push(expand(conn, enquiry)?);
    }
    Ok(views)
}

/// Resolve the assignee id into its display fields. A dangling id (the
/// doctor has since been removed) renders as unassigned.
pub(crate) fn expand(conn: &Connection, enquiry: Enquiry) -> Result<EnquiryView, EnquiryError> {
    let assignee = match enquiry.assignee {
        Some(id) => db::get_doctor(conn, &id)?.map(|doctor| AssigneeView {
            id: doctor.id,
            name: doctor.name,
            specialization: doctor.specialization,
            employee_id: doctor.employee_id,
        }),
        None => None,
    };
    Ok(EnquiryView {
        id: enquiry.id,
        patient_name: enquiry.patient_name,
        patient_age: enquiry.patient_age,
        patient_mob: enquiry.patient_mob,
        patient_gender: enquiry.patient_gender,
        message: enquiry.message,
        service: enquiry.service,
        status: enquiry.status,
        assignee,
        created_at: enquiry.created_at,
        updated_at: enquiry.updated_at,
    })
}

// ── Field validation ────────────────────────────────────────

fn validate_name(name: &str) -> Result<(), EnquiryError> {
    if name.trim().is_empty() {
        return Err(EnquiryError::Validation("Patient name is required".into()));
    }
    Ok(())
}

fn validate_age(age: i64) -> Result<(), EnquiryError> {
    if !(1..=99).contains(&age) {
        return Err(EnquiryError::Validation(
            "Patient age must be between 1 and 99".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_mobile(mobile: &str) -> Result<(), EnquiryError> {
    if !MOBILE_RE.is_match(mobile) {
        return Err(EnquiryError::Validation(
            "Mobile number must be exactly 10 digits".into(),
        ));
    }
    Ok(())
}

fn validate_message(message: &str) -> Result<(), EnquiryError> {
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(EnquiryError::Validation(
            "Message must be at most 200 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{default_week, CreateEnquiry, Doctor, Gender, ServiceCategory};
    use serde_json::json;

    fn conn() -> Connection {
        open_memory_database().unwrap()
    }

    fn intake(mobile: &str) -> CreateEnquiry {
        CreateEnquiry {
            patient_name: "John Doe".into(),
            patient_age: 35,
            patient_mob: mobile.into(),
            patient_gender: None,
            message: Some("need consult".into()),
            service: ServiceCategory::DoctorConsultation,
        }
    }

    fn add_doctor(conn: &Connection, employee_id: &str) -> Doctor {
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: format!("Dr. {employee_id}"),
            specialization: "Cardiology".into(),
            mobile: "9000000000".into(),
            employee_id: employee_id.into(),
            gender: Gender::Female,
            avatar_url: None,
            availability: default_week(),
            queries_assigned: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        db::insert_doctor(conn, &doctor).unwrap();
        doctor
    }

    fn assign_patch(doctor_id: Uuid) -> EnquiryPatch {
        EnquiryPatch {
            assignee: Some(Some(doctor_id)),
            ..Default::default()
        }
    }

    fn clear_patch() -> EnquiryPatch {
        EnquiryPatch {
            assignee: Some(None),
            ..Default::default()
        }
    }

    fn assigned_list(conn: &Connection, doctor_id: &Uuid) -> Vec<Uuid> {
        db::get_doctor(conn, doctor_id).unwrap().unwrap().queries_assigned
    }

    // ── Intake ──────────────────────────────────────────────

    #[test]
    fn create_forces_new_status_and_no_assignee() {
        let conn = conn();
        let view = create_enquiry(&conn, &intake("9876543210")).unwrap();
        assert_eq!(view.status, EnquiryStatus::New);
        assert!(view.assignee.is_none());
    }

    #[test]
    fn create_ignores_client_supplied_status_and_assignee() {
        let conn = conn();
        // The intake payload simply has no status/assignee fields; extra
        // JSON keys are dropped at deserialization.
        let input: CreateEnquiry = serde_json::from_value(json!({
            "patient_name": "John Doe",
            "patient_age": 35,
            "patient_mob": "9876543210",
            "message": "need consult",
            "service": "Doctor Consultation",
            "status": "completed",
            "assignee": Uuid::new_v4().to_string(),
        }))
        .unwrap();
        let view = create_enquiry(&conn, &input).unwrap();
        assert_eq!(view.status, EnquiryStatus::New);
        assert!(view.assignee.is_none());
    }

    #[test]
    fn create_makes_patient_with_single_back_reference() {
        let conn = conn();
        let view = create_enquiry(&conn, &intake("9876543210")).unwrap();

        let patient = db::get_patient_by_mobile(&conn, "9876543210")
            .unwrap()
            .unwrap();
        assert_eq!(patient.patient_name, "John Doe");
        assert_eq!(patient.patient_age, "35");
        assert_eq!(patient.patient_gender, Gender::Male);
        assert_eq!(patient.queries_raised, vec![view.id]);
    }

    #[test]
    fn repeat_mobile_reuses_patient_and_refreshes_fields() {
        let conn = conn();
        let first = create_enquiry(&conn, &intake("9876543210")).unwrap();

        let mut second = intake("9876543210");
        second.patient_name = "Johnny Doe".into();
        second.patient_age = 36;
        let second = create_enquiry(&conn, &second).unwrap();

        assert_eq!(db::count_patients(&conn).unwrap(), 1);
        let patient = db::get_patient_by_mobile(&conn, "9876543210")
            .unwrap()
            .unwrap();
        assert_eq!(patient.patient_name, "Johnny Doe");
        assert_eq!(patient.patient_age, "36");
        assert_eq!(patient.queries_raised, vec![first.id, second.id]);
    }

    #[test]
    fn intake_gender_propagates_to_patient() {
        let conn = conn();
        let mut input = intake("9876543210");
        input.patient_gender = Some(Gender::Female);
        create_enquiry(&conn, &input).unwrap();

        let patient = db::get_patient_by_mobile(&conn, "9876543210")
            .unwrap()
            .unwrap();
        assert_eq!(patient.patient_gender, Gender::Female);
    }

    #[test]
    fn invalid_mobile_writes_nothing() {
        let conn = conn();
        let mut input = intake("12345");
        input.patient_mob = "12345".into();
        let err = create_enquiry(&conn, &input).unwrap_err();
        assert!(matches!(err, EnquiryError::Validation(_)));

        assert_eq!(db::count_patients(&conn).unwrap(), 0);
        assert_eq!(db::count_enquiries(&conn, None, None).unwrap(), 0);
    }

    #[test]
    fn out_of_range_age_rejected() {
        let conn = conn();
        for age in [0, 100, -3] {
            let mut input = intake("9876543210");
            input.patient_age = age;
            let err = create_enquiry(&conn, &input).unwrap_err();
            assert!(matches!(err, EnquiryError::Validation(_)), "age {age}");
        }
    }

    #[test]
    fn blank_name_and_long_message_rejected() {
        let conn = conn();
        let mut input = intake("9876543210");
        input.patient_name = "   ".into();
        assert!(matches!(
            create_enquiry(&conn, &input).unwrap_err(),
            EnquiryError::Validation(_)
        ));

        let mut input = intake("9876543210");
        input.message = Some("x".repeat(201));
        assert!(matches!(
            create_enquiry(&conn, &input).unwrap_err(),
            EnquiryError::Validation(_)
        ));
    }

    #[test]
    fn message_is_optional_and_defaults_empty() {
        let conn = conn();
        let mut input = intake("9876543210");
        input.message = None;
        let view = create_enquiry(&conn, &input).unwrap();
        assert_eq!(view.message, "");
    }

    // ── Update & reconciliation ─────────────────────────────

    #[test]
    fn update_missing_enquiry_is_not_found_and_touches_nothing() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Viewed),
            ..Default::default()
        };
        let err = update_enquiry(&conn, Uuid::new_v4(), &patch).unwrap_err();
        assert!(matches!(err, EnquiryError::NotFound { .. }));
        assert!(assigned_list(&conn, &doctor.id).is_empty());
    }

    #[test]
    fn assign_then_fetch_by_assignee() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();

        let view = update_enquiry(&conn, enquiry.id, &assign_patch(doctor.id)).unwrap();
        let assignee = view.assignee.unwrap();
        assert_eq!(assignee.id, doctor.id);
        assert_eq!(assignee.employee_id, "DOC001");

        let page = list_by_assignee(&conn, doctor.id, 1, 10).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, enquiry.id);
        assert_eq!(assigned_list(&conn, &doctor.id), vec![enquiry.id]);
    }

    #[test]
    fn reassignment_round_trip_leaves_single_reference() {
        let conn = conn();
        let a = add_doctor(&conn, "DOC001");
        let b = add_doctor(&conn, "DOC002");
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();

        update_enquiry(&conn, enquiry.id, &assign_patch(a.id)).unwrap();
        update_enquiry(&conn, enquiry.id, &assign_patch(b.id)).unwrap();
        update_enquiry(&conn, enquiry.id, &assign_patch(a.id)).unwrap();

        assert_eq!(assigned_list(&conn, &a.id), vec![enquiry.id]);
        assert!(assigned_list(&conn, &b.id).is_empty());
    }

    #[test]
    fn reassigning_same_doctor_is_a_no_op() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();

        update_enquiry(&conn, enquiry.id, &assign_patch(doctor.id)).unwrap();
        update_enquiry(&conn, enquiry.id, &assign_patch(doctor.id)).unwrap();

        assert_eq!(assigned_list(&conn, &doctor.id), vec![enquiry.id]);
    }

    #[test]
    fn clearing_assignee_removes_back_reference() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();

        update_enquiry(&conn, enquiry.id, &assign_patch(doctor.id)).unwrap();
        let view = update_enquiry(&conn, enquiry.id, &clear_patch()).unwrap();

        assert!(view.assignee.is_none());
        assert!(assigned_list(&conn, &doctor.id).is_empty());
    }

    #[test]
    fn patch_without_assignee_field_keeps_assignment() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();
        update_enquiry(&conn, enquiry.id, &assign_patch(doctor.id)).unwrap();

        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Viewed),
            ..Default::default()
        };
        let view = update_enquiry(&conn, enquiry.id, &patch).unwrap();

        assert_eq!(view.status, EnquiryStatus::Viewed);
        assert_eq!(view.assignee.unwrap().id, doctor.id);
        assert_eq!(assigned_list(&conn, &doctor.id), vec![enquiry.id]);
    }

    #[test]
    fn unknown_assignee_keeps_dangling_reference() {
        let conn = conn();
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();
        let ghost = Uuid::new_v4();

        let view = update_enquiry(&conn, enquiry.id, &assign_patch(ghost)).unwrap();
        // Expansion cannot resolve the ghost, but the reference persists.
        assert!(view.assignee.is_none());
        let stored = db::get_enquiry(&conn, &enquiry.id).unwrap().unwrap();
        assert_eq!(stored.assignee, Some(ghost));
    }

    #[test]
    fn patch_validates_fields_like_intake() {
        let conn = conn();
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();

        let patch = EnquiryPatch {
            patient_mob: Some("12".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_enquiry(&conn, enquiry.id, &patch).unwrap_err(),
            EnquiryError::Validation(_)
        ));

        let patch = EnquiryPatch {
            patient_age: Some(120),
            ..Default::default()
        };
        assert!(matches!(
            update_enquiry(&conn, enquiry.id, &patch).unwrap_err(),
            EnquiryError::Validation(_)
        ));
    }

    #[test]
    fn status_transitions_are_unrestricted() {
        let conn = conn();
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();

        for status in [
            EnquiryStatus::Completed,
            EnquiryStatus::New,
            EnquiryStatus::Viewed,
        ] {
            let patch = EnquiryPatch {
                status: Some(status),
                ..Default::default()
            };
            let view = update_enquiry(&conn, enquiry.id, &patch).unwrap();
            assert_eq!(view.status, status);
        }
    }

    // ── Delete ──────────────────────────────────────────────

    #[test]
    fn delete_prunes_doctor_and_patient_references() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        let enquiry = create_enquiry(&conn, &intake("9876543210")).unwrap();
        update_enquiry(&conn, enquiry.id, &assign_patch(doctor.id)).unwrap();

        delete_enquiry(&conn, enquiry.id).unwrap();

        assert!(db::get_enquiry(&conn, &enquiry.id).unwrap().is_none());
        assert!(assigned_list(&conn, &doctor.id).is_empty());
        let patient = db::get_patient_by_mobile(&conn, "9876543210")
            .unwrap()
            .unwrap();
        assert!(patient.queries_raised.is_empty());
    }

    #[test]
    fn delete_missing_enquiry_is_not_found() {
        let conn = conn();
        assert!(matches!(
            delete_enquiry(&conn, Uuid::new_v4()).unwrap_err(),
            EnquiryError::NotFound { .. }
        ));
    }

    // ── Read projections ────────────────────────────────────

    #[test]
    fn create_then_list_includes_new_unassigned_enquiry() {
        let conn = conn();
        let created = create_enquiry(&conn, &intake("9876543210")).unwrap();

        let page = list_enquiries(&conn, 1, 10, None, None).unwrap();
        let found = page.data.iter().find(|e| e.id == created.id).unwrap();
        assert_eq!(found.status, EnquiryStatus::New);
        assert!(found.assignee.is_none());
        assert_eq!(found.patient_name, "John Doe");
    }

    #[test]
    fn get_missing_enquiry_is_not_found() {
        let conn = conn();
        assert!(matches!(
            get_enquiry(&conn, Uuid::new_v4()).unwrap_err(),
            EnquiryError::NotFound { .. }
        ));
    }

    #[test]
    fn pages_partition_the_full_set_newest_first() {
        let conn = conn();
        for i in 0..25 {
            let mut input = intake(&format!("98765432{i:02}"));
            input.patient_name = format!("Patient {i}");
            create_enquiry(&conn, &input).unwrap();
        }

        let mut seen = Vec::new();
        let first = list_enquiries(&conn, 1, 10, None, None).unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 3);
        for page_no in 1..=first.total_pages {
            let page = list_enquiries(&conn, page_no, 10, None, None).unwrap();
            assert!(page.data.len() <= 10);
            seen.extend(page.data.iter().map(|e| e.id));
            // Newest first within each page.
            for pair in page.data.windows(2) {
                assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
        assert_eq!(seen.len(), 25);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 25, "each enquiry appears exactly once");

        let past_end = list_enquiries(&conn, 4, 10, None, None).unwrap();
        assert!(past_end.data.is_empty());
        assert_eq!(past_end.total, 25);
    }

    #[test]
    fn filters_compose_with_and() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        let a = create_enquiry(&conn, &intake("9876543210")).unwrap();
        let b = create_enquiry(&conn, &intake("9876543211")).unwrap();
        create_enquiry(&conn, &intake("9876543212")).unwrap();

        update_enquiry(&conn, a.id, &assign_patch(doctor.id)).unwrap();
        update_enquiry(&conn, b.id, &assign_patch(doctor.id)).unwrap();
        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Viewed),
            ..Default::default()
        };
        update_enquiry(&conn, a.id, &patch).unwrap();

        let page = list_enquiries(
            &conn,
            1,
            10,
            Some(EnquiryStatus::Viewed),
            Some(doctor.id),
        )
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, a.id);
    }

    #[test]
    fn list_by_assignee_empty_for_idle_doctor_and_not_found_for_ghost() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");

        let page = list_by_assignee(&conn, doctor.id, 1, 10).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);

        assert!(matches!(
            list_by_assignee(&conn, Uuid::new_v4(), 1, 10).unwrap_err(),
            EnquiryError::NotFound { .. }
        ));
    }

    #[test]
    fn export_honours_filters_without_pagination() {
        let conn = conn();
        let doctor = add_doctor(&conn, "DOC001");
        for i in 0..15 {
            let enquiry = create_enquiry(&conn, &intake(&format!("98765432{i:02}"))).unwrap();
            if i % 3 == 0 {
                update_enquiry(&conn, enquiry.id, &assign_patch(doctor.id)).unwrap();
            }
        }

        let all = list_all_for_export(&conn, None, None).unwrap();
        assert_eq!(all.len(), 15);

        let assigned = list_all_for_export(&conn, None, Some(doctor.id)).unwrap();
        assert_eq!(assigned.len(), 5);
        assert!(assigned
            .iter()
            .all(|e| e.assignee.as_ref().map(|a| a.id) == Some(doctor.id)));
    }
}
