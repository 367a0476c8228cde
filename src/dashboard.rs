//! Admin dashboard aggregation — headline counters plus the most recent
//! enquiries, all read from the same collections the listings use.

use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::enquiry::{self, EnquiryError};
use crate::models::{EnquiryStatus, EnquiryView};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_enquiries: i64,
    pub new_enquiries: i64,
    pub total_doctors: i64,
    pub total_services: i64,
    pub recent_enquiries: Vec<EnquiryView>,
}

pub fn dashboard_stats(conn: &Connection) -> Result<DashboardStats, EnquiryError> {
    let recent = enquiry::list_enquiries(conn, 1, 10, None, None)?;
    let new_enquiries = db::count_enquiries(conn, Some(EnquiryStatus::New), None)?;
    let total_doctors = db::count_doctors(conn)?;
    let total_services = db::count_services(conn)?;

    Ok(DashboardStats {
        total_enquiries: recent.total,
        new_enquiries,
        total_doctors,
        total_services,
        recent_enquiries: recent.data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{CreateEnquiry, EnquiryPatch, ServiceCategory};

    #[test]
    fn counters_reflect_the_collections() {
        let conn = open_memory_database().unwrap();
        for i in 0..12 {
            crate::enquiry::create_enquiry(
                &conn,
                &CreateEnquiry {
                    patient_name: "John Doe".into(),
                    patient_age: 35,
                    patient_mob: format!("98765432{i:02}"),
                    patient_gender: None,
                    message: None,
                    service: ServiceCategory::SecondOpinion,
                },
            )
            .unwrap();
        }

        // Move one enquiry out of `new`.
        let page = crate::enquiry::list_enquiries(&conn, 1, 1, None, None).unwrap();
        crate::enquiry::update_enquiry(
            &conn,
            page.data[0].id,
            &EnquiryPatch {
                status: Some(crate::models::EnquiryStatus::Viewed),
                ..Default::default()
            },
        )
        .unwrap();

        let stats = dashboard_stats(&conn).unwrap();
        assert_eq!(stats.total_enquiries, 12);
        assert_eq!(stats.new_enquiries, 11);
        assert_eq!(stats.total_doctors, 0);
        assert_eq!(stats.total_services, 0);
        assert_eq!(stats.recent_enquiries.len(), 10);
    }
}
