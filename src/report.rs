//! Text rendering of listings and reports
//!
//! Pure functions from rows to lines. Each output starts with a blank line,
//! a title and a header row; fields are joined with ` | ` and appointment
//! rows are numbered from 1.

use crate::datetime::{DATETIME_FORMAT, TIME_FORMAT};
use crate::model::{AppointmentRow, DoctorRow, PatientRow};

pub const DELIMITER: &str = " | ";

fn join<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| field.as_ref())
        .collect::<Vec<&str>>()
        .join(DELIMITER)
}

fn framed(title: &str, header: &[&str], body: impl Iterator<Item = String>) -> Vec<String> {
    let mut lines = vec![String::new(), title.to_string(), join(header)];
    lines.extend(body);
    lines
}

pub fn patients(rows: &[PatientRow]) -> Vec<String> {
    framed(
        "Patients:",
        &["ID", "Full Name", "DOB", "Gender", "Address"],
        rows.iter().map(|r| {
            join(&[
                r.id.to_string(),
                r.full_name.clone(),
                r.date_of_birth.clone(),
                r.gender.clone(),
                r.address.clone(),
            ])
        }),
    )
}

pub fn doctors(rows: &[DoctorRow]) -> Vec<String> {
    framed(
        "Doctors:",
        &["ID", "Full Name", "Specialization"],
        rows.iter().map(|r| {
            join(&[
                r.id.to_string(),
                r.full_name.clone(),
                r.specialization.clone(),
            ])
        }),
    )
}

/// Every appointment with patient details, doctor, reason and full date-time.
pub fn full_report(rows: &[AppointmentRow]) -> Vec<String> {
    framed(
        "--- Report ---",
        &[
            "No",
            "Patient Name",
            "Birthday",
            "Gender",
            "Address",
            "Doctor",
            "Reason",
            "Date/Time",
        ],
        rows.iter().enumerate().map(|(idx, r)| {
            join(&[
                (idx + 1).to_string(),
                r.patient_name.clone(),
                r.date_of_birth.clone(),
                r.gender.clone(),
                r.address.clone(),
                r.doctor_name.clone(),
                r.reason.clone(),
                r.scheduled_at.format(DATETIME_FORMAT).to_string(),
            ])
        }),
    )
}

/// Today's appointments; the address leads and only the time of day is shown.
pub fn today(rows: &[AppointmentRow]) -> Vec<String> {
    framed(
        "--- Today's Appointments ---",
        &[
            "Address",
            "No",
            "Patient Name",
            "Birthday",
            "Gender",
            "Doctor",
            "Status",
            "Note",
            "Time",
        ],
        rows.iter().enumerate().map(|(idx, r)| {
            join(&[
                r.address.clone(),
                (idx + 1).to_string(),
                r.patient_name.clone(),
                r.date_of_birth.clone(),
                r.gender.clone(),
                r.doctor_name.clone(),
                r.status.to_string(),
                r.reason.clone(),
                r.scheduled_at.format(TIME_FORMAT).to_string(),
            ])
        }),
    )
}
