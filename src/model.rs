//! Records written to and read from the store

use anyhow::{anyhow, Error};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// A patient ready to be inserted; the identifier is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub full_name: String,
    /// Entered as `YYYY-MM-DD`, stored as given
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// A doctor ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub full_name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub years_of_experience: Option<u32>,
}

/// An appointment whose patient and doctor have already been confirmed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub scheduled_at: NaiveDateTime,
    pub reason: String,
    pub status: AppointmentStatus,
}

/// Appointment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Done,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Done => "Done",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pending") {
            Ok(AppointmentStatus::Pending)
        } else if s.eq_ignore_ascii_case("done") {
            Ok(AppointmentStatus::Done)
        } else {
            Err(anyhow!("Unknown appointment status '{}'", s))
        }
    }
}

/// Row of the patient listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
}

/// Row of the doctor listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorRow {
    pub id: i64,
    pub full_name: String,
    pub specialization: String,
}

/// An appointment joined with its patient and doctor.
///
/// Shared by the full report and the today listing; each renders a
/// different subset of the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRow {
    pub appointment_id: i64,
    pub patient_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub doctor_name: String,
    pub status: AppointmentStatus,
    pub reason: String,
    pub scheduled_at: NaiveDateTime,
}
