//! Interactive entry of patients, doctors and appointments.
//!
//! Each reader collects exactly one record. In the flexible variant the
//! first prompt doubles as the exit point (`q` returns `None`); in the
//! strict variant every call yields a record.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::config::Variant;
use crate::console::Console;
use crate::datetime::{parse_appointment_time, Clock};
use crate::db::{Store, Table};
use crate::model::{NewAppointment, NewDoctor, NewPatient};
use crate::validate;

/// Ask for the record's name, honouring the stop sentinel in the flexible variant.
fn full_name<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    variant: Variant,
    kind: &str,
    number: usize,
) -> Result<Option<String>> {
    match variant {
        Variant::Flexible => loop {
            let answer = console.ask(&format!(
                "\nFull name for {} {} (or 'q' to stop): ",
                kind, number
            ))?;
            if validate::is_sentinel(&answer) {
                return Ok(None);
            }
            match validate::non_empty(&answer) {
                Some(name) => return Ok(Some(name.to_string())),
                None => console.say("Name is required.")?,
            }
        },
        Variant::Strict => {
            console.say(format!("\nEnter details for {} {}:", kind, number))?;
            console.required("Full name: ").map(Some)
        }
    }
}

pub fn read_patient<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    variant: Variant,
    number: usize,
) -> Result<Option<NewPatient>> {
    let Some(full_name) = full_name(console, variant, "patient", number)? else {
        return Ok(None);
    };

    Ok(Some(NewPatient {
        full_name,
        date_of_birth: console.required("Date of birth (YYYY-MM-DD): ")?,
        gender: console.required("Gender: ")?,
        address: console.required("Address: ")?,
        phone: console.optional("Phone number (optional): ")?,
        email: console.optional("Email (optional): ")?,
    }))
}

pub fn read_doctor<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    variant: Variant,
    number: usize,
) -> Result<Option<NewDoctor>> {
    let Some(full_name) = full_name(console, variant, "doctor", number)? else {
        return Ok(None);
    };

    let specialization = console.required("Specialization: ")?;
    let phone = console.optional("Phone number (optional): ")?;
    let email = console.optional("Email (optional): ")?;
    let experience = console.optional("Years of experience (optional number): ")?;

    Ok(Some(NewDoctor {
        full_name,
        specialization,
        phone,
        email,
        years_of_experience: validate::parse_experience(&experience),
    }))
}

/// Collect one appointment, checking both references against `store`.
///
/// A non-numeric or unknown patient/doctor ID restarts the record from
/// the patient ID prompt.
pub fn read_appointment<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &Store,
    clock: &dyn Clock,
    variant: Variant,
    number: usize,
) -> Result<Option<NewAppointment>> {
    if variant == Variant::Strict {
        console.say(format!("\nEnter appointment {}:", number))?;
    }

    loop {
        let raw_patient = match variant {
            Variant::Flexible => {
                let answer = console.ask(&format!(
                    "\nPatient ID for appointment {} (or 'q' to stop): ",
                    number
                ))?;
                if validate::is_sentinel(&answer) {
                    return Ok(None);
                }
                answer
            }
            Variant::Strict => console.ask("Patient ID: ")?,
        };

        let Some(patient_id) = validate::parse_id(&raw_patient) else {
            console.say("Please enter a numeric Patient ID.")?;
            continue;
        };
        if !store.exists(Table::Patients, patient_id)? {
            console.say("Patient ID not found. Use 'List Patients' to see valid IDs.")?;
            continue;
        }

        let raw_doctor = console.required("Doctor ID: ")?;
        let Some(doctor_id) = validate::parse_id(&raw_doctor) else {
            console.say("Please enter a numeric Doctor ID.")?;
            continue;
        };
        if !store.exists(Table::Doctors, doctor_id)? {
            console.say("Doctor ID not found. Use 'List Doctors' to see valid IDs.")?;
            continue;
        }

        let raw_date = console.optional("Appointment date (YYYY-MM-DD HH:MM:SS) [Enter for now]: ")?;
        let scheduled = parse_appointment_time(&raw_date, clock.now());
        if scheduled.needs_warning() {
            console.say("Invalid date/time format. Using current date/time instead.")?;
        }

        let reason = console.optional("Reason (optional): ")?;
        let status = loop {
            let raw_status = console.optional("Status (Pending/Done) [default Pending]: ")?;
            match validate::parse_status(&raw_status) {
                Some(status) => break status,
                None => console.say("Status must be Pending or Done.")?,
            }
        };

        return Ok(Some(NewAppointment {
            patient_id,
            doctor_id,
            scheduled_at: scheduled.value(),
            reason,
            status,
        }));
    }
}
