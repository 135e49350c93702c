//! Table definitions for patients, doctors and appointments

use anyhow::{Context, Result};
use rusqlite::Connection;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS patients (
        patient_id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        date_of_birth TEXT NOT NULL,
        gender TEXT NOT NULL,
        address TEXT NOT NULL,
        phone_number TEXT,
        email TEXT
    );

    CREATE TABLE IF NOT EXISTS doctors (
        doctor_id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        specialization TEXT NOT NULL,
        phone_number TEXT,
        email TEXT,
        years_of_experience INTEGER CHECK (years_of_experience >= 0)
    );

    CREATE TABLE IF NOT EXISTS appointments (
        appointment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL REFERENCES patients(patient_id),
        doctor_id INTEGER NOT NULL REFERENCES doctors(doctor_id),
        appointment_date TEXT NOT NULL,
        reason TEXT,
        status TEXT NOT NULL DEFAULT 'Pending' CHECK (status IN ('Pending', 'Done'))
    );

    CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date);
";

/// Create the tables if they do not exist yet. Safe to call on every open.
pub fn ensure(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Failed to create medical service schema")?;
    Ok(())
}
