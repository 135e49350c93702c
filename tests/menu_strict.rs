//! End-to-end runs of the strict menu: fixed-size rounds, no sentinel

use chrono::NaiveDateTime;
use medical_service::datetime::{FixedClock, DATETIME_FORMAT};
use medical_service::db::{ConnectionProvider, Table};
use medical_service::menu::{STRICT_APPOINTMENTS, STRICT_DOCTORS, STRICT_PATIENTS};
use medical_service::{Console, Menu, SqliteProvider, Variant};
use std::io::Cursor;
use tempfile::TempDir;

fn run(provider: &SqliteProvider, script: &str) -> String {
    let now = NaiveDateTime::parse_from_str("2024-05-10 12:00:00", DATETIME_FORMAT).unwrap();
    let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let mut menu =
        Menu::new(provider.clone(), console, Variant::Strict).with_clock(FixedClock(now));
    menu.run().unwrap();
    String::from_utf8(menu.into_console().into_output()).unwrap()
}

fn patient_lines(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("{}\n1990-01-01\nF\nSomewhere\n\n\n", name))
        .collect()
}

fn doctor_lines(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("{}\nGeneral Practice\n\n\n\n", name))
        .collect()
}

fn round_one() -> String {
    format!(
        "1\n{}{}",
        patient_lines(&["q", "Ada", "Grace"]),
        doctor_lines(&["House", "Wilson", "Cuddy", "Chase", "q"])
    )
}

#[test]
fn test_round_collects_exactly_three_patients_and_five_doctors() {
    let dir = TempDir::new().unwrap();
    let provider = SqliteProvider::new(dir.path().join("strict.db"));

    let out = run(&provider, &format!("{}0\n", round_one()));

    let session = provider.open().unwrap();
    assert_eq!(session.count(Table::Patients).unwrap(), STRICT_PATIENTS as i64);
    assert_eq!(session.count(Table::Doctors).unwrap(), STRICT_DOCTORS as i64);
    assert_eq!(session.list_patients().unwrap()[0].full_name, "q");
    assert!(out.contains("3 patients and 5 doctors added successfully"));
    assert!(out.contains("Enter details for doctor 5:"));
    assert!(!out.contains("Enter details for patient 4:"));
}

#[test]
fn test_round_requires_names() {
    let dir = TempDir::new().unwrap();
    let provider = SqliteProvider::new(dir.path().join("strict.db"));

    // a blank name is re-asked inside the same cycle
    let script = format!("1\n\n{}0\n", &round_one()[2..]);
    let out = run(&provider, &script);

    assert!(out.contains("This field is required. Please enter a value."));
    assert_eq!(
        provider.open().unwrap().count(Table::Patients).unwrap(),
        STRICT_PATIENTS as i64
    );
}

#[test]
fn test_appointments_round_and_report_in_entry_order() {
    let dir = TempDir::new().unwrap();
    let provider = SqliteProvider::new(dir.path().join("strict.db"));

    let script = format!(
        "{}2\n\
         2\n1\n2024-01-03 09:00:00\nLater\nDone\n\
         99\n3\n2\n2024-01-01 09:00:00\nEarlier\n\n\
         1\n5\nnot-a-date\nWalk-in\npending\n\
         3\n0\n",
        round_one()
    );
    let out = run(&provider, &script);

    assert_eq!(
        provider.open().unwrap().count(Table::Appointments).unwrap(),
        STRICT_APPOINTMENTS as i64
    );
    assert!(out.contains("Patient ID not found."));
    assert!(out.contains("Invalid date/time format. Using current date/time instead."));
    assert!(out.contains("3 appointments added successfully"));

    assert!(out.contains("1 | Ada | 1990-01-01 | F | Somewhere | House | Later | 2024-01-03 09:00:00"));
    assert!(out.contains("2 | Grace | 1990-01-01 | F | Somewhere | Wilson | Earlier | 2024-01-01 09:00:00"));
    assert!(out.contains("3 | q | 1990-01-01 | F | Somewhere | q | Walk-in | 2024-05-10 12:00:00"));
}

#[test]
fn test_strict_menu_has_no_today_option() {
    let dir = TempDir::new().unwrap();
    let provider = SqliteProvider::new(dir.path().join("strict.db"));

    let out = run(&provider, "5\n0\n");
    assert!(out.contains("--- Assignment Strict Version ---"));
    assert!(out.contains("Invalid choice. Try again."));
    assert!(out.contains("Bye!"));
}
