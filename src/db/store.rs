//! Parameterized inserts and report queries
//!
//! Table and column names only ever come from [`Table`]; every value is bound.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row, ToSql};

use crate::datetime::{DATETIME_FORMAT, DATE_FORMAT};
use crate::logging::log_debug;
use crate::model::{
    AppointmentRow, AppointmentStatus, DoctorRow, NewAppointment, NewDoctor, NewPatient,
    PatientRow,
};

/// Tables owned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Patients,
    Doctors,
    Appointments,
}

impl Table {
    pub fn table_name(&self) -> &'static str {
        match self {
            Table::Patients => "patients",
            Table::Doctors => "doctors",
            Table::Appointments => "appointments",
        }
    }

    pub fn id_column(&self) -> &'static str {
        match self {
            Table::Patients => "patient_id",
            Table::Doctors => "doctor_id",
            Table::Appointments => "appointment_id",
        }
    }
}

/// Ordering of the full appointment report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOrder {
    /// Latest appointment first, ties broken by newest identifier
    Newest,
    /// In the order appointments were recorded
    Insertion,
}

impl ReportOrder {
    fn order_by(&self) -> &'static str {
        match self {
            ReportOrder::Newest => "a.appointment_date DESC, a.appointment_id DESC",
            ReportOrder::Insertion => "a.appointment_id",
        }
    }
}

const APPOINTMENT_SELECT: &str = "
    SELECT a.appointment_id, p.full_name, p.date_of_birth, p.gender, p.address,
           d.full_name, a.status, a.reason, a.appointment_date
    FROM appointments a
    JOIN patients p ON a.patient_id = p.patient_id
    JOIN doctors d ON a.doctor_id = d.doctor_id";

impl ToSql for AppointmentStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AppointmentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: anyhow::Error| FromSqlError::Other(e.into()))
    }
}

/// Access to the medical service tables over one connection
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn insert_patient(&self, patient: &NewPatient) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO patients (full_name, date_of_birth, gender, address, phone_number, email)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    &patient.full_name,
                    &patient.date_of_birth,
                    &patient.gender,
                    &patient.address,
                    &patient.phone,
                    &patient.email,
                ],
            )
            .context("Failed to insert patient")?;

        let id = self.conn.last_insert_rowid();
        log_debug("db::store", &format!("inserted patient {}", id));
        Ok(id)
    }

    pub fn insert_doctor(&self, doctor: &NewDoctor) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO doctors (full_name, specialization, phone_number, email, years_of_experience)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    &doctor.full_name,
                    &doctor.specialization,
                    &doctor.phone,
                    &doctor.email,
                    doctor.years_of_experience,
                ],
            )
            .context("Failed to insert doctor")?;

        let id = self.conn.last_insert_rowid();
        log_debug("db::store", &format!("inserted doctor {}", id));
        Ok(id)
    }

    /// Insert an appointment. Callers check both references with
    /// [`Store::exists`] first; the foreign keys are a backstop.
    pub fn insert_appointment(&self, appointment: &NewAppointment) -> Result<i64> {
        let scheduled_at = appointment.scheduled_at.format(DATETIME_FORMAT).to_string();
        self.conn
            .execute(
                "INSERT INTO appointments (patient_id, doctor_id, appointment_date, reason, status)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    appointment.patient_id,
                    appointment.doctor_id,
                    scheduled_at,
                    &appointment.reason,
                    appointment.status,
                ],
            )
            .context("Failed to insert appointment")?;

        let id = self.conn.last_insert_rowid();
        log_debug(
            "db::store",
            &format!(
                "inserted appointment {} (patient {}, doctor {})",
                id, appointment.patient_id, appointment.doctor_id
            ),
        );
        Ok(id)
    }

    /// Whether a row with the given identifier exists in `table`.
    pub fn exists(&self, table: Table, id: i64) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1)",
            table.table_name(),
            table.id_column()
        );
        let found = self
            .conn
            .query_row(&sql, [id], |row| row.get(0))
            .with_context(|| format!("Failed to look up {} {}", table.table_name(), id))?;
        Ok(found)
    }

    pub fn count(&self, table: Table) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.table_name());
        let count = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .with_context(|| format!("Failed to count {}", table.table_name()))?;
        Ok(count)
    }

    pub fn list_patients(&self) -> Result<Vec<PatientRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT patient_id, full_name, date_of_birth, gender, address
             FROM patients
             ORDER BY patient_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PatientRow {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    date_of_birth: row.get(2)?,
                    gender: row.get(3)?,
                    address: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list patients")?;
        Ok(rows)
    }

    pub fn list_doctors(&self) -> Result<Vec<DoctorRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT doctor_id, full_name, specialization
             FROM doctors
             ORDER BY doctor_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DoctorRow {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    specialization: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list doctors")?;
        Ok(rows)
    }

    /// Every appointment joined with its patient and doctor.
    pub fn full_report(&self, order: ReportOrder) -> Result<Vec<AppointmentRow>> {
        let sql = format!("{} ORDER BY {}", APPOINTMENT_SELECT, order.order_by());
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], appointment_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load appointment report")?;
        Ok(rows)
    }

    /// Appointments falling on `today`, earliest first.
    pub fn today_appointments(&self, today: NaiveDate) -> Result<Vec<AppointmentRow>> {
        let sql = format!(
            "{} WHERE date(a.appointment_date) = ?1 ORDER BY a.appointment_date, a.appointment_id",
            APPOINTMENT_SELECT
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([today.format(DATE_FORMAT).to_string()], appointment_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load today's appointments")?;
        Ok(rows)
    }
}

fn appointment_row(row: &Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        appointment_id: row.get(0)?,
        patient_name: row.get(1)?,
        date_of_birth: row.get(2)?,
        gender: row.get(3)?,
        address: row.get(4)?,
        doctor_name: row.get(5)?,
        status: row.get(6)?,
        reason: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        scheduled_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use chrono::NaiveDateTime;

    fn store() -> Result<Store> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::ensure(&conn)?;
        Ok(Store::new(conn))
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).unwrap()
    }

    fn patient(name: &str) -> NewPatient {
        NewPatient {
            full_name: name.to_string(),
            date_of_birth: "1990-04-12".to_string(),
            gender: "F".to_string(),
            address: "12 Elm St".to_string(),
            phone: String::new(),
            email: String::new(),
        }
    }

    fn doctor(name: &str) -> NewDoctor {
        NewDoctor {
            full_name: name.to_string(),
            specialization: "Cardiology".to_string(),
            phone: String::new(),
            email: String::new(),
            years_of_experience: Some(8),
        }
    }

    fn appointment(patient_id: i64, doctor_id: i64, when: &str) -> NewAppointment {
        NewAppointment {
            patient_id,
            doctor_id,
            scheduled_at: at(when),
            reason: "Checkup".to_string(),
            status: AppointmentStatus::Pending,
        }
    }

    #[test]
    fn test_insert_assigns_increasing_ids() -> Result<()> {
        let store = store()?;
        let first = store.insert_patient(&patient("Ada"))?;
        let second = store.insert_patient(&patient("Grace"))?;
        assert!(second > first);
        assert_eq!(store.count(Table::Patients)?, 2);
        Ok(())
    }

    #[test]
    fn test_exists() -> Result<()> {
        let store = store()?;
        let pid = store.insert_patient(&patient("Ada"))?;
        let did = store.insert_doctor(&doctor("House"))?;

        assert!(store.exists(Table::Patients, pid)?);
        assert!(store.exists(Table::Doctors, did)?);
        assert!(!store.exists(Table::Patients, pid + 100)?);
        assert!(!store.exists(Table::Doctors, 0)?);
        Ok(())
    }

    #[test]
    fn test_missing_experience_is_null() -> Result<()> {
        let store = store()?;
        let mut d = doctor("House");
        d.years_of_experience = None;
        let id = store.insert_doctor(&d)?;

        let years: Option<i64> = store.connection().query_row(
            "SELECT years_of_experience FROM doctors WHERE doctor_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        assert_eq!(years, None);
        Ok(())
    }

    #[test]
    fn test_foreign_keys_back_up_existence_checks() -> Result<()> {
        let store = store()?;
        let result = store.insert_appointment(&appointment(1, 1, "2024-01-01 09:00:00"));
        assert!(result.is_err());
        assert_eq!(store.count(Table::Appointments)?, 0);
        Ok(())
    }

    #[test]
    fn test_full_report_newest_first() -> Result<()> {
        let store = store()?;
        let pid = store.insert_patient(&patient("Ada"))?;
        let did = store.insert_doctor(&doctor("House"))?;
        store.insert_appointment(&appointment(pid, did, "2024-01-01 10:00:00"))?;
        store.insert_appointment(&appointment(pid, did, "2024-01-02 10:00:00"))?;

        let rows = store.full_report(ReportOrder::Newest)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scheduled_at, at("2024-01-02 10:00:00"));
        assert_eq!(rows[1].scheduled_at, at("2024-01-01 10:00:00"));
        Ok(())
    }

    #[test]
    fn test_full_report_ties_break_on_newest_id() -> Result<()> {
        let store = store()?;
        let pid = store.insert_patient(&patient("Ada"))?;
        let did = store.insert_doctor(&doctor("House"))?;
        let first = store.insert_appointment(&appointment(pid, did, "2024-03-01 10:00:00"))?;
        let second = store.insert_appointment(&appointment(pid, did, "2024-03-01 10:00:00"))?;

        let ids: Vec<i64> = store
            .full_report(ReportOrder::Newest)?
            .iter()
            .map(|r| r.appointment_id)
            .collect();
        assert_eq!(ids, vec![second, first]);
        Ok(())
    }

    #[test]
    fn test_full_report_insertion_order() -> Result<()> {
        let store = store()?;
        let pid = store.insert_patient(&patient("Ada"))?;
        let did = store.insert_doctor(&doctor("House"))?;
        store.insert_appointment(&appointment(pid, did, "2024-01-02 10:00:00"))?;
        store.insert_appointment(&appointment(pid, did, "2024-01-01 10:00:00"))?;

        let rows = store.full_report(ReportOrder::Insertion)?;
        assert_eq!(rows[0].scheduled_at, at("2024-01-02 10:00:00"));
        assert_eq!(rows[1].scheduled_at, at("2024-01-01 10:00:00"));
        Ok(())
    }

    #[test]
    fn test_today_filters_and_sorts() -> Result<()> {
        let store = store()?;
        let pid = store.insert_patient(&patient("Ada"))?;
        let did = store.insert_doctor(&doctor("House"))?;
        store.insert_appointment(&appointment(pid, did, "2024-05-10 15:00:00"))?;
        store.insert_appointment(&appointment(pid, did, "2024-05-09 23:59:59"))?;
        store.insert_appointment(&appointment(pid, did, "2024-05-10 08:30:00"))?;
        store.insert_appointment(&appointment(pid, did, "2024-05-11 00:00:00"))?;

        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let rows = store.today_appointments(today)?;
        let times: Vec<NaiveDateTime> = rows.iter().map(|r| r.scheduled_at).collect();
        assert_eq!(
            times,
            vec![at("2024-05-10 08:30:00"), at("2024-05-10 15:00:00")]
        );
        Ok(())
    }

    #[test]
    fn test_status_round_trips_through_column() -> Result<()> {
        let store = store()?;
        let pid = store.insert_patient(&patient("Ada"))?;
        let did = store.insert_doctor(&doctor("House"))?;
        let mut done = appointment(pid, did, "2024-01-01 10:00:00");
        done.status = AppointmentStatus::Done;
        store.insert_appointment(&done)?;

        let rows = store.full_report(ReportOrder::Newest)?;
        assert_eq!(rows[0].status, AppointmentStatus::Done);
        assert_eq!(rows[0].patient_name, "Ada");
        assert_eq!(rows[0].doctor_name, "House");
        Ok(())
    }
}
