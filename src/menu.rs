//! The interactive menu loop
//!
//! Each action opens its own session from the provider and drops it
//! before returning to the menu. Store failures are not caught here; they
//! bubble out of [`Menu::run`] and end the program.

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use crate::collect;
use crate::config::Variant;
use crate::console::{Console, InputClosed};
use crate::datetime::{Clock, SystemClock};
use crate::db::{self, ConnectionProvider, ReportOrder};
use crate::logging::log_debug;
use crate::report;

/// Patients entered per strict round
pub const STRICT_PATIENTS: usize = 3;
/// Doctors entered per strict round
pub const STRICT_DOCTORS: usize = 5;
/// Appointments entered per strict round
pub const STRICT_APPOINTMENTS: usize = 3;

enum Flow {
    Continue,
    Exit,
}

/// How a failed run should end the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Input ended; treated like the user interrupting.
    Interrupted,
    /// The database failed.
    Store,
    Other,
}

impl Failure {
    pub fn classify(err: &anyhow::Error) -> Self {
        if err.is::<InputClosed>() {
            Failure::Interrupted
        } else if db::is_store_error(err) {
            Failure::Store
        } else {
            Failure::Other
        }
    }
}

pub struct Menu<P, R, W> {
    provider: P,
    console: Console<R, W>,
    clock: Box<dyn Clock>,
    variant: Variant,
}

impl<P: ConnectionProvider, R: BufRead, W: Write> Menu<P, R, W> {
    pub fn new(provider: P, console: Console<R, W>, variant: Variant) -> Self {
        Self {
            provider,
            console,
            clock: Box::new(SystemClock),
            variant,
        }
    }

    /// Replace the system clock, e.g. to pin "today" in tests.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Show the menu and dispatch choices until the user exits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let choice = self.console.ask("Enter choice: ")?;
            let choice = choice.trim();
            log_debug("menu", &format!("choice = {:?}", choice));

            let flow = match self.variant {
                Variant::Flexible => self.dispatch_flexible(choice)?,
                Variant::Strict => self.dispatch_strict(choice)?,
            };
            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        let items: &[&str] = match self.variant {
            Variant::Flexible => &[
                "\n=== Medical Service (Flexible) ===",
                "1. Add Patients",
                "2. Add Doctors",
                "3. Add Appointments",
                "4. Show Report",
                "5. Show Today's Appointments",
                "6. List Patients (IDs)",
                "7. List Doctors (IDs)",
                "0. Exit",
            ],
            Variant::Strict => &[
                "\n--- Assignment Strict Version ---",
                "1. Add 3 Patients and 5 Doctors",
                "2. Add 3 Appointments for 3 Patients",
                "3. Show Report",
                "0. Exit",
            ],
        };
        for item in items {
            self.console.say(item)?;
        }
        Ok(())
    }

    fn dispatch_flexible(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.add_patients()?,
            "2" => self.add_doctors()?,
            "3" => self.add_appointments()?,
            "4" => self.show_report(ReportOrder::Newest)?,
            "5" => self.show_today()?,
            "6" => self.list_patients()?,
            "7" => self.list_doctors()?,
            "0" => return self.exit(),
            _ => self.console.say("Invalid choice. Try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn dispatch_strict(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.add_strict_round()?,
            "2" => self.add_strict_appointments()?,
            "3" => self.show_report(ReportOrder::Insertion)?,
            "0" => return self.exit(),
            _ => self.console.say("Invalid choice. Try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<Flow> {
        self.console.say("Bye!")?;
        Ok(Flow::Exit)
    }

    fn confirm(&mut self, msg: &str) -> Result<()> {
        self.console.say(format!("{} {}", "✓".green().bold(), msg))
    }

    fn print_lines(&mut self, lines: Vec<String>) -> Result<()> {
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn add_patients(&mut self) -> Result<()> {
        self.console
            .say("\nAdd Patients (type 'q' at Full name to stop)")?;
        let session = self.provider.open()?;

        let mut number = 1;
        while let Some(patient) = collect::read_patient(&mut self.console, self.variant, number)? {
            session.insert_patient(&patient)?;
            self.confirm("Patient added.")?;
            number += 1;
        }

        self.console.say("Done adding patients.")
    }

    fn add_doctors(&mut self) -> Result<()> {
        self.console
            .say("\nAdd Doctors (type 'q' at Full name to stop)")?;
        let session = self.provider.open()?;

        let mut number = 1;
        while let Some(doctor) = collect::read_doctor(&mut self.console, self.variant, number)? {
            session.insert_doctor(&doctor)?;
            self.confirm("Doctor added.")?;
            number += 1;
        }

        self.console.say("Done adding doctors.")
    }

    fn add_appointments(&mut self) -> Result<()> {
        self.console
            .say("\nAdd Appointments (type 'q' for Patient ID to stop)")?;
        self.list_patients()?;
        self.list_doctors()?;

        let session = self.provider.open()?;
        let mut number = 1;
        while let Some(appointment) = collect::read_appointment(
            &mut self.console,
            &session,
            self.clock.as_ref(),
            self.variant,
            number,
        )? {
            session.insert_appointment(&appointment)?;
            self.confirm("Appointment added.")?;
            number += 1;
        }

        self.console.say("Done adding appointments.")
    }

    fn add_strict_round(&mut self) -> Result<()> {
        let session = self.provider.open()?;

        for number in 1..=STRICT_PATIENTS {
            if let Some(patient) = collect::read_patient(&mut self.console, self.variant, number)? {
                session.insert_patient(&patient)?;
            }
        }
        for number in 1..=STRICT_DOCTORS {
            if let Some(doctor) = collect::read_doctor(&mut self.console, self.variant, number)? {
                session.insert_doctor(&doctor)?;
            }
        }

        self.confirm(&format!(
            "{} patients and {} doctors added successfully",
            STRICT_PATIENTS, STRICT_DOCTORS
        ))
    }

    fn add_strict_appointments(&mut self) -> Result<()> {
        let session = self.provider.open()?;

        for number in 1..=STRICT_APPOINTMENTS {
            if let Some(appointment) = collect::read_appointment(
                &mut self.console,
                &session,
                self.clock.as_ref(),
                self.variant,
                number,
            )? {
                session.insert_appointment(&appointment)?;
            }
        }

        self.confirm(&format!(
            "{} appointments added successfully",
            STRICT_APPOINTMENTS
        ))
    }

    fn show_report(&mut self, order: ReportOrder) -> Result<()> {
        let rows = self.provider.open()?.full_report(order)?;
        self.print_lines(report::full_report(&rows))
    }

    fn show_today(&mut self) -> Result<()> {
        let today = self.clock.today();
        let rows = self.provider.open()?.today_appointments(today)?;
        self.print_lines(report::today(&rows))
    }

    fn list_patients(&mut self) -> Result<()> {
        let rows = self.provider.open()?.list_patients()?;
        self.print_lines(report::patients(&rows))
    }

    fn list_doctors(&mut self) -> Result<()> {
        let rows = self.provider.open()?.list_doctors()?;
        self.print_lines(report::doctors(&rows))
    }
}
