use crate::core::slots::{available_dates_from, format_dates, slots_at};
use crate::core::validator::{check, localize, validate_at};
use crate::domain::model::{Appointment, BookingRequest, NewAppointment, SLOT_FORMAT};
use crate::domain::ports::{AppointmentStore, Clock};
use crate::utils::error::{Result, TerminError};
use crate::utils::validation::validate_required_text;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use std::sync::Arc;

/// How far ahead a customer may book, measured from "now".
pub const BOOKING_HORIZON_DAYS: i64 = 28;
pub const APPOINTMENT_MINUTES: i64 = 30;
pub const DELETION_KEY_LENGTH: usize = 128;

const KEY_ALPHABET: &[u8; 64] = b"_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draws a URL-safe token from the OS random source.
///
/// Each v4 UUID carries 15 fully random bytes once byte 6 (the version
/// nibble) is skipped; byte 8 keeps its variant bits in the top two positions,
/// so its low six bits stay uniform.
///
/// # Panics
///
/// `Uuid::new_v4` panics when the OS random source fails, so such a failure
/// aborts the calling task instead of surfacing as an error.
pub fn generate_deletion_key() -> String {
    let mut key = String::with_capacity(DELETION_KEY_LENGTH);
    while key.len() < DELETION_KEY_LENGTH {
        let bytes = uuid::Uuid::new_v4().into_bytes();
        for (i, byte) in bytes.iter().enumerate() {
            if i == 6 || key.len() == DELETION_KEY_LENGTH {
                continue;
            }
            key.push(KEY_ALPHABET[(byte & 0x3f) as usize] as char);
        }
    }
    key
}

/// Availability queries and the booking/cancellation flow, bound to a clock
/// and a store.
#[derive(Clone)]
pub struct AppointmentService {
    clock: Arc<dyn Clock>,
    store: Arc<dyn AppointmentStore>,
}

impl AppointmentService {
    pub fn new(clock: Arc<dyn Clock>, store: Arc<dyn AppointmentStore>) -> Self {
        Self { clock, store }
    }

    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now()
    }

    pub fn timezone(&self) -> Tz {
        self.clock.timezone()
    }

    /// `reference` overrides the clock when given.
    pub fn validate(&self, date: &str, time: Option<&str>, reference: Option<DateTime<Tz>>) -> Result<()> {
        let reference = reference.unwrap_or_else(|| self.clock.now());
        validate_at(date, time, &reference)
    }

    pub fn time_slots(&self, date: &str) -> Result<Vec<String>> {
        let reference = self.clock.now();
        slots_at(date, &reference)
    }

    pub fn available_dates(&self, days: usize) -> Vec<String> {
        let reference = self.clock.now();
        format_dates(&available_dates_from(&reference, days))
    }

    pub async fn appointments(&self) -> Result<Vec<Appointment>> {
        self.store.list().await
    }

    pub async fn book(&self, request: BookingRequest) -> Result<Appointment> {
        let deletion_key = generate_deletion_key();
        let now = self.clock.now();
        let tz = now.timezone();

        let start = localize(request.start.date(), request.start.time(), &tz)?;
        let horizon = now + Duration::days(BOOKING_HORIZON_DAYS);
        if start > horizon {
            return Err(TerminError::DateNotReady {
                target: start.to_string(),
                horizon: horizon.to_string(),
            });
        }

        if let Err(e) = check(request.start.date(), Some(request.start.time()), &now) {
            tracing::debug!("Rejected booking for {}: {}", request.start.format(SLOT_FORMAT), e);
            return Err(e);
        }

        validate_required_text("name", &request.name)?;
        validate_required_text("email", &request.email)?;
        validate_required_text("phone", &request.phone)?;

        let start_time = start.fixed_offset();
        let new = NewAppointment {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            description: request.description,
            appointment_type: request.appointment_type,
            start_time,
            end_time: start_time + Duration::minutes(APPOINTMENT_MINUTES),
            deletion_key,
        };

        let appointment = self.store.create(new).await?;
        tracing::info!(
            "Booked appointment #{} ({}) at {}",
            appointment.id,
            appointment.appointment_type,
            appointment.start_time.format(SLOT_FORMAT)
        );
        Ok(appointment)
    }

    /// Removes the appointment holding `deletion_key`. Unknown keys are not
    /// an error.
    pub async fn cancel(&self, deletion_key: &str) -> Result<()> {
        let removed = self.store.delete_by_key(deletion_key).await?;
        if removed == 0 {
            tracing::debug!("Cancellation matched no appointment");
        } else {
            tracing::info!("Cancelled {} appointment(s)", removed);
        }
        Ok(())
    }
}
