use crate::utils::error::{Result, TerminError};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
/// Slots and booking requests use "date time" with a single space.
pub const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    Goldankauf,
    Trauringe,
    Verlobungsringe,
    Ohrlochstechen,
    Sonstiges,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 5] = [
        AppointmentType::Goldankauf,
        AppointmentType::Trauringe,
        AppointmentType::Verlobungsringe,
        AppointmentType::Ohrlochstechen,
        AppointmentType::Sonstiges,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Goldankauf => "goldankauf",
            AppointmentType::Trauringe => "trauringe",
            AppointmentType::Verlobungsringe => "verlobungsringe",
            AppointmentType::Ohrlochstechen => "ohrlochstechen",
            AppointmentType::Sonstiges => "sonstiges",
        }
    }
}

impl FromStr for AppointmentType {
    type Err = TerminError;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "goldankauf" => Ok(AppointmentType::Goldankauf),
            "trauringe" => Ok(AppointmentType::Trauringe),
            "verlobungsringe" => Ok(AppointmentType::Verlobungsringe),
            // older clients send the misspelled value
            "ohrlochstechen" | "ohrlohstechen" => Ok(AppointmentType::Ohrlochstechen),
            "sonstiges" => Ok(AppointmentType::Sonstiges),
            _ => Err(TerminError::InvalidType {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a customer submits. `start` is a wall-clock time in the shop's zone.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub appointment_type: AppointmentType,
    pub start: NaiveDateTime,
}

/// A validated appointment ready to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub appointment_type: AppointmentType,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub deletion_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub appointment_type: AppointmentType,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    /// Capability token: whoever holds it may cancel the appointment.
    #[serde(skip_serializing)]
    pub deletion_key: String,
}

impl Appointment {
    pub fn from_new(id: i64, new: NewAppointment) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            description: new.description,
            appointment_type: new.appointment_type,
            start_time: new.start_time,
            end_time: new.end_time,
            deletion_key: new.deletion_key,
        }
    }

    /// One-line form without the deletion key, for operator listings.
    pub fn summary(&self) -> String {
        format!(
            "#{} {} - {} [{}] {} <{}> {}",
            self.id,
            self.start_time.format(SLOT_FORMAT),
            self.end_time.format(TIME_FORMAT),
            self.appointment_type,
            self.name,
            self.email,
            self.phone
        )
    }
}

/// Pretty JSON export of `appointments` for operators; deletion keys are left out.
pub fn to_listing_json(appointments: &[Appointment]) -> Result<String> {
    Ok(serde_json::to_string_pretty(appointments)?)
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment(id={}, name={}, email={}, phone={}, type={}, delkey={}, start_time={}, end_time={}, description={})",
            self.id,
            self.name,
            self.email,
            self.phone,
            self.appointment_type,
            self.deletion_key,
            self.start_time,
            self.end_time,
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_appointment_type() {
        for kind in AppointmentType::ALL {
            assert_eq!(kind.as_str().parse::<AppointmentType>().unwrap(), kind);
        }
        assert_eq!(
            "Sonstiges".parse::<AppointmentType>().unwrap(),
            AppointmentType::Sonstiges
        );
        assert_eq!(
            "ohrlohstechen".parse::<AppointmentType>().unwrap(),
            AppointmentType::Ohrlochstechen
        );
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let err = "reparatur".parse::<AppointmentType>().unwrap_err();
        assert!(matches!(err, TerminError::InvalidType { ref value } if value == "reparatur"));
        assert!("".parse::<AppointmentType>().is_err());
    }

    fn sample() -> Appointment {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let start = offset.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).unwrap();
        Appointment {
            id: 7,
            name: "Erika Muster".to_string(),
            email: "erika@example.com".to_string(),
            phone: "0301234".to_string(),
            description: "Ringgröße".to_string(),
            appointment_type: AppointmentType::Trauringe,
            start_time: start,
            end_time: start + chrono::Duration::minutes(30),
            deletion_key: "secret-key".to_string(),
        }
    }

    #[test]
    fn test_display_contains_deletion_key_but_summary_does_not() {
        let appointment = sample();

        let full = appointment.to_string();
        assert!(full.starts_with("Appointment(id=7, name=Erika Muster"));
        assert!(full.contains("type=trauringe"));
        assert!(full.contains("delkey=secret-key"));

        let summary = appointment.summary();
        assert_eq!(
            summary,
            "#7 2024-01-09 10:00 - 10:30 [trauringe] Erika Muster <erika@example.com> 0301234"
        );
        assert!(!summary.contains("secret-key"));
    }

    #[test]
    fn test_listing_json_omits_deletion_key() {
        let json = to_listing_json(&[sample()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["appointment_type"], "trauringe");
        assert_eq!(value[0]["start_time"], "2024-01-09T10:00:00+01:00");
        assert!(value[0].get("deletion_key").is_none());
        assert!(!json.contains("secret-key"));
    }
}
