use crate::domain::ports::Clock;
use crate::utils::error::{Result, TerminError};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// Resolves an IANA zone name. Failing here is a configuration error, not a
/// user error.
pub fn resolve_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TerminError::LocationLoadFailure {
            zone: name.to_string(),
        })
}

/// Wall clock in a fixed zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        resolve_timezone(name).map(Self::new)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Tz>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCode;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    #[test]
    fn test_resolve_timezone() {
        assert_eq!(resolve_timezone(DEFAULT_TIMEZONE).unwrap(), Berlin);
        let err = resolve_timezone("Europe/Atlantis").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LocationLoadFailure);
    }

    #[test]
    fn test_system_clock_reports_its_zone() {
        let clock = SystemClock::from_name("Europe/Berlin").unwrap();
        assert_eq!(clock.timezone(), Berlin);
        assert_eq!(clock.now().timezone(), Berlin);
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Berlin.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.timezone(), Berlin);
    }
}
