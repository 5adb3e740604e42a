use chrono::Weekday;

/// Opening hours of a single day. `close` is exclusive: the last bookable
/// start hour is `close - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessHours {
    Open { open: u32, close: u32 },
    Closed,
}

impl BusinessHours {
    pub fn is_open(&self) -> bool {
        matches!(self, BusinessHours::Open { .. })
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        match *self {
            BusinessHours::Open { open, close } => hour >= open && hour < close,
            BusinessHours::Closed => false,
        }
    }
}

pub fn hours_for(weekday: Weekday) -> BusinessHours {
    match weekday {
        Weekday::Sat => BusinessHours::Open { open: 10, close: 14 },
        Weekday::Sun => BusinessHours::Closed,
        _ => BusinessHours::Open { open: 10, close: 17 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_hours() {
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            assert_eq!(hours_for(day), BusinessHours::Open { open: 10, close: 17 });
        }
        assert_eq!(hours_for(Weekday::Sat), BusinessHours::Open { open: 10, close: 14 });
        assert_eq!(hours_for(Weekday::Sun), BusinessHours::Closed);
    }

    #[test]
    fn test_closing_hour_is_exclusive() {
        let hours = hours_for(Weekday::Fri);
        assert!(!hours.contains_hour(9));
        assert!(hours.contains_hour(10));
        assert!(hours.contains_hour(16));
        assert!(!hours.contains_hour(17));
        assert!(!hours_for(Weekday::Sun).contains_hour(12));
    }
}
