//! Request and response bodies of the appointment API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DatesQuery {
    pub days: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CancelQuery {
    pub key: Option<String>,
}

/// Booking form as posted by the landing page. `date` is `YYYY-MM-DD HH:MM`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timezone: String,
    pub now: String,
}
