use crate::domain::model::{Appointment, NewAppointment};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;

/// Source of "now" in the shop's fixed time zone.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;

    fn timezone(&self) -> Tz {
        self.now().timezone()
    }
}

/// Persistence boundary for appointments. The store owns the records; the
/// service only asks it to create, list and delete them.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(&self, appointment: NewAppointment) -> Result<Appointment>;
    async fn list(&self) -> Result<Vec<Appointment>>;
    /// Returns the number of removed rows; an unknown key removes zero.
    async fn delete_by_key(&self, deletion_key: &str) -> Result<u64>;
}

pub trait ConfigProvider: Send + Sync {
    fn listen_addr(&self) -> String;
    fn database_backend(&self) -> &str;
    fn database_url(&self) -> &str;
    fn max_connections(&self) -> u32;
    fn timezone(&self) -> &str;
    fn available_days(&self) -> usize;
}
