use crate::domain::model::{Appointment, NewAppointment, SLOT_FORMAT};
use crate::domain::ports::AppointmentStore;
use crate::utils::error::{Result, TerminError};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    appointments: Vec<Appointment>,
    next_id: i64,
}

/// Process-local store with the same uniqueness rules as the SQLite schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn create(&self, appointment: NewAppointment) -> Result<Appointment> {
        let mut inner = self.inner.lock().await;

        if inner
            .appointments
            .iter()
            .any(|a| a.start_time == appointment.start_time)
        {
            return Err(TerminError::SlotTaken {
                start: appointment.start_time.format(SLOT_FORMAT).to_string(),
            });
        }
        if inner
            .appointments
            .iter()
            .any(|a| a.deletion_key == appointment.deletion_key)
        {
            return Err(TerminError::StorageError {
                message: "deletion key already in use".to_string(),
            });
        }

        inner.next_id += 1;
        let created = Appointment::from_new(inner.next_id, appointment);
        inner.appointments.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Appointment>> {
        let inner = self.inner.lock().await;
        let mut appointments = inner.appointments.clone();
        appointments.sort_by_key(|a| a.start_time);
        Ok(appointments)
    }

    async fn delete_by_key(&self, deletion_key: &str) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        let before = inner.appointments.len();
        inner.appointments.retain(|a| a.deletion_key != deletion_key);
        Ok((before - inner.appointments.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AppointmentType;
    use chrono::{Duration, FixedOffset, TimeZone};

    fn new_appointment(hour: u32, key: &str) -> NewAppointment {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let start = offset.with_ymd_and_hms(2024, 1, 9, hour, 0, 0).unwrap();
        NewAppointment {
            name: "Max".to_string(),
            email: "max@example.com".to_string(),
            phone: "0170".to_string(),
            description: String::new(),
            appointment_type: AppointmentType::Goldankauf,
            start_time: start,
            end_time: start + Duration::minutes(30),
            deletion_key: key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let store = MemoryStore::new();
        let later = store.create(new_appointment(14, "b")).await.unwrap();
        let earlier = store.create(new_appointment(11, "a")).await.unwrap();
        assert_eq!(later.id, 1);
        assert_eq!(earlier.id, 2);

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![earlier.clone(), later.clone()]);

        assert_eq!(store.delete_by_key("a").await.unwrap(), 1);
        assert_eq!(store.delete_by_key("a").await.unwrap(), 0);
        assert_eq!(store.list().await.unwrap(), vec![later]);
    }

    #[tokio::test]
    async fn test_duplicate_start_is_rejected() {
        let store = MemoryStore::new();
        store.create(new_appointment(11, "a")).await.unwrap();
        let err = store.create(new_appointment(11, "b")).await.unwrap_err();
        assert!(matches!(err, TerminError::SlotTaken { .. }));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
