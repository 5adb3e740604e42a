pub mod booking;
pub mod hours;
pub mod slots;
pub mod validator;

pub use crate::domain::model::{Appointment, AppointmentType, BookingRequest, NewAppointment};
pub use crate::domain::ports::{AppointmentStore, Clock, ConfigProvider};
pub use crate::utils::error::Result;
