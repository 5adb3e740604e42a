pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::clock::{FixedClock, SystemClock};
pub use adapters::storage::{MemoryStore, SqliteStore};
pub use app::TerminServer;
pub use config::TomlConfig;
pub use core::booking::AppointmentService;
pub use domain::model::{Appointment, AppointmentType, BookingRequest};
pub use utils::error::{ErrorCode, Result, TerminError};
