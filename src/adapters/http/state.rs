//! Application state shared by all handlers.

use crate::core::booking::AppointmentService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AppointmentService>,
    /// Default length of the date picker when `days` is not given
    pub available_days: usize,
}

impl AppState {
    pub fn new(service: AppointmentService, available_days: usize) -> Self {
        Self {
            service: Arc::new(service),
            available_days,
        }
    }
}
