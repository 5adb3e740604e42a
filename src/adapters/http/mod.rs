//! axum HTTP surface of the booking service.
//!
//! ```text
//! GET    /                       landing page
//! GET    /health                 liveness + shop clock
//! GET    /api/dates?days=N       next bookable days
//! GET    /api/termins?date=D     free slots of a day
//! POST   /api/termins            book a slot
//! DELETE /api/termins?key=K      cancel by deletion key
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod landing;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
