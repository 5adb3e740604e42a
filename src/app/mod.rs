pub mod server;

pub use server::{build_service, TerminServer};
