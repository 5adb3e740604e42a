// Adapters layer: concrete implementations for external systems (clock, storage, http).

pub mod clock;
pub mod http;
pub mod storage;
