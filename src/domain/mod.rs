// Domain layer: appointment models and the ports (clock, store, config) the engine talks through.

pub mod model;
pub mod ports;
