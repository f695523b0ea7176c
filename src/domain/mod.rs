// Domain layer: row model, coercion policy and ports. No I/O here.

pub mod coercion;
pub mod model;
pub mod ports;
