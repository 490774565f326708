// Domain layer: core models and ports (interfaces). No storage or I/O details here.

pub mod model;
pub mod ports;
