// Domain layer: page content models and ports (interfaces).

pub mod model;
pub mod ports;
