// Domain layer: salon records and the ports the core consumes.

pub mod model;
pub mod ports;
