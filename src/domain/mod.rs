// Domain layer: invoice keys, product names and the ports the core talks through.

pub mod model;
pub mod ports;
