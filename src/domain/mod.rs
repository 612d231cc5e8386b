// Domain layer: contact tables and the ports the conversion is driven through.

pub mod model;
pub mod ports;
