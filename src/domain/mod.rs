// Domain layer: typed records and ports. No behaviour beyond small accessors.

pub mod model;
pub mod ports;
