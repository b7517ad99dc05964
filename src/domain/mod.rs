// Domain layer: core models, the column schema and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
