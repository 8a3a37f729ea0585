// Domain layer: models and ports. Concrete HTTP and filesystem code lives in adapters.

pub mod model;
pub mod ports;
