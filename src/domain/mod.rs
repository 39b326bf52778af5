// Domain layer: quote models and the collaborator ports the core is written against.

pub mod model;
pub mod ports;
