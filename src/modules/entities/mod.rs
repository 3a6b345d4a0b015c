pub mod controller;
pub mod model;
pub mod registry;
pub mod router;

pub use model::*;
pub use router::init_entities_router;
