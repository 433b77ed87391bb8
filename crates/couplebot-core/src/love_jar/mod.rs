//! Love jar domain module.
//!
//! Partners drop short notes into a shared jar; opening the jar pulls one at random.

mod model;
mod repository;

pub use model::LoveNote;
pub use repository::LoveJarRepository;
