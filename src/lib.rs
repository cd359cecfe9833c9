//! A sparse-index entity component store.
//!
//! Every [component](components::Component) type lives in its own packed
//! [DenseStore](data_structures::DenseStore); every [entity](entities::Entity) keeps a row of
//! [slots](data_structures::Slot) pointing into those stores; every component type keeps the set of
//! entities holding it, which drives multi-component queries from the rarest type.

extern crate self as packed_ecs;

pub mod data_structures;
pub mod components;
pub mod entities;
mod error;
mod query;
mod world;

pub use error::EcsError;
pub use world::World;

pub mod prelude {
	pub use crate::components::*;
	pub use crate::error::EcsError;
	pub use crate::entities::Entity;
	pub use crate::world::World;
	pub use crate::data_structures::{DenseStore, Relocation, Slot};
}

#[cfg(test)]
mod tests;
