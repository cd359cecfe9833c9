//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! For every live entity the world keeps a row mapping each
//! [component type](crate::components::ComponentType) to the [slot](crate::data_structures::Slot)
//! holding the entity's instance.

mod entity;
mod entity_rows;

pub use entity::Entity;

pub(crate) use entity::*;
pub(crate) use entity_rows::*;
