//! [Components](Component) are the plain data attached to [entities](crate::entities::Entity).
//!
//! Every component kind is identified at runtime by a [ComponentType] handed out by a
//! [ComponentRegistry], which also keeps the kind's label and hooks for generic tooling.

mod component_set;
mod component_type;
mod component_registry;

pub use component_set::*;
pub use component_type::*;
pub use component_registry::*;
pub use packed_ecs_derive::Component;
