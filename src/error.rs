//! Recoverable error kinds surfaced by the `try_*` family of [World](crate::world::World) methods.
//!
//! The regular methods treat these conditions as broken preconditions and panic instead.

use crate::components::ComponentType;
use crate::entities::Entity;

/// Errors reported by the checked entry points of the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
	/// The handle does not name a live entity.
	#[error("{0} is not alive")]
	EntityNotFound(Entity),

	/// The entity is alive but holds no instance of the requested component.
	#[error("{entity} has no {label} component")]
	ComponentNotFound { entity: Entity, label: &'static str },

	/// No component has been registered under this identifier.
	#[error("component type {0} has not been registered")]
	UnregisteredComponent(ComponentType),

	/// The registry already holds the maximum number of component types.
	#[error("cannot register more than {limit} component types")]
	TooManyComponentTypes { limit: usize },

	/// A multi-component query was issued without any component type.
	#[error("a query must name at least one component type")]
	EmptyQuery,
}
