//! The table of every [Component] kind known to the program.
//!
//! Each kind is registered once, either explicitly through [ComponentRegistry::register] or
//! implicitly the first time a [World] attaches it. Registration hands out the next dense
//! [ComponentType] and records the kind's label and hooks in a [ComponentDescription].
//! Kinds are never unregistered.
//!
//! Worlds built on the same [SharedRegistry] agree on every identifier.
//! [ComponentRegistry::global] is the process-wide instance used by [World::new].

use crate::components::{Component, ComponentType, MAX_COMPONENT_TYPES};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::entities::Entity;
use tracing::{debug, error};
use crate::error::EcsError;
use parking_lot::RwLock;
use crate::world::World;
use std::any::TypeId;
use std::sync::Arc;
use std::fmt;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// The signature shared by the `create`, `destroy` and `inspect` hooks of a [Component].
pub type ComponentHook = fn(&mut World, Entity);

/// A [ComponentRegistry] that can be handed to several [worlds](World).
pub type SharedRegistry = Arc<RwLock<ComponentRegistry>>;

lazy_static! {
	static ref GLOBAL_REGISTRY: SharedRegistry = ComponentRegistry::shared();
}

/// Everything generic tooling needs to manipulate a [Component] knowing only its [ComponentType].
#[derive(Copy, Clone)]
pub struct ComponentDescription {
	pub label: &'static str,
	pub ty: ComponentType,
	pub create: ComponentHook,
	pub destroy: ComponentHook,
	pub inspect: ComponentHook,
}

impl fmt::Debug for ComponentDescription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentDescription")
			.field("label", &self.label)
			.field("ty", &self.ty)
			.finish_non_exhaustive()
	}
}

pub struct ComponentRegistry {
	limit: usize,
	descriptions: Vec<ComponentDescription>,
	types: HashMap<TypeId, ComponentType, Hasher>,
}

impl ComponentRegistry {
	/// Create an empty registry accepting up to [MAX_COMPONENT_TYPES] kinds.
	pub fn new() -> Self {
		Self::with_limit(MAX_COMPONENT_TYPES)
	}

	/// Create an empty registry accepting up to `limit` kinds.
	///
	/// # Arguments
	/// * `limit` - The maximum number of kinds, clamped to [MAX_COMPONENT_TYPES]
	pub fn with_limit(limit: usize) -> Self {
		Self {
			limit: limit.min(MAX_COMPONENT_TYPES),
			descriptions: Vec::new(),
			types: HashMap::default(),
		}
	}

	/// Create an empty registry ready to be shared between [worlds](World).
	pub fn shared() -> SharedRegistry {
		Arc::new(RwLock::new(Self::new()))
	}

	/// The process-wide registry.
	pub fn global() -> SharedRegistry {
		GLOBAL_REGISTRY.clone()
	}

	/// Register `T`, or return its existing [ComponentType] if it is already known.
	///
	/// # Panics
	/// Panics if `T` is new and the registry is full. Registration is expected to happen
	/// while the program starts up, so this is treated as a configuration error.
	pub fn register<T: Component>(&mut self) -> ComponentType {
		match self.try_register::<T>() {
			Ok(ty) => ty,
			Err(err) => {
				error!(component = T::LABEL, "{}", err);
				panic!("{}", err)
			},
		}
	}

	/// Register `T`, or return its existing [ComponentType] if it is already known.
	/// Fails with [EcsError::TooManyComponentTypes] instead of panicking when the registry is full.
	pub fn try_register<T: Component>(&mut self) -> Result<ComponentType, EcsError> {
		let key = TypeId::of::<T>();
		if let Some(ty) = self.types.get(&key) {
			return Ok(*ty);
		}

		if self.descriptions.len() >= self.limit {
			return Err(EcsError::TooManyComponentTypes { limit: self.limit });
		}

		let ty = ComponentType::from_raw(self.descriptions.len() as u16);
		self.descriptions.push(ComponentDescription {
			label: T::LABEL,
			ty,
			create: T::create,
			destroy: T::destroy,
			inspect: T::inspect,
		});
		self.types.insert(key, ty);

		debug!(component = T::LABEL, id = ty.value(), "registered component type");
		Ok(ty)
	}

	/// Get the [ComponentType] of `T` without registering it.
	pub fn type_of<T: Component>(&self) -> Option<ComponentType> {
		self.types.get(&TypeId::of::<T>()).copied()
	}

	pub fn contains(&self, ty: ComponentType) -> bool {
		ty.index() < self.descriptions.len()
	}

	pub fn description(&self, ty: ComponentType) -> Option<&ComponentDescription> {
		self.descriptions.get(ty.index())
	}

	pub fn label(&self, ty: ComponentType) -> Option<&'static str> {
		self.description(ty).map(|d| d.label)
	}

	/// All registered kinds, ordered by [ComponentType].
	pub fn descriptions(&self) -> &[ComponentDescription] {
		&self.descriptions
	}

	pub fn iter(&self) -> impl Iterator<Item = &ComponentDescription> {
		self.descriptions.iter()
	}

	pub fn len(&self) -> usize {
		self.descriptions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptions.is_empty()
	}

	pub fn limit(&self) -> usize {
		self.limit
	}
}

impl Default for ComponentRegistry {
	fn default() -> Self {
		Self::new()
	}
}
