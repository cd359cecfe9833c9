//! Queries over the [World]: which [entities](Entity) hold a set of [components](Component),
//! and iteration over every live instance of a single [component](Component).
//!
//! Each component type keeps a membership set of the entities currently holding it.
//! A multi-component query walks the smallest of the requested sets and checks the remaining
//! types through the entity rows, so its cost follows the rarest component rather than the
//! total number of entities.

use crate::components::{Component, ComponentSet, ComponentType};
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator};
use crate::data_structures::DenseStore;
use std::collections::BTreeSet;
use crate::entities::Entity;
use crate::error::EcsError;
use crate::world::World;

static EMPTY_SET: BTreeSet<Entity> = BTreeSet::new();

/// Per [ComponentType] sets of the [entities](Entity) holding that type.
#[derive(Default)]
pub(crate) struct Memberships {
	sets: Vec<BTreeSet<Entity>>,
}

impl Memberships {
	#[inline(always)]
	pub fn get(&self, ty: ComponentType) -> &BTreeSet<Entity> {
		self.sets.get(ty.index()).unwrap_or(&EMPTY_SET)
	}

	pub fn insert(&mut self, ty: ComponentType, entity: Entity) {
		let index = ty.index();
		if self.sets.len() <= index {
			self.sets.resize_with(index + 1, BTreeSet::new);
		}
		self.sets[index].insert(entity);
	}

	pub fn remove(&mut self, ty: ComponentType, entity: Entity) {
		if let Some(set) = self.sets.get_mut(ty.index()) {
			set.remove(&entity);
		}
	}

	#[inline(always)]
	pub fn count(&self, ty: ComponentType) -> usize {
		self.get(ty).len()
	}

	pub fn clear(&mut self) {
		self.sets.clear();
	}
}

impl World {
	/// Every [entity](Entity) currently holding a `T`.
	pub fn entities_with_component<T: Component>(&self) -> &BTreeSet<Entity> {
		match self.known_type::<T>() {
			Some(ty) => self.memberships.get(ty),
			None => &EMPTY_SET,
		}
	}

	/// The number of [entities](Entity) currently holding a `T`.
	pub fn count_with_component<T: Component>(&self) -> usize {
		self.entities_with_component::<T>().len()
	}

	/// Every [entity](Entity) holding all the [components](Component) of the set `S`.
	/// The order of the returned entities is unspecified.
	///
	/// ```rust,ignore
	/// for entity in world.entities_with_components::<(Position, Velocity)>() {
	///     // ...
	/// }
	/// ```
	pub fn entities_with_components<S: ComponentSet>(&self) -> Vec<Entity> {
		let mut types = Vec::with_capacity(S::LEN);
		if !S::collect_types(self, &mut types) {
			return Vec::new();
		}

		self.intersect(&mut types)
	}

	/// Every [entity](Entity) holding all the listed [component types](ComponentType).
	/// The order of the returned entities is unspecified.
	pub fn entities_with_types(&self, types: &[ComponentType]) -> Result<Vec<Entity>, EcsError> {
		if types.is_empty() {
			return Err(EcsError::EmptyQuery);
		}

		{
			let registry = self.registry().read();
			if let Some(ty) = types.iter().find(|ty| !registry.contains(**ty)) {
				return Err(EcsError::UnregisteredComponent(*ty));
			}
		}

		let mut types = types.to_vec();
		Ok(self.intersect(&mut types))
	}

	/// Every live `T`, in storage order.
	/// Storage order is insertion order, except that removals move the last instance into the freed slot.
	pub fn components<T: Component>(&self) -> &[T] {
		match self.known_type::<T>().and_then(|ty| self.store::<T>(ty)) {
			Some(store) => store.as_slice(),
			None => &[],
		}
	}

	/// The [DenseStore] backing `T`, once a `T` has been attached at least once.
	pub fn component_store<T: Component>(&self) -> Option<&DenseStore<T>> {
		self.store::<T>(self.known_type::<T>()?)
	}

	pub fn components_mut<T: Component>(&mut self) -> &mut [T] {
		match self.known_type::<T>() {
			Some(ty) => match self.store_mut::<T>(ty) {
				Some(store) => store.as_mut_slice(),
				None => &mut [],
			},
			None => &mut [],
		}
	}

	/// Call `func` with every live `T` and its owner, in storage order.
	pub fn for_each<T: Component>(&mut self, mut func: impl FnMut(Entity, &mut T)) {
		let store = match self.known_type::<T>().and_then(|ty| self.store_mut::<T>(ty)) {
			Some(store) => store,
			None => return,
		};

		for (entity, component) in store.iter_mut() {
			func(entity, component);
		}
	}

	/// Call `func` in parallel with every live `T` and its owner.
	/// The world stays borrowed for the whole call, so nothing else can touch it meanwhile.
	pub fn par_for_each<T: Component + Send>(&mut self, func: impl Fn(Entity, &mut T) + Send + Sync) {
		let store = match self.known_type::<T>().and_then(|ty| self.store_mut::<T>(ty)) {
			Some(store) => store,
			None => return,
		};

		let (entities, components) = store.split_mut();
		entities
			.par_iter()
			.zip(components.par_iter_mut())
			.for_each(|(entity, component)| func(*entity, component));
	}

	fn intersect(&self, types: &mut [ComponentType]) -> Vec<Entity> {
		types.sort_by_key(|ty| self.memberships.count(*ty));

		let (driver, rest) = match types.split_first() {
			Some(split) => split,
			None => return Vec::new(),
		};

		self.memberships
			.get(*driver)
			.iter()
			.copied()
			.filter(|entity| match self.rows.get(*entity) {
				Some(row) => rest.iter().all(|ty| row.slot(*ty).is_some()),
				None => false,
			})
			.collect()
	}
}
