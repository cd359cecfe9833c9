use crate::components::{
	Component, ComponentBundle, ComponentDescription, ComponentRegistry, ComponentSet, ComponentType, SharedRegistry,
};
use crate::data_structures::{AnyStore, DenseStore, Relocation, Slot};
use crate::entities::{assert_entity, Entity, EntityRows};
use std::hash::BuildHasherDefault;
use crate::query::Memberships;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use crate::error::EcsError;
use tracing::{debug, trace};
use std::any::TypeId;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// A container for [entities](Entity) and their [components](Component).
///
/// Every [entity](Entity) owns a row mapping each [ComponentType] to the [Slot] of its instance
/// inside that type's [DenseStore]. Removing an instance compacts the store and the row of
/// whichever entity got moved is repaired before the call returns, so rows and stores always agree.
///
/// The world is single-threaded: every operation takes `&self` or `&mut self` and runs to completion.
/// The only shared state is the [ComponentRegistry], which is consulted the first time a
/// [Component] type is attached to this world.
pub struct World {
	registry: SharedRegistry,
	types: HashMap<TypeId, ComponentType, Hasher>,
	stores: Vec<Option<Box<dyn AnyStore>>>,
	pub(crate) rows: EntityRows,
	pub(crate) memberships: Memberships,
}

impl World {
	/// Create an empty world using the process-wide [ComponentRegistry].
	pub fn new() -> Self {
		Self::with_registry(ComponentRegistry::global())
	}

	/// Create an empty world using the provided [ComponentRegistry].
	/// All worlds sharing a registry agree on every [ComponentType].
	pub fn with_registry(registry: SharedRegistry) -> Self {
		Self::with_capacity(registry, 0)
	}

	/// Create an empty world with room for `capacity` entities.
	///
	/// # Arguments
	/// * `registry` - The registry assigning [component types](ComponentType)
	/// * `capacity` - The number of entities to reserve space for
	pub fn with_capacity(registry: SharedRegistry, capacity: usize) -> Self {
		Self {
			registry,
			types: HashMap::default(),
			stores: Vec::new(),
			rows: EntityRows::with_capacity(capacity),
			memberships: Memberships::default(),
		}
	}

	pub fn registry(&self) -> &SharedRegistry {
		&self.registry
	}

	/// Register `T` with the world's registry, returning its [ComponentType].
	/// Attaching a [Component] registers it automatically, so calling this is only needed
	/// to fix identifiers up front.
	///
	/// # Panics
	/// Panics if the registry is full.
	pub fn register<T: Component>(&mut self) -> ComponentType {
		match self.known_type::<T>() {
			Some(ty) => ty,
			None => {
				let ty = self.registry.write().register::<T>();
				self.types.insert(TypeId::of::<T>(), ty);
				ty
			},
		}
	}

	/// Same as [register](Self::register), but reports a full registry as an error.
	pub fn try_register<T: Component>(&mut self) -> Result<ComponentType, EcsError> {
		if let Some(ty) = self.known_type::<T>() {
			return Ok(ty);
		}

		let ty = self.registry.write().try_register::<T>()?;
		self.types.insert(TypeId::of::<T>(), ty);
		Ok(ty)
	}

	/// The [ComponentType] of `T`, if it has been registered.
	pub fn type_of<T: Component>(&self) -> Option<ComponentType> {
		self.known_type::<T>().or_else(|| self.registry.read().type_of::<T>())
	}

	/// The [ComponentType] of `T` if it was ever attached or registered through this world.
	/// A type unknown here cannot be held by any of the world's entities.
	#[inline(always)]
	pub(crate) fn known_type<T: Component>(&self) -> Option<ComponentType> {
		self.types.get(&TypeId::of::<T>()).copied()
	}

	/// Creates a single [entity](Entity) with no [components](Component) attached.
	pub fn create_entity(&mut self) -> Entity {
		let entity = self.rows.allocate();
		trace!(%entity, "created entity");
		entity
	}

	/// Destroys an [entity](Entity) along with every [component](Component) attached to it.
	/// The handle may be handed out again by a later [create_entity](Self::create_entity).
	///
	/// # Panics
	/// Panics if `entity` has already been destroyed.
	pub fn destroy_entity(&mut self, entity: Entity) {
		let row = match self.rows.release(entity) {
			Some(row) => row,
			None => return assert_entity(entity, false),
		};

		for (ty, slot) in row.occupied() {
			if let Some(store) = self.store_dyn_mut(ty) {
				let relocation = store.remove_slot(slot);
				self.apply_relocation(ty, relocation);
			}
			self.memberships.remove(ty, entity);
		}

		trace!(%entity, "destroyed entity");
	}

	/// Same as [destroy_entity](Self::destroy_entity), but reports a dead handle as an error.
	pub fn try_destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
		if !self.rows.is_alive(entity) {
			return Err(EcsError::EntityNotFound(entity));
		}

		self.destroy_entity(entity);
		Ok(())
	}

	#[inline(always)]
	pub fn is_alive(&self, entity: Entity) -> bool {
		self.rows.is_alive(entity)
	}

	/// The number of live [entities](Entity).
	pub fn entity_count(&self) -> usize {
		self.rows.len()
	}

	/// Every live [entity](Entity), in ascending handle order.
	pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
		self.rows.iter()
	}

	/// Attach `value` to `entity`.
	/// If `entity` already holds a `T`, the instance is overwritten in place and the old value is returned.
	///
	/// # Panics
	/// Panics if `entity` has already been destroyed.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Option<T> {
		let ty = self.register::<T>();
		assert_entity(entity, self.rows.is_alive(entity));

		let existing = self.rows.get(entity)?.slot(ty);
		let store = self.store_or_insert::<T>(ty);

		match existing {
			Some(slot) => Some(std::mem::replace(&mut store[slot], value)),
			None => {
				let slot = store.insert(entity, value);
				if let Some(row) = self.rows.get_mut(entity) {
					*row.slot_mut(ty) = Some(slot);
				}
				self.memberships.insert(ty, entity);
				None
			},
		}
	}

	/// Attach every member of `bundle` to `entity`, one after the other in tuple order.
	///
	/// ```rust,ignore
	/// world.add_components(entity, (Position::default(), Velocity::default()));
	/// ```
	pub fn add_components<B: ComponentBundle>(&mut self, entity: Entity, bundle: B) {
		bundle.attach_to(self, entity);
	}

	/// Run the `create` hook of `T` on `entity`, attaching a default instance unless overridden.
	pub fn create_component<T: Component>(&mut self, entity: Entity) {
		T::create(self, entity);
	}

	/// Detach the `T` held by `entity` and return it.
	/// Returns *None* if `entity` holds no `T`.
	///
	/// # Panics
	/// Panics if `entity` has already been destroyed.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
		assert_entity(entity, self.rows.is_alive(entity));

		let ty = self.known_type::<T>()?;
		let slot = self.rows.get_mut(entity)?.take_slot(ty)?;
		let (value, relocation) = self.store_mut::<T>(ty)?.remove(slot);

		self.apply_relocation(ty, relocation);
		self.memberships.remove(ty, entity);
		Some(value)
	}

	/// Same as [remove_component](Self::remove_component), but reports a dead handle
	/// or a missing instance as an error.
	pub fn try_remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
		if !self.rows.is_alive(entity) {
			return Err(EcsError::EntityNotFound(entity));
		}

		self.remove_component::<T>(entity).ok_or(EcsError::ComponentNotFound { entity, label: T::LABEL })
	}

	/// Gets a reference to the `T` bound to `entity`.
	///
	/// # Panics
	/// Panics if `entity` is dead or holds no `T`. Check with [has_component](Self::has_component) first.
	pub fn component<T: Component>(&self, entity: Entity) -> &T {
		self.try_component(entity).unwrap_or_else(|err| panic!("{}", err))
	}

	/// Gets a mutable reference to the `T` bound to `entity`.
	///
	/// # Panics
	/// Panics if `entity` is dead or holds no `T`. Check with [has_component](Self::has_component) first.
	pub fn component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
		self.try_component_mut(entity).unwrap_or_else(|err| panic!("{}", err))
	}

	/// Gets a reference to the `T` bound to `entity`, if any.
	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
		let ty = self.known_type::<T>()?;
		let slot = self.rows.get(entity)?.slot(ty)?;
		self.store::<T>(ty)?.get(slot)
	}

	/// Gets a mutable reference to the `T` bound to `entity`, if any.
	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		let ty = self.known_type::<T>()?;
		let slot = self.rows.get(entity)?.slot(ty)?;
		self.store_mut::<T>(ty)?.get_mut(slot)
	}

	pub fn try_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
		if !self.rows.is_alive(entity) {
			return Err(EcsError::EntityNotFound(entity));
		}

		self.get_component(entity).ok_or(EcsError::ComponentNotFound { entity, label: T::LABEL })
	}

	pub fn try_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
		if !self.rows.is_alive(entity) {
			return Err(EcsError::EntityNotFound(entity));
		}

		self.get_component_mut(entity).ok_or(EcsError::ComponentNotFound { entity, label: T::LABEL })
	}

	/// The slot holding the `ty` instance of `entity`, growing the entity's row to cover `ty`.
	///
	/// # Panics
	/// Panics if `entity` has already been destroyed.
	pub fn component_index(&mut self, entity: Entity, ty: ComponentType) -> Option<Slot> {
		assert_entity(entity, self.rows.is_alive(entity));
		*self.rows.get_mut(entity)?.slot_mut(ty)
	}

	/// The slot holding the `ty` instance of `entity`, without touching the entity's row.
	pub fn component_slot(&self, entity: Entity, ty: ComponentType) -> Option<Slot> {
		self.rows.get(entity)?.slot(ty)
	}

	/// Gets the `T` stored at `slot`, regardless of its owner.
	pub fn component_with_index<T: Component>(&self, slot: Slot) -> Option<&T> {
		let ty = self.known_type::<T>()?;
		self.store::<T>(ty)?.get(slot)
	}

	pub fn component_with_index_mut<T: Component>(&mut self, slot: Slot) -> Option<&mut T> {
		let ty = self.known_type::<T>()?;
		self.store_mut::<T>(ty)?.get_mut(slot)
	}

	/// Check whether `entity` holds a `T`. Dead entities hold nothing.
	#[inline(always)]
	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		match self.known_type::<T>() {
			Some(ty) => self.has_type(entity, ty),
			None => false,
		}
	}

	/// Check whether `entity` holds every [component](Component) of the set `S`.
	///
	/// ```rust,ignore
	/// world.has_components::<(Position, Velocity)>(entity);
	/// ```
	pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> bool {
		S::contained_in(self, entity)
	}

	#[inline(always)]
	pub fn has_type(&self, entity: Entity, ty: ComponentType) -> bool {
		self.component_slot(entity, ty).is_some()
	}

	/// Invoke the `create` hook registered for `ty` on `entity`.
	pub fn create_component_by_type(&mut self, ty: ComponentType, entity: Entity) -> Result<(), EcsError> {
		let hook = self.description(ty)?.create;
		hook(self, entity);
		Ok(())
	}

	/// Invoke the `destroy` hook registered for `ty` on `entity`.
	pub fn destroy_component_by_type(&mut self, ty: ComponentType, entity: Entity) -> Result<(), EcsError> {
		let hook = self.description(ty)?.destroy;
		hook(self, entity);
		Ok(())
	}

	/// Invoke the `inspect` hook registered for `ty` on `entity`.
	pub fn inspect_component_by_type(&mut self, ty: ComponentType, entity: Entity) -> Result<(), EcsError> {
		let hook = self.description(ty)?.inspect;
		hook(self, entity);
		Ok(())
	}

	/// The label registered for `ty`.
	pub fn label(&self, ty: ComponentType) -> Option<&'static str> {
		self.registry.read().label(ty)
	}

	/// A snapshot of every registered kind, ordered by [ComponentType].
	pub fn component_descriptions(&self) -> Vec<ComponentDescription> {
		self.registry.read().descriptions().to_vec()
	}

	/// Destroy every entity and every component instance, returning the world to its freshly created state.
	/// Registered [component types](ComponentType) are kept.
	pub fn clean_up(&mut self) {
		let entities = self.rows.len();
		self.rows.clear();
		self.memberships.clear();
		for store in self.stores.iter_mut().flatten() {
			store.clear();
		}

		debug!(entities, "cleaned up world");
	}

	// The hook is copied out so the registry lock is released before it runs.
	fn description(&self, ty: ComponentType) -> Result<ComponentDescription, EcsError> {
		self.registry
			.read()
			.description(ty)
			.copied()
			.ok_or(EcsError::UnregisteredComponent(ty))
	}

	fn apply_relocation(&mut self, ty: ComponentType, relocation: Relocation) {
		if let Relocation::Moved { entity, slot } = relocation {
			if let Some(row) = self.rows.get_mut(entity) {
				*row.slot_mut(ty) = Some(slot);
			}
			trace!(%entity, component = ty.value(), slot = slot.get(), "relocated component");
		}
	}

	pub(crate) fn store<T: Component>(&self, ty: ComponentType) -> Option<&DenseStore<T>> {
		self.stores.get(ty.index())?.as_ref()?.as_any().downcast_ref()
	}

	pub(crate) fn store_mut<T: Component>(&mut self, ty: ComponentType) -> Option<&mut DenseStore<T>> {
		self.stores.get_mut(ty.index())?.as_mut()?.as_any_mut().downcast_mut()
	}

	fn store_dyn_mut(&mut self, ty: ComponentType) -> Option<&mut Box<dyn AnyStore>> {
		self.stores.get_mut(ty.index())?.as_mut()
	}

	fn store_or_insert<T: Component>(&mut self, ty: ComponentType) -> &mut DenseStore<T> {
		let index = ty.index();
		if self.stores.len() <= index {
			self.stores.resize_with(index + 1, || None);
		}

		self.stores[index]
			.get_or_insert_with(|| Box::new(DenseStore::<T>::new()) as Box<dyn AnyStore>)
			.as_any_mut()
			.downcast_mut()
			.expect("Component store does not match its component type")
	}
}

impl Default for World {
	fn default() -> Self {
		Self::new()
	}
}
