use std::ops::{Index, IndexMut};
use std::iter::{Copied, Zip};
use crate::entities::Entity;
use std::num::NonZeroU32;
use std::slice::Iter;
use std::any::Any;

/// A position inside a [DenseStore].
///
/// Slots are numbered from 1. The reserved slot 0 is never materialized:
/// "no slot" is spelled `Option::<Slot>::None`, which takes no more space than a [Slot].
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct Slot(NonZeroU32);

impl Slot {
	/// Returns *None* for the reserved value 0.
	pub const fn new(value: u32) -> Option<Self> {
		match NonZeroU32::new(value) {
			Some(value) => Some(Self(value)),
			None => None,
		}
	}

	#[inline(always)]
	pub const fn get(&self) -> u32 {
		self.0.get()
	}

	#[inline(always)]
	fn offset(&self) -> usize {
		self.0.get() as usize - 1
	}

	#[inline(always)]
	fn from_offset(offset: usize) -> Self {
		debug_assert!(offset < u32::MAX as usize, "Dense store slot overflow");
		Self(NonZeroU32::MIN.saturating_add(offset as u32))
	}
}

/// What a removal from a [DenseStore] did to the other instances.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Relocation {
	/// The removed slot was the last one; nothing moved.
	None,
	/// The instance owned by `entity` was moved from the end of the store into `slot`.
	/// The owner's index entry must be updated before anything else touches the store.
	Moved { entity: Entity, slot: Slot },
}

/// Packed storage for every live instance of a single component type.
///
/// Instances are kept contiguous: removing a slot moves the last instance into the hole
/// (swap-and-pop) and reports the move as a [Relocation].
/// The owning [Entity] of each slot is kept in a parallel array so that moves can be reported.
pub struct DenseStore<T> {
	items: Vec<T>,
	owners: Vec<Entity>,
}

impl<T> DenseStore<T> {
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			items: Vec::with_capacity(capacity),
			owners: Vec::with_capacity(capacity),
		}
	}

	/// Append `value` owned by `entity` and return its slot.
	pub fn insert(&mut self, entity: Entity, value: T) -> Slot {
		self.items.push(value);
		self.owners.push(entity);
		Slot::from_offset(self.items.len() - 1)
	}

	/// Remove the instance at `slot`, filling the hole with the last instance.
	///
	/// # Panics
	/// Panics if `slot` is not a live slot.
	pub fn remove(&mut self, slot: Slot) -> (T, Relocation) {
		let offset = slot.offset();
		let value = self.items.swap_remove(offset);
		self.owners.swap_remove(offset);

		let relocation = match self.owners.get(offset) {
			Some(&entity) => Relocation::Moved { entity, slot },
			None => Relocation::None,
		};

		(value, relocation)
	}

	pub fn get(&self, slot: Slot) -> Option<&T> {
		self.items.get(slot.offset())
	}

	pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
		self.items.get_mut(slot.offset())
	}

	/// The [Entity] owning the instance at `slot`.
	pub fn owner(&self, slot: Slot) -> Option<Entity> {
		self.owners.get(slot.offset()).copied()
	}

	/// Live instances in storage order.
	#[inline(always)]
	pub fn as_slice(&self) -> &[T] {
		&self.items
	}

	#[inline(always)]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		&mut self.items
	}

	/// Owners of the live instances, parallel to [as_slice](Self::as_slice).
	#[inline(always)]
	pub fn entities(&self) -> &[Entity] {
		&self.owners
	}

	pub(crate) fn split_mut(&mut self) -> (&[Entity], &mut [T]) {
		(&self.owners, &mut self.items)
	}

	pub fn iter(&self) -> Zip<Copied<Iter<'_, Entity>>, Iter<'_, T>> {
		self.owners.iter().copied().zip(self.items.iter())
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
		self.owners.iter().copied().zip(self.items.iter_mut())
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Drop every instance.
	pub fn clear(&mut self) {
		self.items.clear();
		self.owners.clear();
	}
}

impl<T> Default for DenseStore<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Index<Slot> for DenseStore<T> {
	type Output = T;

	#[inline(always)]
	fn index(&self, slot: Slot) -> &Self::Output {
		&self.items[slot.offset()]
	}
}

impl<T> IndexMut<Slot> for DenseStore<T> {
	#[inline(always)]
	fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
		&mut self.items[slot.offset()]
	}
}

/// A [DenseStore] with its component type erased,
/// letting the [World](crate::world::World) tear down instances by [ComponentType](crate::components::ComponentType) alone.
pub trait AnyStore {
	/// Remove and drop the instance at `slot`.
	fn remove_slot(&mut self, slot: Slot) -> Relocation;
	fn len(&self) -> usize;
	fn is_empty(&self) -> bool;
	fn clear(&mut self);
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AnyStore for DenseStore<T> {
	fn remove_slot(&mut self, slot: Slot) -> Relocation {
		self.remove(slot).1
	}

	fn len(&self) -> usize {
		DenseStore::len(self)
	}

	fn is_empty(&self) -> bool {
		DenseStore::is_empty(self)
	}

	fn clear(&mut self) {
		DenseStore::clear(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
