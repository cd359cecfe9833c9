use crate::components::ComponentType;
use crate::data_structures::Slot;
use std::collections::VecDeque;
use crate::entities::Entity;

/// The slots an [Entity] occupies, indexed by [ComponentType].
///
/// Rows grow lazily: a row is only as wide as the highest component type it has been asked about.
#[derive(Default, Clone, Debug)]
pub(crate) struct EntityRow {
	slots: Vec<Option<Slot>>,
}

impl EntityRow {
	/// The slot held for `ty`, without growing the row.
	#[inline(always)]
	pub fn slot(&self, ty: ComponentType) -> Option<Slot> {
		self.slots.get(ty.index()).copied().flatten()
	}

	/// The entry for `ty`, growing the row if needed.
	#[inline(always)]
	pub fn slot_mut(&mut self, ty: ComponentType) -> &mut Option<Slot> {
		let index = ty.index();
		if self.slots.len() <= index {
			self.slots.resize(index + 1, None);
		}
		&mut self.slots[index]
	}

	/// Clear the entry for `ty`, returning the slot it held.
	#[inline(always)]
	pub fn take_slot(&mut self, ty: ComponentType) -> Option<Slot> {
		self.slots.get_mut(ty.index())?.take()
	}

	/// Every component type present in the row with its slot.
	pub fn occupied(&self) -> impl Iterator<Item = (ComponentType, Slot)> + '_ {
		self.slots
			.iter()
			.enumerate()
			.filter_map(|(i, slot)| slot.map(|slot| (ComponentType::from_raw(i as u16), slot)))
	}
}

/// The sparse entity side of the world index: one [EntityRow] per live handle,
/// plus the pool of handles waiting to be reused.
pub(crate) struct EntityRows {
	live: usize,
	free: VecDeque<Entity>,
	rows: Vec<Option<EntityRow>>,
}

impl EntityRows {
	pub fn with_capacity(capacity: usize) -> Self {
		// Index 0 stands for the reserved handle and never holds a row.
		let mut rows = Vec::with_capacity(capacity + 1);
		rows.push(None);

		Self {
			live: 0,
			free: VecDeque::new(),
			rows,
		}
	}

	/// Hand out a handle with an empty row, reusing the oldest released handle if there is one.
	pub fn allocate(&mut self) -> Entity {
		self.live += 1;
		match self.free.pop_front() {
			Some(entity) => {
				self.rows[entity.index()] = Some(EntityRow::default());
				entity
			},
			None => {
				self.rows.push(Some(EntityRow::default()));
				Entity::from_index(self.rows.len() - 1)
			},
		}
	}

	/// Take the row of `entity` and queue its handle for reuse.
	/// Returns *None*, and changes nothing, if `entity` is not alive.
	pub fn release(&mut self, entity: Entity) -> Option<EntityRow> {
		let row = self.rows.get_mut(entity.index())?.take()?;
		self.free.push_back(entity);
		self.live -= 1;
		Some(row)
	}

	#[inline(always)]
	pub fn is_alive(&self, entity: Entity) -> bool {
		self.get(entity).is_some()
	}

	#[inline(always)]
	pub fn get(&self, entity: Entity) -> Option<&EntityRow> {
		self.rows.get(entity.index())?.as_ref()
	}

	#[inline(always)]
	pub fn get_mut(&mut self, entity: Entity) -> Option<&mut EntityRow> {
		self.rows.get_mut(entity.index())?.as_mut()
	}

	/// The number of live entities.
	pub fn len(&self) -> usize {
		self.live
	}

	pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
		self.rows
			.iter()
			.enumerate()
			.filter_map(|(i, row)| row.as_ref().map(|_| Entity::from_index(i)))
	}

	/// Forget every row and handle, as if freshly created.
	pub fn clear(&mut self) {
		self.live = 0;
		self.free.clear();
		self.rows.truncate(1);
	}
}
