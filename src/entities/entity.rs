use std::num::NonZeroU32;
use std::fmt;

/// A unique handle to an `Entity`.
///
/// Handles are recycled: once an entity is destroyed, a later
/// [create_entity](crate::world::World::create_entity) may hand the same handle out again.
/// The value 0 is reserved and can never name an entity.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct Entity {
	index: NonZeroU32,
}

impl Entity {
	/// Rebuild a handle from its numeric value. Returns *None* for the reserved value 0.
	pub const fn from_raw(value: u32) -> Option<Self> {
		match NonZeroU32::new(value) {
			Some(index) => Some(Self { index }),
			None => None,
		}
	}

	#[inline(always)]
	pub const fn to_raw(&self) -> u32 {
		self.index.get()
	}

	#[inline(always)]
	pub(crate) fn index(&self) -> usize {
		self.index.get() as usize
	}

	#[inline(always)]
	pub(crate) fn from_index(index: usize) -> Self {
		debug_assert!(index > 0 && index <= u32::MAX as usize, "Entity index out of range");
		Self {
			index: NonZeroU32::MIN.saturating_add(index as u32 - 1),
		}
	}
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Entity({})", self.index)
	}
}

#[inline(always)]
pub(crate) fn assert_entity(entity: Entity, alive: bool) {
	#[cfg(not(feature = "debug_only_assertions"))]
	assert!(alive, "{} has already been destroyed", entity);

	#[cfg(feature = "debug_only_assertions")]
	debug_assert!(alive, "{} has already been destroyed", entity);
}
