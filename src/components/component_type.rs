use crate::entities::Entity;
use crate::world::World;
use std::fmt;

/// The largest number of distinct [components](Component) a registry can ever hold.
pub const MAX_COMPONENT_TYPES: usize = u16::MAX as usize;

/// A dense runtime identifier tied to a [Component] type.
///
/// Identifiers are handed out by a [ComponentRegistry](crate::components::ComponentRegistry)
/// in registration order, starting at 0, and are never reused.
/// They are not stable between program re-runs unless registration order is.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentType {
	value: u16,
}

impl ComponentType {
	/// Rebuilds a [ComponentType] from its numeric value.
	///
	/// Nothing guarantees the value was handed out by a registry;
	/// the `*_by_type` methods on [World] report unknown values as errors.
	#[inline(always)]
	pub const fn from_raw(value: u16) -> Self {
		Self { value }
	}

	#[inline(always)]
	pub const fn value(&self) -> u16 {
		self.value
	}

	#[inline(always)]
	pub(crate) const fn index(&self) -> usize {
		self.value as usize
	}
}

impl fmt::Display for ComponentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.value)
	}
}

/// A piece of data that can be attached to an [Entity].
///
/// Besides its label, every component carries three hooks that generic tooling can invoke
/// knowing nothing but the component's [ComponentType]:
/// - `create` attaches a default-constructed instance, overwriting any existing one.
/// - `destroy` detaches the instance, if any.
/// - `inspect` is never called by the world itself; debug front-ends use it to display
///   or edit the instance. It does nothing by default.
///
/// Use `#[derive(Component)]` for the default hooks, or implement the trait by hand to override them.
pub trait Component: 'static + Default {
	const LABEL: &'static str = "Unnamed Component";

	fn create(world: &mut World, entity: Entity) {
		world.add_component(entity, Self::default());
	}

	fn destroy(world: &mut World, entity: Entity) {
		world.remove_component::<Self>(entity);
	}

	fn inspect(_world: &mut World, _entity: Entity) {}
}
