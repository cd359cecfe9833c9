use crate::components::{Component, ComponentType};
use crate::entities::Entity;
use crate::world::World;
use paste::paste;

/// A tuple of [Component] types that are queried together.
///
/// Implemented for tuples of 1 to 12 components. The empty tuple is deliberately left out:
/// a query over no component has no set to drive it.
pub trait ComponentSet {
	const LEN: usize;

	/// Push the [ComponentType] of every member into `types`.
	/// Returns *false* as soon as a member has never been attached in `world`.
	fn collect_types(world: &World, types: &mut Vec<ComponentType>) -> bool;

	/// Check whether `entity` holds every member of the set.
	fn contained_in(world: &World, entity: Entity) -> bool;
}

/// A tuple of [Component] values attached to an [Entity] in a single call.
///
/// Members are attached one after the other, in tuple order,
/// exactly as if [World::add_component] had been called for each of them.
pub trait ComponentBundle {
	fn attach_to(self, world: &mut World, entity: Entity);
}

macro_rules! impl_component_tuple {
    ($($t: ident),*) => {
        paste! {
            impl<$($t: Component),*> ComponentSet for ($($t,)*) {
                const LEN: usize = [$(stringify!($t)),*].len();

                fn collect_types(world: &World, types: &mut Vec<ComponentType>) -> bool {
                    $(
                        match world.known_type::<$t>() {
                            Some(ty) => types.push(ty),
                            None => return false,
                        }
                    )*
                    true
                }

                fn contained_in(world: &World, entity: Entity) -> bool {
                    $(world.has_component::<$t>(entity))&&*
                }
            }

            impl<$($t: Component),*> ComponentBundle for ($($t,)*) {
                fn attach_to(self, world: &mut World, entity: Entity) {
                    let ($([<$t:lower>],)*) = self;
                    $(world.add_component(entity, [<$t:lower>]);)*
                }
            }
        }
    };
}

impl_component_tuple!(T0);
impl_component_tuple!(T0, T1);
impl_component_tuple!(T0, T1, T2);
impl_component_tuple!(T0, T1, T2, T3);
impl_component_tuple!(T0, T1, T2, T3, T4);
impl_component_tuple!(T0, T1, T2, T3, T4, T5);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
