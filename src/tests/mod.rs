use crate::components::{Component, ComponentRegistry};
use crate::entities::Entity;
use crate::world::World;

mod traffic_tests;
mod dense_store_tests;

#[derive(Default, Debug, Clone, PartialEq, Component)]
pub struct A(pub i32);

#[derive(Default, Debug, Clone, PartialEq, Component)]
pub struct B(pub f32);

#[derive(Default, Debug, Clone, PartialEq, Component)]
pub struct C(pub String);

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Payload {
	pub a: i32,
	pub b: f32,
	pub c: String,
}

#[derive(Default, Debug, Clone, PartialEq, Component)]
#[component(label = "Payload Holder")]
pub struct D(pub Payload);

/// A component overriding every hook.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct E {
	pub value: i32,
	pub inspected: u32,
}

impl Component for E {
	const LABEL: &'static str = "E";

	fn create(world: &mut World, entity: Entity) {
		world.add_component(entity, E { value: 7, inspected: 0 });
	}

	fn destroy(world: &mut World, entity: Entity) {
		world.remove_component::<E>(entity);
	}

	fn inspect(world: &mut World, entity: Entity) {
		if let Some(e) = world.get_component_mut::<E>(entity) {
			e.inspected += 1;
		}
	}
}

/// A world with its own registry, so identifiers do not depend on other tests.
pub fn isolated_world() -> World {
	World::with_registry(ComponentRegistry::shared())
}
