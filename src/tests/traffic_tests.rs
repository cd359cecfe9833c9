use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use crate::components::{Component, ComponentType};
use crate::tests::{isolated_world, A, B, C};
use std::collections::{BTreeMap, BTreeSet};
use crate::entities::Entity;
use crate::world::World;

/// What every live entity should hold: one optional value per kind A, B and C.
type Model = BTreeMap<Entity, [Option<i32>; 3]>;

fn attach(world: &mut World, entity: Entity, kind: usize, value: i32) {
	match kind {
		0 => {
			world.add_component(entity, A(value));
		},
		1 => {
			world.add_component(entity, B(value as f32));
		},
		_ => {
			world.add_component(entity, C(value.to_string()));
		},
	}
}

fn detach(world: &mut World, entity: Entity, kind: usize) -> Option<i32> {
	match kind {
		0 => world.remove_component::<A>(entity).map(|a| a.0),
		1 => world.remove_component::<B>(entity).map(|b| b.0 as i32),
		_ => world.remove_component::<C>(entity).map(|c| c.0.parse().unwrap()),
	}
}

fn read(world: &World, entity: Entity, kind: usize) -> Option<i32> {
	match kind {
		0 => world.get_component::<A>(entity).map(|a| a.0),
		1 => world.get_component::<B>(entity).map(|b| b.0 as i32),
		_ => world.get_component::<C>(entity).map(|c| c.0.parse().unwrap()),
	}
}

/// Every instance of `T` is owned by a live entity whose row points back at it.
fn check_packing<T: Component>(world: &World, model: &Model, kind: usize) {
	let expected = model.values().filter(|values| values[kind].is_some()).count();
	let ty = match world.type_of::<T>() {
		Some(ty) => ty,
		None => return assert_eq!(0, expected),
	};

	let owners = world.component_store::<T>().map(|store| store.entities()).unwrap_or(&[]);
	assert_eq!(expected, owners.len(), "{} store is not packed", T::LABEL);
	assert_eq!(expected, world.count_with_component::<T>());

	for (offset, owner) in owners.iter().enumerate() {
		assert!(world.is_alive(*owner), "{} instance owned by a dead entity", T::LABEL);
		let slot = world.component_slot(*owner, ty).map(|slot| slot.get() as usize);
		assert_eq!(Some(offset + 1), slot, "{} row does not point at its instance", T::LABEL);
	}
}

fn check_query(world: &World, model: &Model, types: &[ComponentType], kinds: &[usize]) {
	let expected = model
		.iter()
		.filter(|(_, values)| kinds.iter().all(|kind| values[*kind].is_some()))
		.map(|(entity, _)| *entity)
		.collect::<BTreeSet<_>>();

	let found = world.entities_with_types(types).unwrap().into_iter().collect::<BTreeSet<_>>();
	assert_eq!(expected, found, "Query over kinds {:?} does not match", kinds);
}

fn check(world: &World, model: &Model) {
	assert_eq!(model.len(), world.entity_count());
	assert_eq!(model.keys().copied().collect::<Vec<_>>(), world.entities().collect::<Vec<_>>());

	for (entity, values) in model {
		for (kind, value) in values.iter().enumerate() {
			assert_eq!(*value, read(world, *entity, kind), "{} kind {} holds the wrong value", entity, kind);
		}
	}

	check_packing::<A>(world, model, 0);
	check_packing::<B>(world, model, 1);
	check_packing::<C>(world, model, 2);
}

#[test]
pub fn random_traffic_matches_a_reference_model() {
	let mut rng = StdRng::seed_from_u64(0x5eed);
	let mut world = isolated_world();
	let mut model = Model::new();

	let a = world.register::<A>();
	let b = world.register::<B>();
	let c = world.register::<C>();

	for step in 0..4000 {
		let live = model.keys().copied().collect::<Vec<_>>();

		match (rng.gen_range(0..10), live.choose(&mut rng)) {
			(0..=2, _) | (_, None) => {
				let entity = world.create_entity();
				assert!(model.insert(entity, [None; 3]).is_none(), "{} handed out while alive", entity);
			},
			(3, Some(&entity)) => {
				world.destroy_entity(entity);
				model.remove(&entity);
			},
			(4..=7, Some(&entity)) => {
				let kind = rng.gen_range(0..3);
				let value = rng.gen_range(-1000..1000);
				attach(&mut world, entity, kind, value);
				model.get_mut(&entity).unwrap()[kind] = Some(value);
			},
			(_, Some(&entity)) => {
				let kind = rng.gen_range(0..3);
				let expected = model.get_mut(&entity).unwrap()[kind].take();
				assert_eq!(expected, detach(&mut world, entity, kind), "Detached the wrong value");
			},
		}

		if step % 97 == 0 {
			check(&world, &model);
		}
	}

	check(&world, &model);
	check_query(&world, &model, &[a], &[0]);
	check_query(&world, &model, &[a, b], &[0, 1]);
	check_query(&world, &model, &[c, a], &[2, 0]);
	check_query(&world, &model, &[a, b, c], &[0, 1, 2]);
}

#[test]
pub fn handles_stay_unique_under_churn() {
	let mut rng = StdRng::seed_from_u64(7);
	let mut world = isolated_world();
	let mut live = BTreeSet::new();

	for _ in 0..2000 {
		if live.is_empty() || rng.gen_bool(0.6) {
			let entity = world.create_entity();
			assert!(live.insert(entity), "{} handed out while alive", entity);
			world.add_component(entity, A(entity.to_raw() as i32));
		} else {
			let entity = *live.iter().nth(rng.gen_range(0..live.len())).unwrap();
			world.destroy_entity(entity);
			live.remove(&entity);
		}
	}

	assert_eq!(live.len(), world.entity_count());
	for entity in &live {
		assert_eq!(entity.to_raw() as i32, world.component::<A>(*entity).0);
	}
	assert_eq!(&live, world.entities_with_component::<A>());
}
