use crate::data_structures::{AnyStore, DenseStore, Relocation, Slot};
use crate::entities::Entity;

fn entity(value: u32) -> Entity {
	Entity::from_raw(value).unwrap()
}

fn slot(value: u32) -> Slot {
	Slot::new(value).unwrap()
}

fn filled(count: u32) -> DenseStore<u32> {
	let mut store = DenseStore::new();
	for i in 1..=count {
		store.insert(entity(i), i * 10);
	}
	store
}

#[test]
pub fn slot_zero_is_reserved() {
	assert_eq!(None, Slot::new(0));
	assert_eq!(None, Entity::from_raw(0));
	assert_eq!(std::mem::size_of::<Slot>(), std::mem::size_of::<Option<Slot>>());
}

#[test]
pub fn insert_hands_out_consecutive_slots_from_one() {
	let mut store = DenseStore::new();

	for i in 1..=8 {
		let inserted = store.insert(entity(i), i);
		assert_eq!(i, inserted.get(), "Inserted slot does not match expected slot");
		assert_eq!(Some(&i), store.get(inserted));
		assert_eq!(Some(entity(i)), store.owner(inserted));
	}

	assert_eq!(8, store.len());
}

#[test]
pub fn removing_the_last_slot_relocates_nothing() {
	let mut store = filled(3);

	let (value, relocation) = store.remove(slot(3));

	assert_eq!(30, value);
	assert_eq!(Relocation::None, relocation, "Removing the last slot moved an instance");
	assert_eq!([10, 20], store.as_slice());
}

#[test]
pub fn removing_an_inner_slot_moves_the_last_instance() {
	let mut store = filled(4);

	let (value, relocation) = store.remove(slot(2));

	assert_eq!(20, value);
	assert_eq!(
		Relocation::Moved { entity: entity(4), slot: slot(2) },
		relocation,
		"Relocation does not report the moved instance"
	);
	assert_eq!([10, 40, 30], store.as_slice(), "Store is not packed after removal");
	assert_eq!([entity(1), entity(4), entity(3)], store.entities(), "Owners were not moved along");
	assert_eq!(None, store.get(slot(4)), "Freed tail slot is still readable");
}

#[test]
pub fn removing_the_only_slot_empties_the_store() {
	let mut store = filled(1);

	let (_, relocation) = store.remove(slot(1));

	assert_eq!(Relocation::None, relocation);
	assert!(store.is_empty());

	let reinserted = store.insert(entity(9), 90);
	assert_eq!(1, reinserted.get(), "Slots are not reused after emptying the store");
}

#[test]
pub fn indexing_reads_and_writes_in_place() {
	let mut store = filled(2);

	store[slot(2)] += 5;

	assert_eq!(25, store[slot(2)]);
	assert_eq!(vec![(entity(1), &10), (entity(2), &25)], store.iter().collect::<Vec<_>>());
}

#[test]
#[should_panic]
pub fn indexing_a_dead_slot_panics() {
	let store = filled(2);
	let _value = store[slot(3)];
}

#[test]
pub fn clear_discards_every_instance() {
	let mut store = filled(5);

	store.clear();

	assert!(store.is_empty());
	assert!(store.entities().is_empty());
	assert_eq!(1, store.insert(entity(1), 1).get(), "Slots do not restart at 1 after clear");
}

#[test]
pub fn erased_store_removal_reports_relocations() {
	let mut store: Box<dyn AnyStore> = Box::new(filled(3));

	let relocation = store.remove_slot(slot(1));

	assert_eq!(Relocation::Moved { entity: entity(3), slot: slot(1) }, relocation);
	assert_eq!(2, store.len());

	let typed = store.as_any().downcast_ref::<DenseStore<u32>>().unwrap();
	assert_eq!([30, 20], typed.as_slice());
	assert!(store.as_any().downcast_ref::<DenseStore<i64>>().is_none());
}
