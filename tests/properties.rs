use collections_extended::{Bag, RangeMap, SetList};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
	Set(u8, u8, u8),
	Delete(u8, u8),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
	let op = prop_oneof![
		(any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(a, b, v)| Op::Set(a, b, v)),
		(any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::Delete(a, b)),
	];
	proptest::collection::vec(op, 1..40)
}

proptest! {
	// A range map is, pointwise, just a map: replaying every operation
	// against a dense per-key model must agree at every key.
	#[test]
	fn range_map_matches_point_model(ops in ops()) {
		let mut map: RangeMap<u8, u8> = RangeMap::new();
		let mut model = [None::<u8>; 256];
		for op in ops {
			match op {
				Op::Set(a, b, v) => {
					let (start, stop) = (a.min(b), a.max(b));
					if start < stop {
						map.set(start, stop, v).unwrap();
						for k in start..stop {
							model[k as usize] = Some(v);
						}
					}
				}
				Op::Delete(a, b) => {
					let (start, stop) = (a.min(b), a.max(b));
					if start < stop {
						map.delete(start, stop).unwrap();
						for k in start..stop {
							model[k as usize] = None;
						}
					}
				}
			}
		}
		for k in 0..=255u8 {
			prop_assert_eq!(map.get(&k).unwrap(), model[k as usize].as_ref());
		}
		// Canonical form: touching spans never hold equal values.
		let spans: Vec<_> = map.ranges().collect();
		for pair in spans.windows(2) {
			if pair[0].stop == pair[1].start {
				prop_assert_ne!(pair[0].value, pair[1].value);
			}
		}
	}

	#[test]
	fn range_map_set_is_idempotent(ops in ops(), a in any::<u8>(), b in any::<u8>(), v in any::<u8>()) {
		prop_assume!(a != b);
		let (start, stop) = (a.min(b), a.max(b));
		let mut map: RangeMap<u8, u8> = RangeMap::new();
		for op in ops {
			if let Op::Set(a, b, v) = op {
				let (start, stop) = (a.min(b), a.max(b));
				if start < stop {
					map.set(start, stop, v).unwrap();
				}
			}
		}
		map.set(start, stop, v).unwrap();
		let once = map.clone();
		map.set(start, stop, v).unwrap();
		prop_assert_eq!(map, once);
	}

	#[test]
	fn bag_size_is_sum_of_counts(elems in proptest::collection::vec(any::<u8>(), 0..60)) {
		let bag: Bag<u8> = elems.iter().copied().collect();
		let total: usize = bag.counts().map(|(_, count)| count).sum();
		prop_assert_eq!(bag.len(), total);
		prop_assert_eq!(bag.len(), elems.len());
		for elem in &bag {
			prop_assert!(elems.contains(elem));
		}
	}

	#[test]
	fn bag_algebra_laws(
		left in proptest::collection::vec(any::<u8>(), 0..40),
		right in proptest::collection::vec(any::<u8>(), 0..40),
	) {
		let left: Bag<u8> = left.into_iter().collect();
		let right: Bag<u8> = right.into_iter().collect();
		let union = &left | &right;
		let intersection = &left & &right;
		let sum = &left + &right;
		let difference = &left - &right;
		let symmetric = &left ^ &right;
		for elem in 0..=255u8 {
			let l = left.count(&elem);
			let r = right.count(&elem);
			prop_assert_eq!(union.count(&elem), l.max(r));
			prop_assert_eq!(intersection.count(&elem), l.min(r));
			prop_assert_eq!(sum.count(&elem), l + r);
			prop_assert_eq!(difference.count(&elem), l.saturating_sub(r));
			prop_assert_eq!(symmetric.count(&elem), l.abs_diff(r));
		}
		prop_assert!(intersection.is_subset(&left));
		prop_assert!(union.is_superset(&right));
	}

	#[test]
	fn bag_add_then_remove_restores(elems in proptest::collection::vec(any::<u8>(), 0..40), extra in any::<u8>()) {
		let mut bag: Bag<u8> = elems.into_iter().collect();
		let before = bag.clone();
		bag.add(extra);
		bag.remove(&extra).unwrap();
		prop_assert_eq!(bag, before);
	}

	#[test]
	fn setlist_keeps_first_occurrences(elems in proptest::collection::vec(any::<u8>(), 0..60)) {
		let sl: SetList<u8> = elems.iter().copied().collect();

		let mut expected = Vec::new();
		for elem in &elems {
			if !expected.contains(elem) {
				expected.push(*elem);
			}
		}
		prop_assert_eq!(sl.as_slice(), expected.as_slice());
		for (i, elem) in sl.iter().enumerate() {
			prop_assert_eq!(sl.index_of(elem), Some(i));
		}
	}

	#[test]
	fn setlist_swap_preserves_membership(elems in proptest::collection::vec(any::<u8>(), 2..40), i in any::<prop::sample::Index>(), j in any::<prop::sample::Index>()) {
		let mut sl: SetList<u8> = elems.into_iter().collect();
		prop_assume!(sl.len() >= 2);
		let (i, j) = (i.index(sl.len()), j.index(sl.len()));
		let before = sl.clone();
		sl.swap(i, j);
		for (pos, elem) in sl.iter().enumerate() {
			prop_assert_eq!(sl.index_of(elem), Some(pos));
			prop_assert!(before.contains(elem));
		}
		sl.swap(i, j);
		prop_assert_eq!(sl, before);
	}
}
