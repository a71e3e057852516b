/*!
 * Array Tests
 * Growth law, construction modes, bounds checking and drop accounting
 */

use crate::drop_counter::{counter, Tracked};
use kl_core::memory::{Array, Cursor};
use kl_core::ErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_sequential_push_growth() {
    let mut array = Array::new();
    assert_eq!(array.capacity(), 0);

    let mut seen = Vec::new();
    for i in 0..40 {
        array.push(i);
        if seen.last() != Some(&array.capacity()) {
            seen.push(array.capacity());
        }
    }
    assert_eq!(seen, vec![8, 16, 32, 64]);
    assert_eq!(array.len(), 40);
}

#[test]
fn test_bulk_append_single_step() {
    let mut array = Array::from([1, 2, 3, 4]);
    assert_eq!(array.capacity(), 4);
    array.extend_from_slice(&[0; 20]);
    assert_eq!(array.len(), 24);
    assert_eq!(array.capacity(), 24);
}

#[test]
fn test_literal_list_round_trip() {
    let array = Array::from([1, 2, 3, 4, 5]);
    let collected: Vec<i32> = array.iter().copied().collect();
    assert_eq!(collected, vec![1, 2, 3, 4, 5]);
    assert_eq!(array[-1], 5);
    assert_eq!(array[-5], 1);
}

#[test]
fn test_construction_modes() {
    let filled = Array::build(3, String::from("x"));
    assert_eq!(filled.len(), 3);
    assert_eq!(filled.capacity(), 3);

    let reserved: Array<u8> = Array::with_capacity(16);
    assert_eq!(reserved.len(), 0);
    assert_eq!(reserved.reserved(), 16);

    let mut raw = Array::<u32>::new_uninit(4);
    for (i, slot) in raw.iter_mut().enumerate() {
        slot.write(i as u32);
    }
    let raw = unsafe { raw.assume_init() };
    assert_eq!(raw.as_slice(), &[0, 1, 2, 3]);
}

#[test]
fn test_relative_and_strict_access() {
    let array = Array::from(['a', 'b', 'c']);
    assert_eq!(array.get(-1).unwrap(), &'c');
    assert_eq!(array.get(-4).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(array.at(2).unwrap(), &'c');
    assert_eq!(array.at(-1).unwrap_err().kind(), ErrorKind::OutOfRange);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_index_operator_panics_out_of_range() {
    let array = Array::from([1, 2]);
    let _ = array[7];
}

#[test]
fn test_cursor_validity_follows_array() {
    let mut array = Array::from([10, 20, 30]);
    let cursor = array.last();
    assert!(array.valid(cursor));
    assert_eq!(array[cursor], 30);

    array.pop();
    assert!(!array.valid(cursor));
    assert_eq!(array.get_at(cursor).unwrap_err().kind(), ErrorKind::OutOfRange);

    let mut before = Cursor::new(0);
    before.retreat();
    assert!(!array.valid(before));
}

#[test]
fn test_every_value_dropped_once() {
    let drops = counter();
    {
        let mut array = Array::new();
        for i in 0..20 {
            array.push(Tracked::new(i, &drops));
        }
        let removed = array.remove_at(3).unwrap();
        assert_eq!(removed.id, 3);
        drop(removed);
        assert_eq!(drops.get(), 1);
        assert_eq!(array[3].id, 4);
    }
    assert_eq!(drops.get(), 20);
}

#[test]
fn test_remove_equal_values_drops_each_once() {
    let drops = counter();
    let mut array: Array<Tracked> = [1, 2, 1, 3, 1]
        .into_iter()
        .map(|id| Tracked::new(id, &drops))
        .collect();
    let target = Tracked::new(1, &drops);
    assert_eq!(array.remove(&target), 3);
    assert_eq!(drops.get(), 3);
    let ids: Vec<usize> = array.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3]);
    drop(target);
    drop(array);
    assert_eq!(drops.get(), 6);
}

#[test]
fn test_remove_range_drops_only_the_range() {
    let drops = counter();
    let mut array: Array<Tracked> = (0..6).map(|i| Tracked::new(i, &drops)).collect();
    array.remove_range(4, 10);
    assert_eq!(drops.get(), 2);
    array.remove_range(9, 1);
    assert_eq!(drops.get(), 2);
    array.remove_range(1, 2);
    assert_eq!(drops.get(), 4);
    let ids: Vec<usize> = array.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![0, 3]);
    drop(array);
    assert_eq!(drops.get(), 6);
}

#[test]
fn test_retain_and_sort() {
    let mut array = Array::from([5, 3, 8, 1, 4]);
    array.retain(|v| *v != 8);
    assert_eq!(array.sort().as_slice(), &[1, 3, 4, 5]);
    assert!(array.all(|v| *v < 8));
    assert_eq!(array.select(|v| *v > 3).as_slice(), &[4, 5]);
}

#[test]
fn test_relocation_does_not_drop() {
    let drops = counter();
    let mut array = Array::new();
    for i in 0..9 {
        array.push(Tracked::new(i, &drops));
    }
    array.reserve(100);
    assert_eq!(drops.get(), 0);
    array.clear();
    assert_eq!(drops.get(), 9);
    assert_eq!(array.capacity(), 100);
}

#[test]
fn test_partial_into_iter_drops_rest() {
    let drops = counter();
    let array: Array<Tracked> = (0..5).map(|i| Tracked::new(i, &drops)).collect();
    let mut iter = array.into_iter();
    let first = iter.next().unwrap();
    assert_eq!(first.id, 0);
    drop(iter);
    assert_eq!(drops.get(), 4);
    drop(first);
    assert_eq!(drops.get(), 5);
}

proptest! {
    #[test]
    fn prop_len_never_exceeds_capacity(ops in proptest::collection::vec(0u8..4, 0..200)) {
        let mut array = Array::new();
        for op in ops {
            let before = array.capacity();
            match op {
                0 | 1 => array.push(op),
                2 => { array.pop(); }
                _ => array.extend_from_slice(&[7; 5]),
            }
            prop_assert!(array.len() <= array.capacity());
            prop_assert!(array.capacity() >= before);
        }
    }

    #[test]
    fn prop_growth_doubles_or_fits(initial in 0usize..64, extra in 1usize..64) {
        let mut array: Array<u8> = Array::with_capacity(initial);
        array.extend_from_slice(&vec![0; initial]);
        array.extend_from_slice(&vec![1; extra]);
        let expected = initial + initial.max(8usize.max(extra));
        prop_assert_eq!(array.capacity(), expected);
    }
}
