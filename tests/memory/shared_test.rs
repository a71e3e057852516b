/*!
 * Shared Handle Tests
 * Reference counting across copies, assignment and moves
 */

use crate::drop_counter::{counter, Tracked};
use kl_core::memory::{make_mutable_shareable, make_shareable, SharedMut};
use kl_core::ErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn test_copies_share_count_and_destroy_once() {
    let drops = counter();
    let first = make_shareable(Tracked::new(1, &drops));
    let copies: Vec<_> = (0..9).map(|_| first.clone()).collect();
    assert_eq!(first.ref_count(), 10);
    assert!(copies.iter().all(|c| c.ptr_eq(&first) && c.id == 1));

    drop(copies);
    assert_eq!(first.ref_count(), 1);
    assert_eq!(drops.get(), 0);
    drop(first);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_mutable_assignment_releases_old_cell() {
    let drops = counter();
    let mut a = make_mutable_shareable(Tracked::new(1, &drops));
    let b = make_mutable_shareable(Tracked::new(2, &drops));
    a.assign(&b);
    assert_eq!(drops.get(), 1);
    assert_eq!(b.ref_count(), 2);
    assert_eq!(a.value().unwrap().id, 2);

    a.assign(&b.clone());
    assert_eq!(b.ref_count(), 2);
}

#[test]
fn test_mutable_null_and_take() {
    let mut empty: SharedMut<u8> = SharedMut::null();
    assert_eq!(empty.ref_count(), 0);
    assert_eq!(empty.value().unwrap_err().kind(), ErrorKind::NullReference);

    let mut a = make_mutable_shareable(3u8);
    let moved = a.take();
    assert!(a.is_null());
    assert_eq!(moved.ref_count(), 1);
    empty.assign(&moved);
    assert_eq!(moved.ref_count(), 2);
}

#[test]
fn test_shared_mutation_requires_sole_owner() {
    let mut a = make_mutable_shareable(String::from("a"));
    a.value_mut().unwrap().push('b');
    let other = a.clone();
    assert_eq!(
        a.value_mut().unwrap_err().kind(),
        ErrorKind::OperationNotSupported
    );
    assert_eq!(other.value().unwrap(), "ab");
}
