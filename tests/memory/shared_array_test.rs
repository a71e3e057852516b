/*!
 * Shared Array Tests
 */

use crate::drop_counter::{counter, Tracked};
use kl_core::memory::SharedArray;
use kl_core::ErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn test_elements_destroyed_once_by_last_handle() {
    let drops = counter();
    let a = SharedArray::from_fn(5, |i| Tracked::new(i, &drops));
    let b = a.clone();
    let c = b.clone();
    assert_eq!(a.ref_count(), 3);
    drop(a);
    drop(b);
    assert_eq!(drops.get(), 0);
    assert_eq!(c.get(-1).unwrap().id, 4);
    drop(c);
    assert_eq!(drops.get(), 5);
}

#[test]
fn test_empty_request_allocates_nothing() {
    let a: SharedArray<u64> = SharedArray::new(0);
    assert!(a.is_null());
    assert_eq!(a.len(), 0);
    assert_eq!(a.ref_count(), 0);
    assert_eq!(a.get(0).unwrap_err().kind(), ErrorKind::NullReference);
}

#[test]
fn test_take_and_reset() {
    let mut a = SharedArray::from_slice(&[1u8, 2, 3]);
    let b = a.take();
    assert!(a.is_null());
    assert_eq!(b.ref_count(), 1);
    a.reset();
    assert_eq!(b.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_equality_by_content() {
    let a = SharedArray::from_slice(&[1, 2]);
    let b = SharedArray::from_slice(&[1, 2]);
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
}
