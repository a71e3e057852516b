/*!
 * Unique Pointer Tests
 * Ownership transfer and single execution of the destruction strategy
 */

use crate::drop_counter::{counter, Tracked};
use kl_core::memory::{make_array_ptr, make_ptr, FnDeleter, UniqueArrayPtr, UniquePtr};
use kl_core::ErrorKind;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::ptr::NonNull;

#[test]
fn test_scope_exit_destroys_once() {
    let drops = counter();
    {
        let _ptr = make_ptr(Tracked::new(1, &drops));
    }
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_take_transfers_ownership() {
    let drops = counter();
    let mut a = make_ptr(Tracked::new(7, &drops));
    let b = a.take();
    assert!(a.is_null());
    assert_eq!(a.value().unwrap_err().kind(), ErrorKind::NullReference);
    assert_eq!(b.value().unwrap().id, 7);
    drop(a);
    assert_eq!(drops.get(), 0);
    drop(b);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_reset_is_idempotent() {
    let drops = counter();
    let mut ptr = make_ptr(Tracked::new(0, &drops));
    ptr.reset();
    ptr.reset();
    drop(ptr);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_replace_destroys_previous() {
    let drops = counter();
    let mut ptr = make_ptr(Tracked::new(0, &drops));
    ptr.replace(make_ptr(Tracked::new(1, &drops)));
    assert_eq!(drops.get(), 1);
    assert_eq!(ptr.value().unwrap().id, 1);
}

#[test]
fn test_assign_null_then_dereference() {
    let drops = counter();
    let mut ptr = make_ptr(Tracked::new(0, &drops));
    ptr.replace(UniquePtr::null());
    assert_eq!(drops.get(), 1);
    assert!(ptr.is_null());
    assert_eq!(ptr.value().unwrap_err().kind(), ErrorKind::NullReference);
    drop(ptr);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_release_skips_destruction() {
    let drops = counter();
    let mut ptr = make_ptr(Tracked::new(0, &drops));
    let raw = ptr.release().unwrap();
    drop(ptr);
    assert_eq!(drops.get(), 0);
    drop(unsafe { Box::from_raw(raw.as_ptr()) });
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_custom_strategy_runs_once() {
    let calls = Cell::new(0);
    let raw = Box::into_raw(Box::new(5u64));
    let deleter = FnDeleter(|p: NonNull<u64>| {
        calls.set(calls.get() + 1);
        drop(unsafe { Box::from_raw(p.as_ptr()) });
    });
    let mut ptr = unsafe { UniquePtr::from_raw_with(raw, deleter) };
    ptr.reset();
    drop(ptr);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_array_form_strict_bounds() {
    let mut arr: UniqueArrayPtr<i32> = make_array_ptr(4);
    assert_eq!(arr.size(), 4);
    *arr.get_mut(3).unwrap() = 9;
    assert_eq!(arr.get(3).unwrap(), &9);
    assert_eq!(arr.get(4).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(arr.get(-1).unwrap_err().kind(), ErrorKind::OutOfRange);

    arr.reset();
    assert_eq!(arr.size(), 0);
    assert_eq!(arr.get(0).unwrap_err().kind(), ErrorKind::NullReference);
}

#[test]
fn test_array_form_destroys_every_element() {
    let drops = counter();
    let values: Vec<Tracked> = (0..6).map(|i| Tracked::new(i, &drops)).collect();
    let arr = UniqueArrayPtr::from(values);
    assert_eq!(arr.as_slice().unwrap().len(), 6);
    drop(arr);
    assert_eq!(drops.get(), 6);
}
