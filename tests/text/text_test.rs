/*!
 * Text Tests
 * Construction forms, buffer sharing and the immortal literal mode
 */

use kl_core::collections::{Dict, Set};
use kl_core::text::{Text, TextBuffer};
use kl_core::ErrorKind;
use pretty_assertions::assert_eq;
use std::ffi::CString;

const GREETING: Text = Text::literal("Hello world");

#[test]
fn test_literal_is_immortal() {
    let copies: Vec<Text> = (0..1000).map(|_| GREETING.clone()).collect();
    assert_eq!(GREETING.size(), 11);
    assert!(copies.iter().all(|t| t.is_immortal() && t.ref_count().is_none()));
    drop(copies);
    assert_eq!(GREETING, "Hello world");
}

static NUMBERED: &str = "  1  Hello world";

#[test]
fn test_views_of_one_literal_share_immortal_buffer() {
    let a = Text::literal(NUMBERED);
    let b = Text::literal(NUMBERED);
    assert!(a.is_immortal());
    assert!(a.buffer().ptr_eq(b.buffer()));
    assert_eq!(a, b);
    assert_eq!(a.size(), 16);
}

#[test]
fn test_default_is_empty_and_uncounted() {
    let t = Text::default();
    assert!(t.is_empty());
    assert!(t.is_immortal());
    assert_eq!(t, Text::new());
}

#[test]
fn test_c_string_sources() {
    let owned = CString::new("  1  Hello world").unwrap();
    let t = Text::from_c_str(Some(owned.as_c_str())).unwrap();
    assert_eq!(t.size(), 16);
    assert_eq!(Text::from_c_str(None).unwrap().size(), 0);
    assert_eq!(Text::from_nul_terminated(b"abc\0def").unwrap(), "abc");
    assert_eq!(Text::from_nul_terminated(b"no nul").unwrap(), "no nul");
}

#[test]
fn test_prefix_construction() {
    let t = Text::from_bytes(b"Hello world", 5).unwrap();
    assert_eq!(t, "Hello");
    assert_eq!(Text::from_bytes(b"Hello", 0).unwrap().size(), 0);
    assert_eq!(
        Text::from_bytes(b"Hi", 5).unwrap_err().kind(),
        ErrorKind::InvalidInputData
    );
}

#[test]
fn test_views_share_one_buffer() {
    let buffer = TextBuffer::allocate(b"shared payload").unwrap();
    let a = Text::from_buffer(&buffer);
    let b = Text::from(&buffer);
    assert_eq!(buffer.ref_count(), Some(3));
    let word = a.subtext(7, 14).unwrap();
    assert_eq!(word, "payload");
    assert_eq!(buffer.ref_count(), Some(4));
    drop(a);
    drop(b);
    drop(word);
    assert_eq!(buffer.ref_count(), Some(1));
}

#[test]
fn test_take_leaves_empty() {
    let mut a = Text::from(String::from("moving"));
    let b = a.take();
    assert!(a.is_empty());
    assert_eq!(b, "moving");
    assert_eq!(b.ref_count(), Some(1));
}

#[test]
fn test_usable_as_map_key() {
    let mut d = Dict::new();
    d.add(Text::from("b"), 2);
    d.add(Text::literal("a"), 1);
    d.add(Text::from("a"), 10);
    assert_eq!(d.len(), 2);
    assert_eq!(*d.get(&Text::literal("a")).unwrap(), 10);
    assert_eq!(d.keys().as_slice(), &[Text::from("a"), Text::from("b")]);

    let s: Set<Text> = ["x", "y", "x"].into_iter().map(Text::from).collect();
    assert_eq!(s.len(), 2);
}

#[test]
fn test_display_and_utf8() {
    let t = Text::from('ß');
    assert_eq!(t.size(), 2);
    assert_eq!(t.to_str().unwrap(), "ß");
    assert_eq!(format!("[{}]", Text::from("x")), "[x]");
}
