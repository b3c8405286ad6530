//! Integration tests for Sequence
//!
//! Tests store sharing between views, in-place versus reallocating appends,
//! and copy isolation.

use minirt_foundation::{ErrorKind, GrowthPolicy, Sequence, copy_into};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn nil_is_not_empty_literal() {
    let s1: Sequence<i32> = Sequence::nil();
    let s2: Sequence<i32> = Sequence::from_literal(Vec::new());

    assert!(s1.is_nil());
    assert!(!s2.is_nil());
    assert!(s1.is_empty() && s2.is_empty());
}

#[test]
fn literal_sizes_store_exactly() {
    let s = Sequence::from_literal(["a", "b", "c"]);
    assert_eq!(s.len(), 3);
    assert_eq!(s.cap(), 3);
}

#[test]
fn with_len_cap_rejects_len_over_cap() {
    let err = Sequence::<i32>::with_len_cap(5, 3).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("invalid argument"));
}

// =============================================================================
// Aliasing
// =============================================================================

#[test]
fn in_place_append_shares_storage() {
    let s: Sequence<char> = Sequence::with_len_cap(2, 4).unwrap();
    s.set(0, 'a').unwrap();
    s.set(1, 'b').unwrap();

    let t = s.append(['c']);
    assert!(t.shares_store_with(&s));

    t.set(0, 'z').unwrap();
    assert_eq!(s.get(0), Some('z'));
    // s's length does not cover the appended slot
    assert_eq!(s.len(), 2);
    assert_eq!(s.get(2), None);
}

#[test]
fn overflowing_append_detaches() {
    let s = Sequence::from_literal([1, 2]);
    let t = s.append([3]);
    assert!(!t.shares_store_with(&s));

    t.set(0, 100).unwrap();
    assert_eq!(s.get(0), Some(1));
    assert_eq!(t.to_vec(), vec![100, 2, 3]);
}

#[test]
fn append_boundary_is_exactly_capacity() {
    let s: Sequence<i32> = Sequence::with_len_cap(1, 3).unwrap();
    let fits = s.append([1, 2]);
    let overflows = s.append([1, 2, 3]);

    assert!(fits.shares_store_with(&s));
    assert_eq!(fits.cap(), 3);
    assert!(!overflows.shares_store_with(&s));
    assert!(overflows.cap() >= 4);
}

#[test]
fn two_appends_from_same_base_clobber_each_other() {
    let base: Sequence<i32> = Sequence::with_len_cap(1, 4).unwrap();
    let a = base.append([1]);
    let b = base.append([2]);

    // Both wrote slot 1 of the shared store
    assert_eq!(a.get(1), Some(2));
    assert_eq!(b.get(1), Some(2));
}

#[test]
fn subview_capacity_extends_to_parent_bound() {
    let s = Sequence::from_literal([0, 1, 2, 3, 4, 5]);
    let v = s.subview(1, 3).unwrap();
    assert_eq!(v.len(), 2);
    assert_eq!(v.cap(), 5);

    let v = v.append([99]);
    assert!(v.shares_store_with(&s));
    assert_eq!(s.get(3), Some(99));
    assert_eq!(s.to_vec(), vec![0, 1, 2, 99, 4, 5]);
}

#[test]
fn subview_write_is_visible_in_parent() {
    let s5: Sequence<i32> = Sequence::with_len_cap(4, 6).unwrap();
    let s6 = s5.subview(1, 3).unwrap();
    s6.set(1, 10).unwrap();

    assert_eq!(s5.to_vec(), vec![0, 0, 10, 0]);
    assert_eq!(s6.to_vec(), vec![0, 10]);
}

#[test]
fn clone_aliases_store() {
    let s = Sequence::from_literal([1, 2, 3]);
    let alias = s.clone();
    alias.set(2, 30).unwrap();
    assert_eq!(s.get(2), Some(30));
}

#[test]
fn bounds_rejection() {
    let s = Sequence::from_literal([1, 2, 3, 4]);
    assert!(s.subview(3, 2).unwrap_err().is_index_out_of_range());
    assert!(s.subview(0, s.len() + 1).unwrap_err().is_index_out_of_range());
    assert!(s.subview(0, s.len()).is_ok());
    assert!(s.subview(4, 4).unwrap().is_empty());
}

#[test]
fn subview_errors_use_bounds_kind() {
    let s = Sequence::from_literal([1, 2, 3]);

    let err = s.subview(2, 1).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::BoundsOutOfRange {
            start: 2,
            end: 1,
            length: 3
        }
    );
    assert!(err.is_index_out_of_range());

    let err = s.subview_capped(0, 2, 4).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BoundsOutOfRange { .. }));
    assert!(!err.is_invalid_argument());

    let err = s.set(3, 0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IndexOutOfRange { index: 3, length: 3 }));
}

// =============================================================================
// Copy
// =============================================================================

#[test]
fn copy_isolation() {
    let s5: Sequence<i32> = Sequence::with_len_cap(4, 6).unwrap();
    s5.set(2, 10).unwrap();
    let src = s5.subview(1, 3).unwrap();

    let sc6 = Sequence::with_len(src.len());
    assert_eq!(copy_into(&sc6, &src), 2);
    assert_eq!(sc6.to_vec(), vec![0, 10]);

    sc6.set(1, 1).unwrap();
    src.set(0, 7).unwrap();
    assert_eq!(s5.to_vec(), vec![0, 7, 10, 0]);
    assert_eq!(sc6.to_vec(), vec![0, 1]);
    assert!(!sc6.shares_store_with(&s5));
}

#[test]
fn copy_never_grows_destination() {
    let dst: Sequence<i32> = Sequence::with_len_cap(1, 8).unwrap();
    let src = Sequence::from_literal([5, 6, 7]);
    assert_eq!(dst.copy_from(&src), 1);
    assert_eq!(dst.len(), 1);
    assert_eq!(dst.to_vec(), vec![5]);
}

// =============================================================================
// Growth policy
// =============================================================================

#[test]
fn custom_policy_controls_new_capacity() {
    let s = Sequence::from_literal([1, 2, 3, 4]);
    let exact = s.append_with(&GrowthPolicy::exact(), [5]);
    let doubled = s.append_with(&GrowthPolicy::doubling(), [5]);

    assert_eq!(exact.cap(), 5);
    assert_eq!(doubled.cap(), 8);
    assert_eq!(exact.to_vec(), doubled.to_vec());
}

#[test]
fn repeated_appends_keep_contents() {
    let mut s: Sequence<i32> = Sequence::nil();
    for i in 0..1000 {
        s = s.append([i]);
        assert!(s.len() <= s.cap());
    }
    assert_eq!(s.len(), 1000);
    assert_eq!(s.iter().collect::<Vec<_>>(), (0..1000).collect::<Vec<_>>());
}
