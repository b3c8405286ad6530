//! Integration tests for AssocMap
//!
//! Tests the uninitialized/initialized distinction and `(value, found)` lookups.

use std::collections::HashSet;

use minirt_foundation::AssocMap;

#[test]
fn fresh_map_is_uninitialized() {
    let m: AssocMap<String, i32> = AssocMap::default();
    assert!(!m.is_initialized());
    assert_eq!(m.len(), 0);
}

#[test]
fn one_set_initializes() {
    let mut m: AssocMap<String, i32> = AssocMap::default();
    m.set("A".to_string(), 10);
    assert!(m.is_initialized());
    assert_eq!(m.len(), 1);
}

#[test]
fn absent_key_returns_zero_value() {
    let mut m: AssocMap<String, String> = AssocMap::new();
    assert_eq!(m.get(&"missing".to_string()), (String::new(), false));

    m.set("present".to_string(), String::new());
    // Found with a zero value is distinguishable from absent
    assert_eq!(m.get(&"present".to_string()), (String::new(), true));
}

#[test]
fn set_delete_lookup_sequence() {
    let mut m2: AssocMap<&str, i32> = AssocMap::new();
    m2.set("A", 10);
    m2.set("B", 20);
    m2.set("C", 30);
    assert_eq!(m2.len(), 3);
    assert_eq!(m2.get(&"A"), (10, true));

    m2.delete(&"A");
    assert_eq!(m2.len(), 2);
    assert_eq!(m2.get(&"A"), (0, false));
    assert_eq!(m2.get(&"B"), (20, true));
}

#[test]
fn operations_on_uninitialized_are_noops() {
    let mut m: AssocMap<&str, i32> = AssocMap::uninit();
    assert_eq!(m.delete(&"A"), None);
    assert_eq!(m.lookup(&"A"), None);
    assert!(!m.contains_key(&"A"));
    assert_eq!(m.iter().count(), 0);
    assert!(!m.is_initialized());
}

#[test]
fn emptied_map_stays_initialized() {
    let mut m = AssocMap::from([("A", 1)]);
    m.delete(&"A");
    assert!(m.is_empty());
    assert!(m.is_initialized());
    assert_ne!(m, AssocMap::uninit());
    assert_eq!(m, AssocMap::new());
}

#[test]
fn iteration_compared_as_set() {
    let m = AssocMap::from([("A", 1), ("B", 2), ("C", 3)]);
    let pairs: HashSet<(&str, i32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
    let expected: HashSet<(&str, i32)> = [("A", 1), ("B", 2), ("C", 3)].into_iter().collect();
    assert_eq!(pairs, expected);
}
