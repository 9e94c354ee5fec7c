//! Integration tests for persistent collections
//!
//! Tests GlSet and GlMap: ordering, structural sharing, and immutability.

use gridline_foundation::{EntityId, GlMap, GlSet, Position};

fn id(n: u64) -> EntityId {
    EntityId::new(n)
}

// =============================================================================
// GlSet
// =============================================================================

#[test]
fn set_iterates_in_order() {
    let set: GlSet<EntityId> = [5, 1, 3].into_iter().map(id).collect();
    let order: Vec<_> = set.iter().map(|e| e.raw()).collect();
    assert_eq!(order, vec![1, 3, 5]);
    assert_eq!(set.first(), Some(&id(1)));
}

#[test]
fn set_immutability() {
    let s1 = GlSet::unit(id(1));
    let s2 = s1.insert(id(2));
    let s3 = s2.remove(&id(1));

    assert_eq!(s1.len(), 1);
    assert_eq!(s2.len(), 2);
    assert!(!s3.contains(&id(1)));
    assert!(s2.contains(&id(1)));
}

#[test]
fn set_algebra() {
    let a: GlSet<Position> = [(0, 0), (1, 0), (2, 0)].into_iter().map(Position::from).collect();
    let b: GlSet<Position> = [(2, 0), (2, 1)].into_iter().map(Position::from).collect();

    assert_eq!(a.union(&b).len(), 4);
    assert_eq!(a.intersection(&b), GlSet::unit(Position::new(2, 0)));
    assert!(a.intersects(&b));
    assert!(!a.intersects(&GlSet::unit(Position::new(9, 9))));
}

#[test]
fn set_in_place_edits_report_change() {
    let mut set = GlSet::new();
    assert!(set.insert_mut(id(7)));
    assert!(!set.insert_mut(id(7)));
    assert!(set.remove_mut(&id(7)));
    assert!(!set.remove_mut(&id(7)));
    assert!(set.is_empty());
}

// =============================================================================
// GlMap
// =============================================================================

#[test]
fn map_structural_sharing() {
    let mut m = GlMap::new();
    for i in 0..1000 {
        m.insert_mut(id(i), i);
    }

    let m2 = m.clone();
    let m3 = m2.insert(id(1000), 1000);
    assert_eq!(m.len(), 1000);
    assert_eq!(m3.len(), 1001);
    assert_eq!(m2.get(&id(999)), Some(&999));
}

#[test]
fn map_keys_are_ordered() {
    let m: GlMap<EntityId, &str> = [(id(3), "c"), (id(1), "a"), (id(2), "b")]
        .into_iter()
        .collect();
    let values: Vec<_> = m.values().copied().collect();
    assert_eq!(values, vec!["a", "b", "c"]);
    assert_eq!(m.key_set().len(), 3);
}

#[test]
fn map_retain_and_get_mut() {
    let mut m: GlMap<EntityId, i32> = (1..=6).map(|i| (id(i), i32::try_from(i).unwrap())).collect();
    m.retain(|_, v| *v % 2 == 0);
    assert_eq!(m.len(), 3);

    if let Some(v) = m.get_mut(&id(2)) {
        *v = 20;
    }
    assert_eq!(m.get(&id(2)), Some(&20));
    assert!(!m.contains_key(&id(1)));
}

#[test]
fn equal_contents_hash_equal() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let hash = |m: &GlMap<EntityId, u32>| {
        let mut h = DefaultHasher::new();
        m.hash(&mut h);
        h.finish()
    };
    let a: GlMap<EntityId, u32> = [(id(1), 1), (id(2), 2)].into_iter().collect();
    let b = GlMap::new().insert(id(2), 2).insert(id(1), 1);
    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
}
