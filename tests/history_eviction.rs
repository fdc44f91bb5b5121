// tests/history_eviction.rs
use quotidian::history::RecentHistory;

#[test]
fn capacity_plus_one_inserts_evict_oldest_first() {
    let cap = 4;
    let mut h = RecentHistory::with_capacity(cap);
    for i in 0..=cap {
        h.insert(&format!("id-{i}"));
    }
    assert_eq!(h.len(), cap);
    assert!(!h.contains("id-0"), "oldest id should be evicted");
    for i in 1..=cap {
        assert!(h.contains(&format!("id-{i}")), "id-{i} should remain");
    }
}

#[test]
fn eviction_order_follows_insertion_order() {
    let mut h = RecentHistory::with_capacity(3);
    h.insert("a");
    h.insert("b");
    h.insert("c");
    h.insert("d"); // evicts a
    h.insert("e"); // evicts b
    assert!(!h.contains("a"));
    assert!(!h.contains("b"));
    assert!(h.contains("c"));
    assert!(h.contains("d"));
    assert!(h.contains("e"));
}

#[test]
fn reset_clears_everything() {
    let mut h = RecentHistory::with_capacity(5);
    h.insert("x");
    h.insert("y");
    h.reset();
    assert!(h.is_empty());
    assert!(!h.contains("x"));
    assert!(!h.contains("y"));
}

#[test]
fn capacity_floor_is_one() {
    let mut h = RecentHistory::with_capacity(0);
    h.insert("only");
    assert_eq!(h.capacity(), 1);
    assert!(h.contains("only"));
    h.insert("next");
    assert!(!h.contains("only"));
}
