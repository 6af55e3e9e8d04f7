//! Property-based invariant tests for the order mutator and position
//! resolver.
//!
//! These verify the algebraic properties that must hold for any valid
//! inputs:
//!
//! 1. A commit is a permutation: no item appears or vanishes.
//! 2. A commit moves exactly one item: removing it from both sequences
//!    leaves identical remainders.
//! 3. A commit is invertible given the inverse indices.
//! 4. `commit(L, i, i)` leaves L untouched.
//! 5. The resolver is deterministic for fixed inputs.
//! 6. The resolver's index is always in bounds (0 for no items).
//! 7. Clamping: arbitrary indices never panic.

use proptest::prelude::*;
use sortable_core::geometry::{Point, Rect};
use sortable_engine::item::Item;
use sortable_engine::mutator::commit;
use sortable_engine::resolver::{resolve, ItemLayout};

// ── Helpers ─────────────────────────────────────────────────────────────

fn id_list(len: usize) -> Vec<Item<()>> {
    (0..len).map(|i| Item::bare(format!("id-{i}"))).collect()
}

fn ids(items: &[Item<()>]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

fn list_strategy() -> impl Strategy<Value = Vec<Item<()>>> {
    (1usize..=16).prop_map(id_list)
}

fn layout_strategy() -> impl Strategy<Value = Vec<ItemLayout>> {
    prop::collection::vec(
        (0.0f64..500.0, 0.0f64..500.0, 1.0f64..100.0, 1.0f64..100.0)
            .prop_map(|(x, y, w, h)| ItemLayout::new(Rect::new(x, y, w, h))),
        0..12,
    )
}

fn cursor_strategy() -> impl Strategy<Value = Point> {
    (-100.0f64..700.0, -100.0f64..700.0).prop_map(|(x, y)| Point::new(x, y))
}

// ── Order mutator ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn commit_is_a_permutation(items in list_strategy(), from in 0usize..16, to in 0usize..16) {
        let mut mutated = items.clone();
        commit(&mut mutated, from, to);

        let mut before = ids(&items);
        let mut after = ids(&mutated);
        before.sort();
        after.sort();
        prop_assert_eq!(before, after, "commit changed the item multiset");
    }

    #[test]
    fn commit_moves_exactly_one_item(items in list_strategy(), from in 0usize..16, to in 0usize..16) {
        let mut mutated = items.clone();
        if let Some(committed) = commit(&mut mutated, from, to) {
            let moved = mutated[committed.to].id.clone();
            prop_assert_eq!(&items[committed.from].id, &moved);

            // All other items keep their relative order.
            let rest_before: Vec<String> =
                ids(&items).into_iter().filter(|id| id != &moved).collect();
            let rest_after: Vec<String> =
                ids(&mutated).into_iter().filter(|id| id != &moved).collect();
            prop_assert_eq!(rest_before, rest_after, "a bystander item moved");
        } else {
            // Clamped no-op: nothing may have changed.
            prop_assert_eq!(ids(&mutated), ids(&items));
        }
    }

    #[test]
    fn commit_is_invertible(items in list_strategy(), from in 0usize..16, to in 0usize..16) {
        let original = ids(&items);
        let mut mutated = items;
        if let Some(committed) = commit(&mut mutated, from, to) {
            commit(&mut mutated, committed.to, committed.from);
        }
        prop_assert_eq!(ids(&mutated), original);
    }

    #[test]
    fn commit_to_self_is_identity(items in list_strategy(), index in 0usize..16) {
        let original = ids(&items);
        let mut mutated = items;
        let committed = commit(&mut mutated, index, index);
        prop_assert!(committed.is_none(), "self-move must not report a commit");
        prop_assert_eq!(ids(&mutated), original);
    }

    #[test]
    fn commit_never_panics_on_wild_indices(items in list_strategy(), from in any::<usize>(), to in any::<usize>()) {
        let mut mutated = items;
        commit(&mut mutated, from, to);
    }
}

// ── Position resolver ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn resolver_is_deterministic(cursor in cursor_strategy(), layout in layout_strategy()) {
        let first = resolve(cursor, &layout);
        for _ in 0..3 {
            prop_assert_eq!(resolve(cursor, &layout), first);
        }
    }

    #[test]
    fn resolver_index_is_in_bounds(cursor in cursor_strategy(), layout in layout_strategy()) {
        let index = resolve(cursor, &layout);
        if layout.is_empty() {
            prop_assert_eq!(index, 0, "empty snapshot must resolve to 0");
        } else {
            prop_assert!(index < layout.len());
        }
    }

    #[test]
    fn resolver_picks_a_nearest_item(cursor in cursor_strategy(), layout in layout_strategy()) {
        prop_assume!(!layout.is_empty());
        let index = resolve(cursor, &layout);
        let chosen = cursor.distance_sq(layout[index].bounds.center());
        for item in &layout {
            prop_assert!(chosen <= cursor.distance_sq(item.bounds.center()));
        }
    }

    #[test]
    fn resolver_ties_go_to_the_earlier_item(cursor in cursor_strategy(), layout in layout_strategy()) {
        prop_assume!(!layout.is_empty());
        let index = resolve(cursor, &layout);
        let chosen = cursor.distance_sq(layout[index].bounds.center());
        for item in &layout[..index] {
            prop_assert!(
                cursor.distance_sq(item.bounds.center()) > chosen,
                "an earlier equidistant item was skipped"
            );
        }
    }
}
