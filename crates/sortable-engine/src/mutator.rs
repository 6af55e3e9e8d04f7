#![forbid(unsafe_code)]

//! Order mutation.
//!
//! [`commit`] is the only code path that rewrites the authoritative item
//! order. It performs a minimal-span move: the item leaves `from`,
//! lands at `to`, and nothing else changes relative order. The
//! remove/insert pair happens under one `&mut` borrow, so the
//! intermediate state with the item absent is never observable.

use crate::item::Item;

/// Indices of a committed move, after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedMove {
    /// Index the item was removed from.
    pub from: usize,
    /// Index the item was inserted at.
    pub to: usize,
}

/// Move the item at `from` to `to`.
///
/// Out-of-bounds indices are clamped to the nearest valid index rather
/// than rejected; mid-drag item-list mutation by the host can make a
/// resolved index stale, and a clamped move is the defensive outcome.
/// Returns `None` when the list is empty or the clamped move is a no-op.
pub fn commit<T>(items: &mut Vec<Item<T>>, from: usize, to: usize) -> Option<CommittedMove> {
    if items.is_empty() {
        return None;
    }
    let last = items.len() - 1;
    let from = from.min(last);
    let to = to.min(last);
    if from == to {
        return None;
    }
    let item = items.remove(from);
    items.insert(to, item);
    Some(CommittedMove { from, to })
}
