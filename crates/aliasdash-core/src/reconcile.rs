//! Paginated list reconciliation
//!
//! The displayed alias list is the concatenation of every page fetched so far.
//! [`merge_pages`] folds a freshly fetched page into it and [`reposition`]
//! moves a single record after a pin state change. Both are pure.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::types::{AliasId, AliasRecord};

/// Records with a stable identity key.
pub trait Identified {
    /// Identity key type
    type Id: Eq + Hash + Clone;

    /// Identity key of this record.
    fn id(&self) -> &Self::Id;
}

impl Identified for AliasRecord {
    type Id = AliasId;

    fn id(&self) -> &AliasId {
        &self.id
    }
}

/// Merge `incoming` into `current`.
///
/// - entries of `current` keep their relative order;
/// - an entry whose id also appears in `incoming` is replaced by the incoming
///   version (last write wins);
/// - entries only in `incoming` are appended after all of `current`, in
///   `incoming` order.
///
/// Runs in `O(|current| + |incoming|)`. If `incoming` itself repeats an id,
/// its last occurrence is the one kept.
pub fn merge_pages<T: Identified>(current: Vec<T>, incoming: Vec<T>) -> Vec<T> {
    // last position of every incoming id
    let positions: HashMap<T::Id, usize> = incoming
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.id().clone(), pos))
        .collect();
    let mut slots: Vec<Option<T>> = incoming.into_iter().map(Some).collect();

    let mut emitted: HashSet<T::Id> = HashSet::with_capacity(current.len() + slots.len());
    let mut merged = Vec::with_capacity(current.len() + slots.len());

    for item in current {
        let id = item.id().clone();
        let replacement = positions.get(&id).and_then(|&pos| slots[pos].take());
        merged.push(replacement.unwrap_or(item));
        emitted.insert(id);
    }

    for (pos, slot) in slots.into_iter().enumerate() {
        let Some(item) = slot else { continue };
        let id = item.id().clone();
        if positions.get(&id) == Some(&pos) && emitted.insert(id) {
            merged.push(item);
        }
    }

    merged
}

/// Where a repositioned record goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Head of the list (pinned)
    Head,
    /// Tail of the list (unpinned)
    Tail,
}

impl Placement {
    /// Placement for a record whose pinned flag is now `pinned`.
    pub fn for_pinned(pinned: bool) -> Self {
        if pinned {
            Self::Head
        } else {
            Self::Tail
        }
    }
}

/// Move the record identified by `id` to the head or tail of `list`.
///
/// Returns `false` (and leaves `list` untouched) when no record has that id.
pub fn reposition<T: Identified>(list: &mut Vec<T>, id: &T::Id, placement: Placement) -> bool {
    let Some(index) = list.iter().position(|item| item.id() == id) else {
        return false;
    };
    let item = list.remove(index);
    match placement {
        Placement::Head => list.insert(0, item),
        Placement::Tail => list.push(item),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32, &'static str);

    impl Identified for Row {
        type Id = u32;
        fn id(&self) -> &u32 {
            &self.0
        }
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_next_page_is_appended() {
        let merged = merge_pages(
            vec![Row(1, "a"), Row(2, "b"), Row(3, "c")],
            vec![Row(4, "d"), Row(5, "e")],
        );
        assert_eq!(ids(&merged), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_conflict_keeps_incoming_version_in_place() {
        let merged = merge_pages(
            vec![Row(1, "a"), Row(2, "old"), Row(3, "c")],
            vec![Row(4, "d"), Row(2, "new")],
        );
        assert_eq!(
            merged,
            vec![Row(1, "a"), Row(2, "new"), Row(3, "c"), Row(4, "d")]
        );
    }

    #[test]
    fn test_empty_sides() {
        let a = vec![Row(1, "a"), Row(2, "b")];
        assert_eq!(merge_pages(a.clone(), Vec::new()), a);
        assert_eq!(merge_pages(Vec::new(), a.clone()), a);
    }

    #[test]
    fn test_repeated_incoming_id_keeps_last() {
        let merged = merge_pages(vec![Row(1, "a")], vec![Row(2, "x"), Row(3, "c"), Row(2, "y")]);
        assert_eq!(merged, vec![Row(1, "a"), Row(3, "c"), Row(2, "y")]);
    }

    #[test]
    fn test_pin_moves_to_head() {
        let mut list = vec![Row(1, "a"), Row(2, "b"), Row(3, "c")];
        assert!(reposition(&mut list, &2, Placement::for_pinned(true)));
        assert_eq!(ids(&list), vec![2, 1, 3]);
    }

    #[test]
    fn test_unpin_moves_to_tail() {
        let mut list = vec![Row(1, "a"), Row(2, "b"), Row(3, "c")];
        assert!(reposition(&mut list, &1, Placement::for_pinned(false)));
        assert_eq!(ids(&list), vec![2, 3, 1]);
    }

    #[test]
    fn test_reposition_unknown_id_is_noop() {
        let mut list = vec![Row(1, "a")];
        assert!(!reposition(&mut list, &9, Placement::Head));
        assert_eq!(ids(&list), vec![1]);
    }
}
