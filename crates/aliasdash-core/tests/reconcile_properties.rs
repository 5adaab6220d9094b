//! Property tests for paginated list reconciliation

use aliasdash_core::{merge_pages, AliasRecord, Identified};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

/// Page of aliases with unique ids drawn from `0..64`, tagged with `origin`
/// in the note so tests can tell which side a record came from.
fn page(origin: &'static str) -> impl Strategy<Value = Vec<AliasRecord>> {
    proptest::collection::btree_set(0u64..64, 0..24).prop_flat_map(move |ids: BTreeSet<u64>| {
        let ids: Vec<u64> = ids.into_iter().collect();
        Just(ids).prop_shuffle().prop_map(move |ids| {
            ids.into_iter()
                .map(|id| {
                    let mut alias = AliasRecord::new(id, format!("{origin}{id}@example.com"));
                    alias.note = Some(origin.to_string());
                    alias
                })
                .collect()
        })
    })
}

fn ids(list: &[AliasRecord]) -> Vec<u64> {
    list.iter().map(|a| a.id().0).collect()
}

proptest! {
    #[test]
    fn merged_length_is_union_size(a in page("a"), b in page("b")) {
        let union: HashSet<u64> = ids(&a).into_iter().chain(ids(&b)).collect();
        let merged = merge_pages(a, b);
        prop_assert_eq!(merged.len(), union.len());

        let unique: HashSet<u64> = ids(&merged).into_iter().collect();
        prop_assert_eq!(unique.len(), merged.len());
    }

    #[test]
    fn current_order_is_preserved_then_incoming_only_appended(a in page("a"), b in page("b")) {
        let a_ids = ids(&a);
        let a_set: HashSet<u64> = a_ids.iter().copied().collect();
        let b_only: Vec<u64> = ids(&b).into_iter().filter(|id| !a_set.contains(id)).collect();

        let merged = merge_pages(a, b);
        let merged_ids = ids(&merged);

        prop_assert_eq!(&merged_ids[..a_ids.len()], &a_ids[..]);
        prop_assert_eq!(&merged_ids[a_ids.len()..], &b_only[..]);
    }

    #[test]
    fn conflicts_take_the_incoming_version(a in page("a"), b in page("b")) {
        let b_set: HashSet<u64> = ids(&b).into_iter().collect();
        let merged = merge_pages(a, b);
        for alias in &merged {
            let expected = if b_set.contains(&alias.id.0) { "b" } else { "a" };
            prop_assert_eq!(alias.note.as_deref(), Some(expected));
        }
    }

    #[test]
    fn empty_sides_are_identity(a in page("a")) {
        prop_assert_eq!(merge_pages(a.clone(), Vec::new()), a.clone());
        prop_assert_eq!(merge_pages(Vec::new(), a.clone()), a);
    }
}

#[test]
fn load_more_scenario() {
    let page0: Vec<AliasRecord> = ["a", "b", "c"]
        .iter()
        .enumerate()
        .map(|(i, n)| AliasRecord::new(i as u64, format!("{n}@example.com")))
        .collect();
    let page1: Vec<AliasRecord> = ["d", "e"]
        .iter()
        .enumerate()
        .map(|(i, n)| AliasRecord::new(3 + i as u64, format!("{n}@example.com")))
        .collect();

    let displayed = merge_pages(page0, page1);
    let emails: Vec<&str> = displayed.iter().map(|a| a.email.as_str()).collect();
    assert_eq!(
        emails,
        vec![
            "a@example.com",
            "b@example.com",
            "c@example.com",
            "d@example.com",
            "e@example.com"
        ]
    );
}
