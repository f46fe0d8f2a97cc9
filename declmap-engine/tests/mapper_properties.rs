//! Property-based tests for reconciliation correctness.
//!
//! Random sequences of passes are run through a mapper and the recorded
//! mapping calls are checked against the per-id lifecycle:
//! - absent → live via create, live → live via update or retype, live → absent via destroy
//! - the committed registry equals the last occurrence of each input id
//! - ids dropped from the input are destroyed exactly once
//! - unchanged declarations keep their instance
//! - a retyped id is destroyed before it is re-created

mod common;

use common::{item, mapper, Call, Instance, Item, Journal};
use proptest::prelude::*;
use std::collections::HashMap;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn pass_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0u32..8, any::<bool>(), 0i64..3), 0..10).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, b, value)| item(id, if b { "b" } else { "a" }, value))
            .collect()
    })
}

fn passes_strategy() -> impl Strategy<Value = Vec<Vec<Item>>> {
    prop::collection::vec(pass_strategy(), 1..6)
}

/// The surviving declaration per id: the last occurrence in the pass.
fn expected(pass: &[Item]) -> HashMap<u32, Item> {
    pass.iter().map(|dec| (dec.id, dec.clone())).collect()
}

proptest! {
    #[test]
    fn calls_follow_identity_lifecycle(passes in passes_strategy()) {
        let mut mapper = mapper();
        let mut journal = Journal::new();
        for pass in &passes {
            mapper.reconcile(&mut journal, pass.clone()).unwrap();
        }
        mapper.clear(&mut journal).unwrap();

        let mut live: HashMap<u32, &'static str> = HashMap::new();
        for call in &journal.calls {
            match *call {
                Call::Create { id, kind, .. } => prop_assert!(live.insert(id, kind).is_none()),
                Call::Update { id, kind, .. } => prop_assert_eq!(live.get(&id), Some(&kind)),
                Call::Destroy { id, kind, .. } => prop_assert_eq!(live.remove(&id), Some(kind)),
            }
        }
        prop_assert!(live.is_empty());
        prop_assert!(mapper.is_empty());
    }

    #[test]
    fn registry_matches_last_occurrence(passes in passes_strategy()) {
        let mut mapper = mapper();
        let mut journal = Journal::new();
        for pass in &passes {
            let report = mapper.reconcile(&mut journal, pass.clone()).unwrap();
            let want = expected(pass);

            prop_assert_eq!(mapper.len(), want.len());
            prop_assert_eq!(report.live, want.len());
            for (id, dec) in &want {
                prop_assert_eq!(mapper.declaration(id), Some(dec));
                let instance = mapper.mapped::<Instance>(id).unwrap();
                prop_assert_eq!(instance.value, dec.value);
            }
        }
    }

    #[test]
    fn dropped_and_retyped_ids_are_destroyed_once(passes in passes_strategy()) {
        let mut mapper = mapper();
        let mut journal = Journal::new();
        let mut prev: HashMap<u32, Item> = HashMap::new();

        for pass in &passes {
            journal.take();
            mapper.reconcile(&mut journal, pass.clone()).unwrap();
            let next = expected(pass);

            let mut want: Vec<u32> = prev
                .iter()
                .filter(|(id, dec)| next.get(*id).is_none_or(|new| new.kind != dec.kind))
                .map(|(id, _)| *id)
                .collect();
            want.sort_unstable();

            let mut destroyed: Vec<u32> = journal
                .calls
                .iter()
                .filter(|call| call.is_destroy())
                .map(Call::id)
                .collect();
            destroyed.sort_unstable();

            prop_assert_eq!(destroyed, want);
            prev = next;
        }
    }

    #[test]
    fn unchanged_declarations_keep_their_instance(passes in passes_strategy()) {
        let mut mapper = mapper();
        let mut journal = Journal::new();
        let mut prev: HashMap<u32, (Item, u64)> = HashMap::new();

        for pass in &passes {
            mapper.reconcile(&mut journal, pass.clone()).unwrap();
            let next = expected(pass);

            for (id, dec) in &next {
                let serial = mapper.mapped::<Instance>(id).unwrap().serial;
                if let Some((old, old_serial)) = prev.get(id) {
                    if old == dec {
                        prop_assert_eq!(serial, *old_serial);
                    }
                }
            }

            prev = next
                .into_iter()
                .map(|(id, dec)| {
                    let serial = mapper.mapped::<Instance>(&id).unwrap().serial;
                    (id, (dec, serial))
                })
                .collect();
        }
    }

    #[test]
    fn retype_destroys_before_creating(passes in passes_strategy()) {
        let mut mapper = mapper();
        let mut journal = Journal::new();

        for pass in &passes {
            journal.take();
            mapper.reconcile(&mut journal, pass.clone()).unwrap();

            for (index, call) in journal.calls.iter().enumerate() {
                if let Call::Create { id, .. } = *call {
                    let later_destroy = journal.calls[index..]
                        .iter()
                        .any(|c| c.is_destroy() && c.id() == id);
                    prop_assert!(!later_destroy, "id {} destroyed after its create", id);
                }
            }
        }
    }
}
