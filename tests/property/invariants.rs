//! Index invariants under random add/remove interleavings.
//!
//! Whatever sequence of adds and removes runs, the four internal views must
//! stay consistent: id sets line up, the two frequency maps mirror each
//! other, no posting entry is left empty, and per-document frequencies sum
//! to one.

use proptest::prelude::*;
use talpa::{DocumentStatus, SearchServer};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Small word alphabet so documents collide on terms often.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "kot", "pes", "hvost", "usy", "lapy", "glaza", "osheynik", "valera",
    ])
    .prop_map(str::to_string)
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 0..6).prop_map(|words| words.join(" "))
}

#[derive(Debug, Clone)]
enum Op {
    Add { id: i32, text: String, ratings: Vec<i32> },
    Remove { id: i32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0i32..20, document_strategy(), prop::collection::vec(-10i32..10, 0..4))
            .prop_map(|(id, text, ratings)| Op::Add { id, text, ratings }),
        1 => (0i32..20).prop_map(|id| Op::Remove { id }),
    ]
}

fn apply(server: &mut SearchServer, op: &Op) {
    match op {
        Op::Add { id, text, ratings } => {
            // Re-adding a taken id is a legitimate refusal, not a failure.
            let _ = server.add_document(*id, text, DocumentStatus::Actual, ratings);
        }
        Op::Remove { id } => server.remove_document(*id),
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: the index is well-formed after every operation.
    #[test]
    fn prop_well_formed_after_every_op(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut server = SearchServer::from_text("i v na").unwrap();
        for op in &ops {
            apply(&mut server, op);
            prop_assert!(server.well_formed(), "index ill-formed after {op:?}");
        }
    }

    /// Property: document count equals the number of distinct live ids.
    #[test]
    fn prop_count_matches_id_iteration(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut server = SearchServer::from_text("").unwrap();
        for op in &ops {
            apply(&mut server, op);
        }
        let ids: Vec<i32> = server.document_ids().collect();
        prop_assert_eq!(ids.len(), server.document_count());
        prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]), "ids not strictly ascending");
    }

    /// Property: removing twice is the same as removing once.
    #[test]
    fn prop_remove_is_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..20),
        victim in 0i32..20,
    ) {
        let mut once = SearchServer::from_text("").unwrap();
        for op in &ops {
            apply(&mut once, op);
        }
        let mut twice = SearchServer::from_text("").unwrap();
        for op in &ops {
            apply(&mut twice, op);
        }

        once.remove_document(victim);
        twice.remove_document(victim);
        twice.remove_document(victim);

        prop_assert_eq!(
            once.document_ids().collect::<Vec<i32>>(),
            twice.document_ids().collect::<Vec<i32>>()
        );
        prop_assert_eq!(once.word_frequencies(victim).len(), 0);
        prop_assert!(twice.well_formed());
    }

    /// Property: a removed document never resurfaces in results.
    #[test]
    fn prop_removed_docs_stay_gone(
        ops in prop::collection::vec(op_strategy(), 1..25),
        victim in 0i32..20,
        query in document_strategy(),
    ) {
        let mut server = SearchServer::from_text("").unwrap();
        for op in &ops {
            apply(&mut server, op);
        }
        server.remove_document(victim);

        if !query.is_empty() {
            let results = server.find_top_documents(&query).unwrap();
            prop_assert!(results.iter().all(|doc| doc.id != victim));
        }
        prop_assert!(server.document_ids().all(|id| id != victim));
    }
}
