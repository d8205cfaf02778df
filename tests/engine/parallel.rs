//! Parallel execution: observable equivalence with the sequential mode.

use talpa::{DocumentFilter, DocumentStatus, ExecutionPolicy, SearchServer};

use crate::common::{result_ids, sample_server, SAMPLE_QUERY};

/// Relevance tolerance between execution modes: accumulation order may
/// differ in the last ulp, nothing more.
const MODE_TOLERANCE: f64 = 1e-9;

fn assert_same_results(server: &SearchServer, raw_query: &str, filter: DocumentFilter<'_>) {
    let sequential = server
        .find_top_documents_with(ExecutionPolicy::Sequential, raw_query, filter)
        .unwrap();
    let parallel = server
        .find_top_documents_with(ExecutionPolicy::Parallel, raw_query, filter)
        .unwrap();

    assert_eq!(result_ids(&sequential), result_ids(&parallel), "query {raw_query:?}");
    for (seq_doc, par_doc) in sequential.iter().zip(&parallel) {
        assert_eq!(seq_doc.rating, par_doc.rating);
        assert!((seq_doc.relevance - par_doc.relevance).abs() < MODE_TOLERANCE);
    }
}

#[test]
fn find_top_documents_modes_agree() {
    let server = sample_server();
    assert_same_results(&server, SAMPLE_QUERY, DocumentFilter::default());
    assert_same_results(&server, "kot -hvost", DocumentFilter::default());
    assert_same_results(
        &server,
        SAMPLE_QUERY,
        DocumentFilter::ByStatus(DocumentStatus::Banned),
    );
}

#[test]
fn find_top_documents_modes_agree_under_predicates() {
    let server = sample_server();
    let even = |id: i32, _: DocumentStatus, _: i32| id % 2 == 0;
    assert_same_results(&server, SAMPLE_QUERY, DocumentFilter::ByPredicate(&even));
}

#[test]
fn match_document_modes_agree() {
    let server = sample_server();
    for document_id in &server {
        let sequential = server.match_document(SAMPLE_QUERY, document_id).unwrap();
        let parallel = server
            .match_document_with(ExecutionPolicy::Parallel, SAMPLE_QUERY, document_id)
            .unwrap();
        assert_eq!(sequential, parallel, "document {document_id}");
    }
}

#[test]
fn remove_document_modes_agree() {
    let mut sequential_server = sample_server();
    let mut parallel_server = sample_server();

    sequential_server.remove_document(1);
    parallel_server.remove_document_with(ExecutionPolicy::Parallel, 1);

    assert_eq!(
        sequential_server.document_ids().collect::<Vec<i32>>(),
        parallel_server.document_ids().collect::<Vec<i32>>()
    );
    assert_eq!(
        sequential_server.find_top_documents(SAMPLE_QUERY).unwrap(),
        parallel_server.find_top_documents(SAMPLE_QUERY).unwrap()
    );
    assert!(parallel_server.well_formed());
}

#[test]
fn concurrent_readers_share_one_server() {
    let server = sample_server();

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..4 {
            handles.push(scope.spawn(|| {
                server
                    .find_top_documents_with(
                        ExecutionPolicy::Parallel,
                        SAMPLE_QUERY,
                        DocumentFilter::default(),
                    )
                    .unwrap()
            }));
        }
        let baseline = server.find_top_documents(SAMPLE_QUERY).unwrap();
        for handle in handles {
            let results = handle.join().expect("reader thread panicked");
            assert_eq!(result_ids(&results), result_ids(&baseline));
        }
    });
}

#[test]
fn wide_query_exercises_many_shards() {
    let mut server = SearchServer::from_text("").unwrap();
    for id in 0..200 {
        let text = format!("word{} shared kot{}", id % 17, id % 3);
        server
            .add_document(id, &text, DocumentStatus::Actual, &[id % 10])
            .unwrap();
    }
    let query: String = (0..17).map(|n| format!("word{n} ")).collect::<String>() + "shared";
    assert_same_results(&server, &query, DocumentFilter::default());
}
