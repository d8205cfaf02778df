//! Pagination, request statistics, and batch queries around the engine.

use talpa::{paginate, process_queries, process_queries_joined, DocumentStatus, RequestQueue, SearchServer};

use crate::common::result_ids;

fn pagination_corpus() -> SearchServer {
    let mut server = SearchServer::from_text("i v na").unwrap();
    let docs: [(i32, &str, &[i32]); 5] = [
        (0, "beliy kot i modniy osheynik", &[8, -3]),
        (1, "pushistiy kot pushistiy hvost", &[7, 2, 7]),
        (2, "uhozhenniy pes vyrazitelnye glaza", &[5, -12, 2, 1]),
        (3, "uhozhenniy skvorets evgeniy", &[9]),
        (4, "los valera", &[1, 2, 5]),
    ];
    for (id, text, ratings) in docs {
        server
            .add_document(id, text, DocumentStatus::Actual, ratings)
            .unwrap();
    }
    server
}

#[test]
fn search_results_split_into_pages() {
    let server = pagination_corpus();
    let results = server.find_top_documents("uhozhenniy kot valera").unwrap();
    assert_eq!(results.len(), 5);

    let pages: Vec<_> = paginate(&results, 2).unwrap().collect();
    assert_eq!(pages.len(), 3, "five results at two per page");
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[1].len(), 2);
    assert_eq!(pages[2].len(), 1);

    // Pages cover the result list in order without copying.
    let flattened: Vec<i32> = pages.iter().flat_map(|page| result_ids(page)).collect();
    assert_eq!(flattened, result_ids(&results));
}

#[test]
fn request_queue_returns_what_the_server_found() {
    let server = pagination_corpus();
    let mut queue = RequestQueue::new(&server);

    let through_queue = queue.add_find_request("uhozhenniy kot").unwrap();
    let direct = server.find_top_documents("uhozhenniy kot").unwrap();
    assert_eq!(through_queue, direct);
    assert_eq!(queue.no_result_requests(), 0);

    queue.add_find_request("missing word").unwrap();
    assert_eq!(queue.no_result_requests(), 1);
}

#[test]
fn batch_queries_match_individual_searches() {
    let server = pagination_corpus();
    let queries = vec![
        "uhozhenniy kot".to_string(),
        "valera".to_string(),
        "missing word".to_string(),
    ];

    let batch = process_queries(&server, &queries).unwrap();
    for (query, batch_result) in queries.iter().zip(&batch) {
        assert_eq!(batch_result, &server.find_top_documents(query).unwrap());
    }

    let joined = process_queries_joined(&server, &queries).unwrap();
    let expected: Vec<i32> = batch.iter().flat_map(|results| result_ids(results)).collect();
    assert_eq!(result_ids(&joined), expected);
}
