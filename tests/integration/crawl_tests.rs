//! End-to-end crawl behavior against the scripted page capability

use crate::support::{test_config, CollectingSink, FailingSink, FakePage, ScriptedResponse};
use shigoto::scrape::{run_crawl, SearchQuery};
use shigoto::site::listing_url;
use shigoto::ShigotoError;
use tokio_util::sync::CancellationToken;

fn react_query() -> SearchQuery {
    SearchQuery::new("React", "")
}

#[tokio::test]
async fn pagination_stops_at_the_first_empty_page() {
    let page = FakePage::new();
    let query = react_query();
    page.script(
        &listing_url(&query, 0),
        vec![ScriptedResponse::listing(&[
            "https://example.com/jobs/view/1",
            "https://example.com/jobs/view/2",
            "https://example.com/jobs/view/3",
        ])],
    );
    page.script(
        &listing_url(&query, 1),
        vec![ScriptedResponse::listing(&[
            "https://example.com/jobs/view/4",
            "https://example.com/jobs/view/5",
        ])],
    );
    page.script(&listing_url(&query, 2), vec![ScriptedResponse::empty()]);

    let config = test_config(&["React"]);
    let mut sink = CollectingSink::new();
    let report = run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    // Three fetches, but only the two non-empty pages are emitted.
    assert_eq!(sink.pages.len(), 2);
    assert_eq!(sink.pages[0].page_index, 0);
    assert_eq!(sink.pages[0].records.len(), 3);
    assert_eq!(sink.pages[1].page_index, 1);
    assert_eq!(sink.pages[1].records.len(), 2);
    assert_eq!(page.navigation_count(&listing_url(&query, 2)), 1);

    assert_eq!(report.pages_emitted, 2);
    assert_eq!(report.records_emitted, 5);
    assert_eq!(report.queries_failed, 0);
    assert!(!report.cancelled);
}

#[tokio::test]
async fn soft_wall_is_retried_until_the_listing_appears() {
    let page = FakePage::new();
    let query = react_query();
    page.script(
        &listing_url(&query, 0),
        vec![
            ScriptedResponse::soft_wall(),
            ScriptedResponse::listing(&["https://example.com/jobs/view/1"]),
        ],
    );
    page.script(&listing_url(&query, 1), vec![ScriptedResponse::empty()]);

    let config = test_config(&["React"]);
    let mut sink = CollectingSink::new();
    let report = run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(sink.pages.len(), 1);
    assert_eq!(page.navigation_count(&listing_url(&query, 0)), 2);
    assert_eq!(report.queries_failed, 0);
}

#[tokio::test]
async fn rate_limit_exhaustion_fails_the_query_without_emitting() {
    let page = FakePage::new();
    let query = react_query();
    page.script(&listing_url(&query, 0), vec![ScriptedResponse::rate_limited()]);

    let config = test_config(&["React"]);
    let mut sink = CollectingSink::new();
    let report = run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    // Initial attempt plus the two retries allowed by the policy.
    assert_eq!(page.navigation_count(&listing_url(&query, 0)), 3);
    assert!(sink.pages.is_empty());
    assert_eq!(report.queries_failed, 1);
    assert_eq!(report.queries_processed, 1);
}

#[tokio::test]
async fn a_fatally_failing_query_does_not_stop_the_next_one() {
    let page = FakePage::new();
    let react = SearchQuery::new("React", "");
    let python = SearchQuery::new("Python", "");
    page.script(&listing_url(&react, 0), vec![ScriptedResponse::broken()]);
    page.script(
        &listing_url(&python, 0),
        vec![ScriptedResponse::listing(&["https://example.com/jobs/view/9"])],
    );
    page.script(&listing_url(&python, 1), vec![ScriptedResponse::empty()]);

    let config = test_config(&["React", "Python"]);
    let mut sink = CollectingSink::new();
    let report = run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.queries_processed, 2);
    assert_eq!(report.queries_failed, 1);
    assert_eq!(sink.pages.len(), 1);
    assert_eq!(sink.pages[0].query, python);
}

#[tokio::test]
async fn selector_timeout_without_a_wall_is_a_clean_end_of_results() {
    // Nothing scripted: every page serves no cards and a normal location.
    let page = FakePage::new();
    let config = test_config(&["React"]);
    let mut sink = CollectingSink::new();
    let report = run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    assert!(sink.pages.is_empty());
    assert_eq!(report.queries_failed, 0);
    assert_eq!(page.navigation_count(&listing_url(&react_query(), 0)), 1);
}

#[tokio::test]
async fn queries_run_in_search_space_order() {
    let page = FakePage::new();
    let react = SearchQuery::new("React", "");
    let python = SearchQuery::new("Python", "");
    for query in [&react, &python] {
        page.script(
            &listing_url(query, 0),
            vec![ScriptedResponse::listing(&["https://example.com/jobs/view/1"])],
        );
        page.script(&listing_url(query, 1), vec![ScriptedResponse::empty()]);
    }

    let config = test_config(&["React", "Python"]);
    let mut sink = CollectingSink::new();
    run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(sink.pages.len(), 2);
    assert_eq!(sink.pages[0].query, react);
    assert_eq!(sink.pages[1].query, python);
}

#[tokio::test]
async fn descriptions_are_fetched_when_enabled() {
    let page = FakePage::new();
    let query = react_query();
    let posting = "https://example.com/jobs/view/42";
    page.script(
        &listing_url(&query, 0),
        vec![ScriptedResponse::listing(&[posting])],
    );
    page.script(&listing_url(&query, 1), vec![ScriptedResponse::empty()]);
    page.script(posting, vec![ScriptedResponse::detail("Great <b>job</b>")]);

    let mut config = test_config(&["React"]);
    config.crawler.fetch_descriptions = true;

    let mut sink = CollectingSink::new();
    run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(sink.pages.len(), 1);
    assert_eq!(sink.pages[0].records[0].description, "Great <b>job</b>");
}

#[tokio::test]
async fn description_failures_leave_the_record_with_an_empty_description() {
    let page = FakePage::new();
    let query = react_query();
    let posting = "https://example.com/jobs/view/42";
    page.script(
        &listing_url(&query, 0),
        vec![ScriptedResponse::listing(&[posting])],
    );
    page.script(&listing_url(&query, 1), vec![ScriptedResponse::empty()]);
    page.script(posting, vec![ScriptedResponse::rate_limited()]);

    let mut config = test_config(&["React"]);
    config.crawler.fetch_descriptions = true;

    let mut sink = CollectingSink::new();
    let report = run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    // The record still flows to the sink; only its description stays empty.
    assert_eq!(sink.pages.len(), 1);
    assert_eq!(sink.pages[0].records[0].description, "");
    assert_eq!(report.queries_failed, 0);
}

#[tokio::test]
async fn sink_failures_are_surfaced_but_do_not_stop_the_crawl() {
    let page = FakePage::new();
    let query = react_query();
    page.script(
        &listing_url(&query, 0),
        vec![ScriptedResponse::listing(&["https://example.com/jobs/view/1"])],
    );
    page.script(&listing_url(&query, 1), vec![ScriptedResponse::empty()]);

    let config = test_config(&["React"]);
    let mut sink = FailingSink;
    let report = run_crawl(&page, &config, &mut sink, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.sink_failures, 1);
    assert_eq!(report.pages_emitted, 0);
    assert_eq!(report.records_emitted, 1);
    // Pagination still advanced past the failed emission.
    assert_eq!(page.navigation_count(&listing_url(&query, 1)), 1);
}

#[tokio::test]
async fn cancellation_stops_before_the_next_query() {
    let page = FakePage::new();
    let config = test_config(&["React"]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut sink = CollectingSink::new();
    let report = run_crawl(&page, &config, &mut sink, cancel).await.unwrap();

    assert!(report.cancelled);
    assert_eq!(report.queries_processed, 0);
    assert!(sink.pages.is_empty());
    assert!(page.navigations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn an_unusable_page_capability_aborts_the_run() {
    let page = FakePage::with_failing_headers();
    let config = test_config(&["React"]);
    let mut sink = CollectingSink::new();

    let result = run_crawl(&page, &config, &mut sink, CancellationToken::new()).await;
    assert!(matches!(result, Err(ShigotoError::Infrastructure(_))));
}
