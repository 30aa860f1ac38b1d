//! End-to-end run against a local HTTP server.
//!
//! A mockito server plays both the search provider (XML result sets) and the
//! document host, so the real `WebSearcher` and `HttpFetcher` are exercised.

use std::sync::Arc;

use mockito::{Matcher, Server, ServerGuard};
use tempfile::TempDir;

use tuplefetch_core::{
    testing::ScriptedSource, DownloadOrchestrator, FetchConfig, HttpFetcher, RunConfig,
    SearchConfig, WebSearcher,
};

fn result_set(urls: &[String]) -> String {
    let results: String = urls
        .iter()
        .map(|u| format!("<Result><Title>t</Title><Url>{}</Url></Result>", u))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ResultSet totalResultsReturned="{}">{}</ResultSet>"#,
        urls.len(),
        results
    )
}

async fn mock_search(server: &mut ServerGuard, tuple: &str, urls: &[String]) -> mockito::Mock {
    server
        .mock("GET", "/ws")
        .match_query(Matcher::UrlEncoded("query".into(), format!("\"{}\"", tuple)))
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(result_set(urls))
        .create_async()
        .await
}

fn orchestrator(server: &ServerGuard, config: RunConfig, dir: &TempDir) -> DownloadOrchestrator {
    let searcher = WebSearcher::new(SearchConfig {
        endpoint: format!("{}/ws", server.url()),
        app_id: "WebFerret".to_string(),
        timeout_secs: 5,
    });
    let fetcher = HttpFetcher::new(&FetchConfig { timeout_secs: 5 });
    DownloadOrchestrator::new(config, Arc::new(searcher), Arc::new(fetcher), dir.path())
}

#[tokio::test]
async fn test_full_run_downloads_most_frequent_documents() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let u1 = format!("{}/docs/u1.txt", base);
    let u2 = format!("{}/docs/u2.txt", base);
    let u3 = format!("{}/docs/u3.txt", base);
    let dir_url = format!("{}/docs/", base);

    let _ruby = mock_search(&mut server, "ruby gems", &[u1.clone(), u2.clone(), dir_url]).await;
    let _foo = mock_search(&mut server, "foo bar", &[u2.clone(), u3.clone()]).await;
    let u2_doc = server
        .mock("GET", "/docs/u2.txt")
        .with_status(200)
        .with_body("shared document")
        .expect(1)
        .create_async()
        .await;
    let u1_doc = server
        .mock("GET", "/docs/u1.txt")
        .with_status(200)
        .with_body("first document")
        .expect(1)
        .create_async()
        .await;
    let u3_doc = server
        .mock("GET", "/docs/u3.txt")
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let orch = orchestrator(
        &server,
        RunConfig {
            max_documents: 2,
            max_tuple_searches: 2,
            ..Default::default()
        },
        &dir,
    );

    let report = orch
        .run(
            vec!["ruby gems".to_string(), "foo bar".to_string()],
            ScriptedSource::new(vec![0, 1]),
        )
        .await
        .unwrap();

    assert_eq!(report.searches_failed, 0);
    assert_eq!(report.urls_rejected, 1);
    assert_eq!(report.distinct_candidates, 3);
    assert_eq!(report.selected[0].url, u2);
    assert_eq!(report.selected[1].url, u1);
    assert_eq!(report.downloads_succeeded, 2);

    assert_eq!(
        std::fs::read_to_string(dir.path().join("u2.txt")).unwrap(),
        "shared document"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("u1.txt")).unwrap(),
        "first document"
    );
    assert!(!dir.path().join("u3.txt").exists());

    u2_doc.assert_async().await;
    u1_doc.assert_async().await;
    u3_doc.assert_async().await;
}

#[tokio::test]
async fn test_provider_errors_and_missing_documents_are_skipped() {
    let mut server = Server::new_async().await;
    let gone = format!("{}/docs/gone.pdf", server.url());
    let kept = format!("{}/docs/kept.pdf", server.url());

    let _ok = mock_search(&mut server, "good tuple", &[gone.clone(), kept.clone()]).await;
    let _broken = server
        .mock("GET", "/ws")
        .match_query(Matcher::UrlEncoded("query".into(), "\"broken tuple\"".into()))
        .with_status(500)
        .create_async()
        .await;
    let _gone = server
        .mock("GET", "/docs/gone.pdf")
        .with_status(404)
        .create_async()
        .await;
    let _kept = server
        .mock("GET", "/docs/kept.pdf")
        .with_status(200)
        .with_body(vec![0x25, 0x50, 0x44, 0x46])
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let orch = orchestrator(
        &server,
        RunConfig {
            max_tuple_searches: 4,
            download_concurrency: 2,
            ..Default::default()
        },
        &dir,
    );

    let report = orch
        .run(
            vec!["good tuple".to_string(), "broken tuple".to_string()],
            ScriptedSource::new(vec![0, 1]),
        )
        .await
        .unwrap();

    assert_eq!(report.searches_issued, 4);
    assert_eq!(report.searches_failed, 2);
    assert_eq!(report.downloads_attempted, 2);
    assert_eq!(report.downloads_failed, 1);
    assert_eq!(
        std::fs::read(dir.path().join("kept.pdf")).unwrap(),
        vec![0x25, 0x50, 0x44, 0x46]
    );
    assert!(!dir.path().join("gone.pdf").exists());
}
