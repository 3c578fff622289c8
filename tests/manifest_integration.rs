//! Integration tests for manifest fetch and decode against a mock server.

use sample_fetcher_core::{ManifestError, ManifestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MANIFEST: &str = r#"{
    "malware": [
        {
            "name": "EvilCorp Trojan",
            "type": "trojan",
            "virusTotal": "https://www.virustotal.com/gui/file/abc",
            "moreInfo": "https://example.com/blog/evilcorp",
            "download": "https://example.com/samples/EvilCorp.zip"
        },
        {
            "name": "Quiet",
            "virusTotal": "",
            "moreInfo": "",
            "download": "https://example.com/samples/Quiet.zip"
        }
    ]
}"#;

async fn serve_manifest(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/malware.json"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_fetch_decodes_manifest_in_order() {
    let mock_server = serve_manifest(200, MANIFEST).await;
    let fetcher = ManifestFetcher::new().expect("client builds");

    let manifest = fetcher
        .fetch(&format!("{}/malware.json", mock_server.uri()))
        .await
        .expect("manifest should decode");

    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest.malware[0].name, "EvilCorp Trojan");
    assert_eq!(manifest.malware[0].kind.as_deref(), Some("trojan"));
    assert_eq!(manifest.malware[1].name, "Quiet");
    assert!(manifest.malware[1].kind.is_none());
}

#[tokio::test]
async fn test_fetch_bytes_returns_raw_body() {
    let mock_server = serve_manifest(200, MANIFEST).await;
    let fetcher = ManifestFetcher::new().expect("client builds");

    let body = fetcher
        .fetch_bytes(&format!("{}/malware.json", mock_server.uri()))
        .await
        .expect("body should be returned");

    assert_eq!(body, MANIFEST.as_bytes());
}

#[tokio::test]
async fn test_non_success_status_body_is_passed_through() {
    let mock_server = serve_manifest(503, MANIFEST).await;
    let fetcher = ManifestFetcher::new().expect("client builds");

    let manifest = fetcher
        .fetch(&format!("{}/malware.json", mock_server.uri()))
        .await
        .expect("status is not inspected, body still decodes");
    assert_eq!(manifest.len(), 2);
}

#[tokio::test]
async fn test_error_page_fails_to_decode() {
    let mock_server = serve_manifest(500, "<html>Internal Server Error</html>").await;
    let fetcher = ManifestFetcher::new().expect("client builds");

    let err = fetcher
        .fetch(&format!("{}/malware.json", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(err.is_decode(), "expected decode error, got {err:?}");
}

#[tokio::test]
async fn test_wrong_shape_fails_to_decode() {
    let mock_server = serve_manifest(200, r#"{"malware": "none"}"#).await;
    let fetcher = ManifestFetcher::new().expect("client builds");

    let result = fetcher
        .fetch(&format!("{}/malware.json", mock_server.uri()))
        .await;
    assert!(matches!(result, Err(ManifestError::Decode { .. })));
}

#[tokio::test]
async fn test_unreachable_manifest_is_network_error() {
    let fetcher = ManifestFetcher::new().expect("client builds");
    let result = fetcher.fetch("http://127.0.0.1:1/malware.json").await;
    assert!(
        matches!(result, Err(ManifestError::Network { .. })),
        "expected network error, got {result:?}"
    );
}
