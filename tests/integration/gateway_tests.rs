//! Gateway integration tests

#[cfg(test)]
mod tests {
    use crate::common::{dataforseo_envelope, gateway_config};
    use serde_json::json;
    use serpgate::core::cache_manager::MemoryPersistentCache;
    use serpgate::core::rate_limiter::services;
    use serpgate::services::endpoints;
    use serpgate::{Gateway, GatewayConfig};
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_backlinks(server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/v3/{}", endpoints::BACKLINK_SUMMARY)))
            .respond_with(ResponseTemplate::new(200).set_body_json(dataforseo_envelope(json!([{
                "target": "example.com", "backlinks": 10, "referring_domains": 4
            }]))))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_reset_clears_cache_and_windows() {
        let server = MockServer::start().await;
        mount_backlinks(&server, 2).await;

        let gateway = Gateway::new(gateway_config(&server)).unwrap();
        let seo = gateway.seo().unwrap();

        seo.backlink_summary("example.com").await.unwrap();
        seo.backlink_summary("example.com").await.unwrap();
        assert_eq!(gateway.cache_stats().hits, 1);

        gateway.reset().unwrap();
        assert!(gateway.cache().is_empty());
        let status = gateway.limiter().status(services::DATAFORSEO).unwrap();
        assert_eq!(status.requests_in_window, 0);

        // Served from the network again after the reset
        seo.backlink_summary("example.com").await.unwrap();
        assert_eq!(
            gateway
                .limiter()
                .status(services::DATAFORSEO)
                .unwrap()
                .requests_in_window,
            1
        );
    }

    #[tokio::test]
    async fn test_clones_share_limiter_and_cache() {
        let server = MockServer::start().await;
        mount_backlinks(&server, 1).await;

        let gateway = Gateway::new(gateway_config(&server)).unwrap();
        let other = gateway.clone();

        gateway
            .seo()
            .unwrap()
            .backlink_summary("example.com")
            .await
            .unwrap();
        other
            .seo()
            .unwrap()
            .backlink_summary("example.com")
            .await
            .unwrap();

        assert!(Arc::ptr_eq(gateway.limiter(), other.limiter()));
        assert_eq!(other.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_persistent_tier_survives_reset() {
        let server = MockServer::start().await;
        mount_backlinks(&server, 1).await;

        let store = Arc::new(MemoryPersistentCache::new());
        let gateway =
            Gateway::with_persistent_cache(gateway_config(&server), store.clone()).unwrap();
        let seo = gateway.seo().unwrap();

        let first = seo.backlink_summary("example.com").await.unwrap();
        assert_eq!(store.len(), 1);

        gateway.reset().unwrap();
        let second = seo.backlink_summary("example.com").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(gateway.cache_stats().persistent_hits, 1);
    }

    #[tokio::test]
    async fn test_concurrent_identical_calls_respect_window() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(dataforseo_envelope(json!([]))))
            .mount(&server)
            .await;

        let mut config = gateway_config(&server);
        config.services.insert(
            services::DATAFORSEO.to_string(),
            serpgate::ServiceLimit::new(3, 60_000, 2_000),
        );
        let gateway = Gateway::new(config).unwrap();
        let seo = gateway.seo().unwrap();

        let targets = ["a.com", "b.com", "c.com"];
        let calls = targets.iter().map(|t| seo.competitors(t));
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(Result::is_ok));
        let status = gateway.limiter().status(services::DATAFORSEO).unwrap();
        assert_eq!(status.requests_in_window, 3);
        assert_eq!(status.remaining_requests, 0);
    }

    #[tokio::test]
    async fn test_gateway_from_config_file() {
        let server = MockServer::start().await;
        mount_backlinks(&server, 1).await;

        let yaml = format!(
            r#"
services:
  dataforseo:
    max_requests: 10
    time_window_ms: 1000
    timeout_ms: 1500
cache:
  ttl_ms: 60000
retry:
  max_attempts: 1
vendors:
  dataforseo:
    login: "login"
    password: "password"
    base_url: "{}/v3"
"#,
            server.uri()
        );
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = GatewayConfig::from_file(file.path()).await.unwrap();
        let gateway = Gateway::new(config).unwrap();

        let summary = gateway
            .seo()
            .unwrap()
            .backlink_summary("example.com")
            .await
            .unwrap();
        assert_eq!(summary.backlinks_count, 10);
        assert_eq!(gateway.limiter().limit(services::DATAFORSEO).unwrap().timeout_ms, 1500);
    }
}
