//! ApiClient integration tests
//!
//! Cache idempotence, retry bounds, envelope failures, timeouts and the
//! not-found fallback, observed through the number of requests the mock receives.

#[cfg(test)]
mod tests {
    use crate::common::{
        BASIC_AUTH, MockDataForSeo, dataforseo_envelope, dataforseo_failure,
        dataforseo_task_failure, fast_retry,
    };
    use serde_json::{Value, json};
    use serpgate::core::rate_limiter::{RateLimiter, ServiceLimit, services};
    use serpgate::utils::error::{GatewayError, RetryPolicy};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const SERP: &str = "serp/google/organic/live/advanced";
    const BACKLINKS: &str = "backlinks/summary/live";

    fn serp_payload(keyword: &str) -> Value {
        json!([{"keyword": keyword, "location_code": 2840, "language_code": "en"}])
    }

    // ==================== Cache Tests ====================

    #[tokio::test]
    async fn test_identical_calls_hit_network_once() {
        let mock = MockDataForSeo::start().await;
        let body = dataforseo_envelope(json!([{"keyword": "rust", "items": []}]));

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .and(header("authorization", BASIC_AUTH))
            .and(body_json(serp_payload("rust")))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock.server)
            .await;

        let client = mock.client(RetryPolicy::no_retry());
        let first = client.call_service(SERP, &serp_payload("rust")).await.unwrap();

        // Same payload with a different key order
        let reordered = json!([{"language_code": "en", "location_code": 2840, "keyword": "rust"}]);
        let second = client.call_service(SERP, &reordered).await.unwrap();

        assert_eq!(first, body);
        assert_eq!(second, first);
        assert_eq!(mock.cache.stats().hits, 1);
        assert_eq!(
            mock.limiter.status(services::DATAFORSEO).unwrap().requests_in_window,
            1
        );
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .with_priority(1)
            .expect(1)
            .mount(&mock.server)
            .await;
        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(ResponseTemplate::new(200).set_body_json(dataforseo_envelope(json!([]))))
            .expect(1)
            .mount(&mock.server)
            .await;

        let client = mock.client(RetryPolicy::no_retry());
        assert!(client.call_service(SERP, &serp_payload("seo")).await.is_err());
        assert!(mock.cache.is_empty());
        assert!(client.call_service(SERP, &serp_payload("seo")).await.is_ok());
        assert_eq!(mock.cache.len(), 1);
    }

    // ==================== Retry Tests ====================

    #[tokio::test]
    async fn test_retry_bound_with_linear_backoff() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"status_code": 50000, "status_message": "Internal Error."})),
            )
            .expect(3)
            .mount(&mock.server)
            .await;

        let client = mock.client(fast_retry(3, 40));
        let started = Instant::now();
        let err = client
            .call_service(SERP, &serp_payload("rust"))
            .await
            .unwrap_err();

        // 40ms after the first failure, 80ms after the second, none after the last
        assert!(started.elapsed() >= Duration::from_millis(120));
        match err {
            GatewayError::VendorApi {
                http_status,
                message,
                ..
            } => {
                assert_eq!(http_status, Some(500));
                assert_eq!(message, "Internal Error.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(mock.cache.is_empty());
    }

    #[tokio::test]
    async fn test_retry_recovers_after_transient_failures() {
        let mock = MockDataForSeo::start().await;
        let body = dataforseo_envelope(json!([{"keyword": "rust"}]));

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .with_priority(1)
            .expect(2)
            .mount(&mock.server)
            .await;
        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock.server)
            .await;

        let client = mock.client(fast_retry(3, 10));
        let result = client.call_service(SERP, &serp_payload("rust")).await.unwrap();

        assert_eq!(result, body);
        // Every attempt takes a slot in the window
        assert_eq!(
            mock.limiter.status(services::DATAFORSEO).unwrap().requests_in_window,
            3
        );
    }

    #[tokio::test]
    async fn test_envelope_failure_is_retried_then_reported() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(dataforseo_failure(40501, "Invalid Field: 'keyword'.")),
            )
            .expect(3)
            .mount(&mock.server)
            .await;

        let client = mock.client(fast_retry(3, 5));
        let err = client
            .call_service(SERP, &serp_payload(""))
            .await
            .unwrap_err();

        match err {
            GatewayError::VendorApi {
                service,
                status_code,
                http_status,
                message,
            } => {
                assert_eq!(service, "dataforseo");
                assert_eq!(status_code, Some(40501));
                assert_eq!(http_status, None);
                assert!(message.contains("Invalid Field"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_vendor_error() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .expect(1)
            .mount(&mock.server)
            .await;

        let client = mock.client(RetryPolicy::no_retry());
        let err = client
            .call_service(SERP, &serp_payload("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::VendorApi { .. }));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    // ==================== Not Found Tests ====================

    #[tokio::test]
    async fn test_backlinks_not_found_yields_empty_summary() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(BACKLINKS)))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock.server)
            .await;

        let client = mock.client(fast_retry(3, 10));
        let payload = json!([{"target": "brand-new-site.dev"}]);
        let body = client.call_service(BACKLINKS, &payload).await.unwrap();

        assert_eq!(body["status_code"], 20000);
        let summary = &body["tasks"][0]["result"][0];
        assert_eq!(summary["target"], "brand-new-site.dev");
        assert_eq!(summary["backlinks_count"], 0);
        assert_eq!(summary["referring_domains_count"], 0);

        // The synthesized envelope is cached like any other success
        let again = client.call_service(BACKLINKS, &payload).await.unwrap();
        assert_eq!(again, body);
    }

    #[tokio::test]
    async fn test_not_found_elsewhere_is_an_error() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&mock.server)
            .await;

        let client = mock.client(fast_retry(2, 5));
        let err = client
            .call_service(SERP, &serp_payload("rust"))
            .await
            .unwrap_err();
        match err {
            GatewayError::VendorApi { http_status, .. } => assert_eq!(http_status, Some(404)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_backlinks_task_not_found_yields_empty_summary() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(BACKLINKS)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(dataforseo_task_failure(40400, "Not Found.")),
            )
            .expect(1)
            .mount(&mock.server)
            .await;

        let client = mock.client(fast_retry(3, 10));
        let payload = json!([{"target": "brand-new-site.dev"}]);
        let body = client.call_service(BACKLINKS, &payload).await.unwrap();

        assert_eq!(body["tasks"][0]["status_code"], 20000);
        let summary = &body["tasks"][0]["result"][0];
        assert_eq!(summary["target"], "brand-new-site.dev");
        assert_eq!(summary["backlinks_count"], 0);
    }

    #[tokio::test]
    async fn test_task_not_found_elsewhere_is_an_error() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(dataforseo_task_failure(40400, "Not Found.")),
            )
            .expect(2)
            .mount(&mock.server)
            .await;

        let client = mock.client(fast_retry(2, 5));
        let err = client
            .call_service(SERP, &serp_payload("rust"))
            .await
            .unwrap_err();
        match err {
            GatewayError::VendorApi {
                status_code,
                http_status,
                ..
            } => {
                assert_eq!(status_code, Some(40400));
                assert_eq!(http_status, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // ==================== Timeout Tests ====================

    #[tokio::test]
    async fn test_slow_vendor_times_out() {
        let mock = MockDataForSeo::start_with_limit(ServiceLimit::new(100, 60_000, 100)).await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(dataforseo_envelope(json!([])))
                    .set_delay(Duration::from_millis(1_000)),
            )
            .mount(&mock.server)
            .await;

        let client = mock.client(RetryPolicy::no_retry());
        let started = Instant::now();
        let err = client
            .call_service(SERP, &serp_payload("rust"))
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_millis(900));
        assert_eq!(err.to_string(), "dataforseo timed out after 100ms");
        assert_eq!(mock.limiter.pending_timeouts(services::DATAFORSEO), 0);
        assert!(mock.cache.is_empty());
    }

    // ==================== Limiter Tests ====================

    #[tokio::test]
    async fn test_unconfigured_service_sends_nothing() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock.server)
            .await;

        let empty = Arc::new(RateLimiter::new());
        let vendor = Arc::new(serpgate::core::providers::DataForSeo::with_base_url(
            &mock.base_url(),
            "login",
            "password",
        ));
        let client = serpgate::ApiClient::new(vendor, empty, mock.cache.clone())
            .with_retry(fast_retry(3, 10));

        let err = client
            .call_service(SERP, &serp_payload("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
        assert_eq!(err.to_string(), "Service 'dataforseo' is not configured");
    }

    #[tokio::test]
    async fn test_calls_wait_for_the_next_window() {
        let mock = MockDataForSeo::start_with_limit(ServiceLimit::new(2, 300, 2_000)).await;

        Mock::given(method("POST"))
            .and(path(MockDataForSeo::path(SERP)))
            .respond_with(ResponseTemplate::new(200).set_body_json(dataforseo_envelope(json!([]))))
            .expect(3)
            .mount(&mock.server)
            .await;

        let client = mock.client(RetryPolicy::no_retry());
        let started = Instant::now();
        for keyword in ["a", "b", "c"] {
            client.call_service(SERP, &serp_payload(keyword)).await.unwrap();
        }

        assert!(started.elapsed() >= Duration::from_millis(250));
        let status = mock.limiter.status(services::DATAFORSEO).unwrap();
        assert_eq!(status.requests_in_window, 1);
    }

    #[tokio::test]
    async fn test_null_payload_uses_get() {
        let mock = MockDataForSeo::start().await;

        Mock::given(method("GET"))
            .and(path(MockDataForSeo::path("appendix/user_data")))
            .and(header("authorization", BASIC_AUTH))
            .respond_with(ResponseTemplate::new(200).set_body_json(dataforseo_envelope(json!([{"login": "login"}]))))
            .expect(1)
            .mount(&mock.server)
            .await;

        let client = mock.client(RetryPolicy::no_retry());
        let body = client
            .call_service("appendix/user_data", &Value::Null)
            .await
            .unwrap();
        assert_eq!(body["tasks"][0]["result"][0]["login"], "login");
    }
}
