// ═══════════════════════════════════════════════════════════════════
// Provider Tests — TurtleApiProvider request building, response
// resolution, and the ScanProvider contract
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use serde_json::json;

use turtle_scanner_core::errors::CoreError;
use turtle_scanner_core::models::entry::ScanEntry;
use turtle_scanner_core::models::scan::{
    HealthResponse, ScanBatch, ScanParams, ScanResponse, TickersListResponse,
};
use turtle_scanner_core::providers::traits::ScanProvider;
use turtle_scanner_core::providers::turtle_api::{batch_from_response, TurtleApiProvider};

// ═══════════════════════════════════════════════════════════════════
// TurtleApiProvider
// ═══════════════════════════════════════════════════════════════════

mod turtle_api {
    use super::*;

    #[test]
    fn name_and_base_url() {
        let provider = TurtleApiProvider::new("http://localhost:5000/", 5);
        assert_eq!(provider.name(), "TurtleApi");
        assert_eq!(provider.base_url(), "http://localhost:5000");
    }

    #[test]
    fn scan_request_carries_symbols_and_lookbacks() {
        let provider = TurtleApiProvider::new("http://127.0.0.1:5000", 5);
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let params = ScanParams {
            days_back: 15,
            entry_lookback: 55,
            exit_lookback: 20,
        };
        let request = provider.scan_request(&symbols, params).unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/scan");

        let query: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("symbols".to_string(), "AAPL,MSFT".to_string()),
                ("daysBack".to_string(), "15".to_string()),
                ("entry".to_string(), "55".to_string()),
                ("exit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn reserved_characters_in_symbols_are_encoded() {
        let provider = TurtleApiProvider::new("http://127.0.0.1:5000", 5);
        let symbols = vec!["A&B".to_string(), "C D#".to_string(), "E+F".to_string()];
        let request = provider.scan_request(&symbols, ScanParams::default()).unwrap();

        let raw_query = request.url().query().unwrap();
        assert!(raw_query.starts_with("symbols=A%26B%2CC+D%23%2CE%2BF&"), "{raw_query}");
        assert!(request.url().fragment().is_none());

        let query: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert_eq!(query.len(), 4);
        assert_eq!(query[0], ("symbols".to_string(), "A&B,C D#,E+F".to_string()));
        assert_eq!(query[1], ("daysBack".to_string(), "10".to_string()));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let provider = TurtleApiProvider::new("http://127.0.0.1:1", 2);
        let err = provider.health().await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)), "got {err:?}");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Response resolution
// ═══════════════════════════════════════════════════════════════════

mod responses {
    use super::*;

    #[test]
    fn scan_response_entries_are_resolved_individually() {
        let resp: ScanResponse = serde_json::from_value(json!({
            "data": {
                "AAPL": {
                    "last_state": {"position": 1, "current_price": 190.2, "atr": 3.1},
                    "recent_buys": [{"date": "2024-01-02", "price": 185.0}]
                },
                "BADCO": {"error": "No data found"},
                "WEIRD": {"signals": 42},
                "BROKEN": [1, 2]
            },
            "processed": 2,
            "errors": 1,
            "total_requested": 3
        }))
        .unwrap();
        assert_eq!(resp.total_requested, 3);

        let batch = batch_from_response(resp);
        assert_eq!(batch.processed, 2);
        assert_eq!(batch.errors, 1);
        assert_eq!(batch.data.len(), 4);

        let aapl = batch.data["AAPL"].as_ok().unwrap();
        assert!(aapl.is_active());
        assert_eq!(aapl.recent_buys.len(), 1);
        assert_eq!(batch.data["BADCO"], ScanEntry::Failed("No data found".into()));
        assert!(batch.data["WEIRD"].as_ok().unwrap().signals.is_empty());
        assert!(batch.data["BROKEN"].is_error());
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let resp: ScanResponse = serde_json::from_value(json!({"data": {}})).unwrap();
        let batch = batch_from_response(resp);
        assert!(batch.data.is_empty());
        assert_eq!((batch.processed, batch.errors), (0, 0));
    }

    #[test]
    fn tickers_list_response() {
        let resp: TickersListResponse = serde_json::from_value(json!({
            "tickers": ["AAPL", "MSFT"],
            "count": 2,
            "description": "S&P sample"
        }))
        .unwrap();
        assert_eq!(resp.tickers, vec!["AAPL", "MSFT"]);
        assert_eq!(resp.count, 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trait object usage
// ═══════════════════════════════════════════════════════════════════

mod contract {
    use super::*;

    struct StaticProvider;

    #[async_trait]
    impl ScanProvider for StaticProvider {
        fn name(&self) -> &str {
            "Static"
        }

        async fn health(&self) -> Result<HealthResponse, CoreError> {
            Ok(HealthResponse {
                status: "ok".into(),
                version: Some("1.0".into()),
                available_tickers: Some(2),
                ..HealthResponse::default()
            })
        }

        async fn tickers_list(&self) -> Result<Vec<String>, CoreError> {
            Ok(vec!["AAPL".into(), "MSFT".into()])
        }

        async fn scan(
            &self,
            symbols: &[String],
            _params: ScanParams,
        ) -> Result<ScanBatch, CoreError> {
            let data = symbols
                .iter()
                .map(|s| (s.clone(), ScanEntry::from_value(s, json!({}))))
                .collect();
            Ok(ScanBatch {
                data,
                processed: symbols.len(),
                errors: 0,
            })
        }
    }

    #[tokio::test]
    async fn boxed_provider_is_usable() {
        let provider: Box<dyn ScanProvider> = Box::new(StaticProvider);
        assert_eq!(provider.name(), "Static");
        assert_eq!(
            provider.health().await.unwrap().summary(),
            "Version: 1.0 | 2 tickers available"
        );

        let tickers = provider.tickers_list().await.unwrap();
        let batch = provider.scan(&tickers, ScanParams::default()).await.unwrap();
        assert_eq!(batch.processed, 2);
        assert_eq!(batch.data["MSFT"].as_ok().unwrap().symbol, "MSFT");
    }
}
