// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use turtle_scanner_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "TurtleApi".into(),
            message: "scan request failed with HTTP 502 Bad Gateway".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (TurtleApi): scan request failed with HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn export() {
        let err = CoreError::Export("disk full".into());
        assert_eq!(err.to_string(), "Export failed: disk full");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("No ticker(s) has been entered".into());
        assert_eq!(err.to_string(), "Validation failed: No ticker(s) has been entered");
    }

    #[test]
    fn empty_result() {
        assert_eq!(CoreError::EmptyResult.to_string(), "The scan returned no symbols");
    }

    #[test]
    fn invalid_config() {
        let err = CoreError::InvalidConfig("chunk_size must be at least 1".into());
        assert_eq!(err.to_string(), "Invalid configuration: chunk_size must be at least 1");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        match err {
            CoreError::Export(msg) => assert!(msg.contains("denied")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn from_csv() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CoreError = csv::Error::from(io).into();
        assert!(matches!(err, CoreError::Export(_)));
    }

    #[test]
    fn question_mark_propagates() {
        fn parse(input: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(input)?)
        }
        assert!(parse("[1, 2]").is_ok());
        assert!(parse("[1, 2").is_err());
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<CoreError>();
    }
}
