use fpbridge::{BridgeError, BridgeResult};
use std::error::Error;

/// Error handling tests
#[cfg(test)]
mod error_handling_tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let errors = vec![
            BridgeError::Config { message: "Config error".to_string() },
            BridgeError::MissingArgument { command: "store_model".to_string(), position: 1, name: "location" },
            BridgeError::InvalidArgument {
                command: "image_2_tz".to_string(),
                name: "slot",
                value: "one".to_string(),
            },
            BridgeError::OutOfRange { name: "location", value: 70000 },
            BridgeError::Timeout { expected: 12, received: 3 },
            BridgeError::Protocol("bad start code".to_string()),
            BridgeError::Sensor { operation: "verify_password", code: 0x13 },
        ];

        for error in errors {
            let display = error.to_string();
            assert!(!display.is_empty(), "Error display should not be empty");

            fn assert_send_sync<T: Send + Sync>() {}
            assert_send_sync::<BridgeError>();
        }
    }

    #[test]
    fn test_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let bridge_error: BridgeError = io_error.into();
        assert!(matches!(bridge_error, BridgeError::Io(_)));
    }

    #[test]
    fn test_error_chain() {
        let root_cause = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied");
        let bridge_error: BridgeError = root_cause.into();

        let mut current_error: &dyn Error = &bridge_error;
        let mut depth = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
            if depth > 10 {
                break;
            }
        }

        assert!(depth > 0, "Should have at least one source error");
    }

    #[test]
    fn test_error_formatting() {
        let error = BridgeError::MissingArgument {
            command: "image_2_tz".to_string(),
            position: 1,
            name: "slot",
        };

        let display = format!("{}", error);
        let debug = format!("{:?}", error);

        assert!(display.contains("image_2_tz"));
        assert!(display.contains("slot"));
        assert_ne!(display, debug);
    }

    #[test]
    fn test_sensor_code_is_hex() {
        let error = BridgeError::Sensor { operation: "read_system_parameters", code: 0x01 };
        assert!(error.to_string().contains("0x01"));
    }

    #[test]
    fn test_result_propagation() {
        fn parse_slot(token: &str) -> BridgeResult<i64> {
            token.parse::<i64>().map_err(|_| BridgeError::InvalidArgument {
                command: "image_2_tz".to_string(),
                name: "slot",
                value: token.to_string(),
            })
        }

        fn handler(token: &str) -> BridgeResult<Vec<i64>> {
            let slot = parse_slot(token)?;
            Ok(vec![slot])
        }

        assert_eq!(handler("2").unwrap(), vec![2]);
        assert!(handler("two").unwrap_err().to_string().contains("'two'"));
    }

    #[test]
    fn test_error_size() {
        let error_size = std::mem::size_of::<BridgeError>();
        assert!(error_size <= 128, "BridgeError too large: {} bytes", error_size);
    }
}
