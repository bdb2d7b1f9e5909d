use std::env;

/// Runtime configuration for the upload gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to (default: "127.0.0.1:3000")
    pub bind_addr: String,

    /// Endpoint of the user-operation execution service
    /// (default: "http://127.0.0.1:8545/rpc/user-operation")
    pub executor_endpoint: String,

    /// Timeout for a single execution-service call in seconds (default: 30)
    pub executor_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            executor_endpoint: "http://127.0.0.1:8545/rpc/user-operation".to_string(),
            executor_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(default.bind_addr),

            executor_endpoint: env::var("EXECUTOR_ENDPOINT")
                .unwrap_or(default.executor_endpoint),

            executor_timeout_secs: env::var("EXECUTOR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.executor_timeout_secs),
        }
    }

    /// Create config for development (local executor, short timeout)
    pub fn development() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            executor_endpoint: "http://127.0.0.1:8545/rpc/user-operation".to_string(),
            executor_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.executor_timeout_secs, 30);
        assert!(config.executor_endpoint.starts_with("http://"));
    }

    #[test]
    fn test_development_config() {
        let config = GatewayConfig::development();
        assert_eq!(config.executor_timeout_secs, 5);
    }
}
