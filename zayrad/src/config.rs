//! Configuration management for zayrad

use crate::cli::Cli;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use zayra_core::errors::CoreError;
use zayra_http::HttpServerConfig;

/// Server configuration, read from YAML and the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZayraConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Name reported by the status endpoints
    pub service_name: String,
    /// Send open CORS headers
    pub enable_cors: bool,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
    /// Answer unknown users with a 200 error payload instead of a 404
    pub not_found_as_ok: bool,
}

impl Default for ZayraConfig {
    fn default() -> Self {
        let http = HttpServerConfig::default();
        Self {
            host: http.bind_address.ip().to_string(),
            port: http.bind_address.port(),
            service_name: http.service_name,
            enable_cors: http.enable_cors,
            request_timeout_secs: http.request_timeout,
            max_body_bytes: http.max_body_bytes,
            not_found_as_ok: http.not_found_as_ok,
        }
    }
}

impl ZayraConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, CoreError> {
        let mut figment = Figment::new();

        // Load from default config file if it exists
        let default_config_paths = ["zayra.yaml", "zayra.yml"];

        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Yaml::file(path));
            } else {
                return Err(CoreError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
        }

        // Platform-provided listen port, then ZAYRA_-prefixed settings
        figment = figment
            .merge(Env::raw().only(&["port"]))
            .merge(Env::prefixed("ZAYRA_"));

        figment
            .extract()
            .map_err(|e| CoreError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(ref host) = args.host {
            self.host = host.clone();
        }

        if let Some(port) = args.port {
            self.port = port;
        }

        self
    }

    pub fn bind_address(&self) -> Result<SocketAddr, CoreError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| CoreError::Configuration(format!("Invalid host '{}': {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Settings for the HTTP layer
    pub fn http_config(&self) -> Result<HttpServerConfig, CoreError> {
        Ok(HttpServerConfig {
            bind_address: self.bind_address()?,
            service_name: self.service_name.clone(),
            enable_cors: self.enable_cors,
            request_timeout: self.request_timeout_secs,
            max_body_bytes: self.max_body_bytes,
            not_found_as_ok: self.not_found_as_ok,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ZayraConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.service_name, "zayra-core-api");
        assert!(config.enable_cors);
        assert!(!config.not_found_as_ok);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = ZayraConfig::load(None).unwrap();
            assert_eq!(config, ZayraConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "port: 9100").unwrap();
        writeln!(temp_file, "service_name: zayra-staging").unwrap();
        writeln!(temp_file, "not_found_as_ok: true").unwrap();

        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = ZayraConfig::load(Some(temp_file.path())).unwrap();
            assert_eq!(config.port, 9100);
            assert_eq!(config.service_name, "zayra-staging");
            assert!(config.not_found_as_ok);
            assert_eq!(config.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = ZayraConfig::load(Some(Path::new("/nonexistent/zayra.yaml")));
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_default_file_discovery() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("zayra.yaml", "request_timeout_secs: 5")?;
            let config = ZayraConfig::load(None).unwrap();
            assert_eq!(config.request_timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_environment_precedence() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("zayra.yaml", "port: 7000\nenable_cors: true")?;

            jail.set_env("PORT", "8080");
            let config = ZayraConfig::load(None).unwrap();
            assert_eq!(config.port, 8080);

            jail.set_env("ZAYRA_PORT", "9090");
            jail.set_env("ZAYRA_ENABLE_CORS", "false");
            let config = ZayraConfig::load(None).unwrap();
            assert_eq!(config.port, 9090);
            assert!(!config.enable_cors);
            Ok(())
        });
    }

    #[test]
    fn test_cli_overrides() {
        let args = Cli {
            host: Some("127.0.0.1".to_string()),
            port: Some(3000),
            ..Default::default()
        };

        let config = ZayraConfig::default().with_overrides(&args);
        assert_eq!(config.bind_address().unwrap(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_http_config() {
        let config = ZayraConfig {
            request_timeout_secs: 12,
            max_body_bytes: 1024,
            ..Default::default()
        };

        let http = config.http_config().unwrap();
        assert_eq!(http.bind_address.port(), 8000);
        assert_eq!(http.request_timeout, 12);
        assert_eq!(http.max_body_bytes, 1024);
    }

    #[test]
    fn test_invalid_host() {
        let config = ZayraConfig {
            host: "not-an-ip".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.bind_address(), Err(CoreError::Configuration(_))));
    }
}
