use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port to bind to
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Try-on backend that validated requests are forwarded to
    #[arg(long, env = "VTON_ENDPOINT", default_value = "http://localhost:8000/api")]
    pub vton_endpoint: String,

    /// Upstream request timeout in seconds (unset uses the transport default)
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,

    /// Directory the local storage upload path writes into
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

impl From<&Config> for ProxyConfig {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: config.vton_endpoint.clone(),
            timeout: config.upstream_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

impl From<&Config> for StorageConfig {
    fn from(config: &Config) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
        }
    }
}

impl Config {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::parse_from(["viton-proxy", "--host", "127.0.0.1", "--port", "3000"]);
        assert_eq!(config.vton_endpoint, "http://localhost:8000/api");
        assert_eq!(config.server_address(), "127.0.0.1:3000");

        let proxy = ProxyConfig::from(&config);
        assert!(proxy.timeout.is_none());
    }

    #[test]
    fn timeout_is_converted_to_duration() {
        let config = Config::parse_from([
            "viton-proxy",
            "--vton-endpoint",
            "http://backend:9000/viton",
            "--upstream-timeout-secs",
            "30",
        ]);
        let proxy = ProxyConfig::from(&config);
        assert_eq!(proxy.endpoint, "http://backend:9000/viton");
        assert_eq!(proxy.timeout, Some(Duration::from_secs(30)));
    }
}
