use serde::Deserialize;
use std::env;

/// Process configuration, loaded once at startup.
///
/// Every external effect (database, queue, email) is optional: a missing
/// section selects the logging-only capability variant instead of failing.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub kafka: KafkaConfig,
    pub email: EmailConfig,
    pub probe: ProbeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KafkaConfig {
    pub brokers: Option<String>,
    pub group_id: String,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: None,
            group_id: "rentacar-workers".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub sender: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            sender: "notifications@rentacar.com".to_string(),
        }
    }
}

/// Hostnames for the deployment smoke test. Both are required by the probe;
/// no other component reads them.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ProbeConfig {
    pub frontend_host: Option<String>,
    pub bff_host: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `RENTACAR_DATABASE__URL` sets `database.url`
            .add_source(config::Environment::with_prefix("RENTACAR").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_degrade_everything_optional() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 3000);
        assert!(cfg.database.url.is_none());
        assert!(cfg.kafka.brokers.is_none());
        assert!(cfg.email.api_key.is_none());
        assert_eq!(cfg.email.sender, "notifications@rentacar.com");
        assert!(cfg.probe.frontend_host.is_none());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let toml = r#"
            [server]
            port = 8080

            [kafka]
            brokers = "localhost:9092"
        "#;
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.kafka.brokers.as_deref(), Some("localhost:9092"));
        assert_eq!(cfg.kafka.group_id, "rentacar-workers");
        assert!(cfg.database.url.is_none());
    }
}
