use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub payment: PaymentConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Overrides the platform data directory when set
    pub data_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    pub currency: String,
    #[serde(default = "default_gateway_latency_ms")]
    pub mock_gateway_latency_ms: u64,
}

fn default_gateway_latency_ms() -> u64 {
    800
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// How long a tentative booking keeps its seats before the sweep
    /// cancels it
    pub tentative_hold_seconds: u64,
    /// Interval between sweep runs
    pub expiry_sweep_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(std::path::Path::new("config"))
    }

    pub fn load_from(dir: &std::path::Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| dir.join(name).display().to_string();

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name(&file("default")))
            // Then the current environment's file, if present
            .add_source(config::File::with_name(&file(&run_mode)).required(false))
            // Then a local file that shouldn't be checked in to git
            .add_source(config::File::with_name(&file("local")).required(false))
            // Finally the environment, e.g. ESCAPE__PAYMENT__CURRENCY=INR
            .add_source(config::Environment::with_prefix("ESCAPE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn workspace_config_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../config")
    }

    // one test so the env override cannot race the plain-file load
    #[test]
    fn default_file_deserializes_and_environment_overrides() {
        let config = Config::load_from(&workspace_config_dir()).unwrap();
        assert_eq!(config.payment.currency, "INR");
        assert_eq!(config.business_rules.tentative_hold_seconds, 900);
        assert!(config.storage.data_dir.is_none());

        env::set_var("ESCAPE__BUSINESS_RULES__TENTATIVE_HOLD_SECONDS", "120");
        let overridden = Config::load_from(&workspace_config_dir()).unwrap();
        env::remove_var("ESCAPE__BUSINESS_RULES__TENTATIVE_HOLD_SECONDS");
        assert_eq!(overridden.business_rules.tentative_hold_seconds, 120);
    }
}
