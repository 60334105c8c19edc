//! Per-network configuration.
//!
//! Replaces the per-network table of the contract project's config file:
//! each network names the deployed LINK token and the AccuWeather oracle
//! the new policies get wired up to.

use {
    alloy::primitives::Address,
    serde::Deserialize,
    std::{collections::HashMap, path::Path},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read network config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse network config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no configuration for network {0:?}")]
    UnknownNetwork(String),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub networks: HashMap<String, NetworkConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NetworkConfig {
    /// Address of the LINK token on this network.
    pub link_token: Address,
    /// Address of the AccuWeather oracle consumed by the policies.
    pub accuweather_oracle: Address,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Resolves the configuration of the active network.
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
        [networks.kovan]
        link_token = "0xa36085F69e2889c224210F603D836748e7dC0088"
        accuweather_oracle = "0xfF07C97631Ff3bAb5e5e5660Cdf47AdEd8D4d4Fd"

        [networks.development]
        link_token = "0x0000000000000000000000000000000000000001"
        accuweather_oracle = "0x0000000000000000000000000000000000000002"
    "#;

    #[test]
    fn resolves_network_addresses() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();
        let kovan = config.network("kovan").unwrap();
        assert_eq!(
            kovan.link_token,
            "0xa36085F69e2889c224210F603D836748e7dC0088"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(
            kovan.accuweather_oracle,
            "0xfF07C97631Ff3bAb5e5e5660Cdf47AdEd8D4d4Fd"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn unknown_network_is_an_error() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();
        assert!(matches!(
            config.network("mainnet"),
            Err(ConfigError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("networks.toml");
        std::fs::write(&path, EXAMPLE).unwrap();
        let config = Config::load(&path).unwrap();
        assert!(config.network("development").is_ok());
    }
}
