use {clap::Parser, std::path::PathBuf, url::Url};

#[derive(Parser)]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Name of the active network, used to look up per-network addresses
    /// (LINK token, AccuWeather oracle) in the network config file.
    #[clap(long, env, default_value = "development")]
    pub network: String,

    /// Path to the TOML file with per-network contract addresses.
    #[clap(long, env, default_value = "networks.toml")]
    pub network_config: PathBuf,

    /// Directory containing the compiled contract artifacts. The factory
    /// creation bytecode is read from
    /// `<artifacts>/WindFarmPolicyDeployer.json`.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Private key of the insurer account which deploys and funds the
    /// contracts.
    #[clap(long, env, hide_env_values = true)]
    pub from_key: String,

    /// Private key of the client account which pays the premium.
    #[clap(long, env, hide_env_values = true)]
    pub second_key: String,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "node_url: {}", self.node_url)?;
        writeln!(f, "network: {}", self.network)?;
        writeln!(f, "network_config: {}", self.network_config.display())?;
        writeln!(f, "artifacts: {}", self.artifacts.display())?;
        writeln!(f, "from_key: SECRET")?;
        writeln!(f, "second_key: SECRET")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_redacts_secrets() {
        let args = Arguments::parse_from([
            "deploy",
            "--from-key",
            "0x0123",
            "--second-key",
            "0x4567",
        ]);
        let displayed = args.to_string();
        assert!(!displayed.contains("0123"));
        assert!(!displayed.contains("4567"));
        assert_eq!(displayed.matches("SECRET").count(), 2);
    }
}
