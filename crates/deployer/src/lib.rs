pub mod arguments;
pub mod chain;
pub mod config;
pub mod orchestrator;
pub mod traits;

use {
    crate::{
        arguments::Arguments,
        chain::OnchainPolicies,
        config::Config,
        orchestrator::{DeployService, DeploymentReport},
    },
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, Result},
};

/// Full variant: deploy, create the policy, fund it with LINK, update
/// contract states, pay the premium and report the wind speed.
pub async fn run_full(args: Arguments) -> Result<DeploymentReport> {
    service(&args)?.deploy_full().await
}

/// Reduced variant: deploy the factory and create the policy, nothing
/// else.
pub async fn run_policy_only(args: Arguments) -> Result<DeploymentReport> {
    service(&args)?.deploy_policy_only().await
}

fn service(args: &Arguments) -> Result<DeployService> {
    let insurer: PrivateKeySigner = args
        .from_key
        .parse()
        .context("invalid insurer private key (--from-key)")?;
    let client: PrivateKeySigner = args
        .second_key
        .parse()
        .context("invalid client private key (--second-key)")?;
    let insurer_address = insurer.address();
    let client_address = client.address();

    let config = Config::load(&args.network_config).context("load network config")?;
    let network = config.network(&args.network)?.clone();

    let mut wallet = EthereumWallet::new(insurer);
    wallet.register_signer(client);
    let rpc = ClientBuilder::default().http(args.node_url.clone());
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(rpc)
        .erased();

    let onchain = OnchainPolicies::new(
        provider,
        insurer_address,
        client_address,
        &network,
        args.artifacts.clone(),
    );
    Ok(DeployService::new(
        Box::new(onchain.clone()),
        Box::new(onchain),
        network,
        insurer_address,
        client_address,
    ))
}
