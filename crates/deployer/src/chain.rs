//! Production implementation of the blockchain boundary on top of alloy
//! contract instances.

use {
    crate::{
        config::NetworkConfig,
        traits::{ChainRead, ChainWrite, NewWindFarmParams},
    },
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, U256},
        providers::{DynProvider, Provider},
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, ensure},
    contracts::{InsureWindFarm, LinkToken, WindFarmPolicyDeployer},
    std::path::PathBuf,
};

// Confirmation counts per transaction kind, matching the original
// deployment flow.
const DEPLOY_CONFIRMATIONS: u64 = 1;
const NEW_FARM_CONFIRMATIONS: u64 = 2;
const FUND_CONFIRMATIONS: u64 = 1;
const UPDATE_CONFIRMATIONS: u64 = 2;
const PREMIUM_CONFIRMATIONS: u64 = 2;

const FACTORY_ARTIFACT: &str = "WindFarmPolicyDeployer";

#[derive(Clone)]
pub struct OnchainPolicies {
    provider: DynProvider,
    insurer: Address,
    client: Address,
    link_token: Address,
    artifacts: PathBuf,
}

impl OnchainPolicies {
    pub fn new(
        provider: DynProvider,
        insurer: Address,
        client: Address,
        network: &NetworkConfig,
        artifacts: PathBuf,
    ) -> Self {
        Self {
            provider,
            insurer,
            client,
            link_token: network.link_token,
            artifacts,
        }
    }

    fn factory(&self, address: Address) -> contracts::instances::WindFarmPolicyDeployerInstance {
        WindFarmPolicyDeployer::new(address, self.provider.clone())
    }
}

#[async_trait::async_trait]
impl ChainRead for OnchainPolicies {
    async fn insurance_policies(&self, factory: Address) -> Result<Vec<Address>> {
        self.factory(factory)
            .getInsurancePolicies()
            .call()
            .await
            .context("getInsurancePolicies call failed")
    }

    async fn latest_wind_speed(&self, policy: Address) -> Result<U256> {
        InsureWindFarm::new(policy, self.provider.clone())
            .getLatestWindSpeed()
            .call()
            .await
            .context("getLatestWindSpeed call failed")
    }
}

#[async_trait::async_trait]
impl ChainWrite for OnchainPolicies {
    async fn deploy_policy_factory(&self) -> Result<Address> {
        let code = contracts::artifacts::load_bytecode(&self.artifacts, FACTORY_ARTIFACT)?;
        let tx = TransactionRequest::default()
            .with_from(self.insurer)
            .with_deploy_code(code);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .context("failed to submit factory deployment")?
            .with_required_confirmations(DEPLOY_CONFIRMATIONS)
            .get_receipt()
            .await
            .context("failed to confirm factory deployment")?;
        ensure!(receipt.status(), "factory deployment reverted");
        receipt
            .contract_address
            .context("factory deployment receipt has no contract address")
    }

    async fn new_wind_farm(&self, params: NewWindFarmParams) -> Result<Address> {
        let factory = self.factory(params.factory);
        let call = factory
            .newWindFarm(
                params.link_token,
                params.oracle,
                params.policy_amount,
                params.client,
                params.length_in_days,
                params.latitude,
                params.longitude,
            )
            .value(params.policy_amount)
            .from(self.insurer);
        // The return value of a submitted transaction is not observable,
        // so simulate the call first to learn the new policy address.
        let policy = call.call().await.context("newWindFarm simulation failed")?;
        let receipt = call
            .send()
            .await
            .context("failed to submit newWindFarm")?
            .with_required_confirmations(NEW_FARM_CONFIRMATIONS)
            .get_receipt()
            .await
            .context("failed to confirm newWindFarm")?;
        ensure!(receipt.status(), "newWindFarm reverted");
        Ok(policy)
    }

    async fn fund_with_link(&self, policy: Address, amount: U256) -> Result<()> {
        let receipt = LinkToken::new(self.link_token, self.provider.clone())
            .transfer(policy, amount)
            .from(self.insurer)
            .send()
            .await
            .context("failed to submit LINK transfer")?
            .with_required_confirmations(FUND_CONFIRMATIONS)
            .get_receipt()
            .await
            .context("failed to confirm LINK transfer")?;
        ensure!(receipt.status(), "LINK transfer reverted");
        Ok(())
    }

    async fn update_all_policies(&self, factory: Address, gas_price: u128) -> Result<()> {
        let receipt = self
            .factory(factory)
            .updateStateOfAllContracts()
            .from(self.insurer)
            .gas_price(gas_price)
            .send()
            .await
            .context("failed to submit updateStateOfAllContracts")?
            .with_required_confirmations(UPDATE_CONFIRMATIONS)
            .get_receipt()
            .await
            .context("failed to confirm updateStateOfAllContracts")?;
        ensure!(receipt.status(), "updateStateOfAllContracts reverted");
        Ok(())
    }

    async fn pay_premium(&self, policy: Address, amount: U256) -> Result<()> {
        let receipt = InsureWindFarm::new(policy, self.provider.clone())
            .payPremium()
            .value(amount)
            .from(self.client)
            .send()
            .await
            .context("failed to submit payPremium")?
            .with_required_confirmations(PREMIUM_CONFIRMATIONS)
            .get_receipt()
            .await
            .context("failed to confirm payPremium")?;
        ensure!(receipt.status(), "payPremium reverted");
        Ok(())
    }
}
