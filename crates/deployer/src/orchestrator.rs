//! The deployment sequence itself.
//!
//! Stands up one wind farm insurance policy: deploy the factory, create
//! the policy, then (full variant only) fund it with LINK, refresh the
//! contract states, pay the first premium and report the current wind
//! speed at the insured location.

use {
    crate::{
        config::NetworkConfig,
        traits::{ChainRead, ChainWrite, NewWindFarmParams},
    },
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
};

/// Coverage amount in wei (0.03 ether), also attached as value to the
/// factory call.
pub const POLICY_AMOUNT: u128 = 30_000_000_000_000_000;
/// Premium is a fixed 0.5% of the coverage amount.
pub const PREMIUM_AMOUNT: u128 = POLICY_AMOUNT * 5 / 1000;
pub const POLICY_LENGTH_IN_DAYS: u64 = 30;
/// 5.0 LINK in the token's smallest unit (18 decimals).
pub const LINK_AMOUNT: u128 = 5_000_000_000_000_000_000;
/// Fixed gas price for the administrative state update.
pub const UPDATE_GAS_PRICE: u128 = 100_000_000_000_000_000;
/// Strathcona Park, Vancouver Island.
pub const LOCATION_LATITUDE: &str = "49.703168";
pub const LOCATION_LONGITUDE: &str = "-125.630035";

/// Addresses produced by a deployment run, plus the reported wind speed
/// when the full variant ran.
#[derive(Debug)]
pub struct DeploymentReport {
    pub factory: Address,
    pub policy: Address,
    pub wind_speed_kmh: Option<String>,
}

pub struct DeployService {
    write: Box<dyn ChainWrite>,
    read: Box<dyn ChainRead>,
    network: NetworkConfig,
    insurer: Address,
    client: Address,
}

impl DeployService {
    pub fn new(
        write: Box<dyn ChainWrite>,
        read: Box<dyn ChainRead>,
        network: NetworkConfig,
        insurer: Address,
        client: Address,
    ) -> Self {
        Self {
            write,
            read,
            network,
            insurer,
            client,
        }
    }

    /// Full end-to-end run: deploy, create, fund, update, pay premium,
    /// query wind speed. The new policy address is taken as the last
    /// element of the factory's policy list.
    pub async fn deploy_full(&self) -> Result<DeploymentReport> {
        let factory = self.deploy_factory().await?;

        tracing::info!("deploying client's wind farm policy contract");
        self.write
            .new_wind_farm(self.new_wind_farm_params(factory))
            .await
            .context("create wind farm policy")?;
        let policies = self
            .read
            .insurance_policies(factory)
            .await
            .context("list insurance policies")?;
        let policy = *policies
            .last()
            .context("factory reported no insurance policies")?;
        tracing::info!(%policy, client = %self.client, "new wind farm policy deployed");

        self.write
            .fund_with_link(policy, U256::from(LINK_AMOUNT))
            .await
            .context("fund policy with LINK")?;
        tracing::info!(amount = LINK_AMOUNT, "policy contract funded with LINK");

        tracing::info!("updating state of all policy contracts");
        self.write
            .update_all_policies(factory, UPDATE_GAS_PRICE)
            .await
            .context("update policy states")?;

        tracing::info!("client is paying today's insurance premium");
        self.write
            .pay_premium(policy, U256::from(PREMIUM_AMOUNT))
            .await
            .context("pay premium")?;
        tracing::info!("insurance premium paid");

        let raw = self
            .read
            .latest_wind_speed(policy)
            .await
            .context("query latest wind speed")?;
        let wind_speed_kmh = format_wind_speed(raw);
        tracing::info!(speed = %wind_speed_kmh, "current wind speed in Strathcona Park in km/h");

        Ok(DeploymentReport {
            factory,
            policy,
            wind_speed_kmh: Some(wind_speed_kmh),
        })
    }

    /// Reduced run that stops after policy creation. The policy address
    /// comes directly from the factory call's result; no funding, state
    /// update, premium or wind speed query happens.
    pub async fn deploy_policy_only(&self) -> Result<DeploymentReport> {
        let factory = self.deploy_factory().await?;

        tracing::info!("deploying client's wind farm policy contract");
        let policy = self
            .write
            .new_wind_farm(self.new_wind_farm_params(factory))
            .await
            .context("create wind farm policy")?;
        tracing::info!(%policy, client = %self.client, "new wind farm policy deployed");

        Ok(DeploymentReport {
            factory,
            policy,
            wind_speed_kmh: None,
        })
    }

    async fn deploy_factory(&self) -> Result<Address> {
        tracing::info!("deploying policy deployer contract");
        let factory = self
            .write
            .deploy_policy_factory()
            .await
            .context("deploy policy factory")?;
        tracing::info!(%factory, insurer = %self.insurer, "policy deployer contract deployed");
        Ok(factory)
    }

    fn new_wind_farm_params(&self, factory: Address) -> NewWindFarmParams {
        NewWindFarmParams {
            factory,
            link_token: self.network.link_token,
            oracle: self.network.accuweather_oracle,
            policy_amount: U256::from(POLICY_AMOUNT),
            client: self.client,
            length_in_days: U256::from(POLICY_LENGTH_IN_DAYS),
            latitude: LOCATION_LATITUDE.to_string(),
            longitude: LOCATION_LONGITUDE.to_string(),
        }
    }
}

/// The oracle reports wind speeds in tenths of km/h.
pub fn format_wind_speed(raw: U256) -> String {
    let ten = U256::from(10);
    format!("{}.{}", raw / ten, raw % ten)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::traits::{MockChainRead, MockChainWrite},
        alloy::primitives::address,
        anyhow::anyhow,
        mockall::{Sequence, predicate::eq},
    };

    const FACTORY: Address = address!("0x1000000000000000000000000000000000000001");
    const POLICY_A: Address = address!("0x2000000000000000000000000000000000000002");
    const POLICY_B: Address = address!("0x3000000000000000000000000000000000000003");

    fn network() -> NetworkConfig {
        NetworkConfig {
            link_token: address!("0xa36085F69e2889c224210F603D836748e7dC0088"),
            accuweather_oracle: address!("0xfF07C97631Ff3bAb5e5e5660Cdf47AdEd8D4d4Fd"),
        }
    }

    fn service(write: MockChainWrite, read: MockChainRead) -> DeployService {
        DeployService::new(
            Box::new(write),
            Box::new(read),
            network(),
            address!("0x4000000000000000000000000000000000000004"),
            address!("0x5000000000000000000000000000000000000005"),
        )
    }

    #[test]
    fn premium_is_half_a_percent_of_coverage() {
        assert_eq!(PREMIUM_AMOUNT, POLICY_AMOUNT * 5 / 1000);
        assert_eq!(PREMIUM_AMOUNT, 150_000_000_000_000);
    }

    #[test]
    fn wind_speed_is_reported_in_tenths() {
        assert_eq!(format_wind_speed(U256::from(653)), "65.3");
        assert_eq!(format_wind_speed(U256::from(650)), "65.0");
        assert_eq!(format_wind_speed(U256::from(7)), "0.7");
    }

    #[tokio::test]
    async fn full_run_executes_every_step_in_order() {
        let mut write = MockChainWrite::new();
        let mut read = MockChainRead::new();
        let mut seq = Sequence::new();

        write
            .expect_deploy_policy_factory()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(FACTORY));
        write
            .expect_new_wind_farm()
            .withf(|params| {
                params.factory == FACTORY
                    && params.policy_amount == U256::from(POLICY_AMOUNT)
                    && params.length_in_days == U256::from(30)
                    && params.latitude == LOCATION_LATITUDE
                    && params.longitude == LOCATION_LONGITUDE
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(POLICY_A));
        read.expect_insurance_policies()
            .with(eq(FACTORY))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![POLICY_A, POLICY_B]));
        // The last list element is the freshly created policy.
        write
            .expect_fund_with_link()
            .with(eq(POLICY_B), eq(U256::from(LINK_AMOUNT)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        write
            .expect_update_all_policies()
            .with(eq(FACTORY), eq(UPDATE_GAS_PRICE))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        write
            .expect_pay_premium()
            .with(eq(POLICY_B), eq(U256::from(PREMIUM_AMOUNT)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        read.expect_latest_wind_speed()
            .with(eq(POLICY_B))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(U256::from(653)));

        let report = service(write, read).deploy_full().await.unwrap();
        assert_eq!(report.factory, FACTORY);
        assert_eq!(report.policy, POLICY_B);
        assert_eq!(report.wind_speed_kmh.as_deref(), Some("65.3"));
    }

    #[tokio::test]
    async fn factory_deployment_failure_stops_the_sequence() {
        let mut write = MockChainWrite::new();
        let mut read = MockChainRead::new();

        write
            .expect_deploy_policy_factory()
            .times(1)
            .returning(|| Err(anyhow!("deployment reverted")));
        write.expect_new_wind_farm().never();
        write.expect_fund_with_link().never();
        write.expect_update_all_policies().never();
        write.expect_pay_premium().never();
        read.expect_insurance_policies().never();
        read.expect_latest_wind_speed().never();

        assert!(service(write, read).deploy_full().await.is_err());
    }

    #[tokio::test]
    async fn policy_only_run_skips_funding_and_exercise() {
        let mut write = MockChainWrite::new();
        let mut read = MockChainRead::new();

        write
            .expect_deploy_policy_factory()
            .times(1)
            .returning(|| Ok(FACTORY));
        write
            .expect_new_wind_farm()
            .times(1)
            .returning(|_| Ok(POLICY_A));
        write.expect_fund_with_link().never();
        write.expect_update_all_policies().never();
        write.expect_pay_premium().never();
        read.expect_insurance_policies().never();
        read.expect_latest_wind_speed().never();

        let report = service(write, read).deploy_policy_only().await.unwrap();
        assert_eq!(report.policy, POLICY_A);
        assert_eq!(report.wind_speed_kmh, None);
    }

    #[tokio::test]
    async fn empty_policy_list_is_an_error() {
        let mut write = MockChainWrite::new();
        let mut read = MockChainRead::new();

        write
            .expect_deploy_policy_factory()
            .returning(|| Ok(FACTORY));
        write.expect_new_wind_farm().returning(|_| Ok(POLICY_A));
        read.expect_insurance_policies().returning(|_| Ok(vec![]));
        write.expect_fund_with_link().never();
        write.expect_update_all_policies().never();
        write.expect_pay_premium().never();
        read.expect_latest_wind_speed().never();

        assert!(service(write, read).deploy_full().await.is_err());
    }
}
