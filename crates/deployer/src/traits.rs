//! Trait definitions for the blockchain boundary.
//!
//! These traits abstract the on-chain interactions to enable unit testing
//! the deployment sequence with mocks.

use {
    alloy::primitives::{Address, U256},
    anyhow::Result,
};

/// Arguments of the factory's `newWindFarm` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewWindFarmParams {
    /// Address of the deployed factory contract.
    pub factory: Address,
    /// LINK token the policy uses to pay for oracle requests.
    pub link_token: Address,
    /// AccuWeather oracle reporting local wind speeds.
    pub oracle: Address,
    /// Coverage amount, also attached as the transaction value.
    pub policy_amount: U256,
    /// The insured client; premium payments must come from this account.
    pub client: Address,
    pub length_in_days: U256,
    pub latitude: String,
    pub longitude: String,
}

/// Abstracts blockchain read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainRead: Send + Sync {
    /// Returns all policy addresses the factory has created so far, in
    /// creation order.
    async fn insurance_policies(&self, factory: Address) -> Result<Vec<Address>>;

    /// Queries a policy contract for the latest oracle-reported wind
    /// speed. The raw value is in tenths of km/h.
    async fn latest_wind_speed(&self, policy: Address) -> Result<U256>;
}

/// Abstracts blockchain write operations (transaction submission). Every
/// method blocks until its transaction has the required number of
/// confirmations.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainWrite: Send + Sync {
    /// Deploys the policy factory from the insurer account and returns
    /// its address.
    async fn deploy_policy_factory(&self) -> Result<Address>;

    /// Invokes the factory to create a new policy contract, attaching the
    /// coverage amount as transaction value. Returns the address of the
    /// created policy.
    async fn new_wind_farm(&self, params: NewWindFarmParams) -> Result<Address>;

    /// Transfers `amount` LINK from the insurer to the policy contract.
    async fn fund_with_link(&self, policy: Address, amount: U256) -> Result<()>;

    /// Invokes the factory's administrative state update for all policies
    /// it has created, with a fixed elevated gas price.
    async fn update_all_policies(&self, factory: Address, gas_price: u128) -> Result<()>;

    /// Pays the premium from the client account as a value-bearing call.
    async fn pay_premium(&self, policy: Address, amount: U256) -> Result<()>;
}
