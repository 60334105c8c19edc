//! Bindings for the on-chain side of the wind farm insurance system.
//!
//! The contracts themselves (factory, per-client policy, LINK token) are
//! external; only their call interfaces are declared here. Creation
//! bytecode for the factory is not baked in but loaded from a compiled
//! artifact at runtime, see [`artifacts`].

pub mod artifacts;

use alloy::providers::DynProvider;

alloy::sol! {
    /// Factory contract that creates and tracks individual wind farm
    /// insurance policies.
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract WindFarmPolicyDeployer {
        function newWindFarm(
            address link,
            address oracle,
            uint256 policyAmount,
            address client,
            uint256 lengthInDays,
            string memory latitude,
            string memory longitude
        ) external payable returns (address);

        function getInsurancePolicies() external view returns (address[] memory);

        function updateStateOfAllContracts() external;
    }

    /// Per-client policy contract holding coverage amount, duration,
    /// location and premium logic.
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract InsureWindFarm {
        function payPremium() external payable;

        function updateState() external;

        function getLatestWindSpeed() external view returns (uint256);
    }

    /// Minimal LINK token surface used for funding policy contracts.
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract LinkToken {
        function transfer(address to, uint256 amount) external returns (bool);

        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Contract instance aliases over the erased provider used throughout
/// the deployer.
pub mod instances {
    use super::*;

    pub type WindFarmPolicyDeployerInstance =
        WindFarmPolicyDeployer::WindFarmPolicyDeployerInstance<DynProvider>;
    pub type InsureWindFarmInstance = InsureWindFarm::InsureWindFarmInstance<DynProvider>;
    pub type LinkTokenInstance = LinkToken::LinkTokenInstance<DynProvider>;
}
