// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract interfaces consumed by the vault data layer
//!
//! The factory keeps an explicit count of registered vaults and returns
//! owner/favorite listings as whole arrays, so listings are read with a
//! length query plus indexed reads rather than probing indices until a
//! revert.

use alloy_sol_types::sol;

sol! {
    /// Registry of every vault deployed on a chain
    ///
    /// One factory per chain; its address is part of the per-chain
    /// deployment configuration.
    #[sol(rpc)]
    interface IVaultFactory {
        /// Number of vaults ever registered
        function vaultCount() external view returns (uint256);

        /// Vault address at a registry index
        function vaultAt(uint256 index) external view returns (address);

        /// Vaults created by an account
        function vaultsOf(address creator) external view returns (address[] memory);

        /// Vaults an account has marked as favorite
        function favoritesOf(address account) external view returns (address[] memory);

        /// Marks or unmarks a vault as favorite for the sender
        function setFavorite(address vault, bool flagged) external;
    }

    /// A single staking vault holding one underlying coin
    #[sol(rpc)]
    interface IHodlVault {
        /// Address of the staked coin
        function coin() external view returns (address);

        /// Account that created the vault
        function creator() external view returns (address);

        /// Symbol of the vault's receipt token
        function hodlSymbol() external view returns (string memory);

        /// Current price per share on the vault's curve
        function price() external view returns (uint256);

        /// Current fee rate in basis points
        function feeRate() external view returns (uint256);

        /// Total amount of the coin staked
        function totalStaked() external view returns (uint256);

        /// Amount an account has staked
        function stakedBalanceOf(address account) external view returns (uint256);

        /// Rewards currently claimable by an account
        function pendingRewards(address account) external view returns (uint256);

        /// Stakes an amount of the coin for the sender
        function stake(uint256 amount) external;

        /// Unstakes an amount of the coin for the sender
        function unstake(uint256 amount) external;

        /// Claims the sender's accumulated rewards
        function claimRewards() external;
    }

    /// Minimal ERC-20 metadata surface for the staked coin
    #[sol(rpc)]
    interface IERC20Metadata {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
    }
}
