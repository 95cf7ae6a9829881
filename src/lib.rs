pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod freshness;
pub mod provider;
pub mod reader;
pub mod store;
pub mod sync;
pub mod transport;
pub mod types;

pub use config::{VaultsyncConfig, VaultsyncConfigBuilder};
pub use errors::{RpcError, StoreError, SyncError, VaultsyncError};
pub use freshness::{FreshnessPolicy, DEFAULT_TTL};
pub use reader::{ContractClient, Deployment, VaultFigures, VaultReader};
pub use store::{
    DiskStore, MemoryStore, Partition, StoreCell, StoreStats, StoredRecord, UnavailableStore,
    VaultStore,
};
pub use sync::{DataSource, Fetched, Syncer};
pub use types::{PaginationState, TimestampMillis, VaultDetail, VaultId, VaultSummary};
