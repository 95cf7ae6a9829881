// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the read-through fetch orchestrator

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{address, Address};
use helpers::{backdated, base_vault_summary, sample_detail, summary, wallet, MockReader};
use vaultsync::store::keys;
use vaultsync::{
    DataSource, MemoryStore, Partition, PaginationState, SyncError, Syncer, TimestampMillis,
    UnavailableStore, VaultId, VaultStore,
};

fn syncer_with(
    reader: MockReader,
) -> (Syncer, Arc<MemoryStore>, Arc<MockReader>) {
    let store = Arc::new(MemoryStore::new());
    let reader = Arc::new(reader);
    let syncer = Syncer::new(store.clone(), reader.clone());
    (syncer, store, reader)
}

#[tokio::test]
async fn empty_cache_fetches_from_chain_and_writes_back() {
    helpers::init_tracing();
    let (syncer, store, reader) =
        syncer_with(MockReader::new().with_summaries(vec![base_vault_summary()]));

    let fetched = syncer.load_chain_vaults(8453, false).await.unwrap();

    assert_eq!(fetched.source, DataSource::Blockchain);
    assert_eq!(fetched.data, vec![base_vault_summary()]);
    assert_eq!(reader.remote_calls(), 1);

    // The listing was written back under the chain's key with a fresh stamp
    let record = store
        .get(Partition::ChainVaults, &keys::chain_vaults(8453))
        .await
        .unwrap()
        .expect("record written back");
    assert!(!record.written_at.is_older_than(Duration::from_secs(5)));
}

#[tokio::test]
async fn second_load_within_ttl_is_served_from_cache() {
    let (syncer, _store, reader) =
        syncer_with(MockReader::new().with_summaries(vec![base_vault_summary()]));

    let first = syncer.load_chain_vaults(8453, false).await.unwrap();
    let second = syncer.load_chain_vaults(8453, false).await.unwrap();

    assert_eq!(second.source, DataSource::Cache);
    assert_eq!(second.data, first.data);
    // The hit short-circuits the remote path entirely
    assert_eq!(reader.remote_calls(), 1);
}

#[tokio::test]
async fn record_older_than_ttl_triggers_refetch() {
    let (syncer, store, reader) =
        syncer_with(MockReader::new().with_summaries(vec![base_vault_summary()]));

    // Seed a 20-minute-old record (TTL is 15 minutes)
    let key = keys::chain_vaults(8453);
    let stale = serde_json::to_value(vec![summary(8453, 9)]).unwrap();
    store
        .put(
            Partition::ChainVaults,
            &key,
            stale,
            backdated(Duration::from_secs(20 * 60)),
        )
        .await
        .unwrap();

    let fetched = syncer.load_chain_vaults(8453, false).await.unwrap();

    // The stale value is not returned; the chain is
    assert_eq!(fetched.source, DataSource::Blockchain);
    assert_eq!(fetched.data, vec![base_vault_summary()]);
    assert_eq!(reader.remote_calls(), 1);
}

#[tokio::test]
async fn record_five_minutes_old_is_still_fresh() {
    let (syncer, store, reader) = syncer_with(MockReader::new());

    let key = keys::chain_vaults(8453);
    let cached = vec![base_vault_summary()];
    store
        .put(
            Partition::ChainVaults,
            &key,
            serde_json::to_value(&cached).unwrap(),
            backdated(Duration::from_secs(5 * 60)),
        )
        .await
        .unwrap();

    let fetched = syncer.load_chain_vaults(8453, false).await.unwrap();

    assert_eq!(fetched.source, DataSource::Cache);
    assert_eq!(fetched.data, cached);
    assert_eq!(reader.remote_calls(), 0);
}

#[tokio::test]
async fn cache_hit_never_touches_a_broken_chain() {
    let (syncer, store, reader) = syncer_with(MockReader::new());
    reader.set_failing(true);

    let key = keys::chain_vaults(8453);
    store
        .put(
            Partition::ChainVaults,
            &key,
            serde_json::to_value(vec![base_vault_summary()]).unwrap(),
            TimestampMillis::now(),
        )
        .await
        .unwrap();

    // The chain is down, but the fresh record means we never find out
    let fetched = syncer.load_chain_vaults(8453, false).await.unwrap();
    assert_eq!(fetched.source, DataSource::Cache);
    assert_eq!(reader.remote_calls(), 0);
}

#[tokio::test]
async fn failed_forced_refresh_preserves_the_cached_value() {
    let (syncer, store, reader) =
        syncer_with(MockReader::new().with_summaries(vec![base_vault_summary()]));

    let key = keys::chain_vaults(8453);
    let cached = serde_json::to_value(vec![base_vault_summary()]).unwrap();
    store
        .put(
            Partition::ChainVaults,
            &key,
            cached.clone(),
            TimestampMillis::now(),
        )
        .await
        .unwrap();

    reader.set_failing(true);
    let result = syncer.load_chain_vaults(8453, true).await;
    assert!(matches!(result, Err(SyncError::RemoteCallFailed(_))));

    // Passive refresh failure leaves the stale-but-present record alone
    let record = store
        .get(Partition::ChainVaults, &key)
        .await
        .unwrap()
        .expect("record preserved");
    assert_eq!(record.value, cached);

    // And once the chain recovers, the cached value is still servable
    reader.set_failing(false);
    let fetched = syncer.load_chain_vaults(8453, false).await.unwrap();
    assert_eq!(fetched.source, DataSource::Cache);
}

#[tokio::test]
async fn failed_sync_leaves_the_entry_empty_not_stale() {
    let (syncer, store, reader) =
        syncer_with(MockReader::new().with_summaries(vec![base_vault_summary()]));

    let key = keys::chain_vaults(8453);
    store
        .put(
            Partition::ChainVaults,
            &key,
            serde_json::to_value(vec![base_vault_summary()]).unwrap(),
            TimestampMillis::now(),
        )
        .await
        .unwrap();

    reader.set_failing(true);
    let result = syncer.sync_chain_vaults(8453).await;
    assert!(matches!(result, Err(SyncError::RemoteCallFailed(_))));

    // Sync is clear-then-refetch: the failed fetch left nothing behind
    assert!(store
        .get(Partition::ChainVaults, &key)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn successful_sync_replaces_the_cached_value() {
    let (syncer, store, reader) =
        syncer_with(MockReader::new().with_summaries(vec![base_vault_summary()]));

    let key = keys::chain_vaults(8453);
    store
        .put(
            Partition::ChainVaults,
            &key,
            serde_json::to_value(vec![summary(8453, 9)]).unwrap(),
            TimestampMillis::now(),
        )
        .await
        .unwrap();

    let fetched = syncer.sync_chain_vaults(8453).await.unwrap();
    assert_eq!(fetched.source, DataSource::Blockchain);
    assert_eq!(fetched.data, vec![base_vault_summary()]);
    assert_eq!(reader.remote_calls(), 1);
}

#[tokio::test]
async fn user_vaults_cache_under_lowercased_wallet_key() {
    let (syncer, store, _reader) =
        syncer_with(MockReader::new().with_summaries(vec![summary(1, 3)]));

    let owner = wallet();
    syncer.load_user_vaults(owner, false).await.unwrap();

    // The record key is the lowercase form of the address
    let key = keys::wallet(owner);
    assert_eq!(key, key.to_ascii_lowercase());
    assert!(store
        .get(Partition::UserVaults, &key)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn favorites_clear_then_get_is_a_miss() {
    let (syncer, store, _reader) =
        syncer_with(MockReader::new().with_summaries(vec![summary(8453, 7)]));

    let owner = wallet();
    let key = keys::wallet(owner);

    syncer.load_favorites(owner, false).await.unwrap();
    assert!(store
        .get(Partition::FavoriteVaults, &key)
        .await
        .unwrap()
        .is_some());

    syncer
        .clear_cache(Partition::FavoriteVaults, &key)
        .await
        .unwrap();
    assert!(store
        .get(Partition::FavoriteVaults, &key)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn vault_detail_round_trips_through_cache() {
    let (syncer, _store, reader) = syncer_with(MockReader::new().with_detail(sample_detail()));
    let id = VaultId::new(8453, address!("00000000000000000000000000000000000000aa"));

    let first = syncer.load_vault_detail(id, false).await.unwrap();
    assert_eq!(first.source, DataSource::Blockchain);
    assert_eq!(first.data, sample_detail());

    let second = syncer.load_vault_detail(id, false).await.unwrap();
    assert_eq!(second.source, DataSource::Cache);
    assert_eq!(second.data, sample_detail());
    assert_eq!(reader.remote_calls(), 1);
}

#[tokio::test]
async fn pagination_state_survives_past_the_ttl() {
    let (syncer, store, _reader) = syncer_with(MockReader::new());

    let state = PaginationState {
        page: 4,
        search: "tst".to_string(),
        chain_filter: Some(8453),
    };
    syncer
        .set_pagination_state("vault-list", &state)
        .await
        .unwrap();

    // Backdate the record far past the 15-minute TTL
    let key = keys::view("vault-list");
    let record = store
        .get(Partition::Pagination, &key)
        .await
        .unwrap()
        .unwrap();
    store
        .put(
            Partition::Pagination,
            &key,
            record.value,
            backdated(Duration::from_secs(7 * 24 * 3600)),
        )
        .await
        .unwrap();

    let loaded = syncer.pagination_state("vault-list").await.unwrap();
    assert_eq!(loaded, Some(state));
}

#[tokio::test]
async fn figures_are_passed_through_and_never_cached() {
    let (syncer, _store, reader) = syncer_with(MockReader::new());
    let id = VaultId::new(8453, address!("00000000000000000000000000000000000000aa"));

    let without_account = syncer.vault_figures(id, None).await.unwrap();
    assert_eq!(without_account.source, DataSource::Blockchain);
    assert!(without_account.data.staked_balance.is_none());

    let with_account = syncer.vault_figures(id, Some(wallet())).await.unwrap();
    assert!(with_account.data.staked_balance.is_some());
    assert!(with_account.data.wallet_balance.is_some());

    // Two reads, two remote calls, nothing written to the store
    assert_eq!(reader.remote_calls(), 2);
    assert_eq!(syncer.store_stats().await.writes, 0);
}

#[tokio::test]
async fn unavailable_storage_degrades_to_network_only() {
    let reader = Arc::new(MockReader::new().with_summaries(vec![base_vault_summary()]));
    let syncer = Syncer::new(Arc::new(UnavailableStore), reader.clone());

    // Every load still succeeds, straight from the chain
    let fetched = syncer.load_chain_vaults(8453, false).await.unwrap();
    assert_eq!(fetched.source, DataSource::Blockchain);
    assert_eq!(fetched.data, vec![base_vault_summary()]);

    let again = syncer.load_chain_vaults(8453, false).await.unwrap();
    assert_eq!(again.source, DataSource::Blockchain);
    assert_eq!(reader.remote_calls(), 2);

    // Reads of pagination degrade to "nothing saved"
    assert_eq!(syncer.pagination_state("vault-list").await.unwrap(), None);

    // Store-directed operations do surface the condition
    let result = syncer
        .set_pagination_state("vault-list", &PaginationState::at_page(1))
        .await;
    assert!(matches!(result, Err(SyncError::StorageUnavailable(_))));

    let result = syncer.clear_cache(Partition::FavoriteVaults, "0xabc").await;
    assert!(matches!(result, Err(SyncError::StorageUnavailable(_))));
}

#[tokio::test]
async fn undecodable_cache_record_falls_back_to_the_chain() {
    let (syncer, store, reader) =
        syncer_with(MockReader::new().with_summaries(vec![base_vault_summary()]));

    // A record that does not deserialize as Vec<VaultSummary>
    let key = keys::chain_vaults(8453);
    store
        .put(
            Partition::ChainVaults,
            &key,
            serde_json::json!({ "not": "a list" }),
            TimestampMillis::now(),
        )
        .await
        .unwrap();

    let fetched = syncer.load_chain_vaults(8453, false).await.unwrap();
    assert_eq!(fetched.source, DataSource::Blockchain);
    assert_eq!(reader.remote_calls(), 1);
}

#[tokio::test]
async fn invalid_requests_fail_before_any_io() {
    let (syncer, _store, reader) = syncer_with(MockReader::new());

    assert!(matches!(
        syncer.load_chain_vaults(0, false).await,
        Err(SyncError::InvalidRequest { .. })
    ));
    assert!(matches!(
        syncer.load_user_vaults(Address::ZERO, false).await,
        Err(SyncError::InvalidRequest { .. })
    ));
    assert!(matches!(
        syncer.load_favorites(Address::ZERO, true).await,
        Err(SyncError::InvalidRequest { .. })
    ));
    assert!(matches!(
        syncer
            .load_vault_detail(VaultId::new(8453, Address::ZERO), false)
            .await,
        Err(SyncError::InvalidRequest { .. })
    ));
    assert!(matches!(
        syncer.pagination_state("  ").await,
        Err(SyncError::InvalidRequest { .. })
    ));

    assert_eq!(reader.remote_calls(), 0);
}

#[tokio::test]
async fn no_chains_configured_surfaces_as_remote_unavailable() {
    // A reader that reports no reachable chains at all
    struct NoChains;

    #[async_trait::async_trait]
    impl vaultsync::VaultReader for NoChains {
        async fn chain_vaults(
            &self,
            chain_id: u64,
        ) -> Result<Vec<vaultsync::VaultSummary>, vaultsync::RpcError> {
            Err(vaultsync::RpcError::NoProviderForChain { chain_id })
        }
        async fn user_vaults(
            &self,
            _owner: Address,
        ) -> Result<Vec<vaultsync::VaultSummary>, vaultsync::RpcError> {
            Err(vaultsync::RpcError::NoChainsConfigured)
        }
        async fn favorite_vaults(
            &self,
            _owner: Address,
        ) -> Result<Vec<vaultsync::VaultSummary>, vaultsync::RpcError> {
            Err(vaultsync::RpcError::NoChainsConfigured)
        }
        async fn vault_detail(
            &self,
            id: VaultId,
        ) -> Result<vaultsync::VaultDetail, vaultsync::RpcError> {
            Err(vaultsync::RpcError::NoProviderForChain {
                chain_id: id.chain_id,
            })
        }
        async fn vault_figures(
            &self,
            id: VaultId,
            _account: Option<Address>,
        ) -> Result<vaultsync::reader::VaultFigures, vaultsync::RpcError> {
            Err(vaultsync::RpcError::NoProviderForChain {
                chain_id: id.chain_id,
            })
        }
    }

    let syncer = Syncer::new(Arc::new(MemoryStore::new()), Arc::new(NoChains));

    assert!(matches!(
        syncer.load_chain_vaults(10, false).await,
        Err(SyncError::RemoteUnavailable(_))
    ));
    assert!(matches!(
        syncer.load_user_vaults(wallet(), false).await,
        Err(SyncError::RemoteUnavailable(_))
    ));
}
