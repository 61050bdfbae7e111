use std::env;
use std::sync::Once;

use ledgerlink_core::types::QueryTarget;
use ledgerlink_core::{DualBackendProvider, ProviderConfig, StateProvider};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ledgerlink_core=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

fn provider_from_env() -> DualBackendProvider {
    let config = ProviderConfig {
        indexer_url: env::var("LEDGERLINK_TEST_INDEXER_URL")
            .expect("LEDGERLINK_TEST_INDEXER_URL must be set"),
        bridge_url: env::var("LEDGERLINK_TEST_BRIDGE_URL")
            .expect("LEDGERLINK_TEST_BRIDGE_URL must be set"),
        client_id: env::var("LEDGERLINK_TEST_CLIENT_ID")
            .expect("LEDGERLINK_TEST_CLIENT_ID must be set"),
        client_secret: env::var("LEDGERLINK_TEST_CLIENT_SECRET")
            .expect("LEDGERLINK_TEST_CLIENT_SECRET must be set"),
    };
    DualBackendProvider::new(config).expect("provider must construct from env config")
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires live indexer and node-bridge endpoints"]
async fn live_protocol_parameters_decode() {
    init_tracing();
    let provider = provider_from_env();

    let params = provider
        .protocol_parameters()
        .await
        .expect("live protocol parameters must decode");

    assert!(params.min_fee_coefficient > 0, "fee coefficient must be set");
    assert!(params.max_tx_size > 0, "transaction size limit must be set");
    assert!(
        params.price_memory > 0.0 && params.price_steps > 0.0,
        "execution prices must be positive"
    );
    assert!(
        !params.cost_models.is_empty(),
        "at least one plutus cost model must be present"
    );
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires live indexer and node-bridge endpoints"]
async fn live_address_utxos_normalize() {
    init_tracing();
    let provider = provider_from_env();

    let address = env::var("LEDGERLINK_TEST_ADDRESS")
        .expect("LEDGERLINK_TEST_ADDRESS must be set to a funded address");
    let utxos = provider
        .utxos(&QueryTarget::Address(address.clone()), None)
        .await
        .expect("live address query must succeed");

    assert!(
        !utxos.is_empty(),
        "fixture address must hold at least one unspent output"
    );
    for utxo in &utxos {
        assert_eq!(utxo.address, address, "normalized address must match query");
        assert!(utxo.lovelace() > 0, "every output must carry native coins");
    }
}
