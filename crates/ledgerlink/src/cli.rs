use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

/// Ledgerlink — chain-state queries and transaction submission over an
/// indexer and a ledger-node bridge.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Indexer base URL (http or https).
    #[arg(long, default_value = "http://127.0.0.1:1442", env = "LEDGERLINK_INDEXER_URL")]
    pub indexer_url: String,

    /// Node-bridge URL (ws or wss).
    #[arg(long, default_value = "ws://127.0.0.1:1337", env = "LEDGERLINK_BRIDGE_URL")]
    pub bridge_url: String,

    /// Client id presented to the auth proxy until a session is established.
    #[arg(long, default_value = "", env = "LEDGERLINK_CLIENT_ID")]
    pub client_id: String,

    /// Client secret presented to the auth proxy until a session is
    /// established.
    #[arg(long, default_value = "", env = "LEDGERLINK_CLIENT_SECRET")]
    pub client_secret: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the current protocol-parameter snapshot.
    Params,

    /// List unspent outputs of an address, or of a payment credential with
    /// `--credential`.
    Utxos {
        /// Address, or credential hash when `--credential` is set.
        target: String,

        /// Treat the target as a payment-credential hash.
        #[arg(long)]
        credential: bool,

        /// Only outputs carrying this asset unit (policy id + asset name).
        #[arg(long)]
        unit: Option<String>,
    },

    /// Fetch the unique unspent output holding an asset unit.
    UtxoByUnit {
        /// Asset unit: policy id + asset name hex, concatenated.
        unit: String,
    },

    /// Fetch unspent outputs by explicit `txhash#index` references.
    UtxosByRef {
        /// One or more `txhash#index` references.
        #[arg(required = true)]
        refs: Vec<String>,
    },

    /// Fetch delegation state of a reward address.
    Delegation {
        reward_address: String,
    },

    /// Fetch a datum body by hash.
    Datum {
        datum_hash: String,
    },

    /// Submit a signed transaction (hex CBOR) and print its id.
    Submit {
        /// File containing the transaction's hex CBOR encoding.
        file: PathBuf,

        /// Poll the indexer until the transaction is confirmed.
        #[arg(long)]
        wait: bool,

        /// Seconds between confirmation polls.
        #[arg(long, default_value = "3")]
        check_interval: u64,
    },

    /// Poll the indexer until a transaction is confirmed.
    AwaitTx {
        tx_hash: String,

        /// Seconds between confirmation polls.
        #[arg(long, default_value = "3")]
        check_interval: u64,
    },
}

impl Command {
    /// Poll interval for the confirmation-related subcommands.
    pub fn poll_interval(&self) -> Option<Duration> {
        match self {
            Self::Submit { check_interval, .. } | Self::AwaitTx { check_interval, .. } => {
                Some(Duration::from_secs(*check_interval))
            }
            _ => None,
        }
    }
}
