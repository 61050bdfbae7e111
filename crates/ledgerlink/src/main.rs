mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};

use ledgerlink_core::types::{OutputRef, QueryTarget, TxHash};
use ledgerlink_core::{DualBackendProvider, ProviderConfig, StateProvider};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let provider = DualBackendProvider::new(ProviderConfig {
        indexer_url: args.indexer_url.clone(),
        bridge_url: args.bridge_url.clone(),
        client_id: args.client_id.clone(),
        client_secret: args.client_secret.clone(),
    })
    .wrap_err("while constructing the chain-state provider")?;

    let interval = args.command.poll_interval();

    match args.command {
        cli::Command::Params => {
            let params = provider
                .protocol_parameters()
                .await
                .wrap_err("fetch protocol parameters")?;
            print_json(&params)?;
        }
        cli::Command::Utxos {
            target,
            credential,
            unit,
        } => {
            let target = if credential {
                QueryTarget::PaymentCredential(target)
            } else {
                QueryTarget::Address(target)
            };
            let utxos = provider
                .utxos(&target, unit.as_deref())
                .await
                .wrap_err("fetch unspent outputs")?;
            tracing::info!(count = utxos.len(), "unspent outputs fetched");
            print_json(&utxos)?;
        }
        cli::Command::UtxoByUnit { unit } => {
            let utxo = provider
                .utxo_by_unit(&unit)
                .await
                .wrap_err("fetch unit holder")?;
            print_json(&utxo)?;
        }
        cli::Command::UtxosByRef { refs } => {
            let refs = refs
                .iter()
                .map(|raw| parse_out_ref(raw))
                .collect::<eyre::Result<Vec<_>>>()?;
            let utxos = provider
                .utxos_by_out_ref(&refs)
                .await
                .wrap_err("fetch outputs by reference")?;
            print_json(&utxos)?;
        }
        cli::Command::Delegation { reward_address } => {
            let delegation = provider
                .delegation(&reward_address)
                .await
                .wrap_err("fetch delegation state")?;
            print_json(&delegation)?;
        }
        cli::Command::Datum { datum_hash } => {
            let datum = provider
                .datum(&datum_hash)
                .await
                .wrap_err("fetch datum body")?;
            println!("{datum}");
        }
        cli::Command::Submit { file, wait, .. } => {
            let tx_cbor = tokio::fs::read_to_string(&file)
                .await
                .wrap_err_with(|| format!("read transaction file {}", file.display()))?;
            let tx_cbor = tx_cbor.trim();

            let tx_hash = provider
                .submit_tx(tx_cbor)
                .await
                .wrap_err("submit transaction")?;
            tracing::info!(%tx_hash, "transaction submitted");
            println!("{tx_hash}");

            if wait {
                await_confirmation(&provider, &tx_hash, interval).await?;
            }
        }
        cli::Command::AwaitTx { tx_hash, .. } => {
            let tx_hash = TxHash::from(tx_hash.as_str());
            await_confirmation(&provider, &tx_hash, interval).await?;
        }
    }

    Ok(())
}

/// Poll until confirmed, aborting cleanly on Ctrl-C. The confirmation loop
/// itself has no timeout, so the signal is the operator's escape hatch.
async fn await_confirmation(
    provider: &DualBackendProvider,
    tx_hash: &TxHash,
    interval: Option<Duration>,
) -> eyre::Result<()> {
    tracing::info!(%tx_hash, "waiting for confirmation");
    tokio::select! {
        confirmed = provider.await_tx(tx_hash, interval) => {
            let confirmed = confirmed.wrap_err("poll for confirmation")?;
            if confirmed {
                tracing::info!(%tx_hash, "transaction confirmed");
            }
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            Err(eyre!("interrupted while waiting for confirmation of {tx_hash}"))
        }
    }
}

fn parse_out_ref(raw: &str) -> eyre::Result<OutputRef> {
    let (tx_hash, index) = raw
        .split_once('#')
        .ok_or_else(|| eyre!("invalid output reference `{raw}`: expected txhash#index"))?;
    let output_index: u32 = index
        .parse()
        .wrap_err_with(|| format!("invalid output index in `{raw}`"))?;
    Ok(OutputRef::new(tx_hash, output_index))
}

fn print_json<T: serde::Serialize>(value: &T) -> eyre::Result<()> {
    let rendered =
        serde_json::to_string_pretty(value).wrap_err("serialize result for display")?;
    println!("{rendered}");
    Ok(())
}
