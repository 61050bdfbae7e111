//! Confirmation polling for submitted transactions.
//!
//! The backends offer no push-based notification channel, so confirmation is
//! detected by repeatedly querying the indexer until the transaction's
//! outputs become visible as unspent. Once they are, the poller stops
//! querying, waits one settle delay, and reports confirmed.
//!
//! There is no terminal failure state and no internal timeout: a transaction
//! that never confirms keeps the poller running until it is cancelled
//! through its [`CancellationToken`] handle (or the future is dropped).

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CoreError;
use crate::indexer::Indexer;
use crate::types::TxHash;

/// Interval between polls when the caller does not supply one.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(3);

/// Delay between first sighting and reporting confirmed, giving the indexer
/// time to finish ingesting the block the transaction landed in.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Two-state poller: pending until the transaction's outputs appear
/// unspent, then confirmed.
pub struct ConfirmationPoller {
    check_interval: Duration,
    settle_delay: Duration,
    cancel: CancellationToken,
}

impl ConfirmationPoller {
    pub fn new(check_interval: Duration) -> Self {
        Self {
            check_interval,
            settle_delay: SETTLE_DELAY,
            cancel: CancellationToken::new(),
        }
    }

    /// A handle that stops the poller from the outside. Cancellation makes
    /// [`wait`](Self::wait) resolve with `Ok(false)`.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Poll until `tx_hash` is confirmed (`Ok(true)`) or the poller is
    /// cancelled (`Ok(false)`). Indexer failures propagate immediately.
    pub async fn wait(&self, indexer: &dyn Indexer, tx_hash: &TxHash) -> Result<bool, CoreError> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(false);
            }

            let matches = indexer.utxos_by_tx(tx_hash).await?;
            if !matches.is_empty() {
                debug!(%tx_hash, outputs = matches.len(), "transaction visible as unspent; settling");
                tokio::select! {
                    () = self.cancel.cancelled() => return Ok(false),
                    () = tokio::time::sleep(self.settle_delay) => return Ok(true),
                }
            }

            tokio::select! {
                () = self.cancel.cancelled() => return Ok(false),
                () = tokio::time::sleep(self.check_interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::indexer::mock::MockIndexer;
    use crate::test_util::{make_match, tx_hash_from_byte};

    #[tokio::test(start_paused = true)]
    async fn immediate_sighting_still_waits_the_settle_delay() {
        let tx_hash = tx_hash_from_byte(7);
        let indexer = MockIndexer::builder()
            .with_tx_matches(tx_hash.clone(), vec![make_match(tx_hash.clone(), 0)])
            .build();

        let poller = ConfirmationPoller::new(Duration::from_secs(3));
        let started = Instant::now();
        let confirmed = poller
            .wait(&indexer, &tx_hash)
            .await
            .expect("poll must succeed");

        assert!(confirmed);
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn second_poll_sighting_confirms_after_interval_plus_settle() {
        let tx_hash = tx_hash_from_byte(8);
        let indexer = MockIndexer::builder()
            .with_tx_poll_response(Vec::new())
            .with_tx_poll_response(vec![make_match(tx_hash.clone(), 0)])
            .build();

        let interval = Duration::from_secs(3);
        let poller = ConfirmationPoller::new(interval);
        let started = Instant::now();
        let confirmed = poller
            .wait(&indexer, &tx_hash)
            .await
            .expect("poll must succeed");

        assert!(confirmed);
        // One empty poll, one interval, the sighting, one settle delay.
        assert!(started.elapsed() >= interval + Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_resolves_without_confirmation() {
        let tx_hash = tx_hash_from_byte(9);
        // Never matches: the poller would run forever without the handle.
        let indexer = MockIndexer::builder().build();

        let poller = ConfirmationPoller::new(Duration::from_secs(3));
        let handle = poller.cancel_handle();
        let wait = poller.wait(&indexer, &tx_hash);
        tokio::pin!(wait);

        tokio::select! {
            _ = &mut wait => panic!("poller must not resolve before cancellation"),
            () = tokio::time::sleep(Duration::from_secs(10)) => handle.cancel(),
        }

        let confirmed = wait.await.expect("cancelled poll must still resolve");
        assert!(!confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn indexer_failure_propagates() {
        let tx_hash = tx_hash_from_byte(10);
        let indexer = FailingIndexer;
        let poller = ConfirmationPoller::new(Duration::from_secs(3));

        let err = poller
            .wait(&indexer, &tx_hash)
            .await
            .expect_err("backend failure must propagate");
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }

    struct FailingIndexer;

    #[async_trait::async_trait]
    impl Indexer for FailingIndexer {
        async fn utxos_by_target(
            &self,
            _target: &crate::types::QueryTarget,
            _unit_filter: Option<&str>,
        ) -> Result<Vec<crate::indexer::MatchRecord>, CoreError> {
            unreachable!("not used by the poller")
        }

        async fn utxos_by_unit(
            &self,
            _unit: &str,
        ) -> Result<Vec<crate::indexer::MatchRecord>, CoreError> {
            unreachable!("not used by the poller")
        }

        async fn utxos_by_tx(
            &self,
            _tx_hash: &TxHash,
        ) -> Result<Vec<crate::indexer::MatchRecord>, CoreError> {
            Err(CoreError::InvalidResponse("backend down".to_owned()))
        }

        async fn datum(&self, _datum_hash: &str) -> Result<String, CoreError> {
            unreachable!("not used by the poller")
        }

        async fn script(
            &self,
            _script_hash: &str,
        ) -> Result<crate::indexer::ScriptBody, CoreError> {
            unreachable!("not used by the poller")
        }
    }
}
