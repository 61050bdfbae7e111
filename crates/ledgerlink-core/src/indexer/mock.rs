use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{QueryTarget, TxHash};

use super::query::target_pattern;
use super::records::{MatchRecord, ScriptBody};
use super::Indexer;

/// A mock indexer backend for testing. Returns canned match records, datums,
/// and scripts from maps populated via the builder pattern.
///
/// `utxos_by_tx` optionally consumes a queued sequence of responses first,
/// so confirmation-poller tests can model "empty, then confirmed".
pub struct MockIndexer {
    by_pattern: HashMap<String, Vec<MatchRecord>>,
    by_unit: HashMap<String, Vec<MatchRecord>>,
    by_tx: HashMap<TxHash, Vec<MatchRecord>>,
    tx_poll_sequence: Mutex<VecDeque<Vec<MatchRecord>>>,
    datums: HashMap<String, String>,
    scripts: HashMap<String, ScriptBody>,
}

impl MockIndexer {
    pub fn builder() -> MockIndexerBuilder {
        MockIndexerBuilder {
            by_pattern: HashMap::new(),
            by_unit: HashMap::new(),
            by_tx: HashMap::new(),
            tx_poll_sequence: VecDeque::new(),
            datums: HashMap::new(),
            scripts: HashMap::new(),
        }
    }
}

pub struct MockIndexerBuilder {
    by_pattern: HashMap<String, Vec<MatchRecord>>,
    by_unit: HashMap<String, Vec<MatchRecord>>,
    by_tx: HashMap<TxHash, Vec<MatchRecord>>,
    tx_poll_sequence: VecDeque<Vec<MatchRecord>>,
    datums: HashMap<String, String>,
    scripts: HashMap<String, ScriptBody>,
}

impl MockIndexerBuilder {
    pub fn with_target_matches(mut self, target: &QueryTarget, records: Vec<MatchRecord>) -> Self {
        self.by_pattern.insert(target_pattern(target), records);
        self
    }

    pub fn with_unit_matches(mut self, unit: &str, records: Vec<MatchRecord>) -> Self {
        self.by_unit.insert(unit.to_owned(), records);
        self
    }

    pub fn with_tx_matches(mut self, tx_hash: TxHash, records: Vec<MatchRecord>) -> Self {
        self.by_tx.insert(tx_hash, records);
        self
    }

    /// Queue one `utxos_by_tx` response; queued responses are consumed in
    /// order before the static `with_tx_matches` map is consulted.
    pub fn with_tx_poll_response(mut self, records: Vec<MatchRecord>) -> Self {
        self.tx_poll_sequence.push_back(records);
        self
    }

    pub fn with_datum(mut self, datum_hash: &str, body: &str) -> Self {
        self.datums.insert(datum_hash.to_owned(), body.to_owned());
        self
    }

    pub fn with_script(mut self, script_hash: &str, body: ScriptBody) -> Self {
        self.scripts.insert(script_hash.to_owned(), body);
        self
    }

    pub fn build(self) -> MockIndexer {
        MockIndexer {
            by_pattern: self.by_pattern,
            by_unit: self.by_unit,
            by_tx: self.by_tx,
            tx_poll_sequence: Mutex::new(self.tx_poll_sequence),
            datums: self.datums,
            scripts: self.scripts,
        }
    }
}

#[async_trait]
impl Indexer for MockIndexer {
    async fn utxos_by_target(
        &self,
        target: &QueryTarget,
        _unit_filter: Option<&str>,
    ) -> Result<Vec<MatchRecord>, CoreError> {
        Ok(self
            .by_pattern
            .get(&target_pattern(target))
            .cloned()
            .unwrap_or_default())
    }

    async fn utxos_by_unit(&self, unit: &str) -> Result<Vec<MatchRecord>, CoreError> {
        Ok(self.by_unit.get(unit).cloned().unwrap_or_default())
    }

    async fn utxos_by_tx(&self, tx_hash: &TxHash) -> Result<Vec<MatchRecord>, CoreError> {
        let queued = self
            .tx_poll_sequence
            .lock()
            .expect("mock poll sequence lock poisoned")
            .pop_front();
        if let Some(records) = queued {
            return Ok(records);
        }
        Ok(self.by_tx.get(tx_hash).cloned().unwrap_or_default())
    }

    async fn datum(&self, datum_hash: &str) -> Result<String, CoreError> {
        self.datums
            .get(datum_hash)
            .cloned()
            .ok_or_else(|| CoreError::DatumNotFound(datum_hash.to_owned()))
    }

    async fn script(&self, script_hash: &str) -> Result<ScriptBody, CoreError> {
        self.scripts.get(script_hash).cloned().ok_or_else(|| {
            CoreError::InvalidResponse(format!("mock has no script {script_hash}"))
        })
    }
}
