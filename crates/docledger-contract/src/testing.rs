//! World state test double that records every call made by the contract.

use std::sync::Mutex;

use docledger_state::{
    InMemoryWorldState, KeyValue, StateIterator, StateResult, WorldState,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Get(String),
    Put(String, String),
    Delete(String),
    Scan(String, String),
    Close,
}

#[derive(Default)]
pub struct RecordingWorldState {
    inner: InMemoryWorldState,
    calls: Mutex<Vec<Call>>,
}

impl RecordingWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write directly to the backing store without recording a call.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner.put_state(key, value.as_bytes()).unwrap();
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .get_state(key)
            .unwrap()
            .map(|v| String::from_utf8(v).unwrap())
    }

    pub fn inner(&self) -> &InMemoryWorldState {
        &self.inner
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Put(..) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl WorldState for RecordingWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        self.record(Call::Get(key.to_string()));
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        self.record(Call::Put(
            key.to_string(),
            String::from_utf8_lossy(value).into_owned(),
        ));
        self.inner.put_state(key, value)
    }

    fn delete_state(&self, key: &str) -> StateResult<()> {
        self.record(Call::Delete(key.to_string()));
        self.inner.delete_state(key)
    }

    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> StateResult<Box<dyn StateIterator + '_>> {
        self.record(Call::Scan(start_key.to_string(), end_key.to_string()));
        let inner = self.inner.get_state_by_range(start_key, end_key)?;
        Ok(Box::new(RecordingIter { inner, owner: self }))
    }
}

struct RecordingIter<'a> {
    inner: Box<dyn StateIterator + 'a>,
    owner: &'a RecordingWorldState,
}

impl Iterator for RecordingIter<'_> {
    type Item = StateResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl StateIterator for RecordingIter<'_> {
    fn close(&mut self) -> StateResult<()> {
        self.owner.record(Call::Close);
        self.inner.close()
    }
}
