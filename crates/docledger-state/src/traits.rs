use tracing::warn;

use crate::error::StateResult;

/// A single key/value pair returned by a range scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The value as UTF-8, if it is valid UTF-8.
    pub fn string_value(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

/// Lazy result sequence produced by [`WorldState::get_state_by_range`].
///
/// An iterator holds backend resources until [`close`](Self::close) is
/// called. After closing, `next()` returns `None`. Closing twice is allowed.
pub trait StateIterator: Iterator<Item = StateResult<KeyValue>> {
    fn close(&mut self) -> StateResult<()>;
}

/// Key/value world state as seen by the contract during one invocation.
///
/// All implementations must satisfy these invariants:
/// - Deleting a key removes it entirely; there is no tombstone.
/// - Range scans yield keys in ascending order.
/// - An empty `start_key` or `end_key` leaves that side of the range open.
pub trait WorldState: Send + Sync {
    /// Read the value stored at `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    /// Write `value` at `key`, replacing any previous value.
    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()>;

    /// Remove `key`. Removing a missing key is a no-op.
    fn delete_state(&self, key: &str) -> StateResult<()>;

    /// Open a scan over `[start_key, end_key)`.
    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> StateResult<Box<dyn StateIterator + '_>>;

    /// Open a scan wrapped in a [`ScanGuard`] so it is closed on every path.
    fn scan(&self, start_key: &str, end_key: &str) -> StateResult<ScanGuard<'_>> {
        Ok(ScanGuard::new(self.get_state_by_range(start_key, end_key)?))
    }
}

/// Owns an open [`StateIterator`] and guarantees it is closed.
///
/// Call [`finish`](Self::finish) on the success path to surface close
/// errors. If the guard is dropped instead (early return, `?`, panic unwind)
/// the iterator is still closed and any close error is logged.
pub struct ScanGuard<'a> {
    iter: Option<Box<dyn StateIterator + 'a>>,
}

impl<'a> ScanGuard<'a> {
    pub fn new(iter: Box<dyn StateIterator + 'a>) -> Self {
        Self { iter: Some(iter) }
    }

    /// Close the underlying iterator and report the result.
    pub fn finish(mut self) -> StateResult<()> {
        match self.iter.take() {
            Some(mut iter) => iter.close(),
            None => Ok(()),
        }
    }
}

impl Iterator for ScanGuard<'_> {
    type Item = StateResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.as_mut()?.next()
    }
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut iter) = self.iter.take() {
            if let Err(e) = iter.close() {
                warn!(error = %e, "failed to close state iterator");
            }
        }
    }
}

impl std::fmt::Debug for ScanGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanGuard")
            .field("open", &self.iter.is_some())
            .finish()
    }
}
