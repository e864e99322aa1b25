use docledger_state::WorldState;

/// Per-invocation handle onto the world state.
///
/// The platform creates one context per transaction. The transaction id is
/// used only to correlate log lines.
#[derive(Clone, Copy)]
pub struct TransactionContext<'a> {
    stub: &'a dyn WorldState,
    tx_id: &'a str,
}

impl<'a> TransactionContext<'a> {
    pub fn new(stub: &'a dyn WorldState, tx_id: &'a str) -> Self {
        Self { stub, tx_id }
    }

    /// The world state this invocation reads and writes.
    pub fn stub(&self) -> &'a dyn WorldState {
        self.stub
    }

    pub fn tx_id(&self) -> &'a str {
        self.tx_id
    }
}

impl std::fmt::Debug for TransactionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionContext")
            .field("tx_id", &self.tx_id)
            .finish_non_exhaustive()
    }
}
