use tracing::{debug, info, warn};

use docledger_types::{decode_asset, encode_asset, encode_asset_list, sample_assets, Asset};

use crate::context::TransactionContext;
use crate::error::{ContractError, ContractResult};

/// The asset transfer contract.
///
/// Stateless: everything it knows lives in the world state reached through
/// the [`TransactionContext`]. Each operation touches a single key, apart
/// from `init_ledger` (one put per bootstrap asset) and `get_all_assets`
/// (one full range scan).
#[derive(Clone, Copy, Debug, Default)]
pub struct AssetTransfer;

impl AssetTransfer {
    pub fn new() -> Self {
        Self
    }

    /// Seed the world state with the bootstrap asset set.
    ///
    /// Existing values at the bootstrap keys are overwritten.
    pub fn init_ledger(&self, ctx: &TransactionContext<'_>) -> ContractResult<()> {
        let assets = sample_assets();
        for asset in &assets {
            ctx.stub()
                .put_state(asset.document_id(), encode_asset(asset).as_bytes())?;
        }
        info!(tx_id = ctx.tx_id(), count = assets.len(), "ledger initialized");
        Ok(())
    }

    /// Register a new asset. Fails if the key is already taken.
    pub fn create_asset(
        &self,
        ctx: &TransactionContext<'_>,
        document_id: &str,
        document_link: &str,
        owner: &str,
        serial_number: i32,
    ) -> ContractResult<Asset> {
        if self.asset_exists(ctx, document_id)? {
            return Err(ContractError::already_exists(document_id));
        }

        let asset = Asset::new(document_id, document_link, owner, serial_number);
        ctx.stub()
            .put_state(document_id, encode_asset(&asset).as_bytes())?;
        debug!(tx_id = ctx.tx_id(), document_id, "asset created");
        Ok(asset)
    }

    pub fn read_asset(
        &self,
        ctx: &TransactionContext<'_>,
        document_id: &str,
    ) -> ContractResult<Asset> {
        let raw = present_value(ctx, document_id)?
            .ok_or_else(|| ContractError::not_found(document_id))?;
        decode_asset(&raw).map_err(|e| ContractError::malformed(document_id, e))
    }

    /// Replace every field of an existing asset except its identifier.
    pub fn update_asset(
        &self,
        ctx: &TransactionContext<'_>,
        document_id: &str,
        document_link: &str,
        owner: &str,
        serial_number: i32,
    ) -> ContractResult<Asset> {
        if !self.asset_exists(ctx, document_id)? {
            return Err(ContractError::not_found(document_id));
        }

        let asset = Asset::new(document_id, document_link, owner, serial_number);
        ctx.stub()
            .put_state(document_id, encode_asset(&asset).as_bytes())?;
        debug!(tx_id = ctx.tx_id(), document_id, "asset updated");
        Ok(asset)
    }

    pub fn delete_asset(
        &self,
        ctx: &TransactionContext<'_>,
        document_id: &str,
    ) -> ContractResult<()> {
        if !self.asset_exists(ctx, document_id)? {
            return Err(ContractError::not_found(document_id));
        }

        ctx.stub().delete_state(document_id)?;
        debug!(tx_id = ctx.tx_id(), document_id, "asset deleted");
        Ok(())
    }

    /// Whether a non-empty value is stored under `document_id`.
    ///
    /// Only a store failure can make this return an error.
    pub fn asset_exists(
        &self,
        ctx: &TransactionContext<'_>,
        document_id: &str,
    ) -> ContractResult<bool> {
        Ok(present_value(ctx, document_id)?.is_some())
    }

    /// Hand an asset to `new_owner` and return the previous owner.
    pub fn transfer_asset(
        &self,
        ctx: &TransactionContext<'_>,
        document_id: &str,
        new_owner: &str,
    ) -> ContractResult<String> {
        let asset = self.read_asset(ctx, document_id)?;
        let transferred = asset.with_owner(new_owner);
        ctx.stub()
            .put_state(document_id, encode_asset(&transferred).as_bytes())?;

        debug!(
            tx_id = ctx.tx_id(),
            document_id,
            from = asset.owner(),
            to = new_owner,
            "asset transferred"
        );
        Ok(asset.owner().to_string())
    }

    /// Every stored asset, in ascending key order.
    ///
    /// One undecodable value fails the whole call, an empty one included.
    /// The scan is closed on every path.
    pub fn list_assets(&self, ctx: &TransactionContext<'_>) -> ContractResult<Vec<Asset>> {
        let mut scan = ctx.stub().scan("", "")?;
        let mut assets = Vec::new();
        for entry in &mut scan {
            let kv = entry?;
            let asset =
                decode_asset(&kv.value).map_err(|e| ContractError::malformed(&kv.key, e))?;
            assets.push(asset);
        }
        scan.finish()?;
        Ok(assets)
    }

    /// Every stored asset as a JSON array in canonical encoding.
    pub fn get_all_assets(&self, ctx: &TransactionContext<'_>) -> ContractResult<String> {
        let assets = self.list_assets(ctx)?;
        debug!(tx_id = ctx.tx_id(), count = assets.len(), "assets listed");
        Ok(encode_asset_list(&assets))
    }

    /// Fallthrough for operation names with no handler. Never touches state.
    pub fn unknown_transaction(&self, ctx: &TransactionContext<'_>, name: &str) -> ContractError {
        warn!(tx_id = ctx.tx_id(), operation = name, "undefined contract method");
        ContractError::UndefinedOperation {
            name: name.to_string(),
        }
    }
}

/// Fetch the raw value, treating a missing key and an empty value alike.
fn present_value(ctx: &TransactionContext<'_>, document_id: &str) -> ContractResult<Option<Vec<u8>>> {
    Ok(ctx
        .stub()
        .get_state(document_id)?
        .filter(|value| !value.is_empty()))
}
