use std::collections::HashMap;

use tracing::debug;

use docledger_types::encode_asset;

use crate::context::TransactionContext;
use crate::contract::AssetTransfer;
use crate::error::{ContractError, ContractResult};

/// Operation names every router must serve.
pub const REQUIRED_OPERATIONS: [&str; 8] = [
    "InitLedger",
    "CreateAsset",
    "ReadAsset",
    "UpdateAsset",
    "DeleteAsset",
    "AssetExists",
    "TransferAsset",
    "GetAllAssets",
];

/// A by-name operation handler. Arguments arrive as strings, already checked
/// against the registered arity; the result is rendered as a string.
pub type Handler = Box<
    dyn Fn(&AssetTransfer, &TransactionContext<'_>, &[String]) -> ContractResult<String>
        + Send
        + Sync,
>;

/// Errors from building a router.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("operation name must not be empty")]
    EmptyName,

    #[error("operation already registered: {0}")]
    Duplicate(String),

    #[error("missing required operations: {}", .0.join(", "))]
    Missing(Vec<String>),
}

struct Route {
    name: String,
    arity: usize,
    handler: Handler,
}

/// Maps invocation names to contract operations.
///
/// Names that are not registered fall through to
/// [`AssetTransfer::unknown_transaction`] without touching the world state.
pub struct ContractRouter {
    contract: AssetTransfer,
    routes: Vec<Route>,
    index: HashMap<String, usize>,
}

impl ContractRouter {
    /// Create a router with no operations registered.
    pub fn empty(contract: AssetTransfer) -> Self {
        Self {
            contract,
            routes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a router serving every asset transfer operation.
    pub fn new() -> Result<Self, RouterError> {
        let mut router = Self::empty(AssetTransfer::new());
        router.register("InitLedger", 0, handle_init_ledger)?;
        router.register("CreateAsset", 4, handle_create_asset)?;
        router.register("ReadAsset", 1, handle_read_asset)?;
        router.register("UpdateAsset", 4, handle_update_asset)?;
        router.register("DeleteAsset", 1, handle_delete_asset)?;
        router.register("AssetExists", 1, handle_asset_exists)?;
        router.register("TransferAsset", 2, handle_transfer_asset)?;
        router.register("GetAllAssets", 0, handle_get_all_assets)?;
        router.validate()?;
        Ok(router)
    }

    /// Register `handler` under `name`, taking exactly `arity` arguments.
    pub fn register<F>(&mut self, name: &str, arity: usize, handler: F) -> Result<(), RouterError>
    where
        F: Fn(&AssetTransfer, &TransactionContext<'_>, &[String]) -> ContractResult<String>
            + Send
            + Sync
            + 'static,
    {
        if name.is_empty() {
            return Err(RouterError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(RouterError::Duplicate(name.to_string()));
        }

        self.index.insert(name.to_string(), self.routes.len());
        self.routes.push(Route {
            name: name.to_string(),
            arity,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Check that every name in [`REQUIRED_OPERATIONS`] has a handler.
    pub fn validate(&self) -> Result<(), RouterError> {
        let missing: Vec<String> = REQUIRED_OPERATIONS
            .iter()
            .filter(|name| !self.index.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RouterError::Missing(missing))
        }
    }

    /// Registered operation names, in registration order.
    pub fn operations(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.name.as_str()).collect()
    }

    /// Number of registered operations.
    pub fn operation_count(&self) -> usize {
        self.routes.len()
    }

    /// Invoke an operation by name.
    pub fn invoke(
        &self,
        ctx: &TransactionContext<'_>,
        name: &str,
        args: &[String],
    ) -> ContractResult<String> {
        let Some(&slot) = self.index.get(name) else {
            return Err(self.contract.unknown_transaction(ctx, name));
        };
        let route = &self.routes[slot];

        if args.len() != route.arity {
            return Err(ContractError::InvalidArguments {
                operation: route.name.clone(),
                reason: format!("expected {} arguments, got {}", route.arity, args.len()),
            });
        }

        debug!(tx_id = ctx.tx_id(), operation = name, "invoking");
        (route.handler)(&self.contract, ctx, args)
    }
}

impl std::fmt::Debug for ContractRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractRouter")
            .field("operations", &self.operations())
            .finish()
    }
}

fn parse_serial(operation: &str, raw: &str) -> ContractResult<i32> {
    raw.parse::<i32>()
        .map_err(|e| ContractError::InvalidArguments {
            operation: operation.to_string(),
            reason: format!("serialNumber {raw:?} is not a 32-bit integer: {e}"),
        })
}

fn handle_init_ledger(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    _args: &[String],
) -> ContractResult<String> {
    contract.init_ledger(ctx)?;
    Ok(String::new())
}

fn handle_create_asset(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    args: &[String],
) -> ContractResult<String> {
    let serial = parse_serial("CreateAsset", &args[3])?;
    let asset = contract.create_asset(ctx, &args[0], &args[1], &args[2], serial)?;
    Ok(encode_asset(&asset))
}

fn handle_read_asset(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    args: &[String],
) -> ContractResult<String> {
    Ok(encode_asset(&contract.read_asset(ctx, &args[0])?))
}

fn handle_update_asset(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    args: &[String],
) -> ContractResult<String> {
    let serial = parse_serial("UpdateAsset", &args[3])?;
    let asset = contract.update_asset(ctx, &args[0], &args[1], &args[2], serial)?;
    Ok(encode_asset(&asset))
}

fn handle_delete_asset(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    args: &[String],
) -> ContractResult<String> {
    contract.delete_asset(ctx, &args[0])?;
    Ok(String::new())
}

fn handle_asset_exists(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    args: &[String],
) -> ContractResult<String> {
    Ok(contract.asset_exists(ctx, &args[0])?.to_string())
}

fn handle_transfer_asset(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    args: &[String],
) -> ContractResult<String> {
    contract.transfer_asset(ctx, &args[0], &args[1])
}

fn handle_get_all_assets(
    contract: &AssetTransfer,
    ctx: &TransactionContext<'_>,
    _args: &[String],
) -> ContractResult<String> {
    contract.get_all_assets(ctx)
}
