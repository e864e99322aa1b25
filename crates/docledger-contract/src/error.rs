use std::fmt;

use docledger_state::StateError;
use docledger_types::CodecError;

/// Machine-readable failure code, carried as the error payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    AssetNotFound,
    AssetAlreadyExists,
    MalformedAssetData,
    InvalidArguments,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssetNotFound => "ASSET_NOT_FOUND",
            Self::AssetAlreadyExists => "ASSET_ALREADY_EXISTS",
            Self::MalformedAssetData => "MALFORMED_ASSET_DATA",
            Self::InvalidArguments => "INVALID_ARGUMENTS",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by contract operations.
///
/// Every failure aborts the current invocation. The platform decides whether
/// to roll back any writes the invocation already made.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Asset {document_id} does not exist")]
    AssetNotFound { document_id: String },

    #[error("Asset {document_id} already exists")]
    AssetAlreadyExists { document_id: String },

    #[error("Asset {document_id} has malformed data: {source}")]
    MalformedAssetData {
        document_id: String,
        source: CodecError,
    },

    #[error("Undefined contract method called")]
    UndefinedOperation { name: String },

    #[error("invalid arguments for {operation}: {reason}")]
    InvalidArguments { operation: String, reason: String },

    #[error("world state error: {0}")]
    State(#[from] StateError),
}

impl ContractError {
    pub fn not_found(document_id: &str) -> Self {
        Self::AssetNotFound {
            document_id: document_id.to_string(),
        }
    }

    pub fn already_exists(document_id: &str) -> Self {
        Self::AssetAlreadyExists {
            document_id: document_id.to_string(),
        }
    }

    pub fn malformed(document_id: &str, source: CodecError) -> Self {
        Self::MalformedAssetData {
            document_id: document_id.to_string(),
            source,
        }
    }

    /// The failure code, if this error carries one.
    ///
    /// `UndefinedOperation` and store failures have no code.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::AssetNotFound { .. } => Some(ErrorCode::AssetNotFound),
            Self::AssetAlreadyExists { .. } => Some(ErrorCode::AssetAlreadyExists),
            Self::MalformedAssetData { .. } => Some(ErrorCode::MalformedAssetData),
            Self::InvalidArguments { .. } => Some(ErrorCode::InvalidArguments),
            Self::UndefinedOperation { .. } | Self::State(_) => None,
        }
    }

    /// Payload bytes handed back to the platform alongside the message.
    pub fn payload(&self) -> Option<Vec<u8>> {
        self.code().map(|code| code.as_str().as_bytes().to_vec())
    }
}

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_and_payload() {
        let err = ContractError::not_found("doc123");
        assert_eq!(err.to_string(), "Asset doc123 does not exist");
        assert_eq!(err.code(), Some(ErrorCode::AssetNotFound));
        assert_eq!(err.payload(), Some(b"ASSET_NOT_FOUND".to_vec()));
    }

    #[test]
    fn already_exists_message_and_payload() {
        let err = ContractError::already_exists("doc123");
        assert_eq!(err.to_string(), "Asset doc123 already exists");
        assert_eq!(err.payload(), Some(b"ASSET_ALREADY_EXISTS".to_vec()));
    }

    #[test]
    fn malformed_keeps_codec_source() {
        let err = ContractError::malformed("doc9", CodecError::MissingField("owner"));
        assert_eq!(
            err.to_string(),
            "Asset doc9 has malformed data: missing field `owner`"
        );
        assert_eq!(err.payload(), Some(b"MALFORMED_ASSET_DATA".to_vec()));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn undefined_operation_has_no_payload() {
        let err = ContractError::UndefinedOperation {
            name: "Frobnicate".into(),
        };
        assert_eq!(err.to_string(), "Undefined contract method called");
        assert_eq!(err.code(), None);
        assert_eq!(err.payload(), None);
    }

    #[test]
    fn state_errors_convert_without_payload() {
        let err: ContractError = StateError::Backend("offline".into()).into();
        assert_eq!(err.to_string(), "world state error: state backend error: offline");
        assert_eq!(err.payload(), None);
    }
}
