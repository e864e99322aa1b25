//! Canonical JSON encoding for [`Asset`].
//!
//! The stored form is a compact JSON object with keys in a fixed order:
//!
//! ```text
//! {"documentID":"…","documentLink":"…","owner":"…","serialNumber":N}
//! ```
//!
//! Stored values are hashed and compared byte-for-byte, so the encoder writes
//! the object by hand instead of going through a derive. The decoder is
//! lenient about key order and whitespace, and ignores unknown keys.

use serde_json::{Map, Value};

use crate::asset::Asset;
use crate::error::{CodecError, CodecResult};

/// Encode an asset into its canonical storage form.
pub fn encode_asset(asset: &Asset) -> String {
    let mut out = String::with_capacity(
        64 + asset.document_id().len() + asset.document_link().len() + asset.owner().len(),
    );
    out.push_str("{\"documentID\":");
    push_json_string(&mut out, asset.document_id());
    out.push_str(",\"documentLink\":");
    push_json_string(&mut out, asset.document_link());
    out.push_str(",\"owner\":");
    push_json_string(&mut out, asset.owner());
    out.push_str(",\"serialNumber\":");
    out.push_str(&asset.serial_number().to_string());
    out.push('}');
    out
}

/// Encode a sequence of assets as a JSON array, preserving order.
pub fn encode_asset_list(assets: &[Asset]) -> String {
    let mut out = String::from("[");
    for (i, asset) in assets.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&encode_asset(asset));
    }
    out.push(']');
    out
}

/// Decode a stored value into an [`Asset`].
///
/// Fails if the bytes are not a JSON object, or if any of the four fields is
/// missing or has the wrong type. `serialNumber` must fit in an `i32`.
pub fn decode_asset(bytes: &[u8]) -> CodecResult<Asset> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| CodecError::InvalidJson(e.to_string()))?;
    let object = match &value {
        Value::Object(map) => map,
        other => return Err(CodecError::NotAnObject(json_kind(other))),
    };

    let document_id = string_field(object, "documentID")?;
    let document_link = string_field(object, "documentLink")?;
    let owner = string_field(object, "owner")?;
    let serial_number = i32_field(object, "serialNumber")?;

    Ok(Asset::new(document_id, document_link, owner, serial_number))
}

fn push_json_string(out: &mut String, s: &str) {
    // Display on a JSON string value yields the quoted, escaped literal.
    out.push_str(&Value::String(s.to_owned()).to_string());
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> CodecResult<String> {
    match object.get(field) {
        None => Err(CodecError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(CodecError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn i32_field(object: &Map<String, Value>, field: &'static str) -> CodecResult<i32> {
    let value = object.get(field).ok_or(CodecError::MissingField(field))?;
    let Value::Number(number) = value else {
        return Err(CodecError::WrongType {
            field,
            expected: "an integer",
        });
    };
    let wide = number.as_i64().ok_or_else(|| {
        if number.is_u64() {
            CodecError::OutOfRange {
                field,
                value: number.to_string(),
            }
        } else {
            CodecError::WrongType {
                field,
                expected: "an integer",
            }
        }
    })?;
    i32::try_from(wide).map_err(|_| CodecError::OutOfRange {
        field,
        value: wide.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
