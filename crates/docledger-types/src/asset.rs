use std::fmt;

use serde::{Deserialize, Serialize};

/// A document registered on the ledger.
///
/// The `document_id` doubles as the world state key and never changes once
/// an asset is stored; updates and transfers rewrite the value in place.
/// `document_link` and `serial_number` are opaque to the contract and carry
/// no validation.
///
/// Two assets are equal exactly when all four fields are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "documentID")]
    document_id: String,
    #[serde(rename = "documentLink")]
    document_link: String,
    owner: String,
    #[serde(rename = "serialNumber")]
    serial_number: i32,
}

impl Asset {
    pub fn new(
        document_id: impl Into<String>,
        document_link: impl Into<String>,
        owner: impl Into<String>,
        serial_number: i32,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            document_link: document_link.into(),
            owner: owner.into(),
            serial_number,
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn document_link(&self) -> &str {
        &self.document_link
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn serial_number(&self) -> i32 {
        self.serial_number
    }

    /// Copy of this asset with only the owner replaced.
    pub fn with_owner(&self, owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Asset [documentID={}, documentLink={}, owner={}, serialNumber={}]",
            self.document_id, self.document_link, self.owner, self.serial_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LINK: &str = "http://example.com/doc123";

    fn alice() -> Asset {
        Asset::new("doc123", LINK, "Alice", 101)
    }

    #[test]
    fn equality_is_reflexive() {
        let asset = alice();
        assert_eq!(asset, asset);
    }

    #[test]
    fn equality_is_symmetric() {
        let a = alice();
        let b = alice();
        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[test]
    fn equality_is_transitive() {
        let a = alice();
        let b = alice();
        let c = alice();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, c);
    }

    #[test]
    fn different_assets_are_not_equal() {
        let a = alice();
        let b = Asset::new("doc124", "http://example.com/doc124", "Bob", 102);
        assert_ne!(a, b);
    }

    #[test]
    fn absent_asset_is_never_equal() {
        let asset = alice();
        assert_ne!(Some(&asset), None);
    }

    #[test]
    fn with_owner_replaces_only_owner() {
        let moved = alice().with_owner("Bob");
        assert_eq!(moved.owner(), "Bob");
        assert_eq!(moved.document_id(), "doc123");
        assert_eq!(moved.document_link(), LINK);
        assert_eq!(moved.serial_number(), 101);
    }

    #[test]
    fn display_lists_all_fields() {
        assert_eq!(
            alice().to_string(),
            "Asset [documentID=doc123, documentLink=http://example.com/doc123, owner=Alice, serialNumber=101]"
        );
    }

    #[test]
    fn serde_uses_ledger_field_names() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(json["documentID"], "doc123");
        assert_eq!(json["documentLink"], LINK);
        assert_eq!(json["owner"], "Alice");
        assert_eq!(json["serialNumber"], 101);
    }

    fn field_tuple() -> impl Strategy<Value = (String, String, String, i32)> {
        (".{0,12}", ".{0,24}", ".{0,12}", any::<i32>())
    }

    proptest! {
        #[test]
        fn same_fields_make_equal_assets((id, link, owner, serial) in field_tuple()) {
            let a = Asset::new(id.clone(), link.clone(), owner.clone(), serial);
            let b = Asset::new(id.clone(), link.clone(), owner.clone(), serial);
            let c = Asset::new(id, link, owner, serial);
            prop_assert_eq!(&a, &a);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&b, &a);
            prop_assert_eq!(&b, &c);
            prop_assert_eq!(&a, &c);
        }

        #[test]
        fn changing_any_field_breaks_equality(
            (id, link, owner, serial) in field_tuple(),
            which in 0usize..4,
        ) {
            let base = Asset::new(id.clone(), link.clone(), owner.clone(), serial);
            let changed = match which {
                0 => Asset::new(format!("{id}x"), link, owner, serial),
                1 => Asset::new(id, format!("{link}x"), owner, serial),
                2 => Asset::new(id, link, format!("{owner}x"), serial),
                _ => Asset::new(id, link, owner, serial.wrapping_add(1)),
            };
            prop_assert_ne!(base, changed);
        }
    }
}
