use crate::asset::Asset;

/// Document link shared by every bootstrap asset.
pub const SAMPLE_DOCUMENT_LINK: &str = "https://images-template-net.webpkgcache.com/doc/-/s/images.template.net/wp-content/uploads/2022/06/Menu-PDF.pdf";

/// The bootstrap asset set written by `InitLedger`, in ascending key order.
pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset::new("doc123", SAMPLE_DOCUMENT_LINK, "Alice", 101),
        Asset::new("doc124", SAMPLE_DOCUMENT_LINK, "Bob", 102),
        Asset::new("doc125", SAMPLE_DOCUMENT_LINK, "Charlie", 103),
    ]
}
