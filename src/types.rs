/// Brand name as listed in the catalog (leaf taxonomy entity).
/// Example: `Bombay Sapphire`
pub type BrandName = String;
/// Single query keyword token after normalization.
/// Examples: `Jack`, `Daniel-s`, `juniper`
pub type Keyword = String;
/// Taxonomy node name.
/// Examples: `distilled`, `gin`
pub type NodeName = String;
/// Identifier of an estimator source reporting quantities.
/// Examples: `shop_a`, `marketplace_eu`
pub type SourceKey = String;
/// Result URL reported by an estimator source.
/// Example: `https://shop.example/gin/bombay-sapphire`
pub type UrlString = String;
/// Type label used when assembling catalogs from brand listings.
/// Examples: `gin`, `whisky`
pub type TypeLabel = String;
