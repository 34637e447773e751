pub mod catalog;
pub mod selector;

pub use catalog::{default_catalog, Tier, TierCatalog, VolumeLimit};
pub use selector::{annual_price, recommend_tier, select_tier, TierRecommendation};
