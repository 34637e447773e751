pub mod analytics;
pub mod error;
pub mod format;
pub mod types;

#[cfg(feature = "tiers")]
pub mod tiers;

#[cfg(feature = "roi")]
pub mod roi;

#[cfg(feature = "tri_pillar")]
pub mod tri_pillar;

#[cfg(feature = "presets")]
pub mod presets;

pub use error::PricingError;
pub use types::*;

/// Standard result type for all pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
