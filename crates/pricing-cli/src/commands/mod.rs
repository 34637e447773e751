pub mod presets;
pub mod roi;
pub mod tiers;
pub mod tri_pillar;
