pub mod savings;

pub use savings::{
    calculate_tri_pillar, Pillar, PillarAssumptions, PillarBreakdown, PillarVolume, TierSummary,
    TriPillarAssumptions, TriPillarInput, TriPillarOutput,
};
