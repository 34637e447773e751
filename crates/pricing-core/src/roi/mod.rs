pub mod dispute;

pub use dispute::{calculate_roi, RoiAssumptions, RoiInput, RoiOutput};
