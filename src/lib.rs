//! Groups MatchMiner clinical-trial match records into a prioritized
//! trial → arm → age → alteration → patient-genomic hierarchy.

pub mod cli;
pub mod entities;
pub mod error;
pub mod render;
pub mod sources;
pub mod transform;

pub use entities::trial_match::{DetailedTrialMatch, MatchRecord, TrialDefinition};
pub use error::TrialMatchError;
pub use transform::trial_match::group_trial_matches_by_id;
