use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::entities::trial_match::{MatchRecord, TrialDefinition};
use crate::error::TrialMatchError;

pub const TRIALS_PATH_ENV: &str = "TRIALMATCH_TRIALS";
pub const MATCHES_PATH_ENV: &str = "TRIALMATCH_MATCHES";

/// Inputs for one grouping run, as exported from a MatchMiner backend.
#[derive(Debug, Clone, Default)]
pub struct MatchMinerExport {
    pub trials: Vec<TrialDefinition>,
    pub matches: Vec<MatchRecord>,
}

impl MatchMinerExport {
    pub async fn load(trials_path: &Path, matches_path: &Path) -> Result<Self, TrialMatchError> {
        let trials: Vec<TrialDefinition> = read_json_array(trials_path).await?;
        info!(path = %trials_path.display(), count = trials.len(), "loaded trial definitions");
        let matches: Vec<MatchRecord> = read_json_array(matches_path).await?;
        info!(path = %matches_path.display(), count = matches.len(), "loaded match records");
        Ok(Self { trials, matches })
    }
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, TrialMatchError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TrialMatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|source| TrialMatchError::Json {
        path: path.to_path_buf(),
        source,
    })
}
