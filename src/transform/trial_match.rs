//! Reorganizes flat MatchMiner match records into the nested
//! trial → arm → age → alteration → patient-genomic tree and orders trials
//! by display priority.

use tracing::{debug, warn};

use crate::entities::trial_match::{
    ArmDefinition, ArmMatch, ClinicalGroupMatch, DetailedTrialMatch, GenomicGroupMatch,
    GenomicMatch, MatchRecord, TrialDefinition,
};
use crate::error::TrialMatchError;
use crate::transform::grouping::{group_by, unique};
use crate::transform::negation::{Criterion, split_criteria};

/// Arm types that are never shown as matches. Compared case-sensitively.
pub const HIDDEN_ARM_TYPES: &[&str] = &["Control Arm", "Placebo Arm"];

/// Groups match records into one [`DetailedTrialMatch`] per trial, sorted by
/// ascending priority. Equal priorities keep first-occurrence order.
///
/// # Errors
///
/// Returns [`TrialMatchError::NotFound`] if any non-hidden record references a
/// trial id absent from `trials`.
pub fn group_trial_matches_by_id(
    trials: &[TrialDefinition],
    matches: &[MatchRecord],
) -> Result<Vec<DetailedTrialMatch>, TrialMatchError> {
    let visible = exclude_control_arms(matches);
    debug!(
        total = matches.len(),
        hidden = matches.len() - visible.len(),
        "filtered control arms"
    );

    let mut out = group_by(visible, |record| record.trial_id.as_str())
        .into_iter()
        .map(|(trial_id, records)| -> Result<DetailedTrialMatch, TrialMatchError> {
            let trial = trials
                .iter()
                .find(|trial| trial.id == trial_id)
                .ok_or_else(|| TrialMatchError::NotFound {
                    entity: "trial".into(),
                    id: trial_id.to_string(),
                    suggestion: "Every trial id in the match records needs a trial definition."
                        .into(),
                })?;
            let arms = group_by_arm_description(&records, trial);
            let priority = trial_priority(&arms);
            Ok(DetailedTrialMatch {
                id: trial.id.clone(),
                nct_id: trial.nct_id.clone(),
                protocol_no: trial.protocol_no.clone(),
                phase: trial.phase.clone(),
                short_title: trial.short_title.clone(),
                status: trial.status.clone(),
                matches: arms,
                priority,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(trials = out.len(), "built trial match groups");
    out.sort_by_key(|trial| trial.priority);
    Ok(out)
}

pub fn exclude_control_arms(matches: &[MatchRecord]) -> Vec<&MatchRecord> {
    matches
        .iter()
        .filter(|record| {
            record
                .arm_type
                .as_deref()
                .is_none_or(|arm_type| !HIDDEN_ARM_TYPES.contains(&arm_type))
        })
        .collect()
}

pub fn group_by_arm_description(
    records: &[&MatchRecord],
    trial: &TrialDefinition,
) -> Vec<ArmMatch> {
    let arms = trial.first_step_arms();
    group_by(records.iter().copied(), |record| {
        record.arm_description.as_str()
    })
    .into_iter()
    .map(|(arm_description, arm_records)| ArmMatch {
        arm_description: arm_description.to_string(),
        drugs: arms
            .map(|arms| drugs_from_arm(arm_description, arms))
            .unwrap_or_default(),
        matches: group_by_age(&arm_records),
    })
    .collect()
}

pub fn group_by_age(records: &[&MatchRecord]) -> Vec<ClinicalGroupMatch> {
    group_by(records.iter().copied(), |record| {
        record.trial_age_numerical.clone()
    })
    .into_iter()
    .map(|(age, age_records)| {
        let diagnoses = unique(
            age_records
                .iter()
                .filter_map(|record| record.trial_oncotree_primary_diagnosis.as_deref()),
        );
        let (matches, not_matches) = group_by_genomic_alteration(&age_records);
        ClinicalGroupMatch {
            trial_age_numerical: age,
            trial_oncotree_primary_diagnosis: split_criteria(diagnoses),
            matches,
            not_matches,
        }
    })
    .collect()
}

/// Returns `(matches, not_matches)`: alteration groups without and with the
/// exclusion marker, each in first-occurrence order.
pub fn group_by_genomic_alteration(
    records: &[&MatchRecord],
) -> (Vec<GenomicGroupMatch>, Vec<GenomicGroupMatch>) {
    let mut matches = Vec::new();
    let mut not_matches = Vec::new();
    for (raw, alteration_records) in group_by(records.iter().copied(), |record| {
        record.genomic_alteration.as_str()
    }) {
        let alteration = Criterion::parse(raw);
        let excluded = alteration.excluded;
        let group = group_by_patient_genomic(&alteration_records, alteration);
        if excluded {
            not_matches.push(group);
        } else {
            matches.push(group);
        }
    }
    (matches, not_matches)
}

pub fn group_by_patient_genomic(
    records: &[&MatchRecord],
    alteration: Criterion,
) -> GenomicGroupMatch {
    let matches = group_by(records.iter().copied(), |record| {
        (
            record.true_hugo_symbol.as_deref(),
            record.true_protein_change.as_deref(),
        )
    })
    .into_iter()
    .map(|((hugo_symbol, protein_change), genomic_records)| GenomicMatch {
        true_hugo_symbol: hugo_symbol.map(str::to_string),
        true_protein_change: protein_change.map(str::to_string),
        sample_ids: unique(genomic_records.iter().map(|record| record.sample_id.clone())),
    })
    .collect();

    GenomicGroupMatch {
        genomic_alteration: alteration.value,
        matches,
    }
}

/// Drug names for a specific arm, as a single group. The empty description
/// means "no specific arm" and never resolves drugs.
pub fn drugs_from_arm(arm_description: &str, arms: &[ArmDefinition]) -> Vec<Vec<String>> {
    if arm_description.is_empty() {
        return Vec::new();
    }
    let Some(arm) = arms
        .iter()
        .find(|arm| arm.arm_description == arm_description)
    else {
        warn!(arm = %arm_description, "no arm definition for matched arm; drugs omitted");
        return Vec::new();
    };
    match arm.drugs.as_deref() {
        Some(drugs) if !drugs.is_empty() => {
            vec![drugs.iter().map(|drug| drug.name.clone()).collect()]
        }
        _ => Vec::new(),
    }
}

/// 0 when only positive alterations matched, 1 when both kinds matched,
/// 2 when only excluded alterations matched.
pub fn match_priority(group: &ClinicalGroupMatch) -> u32 {
    match (group.matches.is_empty(), group.not_matches.is_empty()) {
        (_, true) => 0,
        (false, false) => 1,
        (true, false) => 2,
    }
}

// Sums over every age bucket, so trials with more buckets can accumulate a
// higher score without carrying more negative evidence per bucket.
pub fn trial_priority(arms: &[ArmMatch]) -> u32 {
    arms.iter()
        .flat_map(|arm| arm.matches.iter())
        .map(match_priority)
        .sum()
}
