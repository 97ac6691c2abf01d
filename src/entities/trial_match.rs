use serde::{Deserialize, Serialize};

/// One patient-to-trial-arm eligibility signal, as exported by MatchMiner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(rename = "id")]
    pub trial_id: String,
    #[serde(default)]
    pub nct_id: String,
    #[serde(default)]
    pub protocol_no: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub arm_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_age_numerical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_oncotree_primary_diagnosis: Option<String>,
    #[serde(default)]
    pub genomic_alteration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_hugo_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_protein_change: Option<String>,
    pub sample_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialDefinition {
    pub id: String,
    #[serde(default)]
    pub nct_id: String,
    #[serde(default)]
    pub protocol_no: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_list: Option<TreatmentList>,
}

impl TrialDefinition {
    /// Arm definitions of the first treatment step, if any were declared.
    pub fn first_step_arms(&self) -> Option<&[ArmDefinition]> {
        self.treatment_list
            .as_ref()
            .and_then(|list| list.step.first())
            .and_then(|step| step.arm.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentList {
    #[serde(default)]
    pub step: Vec<TreatmentStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm: Option<Vec<ArmDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmDefinition {
    #[serde(default)]
    pub arm_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drugs: Option<Vec<ArmDrug>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmDrug {
    pub name: String,
}

/// A trial with its matched arms, ordered for display by `priority` (lower first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTrialMatch {
    pub id: String,
    pub nct_id: String,
    pub protocol_no: String,
    pub phase: String,
    pub short_title: String,
    pub status: String,
    pub matches: Vec<ArmMatch>,
    pub priority: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmMatch {
    pub arm_description: String,
    pub drugs: Vec<Vec<String>>,
    pub matches: Vec<ClinicalGroupMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalGroupMatch {
    pub trial_age_numerical: Option<String>,
    pub trial_oncotree_primary_diagnosis: OncotreeDiagnoses,
    pub matches: Vec<GenomicGroupMatch>,
    pub not_matches: Vec<GenomicGroupMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OncotreeDiagnoses {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicGroupMatch {
    pub genomic_alteration: String,
    pub matches: Vec<GenomicMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicMatch {
    pub true_hugo_symbol: Option<String>,
    pub true_protein_change: Option<String>,
    pub sample_ids: Vec<String>,
}
