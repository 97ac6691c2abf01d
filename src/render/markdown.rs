use minijinja::{Environment, context};

use crate::entities::trial_match::DetailedTrialMatch;
use crate::error::TrialMatchError;

const TRIAL_MATCHES_TEMPLATE: &str = include_str!("templates/trial_matches.md.j2");

fn environment() -> Result<Environment<'static>, TrialMatchError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template("trial_matches", TRIAL_MATCHES_TEMPLATE)?;
    Ok(env)
}

/// Full report: one section per trial, then arms, age buckets, and genomic rows.
/// Rows from `notMatches` are labelled `NOT`.
pub fn trial_matches(trials: &[DetailedTrialMatch]) -> Result<String, TrialMatchError> {
    let env = environment()?;
    let tmpl = env.get_template("trial_matches")?;
    Ok(tmpl.render(context! { trials => trials })?)
}

pub fn priority_table(trials: &[DetailedTrialMatch]) -> String {
    let mut out = String::new();
    out.push_str("# Trial Priority\n\n");
    out.push_str("| Trial | NCT ID | Priority |\n");
    out.push_str("|-------|--------|----------|\n");
    for trial in trials {
        let nct_id = if trial.nct_id.is_empty() {
            "-"
        } else {
            trial.nct_id.as_str()
        };
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            trial.id, nct_id, trial.priority
        ));
    }
    out.push_str(&format!("\n{} trial(s)\n", trials.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::trial_match::{
        ArmMatch, ClinicalGroupMatch, GenomicGroupMatch, GenomicMatch, OncotreeDiagnoses,
    };

    fn fixture() -> DetailedTrialMatch {
        DetailedTrialMatch {
            id: "T1".into(),
            nct_id: "NCT02465060".into(),
            protocol_no: "15-123".into(),
            phase: "II".into(),
            short_title: "NCI-MATCH".into(),
            status: "open to accrual".into(),
            matches: vec![ArmMatch {
                arm_description: "Arm Z1A".into(),
                drugs: vec![vec!["Dabrafenib".into(), "Trametinib".into()]],
                matches: vec![ClinicalGroupMatch {
                    trial_age_numerical: Some(">=18".into()),
                    trial_oncotree_primary_diagnosis: OncotreeDiagnoses {
                        positive: vec!["Melanoma".into()],
                        negative: vec!["Glioma".into()],
                    },
                    matches: vec![GenomicGroupMatch {
                        genomic_alteration: "BRAF V600E".into(),
                        matches: vec![GenomicMatch {
                            true_hugo_symbol: Some("BRAF".into()),
                            true_protein_change: Some("p.V600E".into()),
                            sample_ids: vec!["S1".into(), "S2".into()],
                        }],
                    }],
                    not_matches: vec![GenomicGroupMatch {
                        genomic_alteration: "KRAS G12C".into(),
                        matches: vec![GenomicMatch {
                            true_hugo_symbol: None,
                            true_protein_change: None,
                            sample_ids: vec!["S3".into()],
                        }],
                    }],
                }],
            }],
            priority: 1,
        }
    }

    #[test]
    fn trial_matches_renders_sections_and_not_rows() {
        let out = trial_matches(&[fixture()]).expect("rendered");
        assert!(out.contains("## NCI-MATCH (NCT02465060)"));
        assert!(out.contains("### Arm: Arm Z1A"));
        assert!(out.contains("Drugs: Dabrafenib + Trametinib"));
        assert!(out.contains("#### Age: >=18"));
        assert!(out.contains("Cancer types: Melanoma"));
        assert!(out.contains("NOT cancer types: Glioma"));
        assert!(out.contains("| Yes | BRAF V600E | BRAF | p.V600E | S1, S2 |"));
        assert!(out.contains("| NOT | KRAS G12C | - | - | S3 |"));
    }

    #[test]
    fn trial_matches_labels_unspecified_arm_and_age() {
        let mut trial = fixture();
        trial.matches[0].arm_description = String::new();
        trial.matches[0].matches[0].trial_age_numerical = None;
        let out = trial_matches(&[trial]).expect("rendered");
        assert!(out.contains("### Arm: (no specific arm)"));
        assert!(out.contains("#### Age: any"));
    }

    #[test]
    fn trial_matches_handles_empty_input() {
        let out = trial_matches(&[]).expect("rendered");
        assert!(out.contains("No matching trials."));
    }

    #[test]
    fn priority_table_lists_trials_in_order() {
        let mut second = fixture();
        second.id = "T2".into();
        second.nct_id = String::new();
        second.priority = 2;
        let out = priority_table(&[fixture(), second]);
        assert!(out.contains("| T1 | NCT02465060 | 1 |"));
        assert!(out.contains("| T2 | - | 2 |"));
        assert!(out.contains("2 trial(s)"));
        assert!(out.find("| T1").expect("T1 row") < out.find("| T2").expect("T2 row"));
    }
}
