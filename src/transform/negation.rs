//! Decoding of `!`-marked exclusion criteria.
//!
//! MatchMiner encodes a "NOT" criterion by embedding `!` in the value
//! (`!Melanoma`, `!BRAF V600E`). Values are decoded once into a [`Criterion`]
//! and partitioned from there.

use serde::Serialize;

use crate::entities::trial_match::OncotreeDiagnoses;

pub const EXCLUSION_MARKER: char = '!';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Criterion {
    pub value: String,
    pub excluded: bool,
}

impl Criterion {
    pub fn parse(raw: &str) -> Self {
        if raw.contains(EXCLUSION_MARKER) {
            Self {
                value: raw.replace(EXCLUSION_MARKER, ""),
                excluded: true,
            }
        } else {
            Self {
                value: raw.to_string(),
                excluded: false,
            }
        }
    }
}

/// Splits raw criteria into qualifying and disqualifying values, preserving
/// input order within each side.
pub fn split_criteria<I, S>(raw: I) -> OncotreeDiagnoses
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = OncotreeDiagnoses::default();
    for item in raw {
        let criterion = Criterion::parse(item.as_ref());
        if criterion.excluded {
            out.negative.push(criterion.value);
        } else {
            out.positive.push(criterion.value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_leading_marker() {
        let criterion = Criterion::parse("!Melanoma");
        assert!(criterion.excluded);
        assert_eq!(criterion.value, "Melanoma");
    }

    #[test]
    fn parse_detects_marker_anywhere() {
        let criterion = Criterion::parse("BRAF !V600E");
        assert!(criterion.excluded);
        assert_eq!(criterion.value, "BRAF V600E");
    }

    #[test]
    fn parse_leaves_plain_values_untouched() {
        let criterion = Criterion::parse("Non-Small Cell Lung Cancer");
        assert!(!criterion.excluded);
        assert_eq!(criterion.value, "Non-Small Cell Lung Cancer");
    }

    #[test]
    fn split_criteria_preserves_order_within_each_side() {
        let split = split_criteria(["Melanoma", "!Glioma", "Bladder", "!Breast"]);
        assert_eq!(split.positive, vec!["Melanoma", "Bladder"]);
        assert_eq!(split.negative, vec!["Glioma", "Breast"]);
    }

    #[test]
    fn split_criteria_on_empty_input_is_empty() {
        let split = split_criteria(Vec::<String>::new());
        assert!(split.positive.is_empty());
        assert!(split.negative.is_empty());
    }
}
