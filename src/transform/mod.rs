pub mod grouping;
pub mod negation;
pub mod trial_match;
