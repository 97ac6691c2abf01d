pub mod trial_match;
