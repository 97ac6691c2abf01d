pub mod matchminer;
