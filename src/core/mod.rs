pub mod engine;
pub mod matcher;
pub mod navigator;
pub mod normalizer;
pub mod orderer;
pub mod transcriber;
pub mod types;
