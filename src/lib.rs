pub mod api;
pub mod config;
pub mod data_models;
pub mod engine;
pub mod normalizer;
pub mod query_builder;
pub mod search;
