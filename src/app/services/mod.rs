//! Core business logic services

pub mod aggregator;
pub mod asset_registry;
pub mod output_writer;
pub mod quality_report;
pub mod record_loader;
pub mod record_processor;
