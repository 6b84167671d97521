//! commentscope: pull comments off video pages and score their sentiment.
//!
//! Extraction drives a live page through [`renderer::RenderContext`] and
//! reports a stream of [`extraction::ExtractionEvent`]s. The sentiment
//! side is pure: [`sentiment::analyze`] turns records into annotated
//! rows and a summary, and [`export`] writes them as CSV.

pub mod audit;
pub mod cli;
pub mod config;
pub mod export;
pub mod extraction;
pub mod platform;
pub mod renderer;
pub mod sentiment;
