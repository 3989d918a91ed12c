//! Ingestion Service Module
//!
//! Accepts one interview submission per request and stores it as a single record.
//!
//! ## Workflow
//! 1. **Check**: Every question must carry text, topic, roundType and difficulty.
//! 2. **Build**: Missing `frequency` becomes 3 and missing `recency` becomes the request time.
//! 3. **Store**: The record goes to the `RecordStore`, which validates the full schema
//!    and writes all of it or nothing.

pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
