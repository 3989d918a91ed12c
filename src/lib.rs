//! Interview Question Bank Library
//!
//! This library crate defines the modules of the interview-question service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Modules
//! - **`records`**: The persisted document: an interview record with its embedded
//!   questions, plus the schema (enumerations, ranges, required fields) it must satisfy.
//! - **`storage`**: The `RecordStore` contract and its backends (in-memory and MongoDB).
//! - **`ingestion`**: `POST /api/interview`. Checks a submission, fills question defaults
//!   and stores it as one record.
//! - **`search`**: `GET /api/interview/search`. Matches records on four fields and returns
//!   their filtered questions as one flat list.
//! - **`api`**: Route table, CORS and the health endpoint.
//! - **`config`**: Environment and command-line configuration.
//! - **`error`**: The HTTP error taxonomy and its JSON rendering.

pub mod api;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod records;
pub mod search;
pub mod storage;
