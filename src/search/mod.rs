//! Search Service Module
//!
//! Looks up interview records and returns their questions as one flat list.
//!
//! ## Pipeline
//! 1. **Record match**: company, role, position and year are trimmed and compared to the
//!    stored fields ignoring case. Partial strings do not match.
//! 2. **Question filter**: optional `topic` and `difficulty` keep only questions with
//!    exactly that value.
//! 3. **Flatten**: surviving questions from all matched records are concatenated in store
//!    order. Entries carry only their own fields, not the parent record's.
//!
//! ## Submodules
//! - **`engine`**: The store query and the filter/flatten step.
//! - **`handlers`**: The axum handler and query-string parsing.
//! - **`types`**: Query parameters, question filter and response body.

pub mod engine;
pub mod handlers;
pub mod types;
