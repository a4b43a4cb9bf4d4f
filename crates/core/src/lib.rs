//! Domain logic for the thermoscan inspection backend.
//!
//! Everything here is free of database access: the subprocess runner, the
//! thermal analysis contract and its Python implementation, payload parsing
//! for anomalies and detected boxes, lenient form-field parsing, upload
//! storage, and the PDF report renderer.

pub mod anomaly;
pub mod boxes;
pub mod error;
pub mod forms;
pub mod prediction;
pub mod report;
pub mod scripting;
pub mod storage;
pub mod thermal;
pub mod types;
