//! Post analysis: keyword classification and detail extraction.
//!
//! The classifier and the extractor are independent; a post's line and time
//! are extracted whatever its verdict.

pub mod classifier;
pub mod details;
pub mod types;

pub use classifier::{Verdict, classify};
pub use details::{NOT_AVAILABLE, extract_details};
pub use types::DelayStatus;
