//! Feedback persistence infrastructure

mod jsonl_log;

pub use jsonl_log::JsonlFeedbackLog;
