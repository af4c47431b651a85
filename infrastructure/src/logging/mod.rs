//! Logging infrastructure: the per-session JSONL audit trail.
//!
//! Provides [`JsonlAuditSink`], a JSONL file writer that implements the
//! [`AuditSink`](hostscope_application::AuditSink) port.

mod jsonl_audit;

pub use jsonl_audit::JsonlAuditSink;
