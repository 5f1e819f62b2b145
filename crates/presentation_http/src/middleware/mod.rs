//! HTTP middleware components

pub mod trace_context;

pub use trace_context::{HeaderExtractor, TraceContextMakeSpan};
