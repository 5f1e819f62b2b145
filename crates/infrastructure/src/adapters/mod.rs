//! Adapters implementing application ports

mod thread_rng_source;

pub use thread_rng_source::ThreadRngSource;
