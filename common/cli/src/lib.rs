pub mod prompt;

#[cfg(feature = "tracing")]
pub mod tracing;
