pub mod comparison;
pub mod error;
#[cfg(feature = "plotting")]
pub mod plotlars_backend;
