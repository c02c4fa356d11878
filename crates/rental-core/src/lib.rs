pub mod amortization;
pub mod deal;
pub mod error;
pub mod income;
pub mod metrics;
pub mod projection;
pub mod types;

pub use error::RentalCoreError;
pub use types::*;

/// Standard result type for all engine operations
pub type RentalResult<T> = Result<T, RentalCoreError>;
