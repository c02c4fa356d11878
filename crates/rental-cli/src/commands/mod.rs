pub mod amortize;
pub mod analyze;
pub mod noi;
pub mod project;
