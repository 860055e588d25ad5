pub mod client;
pub mod model;

pub use client::{FunctionsClient, PaymentsError};
pub use model::{EarningsSummary, PayoutSummary, VisitAuthorization};
