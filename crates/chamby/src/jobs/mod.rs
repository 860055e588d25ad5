pub mod model;
pub mod repo;

pub use model::{JobStatus, NewJob, ServiceJob};
pub use repo::JobsRepo;
