//! Application services for the adoption workflow.

mod lifecycle;

pub use lifecycle::{
    AdoptionError, AdoptionLifecycleService, AdoptionResult, SubmitApplicationRequest,
    UpdateStatusRequest,
};
