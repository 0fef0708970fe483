pub mod create;
pub mod delete;
pub mod update_parameters;

pub use create::{CreateProcessorCommand, CreateProcessorResponse};
pub use delete::{DeleteProcessorCommand, DeleteProcessorResponse};
pub use update_parameters::{UpdateProcessorParametersCommand, UpdateProcessorParametersResponse};
