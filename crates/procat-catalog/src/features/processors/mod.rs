//! Data processor feature: publish, re-parameterise, remove, look up, list

pub mod commands;
pub mod queries;

pub use commands::{
    CreateProcessorCommand, CreateProcessorResponse, DeleteProcessorCommand,
    DeleteProcessorResponse, UpdateProcessorParametersCommand, UpdateProcessorParametersResponse,
};
pub use queries::{
    GetProcessorQuery, GetProcessorResponse, ListProcessorsBySearchableTypeQuery,
    ListProcessorsBySearchableTypeResponse,
};
