pub mod get;
pub mod list;

pub use get::{GetProcessorQuery, GetProcessorResponse};
pub use list::{ListProcessorsBySearchableTypeQuery, ListProcessorsBySearchableTypeResponse};
