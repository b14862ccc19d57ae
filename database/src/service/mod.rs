pub mod person;

pub use person::{PersonService, ServiceError};
