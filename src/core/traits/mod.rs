pub mod parser;
pub mod service_store;
