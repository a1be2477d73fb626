pub mod parsers;
pub mod stores;
