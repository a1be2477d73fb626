pub mod check;
pub mod copy;
pub mod create;
pub mod edit;
pub mod export;
pub mod list;
pub mod path;
pub mod remove;
pub mod rename;
pub mod settings;
pub mod show;
