pub mod service_file;
pub mod service_settings;
pub mod setting_descriptor;
