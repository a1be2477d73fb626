pub mod edit_session;
pub mod path_resolver;
pub mod permission_retry;
pub mod service_editor;
