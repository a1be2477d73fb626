pub mod ini_file_store;
