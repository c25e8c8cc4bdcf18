pub mod file_loader;

pub use file_loader::load_uploaded_file;
