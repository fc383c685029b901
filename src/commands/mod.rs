mod cache_status;
mod releases;
mod validate;
mod version_file;

pub use cache_status::cache_status;
pub use releases::releases;
pub use validate::validate;
pub use version_file::version_file;
