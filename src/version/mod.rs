//! Version inputs: syntax validation, version files and alias resolution.

pub mod file;
pub mod resolve;
pub mod validate;

pub use file::{
    VersionFileFormat, get_version_from_pipfile, get_version_from_toml_file,
    get_versions_from_file, get_versions_from_plain_file, get_versions_from_tool_versions,
};
pub use resolve::VersionResolver;
pub use validate::{is_nightly_keyword, validate_pypy_version_format, validate_version};
