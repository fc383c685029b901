mod client;
pub mod pagination;
mod repo;
mod types;

#[cfg(test)]
pub use client::MockGetReleases;
pub use client::{DEFAULT_API_URL, GetReleases, GitHub, MAX_PAGES};
pub use pagination::{LinkEntry, next_page_url, parse_link_header};
pub use repo::{GRAALPY_REPO, GitHubRepo};
pub use types::{ApiResponse, Release, ReleaseAsset};
