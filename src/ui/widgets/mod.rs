pub mod error_banner;
pub mod footer;
pub mod header;
pub mod search;
pub mod sections;
mod shared;
