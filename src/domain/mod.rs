pub mod solar;
pub mod time_format;
