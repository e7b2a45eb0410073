pub mod download;
pub mod locator;
