pub mod archive;
pub mod write;
