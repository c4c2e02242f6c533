pub mod color;
pub mod emotion;
pub mod file_size;
pub mod media;
