pub mod error;
pub mod pgm;
