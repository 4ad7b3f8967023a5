pub mod buffer;
pub mod compositor;
pub mod error;
pub mod filters;
pub mod history;
pub mod patch;
pub mod session;
