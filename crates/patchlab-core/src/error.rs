use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(
        "region {width}x{height} at ({x},{y}) exceeds image bounds {image_width}x{image_height}"
    )]
    RegionOutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        image_width: u32,
        image_height: u32,
    },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, CoreError>;
