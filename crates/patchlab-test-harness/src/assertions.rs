use patchlab_core::buffer::PixelBuffer;
use patchlab_core::patch::Region;
use patchlab_core::session::EditingSession;

/// Assert that two images match pixel for pixel.
pub fn assert_images_equal(actual: &PixelBuffer, expected: &PixelBuffer) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "image dimensions differ"
    );
    for y in 0..actual.height() {
        for x in 0..actual.width() {
            assert_eq!(
                actual.get(x, y),
                expected.get(x, y),
                "pixel ({x},{y}) differs"
            );
        }
    }
}

/// Assert that every pixel inside `region` holds `expected`.
pub fn assert_region_uniform(image: &PixelBuffer, region: Region, expected: u8) {
    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            assert_eq!(
                image.get(x as u32, y as u32),
                expected,
                "pixel ({x},{y}) inside region"
            );
        }
    }
}

/// Assert that every pixel outside `region` holds `expected`.
pub fn assert_outside_uniform(image: &PixelBuffer, region: Region, expected: u8) {
    for y in 0..image.height() {
        for x in 0..image.width() {
            let inside = (x as i32) >= region.x
                && (x as i32) < region.x + region.width
                && (y as i32) >= region.y
                && (y as i32) < region.y + region.height;
            if !inside {
                assert_eq!(image.get(x, y), expected, "pixel ({x},{y}) outside region");
            }
        }
    }
}

/// Assert that pixels outside `region` are identical in both images.
pub fn assert_outside_unchanged(actual: &PixelBuffer, baseline: &PixelBuffer, region: Region) {
    for y in 0..actual.height() {
        for x in 0..actual.width() {
            let inside = (x as i32) >= region.x
                && (x as i32) < region.x + region.width
                && (y as i32) >= region.y
                && (y as i32) < region.y + region.height;
            if !inside {
                assert_eq!(
                    actual.get(x, y),
                    baseline.get(x, y),
                    "pixel ({x},{y}) outside region changed"
                );
            }
        }
    }
}

/// Assert the session's undo/redo depths.
pub fn assert_depth(session: &EditingSession, undo: usize, redo: usize) {
    assert_eq!(
        session.depth(),
        (undo, redo),
        "history depth (undo, redo) mismatch"
    );
}
