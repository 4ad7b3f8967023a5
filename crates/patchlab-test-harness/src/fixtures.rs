use patchlab_core::buffer::PixelBuffer;

/// A vertical intensity step: columns left of `edge_x` hold `low`, columns
/// at and right of it hold `high`. Handy for predictable Sobel responses.
pub fn vertical_step_image(width: u32, height: u32, edge_x: u32, low: u8, high: u8) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            buf.set(x, y, if x < edge_x { low } else { high });
        }
    }
    buf
}

/// A horizontal intensity step below `edge_y`.
pub fn horizontal_step_image(
    width: u32,
    height: u32,
    edge_y: u32,
    low: u8,
    high: u8,
) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            buf.set(x, y, if y < edge_y { low } else { high });
        }
    }
    buf
}

/// A small ASCII (P2) gray-map file with a comment in the header.
/// 4x2 image, values 0,50,100,150 / 200,250,255,0.
pub fn pgm_ascii_fixture() -> Vec<u8> {
    b"P2\n# test fixture\n4 2\n255\n0 50 100 150\n200 250 255 0\n".to_vec()
}

/// The binary (P5) encoding of the same image as [`pgm_ascii_fixture`].
pub fn pgm_binary_fixture() -> Vec<u8> {
    let mut bytes = b"P5\n4 2\n255\n".to_vec();
    bytes.extend_from_slice(&[0, 50, 100, 150, 200, 250, 255, 0]);
    bytes
}

/// The pixel values both fixtures decode to, row-major.
pub fn pgm_fixture_pixels() -> Vec<u8> {
    vec![0, 50, 100, 150, 200, 250, 255, 0]
}

/// Get a temporary directory for test files that persists for the test run.
pub fn fixture_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create fixture directory")
}
