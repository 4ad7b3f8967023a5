// =============================================================================
// PixelBuffer
// =============================================================================

/// An owned single-channel intensity buffer. 1 byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new all-black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width * height) as usize],
        }
    }

    /// Create a buffer with every pixel set to `intensity`.
    pub fn filled(width: u32, height: u32, intensity: u8) -> Self {
        Self {
            width,
            height,
            data: vec![intensity; (width * height) as usize],
        }
    }

    /// Create from existing intensity data. Panics if data length doesn't match dimensions.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            (width * height) as usize,
            "intensity data length {} doesn't match {}x{}={}",
            data.len(),
            width,
            height,
            width * height
        );
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get intensity at (x, y). Panics if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.width + x) as usize]
    }

    /// Set intensity at (x, y). Panics if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, intensity: u8) {
        self.data[(y * self.width + x) as usize] = intensity;
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// One full row of pixels. Panics if `y` is out of bounds.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y * self.width) as usize;
        &self.data[start..start + self.width as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let buf = PixelBuffer::new(4, 3);
        assert_eq!(buf.pixel_count(), 12);
        assert!(buf.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut buf = PixelBuffer::new(5, 5);
        buf.set(3, 2, 200);
        assert_eq!(buf.get(3, 2), 200);
        assert_eq!(buf.get(2, 3), 0);
    }

    #[test]
    fn test_row_major_layout() {
        let buf = PixelBuffer::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.get(0, 0), 1);
        assert_eq!(buf.get(2, 0), 3);
        assert_eq!(buf.get(0, 1), 4);
        assert_eq!(buf.row(1), &[4, 5, 6]);
    }

    #[test]
    #[should_panic]
    fn test_from_vec_length_mismatch() {
        PixelBuffer::from_vec(3, 2, vec![0; 5]);
    }
}
