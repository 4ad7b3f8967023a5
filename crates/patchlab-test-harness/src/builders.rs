use patchlab_core::buffer::PixelBuffer;
use patchlab_core::filters::FilterConfig;
use patchlab_core::history::RedoPolicy;
use patchlab_core::session::{EditingSession, SessionConfig};

/// Test pixel fill patterns.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    Uniform(u8),
    /// Intensity = (x + y * width) mod 256, so every pixel is addressable.
    Gradient,
    Checkerboard(u8, u8),
}

/// Builder for creating test images with sensible defaults.
pub struct ImageBuilder {
    width: u32,
    height: u32,
    pattern: Pattern,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self {
            width: 16,
            height: 16,
            pattern: Pattern::Uniform(0),
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn uniform(mut self, intensity: u8) -> Self {
        self.pattern = Pattern::Uniform(intensity);
        self
    }

    pub fn gradient(mut self) -> Self {
        self.pattern = Pattern::Gradient;
        self
    }

    pub fn checkerboard(mut self, dark: u8, light: u8) -> Self {
        self.pattern = Pattern::Checkerboard(dark, light);
        self
    }

    pub fn build(self) -> PixelBuffer {
        let (w, h) = (self.width, self.height);
        match self.pattern {
            Pattern::Uniform(v) => PixelBuffer::filled(w, h, v),
            Pattern::Gradient => {
                let data = (0..w * h).map(|i| (i % 256) as u8).collect();
                PixelBuffer::from_vec(w, h, data)
            }
            Pattern::Checkerboard(dark, light) => {
                let mut buf = PixelBuffer::new(w, h);
                for y in 0..h {
                    for x in 0..w {
                        buf.set(x, y, if (x + y) % 2 == 0 { dark } else { light });
                    }
                }
                buf
            }
        }
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating editing sessions over test images.
pub struct SessionBuilder {
    image: PixelBuffer,
    config: SessionConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            image: ImageBuilder::new().build(),
            config: SessionConfig::default(),
        }
    }

    pub fn image(mut self, image: PixelBuffer) -> Self {
        self.image = image;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    pub fn redo_policy(mut self, policy: RedoPolicy) -> Self {
        self.config.redo_policy = policy;
        self
    }

    pub fn filters(mut self, filters: FilterConfig) -> Self {
        self.config.filters = filters;
        self
    }

    pub fn build(self) -> EditingSession {
        EditingSession::with_config(self.image, self.config)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
