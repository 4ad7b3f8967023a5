use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::buffer::PixelBuffer;
use crate::error::{CoreError, Result};
use crate::filters::{self, FilterConfig, FilterKind};

/// An axis-aligned rectangle selecting part of an image.
///
/// Fields are signed: a caller can pass a negative origin or size and get
/// a bounds error back instead of a silent wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering an entire image of the given dimensions.
    pub fn whole_image(image_width: u32, image_height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: image_width as i32,
            height: image_height as i32,
        }
    }

    /// Selection convention at the session boundary: a request with both
    /// width and height zero means "operate on the whole image".
    pub fn or_whole_image(self, image_width: u32, image_height: u32) -> Self {
        if self.width == 0 && self.height == 0 {
            Self::whole_image(image_width, image_height)
        } else {
            self
        }
    }

    /// Check the rectangle fits inside an image of the given dimensions.
    pub fn check_within(&self, image_width: u32, image_height: u32) -> Result<()> {
        let out = self.x < 0
            || self.y < 0
            || self.width < 0
            || self.height < 0
            || self.x as i64 + self.width as i64 > image_width as i64
            || self.y as i64 + self.height as i64 > image_height as i64;
        if out {
            return Err(CoreError::RegionOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                image_width,
                image_height,
            });
        }
        Ok(())
    }
}

/// A rectangular sub-region of an image carrying both its pixel state at
/// extraction time and the state after one filter run.
///
/// The extracted snapshot is never touched after construction; the working
/// buffer starts as an identical copy and is overwritten in place by exactly
/// one filter run. Both stay private so those invariants hold.
#[derive(Debug, Clone)]
pub struct Patch {
    region: Region,
    kind: FilterKind,
    /// Snapshot of the source sub-region, immutable after construction.
    original: PixelBuffer,
    /// Filter output; starts as a copy of `original`.
    filtered: PixelBuffer,
}

impl Patch {
    /// Extract a patch from `image`. Fails if the region has a negative
    /// origin or size, or reaches past the image extents.
    pub fn from_image(image: &PixelBuffer, kind: FilterKind, region: Region) -> Result<Self> {
        region.check_within(image.width(), image.height())?;

        let w = region.width as u32;
        let h = region.height as u32;
        let mut original = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            let row = image.row(region.y as u32 + y);
            let x0 = region.x as usize;
            original.extend_from_slice(&row[x0..x0 + w as usize]);
        }
        let original = PixelBuffer::from_vec(w, h, original);
        let filtered = original.clone();

        Ok(Self {
            region,
            kind,
            original,
            filtered,
        })
    }

    /// Compute the filtered buffer from the snapshot. Idempotent: the input
    /// is always the untouched snapshot, so re-running replaces the previous
    /// output rather than compounding it.
    pub fn run_filter(&mut self, config: &FilterConfig) {
        self.filtered = filters::run(self.kind, &self.original, config);
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn filtered(&self) -> &PixelBuffer {
        &self.filtered
    }
}

/// A completed, immutable patch stored in history for undo/redo.
///
/// Once created it is only moved between the undo and redo stacks or
/// discarded on eviction.
#[derive(Debug, Clone)]
pub struct OperationRecord {
    id: Uuid,
    patch: Patch,
}

impl OperationRecord {
    pub fn new(patch: Patch) -> Self {
        Self {
            id: Uuid::new_v4(),
            patch,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    pub fn kind(&self) -> FilterKind {
        self.patch.kind
    }

    pub fn region(&self) -> Region {
        self.patch.region
    }

    /// Human-readable summary, e.g. for a history panel or log line.
    pub fn description(&self) -> String {
        let r = self.patch.region;
        format!(
            "{} {}x{} at ({}, {})",
            self.patch.kind.display_name(),
            r.width,
            r.height,
            r.x,
            r.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height).map(|i| (i % 256) as u8).collect();
        PixelBuffer::from_vec(width, height, data)
    }

    #[test]
    fn test_extract_copies_subregion_exactly() {
        let image = gradient(8, 8);
        let patch =
            Patch::from_image(&image, FilterKind::Negate, Region::new(2, 3, 4, 2)).unwrap();
        assert_eq!(patch.original().width(), 4);
        assert_eq!(patch.original().height(), 2);
        for py in 0..2 {
            for px in 0..4 {
                assert_eq!(patch.original().get(px, py), image.get(2 + px, 3 + py));
            }
        }
        // Working buffer starts as an identical copy.
        assert_eq!(patch.filtered(), patch.original());
    }

    #[test]
    fn test_rejects_negative_origin() {
        let image = gradient(8, 8);
        let err = Patch::from_image(&image, FilterKind::Negate, Region::new(-1, 0, 4, 4));
        assert!(matches!(
            err,
            Err(CoreError::RegionOutOfBounds { x: -1, .. })
        ));
    }

    #[test]
    fn test_rejects_negative_size() {
        let image = gradient(8, 8);
        assert!(Patch::from_image(&image, FilterKind::Negate, Region::new(0, 0, -3, 4)).is_err());
        assert!(Patch::from_image(&image, FilterKind::Negate, Region::new(0, 0, 3, -4)).is_err());
    }

    #[test]
    fn test_rejects_overflowing_extent() {
        let image = gradient(8, 8);
        assert!(Patch::from_image(&image, FilterKind::Negate, Region::new(5, 0, 4, 4)).is_err());
        assert!(Patch::from_image(&image, FilterKind::Negate, Region::new(0, 7, 1, 2)).is_err());
        // Exactly touching the far edge is fine.
        assert!(Patch::from_image(&image, FilterKind::Negate, Region::new(4, 4, 4, 4)).is_ok());
    }

    #[test]
    fn test_zero_area_region_is_valid() {
        let image = gradient(8, 8);
        let patch =
            Patch::from_image(&image, FilterKind::Negate, Region::new(3, 3, 0, 5)).unwrap();
        assert_eq!(patch.original().pixel_count(), 0);
    }

    #[test]
    fn test_whole_image_substitution() {
        let region = Region::new(0, 0, 0, 0).or_whole_image(64, 48);
        assert_eq!(region, Region::new(0, 0, 64, 48));
        // Only one zero dimension keeps the request as-is.
        let region = Region::new(0, 0, 0, 5).or_whole_image(64, 48);
        assert_eq!(region, Region::new(0, 0, 0, 5));
    }
}
