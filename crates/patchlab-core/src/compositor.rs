use crate::buffer::PixelBuffer;
use crate::patch::Patch;

/// Which of a patch's two pixel states to composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchLayer {
    /// The snapshot taken at extraction time (used by undo).
    Original,
    /// The filter output (used by apply and redo).
    Filtered,
}

/// Copy the chosen patch buffer into `image` at the patch's recorded offset.
///
/// No clipping: patches are constructed in-bounds against the image they
/// were extracted from, so the target rows always exist. Pixels outside the
/// patch rectangle are left untouched.
pub fn write_back(image: &mut PixelBuffer, patch: &Patch, layer: PatchLayer) {
    let source = match layer {
        PatchLayer::Original => patch.original(),
        PatchLayer::Filtered => patch.filtered(),
    };
    let region = patch.region();
    if region.width == 0 || region.height == 0 {
        return;
    }

    let row_len = region.width as usize;
    let stride = image.width() as usize;
    let x0 = region.x as usize;
    for dy in 0..region.height as usize {
        let src_row = source.row(dy as u32);
        let dst_start = (region.y as usize + dy) * stride + x0;
        image.data_mut()[dst_start..dst_start + row_len].copy_from_slice(src_row);
    }
}
