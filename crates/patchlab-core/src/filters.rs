use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// The kind of filter applied to a patch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilterKind {
    EdgeDetect,
    Negate,
    Smooth,
    Contrast { alpha: f64, beta: i32 },
}

// Manual Eq impl: f64 doesn't impl Eq, but records carrying a FilterKind need
// it for comparisons in tests. Contrast coefficients are always finite.
impl Eq for FilterKind {}

impl FilterKind {
    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::EdgeDetect => "Edge Detect",
            Self::Negate => "Negate",
            Self::Smooth => "Smooth",
            Self::Contrast { .. } => "Contrast",
        }
    }

    /// All parameterless filter kinds, plus contrast at identity settings.
    pub fn all_builtin() -> Vec<FilterKind> {
        vec![
            FilterKind::EdgeDetect,
            FilterKind::Negate,
            FilterKind::Smooth,
            FilterKind::Contrast {
                alpha: 1.0,
                beta: 0,
            },
        ]
    }
}

/// Switches selecting between the pinned historical pixel conversions and
/// their conventional counterparts. Defaults pin the historical behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// When true, edge magnitudes of 256 and above saturate at 255. When
    /// false they pass through a truncating 8-bit conversion and wrap.
    pub edge_saturate: bool,
    /// When true, contrast results below zero clamp to 0. When false they
    /// wrap through the 8-bit conversion.
    pub contrast_floor: bool,
}

/// 5x5 smoothing kernel; weights sum to 273.
const SMOOTH_KERNEL: [[i64; 5]; 5] = [
    [1, 4, 7, 4, 1],
    [4, 16, 26, 16, 4],
    [7, 26, 41, 26, 7],
    [4, 16, 26, 16, 4],
    [1, 4, 7, 4, 1],
];

const SOBEL_X: [[i64; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i64; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Run one filter over `input`, producing a same-size output buffer.
/// Pure: no state is shared across calls.
pub fn run(kind: FilterKind, input: &PixelBuffer, config: &FilterConfig) -> PixelBuffer {
    match kind {
        FilterKind::EdgeDetect => edge_detect(input, config),
        FilterKind::Negate => negate(input),
        FilterKind::Smooth => smooth(input),
        FilterKind::Contrast { alpha, beta } => contrast(input, alpha, beta, config),
    }
}

/// 5x5 weighted-average smoothing.
///
/// Window samples that fall outside the patch contribute nothing, but the
/// divisor stays the full kernel sum, so border and corner pixels come out
/// darker than their neighborhood. That falloff is part of the pinned
/// output and must not be compensated for.
pub fn smooth(input: &PixelBuffer) -> PixelBuffer {
    let w = input.width() as i64;
    let h = input.height() as i64;
    let mut out = PixelBuffer::new(input.width(), input.height());
    if w == 0 || h == 0 {
        return out;
    }

    let divisor: i64 = SMOOTH_KERNEL.iter().flatten().sum();
    let src = input.data();

    // Row-based parallelism: each output row reads only the immutable input.
    out.data_mut()
        .par_chunks_exact_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            for x in 0..w {
                let mut acc: i64 = 0;
                for i in -2..=2i64 {
                    let sy = y + i;
                    if sy < 0 || sy >= h {
                        continue;
                    }
                    for j in -2..=2i64 {
                        let sx = x + j;
                        if sx < 0 || sx >= w {
                            continue;
                        }
                        let weight = SMOOTH_KERNEL[(i + 2) as usize][(j + 2) as usize];
                        acc += src[(sy * w + sx) as usize] as i64 * weight;
                    }
                }
                row[x as usize] = (acc / divisor) as u8;
            }
        });

    out
}

/// 3x3 Sobel gradient magnitude.
///
/// Window samples outside the patch are skipped, the same rule as
/// [`smooth`]. The magnitude-to-byte conversion is selected by
/// [`FilterConfig::edge_saturate`].
pub fn edge_detect(input: &PixelBuffer, config: &FilterConfig) -> PixelBuffer {
    let w = input.width() as i64;
    let h = input.height() as i64;
    let mut out = PixelBuffer::new(input.width(), input.height());
    if w == 0 || h == 0 {
        return out;
    }

    let src = input.data();
    let saturate = config.edge_saturate;

    out.data_mut()
        .par_chunks_exact_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            for x in 0..w {
                let mut gx: i64 = 0;
                let mut gy: i64 = 0;
                for i in -1..=1i64 {
                    let sy = y + i;
                    if sy < 0 || sy >= h {
                        continue;
                    }
                    for j in -1..=1i64 {
                        let sx = x + j;
                        if sx < 0 || sx >= w {
                            continue;
                        }
                        let v = src[(sy * w + sx) as usize] as i64;
                        gx += v * SOBEL_X[(i + 1) as usize][(j + 1) as usize];
                        gy += v * SOBEL_Y[(i + 1) as usize][(j + 1) as usize];
                    }
                }
                let magnitude = ((gx * gx + gy * gy) as f64).sqrt();
                row[x as usize] = if saturate {
                    magnitude.round().clamp(0.0, 255.0) as u8
                } else {
                    // Truncating conversion: fraction dropped, >= 256 wraps.
                    // Written through u32 because `f64 as u8` saturates.
                    magnitude as u32 as u8
                };
            }
        });

    out
}

/// Linear remap `trunc(in * alpha) + beta`.
///
/// The upper bound always clamps at 255. The lower bound is selected by
/// [`FilterConfig::contrast_floor`]: with the default, a negative result
/// wraps through the 8-bit conversion.
pub fn contrast(input: &PixelBuffer, alpha: f64, beta: i32, config: &FilterConfig) -> PixelBuffer {
    let w = input.width() as usize;
    let mut out = input.clone();
    if out.pixel_count() == 0 {
        return out;
    }

    let floor = config.contrast_floor;
    out.data_mut().par_chunks_exact_mut(w).for_each(|row| {
        for pixel in row {
            let v = (*pixel as f64 * alpha) as i32 + beta;
            *pixel = if v > 255 {
                255
            } else if floor {
                v.max(0) as u8
            } else {
                v as u8
            };
        }
    });

    out
}

/// 8-bit complement, `255 XOR in`.
pub fn negate(input: &PixelBuffer) -> PixelBuffer {
    let w = input.width() as usize;
    let mut out = input.clone();
    if out.pixel_count() == 0 {
        return out;
    }

    out.data_mut().par_chunks_exact_mut(w).for_each(|row| {
        for pixel in row {
            *pixel = 255 ^ *pixel;
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_is_complement() {
        let input = PixelBuffer::from_vec(4, 1, vec![0, 1, 128, 255]);
        let out = negate(&input);
        assert_eq!(out.data(), &[255, 254, 127, 0]);
    }

    #[test]
    fn test_negate_twice_is_identity() {
        let data: Vec<u8> = (0..=255).collect();
        let input = PixelBuffer::from_vec(16, 16, data.clone());
        let out = negate(&negate(&input));
        assert_eq!(out.data(), data.as_slice());
    }

    #[test]
    fn test_contrast_identity() {
        let data: Vec<u8> = (0..=255).collect();
        let input = PixelBuffer::from_vec(16, 16, data.clone());
        let out = contrast(&input, 1.0, 0, &FilterConfig::default());
        assert_eq!(out.data(), data.as_slice());
    }

    #[test]
    fn test_contrast_upper_clamp() {
        let input = PixelBuffer::from_vec(2, 1, vec![200, 10]);
        let out = contrast(&input, 2.0, 0, &FilterConfig::default());
        assert_eq!(out.data(), &[255, 20]);
    }

    #[test]
    fn test_contrast_negative_wraps_by_default() {
        let input = PixelBuffer::from_vec(1, 1, vec![10]);
        // 10 - 20 = -10, wraps to 246.
        let out = contrast(&input, 1.0, -20, &FilterConfig::default());
        assert_eq!(out.data(), &[246]);
    }

    #[test]
    fn test_contrast_floor_clamps_when_enabled() {
        let input = PixelBuffer::from_vec(1, 1, vec![10]);
        let config = FilterConfig {
            contrast_floor: true,
            ..FilterConfig::default()
        };
        let out = contrast(&input, 1.0, -20, &config);
        assert_eq!(out.data(), &[0]);
    }

    #[test]
    fn test_smooth_uniform_interior_is_fixpoint() {
        // Every pixel equal and the window fully inside: normalized kernel
        // returns the same value.
        let input = PixelBuffer::filled(9, 9, 77);
        let out = smooth(&input);
        for y in 2..7 {
            for x in 2..7 {
                assert_eq!(out.get(x, y), 77, "interior pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_smooth_corner_darkens() {
        // At (0,0) only the bottom-right 3x3 quadrant of the kernel lands
        // in-bounds: 41+26+7+26+16+4+7+4+1 = 132 of the 273 total.
        let input = PixelBuffer::filled(9, 9, 100);
        let out = smooth(&input);
        assert_eq!(out.get(0, 0), (100 * 132 / 273) as u8);
    }

    #[test]
    fn test_edge_detect_uniform_interior_is_zero() {
        let input = PixelBuffer::filled(5, 5, 90);
        let out = edge_detect(&input, &FilterConfig::default());
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(out.get(x, y), 0);
            }
        }
    }

    #[test]
    fn test_edge_detect_left_edge_magnitude() {
        // At x=0 the skipped left column leaves gx = 4k and gy = 0, so the
        // magnitude is exactly 4k for interior rows.
        let input = PixelBuffer::filled(5, 5, 10);
        let out = edge_detect(&input, &FilterConfig::default());
        assert_eq!(out.get(0, 2), 40);
    }

    #[test]
    fn test_edge_detect_truncates_by_default() {
        // k=100 puts the left-edge magnitude at 400, which wraps to 144.
        let input = PixelBuffer::filled(5, 5, 100);
        let out = edge_detect(&input, &FilterConfig::default());
        assert_eq!(out.get(0, 2), (400 % 256) as u8);
    }

    #[test]
    fn test_edge_detect_saturates_when_enabled() {
        let input = PixelBuffer::filled(5, 5, 100);
        let config = FilterConfig {
            edge_saturate: true,
            ..FilterConfig::default()
        };
        let out = edge_detect(&input, &config);
        assert_eq!(out.get(0, 2), 255);
    }

    #[test]
    fn test_run_dispatches_by_kind() {
        let input = PixelBuffer::from_vec(1, 1, vec![10]);
        let config = FilterConfig::default();
        assert_eq!(run(FilterKind::Negate, &input, &config).data(), &[245]);
        assert_eq!(
            run(
                FilterKind::Contrast {
                    alpha: 2.0,
                    beta: 5
                },
                &input,
                &config
            )
            .data(),
            &[25]
        );
    }

    #[test]
    fn test_zero_size_input() {
        let input = PixelBuffer::new(0, 0);
        assert_eq!(smooth(&input).pixel_count(), 0);
        assert_eq!(edge_detect(&input, &FilterConfig::default()).pixel_count(), 0);
        assert_eq!(negate(&input).pixel_count(), 0);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(FilterKind::Smooth.display_name(), "Smooth");
        assert_eq!(
            FilterKind::Contrast {
                alpha: 1.5,
                beta: 3
            }
            .display_name(),
            "Contrast"
        );
    }
}
