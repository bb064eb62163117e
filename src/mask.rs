//! Local grayscale mask rendering.
//!
//! Produces the single-channel masks the Stability edit models consume:
//! white marks the region to edit, black is preserved. Shapes are rendered
//! from signed distances so feathered edges fall off smoothly instead of
//! aliasing.

use crate::error::{ImageGenError, Result};
use crate::models::catalog::MAX_MASK_FEATHER;
use image::{DynamicImage, GrayImage, ImageFormat};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskShape {
    Rectangle {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
    Ellipse {
        center_x: i64,
        center_y: i64,
        radius_x: i64,
        radius_y: i64,
    },
    Full,
}

#[derive(Debug, Clone, Copy)]
pub struct MaskSpec {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub shape: MaskShape,
    /// Feather radius in pixels. Zero renders a hard edge.
    pub feather: u32,
}

/// Render a mask to a row-major grayscale buffer of
/// `canvas_width * canvas_height` bytes. Shape regions extending past the
/// canvas are clipped; a shape entirely outside yields an all-black mask.
pub fn render(spec: &MaskSpec) -> Result<Vec<u8>> {
    if spec.canvas_width == 0 || spec.canvas_height == 0 {
        return Err(ImageGenError::InvalidGeometry(format!(
            "canvas must be at least 1x1, got {}x{}",
            spec.canvas_width, spec.canvas_height
        )));
    }
    if let MaskShape::Rectangle { width, height, .. } = spec.shape {
        if width <= 0 || height <= 0 {
            return Err(ImageGenError::InvalidGeometry(format!(
                "rectangle must be at least 1x1, got {}x{}",
                width, height
            )));
        }
    }
    if let MaskShape::Ellipse {
        radius_x, radius_y, ..
    } = spec.shape
    {
        if radius_x <= 0 || radius_y <= 0 {
            return Err(ImageGenError::InvalidGeometry(format!(
                "ellipse radii must be positive, got {}x{}",
                radius_x, radius_y
            )));
        }
    }

    let width = spec.canvas_width as usize;
    let height = spec.canvas_height as usize;

    if matches!(spec.shape, MaskShape::Full) {
        return Ok(vec![255u8; width * height]);
    }

    // Feather is bounded, then clamped to the short canvas side so the
    // band always fits.
    let feather = spec
        .feather
        .min(MAX_MASK_FEATHER as u32)
        .min(spec.canvas_width.min(spec.canvas_height)) as f64;

    let mut buf = vec![0u8; width * height];
    for py in 0..height {
        for px in 0..width {
            buf[py * width + px] = if feather <= 0.0 {
                if covers(&spec.shape, px as i64, py as i64) {
                    255
                } else {
                    0
                }
            } else {
                // Sample at the pixel center.
                let sx = px as f64 + 0.5;
                let sy = py as f64 + 0.5;
                intensity(signed_distance(&spec.shape, sx, sy), feather)
            };
        }
    }
    Ok(buf)
}

/// Hard-edge membership at integer pixel coordinates. Rectangles cover
/// [x, x+w) x [y, y+h); the ellipse boundary itself is included.
fn covers(shape: &MaskShape, px: i64, py: i64) -> bool {
    match *shape {
        MaskShape::Rectangle {
            x,
            y,
            width,
            height,
        } => px >= x && px < x + width && py >= y && py < y + height,
        MaskShape::Ellipse {
            center_x,
            center_y,
            radius_x,
            radius_y,
        } => {
            let nx = (px - center_x) as f64 / radius_x as f64;
            let ny = (py - center_y) as f64 / radius_y as f64;
            nx * nx + ny * ny <= 1.0
        }
        MaskShape::Full => true,
    }
}

/// Signed distance from a sample point to the shape edge, negative inside.
/// The ellipse distance is the normalized-radius approximation, exact on
/// the axes and close enough elsewhere for feathering.
fn signed_distance(shape: &MaskShape, sx: f64, sy: f64) -> f64 {
    match *shape {
        MaskShape::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            let half_w = width as f64 / 2.0;
            let half_h = height as f64 / 2.0;
            let cx = x as f64 + half_w;
            let cy = y as f64 + half_h;
            let qx = (sx - cx).abs() - half_w;
            let qy = (sy - cy).abs() - half_h;
            let ox = qx.max(0.0);
            let oy = qy.max(0.0);
            let outside = (ox * ox + oy * oy).sqrt();
            let inside = qx.max(qy).min(0.0);
            outside + inside
        }
        MaskShape::Ellipse {
            center_x,
            center_y,
            radius_x,
            radius_y,
        } => {
            let rx = radius_x as f64;
            let ry = radius_y as f64;
            let nx = (sx - center_x as f64) / rx;
            let ny = (sy - center_y as f64) / ry;
            let r = (nx * nx + ny * ny).sqrt();
            (r - 1.0) * rx.min(ry)
        }
        MaskShape::Full => -1.0,
    }
}

/// Map a signed distance to a 0..=255 intensity: a smoothstep ramp
/// spanning the feather band. Callers guarantee `feather > 0`.
fn intensity(d: f64, feather: f64) -> u8 {
    let t = (0.5 - d / feather).clamp(0.0, 1.0);
    let smooth = t * t * (3.0 - 2.0 * t);
    (smooth * 255.0).round() as u8
}

/// Encode a rendered mask buffer as a grayscale PNG.
pub fn encode_png(buf: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = GrayImage::from_raw(width, height, buf).ok_or_else(|| {
        ImageGenError::Internal(format!(
            "mask buffer does not match {}x{} canvas",
            width, height
        ))
    })?;
    let mut out = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| ImageGenError::Internal(format!("png encoding failed: {}", e)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> u8 {
        buf[(y * width + x) as usize]
    }

    #[test]
    fn hard_rectangle_is_binary() {
        let spec = MaskSpec {
            canvas_width: 100,
            canvas_height: 100,
            shape: MaskShape::Rectangle {
                x: 20,
                y: 20,
                width: 40,
                height: 40,
            },
            feather: 0,
        };
        let buf = render(&spec).unwrap();
        assert_eq!(pixel(&buf, 100, 40, 40), 255);
        assert_eq!(pixel(&buf, 100, 20, 20), 255);
        assert_eq!(pixel(&buf, 100, 59, 59), 255);
        assert_eq!(pixel(&buf, 100, 60, 60), 0);
        assert_eq!(pixel(&buf, 100, 10, 40), 0);
        assert_eq!(pixel(&buf, 100, 99, 99), 0);
        assert!(buf.iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn hard_ellipse_hits_center_and_misses_corners() {
        let spec = MaskSpec {
            canvas_width: 100,
            canvas_height: 100,
            shape: MaskShape::Ellipse {
                center_x: 50,
                center_y: 50,
                radius_x: 30,
                radius_y: 20,
            },
            feather: 0,
        };
        let buf = render(&spec).unwrap();
        assert_eq!(pixel(&buf, 100, 50, 50), 255);
        assert_eq!(pixel(&buf, 100, 0, 0), 0);
        assert_eq!(pixel(&buf, 100, 99, 50), 0);
        // Just inside the horizontal extent.
        assert_eq!(pixel(&buf, 100, 25, 50), 255);
        // Beyond the vertical radius.
        assert_eq!(pixel(&buf, 100, 50, 75), 0);
    }

    #[test]
    fn ellipse_boundary_pixels_are_included() {
        let spec = MaskSpec {
            canvas_width: 100,
            canvas_height: 100,
            shape: MaskShape::Ellipse {
                center_x: 50,
                center_y: 50,
                radius_x: 30,
                radius_y: 20,
            },
            feather: 0,
        };
        let buf = render(&spec).unwrap();
        // Pixels exactly on the boundary satisfy the inclusive membership
        // test on all four extremes.
        assert_eq!(pixel(&buf, 100, 80, 50), 255);
        assert_eq!(pixel(&buf, 100, 20, 50), 255);
        assert_eq!(pixel(&buf, 100, 50, 70), 255);
        assert_eq!(pixel(&buf, 100, 50, 30), 255);
        // One pixel past each extreme is outside.
        assert_eq!(pixel(&buf, 100, 81, 50), 0);
        assert_eq!(pixel(&buf, 100, 19, 50), 0);
        assert_eq!(pixel(&buf, 100, 50, 71), 0);
        assert_eq!(pixel(&buf, 100, 50, 29), 0);
    }

    #[test]
    fn oversized_feather_is_capped_at_the_bound() {
        let shape = MaskShape::Rectangle {
            x: 100,
            y: 100,
            width: 100,
            height: 100,
        };
        let oversized = MaskSpec {
            canvas_width: 300,
            canvas_height: 300,
            shape,
            feather: 200,
        };
        let at_bound = MaskSpec {
            canvas_width: 300,
            canvas_height: 300,
            shape,
            feather: 50,
        };
        assert_eq!(render(&oversized).unwrap(), render(&at_bound).unwrap());
    }

    #[test]
    fn feather_ramps_monotonically_across_the_edge() {
        let spec = MaskSpec {
            canvas_width: 200,
            canvas_height: 100,
            shape: MaskShape::Rectangle {
                x: 40,
                y: 20,
                width: 80,
                height: 60,
            },
            feather: 20,
        };
        let buf = render(&spec).unwrap();
        // Walk outward along a horizontal ray through the rectangle center:
        // intensity must never increase.
        let y = 50;
        let mut last = pixel(&buf, 200, 80, y);
        assert_eq!(last, 255);
        for x in 81..200 {
            let v = pixel(&buf, 200, x, y);
            assert!(v <= last, "intensity rose from {} to {} at x={}", last, v, x);
            last = v;
        }
        // Deep inside stays saturated, far outside fully dark.
        assert_eq!(pixel(&buf, 200, 80, 50), 255);
        assert_eq!(pixel(&buf, 200, 195, 50), 0);
        // The band actually contains intermediate values.
        assert!(buf.iter().any(|&v| v > 0 && v < 255));
    }

    #[test]
    fn full_mask_is_solid_white() {
        let spec = MaskSpec {
            canvas_width: 33,
            canvas_height: 17,
            shape: MaskShape::Full,
            feather: 0,
        };
        let buf = render(&spec).unwrap();
        assert_eq!(buf.len(), 33 * 17);
        assert!(buf.iter().all(|&v| v == 255));
    }

    #[test]
    fn shape_outside_canvas_clips_to_black() {
        let spec = MaskSpec {
            canvas_width: 50,
            canvas_height: 50,
            shape: MaskShape::Rectangle {
                x: 200,
                y: 200,
                width: 30,
                height: 30,
            },
            feather: 0,
        };
        let buf = render(&spec).unwrap();
        assert!(buf.iter().all(|&v| v == 0));
    }

    #[test]
    fn shape_partially_outside_is_clipped_not_rejected() {
        let spec = MaskSpec {
            canvas_width: 50,
            canvas_height: 50,
            shape: MaskShape::Rectangle {
                x: 40,
                y: 40,
                width: 30,
                height: 30,
            },
            feather: 0,
        };
        let buf = render(&spec).unwrap();
        assert_eq!(pixel(&buf, 50, 45, 45), 255);
        assert_eq!(pixel(&buf, 50, 10, 10), 0);
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let bad_rect = MaskSpec {
            canvas_width: 50,
            canvas_height: 50,
            shape: MaskShape::Rectangle {
                x: 0,
                y: 0,
                width: 0,
                height: 10,
            },
            feather: 0,
        };
        assert!(matches!(
            render(&bad_rect),
            Err(ImageGenError::InvalidGeometry(_))
        ));

        let bad_ellipse = MaskSpec {
            canvas_width: 50,
            canvas_height: 50,
            shape: MaskShape::Ellipse {
                center_x: 25,
                center_y: 25,
                radius_x: 10,
                radius_y: 0,
            },
            feather: 0,
        };
        assert!(matches!(
            render(&bad_ellipse),
            Err(ImageGenError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn encoded_png_round_trips_dimensions() {
        let spec = MaskSpec {
            canvas_width: 64,
            canvas_height: 48,
            shape: MaskShape::Full,
            feather: 0,
        };
        let buf = render(&spec).unwrap();
        let png = encode_png(buf, 64, 48).unwrap();
        let (w, h) = image::ImageReader::new(Cursor::new(&png))
            .with_guessed_format()
            .unwrap()
            .into_dimensions()
            .unwrap();
        assert_eq!((w, h), (64, 48));
    }
}
