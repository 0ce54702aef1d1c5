//! Drawing backends used by the icon generator.
//!
//! The generator only needs three operations from an image library: create a
//! filled square canvas, draw a filled ellipse, and encode the result as PNG.
//! [`ImagePainter`] provides them with the `image` crate when the `png`
//! feature is enabled. Without it, [`UnavailablePainter`] stands in and the
//! generator reports the missing capability instead of drawing anything.

use anyhow::{bail, Result};
use std::path::Path;

/// RGBA color.
pub type Color = [u8; 4];

/// Name reported when the drawing backend is missing.
pub const CAPABILITY: &str = "PNG image support";

/// Inclusive pixel box. An ellipse drawn into it touches all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Bounds {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }
}

pub trait Painter {
    type Image;

    /// Human readable name of what this painter provides.
    fn capability(&self) -> &str {
        CAPABILITY
    }

    fn is_available(&self) -> bool {
        true
    }

    /// Create a `size`×`size` image with every pixel set to `color`.
    fn new_image(&self, size: u32, color: Color) -> Result<Self::Image>;

    fn draw_filled_ellipse(&self, image: &mut Self::Image, bounds: Bounds, color: Color)
        -> Result<()>;

    /// Encode `image` as PNG at `path`, replacing any existing file.
    fn save_png(&self, image: &Self::Image, path: &Path) -> Result<()>;
}

#[cfg(feature = "png")]
pub use self::backend::ImagePainter;

#[cfg(feature = "png")]
pub type DefaultPainter = ImagePainter;

#[cfg(not(feature = "png"))]
pub type DefaultPainter = UnavailablePainter;

/// The painter the binary uses, depending on whether PNG support was compiled in.
pub fn default_painter() -> DefaultPainter {
    DefaultPainter::default()
}

#[cfg(feature = "png")]
mod backend {
    use super::{Bounds, Color, Painter};
    use anyhow::{bail, Context, Result};
    use image::{
        codecs::png::{CompressionType, FilterType, PngEncoder},
        ColorType, ImageEncoder, Rgba, RgbaImage,
    };
    use std::{
        fs::File,
        io::{BufWriter, Write},
        path::Path,
    };

    #[derive(Debug, Default, Clone, Copy)]
    pub struct ImagePainter;

    impl Painter for ImagePainter {
        type Image = RgbaImage;

        fn new_image(&self, size: u32, color: Color) -> Result<RgbaImage> {
            if size == 0 {
                bail!("Icon size must be positive");
            }
            Ok(RgbaImage::from_pixel(size, size, Rgba(color)))
        }

        fn draw_filled_ellipse(
            &self,
            image: &mut RgbaImage,
            bounds: Bounds,
            color: Color,
        ) -> Result<()> {
            if bounds.left > bounds.right || bounds.top > bounds.bottom {
                bail!("Invalid ellipse bounds {bounds:?}");
            }

            let (width, height) = image.dimensions();
            if bounds.left >= width || bounds.top >= height {
                return Ok(());
            }

            // Ellipse inscribed in the box covering the pixels left..=right, top..=bottom.
            let center_x = (bounds.left + bounds.right + 1) as f32 / 2.0;
            let center_y = (bounds.top + bounds.bottom + 1) as f32 / 2.0;
            let radius_x = (bounds.right - bounds.left + 1) as f32 / 2.0;
            let radius_y = (bounds.bottom - bounds.top + 1) as f32 / 2.0;

            let right = bounds.right.min(width - 1);
            let bottom = bounds.bottom.min(height - 1);

            for y in bounds.top..=bottom {
                for x in bounds.left..=right {
                    let dx = (x as f32 + 0.5 - center_x) / radius_x;
                    let dy = (y as f32 + 0.5 - center_y) / radius_y;

                    if dx * dx + dy * dy <= 1.0 {
                        image.put_pixel(x, y, Rgba(color));
                    }
                }
            }

            Ok(())
        }

        fn save_png(&self, image: &RgbaImage, path: &Path) -> Result<()> {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);

            write_png(image, &mut writer)
                .with_context(|| format!("Failed to write PNG {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("Failed to write PNG {}", path.display()))?;

            Ok(())
        }
    }

    // Encode image data as PNG with compression
    fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
        let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, FilterType::Adaptive);
        encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)?;
        Ok(())
    }
}

/// Stand-in used when the binary is built without the `png` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePainter;

impl Painter for UnavailablePainter {
    type Image = ();

    fn is_available(&self) -> bool {
        false
    }

    fn new_image(&self, _size: u32, _color: Color) -> Result<()> {
        bail!("{CAPABILITY} is not available")
    }

    fn draw_filled_ellipse(&self, _image: &mut (), _bounds: Bounds, _color: Color) -> Result<()> {
        bail!("{CAPABILITY} is not available")
    }

    fn save_png(&self, _image: &(), _path: &Path) -> Result<()> {
        bail!("{CAPABILITY} is not available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let bounds = Bounds {
            left: 8,
            top: 8,
            right: 24,
            bottom: 24,
        };
        assert!(bounds.contains(8, 8));
        assert!(bounds.contains(24, 24));
        assert!(!bounds.contains(7, 16));
        assert!(!bounds.contains(16, 25));
    }

    #[test]
    fn test_unavailable_painter() {
        let painter = UnavailablePainter;
        assert!(!painter.is_available());
        assert_eq!(painter.capability(), CAPABILITY);
        assert!(painter.new_image(16, [0, 0, 0, 255]).is_err());
        assert!(painter.save_png(&(), Path::new("icon16.png")).is_err());
    }

    #[cfg(feature = "png")]
    mod image_painter {
        use super::super::*;
        use image::Rgba;
        use tempfile::TempDir;

        const BG: Color = [102, 126, 234, 255];
        const FG: Color = [255, 107, 107, 255];

        fn circle_bounds() -> Bounds {
            Bounds {
                left: 8,
                top: 8,
                right: 24,
                bottom: 24,
            }
        }

        #[test]
        fn test_new_image_is_filled() {
            let img = ImagePainter.new_image(16, BG).unwrap();
            assert_eq!(img.dimensions(), (16, 16));
            assert!(img.pixels().all(|p| *p == Rgba(BG)));
        }

        #[test]
        fn test_new_image_rejects_zero_size() {
            assert!(ImagePainter.new_image(0, BG).is_err());
        }

        #[test]
        fn test_ellipse_stays_inside_bounds() {
            let mut img = ImagePainter.new_image(32, BG).unwrap();
            ImagePainter
                .draw_filled_ellipse(&mut img, circle_bounds(), FG)
                .unwrap();

            for (x, y, pixel) in img.enumerate_pixels() {
                if *pixel == Rgba(FG) {
                    assert!(circle_bounds().contains(x, y), "({x}, {y}) outside bounds");
                }
            }

            // Center and the four edge midpoints are filled, corners are not
            for (x, y) in [(16, 16), (8, 16), (24, 16), (16, 8), (16, 24)] {
                assert_eq!(*img.get_pixel(x, y), Rgba(FG), "({x}, {y})");
            }
            for (x, y) in [(8, 8), (24, 8), (8, 24), (24, 24)] {
                assert_eq!(*img.get_pixel(x, y), Rgba(BG), "({x}, {y})");
            }
        }

        #[test]
        fn test_ellipse_is_symmetric() {
            let mut img = ImagePainter.new_image(32, BG).unwrap();
            ImagePainter
                .draw_filled_ellipse(&mut img, circle_bounds(), FG)
                .unwrap();

            for y in 8..=24 {
                for x in 8..=24 {
                    let mirrored = img.get_pixel(32 - x, y);
                    let transposed = img.get_pixel(y, x);
                    assert_eq!(img.get_pixel(x, y), mirrored);
                    assert_eq!(img.get_pixel(x, y), transposed);
                }
            }
        }

        #[test]
        fn test_ellipse_is_clipped_to_image() {
            let mut img = ImagePainter.new_image(8, BG).unwrap();
            let bounds = Bounds {
                left: 4,
                top: 4,
                right: 20,
                bottom: 20,
            };
            ImagePainter.draw_filled_ellipse(&mut img, bounds, FG).unwrap();
            assert_eq!(*img.get_pixel(0, 0), Rgba(BG));
        }

        #[test]
        fn test_ellipse_rejects_inverted_bounds() {
            let mut img = ImagePainter.new_image(8, BG).unwrap();
            let bounds = Bounds {
                left: 6,
                top: 0,
                right: 2,
                bottom: 4,
            };
            assert!(ImagePainter.draw_filled_ellipse(&mut img, bounds, FG).is_err());
        }

        #[test]
        fn test_save_png_writes_rgba() {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let path = temp_dir.path().join("icon48.png");

            let img = ImagePainter.new_image(48, BG).unwrap();
            ImagePainter.save_png(&img, &path).unwrap();

            let decoded = image::open(&path).expect("Failed to load saved PNG");
            assert_eq!(decoded.width(), 48);
            assert_eq!(decoded.height(), 48);
            assert_eq!(decoded.color(), image::ColorType::Rgba8);
        }

        #[test]
        fn test_save_png_into_missing_directory_fails() {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let path = temp_dir.path().join("missing").join("icon16.png");

            let img = ImagePainter.new_image(16, BG).unwrap();
            let err = ImagePainter.save_png(&img, &path).unwrap_err();

            assert!(format!("{err:#}").contains("Failed to create"));
            assert!(!path.exists());
        }
    }
}
