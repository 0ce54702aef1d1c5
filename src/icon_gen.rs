use crate::painter::{Bounds, Color, Painter};
use anyhow::Context;
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Icon sizes written on every run, in order.
pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

/// Directory the binary writes into, relative to the working directory.
pub const OUTPUT_DIR: &str = "icons";

pub const BACKGROUND: Color = [102, 126, 234, 255];
pub const MARKER: Color = [255, 107, 107, 255];

/// Icons smaller than this are left as plain background.
pub const MARKER_MIN_SIZE: u32 = 32;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{capability} is not available")]
    MissingCapability { capability: String },
    #[error(transparent)]
    OperationFailure(#[from] anyhow::Error),
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

/// Box of the circle drawn on an icon of `size` pixels, if it gets one.
///
/// The circle is centered at `size / 2` with radius `size / 4`, both rounded down.
pub fn marker_bounds(size: u32) -> Option<Bounds> {
    if size < MARKER_MIN_SIZE {
        return None;
    }

    let center = size / 2;
    let radius = size / 4;

    Some(Bounds {
        left: center - radius,
        top: center - radius,
        right: center + radius,
        bottom: center + radius,
    })
}

/// Draw and save every icon into `out_dir`, reporting each file to `out`.
///
/// Stops at the first failure. Icons saved before it are left on disk.
pub fn generate_icons<P: Painter, W: Write>(
    painter: &P,
    out_dir: &Path,
    out: &mut W,
) -> Result<Vec<PathBuf>, GenerateError> {
    if !painter.is_available() {
        return Err(GenerateError::MissingCapability {
            capability: painter.capability().to_string(),
        });
    }

    let mut written = Vec::with_capacity(ICON_SIZES.len());

    for size in ICON_SIZES {
        let mut image = painter
            .new_image(size, BACKGROUND)
            .with_context(|| format!("Failed to create {size}x{size} image"))?;

        if let Some(bounds) = marker_bounds(size) {
            painter
                .draw_filled_ellipse(&mut image, bounds, MARKER)
                .with_context(|| format!("Failed to draw marker on {size}x{size} image"))?;
        }

        let path = out_dir.join(icon_file_name(size));
        painter.save_png(&image, &path)?;

        writeln!(out, "Created {}", path.display()).context("Failed to report progress")?;
        written.push(path);
    }

    writeln!(out, "\nAll icon files created successfully!").context("Failed to report progress")?;
    writeln!(
        out,
        "Note: These are placeholder icons. For production, create proper icons from icon.svg"
    )
    .context("Failed to report progress")?;

    Ok(written)
}

/// Run the generator and report any failure to `out` instead of returning it.
///
/// Only errors writing the report itself are returned.
pub fn run<P: Painter, W: Write>(painter: &P, out_dir: &Path, out: &mut W) -> io::Result<()> {
    match generate_icons(painter, out_dir, out) {
        Ok(_) => Ok(()),
        Err(GenerateError::MissingCapability { capability }) => {
            print_missing_capability(&capability, out_dir, out)
        }
        Err(GenerateError::OperationFailure(err)) => writeln!(out, "Error creating icons: {err:#}"),
    }
}

fn print_missing_capability<W: Write>(
    capability: &str,
    out_dir: &Path,
    out: &mut W,
) -> io::Result<()> {
    let sizes = ICON_SIZES
        .iter()
        .map(|size| format!("{size}x{size}"))
        .collect::<Vec<_>>()
        .join(", ");
    let names = ICON_SIZES
        .iter()
        .map(|size| icon_file_name(*size))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "Error: {capability} is not available.")?;
    writeln!(out, "Install it by rebuilding with PNG support: cargo build --features png")?;
    writeln!(out, "\nAlternatively, manually create PNG icons at sizes {sizes}")?;
    writeln!(
        out,
        "and save them as {names} in the {}/ directory.",
        out_dir.display()
    )
}
