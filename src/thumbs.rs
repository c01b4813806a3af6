use crate::images::Item;
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use rayon::prelude::*;
use sha1::Sha1;
use std::fs;
use std::path::{Path, PathBuf};

/// Pixel dimensions for generated thumbnails (Lanczos downscale).
pub const THUMB_PIXEL_WIDTH: u32 = 180;
pub const THUMB_PIXEL_HEIGHT: u32 = 120;

/// Pixel dimensions for the focus-mode image.
pub const FOCUS_PIXEL_WIDTH: u32 = 800;
pub const FOCUS_PIXEL_HEIGHT: u32 = 600;

/// Synchronous capability to produce a bitmap file for a source image at a
/// given pixel size. The rendering core only ever sees this trait; a failed
/// render becomes an absent bitmap, never an error inside the core.
pub trait BitmapRenderer: Sync {
    fn render(&self, source: &Path, width: u32, height: u32) -> Result<PathBuf>;
}

/// Default renderer: decodes with the `image` crate, applies the EXIF
/// orientation, downscales with Lanczos3 and writes a PNG into a
/// per-session temp directory.
pub struct ImageRenderer {
    out_dir: PathBuf,
}

impl ImageRenderer {
    pub fn new() -> Result<Self> {
        let out_dir = std::env::temp_dir().join(format!("triv-{}", std::process::id()));
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("could not create {}", out_dir.display()))?;
        Ok(Self { out_dir })
    }

    #[cfg(test)]
    fn with_dir(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    /// Output path derived from a SHA1 of the source path and target size,
    /// so distinct sources and sizes never collide.
    fn output_path(&self, source: &Path, width: u32, height: u32) -> PathBuf {
        let mut hasher = Sha1::new();
        hasher.update(source.to_string_lossy().as_bytes());
        hasher.update(format!("{width}x{height}").as_bytes());
        let hex = hasher.digest().to_string();
        self.out_dir.join(format!("{hex}.png"))
    }
}

impl BitmapRenderer for ImageRenderer {
    fn render(&self, source: &Path, width: u32, height: u32) -> Result<PathBuf> {
        let img = image::open(source)
            .with_context(|| format!("could not decode {}", source.display()))?;
        let img = auto_orient(img, source);
        let small = img.resize(width, height, FilterType::Lanczos3);
        let out = self.output_path(source, width, height);
        small
            .save(&out)
            .with_context(|| format!("could not write {}", out.display()))?;
        Ok(out)
    }
}

/// Rotates/flips according to the EXIF orientation tag, if one is present.
fn auto_orient(img: DynamicImage, path: &Path) -> DynamicImage {
    let Some(code) = exif_orientation(path) else {
        return img;
    };
    match code {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

fn exif_orientation(path: &Path) -> Option<u16> {
    let data = fs::read(path).ok()?;
    let exif = rexif::parse_buffer_quiet(&data).0.ok()?;
    let entry = exif
        .entries
        .iter()
        .find(|e| e.tag == rexif::ExifTag::Orientation)?;
    let raw = match &entry.value {
        rexif::TagValue::U16(vals) => vals.first().copied(),
        rexif::TagValue::U8(vals) => vals.first().map(|&v| v as u16),
        _ => None,
    }?;
    (1..=8).contains(&raw).then_some(raw)
}

/// One-shot thumbnail batch over all items, in parallel. Failures are
/// reported on stderr (this runs before raw mode) and leave the item with
/// an absent bitmap; successes mark the bitmap transient for teardown.
pub fn generate_thumbnails(items: &mut [Item], renderer: &dyn BitmapRenderer) {
    items.par_iter_mut().for_each(|item| {
        match renderer.render(&item.original, THUMB_PIXEL_WIDTH, THUMB_PIXEL_HEIGHT) {
            Ok(path) => {
                item.bitmap = Some(path);
                item.transient = true;
            }
            Err(err) => {
                eprintln!(
                    "failed to render thumbnail for {}: {err:#}",
                    item.original.display()
                );
            }
        }
    });
}
