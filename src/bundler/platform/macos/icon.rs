//! ICNS icon generation for macOS bundles.
//!
//! Rasterizes one source image at the ten standard iconset sizes, stages the
//! PNGs in a temporary `AppIcon.iconset` directory and lets `iconutil` pack
//! them into a single `.icns` container. The staging directory is removed
//! when the function returns, whether or not packaging succeeded.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::process::run_tool,
};
use image::{DynamicImage, ImageFormat, imageops::FilterType};
use std::{ffi::OsStr, io::Cursor, path::Path, time::Duration};

/// One entry of an `.iconset` directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconVariant {
    /// Point size.
    pub size: u32,
    /// Backing scale factor (1 or 2).
    pub scale: u32,
    /// File label, as in `icon_<label>.png`.
    pub label: &'static str,
}

impl IconVariant {
    /// Edge length in pixels.
    pub const fn pixels(&self) -> u32 {
        self.size * self.scale
    }

    /// File name inside the iconset.
    pub fn file_name(&self) -> String {
        format!("icon_{}.png", self.label)
    }
}

/// The ten variants `iconutil` expects, 16 pt through 512 pt at 1x and 2x.
pub const ICONSET_VARIANTS: [IconVariant; 10] = [
    IconVariant { size: 16, scale: 1, label: "16x16" },
    IconVariant { size: 16, scale: 2, label: "16x16@2x" },
    IconVariant { size: 32, scale: 1, label: "32x32" },
    IconVariant { size: 32, scale: 2, label: "32x32@2x" },
    IconVariant { size: 128, scale: 1, label: "128x128" },
    IconVariant { size: 128, scale: 2, label: "128x128@2x" },
    IconVariant { size: 256, scale: 1, label: "256x256" },
    IconVariant { size: 256, scale: 2, label: "256x256@2x" },
    IconVariant { size: 512, scale: 1, label: "512x512" },
    IconVariant { size: 512, scale: 2, label: "512x512@2x" },
];

/// Decodes icon bytes in any format the `image` crate understands.
pub fn decode_icon(bytes: &[u8]) -> std::result::Result<DynamicImage, image::ImageError> {
    image::load_from_memory(bytes)
}

/// Resizes `image` to a `pixels` square with Lanczos3 and encodes it as PNG.
pub fn render_png(image: &DynamicImage, pixels: u32) -> Result<Vec<u8>> {
    let resized = image::imageops::resize(&image.to_rgba8(), pixels, pixels, FilterType::Lanczos3);

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(resized)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|source| Error::IconEncoding {
            size: pixels,
            source,
        })?;

    Ok(buffer.into_inner())
}

/// Builds `.icns` bytes from `image` using the `iconutil` at `iconutil`.
///
/// # Errors
///
/// - [`Error::IconEncoding`] if a variant cannot be encoded
/// - [`Error::IconPackaging`] if `iconutil` exits non-zero (carries stderr)
/// - [`Error::ToolTimeout`] / [`Error::ToolLaunch`] for process failures
pub async fn generate_icns(
    image: DynamicImage,
    iconutil: &Path,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let staging = tempfile::Builder::new()
        .prefix("web2app-icon-")
        .tempdir()
        .fs_context("creating icon staging directory in", std::env::temp_dir())?;
    let iconset_dir = staging.path().join("AppIcon.iconset");
    let icns_path = staging.path().join("AppIcon.icns");

    tokio::fs::create_dir_all(&iconset_dir)
        .await
        .fs_context("creating iconset directory", &iconset_dir)?;

    // Resizing ten variants up to 1024 px is CPU bound.
    let rendered = tokio::task::spawn_blocking(move || {
        ICONSET_VARIANTS
            .iter()
            .map(|variant| -> Result<(String, Vec<u8>)> {
                Ok((variant.file_name(), render_png(&image, variant.pixels())?))
            })
            .collect::<Result<Vec<_>>>()
    })
    .await
    .map_err(|e| Error::GenericError(format!("Icon resize task failed: {}", e)))??;

    for (file_name, png) in rendered {
        let path = iconset_dir.join(&file_name);
        tokio::fs::write(&path, png)
            .await
            .fs_context("writing iconset image", &path)?;
        log::debug!("Wrote {}", file_name);
    }

    let output = run_tool(
        iconutil,
        [
            OsStr::new("-c"),
            OsStr::new("icns"),
            iconset_dir.as_os_str(),
            OsStr::new("-o"),
            icns_path.as_os_str(),
        ],
        timeout,
    )
    .await?;

    if !output.success() {
        let message = output.error_message();
        log::error!("iconutil failed: {}", message);
        return Err(Error::IconPackaging(message));
    }

    let icns = tokio::fs::read(&icns_path)
        .await
        .fs_context("reading generated icns", &icns_path)?;

    log::info!("Generated .icns file ({} bytes)", icns.len());
    Ok(icns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 24, Rgba([200, 30, 60, 255])))
    }

    #[test]
    fn variant_table_covers_standard_iconset() {
        let pixels: Vec<u32> = ICONSET_VARIANTS.iter().map(IconVariant::pixels).collect();
        assert_eq!(pixels, [16, 32, 32, 64, 128, 256, 256, 512, 512, 1024]);
        assert_eq!(ICONSET_VARIANTS[1].file_name(), "icon_16x16@2x.png");
    }

    #[test]
    fn rendered_png_is_square_at_requested_size() {
        let png = render_png(&sample_image(), 32).unwrap();
        let decoded = decode_icon(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn garbage_bytes_do_not_decode() {
        assert!(decode_icon(b"<svg xmlns='http://www.w3.org/2000/svg'/>").is_err());
    }
}
