use std::path::Path;

use crate::model::ChannelImage;

use super::raster::read_raster;
use super::tiff::read_tiff;
use super::util::extension;
use super::{FormatError, Result};

/// Decodes an image file into a three-channel buffer. Multi-page TIFFs map
/// one page per channel; RGB raster formats map the three fixed components.
pub fn read_image(path: impl AsRef<Path>) -> Result<ChannelImage> {
    let path = path.as_ref();
    let extension = extension(path)?;
    let image = match extension.as_str() {
        "png" | "jpg" | "jpeg" => read_raster(path)?,
        "tif" | "tiff" => read_tiff(path)?,
        other => return Err(FormatError::UnsupportedFormat(other.to_string())),
    };
    log::info!(
        "loaded {} as {}x{} with {} channels",
        path.display(),
        image.width(),
        image.height(),
        image.channels().len()
    );
    Ok(image)
}

pub fn supported_formats() -> &'static [&'static str] {
    &["png", "jpg", "jpeg", "tif", "tiff"]
}
