use std::path::Path;

use super::{FormatError, Result};

pub(crate) const CHANNEL_NAMES: [&str; 3] = ["R", "G", "B"];

pub(crate) fn extension(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| FormatError::UnsupportedFormat(path.to_string_lossy().to_string()))?;
    Ok(ext)
}

pub(crate) fn u16_to_u8(value: u16) -> u8 {
    (value / 257) as u8
}

pub(crate) fn f32_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
