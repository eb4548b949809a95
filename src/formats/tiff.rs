use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};

use crate::model::{Channel, ChannelImage, ModelError};

use super::util::{CHANNEL_NAMES, f32_to_u8, u16_to_u8};
use super::{FormatError, Result};

pub(crate) fn read_tiff(path: &Path) -> Result<ChannelImage> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let mut pages = Vec::new();

    loop {
        pages.push(decode_tiff_page(&mut decoder, width, height)?);
        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
        let (other_width, other_height) = decoder.dimensions()?;
        if other_width != width || other_height != height {
            return Err(FormatError::Model(ModelError::ChannelDimensionMismatch {
                channel: CHANNEL_NAMES
                    .get(pages.len())
                    .copied()
                    .unwrap_or("extra")
                    .to_string(),
                width: width as usize,
                height: height as usize,
                found_width: other_width as usize,
                found_height: other_height as usize,
            }));
        }
    }

    if pages.len() > CHANNEL_NAMES.len() {
        log::warn!(
            "{}: {} pages, keeping the first {}",
            path.display(),
            pages.len(),
            CHANNEL_NAMES.len()
        );
        pages.truncate(CHANNEL_NAMES.len());
    }

    let planes: Vec<Vec<u8>> = if pages.len() == 1 {
        // Single-page grayscale replicates into all three components.
        let page = pages.remove(0);
        vec![page.clone(), page.clone(), page]
    } else {
        let zero = vec![0u8; width as usize * height as usize];
        let mut planes = pages;
        while planes.len() < CHANNEL_NAMES.len() {
            planes.push(zero.clone());
        }
        planes
    };

    let channels = planes
        .into_iter()
        .zip(CHANNEL_NAMES)
        .map(|(plane, name)| {
            let samples = Array2::from_shape_vec((height as usize, width as usize), plane)
                .expect("shape checked");
            Channel::new(name, samples)
        })
        .collect();
    Ok(ChannelImage::new(channels)?)
}

fn decode_tiff_page(decoder: &mut Decoder<File>, width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize;
    let values = match decoder.read_image()? {
        DecodingResult::U8(buffer) => {
            if buffer.len() != expected {
                return Err(FormatError::UnsupportedLayout(
                    "TIFF pages with interleaved samples are not supported".into(),
                ));
            }
            buffer
        }
        DecodingResult::U16(buffer) => {
            if buffer.len() != expected {
                return Err(FormatError::UnsupportedLayout(
                    "TIFF pages with interleaved samples are not supported".into(),
                ));
            }
            buffer.into_iter().map(u16_to_u8).collect()
        }
        DecodingResult::F32(buffer) => {
            if buffer.len() != expected {
                return Err(FormatError::UnsupportedLayout(
                    "TIFF pages with interleaved samples are not supported".into(),
                ));
            }
            buffer.into_iter().map(f32_to_u8).collect()
        }
        other => {
            return Err(FormatError::UnsupportedLayout(format!(
                "unsupported TIFF sample type: {other:?}"
            )));
        }
    };
    Ok(values)
}
