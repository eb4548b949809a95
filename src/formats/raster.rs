use std::path::Path;

use ndarray::Array2;

use crate::model::{Channel, ChannelImage};

use super::Result;
use super::util::CHANNEL_NAMES;

pub(crate) fn read_raster(path: &Path) -> Result<ChannelImage> {
    // Grayscale inputs replicate into all three components via to_rgb8.
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut planes = vec![Vec::with_capacity(width as usize * height as usize); 3];
    for pixel in rgb.pixels() {
        for (component, plane) in planes.iter_mut().enumerate() {
            plane.push(pixel.0[component]);
        }
    }

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
