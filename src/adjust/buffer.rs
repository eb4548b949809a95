use image::RgbImage;
use ndarray::Array2;

use crate::model::ChannelImage;

use super::pipeline::adjust_plane;
use super::{AdjustError, ChannelAdjustments, Result};

/// Owns the immutable decoded channels plus their adjustment parameters and
/// caches. A parameter change invalidates only the affected channel's
/// adjusted plane; a visibility change invalidates only the composite.
#[derive(Debug, Clone)]
pub struct ImageChannelBuffer {
    image: ChannelImage,
    params: Vec<ChannelAdjustments>,
    planes: Vec<Option<Array2<u8>>>,
    composite: Option<RgbImage>,
}

impl ImageChannelBuffer {
    pub fn new(image: ChannelImage) -> Self {
        let count = image.channels().len();
        Self {
            image,
            params: vec![ChannelAdjustments::default(); count],
            planes: vec![None; count],
            composite: None,
        }
    }

    pub fn image(&self) -> &ChannelImage {
        &self.image
    }

    pub fn adjustments(&self, channel: usize) -> Result<ChannelAdjustments> {
        self.params
            .get(channel)
            .copied()
            .ok_or(AdjustError::UnknownChannel { index: channel })
    }

    pub fn set_adjustments(&mut self, channel: usize, params: ChannelAdjustments) -> Result<()> {
        params.validate()?;
        let current = self
            .params
            .get_mut(channel)
            .ok_or(AdjustError::UnknownChannel { index: channel })?;
        if *current == params {
            return Ok(());
        }
        if !current.same_plane_transform(&params) {
            self.planes[channel] = None;
        }
        *current = params;
        self.composite = None;
        Ok(())
    }

    pub fn set_visible(&mut self, channel: usize, visible: bool) -> Result<()> {
        let mut params = self.adjustments(channel)?;
        params.visible = visible;
        self.set_adjustments(channel, params)
    }

    pub fn reset_adjustments(&mut self) {
        for channel in 0..self.params.len() {
            self.params[channel] = ChannelAdjustments::default();
            self.planes[channel] = None;
        }
        self.composite = None;
    }

    /// The displayable image: each visible channel adjusted and mapped onto
    /// its color component, invisible channels contributing zero. Cached
    /// until a parameter changes.
    pub fn composite(&mut self) -> &RgbImage {
        if self.composite.is_none() {
            self.composite = Some(self.render_composite());
        }
        self.composite.as_ref().expect("just rendered")
    }

    fn render_composite(&mut self) -> RgbImage {
        for channel in 0..self.planes.len() {
            if self.planes[channel].is_none() {
                let source = self.image.channels()[channel].samples();
                self.planes[channel] = Some(adjust_plane(source, &self.params[channel]));
            }
        }

        let width = self.image.width();
        let height = self.image.height();
        let mut output = RgbImage::new(width as u32, height as u32);
        for (channel, plane) in self.planes.iter().enumerate().take(3) {
            if !self.params[channel].visible {
                continue;
            }
            let plane = plane.as_ref().expect("planes filled above");
            for ((y, x), value) in plane.indexed_iter() {
                output.get_pixel_mut(x as u32, y as u32).0[channel] = *value;
            }
        }
        output
    }
}
