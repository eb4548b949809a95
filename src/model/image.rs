use ndarray::Array2;

use super::{ModelError, Result};

/// One decoded intensity plane. Samples are indexed `[(y, x)]` and immutable
/// for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    samples: Array2<u8>,
}

impl Channel {
    pub fn new(name: impl Into<String>, samples: Array2<u8>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &Array2<u8> {
        &self.samples
    }

    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    pub fn height(&self) -> usize {
        self.samples.nrows()
    }
}

/// An ordered set of named channels sharing one width and height.
#[derive(Debug, Clone)]
pub struct ChannelImage {
    width: usize,
    height: usize,
    channels: Vec<Channel>,
}

impl ChannelImage {
    pub fn new(channels: Vec<Channel>) -> Result<Self> {
        let first = channels.first().ok_or(ModelError::NoChannels)?;
        let width = first.width();
        let height = first.height();
        if width == 0 || height == 0 {
            return Err(ModelError::ZeroSizedImage { width, height });
        }
        for channel in &channels {
            if channel.width() != width || channel.height() != height {
                return Err(ModelError::ChannelDimensionMismatch {
                    channel: channel.name().to_string(),
                    width,
                    height,
                    found_width: channel.width(),
                    found_height: channel.height(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }
}
