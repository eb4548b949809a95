use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "channel `{channel}` is {found_width}x{found_height} but the image is {width}x{height}"
    )]
    ChannelDimensionMismatch {
        channel: String,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("an image must contain at least one channel")]
    NoChannels,

    #[error("zero-sized image dimensions: {width}x{height}")]
    ZeroSizedImage { width: usize, height: usize },
}
