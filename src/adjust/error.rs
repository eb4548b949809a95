use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdjustError>;

#[derive(Debug, Error)]
pub enum AdjustError {
    #[error("brightness {value} is outside the allowed range -100..=100")]
    BrightnessOutOfRange { value: i32 },

    #[error("contrast gain {value} is outside the allowed range 0.1..=3.0")]
    ContrastOutOfRange { value: f32 },

    #[error("noise reduction strength {value} is outside the allowed range 0..=10")]
    NoiseReductionOutOfRange { value: u8 },

    #[error("no channel at index {index}")]
    UnknownChannel { index: usize },
}
