mod error;
mod geometry;
mod image;
mod types;


pub use error::{ModelError, Result};
pub use geometry::{BoundingBox, Point, polygon_contains};
pub use image::{Channel, ChannelImage};
pub use types::{CellType, CellTypeConfig, CellTypeId, MarkerShape};
