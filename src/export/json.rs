use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adjust::ImageChannelBuffer;
use crate::annotate::{MarkerStore, RoiStore};
use crate::model::CellTypeConfig;

use super::{ExportError, Result};

/// Self-describing annotation document: the full marker list, ROI vertex
/// lists and the count table, plus the image dimensions and per-channel
/// adjustments needed to reproduce the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<AdjustmentRecord>,
    pub markers: Vec<MarkerRecord>,
    pub rois: Vec<RoiRecord>,
    pub counts: Vec<CountRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    pub channel: String,
    pub brightness: i32,
    pub contrast: f32,
    pub noise_reduction: u8,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub cell_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiRecord {
    pub id: u64,
    pub label: String,
    pub vertices: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRecord {
    pub roi: String,
    #[serde(rename = "type")]
    pub cell_type: String,
    pub count: u64,
}

pub fn annotations_json(
    buffer: Option<&ImageChannelBuffer>,
    markers: &MarkerStore,
    rois: &RoiStore,
    config: &CellTypeConfig,
) -> Result<String> {
    let document = build_document(buffer, markers, rois, config);
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn write_annotations_json(
    path: impl AsRef<Path>,
    buffer: Option<&ImageChannelBuffer>,
    markers: &MarkerStore,
    rois: &RoiStore,
    config: &CellTypeConfig,
) -> Result<()> {
    let rendered = annotations_json(buffer, markers, rois, config)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

pub fn parse_annotations(raw: &str) -> Result<Document> {
    let document: Document = serde_json::from_str(raw)?;
    for roi in &document.rois {
        if roi.vertices.len() < 3 {
            return Err(ExportError::InvalidDocument(format!(
                "ROI `{}` has {} vertices; a closed ROI needs at least 3",
                roi.label,
                roi.vertices.len()
            )));
        }
    }
    Ok(document)
}

fn build_document(
    buffer: Option<&ImageChannelBuffer>,
    markers: &MarkerStore,
    rois: &RoiStore,
    config: &CellTypeConfig,
) -> Document {
    let image = buffer.map(|buffer| ImageInfo {
        width: buffer.image().width(),
        height: buffer.image().height(),
    });

    let adjustments = buffer
        .map(|buffer| {
            buffer
                .image()
                .channels()
                .iter()
                .enumerate()
                .filter_map(|(index, channel)| {
                    let params = buffer.adjustments(index).ok()?;
                    Some(AdjustmentRecord {
                        channel: channel.name().to_string(),
                        brightness: params.brightness,
                        contrast: params.contrast,
                        noise_reduction: params.noise_reduction,
                        visible: params.visible,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let marker_records = markers
        .all()
        .iter()
        .map(|marker| MarkerRecord {
            id: marker.id,
            x: marker.position.x,
            y: marker.position.y,
            cell_type: config
                .get(marker.type_id)
                .map(|cell_type| cell_type.label.clone())
                .unwrap_or_default(),
        })
        .collect();

    let roi_records = rois
        .all()
        .iter()
        .filter(|roi| roi.is_closed())
        .map(|roi| RoiRecord {
            id: roi.id,
            label: roi.label.clone(),
            vertices: roi
                .vertices()
                .iter()
                .map(|vertex| [vertex.x, vertex.y])
                .collect(),
        })
        .collect();

    let counts = rois
        .all()
        .iter()
        .filter(|roi| roi.is_closed())
        .flat_map(|roi| {
            config.all().iter().map(|cell_type| CountRecord {
                roi: roi.label.clone(),
                cell_type: cell_type.label.clone(),
                count: roi.counts().get(&cell_type.id).copied().unwrap_or(0),
            })
        })
        .collect();

    Document {
        image,
        adjustments,
        markers: marker_records,
        rois: roi_records,
        counts,
    }
}
