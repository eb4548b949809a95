use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;

use crate::annotate::{MarkerStore, RoiStore};
use crate::model::{CellType, CellTypeConfig, MarkerShape, Point};

const ROI_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
const VERTEX_RADIUS: i32 = 3;
const DOT_RADIUS: i32 = 3;

/// Burns ROI outlines and marker glyphs into a copy of the composite at its
/// native resolution.
pub fn render_overlay(
    composite: &RgbImage,
    markers: &MarkerStore,
    rois: &RoiStore,
    config: &CellTypeConfig,
) -> RgbImage {
    let mut canvas = composite.clone();

    for roi in rois.all() {
        let vertices = roi.vertices();
        if vertices.len() >= 2 {
            let edge_count = if roi.is_closed() {
                vertices.len()
            } else {
                vertices.len() - 1
            };
            for index in 0..edge_count {
                let from = vertices[index];
                let to = vertices[(index + 1) % vertices.len()];
                draw_line_segment_mut(
                    &mut canvas,
                    (from.x as f32, from.y as f32),
                    (to.x as f32, to.y as f32),
                    ROI_COLOR,
                );
            }
        }
        for vertex in vertices {
            draw_filled_circle_mut(
                &mut canvas,
                (vertex.x as i32, vertex.y as i32),
                VERTEX_RADIUS,
                ROI_COLOR,
            );
        }
    }

    for marker in markers.all() {
        if let Some(cell_type) = config.get(marker.type_id) {
            draw_marker(&mut canvas, marker.position, cell_type);
        }
    }

    canvas
}

fn draw_marker(canvas: &mut RgbImage, position: Point, cell_type: &CellType) {
    let color = Rgb(cell_type.color);
    let x = position.x as i32;
    let y = position.y as i32;
    let half = (cell_type.size / 2) as i32;

    match cell_type.shape {
        MarkerShape::Dot => {
            draw_filled_circle_mut(canvas, (x, y), DOT_RADIUS, color);
        }
        MarkerShape::Circle => {
            draw_hollow_circle_mut(canvas, (x, y), half.max(1), color);
        }
        MarkerShape::Square => {
            let side = (half * 2).max(2) as u32;
            draw_hollow_rect_mut(canvas, Rect::at(x - half, y - half).of_size(side, side), color);
        }
        MarkerShape::Triangle => {
            let top = (position.x as f32, (y - half) as f32);
            let left = ((x - half) as f32, (y + half) as f32);
            let right = ((x + half) as f32, (y + half) as f32);
            draw_line_segment_mut(canvas, top, left, color);
            draw_line_segment_mut(canvas, left, right, color);
            draw_line_segment_mut(canvas, right, top, color);
        }
        MarkerShape::Cross => {
            let half = half as f32;
            let x = position.x as f32;
            let y = position.y as f32;
            draw_line_segment_mut(canvas, (x - half, y), (x + half, y), color);
            draw_line_segment_mut(canvas, (x, y - half), (x, y + half), color);
        }
    }
}
