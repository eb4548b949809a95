use std::f32::consts::PI;

use ndarray::Array2;
use rayon::prelude::*;

use super::ChannelAdjustments;

const MIDPOINT: f32 = 128.0;
const BRIGHTNESS_SCALE: f32 = 2.55;
const SIGMA_PER_STRENGTH: f32 = 0.2;

/// Applies noise reduction, then brightness, then contrast to one channel
/// plane, clamping into the valid intensity range. Deterministic for a given
/// input and parameter set.
pub(crate) fn adjust_plane(samples: &Array2<u8>, params: &ChannelAdjustments) -> Array2<u8> {
    let height = samples.nrows();
    let width = samples.ncols();
    let mut values = samples.iter().map(|value| f32::from(*value)).collect::<Vec<_>>();

    if params.noise_reduction > 0 {
        let sigma = f32::from(params.noise_reduction) * SIGMA_PER_STRENGTH;
        values = gaussian_smooth(&values, width, height, sigma);
    }

    let offset = params.brightness as f32 * BRIGHTNESS_SCALE;
    let gain = params.contrast;
    let output = values
        .into_iter()
        .map(|value| {
            let shifted = value + offset;
            let scaled = (shifted - MIDPOINT) * gain + MIDPOINT;
            scaled.clamp(0.0, 255.0).round() as u8
        })
        .collect::<Vec<_>>();

    Array2::from_shape_vec((height, width), output).expect("shape unchanged")
}

fn gaussian_smooth(values: &[f32], width: usize, height: usize, sigma: f32) -> Vec<f32> {
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let horizontal = blur_rows(values, width, height, &kernel, radius);
    blur_columns(&horizontal, width, height, &kernel, radius)
}

fn blur_rows(
    input: &[f32],
    width: usize,
    height: usize,
    kernel: &[f32],
    radius: isize,
) -> Vec<f32> {
    let rows = (0..height)
        .into_par_iter()
        .map(|y| {
            let row = &input[y * width..(y + 1) * width];
            let mut output = vec![0.0_f32; width];
            for (x, value) in output.iter_mut().enumerate() {
                let mut sum = 0.0_f32;
                for (kernel_index, weight) in kernel.iter().enumerate() {
                    let offset = kernel_index as isize - radius;
                    let clamped = (x as isize + offset).clamp(0, width as isize - 1) as usize;
                    sum += row[clamped] * *weight;
                }
                *value = sum;
            }
            output
        })
        .collect::<Vec<_>>();
    rows.concat()
}

fn blur_columns(
    input: &[f32],
    width: usize,
    height: usize,
    kernel: &[f32],
    radius: isize,
) -> Vec<f32> {
    let rows = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut output = vec![0.0_f32; width];
            for (x, value) in output.iter_mut().enumerate() {
                let mut sum = 0.0_f32;
                for (kernel_index, weight) in kernel.iter().enumerate() {
                    let offset = kernel_index as isize - radius;
                    let clamped = (y as isize + offset).clamp(0, height as isize - 1) as usize;
                    sum += input[x + width * clamped] * *weight;
                }
                *value = sum;
            }
            output
        })
        .collect::<Vec<_>>();
    rows.concat()
}

fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (sigma * 3.0).ceil().max(1.0) as i32;
    let mut kernel = Vec::with_capacity((radius * 2 + 1) as usize);
    let mut sum = 0.0_f32;
    for offset in -radius..=radius {
        let distance = offset as f32;
        let value =
            (-(distance * distance) / (2.0 * sigma * sigma)).exp() / (sigma * (2.0 * PI).sqrt());
        kernel.push(value);
        sum += value;
    }
    kernel
        .iter_mut()
        .for_each(|value| *value /= sum.max(f32::EPSILON));
    kernel
}
