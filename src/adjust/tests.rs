use ndarray::Array2;

use crate::model::{Channel, ChannelImage};

use super::{AdjustError, ChannelAdjustments, ImageChannelBuffer};

fn flat_image(red: u8, green: u8, blue: u8) -> ChannelImage {
    let channels = vec![
        Channel::new("R", Array2::from_elem((4, 4), red)),
        Channel::new("G", Array2::from_elem((4, 4), green)),
        Channel::new("B", Array2::from_elem((4, 4), blue)),
    ];
    ChannelImage::new(channels).expect("image")
}

#[test]
fn neutral_adjustments_pass_samples_through() {
    let mut buffer = ImageChannelBuffer::new(flat_image(10, 100, 200));
    let pixel = *buffer.composite().get_pixel(0, 0);
    assert_eq!(pixel.0, [10, 100, 200]);
}

#[test]
fn brightness_and_contrast_clamp_at_the_intensity_ceiling() {
    let mut buffer = ImageChannelBuffer::new(flat_image(100, 0, 0));
    buffer
        .set_adjustments(
            0,
            ChannelAdjustments {
                brightness: 50,
                contrast: 1.5,
                ..ChannelAdjustments::default()
            },
        )
        .expect("set");
    // 100 + 50*2.55 = 227.5, then (227.5-128)*1.5 + 128 = 277.25 -> clamp.
    let first = *buffer.composite().get_pixel(0, 0);
    assert_eq!(first.0[0], 255);

    let again = *buffer.composite().get_pixel(0, 0);
    assert_eq!(first, again);
}

#[test]
fn same_inputs_produce_byte_identical_composites() {
    let params = ChannelAdjustments {
        brightness: -20,
        contrast: 1.2,
        noise_reduction: 3,
        visible: true,
    };
    let mut first = ImageChannelBuffer::new(flat_image(90, 40, 10));
    let mut second = ImageChannelBuffer::new(flat_image(90, 40, 10));
    first.set_adjustments(1, params).expect("set");
    second.set_adjustments(1, params).expect("set");
    assert_eq!(first.composite().as_raw(), second.composite().as_raw());
}

#[test]
fn invisible_channels_contribute_zero() {
    let mut buffer = ImageChannelBuffer::new(flat_image(50, 60, 70));
    buffer.set_visible(1, false).expect("hide green");
    let pixel = *buffer.composite().get_pixel(2, 2);
    assert_eq!(pixel.0, [50, 0, 70]);

    buffer.set_visible(1, true).expect("show green");
    let pixel = *buffer.composite().get_pixel(2, 2);
    assert_eq!(pixel.0, [50, 60, 70]);
}

#[test]
fn noise_reduction_smooths_an_isolated_spike() {
    let mut samples = Array2::zeros((5, 5));
    samples[[2, 2]] = 255u8;
    let channels = vec![
        Channel::new("R", samples),
        Channel::new("G", Array2::zeros((5, 5))),
        Channel::new("B", Array2::zeros((5, 5))),
    ];
    let mut buffer = ImageChannelBuffer::new(ChannelImage::new(channels).expect("image"));
    buffer
        .set_adjustments(
            0,
            ChannelAdjustments {
                noise_reduction: 5,
                ..ChannelAdjustments::default()
            },
        )
        .expect("set");
    let composite = buffer.composite();
    let center = composite.get_pixel(2, 2).0[0];
    let neighbor = composite.get_pixel(1, 2).0[0];
    let corner = composite.get_pixel(0, 0).0[0];
    assert!(center < 255);
    assert!(neighbor > 0);
    assert!(center > neighbor);
    assert!(neighbor > corner);
}

#[test]
fn adjusting_one_channel_leaves_the_others_untouched() {
    let mut buffer = ImageChannelBuffer::new(flat_image(30, 60, 90));
    let before = buffer.composite().clone();
    buffer
        .set_adjustments(
            0,
            ChannelAdjustments {
                brightness: 40,
                ..ChannelAdjustments::default()
            },
        )
        .expect("set");
    let after = buffer.composite();
    for (previous, current) in before.pixels().zip(after.pixels()) {
        assert_ne!(previous.0[0], current.0[0]);
        assert_eq!(previous.0[1], current.0[1]);
        assert_eq!(previous.0[2], current.0[2]);
    }
}

#[test]
fn out_of_range_parameters_are_rejected_and_ignored() {
    let mut buffer = ImageChannelBuffer::new(flat_image(10, 10, 10));
    let bad_brightness = ChannelAdjustments {
        brightness: 150,
        ..ChannelAdjustments::default()
    };
    assert!(matches!(
        buffer.set_adjustments(0, bad_brightness),
        Err(AdjustError::BrightnessOutOfRange { value: 150 })
    ));

    let bad_contrast = ChannelAdjustments {
        contrast: 0.0,
        ..ChannelAdjustments::default()
    };
    assert!(matches!(
        buffer.set_adjustments(0, bad_contrast),
        Err(AdjustError::ContrastOutOfRange { .. })
    ));

    let bad_noise = ChannelAdjustments {
        noise_reduction: 11,
        ..ChannelAdjustments::default()
    };
    assert!(matches!(
        buffer.set_adjustments(0, bad_noise),
        Err(AdjustError::NoiseReductionOutOfRange { value: 11 })
    ));

    assert!(matches!(
        buffer.set_adjustments(7, ChannelAdjustments::default()),
        Err(AdjustError::UnknownChannel { index: 7 })
    ));

    // Stored parameters stay neutral after every rejection.
    assert!(buffer.adjustments(0).expect("params").is_neutral());
    let pixel = *buffer.composite().get_pixel(0, 0);
    assert_eq!(pixel.0, [10, 10, 10]);
}

#[test]
fn reset_returns_to_neutral() {
    let mut buffer = ImageChannelBuffer::new(flat_image(80, 80, 80));
    buffer
        .set_adjustments(
            2,
            ChannelAdjustments {
                contrast: 2.0,
                ..ChannelAdjustments::default()
            },
        )
        .expect("set");
    buffer.reset_adjustments();
    assert!(buffer.adjustments(2).expect("params").is_neutral());
    let pixel = *buffer.composite().get_pixel(0, 0);
    assert_eq!(pixel.0, [80, 80, 80]);
}
