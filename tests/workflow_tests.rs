//! Integration tests for morphox workflows
//!
//! These tests drive requests through the public surface the way the demo
//! does: decode an encoded image, apply an operation, encode the result.

use image::{GrayImage, Luma, Rgb, RgbImage};
use morphox::{
    apply, decode, encode_png, MorphologyExt, Operation, OperationRequest, PixelBuffer,
    RegionFillExt, Shape, StructuringElement,
};

/// Black image with a single white pixel at `(x, y)`
fn single_pixel(width: u32, height: u32, x: u32, y: u32) -> GrayImage {
    let mut image = GrayImage::new(width, height);
    image.put_pixel(x, y, Luma([255]));
    image
}

/// Bright disk of radius `radius` with a dark hole of radius `hole`, centered
fn disk_with_hole(size: u32, radius: i64, hole: i64) -> GrayImage {
    let center = i64::from(size / 2);
    GrayImage::from_fn(size, size, |x, y| {
        let d2 = (i64::from(x) - center).pow(2) + (i64::from(y) - center).pow(2);
        if d2 <= hole * hole || d2 > radius * radius {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

fn white_count(buffer: &PixelBuffer) -> usize {
    match buffer {
        PixelBuffer::Gray(gray) => gray.pixels().filter(|p| p[0] == 255).count(),
        PixelBuffer::Rgb(rgb) => rgb.pixels().filter(|p| *p == &Rgb([255, 255, 255])).count(),
    }
}

#[cfg(feature = "codec")]
#[test]
fn test_decode_apply_encode_round_trip() {
    let input = PixelBuffer::Gray(single_pixel(11, 11, 5, 5));
    let bytes = encode_png(&input).unwrap();

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, input);

    let request = OperationRequest::new(Operation::Dilate).with_kernel_size(3);
    let result = apply(&decoded, &request).unwrap();
    assert_eq!(white_count(&result), 9);

    let exported = decode(&encode_png(&result).unwrap()).unwrap();
    assert_eq!(exported, result);
}

#[cfg(feature = "codec")]
#[test]
fn test_rgb_workflow_keeps_three_channels() {
    let input = PixelBuffer::Rgb(RgbImage::from_fn(8, 6, |x, y| {
        Rgb([(x * 30) as u8, (y * 40) as u8, 128])
    }));
    let decoded = decode(&encode_png(&input).unwrap()).unwrap();

    for operation in [Operation::Dilate, Operation::Erode, Operation::Open, Operation::Close] {
        let result = apply(&decoded, &OperationRequest::new(operation).with_kernel_size(3)).unwrap();
        assert_eq!(result.channel_count(), 3, "{operation}");
        assert_eq!(result.dimensions(), (8, 6), "{operation}");
    }
}

#[test]
fn test_dilation_by_three_matches_three_by_three_block() {
    let request = OperationRequest::new(Operation::Dilate).with_kernel_size(3);
    let result = apply(&PixelBuffer::Gray(single_pixel(11, 11, 5, 5)), &request).unwrap();

    let PixelBuffer::Gray(gray) = result else {
        panic!("dilation must keep a single channel");
    };
    for (x, y, pixel) in gray.enumerate_pixels() {
        let inside = (4..=6).contains(&x) && (4..=6).contains(&y);
        assert_eq!(pixel[0] == 255, inside, "pixel ({x}, {y})");
    }
}

#[test]
fn test_request_matches_extension_trait() {
    let image = disk_with_hole(24, 8, 2);
    let element = StructuringElement::new(Shape::Ellipse, 5).unwrap();

    let request = OperationRequest::new(Operation::Close)
        .with_kernel_size(5)
        .with_shape(Shape::Ellipse);
    let via_request = apply(&PixelBuffer::Gray(image.clone()), &request).unwrap();

    assert_eq!(via_request, PixelBuffer::Gray(image.close(&element).unwrap()));
}

#[test]
fn test_fill_regions_closes_hole_in_disk() {
    let image = disk_with_hole(24, 8, 2);
    let result = apply(
        &PixelBuffer::Gray(image),
        &OperationRequest::new(Operation::FillRegions),
    )
    .unwrap();

    let PixelBuffer::Rgb(rgb) = result else {
        panic!("region filling must return three channels");
    };
    // Hole center is filled, background corners stay black
    assert_eq!(rgb.get_pixel(12, 12), &Rgb([255, 255, 255]));
    assert_eq!(rgb.get_pixel(12, 11), &Rgb([255, 255, 255]));
    assert_eq!(rgb.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(rgb.get_pixel(23, 23), &Rgb([0, 0, 0]));
    assert_eq!(rgb.get_pixel(12, 1), &Rgb([0, 0, 0]));
}

#[test]
fn test_fill_regions_from_color_input_matches_gray() {
    let gray = disk_with_hole(24, 8, 2);
    let rgb = RgbImage::from_fn(24, 24, |x, y| {
        let value = gray.get_pixel(x, y)[0];
        Rgb([value, value, value])
    });

    assert_eq!(gray.fill_regions().unwrap(), rgb.fill_regions().unwrap());
}

#[test]
fn test_dark_object_on_light_background() {
    // Inverted disk: polarity normalization turns the background black
    let mut image = disk_with_hole(24, 8, 2);
    image::imageops::invert(&mut image);

    let result = image.fill_regions().unwrap();
    assert_eq!(result.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(result.get_pixel(12, 12), &Rgb([255, 255, 255]));
}

#[test]
fn test_chained_requests() {
    // Open then close, as a user would by re-running on the previous result
    let mut image = GrayImage::new(20, 20);
    for y in 5..15 {
        for x in 5..15 {
            image.put_pixel(x, y, Luma([255]));
        }
    }
    image.put_pixel(1, 1, Luma([255]));
    image.put_pixel(10, 10, Luma([0]));

    let opened = apply(
        &PixelBuffer::Gray(image),
        &OperationRequest::new(Operation::Open).with_kernel_size(3),
    )
    .unwrap();
    let closed = apply(
        &opened,
        &OperationRequest::new(Operation::Close).with_kernel_size(3),
    )
    .unwrap();

    let PixelBuffer::Gray(gray) = closed else {
        panic!("structural operations keep a single channel");
    };
    assert_eq!(gray.get_pixel(1, 1), &Luma([0]));
    assert_eq!(gray.get_pixel(10, 10), &Luma([255]));
    assert_eq!(gray.pixels().filter(|p| p[0] == 255).count(), 100);
}
