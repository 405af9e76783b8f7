use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_frame_png_dimensions_and_premul() {
    let frame = decode_frame(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(frame.width, 1);
    assert_eq!(frame.height, 1);
    assert_eq!(
        frame.pixel(0, 0),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_frame_keeps_opaque_pixels() {
    let frame = decode_frame(&png_bytes(3, 2, [10, 20, 30, 255])).unwrap();
    assert_eq!(frame.size(), Size::new(3.0, 2.0));
    assert_eq!(frame.pixel(2, 1), [10, 20, 30, 255]);
}

#[test]
fn decode_frame_rejects_garbage() {
    assert!(decode_frame(b"not an image").is_err());
}

#[test]
fn premultiply_pixel_scales_color_by_alpha() {
    assert_eq!(premultiply_pixel([200, 100, 50, 255]), [200, 100, 50, 255]);
    assert_eq!(premultiply_pixel([200, 100, 50, 0]), [0, 0, 0, 0]);
    assert_eq!(premultiply_pixel([255, 0, 128, 128]), [128, 0, 64, 128]);
}
