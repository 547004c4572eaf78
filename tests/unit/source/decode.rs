use super::*;

fn framed(w: u32, h: u32, inner: [u32; 4]) -> RgbaImage {
    // inner = [left, top, right, bottom] inclusive, filled with a bright color
    let mut img = RgbaImage::from_pixel(w, h, Rgba([3, 4, 5, 255]));
    for y in inner[1]..=inner[3] {
        for x in inner[0]..=inner[2] {
            img.put_pixel(x, y, Rgba([200, 100, 50, 255]));
        }
    }
    img
}

#[test]
fn auto_crop_trims_dark_border() {
    let mut src = SourceImage::from_rgba(framed(10, 8, [2, 1, 6, 5]));
    let bounds = src.auto_crop(10).unwrap();
    assert_eq!(
        bounds,
        CropBounds {
            left: 2,
            top: 1,
            width: 5,
            height: 5
        }
    );
    assert_eq!((src.width(), src.height()), (5, 5));
    assert_eq!(*src.pixels().get_pixel(0, 0), Rgba([200, 100, 50, 255]));
}

#[test]
fn auto_crop_leaves_all_dark_image_alone() {
    let mut src = SourceImage::from_rgba(RgbaImage::from_pixel(4, 4, Rgba([10, 10, 10, 255])));
    assert!(src.auto_crop(10).is_none());
    assert_eq!((src.width(), src.height()), (4, 4));
}

#[test]
fn auto_crop_skips_single_column_content() {
    // left == right is degenerate and must not crop.
    let mut src = SourceImage::from_rgba(framed(6, 6, [3, 0, 3, 5]));
    assert!(src.auto_crop(10).is_none());
    assert_eq!(src.width(), 6);
}

#[test]
fn capture_row_copies_and_rejects_out_of_range() {
    let mut img = RgbaImage::new(3, 2);
    img.put_pixel(0, 1, Rgba([1, 2, 3, 4]));
    img.put_pixel(2, 1, Rgba([9, 8, 7, 6]));
    let src = SourceImage::from_rgba(img);

    let row = src.capture_row(1).unwrap();
    assert_eq!(row.len(), 3);
    assert_eq!(row[0], Rgba([1, 2, 3, 4]));
    assert_eq!(row[2], Rgba([9, 8, 7, 6]));

    assert!(src.capture_row(-1).is_none());
    assert!(src.capture_row(2).is_none());
}

#[test]
fn split_channels_isolates_components() {
    let src = SourceImage::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([11, 22, 33, 128])));
    let ch = src.split_channels();
    assert_eq!(*ch.red.get_pixel(1, 1), Rgba([11, 0, 0, 255]));
    assert_eq!(*ch.green.get_pixel(1, 1), Rgba([0, 22, 0, 255]));
    assert_eq!(*ch.blue.get_pixel(1, 1), Rgba([0, 0, 33, 255]));
    assert_eq!(
        ch.image_for(Channel::Original, &src).get_pixel(0, 0),
        &Rgba([11, 22, 33, 128])
    );
}

#[test]
fn decode_rejects_garbage() {
    assert!(SourceImage::decode(b"definitely not an image").is_err());
}
