use image::Rgba;

use super::*;

fn sample() -> RgbaImage {
    RgbaImage::from_fn(5, 3, |x, y| {
        let v = (x * 40 + y * 10) as u8;
        Rgba([v, v, v, 255 - v])
    })
}

#[test]
fn format_from_extension() {
    assert_eq!(OutputFormat::from_path(Path::new("a/b.png")).unwrap(), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("b.WEBP")).unwrap(), OutputFormat::Webp);
    assert_eq!(OutputFormat::from_path(Path::new("b.bmp")).unwrap(), OutputFormat::Bmp);
}

#[test]
fn lossy_or_missing_extensions_are_rejected() {
    for p in ["out.jpg", "out.jpeg", "out", "out.gif"] {
        let err = OutputFormat::from_path(Path::new(p)).unwrap_err();
        assert!(matches!(err, MirageError::Validation(_)), "{p}");
    }
}

#[test]
fn png_round_trip_is_exact() {
    let img = sample();
    let bytes = encode_rgba(&img, OutputFormat::Png).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back, img);
}

#[test]
fn webp_and_bmp_encode_decodable_images() {
    let img = sample();
    for format in [OutputFormat::Webp, OutputFormat::Bmp] {
        let bytes = encode_rgba(&img, format).unwrap();
        let back = image::load_from_memory(&bytes).unwrap();
        assert_eq!((back.width(), back.height()), (5, 3), "{format:?}");
    }
}

#[test]
fn save_creates_parent_dirs() {
    let dir = Path::new("target").join("unit_save_rgba").join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("out.png");

    save_rgba(&path, &sample()).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back, sample());
}
