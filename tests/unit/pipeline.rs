use image::Rgb;

use super::*;

fn checker(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        if (x / 3 + y / 3) % 2 == 0 {
            Rgb([240, 230, 220])
        } else {
            Rgb([30, 60, 90])
        }
    })
}

#[test]
fn compose_uses_requested_resolution_source() {
    let inner = checker(12, 8);
    let outer = checker(30, 20);

    let by_inner = compose(inner.clone(), outer.clone(), &MirageOpts::default()).unwrap();
    assert_eq!(by_inner.dimensions(), (12, 8));

    let opts = MirageOpts {
        resolution: ResolutionSource::Outer,
        ..MirageOpts::default()
    };
    let by_outer = compose(inner, outer, &opts).unwrap();
    assert_eq!(by_outer.dimensions(), (30, 20));
}

#[test]
fn thread_count_does_not_change_pixels() {
    let inner = checker(41, 17);
    let outer = checker(23, 29);

    let results: Vec<_> = [Some(0), Some(1), Some(4), None]
        .into_iter()
        .map(|threads| {
            let opts = MirageOpts {
                threads,
                ..MirageOpts::default()
            };
            compose(inner.clone(), outer.clone(), &opts).unwrap()
        })
        .collect();
    for r in &results[1..] {
        assert_eq!(r, &results[0]);
    }
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: MirageOpts = serde_json::from_str(
        r#"{ "interpolation": "lanczos4", "resolution": "outer", "lights": { "outer_light": 0.5 } }"#,
    )
    .unwrap();
    assert_eq!(opts.interpolation, Interpolation::Lanczos4);
    assert_eq!(opts.resolution, ResolutionSource::Outer);
    assert_eq!(opts.lights.inner_light, 1.0);
    assert_eq!(opts.lights.outer_light, 0.5);
    assert_eq!(opts.threads, None);
}

#[test]
fn compose_files_rejects_bad_options_before_decoding() {
    let missing = Path::new("target/unit_pipeline/missing.png");

    let opts = MirageOpts {
        lights: LightCoefficients::new(1.2, 0.3),
        ..MirageOpts::default()
    };
    let err = compose_files(missing, missing, Path::new("target/out.png"), &opts).unwrap_err();
    assert!(err.to_string().contains("inner-light"));

    let err = compose_files(
        missing,
        missing,
        Path::new("target/out.jpg"),
        &MirageOpts::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("unsupported output format"));

    let dir = Path::new("target").join("unit_pipeline_order");
    std::fs::create_dir_all(&dir).unwrap();
    let corrupt = dir.join("corrupt.png");
    std::fs::write(&corrupt, b"not an image").unwrap();
    let missing_outer = dir.join("missing_outer.png");
    let _ = std::fs::remove_file(&missing_outer);

    let err = compose_files(
        &corrupt,
        &missing_outer,
        &dir.join("out.png"),
        &MirageOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MirageError::Validation(_)), "{err}");
    assert!(err.to_string().contains("missing_outer.png"));
}

#[test]
fn compose_files_writes_output() {
    let dir = Path::new("target").join("unit_pipeline");
    std::fs::create_dir_all(&dir).unwrap();
    let inner_path = dir.join("inner.png");
    let outer_path = dir.join("outer.bmp");
    let out_path = dir.join("mirage.png");
    let _ = std::fs::remove_file(&out_path);

    checker(10, 10).save(&inner_path).unwrap();
    checker(20, 20).save(&outer_path).unwrap();

    let img = compose_files(&inner_path, &outer_path, &out_path, &MirageOpts::default()).unwrap();
    let back = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(back, img);
    assert_eq!(back.dimensions(), (10, 10));
}
