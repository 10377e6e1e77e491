use super::*;
use crate::modes::types::LayerMode;
use crate::ops::settings::LayerModeSettings;

fn gradient(n: usize, phase: f32) -> Vec<f32> {
    (0..n * CHANNELS)
        .map(|i| ((i as f32 * 0.137 + phase).sin() * 0.5 + 0.5).clamp(0.0, 1.0))
        .collect()
}

fn run(op: &LayerModeOp, roi: Roi, threading: &TileThreading) -> Vec<f32> {
    let n = roi.pixel_count();
    let backdrop = gradient(n, 0.0);
    let source = gradient(n, 1.3);
    let mask: Vec<f32> = (0..n).map(|i| (i % 5) as f32 / 4.0).collect();
    let mut out = vec![0.0; n * CHANNELS];
    composite_image(op, &backdrop, &source, Some(&mask), &mut out, roi, threading).unwrap();
    out
}

#[test]
fn banding_and_threads_do_not_change_pixels() {
    let roi = Roi::new(-3, 5, 7, 9);
    for mode in [LayerMode::Multiply, LayerMode::Dissolve, LayerMode::LchColor, LayerMode::Split] {
        let op = LayerModeOp::new(LayerModeSettings::for_mode(mode).with_opacity(0.6)).unwrap();
        let whole = run(
            &op,
            roi,
            &TileThreading {
                rows_per_tile: 1000,
                ..TileThreading::default()
            },
        );
        let serial = run(
            &op,
            roi,
            &TileThreading {
                rows_per_tile: 2,
                ..TileThreading::default()
            },
        );
        let parallel = run(
            &op,
            roi,
            &TileThreading {
                parallel: true,
                rows_per_tile: 2,
                threads: Some(3),
            },
        );
        assert_eq!(whole, serial, "{mode}");
        assert_eq!(whole, parallel, "{mode}");
    }
}

#[test]
fn zero_threads_is_rejected() {
    let op = LayerModeOp::new(LayerModeSettings::default()).unwrap();
    let threading = TileThreading {
        threads: Some(0),
        ..TileThreading::parallel()
    };
    let err =
        composite_image(&op, &[], &[], None, &mut [], Roi::default(), &threading).unwrap_err();
    assert!(matches!(err, LayerModeError::Validation(_)));
}

#[test]
fn output_length_is_checked() {
    let op = LayerModeOp::new(LayerModeSettings::default()).unwrap();
    let px = [0.0; 4];
    let mut out = [0.0; 8];
    let roi = Roi::new(0, 0, 1, 1);
    let err = composite_image(&op, &px, &px, None, &mut out, roi, &TileThreading::default())
        .unwrap_err();
    assert!(matches!(err, LayerModeError::Buffer(_)));
}

#[test]
fn threading_from_json_defaults() {
    let t: TileThreading = serde_json::from_str("{}").unwrap();
    assert_eq!(t, TileThreading::default());
    assert_eq!(t.rows_per_tile, 64);

    let t: TileThreading =
        serde_json::from_str(r#"{ "parallel": true, "rows-per-tile": 8 }"#).unwrap();
    assert!(t.parallel);
    assert_eq!(t.rows_per_tile, 8);
}
