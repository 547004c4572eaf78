use super::*;

const A: Rgba<u8> = Rgba([10, 0, 0, 200]);
const B: Rgba<u8> = Rgba([0, 20, 0, 201]);
const C: Rgba<u8> = Rgba([0, 0, 30, 202]);
const D: Rgba<u8> = Rgba([40, 40, 40, 203]);

fn params(stripe_height: u32, z_offset: i64, animating: bool, t: f64) -> RecreationParameters {
    RecreationParameters {
        stripe_height,
        z_offset,
        animating,
        t,
        dt: 1.0,
    }
}

fn recreator(height: u32, p: RecreationParameters) -> ScanlineRecreator {
    let mut r = ScanlineRecreator::new(4, height, p).unwrap();
    r.capture(&[A, B, C, D]).unwrap();
    r
}

fn row(r: &ScanlineRecreator, y: u32) -> Vec<Rgba<u8>> {
    (0..r.width()).map(|x| *r.image().get_pixel(x, y)).collect()
}

fn opaque(px: Rgba<u8>) -> Rgba<u8> {
    Rgba([px.0[0], px.0[1], px.0[2], 255])
}

#[test]
fn static_stripes_alternate_straight_and_reversed() {
    let r = recreator(2, params(1, 0, false, 0.0));
    assert_eq!(row(&r, 0), vec![A, B, C, D]);
    assert_eq!(row(&r, 1), vec![D, C, B, A]);
}

#[test]
fn static_offset_applies_to_reversed_stripes_only() {
    let r = recreator(2, params(1, 1, false, 0.0));
    assert_eq!(row(&r, 0), vec![A, B, C, D]);
    assert_eq!(row(&r, 1), vec![A, D, C, B]);
}

#[test]
fn animating_phase_shifts_straight_rows_forward() {
    let r = recreator(1, params(1, 0, true, 2.7));
    assert_eq!(row(&r, 0), vec![C, D, A, B].into_iter().map(opaque).collect::<Vec<_>>());
}

#[test]
fn animating_phase_shifts_reversed_rows_backward() {
    // reversed: wrap(x + 0 - 2, 4) -> 2,3,0,1
    let r = recreator(2, params(1, 0, true, 2.0));
    assert_eq!(row(&r, 1), vec![C, D, A, B].into_iter().map(opaque).collect::<Vec<_>>());

    let r = recreator(2, params(1, 0, true, 1.0));
    // straight: x+1 -> B,C,D,A ; reversed: x-1 -> D,A,B,C
    assert_eq!(row(&r, 0), vec![B, C, D, A].into_iter().map(opaque).collect::<Vec<_>>());
    assert_eq!(row(&r, 1), vec![D, A, B, C].into_iter().map(opaque).collect::<Vec<_>>());
}

#[test]
fn animating_at_t_zero_is_offset_only_shift() {
    let r = recreator(2, params(1, 3, true, 0.0));
    // straight and reversed both read x + 3
    let expected: Vec<_> = vec![D, A, B, C].into_iter().map(opaque).collect();
    assert_eq!(row(&r, 0), expected);
    assert_eq!(row(&r, 1), expected);
}

#[test]
fn animating_forces_alpha_opaque() {
    let r = recreator(3, params(1, 0, true, 0.0));
    assert!(r.image().pixels().all(|px| px.0[3] == 255));

    let r = recreator(3, params(1, 0, false, 0.0));
    assert_eq!(r.image().get_pixel(0, 0).0[3], 200);
}

#[test]
fn stripe_height_groups_rows() {
    let r = recreator(7, params(3, 0, false, 0.0));
    for y in 0..3 {
        assert_eq!(row(&r, y), vec![A, B, C, D], "row {y}");
    }
    for y in 3..6 {
        assert_eq!(row(&r, y), vec![D, C, B, A], "row {y}");
    }
    assert_eq!(row(&r, 6), vec![A, B, C, D]);
}

#[test]
fn regenerate_is_deterministic_and_idempotent() {
    let mut r = recreator(9, params(2, -7, true, 5.5));
    let first = r.regenerate().clone();
    let second = r.regenerate().clone();
    assert_eq!(first.as_raw(), second.as_raw());

    let mut other = recreator(9, params(2, -7, true, 5.5));
    assert_eq!(other.regenerate().as_raw(), first.as_raw());
}

#[test]
fn regenerate_bumps_revision_and_keeps_buffer() {
    let mut r = recreator(4, params(1, 0, false, 0.0));
    let rev = r.revision();
    let ptr = r.image().as_raw().as_ptr();
    r.regenerate();
    assert_eq!(r.revision(), rev + 1);
    assert_eq!(r.image().as_raw().as_ptr(), ptr);
}

#[test]
fn capture_rejects_wrong_length_without_modifying() {
    let mut r = recreator(2, params(1, 0, false, 0.0));
    let rev = r.revision();
    let err = r.capture(&[A, B, C]).unwrap_err();
    assert!(matches!(err, ScanlineError::Capture(_)));
    assert_eq!(r.scanline(), &[A, B, C, D]);
    assert_eq!(r.revision(), rev);
}

#[test]
fn advance_time_only_while_animating() {
    let mut r = recreator(1, params(1, 0, false, 0.0));
    r.advance_time(1.5);
    assert_eq!(r.params().t, 0.0);

    r.set_animating(true);
    r.advance_time(1.5);
    r.tick();
    assert!((r.params().t - 2.5).abs() < 1e-12);
}

#[test]
fn advance_time_ignores_non_finite_steps() {
    let mut r = recreator(1, params(1, 0, true, 2.0));
    for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        r.advance_time(dt);
        assert_eq!(r.params().t, 2.0);
    }
    r.advance_time(f64::MAX);
    r.advance_time(f64::MAX);
    assert!(r.params().t.is_finite());
    assert_eq!(r.params().t, f64::MAX);
}

#[test]
fn advance_time_does_not_regenerate() {
    let mut r = recreator(1, params(1, 0, true, 0.0));
    let before = r.image().clone();
    let rev = r.revision();
    r.advance_time(3.0);
    assert_eq!(r.revision(), rev);
    assert_eq!(r.image().as_raw(), before.as_raw());
}

#[test]
fn parameter_edits_report_changes_without_regenerating() {
    let mut r = recreator(2, params(1, 0, false, 0.0));
    let rev = r.revision();

    assert!(r.shift_offset(1));
    assert!(!r.shift_offset(0));
    assert!(!r.set_stripe_height(1).unwrap());
    assert!(r.set_stripe_height(2).unwrap());
    assert!(r.set_stripe_height(0).is_err());
    assert_eq!(r.params().stripe_height, 2);

    assert!(r.toggle_animation());
    assert!(!r.set_animating(true));
    assert!(r.set_animating(false));
    assert!(!r.params().animating);
    assert_eq!(r.revision(), rev);
}

#[test]
fn extreme_offsets_stay_in_bounds() {
    let mut r = recreator(2, params(1, i64::MAX, true, -1.0e300));
    r.regenerate();
    assert!(!r.shift_offset(1));
    r.set_animating(false);
    r.regenerate();
    assert_eq!(row(&r, 0), vec![A, B, C, D]);
}

#[test]
fn source_index_matches_static_formula() {
    let p = params(1, 0, false, 0.0);
    for x in 0..4 {
        assert_eq!(source_index(x, false, 4, &p), x);
        assert_eq!(source_index(x, true, 4, &p), 3 - x);
    }
    let p = params(1, -5, false, 0.0);
    // wrap(3 - x - 5, 4)
    assert_eq!(source_index(0, true, 4, &p), 2);
}

#[test]
fn empty_source_regenerates_without_panicking() {
    let mut r = ScanlineRecreator::new(0, 3, params(1, 4, true, 1.0)).unwrap();
    r.capture(&[]).unwrap();
    assert_eq!(r.image().as_raw().len(), 0);
}

#[test]
fn new_rejects_zero_stripe_height() {
    assert!(ScanlineRecreator::new(4, 4, params(0, 0, false, 0.0)).is_err());
}
