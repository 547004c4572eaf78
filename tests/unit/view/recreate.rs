use super::*;
use crate::config::SessionConfig;
use crate::foundation::core::Point;
use crate::source::channel::Channel;
use crate::source::decode::SourceImage;
use image::RgbaImage;

const A: Rgba<u8> = Rgba([200, 20, 20, 255]);
const B: Rgba<u8> = Rgba([20, 200, 20, 255]);
const C: Rgba<u8> = Rgba([20, 20, 200, 255]);
const D: Rgba<u8> = Rgba([90, 90, 90, 255]);

fn state() -> AppState {
    let row = [A, B, C, D];
    let img = RgbaImage::from_fn(4, 2, |x, _| row[x as usize]);
    let cfg = SessionConfig {
        stripe_height: 1,
        animating: false,
        ..SessionConfig::default()
    };
    AppState::new(SourceImage::from_rgba(img), cfg).unwrap()
}

fn view(st: &AppState) -> RecreateView {
    let scanline = st.source.capture_row(0).unwrap();
    RecreateView::from_keyframe(st, &scanline, 0).unwrap()
}

fn press(keys: &[Key]) -> InputFrame {
    InputFrame {
        frame_time: 1.0 / 60.0,
        pressed: keys.to_vec(),
        down: keys.to_vec(),
        ..InputFrame::default()
    }
}

fn image_row(v: &RecreateView, y: u32) -> Vec<Rgba<u8>> {
    let img = v.recreator().image();
    (0..img.width()).map(|x| *img.get_pixel(x, y)).collect()
}

#[test]
fn keyframe_regenerates_immediately() {
    let st = state();
    let v = view(&st);
    assert_eq!(image_row(&v, 0), vec![A, B, C, D]);
    assert_eq!(image_row(&v, 1), vec![D, C, B, A]);
    assert_eq!(v.texture().image(), v.recreator().image());
}

#[test]
fn idle_static_tick_does_not_regenerate() {
    let mut st = state();
    let mut v = view(&st);
    let rev = v.recreator().revision();
    assert!(v.update(&mut st, &press(&[])).unwrap().is_none());
    assert_eq!(v.recreator().revision(), rev);
}

#[test]
fn offset_press_regenerates_and_reuploads() {
    let mut st = state();
    let mut v = view(&st);
    let uploads = v.texture().uploads();

    v.update(&mut st, &press(&[Key::Right])).unwrap();
    assert_eq!(v.recreator().params().z_offset, 1);
    assert_eq!(image_row(&v, 1), vec![A, D, C, B]);
    assert_eq!(v.texture().uploads(), uploads + 1);
    assert_eq!(v.texture().image(), v.recreator().image());
}

#[test]
fn space_toggles_and_advances_phase_each_tick() {
    let mut st = state();
    let mut v = view(&st);

    v.update(&mut st, &press(&[Key::Space])).unwrap();
    assert!(v.recreator().params().animating);
    assert_eq!(v.recreator().params().t, 1.0);

    let rev = v.recreator().revision();
    v.update(&mut st, &press(&[])).unwrap();
    assert_eq!(v.recreator().params().t, 2.0);
    assert_eq!(v.recreator().revision(), rev + 1);
    // phase 2, straight row: [C, D, A, B]
    assert_eq!(image_row(&v, 0), vec![C, D, A, B]);

    v.update(&mut st, &press(&[Key::Space])).unwrap();
    assert!(!v.recreator().params().animating);
    assert_eq!(v.recreator().params().t, 2.0);
}

#[test]
fn animate_button_click_toggles() {
    let mut st = state();
    let mut v = view(&st);
    let input = InputFrame {
        mouse: Point::new(300.0, 25.0),
        clicked: true,
        ..InputFrame::default()
    };
    v.update(&mut st, &input).unwrap();
    assert!(v.recreator().params().animating);
}

#[test]
fn back_key_persists_parameters() {
    let mut st = state();
    let mut v = view(&st);
    v.update(&mut st, &press(&[Key::Right])).unwrap();
    v.update(&mut st, &press(&[Key::Right])).unwrap();

    let next = v.update(&mut st, &press(&[Key::A])).unwrap();
    assert!(matches!(next, Some(View::Analyzer(_))));
    assert_eq!(st.params.z_offset, 2);

    // The next keyframe starts from the persisted offset.
    let v2 = view(&st);
    assert_eq!(v2.recreator().params().z_offset, 2);
}

#[test]
fn back_key_resumes_the_analyzer_it_came_from() {
    let mut st = state();
    let mut analyzer = AnalyzerView::new(&st.config);
    let pick_blue = InputFrame {
        mouse: Point::new(120.0, 20.0),
        clicked: true,
        ..InputFrame::default()
    };
    analyzer.update(&mut st, &pick_blue).unwrap();
    assert_eq!(analyzer.channel(), Channel::Blue);

    let mut v = view(&st).returning_to(analyzer);
    let Some(View::Analyzer(back)) = v.update(&mut st, &press(&[Key::A])).unwrap() else {
        panic!("expected analyzer view");
    };
    assert_eq!(back.channel(), Channel::Blue);
}

#[test]
fn draw_stretches_recreation_over_screen() {
    let st = state();
    let v = view(&st);
    let mut surface = Surface::new(1400, 800);
    v.draw(&st, &mut surface).unwrap();

    // 4x2 stretched to 1400x800: 350x400 blocks.
    assert_eq!(*surface.pixels().get_pixel(0, 0), A);
    assert_eq!(*surface.pixels().get_pixel(1399, 0), D);
    assert_eq!(*surface.pixels().get_pixel(0, 799), D);
    assert_eq!(*surface.pixels().get_pixel(260, 20), BUTTON_OFF);
}
