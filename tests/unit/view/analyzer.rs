use super::*;
use crate::foundation::core::Point;
use crate::source::channel::Component;
use crate::source::decode::SourceImage;
use image::RgbaImage;

// 200x100 source, displayed 800x400 at pos_y = 200 (row = (bar_y - 200) / 4).
fn state() -> AppState {
    let img = RgbaImage::from_fn(200, 100, |x, y| Rgba([x as u8 + 20, y as u8 + 20, 100, 255]));
    AppState::new(SourceImage::from_rgba(img), SessionConfig::default()).unwrap()
}

fn frame(mouse: Point, pressed: &[Key], clicked: bool) -> InputFrame {
    InputFrame {
        frame_time: 1.0 / 60.0,
        mouse,
        pressed: pressed.to_vec(),
        down: pressed.to_vec(),
        clicked,
        ..InputFrame::default()
    }
}

#[test]
fn channel_buttons_select_channel() {
    let mut st = state();
    let mut view = AnalyzerView::new(&st.config);
    assert_eq!(view.channel(), Channel::Red);

    view.update(&mut st, &frame(Point::new(70.0, 20.0), &[], true)).unwrap();
    assert_eq!(view.channel(), Channel::Green);

    view.update(&mut st, &frame(Point::new(170.0, 20.0), &[], true)).unwrap();
    assert_eq!(view.channel(), Channel::Original);

    // Hovering a button without clicking changes nothing.
    view.update(&mut st, &frame(Point::new(120.0, 20.0), &[], false)).unwrap();
    assert_eq!(view.channel(), Channel::Original);
}

#[test]
fn profile_follows_bar_over_image_only() {
    let mut st = state();
    let mut view = AnalyzerView::new(&st.config);

    view.update(&mut st, &frame(Point::new(100.0, 300.0), &[], false)).unwrap();
    let profile = view.profile().unwrap();
    assert_eq!(profile.channel, Channel::Red);
    assert_eq!(profile.traces.len(), 1);
    let expected: Vec<u8> = (0..200).map(|x| x as u8 + 20).collect();
    assert_eq!(profile.traces[0].values, expected);

    view.update(&mut st, &frame(Point::new(1000.0, 300.0), &[], false)).unwrap();
    assert!(view.profile().is_none());
}

#[test]
fn keyframe_switches_to_recreation_of_bar_row() {
    let mut st = state();
    let mut view = AnalyzerView::new(&st.config);

    let next = view
        .update(&mut st, &frame(Point::new(100.0, 300.0), &[Key::K], false))
        .unwrap();
    let Some(View::Recreate(rv)) = next else {
        panic!("expected recreation view");
    };
    assert_eq!(rv.row(), 25);
    assert_eq!(rv.recreator().scanline(), st.source.capture_row(25).unwrap().as_slice());
    assert_eq!(rv.recreator().params(), &st.params);
}

#[test]
fn keyframe_at_bottom_edge_stays_in_source() {
    let mut st = state();
    let mut view = AnalyzerView::new(&st.config);
    let next = view
        .update(&mut st, &frame(Point::new(100.0, 780.0), &[Key::K], false))
        .unwrap();
    let Some(View::Recreate(rv)) = next else {
        panic!("expected recreation view");
    };
    assert_eq!(rv.row(), 99);
}

#[test]
fn keyframe_hands_current_analyzer_to_recreation() {
    let mut st = state();
    let mut view = AnalyzerView::new(&st.config);
    view.update(&mut st, &frame(Point::new(120.0, 20.0), &[], true)).unwrap();
    assert_eq!(view.channel(), Channel::Blue);

    let next = view
        .update(&mut st, &frame(Point::new(100.0, 300.0), &[Key::K], false))
        .unwrap();
    let Some(View::Recreate(rv)) = next else {
        panic!("expected recreation view");
    };
    assert_eq!(rv.analyzer().channel(), Channel::Blue);
    assert_eq!(rv.analyzer().bar().y(), 300.0);
}

#[test]
fn draw_shows_bar_plot_frame_and_buttons() {
    let mut st = state();
    let mut view = AnalyzerView::new(&st.config);
    view.update(&mut st, &frame(Point::new(100.0, 300.0), &[], false)).unwrap();

    let mut surface = Surface::new(1400, 800);
    view.draw(&st, &mut surface).unwrap();
    let px = |x, y| *surface.pixels().get_pixel(x, y);

    assert_eq!(px(10, 299), BAR);
    assert_eq!(px(850, 400), FRAME);
    assert_eq!(px(1000, 200), FRAME);
    assert_eq!(px(1000, 400), BACKGROUND);
    assert_eq!(px(20, 20), Channel::Red.active_color());
    assert_eq!(px(70, 20), IDLE_BUTTON);
    assert_eq!(px(170, 20), IDLE_BUTTON);
    // Red channel texture: green and blue zeroed.
    let img = px(400, 500);
    assert_eq!((img.0[1], img.0[2]), (0, 0));
    assert!(img.0[0] > 0);
}

#[test]
fn draw_plots_profile_inside_plot_area() {
    let mut st = state();
    let mut view = AnalyzerView::new(&st.config);
    view.update(&mut st, &frame(Point::new(100.0, 300.0), &[], false)).unwrap();

    let mut surface = Surface::new(1400, 800);
    view.draw(&st, &mut surface).unwrap();
    let plot_color = Component::Red.plot_color();
    let plotted = surface
        .pixels()
        .enumerate_pixels()
        .filter(|(x, y, _)| (851..1399).contains(x) && (201..599).contains(y))
        .any(|(_, _, p)| p.0[0] > 100 && p.0[1] < plot_color.0[1] + 40);
    assert!(plotted);
}
