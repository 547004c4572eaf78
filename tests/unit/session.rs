use std::cell::RefCell;
use std::rc::Rc;

use image::Rgba;

use super::*;
use crate::config::RecorderConfig;
use crate::record::encoder::{EncodeJob, VideoEncoder};

const A: Rgba<u8> = Rgba([200, 20, 20, 255]);
const B: Rgba<u8> = Rgba([20, 200, 20, 255]);
const C: Rgba<u8> = Rgba([20, 20, 200, 255]);
const D: Rgba<u8> = Rgba([90, 90, 90, 255]);

fn source() -> SourceImage {
    let row = [A, B, C, D];
    SourceImage::from_rgba(RgbaImage::from_fn(4, 2, |x, y| {
        if y == 0 { row[x as usize] } else { D }
    }))
}

fn params(stripe_height: u32, animating: bool) -> RecreationParameters {
    RecreationParameters {
        stripe_height,
        animating,
        ..RecreationParameters::default()
    }
}

/// Decodes every frame on disk at encode time.
#[derive(Default)]
struct CollectFrames {
    frames: Rc<RefCell<Vec<RgbaImage>>>,
}

impl VideoEncoder for CollectFrames {
    fn encode(&mut self, job: &EncodeJob) -> ScanlineResult<()> {
        let mut paths: Vec<_> = std::fs::read_dir(&job.frames_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        paths.sort();
        for p in paths {
            self.frames
                .borrow_mut()
                .push(image::open(p).unwrap().to_rgba8());
        }
        Ok(())
    }
}

fn recorder(dir: &Path, max_frames: u32) -> (FrameRecorder, Rc<RefCell<Vec<RgbaImage>>>) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let cfg = RecorderConfig {
        max_frames,
        frames_dir: dir.join("frames"),
        out_path: dir.join("out.mp4"),
        ..RecorderConfig::default()
    };
    let enc = CollectFrames {
        frames: frames.clone(),
    };
    (FrameRecorder::with_encoder(cfg, Box::new(enc)).unwrap(), frames)
}

fn first_row(img: &RgbaImage) -> Vec<Rgba<u8>> {
    (0..img.width()).map(|x| *img.get_pixel(x, 0)).collect()
}

#[test]
fn rows_outside_source_are_rejected() {
    let src = source();
    for row in [-1, 2, i64::MAX] {
        let err = RecreationSession::from_row(&src, row, params(1, false)).unwrap_err();
        assert!(matches!(err, ScanlineError::Validation(_)), "{err}");
    }
}

#[test]
fn keyframes_requested_row() {
    let session = RecreationSession::from_row(&source(), 0, params(1, false)).unwrap();
    assert_eq!(session.row(), 0);
    assert_eq!(session.recreator().scanline(), &[A, B, C, D]);
    assert_eq!(first_row(session.recreator().image()), vec![A, B, C, D]);
}

#[test]
fn render_frame_picks_up_parameter_changes() {
    let mut session = RecreationSession::from_row(&source(), 0, params(1, false)).unwrap();
    session.recreator_mut().shift_offset(1);
    let img = session.render_frame();
    let reversed: Vec<_> = (0..4).map(|x| *img.get_pixel(x, 1)).collect();
    assert_eq!(reversed, vec![A, D, C, B]);
}

#[test]
fn record_advances_phase_between_frames() {
    let dir = tempfile::tempdir().unwrap();
    let (mut rec, frames) = recorder(dir.path(), 100);
    let mut session = RecreationSession::from_row(&source(), 0, params(2, true)).unwrap();

    let stats = session.record(3, &mut rec).unwrap();
    assert_eq!(stats.frames_requested, 3);
    assert_eq!(stats.frames_captured, 3);
    assert_eq!(
        stats.outcome,
        RecordOutcome::Encoded {
            frames: 3,
            out_path: dir.path().join("out.mp4"),
        }
    );

    let frames = frames.borrow();
    let rows: Vec<_> = frames.iter().map(first_row).collect();
    assert_eq!(
        rows,
        vec![vec![A, B, C, D], vec![B, C, D, A], vec![C, D, A, B]]
    );
    assert!(!rec.is_recording());
}

#[test]
fn record_stops_at_recorder_frame_limit() {
    let dir = tempfile::tempdir().unwrap();
    let (mut rec, frames) = recorder(dir.path(), 2);
    let mut session = RecreationSession::from_row(&source(), 0, params(2, true)).unwrap();

    let stats = session.record(5, &mut rec).unwrap();
    assert_eq!(stats.frames_captured, 2);
    assert!(matches!(stats.outcome, RecordOutcome::Encoded { frames: 2, .. }));
    assert_eq!(frames.borrow().len(), 2);
}

#[test]
fn record_rejects_zero_frames() {
    let dir = tempfile::tempdir().unwrap();
    let (mut rec, _) = recorder(dir.path(), 10);
    let mut session = RecreationSession::from_row(&source(), 0, params(2, true)).unwrap();
    assert!(session.record(0, &mut rec).is_err());
    assert!(!rec.is_recording());
}

#[test]
fn save_png_writes_current_image() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("recreation.png");
    let session = RecreationSession::from_row(&source(), 0, params(1, false)).unwrap();
    session.save_png(&out).unwrap();
    let back = image::open(&out).unwrap().to_rgba8();
    assert_eq!(&back, session.recreator().image());
}
