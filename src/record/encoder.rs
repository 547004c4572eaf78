use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{ScanlineError, ScanlineResult};

/// File name pattern of recorded frames (`frame_00000.png`, ...), in `ffmpeg` image2 syntax.
pub const FRAME_PATTERN: &str = "frame_%05d.png";

/// File name of frame `idx` matching [`FRAME_PATTERN`].
pub fn frame_file_name(idx: u32) -> String {
    format!("frame_{idx:05}.png")
}

/// One encode request: a directory of numbered PNG frames into one video file.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeJob {
    pub frames_dir: PathBuf,
    pub fps: u32,
    /// x264 constant rate factor.
    pub crf: u8,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeJob {
    /// Reject a zero frame rate and out-of-range CRF values.
    pub fn validate(&self) -> ScanlineResult<()> {
        if self.fps == 0 {
            return Err(ScanlineError::validation("encode fps must be non-zero"));
        }
        if self.crf > 51 {
            return Err(ScanlineError::validation("encode crf must be in 0..=51"));
        }
        Ok(())
    }

    /// Arguments passed to `ffmpeg`.
    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        args.push(if self.overwrite { "-y" } else { "-n" }.into());
        for a in ["-loglevel", "error", "-framerate"] {
            args.push(a.into());
        }
        args.push(self.fps.to_string().into());
        args.push("-i".into());
        args.push(self.frames_dir.join(FRAME_PATTERN).into_os_string());
        // yuv420p needs even dimensions; pad odd sizes by one pixel.
        let crf = self.crf.to_string();
        for a in [
            "-c:v",
            "libx264",
            "-crf",
            crf.as_str(),
            "-pix_fmt",
            "yuv420p",
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-movflags",
            "+faststart",
        ] {
            args.push(a.into());
        }
        args.push(self.out_path.clone().into_os_string());
        args
    }

    /// Shell command equivalent to this job, for manual recovery.
    pub fn manual_command(&self) -> String {
        let mut cmd = String::from("ffmpeg");
        for a in self.ffmpeg_args() {
            let a = a.to_string_lossy().into_owned();
            cmd.push(' ');
            if a.contains(['(', ')', '*', ' ']) {
                cmd.push('\'');
                cmd.push_str(&a);
                cmd.push('\'');
            } else {
                cmd.push_str(&a);
            }
        }
        cmd
    }
}

/// Turns a directory of numbered frames into a video.
pub trait VideoEncoder {
    fn encode(&mut self, job: &EncodeJob) -> ScanlineResult<()>;
}

/// Encoder that runs the system `ffmpeg` binary to completion.
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `ffmpeg` executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl VideoEncoder for FfmpegEncoder {
    #[tracing::instrument(skip(self), fields(program = %self.program.display()))]
    fn encode(&mut self, job: &EncodeJob) -> ScanlineResult<()> {
        job.validate()?;
        ensure_parent_dir(&job.out_path)?;
        if !job.overwrite && job.out_path.exists() {
            return Err(ScanlineError::validation(format!(
                "output file '{}' already exists",
                job.out_path.display()
            )));
        }

        let output = Command::new(&self.program)
            .args(job.ffmpeg_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ScanlineError::encode(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanlineError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::info!(out = %job.out_path.display(), "ffmpeg encode finished");
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ScanlineResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/record/encoder.rs"]
mod tests;
