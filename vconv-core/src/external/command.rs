//! Encoder command construction.
//!
//! Every job is converted with the same shape of command:
//!
//! ```text
//! <encoder> -n|-y -i <input> -c:v <codec> [-profile:v <profile>] -c:a aac <output>
//! ```
//!
//! The profile argument is only emitted for `prores_ks`. The output always
//! uses the `.mov` container, whatever the video codec.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::codec::Codec;
use crate::config::{AUDIO_CODEC, OUTPUT_EXTENSION};
use crate::request::Job;

/// Output file for `source` converted with `codec`:
/// `<output_dir>/<stem>_<codec>.mov`.
#[must_use]
pub fn output_path_for(output_dir: &Path, source: &Path, codec: Codec) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{stem}_{codec}.{OUTPUT_EXTENSION}"))
}

/// A fully built encoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCommand {
    program: PathBuf,
    args: Vec<String>,
    output_path: PathBuf,
}

impl EncodeCommand {
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Value following `-profile:v`, if the command carries one.
    pub fn profile_arg(&self) -> Option<&str> {
        self.args
            .windows(2)
            .find(|pair| pair[0] == "-profile:v")
            .map(|pair| pair[1].as_str())
    }

    /// Value following `-c:v`.
    pub fn video_codec_arg(&self) -> Option<&str> {
        self.args
            .windows(2)
            .find(|pair| pair[0] == "-c:v")
            .map(|pair| pair[1].as_str())
    }
}

impl fmt::Display for EncodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Builds encoder commands for the jobs of one run.
#[derive(Debug, Clone)]
pub struct EncodeCommandBuilder {
    encoder: PathBuf,
    overwrite: bool,
}

impl EncodeCommandBuilder {
    #[must_use]
    pub fn new(encoder: impl Into<PathBuf>) -> Self {
        Self {
            encoder: encoder.into(),
            overwrite: true,
        }
    }

    /// Sets whether existing outputs are replaced (`-y`) or the job fails (`-n`).
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Builds the command converting `job` into `output_path`.
    #[must_use]
    pub fn build(&self, job: &Job, output_path: &Path) -> EncodeCommand {
        let overwrite_flag = if self.overwrite { "-y" } else { "-n" };
        let mut args = vec![
            overwrite_flag.to_string(),
            "-i".to_string(),
            job.source_path().to_string_lossy().to_string(),
            "-c:v".to_string(),
            job.codec().as_str().to_string(),
        ];

        if job.codec().supports_profile() {
            if let Some(profile) = job.profile() {
                args.push("-profile:v".to_string());
                args.push(profile.as_arg().to_string());
            }
        }

        args.push("-c:a".to_string());
        args.push(AUDIO_CODEC.to_string());
        args.push(output_path.to_string_lossy().to_string());

        EncodeCommand {
            program: self.encoder.clone(),
            args,
            output_path: output_path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ProresProfile;

    fn job(name: &str, codec: Codec, profile: Option<ProresProfile>) -> Job {
        Job::new(PathBuf::from("/videos").join(name), codec, profile)
    }

    #[test]
    fn test_output_name_normalizes_extension() {
        let out = output_path_for(
            Path::new("/videos/converted"),
            Path::new("/videos/clip.MP4"),
            Codec::Libx265,
        );
        assert_eq!(out, PathBuf::from("/videos/converted/clip_libx265.mov"));

        let out = output_path_for(
            Path::new("/videos/converted"),
            Path::new("/videos/take.mov"),
            Codec::LibvpxVp9,
        );
        assert_eq!(out, PathBuf::from("/videos/converted/take_libvpx-vp9.mov"));
    }

    #[test]
    fn test_output_name_keeps_inner_dots() {
        let out = output_path_for(
            Path::new("/out"),
            Path::new("/videos/my.holiday.clip.mkv"),
            Codec::Libx264,
        );
        assert_eq!(out, PathBuf::from("/out/my.holiday.clip_libx264.mov"));
    }

    #[test]
    fn test_command_shape_without_profile() {
        let builder = EncodeCommandBuilder::new("ffmpeg").with_overwrite(false);
        let job = job("clip.mp4", Codec::Libx264, None);
        let cmd = builder.build(&job, Path::new("/videos/converted/clip_libx264.mov"));

        assert_eq!(cmd.program(), Path::new("ffmpeg"));
        assert_eq!(
            cmd.args(),
            &[
                "-n",
                "-i",
                "/videos/clip.mp4",
                "-c:v",
                "libx264",
                "-c:a",
                "aac",
                "/videos/converted/clip_libx264.mov",
            ]
        );
        assert_eq!(cmd.profile_arg(), None);
        assert_eq!(cmd.video_codec_arg(), Some("libx264"));
    }

    #[test]
    fn test_prores_profile_is_passed() {
        let builder = EncodeCommandBuilder::new("ffmpeg");
        let job = job("clip.mov", Codec::ProresKs, Some(ProresProfile::Standard));
        let cmd = builder.build(&job, Path::new("/out/clip_prores_ks.mov"));

        assert_eq!(cmd.args()[0], "-y");
        assert_eq!(cmd.profile_arg(), Some("2"));
        let profile_pos = cmd.args().iter().position(|a| a == "-profile:v").unwrap();
        let codec_pos = cmd.args().iter().position(|a| a == "-c:v").unwrap();
        let audio_pos = cmd.args().iter().position(|a| a == "-c:a").unwrap();
        assert!(codec_pos < profile_pos && profile_pos < audio_pos);
        assert_eq!(cmd.args().last().map(String::as_str), Some("/out/clip_prores_ks.mov"));
    }

    #[test]
    fn test_profile_ignored_for_other_codecs() {
        let builder = EncodeCommandBuilder::new("ffmpeg");
        for codec in [Codec::Libx264, Codec::Libx265, Codec::LibvpxVp9] {
            let job = job("clip.mp4", codec, Some(ProresProfile::Hq));
            let cmd = builder.build(&job, Path::new("/out/x.mov"));
            assert_eq!(cmd.profile_arg(), None, "codec {codec} must not get a profile");
            assert!(!cmd.args().iter().any(|a| a == "-profile:v"));
        }
    }

    #[test]
    fn test_prores_without_profile_has_no_profile_arg() {
        let builder = EncodeCommandBuilder::new("ffmpeg");
        let job = job("clip.mp4", Codec::ProresKs, None);
        let cmd = builder.build(&job, Path::new("/out/clip_prores_ks.mov"));
        assert_eq!(cmd.profile_arg(), None);
    }

    #[test]
    fn test_display_quotes_paths_with_spaces() {
        let builder = EncodeCommandBuilder::new("ffmpeg");
        let job = job("my clip.mp4", Codec::Libx264, None);
        let cmd = builder.build(&job, Path::new("/out/my clip_libx264.mov"));
        let shown = cmd.to_string();
        assert!(shown.starts_with("ffmpeg -y -i \"/videos/my clip.mp4\""));
        assert!(shown.ends_with("\"/out/my clip_libx264.mov\""));
    }
}
