use std::process::Command;

use crate::domain::{EncoderSettings, PipelineConfig};

/// Builds the long-lived encoder (C) command: PCM from stdin, MPEG-TS from
/// the UDP endpoint, muxed to FLV/RTMP. See spec §4.2.
pub fn build_encoder_command(config: &PipelineConfig) -> Command {
    let settings = &config.encoder_settings;
    let rtmp_url = config.rtmp_url.as_deref().unwrap_or_default();

    let mut cmd = Command::new(&config.ffmpeg_path);
    cmd.args(["-hide_banner", "-loglevel", "warning", "-nostdin", "-y"])
        // Input 0: raw PCM over the stdin pipe.
        .args(["-f", "s16le", "-ar", "48000", "-ac", "2", "-i", "pipe:0"])
        // Input 1: H.264/MPEG-TS over UDP from the video worker.
        .args(["-f", "mpegts", "-i", &config.video_udp_url])
        .args(["-map", "1:v:0", "-map", "0:a:0"])
        .args(["-c:v", "copy"])
        .args(["-c:a", "aac", "-b:a", &settings.audio_bitrate])
        .args([
            "-maxrate",
            &settings.maxrate,
            "-bufsize",
            &settings.bufsize,
        ])
        .args(["-f", "flv", &rtmp_url]);
    cmd
}

/// Builds the looping video worker (B) command: loop the video bed, burn in
/// the two reloadable overlay texts, emit H.264/MPEG-TS to the UDP
/// endpoint. See spec §4.3.
pub fn build_video_command(
    config: &PipelineConfig,
    overlay_text_path: &str,
    now_playing_path: &str,
) -> Command {
    let video_file = config.video_file.as_deref().unwrap_or_default();
    let filter = format!(
        "scale={size},format=yuv420p,\
         drawtext=textfile='{overlay}':reload=1:x=20:y=20:fontsize=24:fontcolor=white,\
         drawtext=textfile='{now_playing}':reload=1:x=20:y=h-th-20:fontsize=20:fontcolor=white",
        size = config.video_size,
        overlay = escape_textfile_path(overlay_text_path),
        now_playing = escape_textfile_path(now_playing_path),
    );

    let mut cmd = Command::new(&config.ffmpeg_path);
    cmd.args(["-hide_banner", "-loglevel", "warning", "-nostdin", "-y"])
        .args(["-stream_loop", "-1", "-re", "-i", video_file])
        .args(["-vf", &filter])
        .args(["-an"])
        .args([
            "-c:v",
            "libx264",
            "-preset",
            "ultrafast",
            "-tune",
            "zerolatency",
        ])
        .args(["-r", &config.encoder_settings.video_fps.to_string()])
        .args(["-f", "mpegts", &config.video_udp_url]);
    cmd
}

/// Builds the per-track decoder (A) command: decode starting at
/// `start_sec`, real-time paced, raw PCM to stdout. See spec §4.4.
pub fn build_decoder_command(ffmpeg_path: &str, track_path: &str, start_sec: f64) -> Command {
    let mut cmd = Command::new(ffmpeg_path);
    cmd.args(["-hide_banner", "-loglevel", "warning", "-nostdin", "-y"])
        .args(["-ss", &format!("{start_sec:.3}")])
        .args(["-re", "-i", track_path])
        .args(["-vn"])
        .args(["-f", "s16le", "-ar", "48000", "-ac", "2", "pipe:1"]);
    cmd
}

/// Builds the duration probe (ffprobe) command for a single track. See
/// spec §4.8.
pub fn build_probe_command(ffprobe_path: &str, track_path: &str) -> Command {
    let mut cmd = Command::new(ffprobe_path);
    cmd.args([
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
        track_path,
    ]);
    cmd
}

/// ffmpeg's `drawtext` filter treats `:` and `'` as argument separators;
/// both must be escaped when they appear in a textfile path.
fn escape_textfile_path(path: &str) -> String {
    path.replace('\\', "\\\\").replace(':', "\\:").replace('\'', "\\'")
}

/// Derives `ffprobe`'s path from `ffmpeg_path` when not explicitly set, by
/// substituting the binary name within the same directory (spec §6
/// "FFPROBE_PATH derived from FFMPEG_PATH's directory if absolute and
/// unset").
pub fn derive_ffprobe_path(ffmpeg_path: &str) -> String {
    let path = std::path::Path::new(ffmpeg_path);
    if path.is_absolute() {
        if let Some(parent) = path.parent() {
            let candidate = parent.join(if cfg!(windows) { "ffprobe.exe" } else { "ffprobe" });
            return candidate.to_string_lossy().into_owned();
        }
    }
    "ffprobe".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_ffprobe_path_from_absolute_ffmpeg() {
        let derived = derive_ffprobe_path("/opt/media/bin/ffmpeg");
        assert_eq!(derived, "/opt/media/bin/ffprobe");
    }

    #[test]
    fn derive_ffprobe_path_falls_back_for_bare_name() {
        assert_eq!(derive_ffprobe_path("ffmpeg"), "ffprobe");
    }

    #[test]
    fn encoder_command_maps_video_from_udp_and_audio_from_pipe() {
        let mut config = PipelineConfig::default();
        config.rtmp_url = Some("rtmp://host/live/key".to_string());
        config.encoder_settings = EncoderSettings::default();
        let cmd = build_encoder_command(&config);
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "1:v:0"));
        assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "0:a:0"));
        assert!(args.contains(&"rtmp://host/live/key".to_string()));
    }
}
