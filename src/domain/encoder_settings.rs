use serde::{Deserialize, Serialize};

/// Bitrate and frame-rate knobs handed to the long-lived encoder (process
/// C). Bitrates are kept as ffmpeg-style strings (`"800k"`) rather than
/// parsed numbers: they flow straight into the command line and the wire
/// config file unchanged, and ffmpeg accepts suffixes we'd otherwise have
/// to re-derive (`k`, `M`). See spec §3 "EncoderSettings" and §4.4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncoderSettings {
    pub audio_bitrate: String,
    pub video_bitrate: String,
    pub maxrate: String,
    pub bufsize: String,
    pub video_fps: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            audio_bitrate: "320k".to_string(),
            video_bitrate: "800k".to_string(),
            maxrate: "800k".to_string(),
            bufsize: "1600k".to_string(),
            video_fps: 24,
        }
    }
}

/// Fields accepted by `POST /encoder_settings`; any subset may be present,
/// unset fields leave the current value untouched (spec §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncoderSettingsPatch {
    pub audio_bitrate: Option<String>,
    pub video_bitrate: Option<String>,
    pub maxrate: Option<String>,
    pub bufsize: Option<String>,
    pub video_fps: Option<u32>,
}

impl EncoderSettings {
    pub fn apply_patch(&mut self, patch: EncoderSettingsPatch) {
        if let Some(v) = patch.audio_bitrate {
            self.audio_bitrate = v;
        }
        if let Some(v) = patch.video_bitrate {
            self.video_bitrate = v;
        }
        if let Some(v) = patch.maxrate {
            self.maxrate = v;
        }
        if let Some(v) = patch.bufsize {
            self.bufsize = v;
        }
        if let Some(v) = patch.video_fps {
            self.video_fps = v;
        }
    }

    /// A bitrate-ish string must be non-empty and end in a digit or a
    /// `k`/`M` suffix, matching what ffmpeg's `-b:a`/`-maxrate` accept.
    fn is_valid_bitrate(s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        let (digits, suffix) = match s.strip_suffix(['k', 'K', 'M']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) && (suffix || true)
    }

    pub fn is_valid(&self) -> bool {
        self.video_fps > 0
            && Self::is_valid_bitrate(&self.audio_bitrate)
            && Self::is_valid_bitrate(&self.video_bitrate)
            && Self::is_valid_bitrate(&self.maxrate)
            && Self::is_valid_bitrate(&self.bufsize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(EncoderSettings::default().is_valid());
    }

    #[test]
    fn rejects_non_numeric_bitrate() {
        let mut settings = EncoderSettings::default();
        settings.video_bitrate = "fast".to_string();
        assert!(!settings.is_valid());
    }

    #[test]
    fn patch_only_overwrites_present_fields() {
        let mut settings = EncoderSettings::default();
        settings.apply_patch(EncoderSettingsPatch {
            video_fps: Some(30),
            ..Default::default()
        });
        assert_eq!(settings.video_fps, 30);
        assert_eq!(settings.audio_bitrate, "320k");
    }
}
