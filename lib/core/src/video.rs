use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_URL_LEN: usize = 500;

/// Kind of instructional video. The declaration order is the display order
/// used when videos are listed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    #[default]
    Instruction,
    FormGuide,
    Demonstration,
    Tips,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "480p")]
    Q480,
    #[default]
    #[serde(rename = "720p")]
    Q720,
    #[serde(rename = "1080p")]
    Q1080,
}

/// A video linked to an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "video_id")]
    pub id: u64,
    pub exercise_id: u64,
    pub video_title: String,
    pub video_url: String,
    pub video_description: Option<String>,
    pub duration_seconds: Option<u32>,
    pub video_type: VideoType,
    pub thumbnail_url: Option<String>,
    pub video_quality: VideoQuality,
    pub file_size_mb: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub video_title: String,
    pub video_url: String,
    #[serde(default)]
    pub video_description: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub video_type: VideoType,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub video_quality: VideoQuality,
    #[serde(default)]
    pub file_size_mb: Option<f64>,
}

impl NewVideo {
    pub fn validate(&self) -> Result<()> {
        if self.video_title.trim().is_empty() {
            return Err(Error::InvalidInput("video_title must not be empty".into()));
        }
        if self.video_title.len() > MAX_TITLE_LEN {
            return Err(Error::InvalidInput(format!(
                "video_title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        validate_url("video_url", &self.video_url)?;
        if let Some(thumbnail) = &self.thumbnail_url {
            validate_url("thumbnail_url", thumbnail)?;
        }
        if self.duration_seconds == Some(0) {
            return Err(Error::InvalidInput(
                "duration_seconds must be at least 1".into(),
            ));
        }
        if let Some(size) = self.file_size_mb {
            if size.is_nan() || size < 0.0 {
                return Err(Error::InvalidInput(
                    "file_size_mb must be a non-negative number".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Partial update for a video. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPatch {
    pub video_title: Option<String>,
    pub video_url: Option<String>,
    pub video_description: Option<String>,
    pub duration_seconds: Option<u32>,
    pub video_type: Option<VideoType>,
    pub thumbnail_url: Option<String>,
    pub video_quality: Option<VideoQuality>,
    pub file_size_mb: Option<f64>,
    pub is_active: Option<bool>,
}

impl VideoPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.video_title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("video_title must not be empty".into()));
            }
            if title.len() > MAX_TITLE_LEN {
                return Err(Error::InvalidInput(format!(
                    "video_title must be at most {MAX_TITLE_LEN} characters"
                )));
            }
        }
        if let Some(url) = &self.video_url {
            validate_url("video_url", url)?;
        }
        if let Some(thumbnail) = &self.thumbnail_url {
            validate_url("thumbnail_url", thumbnail)?;
        }
        if self.duration_seconds == Some(0) {
            return Err(Error::InvalidInput(
                "duration_seconds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn apply(&self, video: &mut Video) {
        if let Some(title) = &self.video_title {
            video.video_title = title.clone();
        }
        if let Some(url) = &self.video_url {
            video.video_url = url.clone();
        }
        if let Some(description) = &self.video_description {
            video.video_description = Some(description.clone());
        }
        if let Some(duration) = self.duration_seconds {
            video.duration_seconds = Some(duration);
        }
        if let Some(video_type) = self.video_type {
            video.video_type = video_type;
        }
        if let Some(thumbnail) = &self.thumbnail_url {
            video.thumbnail_url = Some(thumbnail.clone());
        }
        if let Some(quality) = self.video_quality {
            video.video_quality = quality;
        }
        if let Some(size) = self.file_size_mb {
            video.file_size_mb = Some(size);
        }
        if let Some(active) = self.is_active {
            video.is_active = active;
        }
    }
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if url.len() > MAX_URL_LEN {
        return Err(Error::InvalidInput(format!(
            "{field} must be at most {MAX_URL_LEN} characters"
        )));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::InvalidInput(format!("{field} must be a valid URL")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_video() -> NewVideo {
        NewVideo {
            video_title: "Push Up Form Guide".to_string(),
            video_url: "https://videos.example.com/pushup.mp4".to_string(),
            video_description: None,
            duration_seconds: Some(90),
            video_type: VideoType::FormGuide,
            thumbnail_url: None,
            video_quality: VideoQuality::default(),
            file_size_mb: Some(24.5),
        }
    }

    #[test]
    fn test_new_video_validation() {
        assert!(new_video().validate().is_ok());

        let mut invalid = new_video();
        invalid.video_url = "not-a-url".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = new_video();
        invalid.duration_seconds = Some(0);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_video_defaults() {
        assert_eq!(VideoQuality::default(), VideoQuality::Q720);
        assert_eq!(VideoType::default(), VideoType::Instruction);
        assert!(VideoType::Instruction < VideoType::Tips);
    }
}
