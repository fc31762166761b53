//! Pexels search response types.
//!
//! Only the fields the pipeline reads are modeled; unknown fields are ignored.
//! Fields the API documents but sometimes sends as `null` are `Option`.

use serde::{Deserialize, Serialize};

/// `GET /videos/search` response body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VideoSearchResponse {
    /// Candidates in relevance order.
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// A video candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Pexels video id.
    pub id: u64,
    /// Source width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Source height in pixels.
    #[serde(default)]
    pub height: u32,
    /// Seconds. Missing on some uploads.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Preview still used as the thumbnail.
    #[serde(default)]
    pub image: Option<String>,
    /// Uploader credit.
    #[serde(default)]
    pub user: VideoUser,
    /// Available renditions.
    #[serde(default)]
    pub video_files: Vec<VideoFile>,
}

/// Uploader of a video.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoUser {
    /// Display name; sometimes `null`.
    #[serde(default)]
    pub name: Option<String>,
}

/// One encoded rendition of a video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoFile {
    /// `hd`, `sd`, `uhd`, or absent for HLS.
    #[serde(default)]
    pub quality: Option<String>,
    /// Direct download URL.
    pub link: String,
    /// Rendition width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Rendition height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
}

/// `GET /v1/search` response body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PhotoSearchResponse {
    /// Candidates in relevance order.
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// A photo candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Pexels photo id.
    pub id: u64,
    /// Pixels.
    #[serde(default)]
    pub width: u32,
    /// Pixels.
    #[serde(default)]
    pub height: u32,
    /// Alt text, often empty.
    #[serde(default)]
    pub alt: Option<String>,
    /// Sometimes `null`.
    #[serde(default)]
    pub photographer: Option<String>,
    /// Rendition URLs.
    #[serde(default)]
    pub src: PhotoSrc,
}

/// Size name → URL map of a photo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSrc {
    /// Full-size upload.
    #[serde(default)]
    pub original: Option<String>,
    /// `large` at double density.
    #[serde(default)]
    pub large2x: Option<String>,
    /// About 940 px tall.
    #[serde(default)]
    pub large: Option<String>,
    /// About 350 px tall.
    #[serde(default)]
    pub medium: Option<String>,
    /// About 130 px tall.
    #[serde(default)]
    pub small: Option<String>,
    /// 280 x 200 crop.
    #[serde(default)]
    pub tiny: Option<String>,
}
