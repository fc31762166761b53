//! Media items produced by the pipeline and the in-memory assets they carry.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Value of [`MediaItem::source`] for every item.
pub const SOURCE_PEXELS: &str = "pexels";

/// Duration assigned to a video when the provider omits one.
pub const DEFAULT_VIDEO_DURATION_SECS: f64 = 10.0;

/// Display duration assigned to every still image.
pub const IMAGE_DURATION_SECS: f64 = 5.0;

const MIME_MP4: &str = "video/mp4";
const MIME_JPEG: &str = "image/jpeg";

/// Media modality of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Moving footage, delivered as MP4.
    Video,
    /// Still photograph.
    Image,
}

impl MediaKind {
    /// Label used in metrics and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

/// Binary asset held in memory for the caller to persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedFile {
    /// Name the caller should store the asset under.
    pub file_name: String,
    /// Raw asset bytes. Base64 on the wire.
    #[serde(with = "base64_bytes")]
    pub file_buffer: Bytes,
    /// MIME type inferred from `file_name`.
    pub file_type: String,
}

impl DownloadedFile {
    /// Wrap downloaded bytes, inferring the MIME type from the file name.
    pub fn new(file_name: impl Into<String>, file_buffer: Bytes) -> Self {
        let file_name = file_name.into();
        let file_type = mime_for_file_name(&file_name).to_owned();
        Self {
            file_name,
            file_buffer,
            file_type,
        }
    }

    /// Size of the buffered asset in bytes.
    pub fn len(&self) -> usize {
        self.file_buffer.len()
    }

    /// Whether the download produced no bytes.
    pub fn is_empty(&self) -> bool {
        self.file_buffer.is_empty()
    }
}

/// `.mp4` names are video; everything else is treated as JPEG.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    if file_name.ends_with(".mp4") {
        MIME_MP4
    } else {
        MIME_JPEG
    }
}

/// One stock asset matched to one transcript segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Stable id: `pexels_{video|photo}_{providerId}_{segmentId}`.
    pub id: String,
    /// Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Display name built from the query.
    pub name: String,
    /// Photo alt text, or a credit line.
    pub description: String,
    /// Remote URL the asset was downloaded from.
    pub url: String,
    /// The asset itself.
    pub file_data: DownloadedFile,
    /// Remote URL of the thumbnail.
    pub thumbnail_url: String,
    /// The thumbnail itself.
    pub thumbnail_data: DownloadedFile,
    /// Seconds.
    pub duration: f64,
    /// Pixels.
    pub width: u32,
    /// Pixels.
    pub height: u32,
    /// Segment this item illustrates.
    pub segment_id: i64,
    /// Segment start, in seconds.
    pub start_time: f64,
    /// Segment end, in seconds.
    pub end_time: f64,
    /// Query that found this item.
    pub search_query: String,
    /// Provider-side id of the chosen candidate.
    pub pexels_id: u64,
    /// Credited author. Empty when the provider omits it.
    pub photographer: String,
    /// Always [`SOURCE_PEXELS`].
    pub source: String,
}

/// Serde adapter: `Bytes` as a standard base64 string.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}
