//! Media Selector: one query → at most one chosen candidate.

use std::sync::Arc;

use tracing::debug;

use storyreel_core::{MediaError, MediaKind, Result, SearchQuery};
use storyreel_pexels::{Photo, StockMediaSearch, Video, VideoFile};

use crate::chooser::ModalityChooser;

/// Rendition qualities in preference order.
const VIDEO_QUALITY_PRIORITY: &[&str] = &["hd", "sd"];

/// A candidate chosen for one query, with the URLs to download.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// A video and its preferred rendition.
    Video {
        /// Chosen candidate.
        video: Video,
        /// Rendition to download.
        file: VideoFile,
        /// Preview still.
        thumbnail_url: String,
    },
    /// A photo and its preferred rendition.
    Photo {
        /// Chosen candidate.
        photo: Photo,
        /// Rendition to download.
        url: String,
        /// The `medium` rendition.
        thumbnail_url: String,
    },
}

impl Selection {
    /// Modality of the chosen candidate.
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Video { .. } => MediaKind::Video,
            Self::Photo { .. } => MediaKind::Image,
        }
    }

    /// Pexels id of the chosen candidate.
    pub fn provider_id(&self) -> u64 {
        match self {
            Self::Video { video, .. } => video.id,
            Self::Photo { photo, .. } => photo.id,
        }
    }

    /// URL of the primary asset.
    pub fn asset_url(&self) -> &str {
        match self {
            Self::Video { file, .. } => &file.link,
            Self::Photo { url, .. } => url,
        }
    }

    /// URL of the thumbnail.
    pub fn thumbnail_url(&self) -> &str {
        match self {
            Self::Video { thumbnail_url, .. } | Self::Photo { thumbnail_url, .. } => thumbnail_url,
        }
    }

    /// File name of the primary asset for `segment_id`.
    pub fn asset_file_name(&self, segment_id: i64) -> String {
        match self {
            Self::Video { video, .. } => video_file_name(video.id, segment_id),
            Self::Photo { photo, url, .. } => photo_file_name(photo.id, segment_id, url),
        }
    }

    /// File name of the thumbnail for `segment_id`.
    pub fn thumbnail_file_name(&self, segment_id: i64) -> String {
        thumbnail_file_name(self.kind(), self.provider_id(), segment_id)
    }
}

/// Chooses a modality and picks the first usable candidate.
pub struct MediaSelector {
    search: Arc<dyn StockMediaSearch>,
    chooser: Arc<dyn ModalityChooser>,
}

impl MediaSelector {
    /// Selector over `search`, deciding modality with `chooser`.
    pub fn new(search: Arc<dyn StockMediaSearch>, chooser: Arc<dyn ModalityChooser>) -> Self {
        Self { search, chooser }
    }

    /// `Ok(None)` when the provider has nothing usable for the query.
    pub async fn select(&self, query: &SearchQuery) -> Result<Option<Selection>> {
        let kind = self.chooser.choose();
        debug!(segment_id = query.segment_id, kind = kind.as_str(), "modality chosen");
        match kind {
            MediaKind::Video => {
                let videos = self.search.search_videos(&query.query).await?;
                select_video(videos)
            }
            MediaKind::Image => {
                let photos = self.search.search_photos(&query.query).await?;
                select_photo(photos)
            }
        }
    }
}

/// First video with a usable rendition.
///
/// Only the first result is considered; later candidates are not a fallback.
pub fn select_video(videos: Vec<Video>) -> Result<Option<Selection>> {
    let Some(video) = videos.into_iter().next() else {
        return Ok(None);
    };
    let Some(file) = best_video_file(&video.video_files).cloned() else {
        return Ok(None);
    };
    let thumbnail_url = video
        .image
        .clone()
        .filter(|u| !u.is_empty())
        .ok_or(MediaError::MissingAsset("preview image"))?;
    Ok(Some(Selection::Video {
        video,
        file,
        thumbnail_url,
    }))
}

/// First photo with a usable image URL.
pub fn select_photo(photos: Vec<Photo>) -> Result<Option<Selection>> {
    let Some(photo) = photos.into_iter().next() else {
        return Ok(None);
    };
    let Some(url) = best_photo_url(&photo).map(str::to_owned) else {
        return Ok(None);
    };
    let thumbnail_url = photo
        .src
        .medium
        .clone()
        .filter(|u| !u.is_empty())
        .ok_or(MediaError::MissingAsset("medium thumbnail"))?;
    Ok(Some(Selection::Photo {
        photo,
        url,
        thumbnail_url,
    }))
}

/// `hd`, then `sd`, then whatever comes first.
pub fn best_video_file(files: &[VideoFile]) -> Option<&VideoFile> {
    VIDEO_QUALITY_PRIORITY
        .iter()
        .find_map(|q| files.iter().find(|f| f.quality.as_deref() == Some(*q)))
        .or_else(|| files.first())
}

/// `large`, then `medium`, then `original`.
pub fn best_photo_url(photo: &Photo) -> Option<&str> {
    [&photo.src.large, &photo.src.medium, &photo.src.original]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|u| !u.is_empty())
}

/// `pexels_video_{id}_{segment}.mp4`.
pub fn video_file_name(provider_id: u64, segment_id: i64) -> String {
    format!("pexels_video_{provider_id}_{segment_id}.mp4")
}

/// `.jpg` when the source URL mentions it, `.jpeg` otherwise.
pub fn photo_file_name(provider_id: u64, segment_id: i64, url: &str) -> String {
    let ext = if url.contains(".jpg") { ".jpg" } else { ".jpeg" };
    format!("pexels_photo_{provider_id}_{segment_id}{ext}")
}

/// `pexels_{video|photo}_{id}_{segment}_thumb.jpg`.
pub fn thumbnail_file_name(kind: MediaKind, provider_id: u64, segment_id: i64) -> String {
    let prefix = match kind {
        MediaKind::Video => "video",
        MediaKind::Image => "photo",
    };
    format!("pexels_{prefix}_{provider_id}_{segment_id}_thumb.jpg")
}
