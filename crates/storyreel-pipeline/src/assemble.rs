//! Media item construction from a selection and its downloaded files.

use storyreel_core::media::{DEFAULT_VIDEO_DURATION_SECS, IMAGE_DURATION_SECS, SOURCE_PEXELS};
use storyreel_core::{DownloadedFile, MediaItem, MediaKind, SearchQuery};

use crate::selector::Selection;

/// Build the item for `selection` matched to `query`.
pub fn build_media_item(
    query: &SearchQuery,
    selection: Selection,
    file_data: DownloadedFile,
    thumbnail_data: DownloadedFile,
) -> MediaItem {
    let kind = selection.kind();
    let provider_id = selection.provider_id();
    let prefix = match kind {
        MediaKind::Video => "video",
        MediaKind::Image => "photo",
    };
    let id = format!("pexels_{prefix}_{provider_id}_{}", query.segment_id);

    let (name, description, url, thumbnail_url, duration, width, height, photographer) =
        match selection {
            Selection::Video {
                video,
                file,
                thumbnail_url,
            } => {
                let author = video.user.name.unwrap_or_default();
                (
                    format!("Stock video: {}", query.query),
                    format!("Video by {author}"),
                    file.link,
                    thumbnail_url,
                    video.duration.unwrap_or(DEFAULT_VIDEO_DURATION_SECS),
                    file.width.unwrap_or(video.width),
                    file.height.unwrap_or(video.height),
                    author,
                )
            }
            Selection::Photo {
                photo,
                url,
                thumbnail_url,
            } => {
                let author = photo.photographer.unwrap_or_default();
                let description = photo
                    .alt
                    .filter(|alt| !alt.trim().is_empty())
                    .unwrap_or_else(|| format!("Photo by {author}"));
                (
                    format!("Stock photo: {}", query.query),
                    description,
                    url,
                    thumbnail_url,
                    IMAGE_DURATION_SECS,
                    photo.width,
                    photo.height,
                    author,
                )
            }
        };

    MediaItem {
        id,
        kind,
        name,
        description,
        url,
        file_data,
        thumbnail_url,
        thumbnail_data,
        duration,
        width,
        height,
        segment_id: query.segment_id,
        start_time: query.start_time,
        end_time: query.end_time,
        search_query: query.query.clone(),
        pexels_id: provider_id,
        photographer,
        source: SOURCE_PEXELS.to_string(),
    }
}
