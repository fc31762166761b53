//! Result Assembler: drives the per-query loop and collects the report.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info, warn};

use storyreel_core::keywords::{DEFAULT_MAX_KEYWORDS, build_query};
use storyreel_core::{
    FetchReport, MediaItem, OutcomeStatus, QueryOutcome, Result, SearchQuery, TranscriptSegment,
};
use storyreel_pexels::{AssetFetcher, StockMediaSearch};
use storyreel_telemetry::metrics::{
    STOCK_MEDIA_ITEMS_TOTAL, STOCK_MEDIA_QUERIES_TOTAL, STOCK_MEDIA_REQUEST_DURATION_SECONDS,
};

use crate::assemble::build_media_item;
use crate::chooser::{ModalityChooser, RandomModality};
use crate::limiter::{FixedDelay, RateLimiter};
use crate::selector::MediaSelector;

/// Default pause between queries.
pub const DEFAULT_QUERY_DELAY_MS: u64 = 150;

/// Sequential stock-media pipeline.
///
/// Queries run one at a time; each query's search and both downloads finish
/// before the rate limiter pause, and the pause finishes before the next
/// query starts.
pub struct StockMediaPipeline {
    selector: MediaSelector,
    fetcher: Arc<dyn AssetFetcher>,
    limiter: Arc<dyn RateLimiter>,
    max_keywords: usize,
}

/// Builder for [`StockMediaPipeline`].
pub struct PipelineBuilder {
    search: Arc<dyn StockMediaSearch>,
    fetcher: Arc<dyn AssetFetcher>,
    chooser: Arc<dyn ModalityChooser>,
    limiter: Arc<dyn RateLimiter>,
    max_keywords: usize,
}

impl PipelineBuilder {
    /// Replace the modality chooser.
    #[must_use]
    pub fn chooser(mut self, chooser: Arc<dyn ModalityChooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Replace the pause between queries.
    #[must_use]
    pub fn limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Keywords kept per query; at least one.
    #[must_use]
    pub fn max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords.max(1);
        self
    }

    /// Finish the pipeline.
    pub fn build(self) -> StockMediaPipeline {
        StockMediaPipeline {
            selector: MediaSelector::new(self.search, self.chooser),
            fetcher: self.fetcher,
            limiter: self.limiter,
            max_keywords: self.max_keywords,
        }
    }
}

impl StockMediaPipeline {
    /// Start a builder with production defaults: random modality, 150 ms
    /// pacing, three keywords.
    pub fn builder(
        search: Arc<dyn StockMediaSearch>,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> PipelineBuilder {
        PipelineBuilder {
            search,
            fetcher,
            chooser: Arc::new(RandomModality),
            limiter: Arc::new(FixedDelay::from_millis(DEFAULT_QUERY_DELAY_MS)),
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }

    /// Run every segment through the pipeline.
    ///
    /// Per-query failures are recorded in the report's outcomes and never
    /// abort the batch. Only request-fatal errors are returned.
    pub async fn run(&self, segments: &[TranscriptSegment]) -> Result<FetchReport> {
        let started = Instant::now();
        let mut report = FetchReport::default();

        for segment in segments {
            let Some(query) = build_query(segment, self.max_keywords) else {
                debug!(segment_id = segment.id, "no usable keywords, skipping segment");
                record_outcome(&mut report, QueryOutcome::skipped(segment.id));
                continue;
            };
            report.segments += 1;

            let outcome = match self.process_query(&query).await {
                Ok(Some(item)) => {
                    counter!(STOCK_MEDIA_ITEMS_TOTAL, "type" => item.kind.as_str()).increment(1);
                    report.stock_media.push(item);
                    QueryOutcome::completed(query.segment_id, &query.query, OutcomeStatus::Fetched)
                }
                Ok(None) => {
                    debug!(segment_id = query.segment_id, query = %query.query, "no results");
                    QueryOutcome::completed(query.segment_id, &query.query, OutcomeStatus::NoResults)
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(
                        segment_id = query.segment_id,
                        query = %query.query,
                        kind = e.kind(),
                        error = %e,
                        "stock media query failed"
                    );
                    QueryOutcome::errored(query.segment_id, &query.query, &e)
                }
            };
            record_outcome(&mut report, outcome);

            self.limiter.pause().await;
        }

        report.total_items = report.stock_media.len();
        histogram!(STOCK_MEDIA_REQUEST_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
        info!(
            segments = segments.len(),
            queries = report.segments,
            items = report.total_items,
            "stock media fetch complete"
        );
        Ok(report)
    }

    async fn process_query(&self, query: &SearchQuery) -> Result<Option<MediaItem>> {
        let Some(selection) = self.selector.select(query).await? else {
            return Ok(None);
        };

        let file_data = self
            .fetcher
            .fetch(selection.asset_url(), &selection.asset_file_name(query.segment_id))
            .await?;
        let thumbnail_data = self
            .fetcher
            .fetch(
                selection.thumbnail_url(),
                &selection.thumbnail_file_name(query.segment_id),
            )
            .await?;

        Ok(Some(build_media_item(query, selection, file_data, thumbnail_data)))
    }
}

fn record_outcome(report: &mut FetchReport, outcome: QueryOutcome) {
    counter!(STOCK_MEDIA_QUERIES_TOTAL, "status" => outcome.status.as_str()).increment(1);
    report.outcomes.push(outcome);
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;
    use parking_lot::Mutex;

    use storyreel_core::{DownloadedFile, MediaError, MediaKind};
    use storyreel_pexels::{Photo, PhotoSrc, Video, VideoFile, VideoUser};

    use super::*;
    use crate::chooser::FixedModality;
    use crate::limiter::NoDelay;

    /// Pre-programmed search results, consumed in call order.
    #[derive(Default)]
    struct MockSearch {
        videos: Mutex<VecDeque<Result<Vec<Video>>>>,
        photos: Mutex<VecDeque<Result<Vec<Photo>>>>,
        queries: Mutex<Vec<String>>,
    }

    impl MockSearch {
        fn with_videos(responses: Vec<Result<Vec<Video>>>) -> Self {
            Self {
                videos: Mutex::new(responses.into()),
                ..Self::default()
            }
        }

        fn with_photos(responses: Vec<Result<Vec<Photo>>>) -> Self {
            Self {
                photos: Mutex::new(responses.into()),
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.queries.lock().len()
        }
    }

    #[async_trait]
    impl StockMediaSearch for MockSearch {
        async fn search_videos(&self, query: &str) -> Result<Vec<Video>> {
            self.queries.lock().push(query.to_string());
            self.videos.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn search_photos(&self, query: &str) -> Result<Vec<Photo>> {
            self.queries.lock().push(query.to_string());
            self.photos.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Returns the URL as the body; fails for URLs containing `fail_on`.
    #[derive(Default)]
    struct MockFetcher {
        fail_on: Option<&'static str>,
        fetched: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl AssetFetcher for MockFetcher {
        async fn fetch(&self, url: &str, file_name: &str) -> Result<DownloadedFile> {
            self.fetched.lock().push((url.to_string(), file_name.to_string()));
            if self.fail_on.is_some_and(|needle| url.contains(needle)) {
                return Err(MediaError::Download {
                    url: url.to_string(),
                    status: 404,
                });
            }
            Ok(DownloadedFile::new(file_name, Bytes::from(url.to_string())))
        }
    }

    #[derive(Default)]
    struct CountingLimiter(AtomicUsize);

    #[async_trait]
    impl RateLimiter for CountingLimiter {
        async fn pause(&self) {
            let _ = self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn seg(id: i64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            id,
            start: 0.0,
            end: 5.0,
            text: text.into(),
        }
    }

    fn video(id: u64, duration: Option<f64>) -> Video {
        Video {
            id,
            width: 1920,
            height: 1080,
            duration,
            image: Some(format!("https://img/{id}.jpg")),
            user: VideoUser { name: Some("Ana".into()) },
            video_files: vec![
                VideoFile {
                    quality: Some("sd".into()),
                    link: format!("https://v/{id}-sd.mp4"),
                    width: Some(640),
                    height: Some(360),
                },
                VideoFile {
                    quality: Some("hd".into()),
                    link: format!("https://v/{id}-hd.mp4"),
                    width: Some(1280),
                    height: Some(720),
                },
            ],
        }
    }

    fn photo(id: u64) -> Photo {
        Photo {
            id,
            width: 5000,
            height: 3333,
            alt: Some("Old stone castle".into()),
            photographer: Some("Joey".into()),
            src: PhotoSrc {
                original: Some(format!("https://i/{id}.jpeg")),
                large: Some(format!("https://i/{id}-large.jpg")),
                medium: Some(format!("https://i/{id}-medium.jpg")),
                ..PhotoSrc::default()
            },
        }
    }

    fn pipeline(
        search: Arc<MockSearch>,
        fetcher: Arc<MockFetcher>,
        kind: MediaKind,
    ) -> StockMediaPipeline {
        StockMediaPipeline::builder(search, fetcher)
            .chooser(Arc::new(FixedModality(kind)))
            .limiter(Arc::new(NoDelay))
            .build()
    }

    #[tokio::test]
    async fn single_video_segment() {
        let search = Arc::new(MockSearch::with_videos(vec![Ok(vec![video(42, Some(7.0))])]));
        let fetcher = Arc::new(MockFetcher::default());
        let p = pipeline(search.clone(), fetcher.clone(), MediaKind::Video);

        let report = p
            .run(&[seg(1, "The ancient castle stood silently overlooking")])
            .await
            .unwrap();

        assert_eq!(report.total_items, 1);
        assert_eq!(report.segments, 1);
        let item = &report.stock_media[0];
        assert_eq!(item.id, "pexels_video_42_1");
        assert_eq!(item.url, "https://v/42-hd.mp4");
        assert_eq!(item.search_query, "ancient castle stood");
        assert_eq!(item.source, "pexels");
        assert_eq!(item.segment_id, 1);
        assert!(item.start_time.abs() < f64::EPSILON);
        assert!((item.end_time - 5.0).abs() < f64::EPSILON);
        assert_eq!(item.file_data.file_name, "pexels_video_42_1.mp4");
        assert_eq!(item.thumbnail_data.file_name, "pexels_video_42_1_thumb.jpg");

        assert_eq!(search.queries.lock().as_slice(), ["ancient castle stood"]);
        let fetched = fetcher.fetched.lock();
        assert_eq!(fetched[0].0, "https://v/42-hd.mp4");
        assert_eq!(fetched[1].0, "https://img/42.jpg");
        assert_eq!(report.outcomes[0].status, OutcomeStatus::Fetched);
    }

    #[tokio::test]
    async fn single_photo_segment() {
        let search = Arc::new(MockSearch::with_photos(vec![Ok(vec![photo(7), photo(8)])]));
        let fetcher = Arc::new(MockFetcher::default());
        let p = pipeline(search, fetcher, MediaKind::Image);

        let report = p.run(&[seg(3, "Golden sunset harbor")]).await.unwrap();
        let item = &report.stock_media[0];
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.pexels_id, 7);
        assert_eq!((item.width, item.height), (5000, 3333));
        assert_eq!(item.file_data.file_name, "pexels_photo_7_3.jpg");
        assert_eq!(item.thumbnail_url, "https://i/7-medium.jpg");
        assert_eq!(item.description, "Old stone castle");
    }

    #[tokio::test]
    async fn stop_word_segments_make_no_calls() {
        let search = Arc::new(MockSearch::default());
        let fetcher = Arc::new(MockFetcher::default());
        let p = pipeline(search.clone(), fetcher.clone(), MediaKind::Video);

        let report = p
            .run(&[seg(1, "this that with have"), seg(2, "a cat ran")])
            .await
            .unwrap();

        assert_eq!(report.segments, 0);
        assert_eq!(report.total_items, 0);
        assert!(report.stock_media.is_empty());
        assert_eq!(report.count(OutcomeStatus::SkippedNoKeywords), 2);
        assert_eq!(search.call_count(), 0);
        assert!(fetcher.fetched.lock().is_empty());
    }

    #[tokio::test]
    async fn no_results_yields_no_item() {
        let search = Arc::new(MockSearch::with_videos(vec![Ok(Vec::new())]));
        let fetcher = Arc::new(MockFetcher::default());
        let p = pipeline(search, fetcher.clone(), MediaKind::Video);

        let report = p.run(&[seg(1, "purple elephant dancing")]).await.unwrap();
        assert_eq!(report.segments, 1);
        assert_eq!(report.total_items, 0);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::NoResults);
        assert!(fetcher.fetched.lock().is_empty());
    }

    #[tokio::test]
    async fn provider_error_is_isolated() {
        let search = Arc::new(MockSearch::with_videos(vec![
            Err(MediaError::Provider {
                status: 500,
                body: "boom".into(),
            }),
            Ok(vec![video(9, None)]),
        ]));
        let fetcher = Arc::new(MockFetcher::default());
        let p = pipeline(search, fetcher, MediaKind::Video);

        let report = p
            .run(&[seg(1, "stormy ocean waves"), seg(2, "quiet mountain lake")])
            .await
            .unwrap();

        assert_eq!(report.segments, 2);
        assert_eq!(report.total_items, 1);
        assert_eq!(report.stock_media[0].segment_id, 2);
        assert!((report.stock_media[0].duration - 10.0).abs() < f64::EPSILON);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::ProviderError);
        assert!(report.outcomes[0].error.as_deref().unwrap().contains("500"));
        assert_eq!(report.outcomes[1].status, OutcomeStatus::Fetched);
    }

    #[tokio::test]
    async fn thumbnail_failure_is_download_error() {
        let search = Arc::new(MockSearch::with_videos(vec![Ok(vec![video(5, Some(4.0))])]));
        let fetcher = Arc::new(MockFetcher {
            fail_on: Some("https://img/"),
            ..MockFetcher::default()
        });
        let p = pipeline(search, fetcher.clone(), MediaKind::Video);

        let report = p.run(&[seg(1, "busy city street")]).await.unwrap();
        assert_eq!(report.total_items, 0);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::DownloadError);
        assert_eq!(fetcher.fetched.lock().len(), 2);
    }

    #[tokio::test]
    async fn missing_preview_skips_downloads() {
        let mut v = video(5, Some(4.0));
        v.image = None;
        let search = Arc::new(MockSearch::with_videos(vec![Ok(vec![v])]));
        let fetcher = Arc::new(MockFetcher::default());
        let p = pipeline(search, fetcher.clone(), MediaKind::Video);

        let report = p.run(&[seg(1, "busy city street")]).await.unwrap();
        assert_eq!(report.outcomes[0].status, OutcomeStatus::DownloadError);
        assert!(fetcher.fetched.lock().is_empty());
    }

    #[tokio::test]
    async fn outcomes_follow_input_order() {
        let search = Arc::new(MockSearch::with_photos(vec![
            Ok(vec![photo(1)]),
            Ok(Vec::new()),
        ]));
        let fetcher = Arc::new(MockFetcher::default());
        let p = pipeline(search, fetcher, MediaKind::Image);

        let report = p
            .run(&[
                seg(10, "bright morning sunrise"),
                seg(11, "this that"),
                seg(12, "empty desert highway"),
            ])
            .await
            .unwrap();

        let ids: Vec<i64> = report.outcomes.iter().map(|o| o.segment_id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
        let statuses: Vec<OutcomeStatus> = report.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                OutcomeStatus::Fetched,
                OutcomeStatus::SkippedNoKeywords,
                OutcomeStatus::NoResults
            ]
        );
        assert!(report.stock_media.len() <= report.segments);
    }

    #[tokio::test]
    async fn limiter_runs_after_every_query() {
        let search = Arc::new(MockSearch::with_videos(vec![
            Err(MediaError::Network("reset".into())),
            Ok(vec![video(1, None)]),
        ]));
        let limiter = Arc::new(CountingLimiter::default());
        let p = StockMediaPipeline::builder(search, Arc::new(MockFetcher::default()))
            .chooser(Arc::new(FixedModality(MediaKind::Video)))
            .limiter(limiter.clone())
            .build();

        let _ = p
            .run(&[
                seg(1, "green rolling hills"),
                seg(2, "with that"),
                seg(3, "snowy mountain peak"),
            ])
            .await
            .unwrap();
        assert_eq!(limiter.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn default_pacing_is_150ms_per_query() {
        let search = Arc::new(MockSearch::default());
        let p = StockMediaPipeline::builder(search, Arc::new(MockFetcher::default()))
            .chooser(Arc::new(FixedModality(MediaKind::Image)))
            .build();

        let start = tokio::time::Instant::now();
        let report = p
            .run(&[seg(1, "river delta aerial"), seg(2, "forest canopy birds")])
            .await
            .unwrap();
        assert_eq!(report.segments, 2);
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn max_keywords_is_configurable() {
        let search = Arc::new(MockSearch::default());
        let p = StockMediaPipeline::builder(search.clone(), Arc::new(MockFetcher::default()))
            .chooser(Arc::new(FixedModality(MediaKind::Video)))
            .limiter(Arc::new(NoDelay))
            .max_keywords(1)
            .build();

        let _ = p.run(&[seg(1, "ancient castle stood")]).await.unwrap();
        assert_eq!(search.queries.lock().as_slice(), ["ancient"]);
    }
}
