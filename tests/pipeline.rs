//! End-to-end runs against a mock feed server
//!
//! Each test serves a playlist feed and its thumbnails from wiremock and runs
//! the full fetch, select and download pipeline into a temporary directory.

mod common;

use common::{EntryFixture, config_in, feed_url, file_names, mount_feed, mount_image};
use std::num::NonZeroUsize;
use tempfile::TempDir;
use thumbnail_dl::{Dimensions, DownloadLimit, FileCollisionAction, RunSummary, ThumbnailDownloader};
use wiremock::MockServer;

fn typical_feed() -> Vec<EntryFixture> {
    vec![
        EntryFixture::new(
            "2024-01-10T12:00:00+00:00",
            vec![
                (640, 360, "/s8/1/a/OvCc/ep10.jpg"),
                (480, 270, "/s8/1/a/oq1b/ep10.jpg"),
            ],
        ),
        EntryFixture::new(
            "2024-03-02T12:00:00+00:00",
            vec![(1280, 720, "/s8/1/b/qR4e/ep12.jpg")],
        ),
        EntryFixture::new(
            "2024-02-20T12:00:00+00:00",
            vec![(640, 360, "/s8/1/c/OvCc/ep11.jpg")],
        ),
        EntryFixture {
            upload_date: None,
            thumbnails: vec![(320, 180, "/s8/1/d/0kob/ep00.jpg")],
        },
    ]
}

async fn mount_hd_images(server: &MockServer) {
    mount_image(server, "/s8/1/b/qR4e/ep12.jpg", b"ep12").await;
    mount_image(server, "/s8/1/c/qR4e/ep11.jpg", b"ep11").await;
    mount_image(server, "/s8/1/a/qR4e/ep10.jpg", b"ep10").await;
    mount_image(server, "/s8/1/d/qR4e/ep00.jpg", b"ep00").await;
}

#[tokio::test]
async fn downloads_newest_thumbnails_at_target_size() {
    let server = MockServer::start().await;
    mount_feed(&server, &typical_feed()).await;
    mount_hd_images(&server).await;
    let dir = TempDir::new().unwrap();

    let downloader = ThumbnailDownloader::new(config_in(dir.path()))
        .await
        .unwrap();
    let RunSummary::Completed { plan, downloads } = downloader.run(&feed_url(&server)).await
    else {
        panic!("expected a completed run");
    };

    assert_eq!(plan.total_available, 4);
    assert_eq!(
        plan.sample_sizes.into_iter().collect::<Vec<_>>(),
        vec![Dimensions::new(480, 270), Dimensions::new(640, 360)]
    );
    let names: Vec<String> = downloads
        .saved
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["ep12.jpg", "ep11.jpg", "ep10.jpg", "ep00.jpg"]);
    assert!(downloads.failed.is_empty());
    assert_eq!(std::fs::read(dir.path().join("ep12.jpg")).unwrap(), b"ep12");
    assert_eq!(std::fs::read(dir.path().join("ep11.jpg")).unwrap(), b"ep11");
}

#[tokio::test]
async fn limit_stops_after_newest_entries() {
    let server = MockServer::start().await;
    mount_feed(&server, &typical_feed()).await;
    mount_hd_images(&server).await;
    let dir = TempDir::new().unwrap();

    let mut config = config_in(dir.path());
    config.selection.limit = DownloadLimit::Count(NonZeroUsize::new(2).unwrap());
    let downloader = ThumbnailDownloader::new(config).await.unwrap();
    downloader.run(&feed_url(&server)).await;

    assert_eq!(file_names(dir.path()), vec!["ep11.jpg", "ep12.jpg"]);
}

#[tokio::test]
async fn missing_thumbnails_are_skipped_and_reported() {
    let server = MockServer::start().await;
    mount_feed(&server, &typical_feed()).await;
    // Only the newest thumbnail exists on the server
    mount_image(&server, "/s8/1/b/qR4e/ep12.jpg", b"ep12").await;
    let dir = TempDir::new().unwrap();

    let mut config = config_in(dir.path());
    config.selection.limit = DownloadLimit::All;
    let downloader = ThumbnailDownloader::new(config).await.unwrap();
    let RunSummary::Completed { downloads, .. } = downloader.run(&feed_url(&server)).await
    else {
        panic!("expected a completed run");
    };

    assert_eq!(downloads.saved.len(), 1);
    assert_eq!(downloads.failed.len(), 3);
    assert_eq!(file_names(dir.path()), vec!["ep12.jpg"]);
}

#[tokio::test]
async fn smaller_target_uses_exact_variant_when_present() {
    let server = MockServer::start().await;
    mount_feed(&server, &typical_feed()).await;
    mount_image(&server, "/s8/1/a/oq1b/ep10.jpg", b"small").await;
    let dir = TempDir::new().unwrap();

    let mut config = config_in(dir.path());
    config.selection.width = 480;
    config.selection.height = 270;
    let downloader = ThumbnailDownloader::new(config).await.unwrap();
    let plan = downloader.plan(&feed_url(&server)).await.unwrap();

    let base = server.uri();
    assert_eq!(
        plan.urls,
        vec![
            format!("{base}/s8/1/b/oq1b/ep12.jpg"),
            format!("{base}/s8/1/c/oq1b/ep11.jpg"),
            format!("{base}/s8/1/a/oq1b/ep10.jpg"),
            format!("{base}/s8/1/d/oq1b/ep00.jpg"),
        ]
    );
}

#[tokio::test]
async fn unknown_target_size_selects_nothing() {
    let server = MockServer::start().await;
    mount_feed(&server, &typical_feed()).await;
    let dir = TempDir::new().unwrap();

    let mut config = config_in(dir.path());
    config.selection.width = 999;
    config.selection.height = 999;
    let downloader = ThumbnailDownloader::new(config).await.unwrap();
    let RunSummary::Completed { plan, downloads } = downloader.run(&feed_url(&server)).await
    else {
        panic!("expected a completed run");
    };

    assert!(plan.urls.is_empty());
    assert_eq!(downloads.attempted(), 0);
    assert!(file_names(dir.path()).is_empty());
}

#[tokio::test]
async fn rerun_with_rename_policy_keeps_both_copies() {
    let server = MockServer::start().await;
    mount_feed(&server, &typical_feed()).await;
    mount_hd_images(&server).await;
    let dir = TempDir::new().unwrap();

    let mut config = config_in(dir.path());
    config.selection.limit = DownloadLimit::Count(NonZeroUsize::new(1).unwrap());
    config.download.file_collision = FileCollisionAction::Rename;
    let downloader = ThumbnailDownloader::new(config).await.unwrap();

    downloader.run(&feed_url(&server)).await;
    downloader.run(&feed_url(&server)).await;

    assert_eq!(file_names(dir.path()), vec!["ep12 (1).jpg", "ep12.jpg"]);
}

#[tokio::test]
async fn unreachable_feed_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let downloader = ThumbnailDownloader::new(config_in(dir.path()))
        .await
        .unwrap();

    let summary = downloader.run("http://127.0.0.1:9/playlist.json").await;
    assert_eq!(summary, RunSummary::NoData);
    assert!(file_names(dir.path()).is_empty());
}
