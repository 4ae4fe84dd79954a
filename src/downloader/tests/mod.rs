use super::*;
use crate::config::{DownloadConfig, FileCollisionAction};
use crate::types::{Dimensions, DownloadLimit};
use std::num::NonZeroUsize;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


/// Serve `body` at `route` on the mock server
async fn mount_bytes(server: &MockServer, route: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Answer `route` with a bare status code
async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Downloader writing into a fresh temp dir
fn test_downloader(collision: FileCollisionAction) -> (Downloader, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = DownloadConfig {
        output_dir: temp_dir.path().to_path_buf(),
        timeout: None,
        file_collision: collision,
    };
    (Downloader::new(&config).unwrap(), temp_dir)
}

/// Config pointing the output directory into a temp dir
fn test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.download.output_dir = output_dir.to_path_buf();
    config
}

fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap()
}
