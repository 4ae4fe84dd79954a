//! Playlist feed fixtures served from a mock HTTP server

use std::path::Path;
use thumbnail_dl::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the playlist feed is served from
pub const FEED_PATH: &str = "/playlist.json";

/// One playlist entry: upload date and (width, height, url path) variants
pub struct EntryFixture {
    pub upload_date: Option<&'static str>,
    pub thumbnails: Vec<(u32, u32, &'static str)>,
}

impl EntryFixture {
    pub fn new(upload_date: &'static str, thumbnails: Vec<(u32, u32, &'static str)>) -> Self {
        Self {
            upload_date: Some(upload_date),
            thumbnails,
        }
    }
}

/// Render a feed whose thumbnail URLs point at `base`
pub fn feed_json(base: &str, entries: &[EntryFixture]) -> serde_json::Value {
    let results: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| {
            let thumbnails: Vec<serde_json::Value> = entry
                .thumbnails
                .iter()
                .map(|(w, h, url_path)| {
                    serde_json::json!({"w": w, "h": h, "url": format!("{base}{url_path}")})
                })
                .collect();
            let mut value = serde_json::json!({ "thumbnails": thumbnails });
            if let Some(date) = entry.upload_date {
                value["uploadDate"] = serde_json::Value::String(date.to_string());
            }
            value
        })
        .collect();
    serde_json::json!({ "results": results })
}

/// Serve a feed built from `entries` at [`FEED_PATH`]
pub async fn mount_feed(server: &MockServer, entries: &[EntryFixture]) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_json(&server.uri(), entries)))
        .mount(server)
        .await;
}

/// Serve `body` as an image at `url_path`
pub async fn mount_image(server: &MockServer, url_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(body.to_vec()),
        )
        .mount(server)
        .await;
}

/// Full URL of the feed on `server`
pub fn feed_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), FEED_PATH)
}

/// Default configuration writing into `output_dir`
pub fn config_in(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.download.output_dir = output_dir.to_path_buf();
    config
}

/// Sorted names of the files in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
