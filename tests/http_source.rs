//! Background polling through `HttpSource`.

mod common;

use std::thread;
use std::time::{Duration, Instant};

use common::{FeedServer, SAMPLE_FEED};
use parkwatch::{App, DataSource, FeedClient, HttpSource, Thresholds};
use parkwatch::ui::Theme;
use parkwatch_types::Reading;

const WAIT: Duration = Duration::from_secs(10);

fn client(url: &str) -> FeedClient {
    FeedClient::builder().endpoint(url).build().unwrap()
}

fn poll_until(source: &mut HttpSource) -> Reading {
    let start = Instant::now();
    loop {
        if let Some(reading) = source.poll() {
            return reading;
        }
        assert!(start.elapsed() < WAIT, "no reading within {:?}", WAIT);
        thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn test_first_fetch_is_published() {
    let server = FeedServer::start(200, SAMPLE_FEED);
    let mut source = HttpSource::spawn(client(server.url()), Duration::from_secs(60)).unwrap();

    assert!(source.description().starts_with("http: http://127.0.0.1:"));
    let reading = poll_until(&mut source);
    assert_eq!(reading.entry_id, "42");
    assert_eq!(reading.len(), 3);
    assert!(source.error().is_none());

    // Nothing new until the next fetch
    assert!(source.poll().is_none());
}

#[test]
fn test_failed_fetch_sets_error() {
    let server = FeedServer::start(500, "oops");
    let mut source = HttpSource::spawn(client(server.url()), Duration::from_secs(60)).unwrap();

    let start = Instant::now();
    while source.error().is_none() {
        assert!(source.poll().is_none());
        assert!(start.elapsed() < WAIT, "no error within {:?}", WAIT);
        thread::sleep(Duration::from_millis(20));
    }
    assert!(source.error().unwrap().contains("500"));
}

#[test]
fn test_refresh_triggers_fetch() {
    let server = FeedServer::start(200, SAMPLE_FEED);
    let mut source = HttpSource::spawn(client(server.url()), Duration::from_secs(60)).unwrap();
    poll_until(&mut source);
    assert_eq!(server.hits(), 1);

    source.refresh();
    let start = Instant::now();
    while server.hits() < 2 {
        assert!(start.elapsed() < WAIT, "refresh did not fetch");
        thread::sleep(Duration::from_millis(20));
    }
    // Same entry again, still published as a fresh reading
    assert_eq!(poll_until(&mut source).entry_id, "42");
}

#[test]
fn test_app_reads_from_http_source() {
    let server = FeedServer::start(200, SAMPLE_FEED);
    let source = HttpSource::spawn(client(server.url()), Duration::from_secs(60)).unwrap();
    let mut app = App::with_theme(Box::new(source), Thresholds::default(), Theme::dark());

    let start = Instant::now();
    while !app.reload_data() {
        assert!(start.elapsed() < WAIT, "app never received data");
        thread::sleep(Duration::from_millis(20));
    }

    let data = app.data.as_ref().unwrap();
    assert_eq!(data.occupied_count(), 2);
    assert_eq!(data.free_count(), 1);
    assert_eq!(data.channel_name(), Some("Parcare"));
    assert_eq!(data.entries_behind(), Some(0));
}

#[test]
fn test_zero_interval_is_rejected() {
    let server = FeedServer::start(200, SAMPLE_FEED);
    let err = HttpSource::spawn(client(server.url()), Duration::ZERO).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert_eq!(server.hits(), 0);
}
