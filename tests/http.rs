use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

// Five days starting Wednesday 2020-01-01.
const SAMPLE_CSV: &str = "date,trips,weather,weekday,casual,registered\n\
2020-01-01,120,clear,Wed,30,90\n\
2020-01-02,80,rain,Thu,10,70\n\
2020-01-03,150,clear,Fri,50,100\n\
2020-01-04,200,cloudy,Sat,120,80\n\
2020-01-05,90,snow,Sun,20,70\n";

// Midnight UTC timestamps for the sample span.
const TS_2020_01_01: i64 = 1_577_836_800;
const TS_2020_01_03: i64 = TS_2020_01_01 + 2 * 86_400;
const TS_2020_01_05: i64 = TS_2020_01_01 + 4 * 86_400;
const TS_2019_01_01: i64 = 1_546_300_800;
const TS_2019_06_01: i64 = 1_559_347_200;

#[derive(Debug, Deserialize)]
struct SliderMark {
    ts: i64,
    label: String,
}

#[derive(Debug, Deserialize)]
struct RangeResponse {
    min_ts: i64,
    max_ts: i64,
    marks: Vec<SliderMark>,
}

#[derive(Debug, Deserialize)]
struct TrendPoint {
    date: String,
    trips: u64,
}

#[derive(Debug, Deserialize)]
struct WeatherTotal {
    weather: String,
    trips: u64,
}

#[derive(Debug, Deserialize)]
struct WeekdayUsage {
    weekday: String,
    casual: u64,
    registered: u64,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    label: String,
    trend: Vec<TrendPoint>,
    weather: Vec<WeatherTotal>,
    weekday: Vec<WeekdayUsage>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn write_sample_dataset() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "bikeshare_dash_http_{}_{}.csv",
        std::process::id(),
        nanos
    ));
    std::fs::write(&path, SAMPLE_CSV).expect("write sample dataset");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/range")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = write_sample_dataset();
    let child = Command::new(env!("CARGO_BIN_EXE_bikeshare_dash"))
        .env("PORT", port.to_string())
        .env("BIKESHARE_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_dashboard(server: &TestServer, start: i64, end: i64) -> reqwest::Response {
    Client::new()
        .get(format!(
            "{}/api/dashboard?start={start}&end={end}",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_index_serves_dashboard_page() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains("Bikeshare between 2020-01-01 and 2020-01-05"));
    assert!(!body.contains("{{"), "unreplaced placeholder in page");
}

#[tokio::test]
async fn http_range_reports_dataset_span() {
    let server = shared_server().await;
    let range: RangeResponse = Client::new()
        .get(format!("{}/api/range", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(range.min_ts, TS_2020_01_01);
    assert_eq!(range.max_ts, TS_2020_01_05);
    assert_eq!(range.marks.len(), 1);
    assert_eq!(range.marks[0].ts, TS_2020_01_01);
    assert_eq!(range.marks[0].label, "2020-01-01");
}

#[tokio::test]
async fn http_dashboard_full_window_returns_every_day() {
    let server = shared_server().await;
    let dashboard: DashboardResponse = fetch_dashboard(&server, TS_2020_01_01, TS_2020_01_05)
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(dashboard.label, "Bikeshare between 2020-01-01 and 2020-01-05");
    assert_eq!(dashboard.trend.len(), 5);
    assert_eq!(dashboard.trend[0].date, "2020-01-01");
    assert_eq!(dashboard.trend[4].trips, 90);

    let clear = dashboard
        .weather
        .iter()
        .find(|w| w.weather == "clear")
        .expect("clear group missing");
    assert_eq!(clear.trips, 270);
    assert_eq!(dashboard.weather.len(), 4);

    let total_trips: u64 = dashboard.trend.iter().map(|p| p.trips).sum();
    let grouped_trips: u64 = dashboard.weather.iter().map(|w| w.trips).sum();
    assert_eq!(total_trips, grouped_trips);
    assert_eq!(dashboard.weekday.len(), 5);
}

#[tokio::test]
async fn http_dashboard_single_day_window() {
    let server = shared_server().await;
    let dashboard: DashboardResponse = fetch_dashboard(&server, TS_2020_01_03, TS_2020_01_03)
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(dashboard.trend.len(), 1);
    assert_eq!(dashboard.trend[0].trips, 150);
    assert_eq!(dashboard.weather.len(), 1);
    assert_eq!(dashboard.weather[0].weather, "clear");
    assert_eq!(dashboard.weather[0].trips, 150);
    assert_eq!(dashboard.weekday.len(), 1);
    assert_eq!(dashboard.weekday[0].weekday, "Fri");
    assert_eq!(dashboard.weekday[0].casual, 50);
    assert_eq!(dashboard.weekday[0].registered, 100);
}

#[tokio::test]
async fn http_dashboard_window_before_data_is_empty() {
    let server = shared_server().await;
    let response = fetch_dashboard(&server, TS_2019_01_01, TS_2019_06_01).await;
    assert!(response.status().is_success());

    let dashboard: DashboardResponse = response.json().await.unwrap();
    assert!(dashboard.trend.is_empty());
    assert!(dashboard.weather.is_empty());
    assert!(dashboard.weekday.is_empty());
}

#[tokio::test]
async fn http_dashboard_rejects_inverted_window() {
    let server = shared_server().await;
    let response = fetch_dashboard(&server, TS_2020_01_05, TS_2020_01_01).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.text().await.unwrap();
    assert!(body.contains("after"), "body: {body}");
}

#[tokio::test]
async fn http_dashboard_rejects_missing_params() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/api/dashboard?start=123", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
