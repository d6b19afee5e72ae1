use classpick_h::config::ClasspickConfig;
use classpick_h::{CdpHost, HostError, PickerHost};
use serial_test::serial;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const FIXTURE: &str = "<html><body><main class='content'><section id='form-area'>\
<div class='row wide'><button class='btn btn-primary'>Save</button>\
</div></section></main></body></html>";

/// Serve `FIXTURE` over plain HTTP; Chromium refuses to open `data:` popups.
async fn serve_fixture() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                FIXTURE.len(),
                FIXTURE
            );
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });
    format!("http://{}/", addr)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .ok();
}

fn headless_config() -> ClasspickConfig {
    let mut config = ClasspickConfig::default();
    config.host.visible = false;
    config
}

#[tokio::test]
async fn test_pick_before_launch_fails() {
    let mut host = CdpHost::new(headless_config());
    let result = host.pick("about:blank").await;
    assert!(matches!(result, Err(HostError::NotReady)));
}

#[tokio::test]
async fn test_launch_without_bundle_fails() {
    let mut config = headless_config();
    config.host.bundle_dir = "/nonexistent/classpick/pkg".into();
    let mut host = CdpHost::new(config);

    let result = host.launch().await;
    assert!(matches!(result, Err(HostError::Bundle { .. })));
}

#[tokio::test]
#[serial]
async fn test_embedded_pick_round_trip() {
    init_tracing();

    // Needs both Chromium and `wasm-pack build crates/classpick-web --target no-modules`.
    let mut host = CdpHost::new(headless_config());
    match host.launch().await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Skipping: failed to launch host (Chromium or ./pkg missing?): {}", e);
            return;
        }
    }

    let url = serve_fixture().await;

    let session = host.open(&url).await.expect("Failed to open picker");

    // Let the deferred activation settle before the synthetic click.
    tokio::time::sleep(Duration::from_millis(700)).await;
    session
        .target()
        .evaluate("document.querySelector('button').click()")
        .await
        .expect("Click failed");

    let selection = session
        .wait(Duration::from_secs(10))
        .await
        .expect("No selection received");

    assert_eq!(
        selection.class_path,
        "section#form-area > div.row.wide > button.btn.btn-primary"
    );
    assert_eq!(selection.element.tag_name, "BUTTON");
    assert_eq!(selection.element.class_name, "btn btn-primary");
    assert_eq!(selection.element.text_content, "Save");

    host.close().await.expect("Close failed");
}
