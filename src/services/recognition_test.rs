use super::*;
use image::{Rgba, RgbaImage};

fn plan_png() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(64, 64, Rgba([240, 240, 240, 255]));
    for y in 0..64 {
        for x in 30..34 {
            img.put_pixel(x, y, Rgba([20, 20, 20, 255]));
        }
    }
    let mut out = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode fixture");
    out.into_inner()
}

// Single test for all from_env cases: the variables are process-global, so
// exercising them sequentially avoids races under the parallel test runner.
#[test]
fn config_from_env_cases() {
    unsafe {
        std::env::remove_var("OCR_SERVICE_URL");
        std::env::remove_var("OCR_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("OCR_CONNECT_TIMEOUT_SECS");
    }
    assert!(OcrConfig::from_env().is_none());

    unsafe { std::env::set_var("OCR_SERVICE_URL", "") };
    assert!(OcrConfig::from_env().is_none());

    unsafe {
        std::env::set_var("OCR_SERVICE_URL", "http://ocr.internal:9000/");
        std::env::set_var("OCR_REQUEST_TIMEOUT_SECS", "12");
    }
    let Some(config) = OcrConfig::from_env() else {
        panic!("config should parse when OCR_SERVICE_URL is set");
    };
    assert_eq!(config.base_url, "http://ocr.internal:9000");
    assert_eq!(config.request_timeout_secs, 12);
    assert_eq!(config.connect_timeout_secs, DEFAULT_OCR_CONNECT_TIMEOUT_SECS);

    unsafe {
        std::env::remove_var("OCR_SERVICE_URL");
        std::env::remove_var("OCR_REQUEST_TIMEOUT_SECS");
    }
}

#[test]
fn ocr_client_builds_from_config() {
    let config = OcrConfig {
        base_url: "http://ocr.internal:9000".into(),
        request_timeout_secs: 30,
        connect_timeout_secs: 5,
    };
    assert!(OcrClient::new(&config).is_ok());
}

#[tokio::test]
async fn recognize_rejects_non_image_filenames() {
    let result = recognize(None, "plan.pdf", &[], 800.0, 600.0).await;
    assert!(matches!(result, Err(RecognizeError::UnsupportedFile(_))));
}

#[tokio::test]
async fn recognize_rejects_undecodable_bytes() {
    let result = recognize(None, "plan.png", b"not a png", 800.0, 600.0).await;
    assert!(matches!(result, Err(RecognizeError::Decode(_))));
}

#[tokio::test]
async fn recognize_without_ocr_returns_line_work_only() {
    let output = recognize(None, "plan.png", &plan_png(), 800.0, 600.0)
        .await
        .expect("recognize should succeed");
    assert!(output.measurements.is_empty());
    // Output decodes back to the source dimensions.
    let decoded = image::load_from_memory(&output.png).expect("round trip");
    assert_eq!((decoded.width(), decoded.height()), (64, 64));
}

/// One-shot HTTP listener that records the body of a single POST and
/// answers with an empty word list.
async fn spawn_ocr_capture() -> (String, tokio::sync::oneshot::Receiver<Vec<u8>>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind capture listener");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let Ok(n) = stream.read(&mut chunk).await else {
                return;
            };
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = header_end + 4;
            if buf.len() < body_start + content_length {
                continue;
            }
            let body = buf[body_start..body_start + content_length].to_vec();
            let reply = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 12\r\nconnection: close\r\n\r\n{\"words\":[]}";
            let _ = stream.write_all(reply.as_bytes()).await;
            let _ = stream.shutdown().await;
            let _ = tx.send(body);
            return;
        }
    });
    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn recognize_sends_upload_to_ocr_not_line_work() {
    let (base_url, captured) = spawn_ocr_capture().await;
    let config = OcrConfig { base_url, request_timeout_secs: 5, connect_timeout_secs: 5 };
    let client = OcrClient::new(&config).expect("client");

    let output = recognize(Some(&client), "plan.png", &plan_png(), 800.0, 600.0)
        .await
        .expect("recognize should succeed");

    let body = captured.await.expect("capture listener should see one request");
    assert_ne!(body, output.png, "OCR body must not be the processed edge map");
    let sent = image::load_from_memory(&body).expect("OCR body decodes");
    assert_eq!((sent.width(), sent.height()), (64, 64));
    // Source shading survives; the edge map is strictly black-and-white.
    assert_eq!(sent.to_luma8().get_pixel(2, 2)[0], 240);
}

#[tokio::test]
async fn recognize_survives_unreachable_ocr_service() {
    let config = OcrConfig {
        base_url: "http://127.0.0.1:1".into(),
        request_timeout_secs: 1,
        connect_timeout_secs: 1,
    };
    let client = OcrClient::new(&config).expect("client");
    let output = recognize(Some(&client), "plan.png", &plan_png(), 800.0, 600.0)
        .await
        .expect("OCR failure must be non-fatal");
    assert!(output.measurements.is_empty());
    assert!(!output.png.is_empty());
}
