//! End-to-end conversion tests against the public crate surface.

use std::fs::File;
use std::io::Write;

use http::{HeaderValue, StatusCode, Version};
use response_bridge::{from_native, to_native, Body, Response, Storage};

fn message(status: StatusCode, body: &[u8]) -> http::Response<Body> {
    let mut b = Body::temp();
    b.write_all(body).unwrap();
    let mut res = http::Response::new(b);
    *res.status_mut() = status;
    res
}

#[test]
fn temp_backed_message_to_native() {
    let mut source = message(StatusCode::OK, b"hello");
    *source.version_mut() = Version::HTTP_11;
    source
        .headers_mut()
        .append("x-test", HeaderValue::from_static("a"));
    source
        .headers_mut()
        .append("x-test", HeaderValue::from_static("b"));

    let mut native = to_native(&source).unwrap();

    assert_eq!(native.status(), StatusCode::OK);
    assert_eq!(native.header("x-test"), Some("a, b"));
    assert_eq!(native.read_body().unwrap().as_ref(), b"hello");
}

#[test]
fn file_backed_message_to_native_streams() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("f.txt");
    std::fs::write(&path, b"data").unwrap();

    let mut source = http::Response::new(Body::from_file(&path));
    *source.status_mut() = StatusCode::PARTIAL_CONTENT;
    source
        .headers_mut()
        .append("x-test", HeaderValue::from_static("a"));
    source
        .headers_mut()
        .append("x-test", HeaderValue::from_static("b"));

    let mut native = to_native(&source).unwrap();

    assert_eq!(native.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(native.header("x-test"), Some("a; b"));
    assert!(native.body().is_stream());
    assert_eq!(native.read_body().unwrap().as_ref(), b"data");
}

#[test]
fn native_to_message_form() {
    let native = Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("x-test", "v")
        .body("not found")
        .build();

    let back = from_native(native).unwrap();

    assert_eq!(back.status(), StatusCode::NOT_FOUND);
    let values: Vec<_> = back
        .headers()
        .get_all("x-test")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["v"]);
    assert_eq!(back.body().contents().unwrap().as_ref(), b"not found");
    assert_eq!(back.body().storage(), Storage::Temp);
}

#[test]
fn round_trip_preserves_status_and_body() {
    let source = message(StatusCode::CREATED, b"payload bytes");
    let native = to_native(&source).unwrap();
    let back = from_native(native).unwrap();

    assert_eq!(back.status(), StatusCode::CREATED);
    assert_eq!(back.body().contents().unwrap().as_ref(), b"payload bytes");
}

#[test]
fn round_trip_from_stream_backed_native_ends_temp_backed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.bin");
    let mut f = File::create(&path).unwrap();
    f.write_all(&vec![0x42u8; 16 * 1024]).unwrap();
    drop(f);

    let mut native = Response::empty(StatusCode::OK);
    native.set_stream(File::open(&path).unwrap());

    let back = from_native(native).unwrap();

    assert_eq!(back.body().storage(), Storage::Temp);
    assert_eq!(back.body().len().unwrap(), 16 * 1024);
}

#[test]
fn missing_file_surfaces_open_error() {
    let source = http::Response::new(Body::from_file("/tmp/definitely-not-here.txt"));
    let err = to_native(&source).unwrap_err();
    assert!(matches!(err, response_bridge::Error::FileOpen { .. }));
}

#[test]
fn malformed_header_line_is_rejected() {
    let err = Response::from_raw(b"HTTP/1.1 200 OK\r\nbroken header line\r\n\r\nbody").unwrap_err();
    assert!(matches!(err, response_bridge::Error::MalformedMessage(_)));
}
