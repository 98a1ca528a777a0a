//! Every method, known or not, is answered by the same pipeline.

use hypertoy::toys::FakeServer;
use hypertoy::{Context, Handler};
use reqwest::header::{HeaderMap, DATE, LAST_MODIFIED};
use reqwest::Method;
use serde_json::json;

mod common;

fn fixed_content() -> serde_json::Value {
    json!({ "content": "hi", "status": 555, "server": "Funtime Server!" })
}

fn comparable(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = headers
        .iter()
        .filter(|(name, _)| *name != DATE && *name != LAST_MODIFIED)
        .map(|(name, value)| (name.to_string(), value.to_str().unwrap().to_string()))
        .collect();
    pairs.sort();
    pairs
}

#[tokio::test]
async fn test_fixed_content_scenario() {
    let _running = common::start(FakeServer, &[38_100], fixed_content()).await;

    let res = common::client().get(common::url(38_100, "/")).send().await.unwrap();

    assert_eq!(res.status().as_u16(), 555);
    assert_eq!(res.headers()["server"], "Funtime Server!");
    assert_eq!(res.headers()["content-type"], "text/html");
    assert_eq!(res.headers()["content-length"], "2");
    assert!(res.headers().contains_key(LAST_MODIFIED));
    assert_eq!(res.text().await.unwrap(), "hi");
}

#[tokio::test]
async fn test_unexpected_method_gets_same_response() {
    let _running = common::start(FakeServer, &[38_101], fixed_content()).await;
    let client = common::client();

    let get = client.get(common::url(38_101, "/")).send().await.unwrap();
    let foobar = client
        .request(Method::from_bytes(b"FOOBAR").unwrap(), common::url(38_101, "/anything"))
        .send()
        .await
        .unwrap();

    assert_eq!(get.status(), foobar.status());
    assert_eq!(foobar.status().as_u16(), 555);
    assert_eq!(comparable(get.headers()), comparable(foobar.headers()));
    assert_eq!(get.bytes().await.unwrap(), foobar.bytes().await.unwrap());
}

#[tokio::test]
async fn test_unexpected_method_on_the_wire() {
    let _running = common::start(FakeServer, &[38_102], fixed_content()).await;

    let response = common::raw_request(
        38_102,
        "FOOBAR /anything HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 555"), "{response}");
    assert!(response.contains("\r\nServer: Funtime Server!\r\n"), "{response}");
    assert!(response.contains("\r\nContent-Length: 2\r\n"), "{response}");
    assert_eq!(common::raw_body(&response), "hi");
}

#[tokio::test]
async fn test_malformed_request_falls_through() {
    let _running = common::start(FakeServer, &[38_103], fixed_content()).await;

    let response = common::raw_request(38_103, "NOT A REQUEST\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 400"), "{response}");
    assert_ne!(common::raw_body(&response), "hi");
}

#[tokio::test]
async fn test_unusual_targets_get_same_response() {
    let _running = common::start(FakeServer, &[38_104], fixed_content()).await;

    for request_line in [
        "GET * HTTP/1.1",
        "FOOBAR * HTTP/1.1",
        "GET example.com:80 HTTP/1.1",
        "FOOBAR example.com:443 HTTP/1.1",
    ] {
        let response = common::raw_request(
            38_104,
            &format!("{request_line}\r\nHost: localhost\r\nConnection: close\r\n\r\n"),
        )
        .await;

        assert!(response.starts_with("HTTP/1.1 555"), "{request_line} => {response}");
        assert!(response.contains("\r\nServer: Funtime Server!\r\n"), "{response}");
        assert_eq!(common::raw_body(&response), "hi", "{request_line}");
    }
}

#[tokio::test]
async fn test_default_handler_answers_empty_200() {
    struct Defaults;
    impl Handler for Defaults {}

    let _running = common::start(Defaults, &[38_105], json!({})).await;

    let res = common::client()
        .request(Method::from_bytes(b"PROPFIND").unwrap(), common::url(38_105, "/"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["server"], "Apache");
    assert_eq!(res.headers()["content-length"], "0");
    assert_eq!(res.text().await.unwrap(), "");
}

#[tokio::test]
async fn test_multibyte_body_length() {
    struct Unicode;
    impl Handler for Unicode {
        fn content(&self, _cx: &Context<'_>) -> String {
            "héllo 🎈".into()
        }
    }

    let _running = common::start(Unicode, &[38_106], json!({})).await;

    let res = common::client().get(common::url(38_106, "/")).send().await.unwrap();
    let length: usize = res.headers()["content-length"].to_str().unwrap().parse().unwrap();
    let body = res.bytes().await.unwrap();

    assert_eq!(length, body.len());
    assert_eq!(length, "héllo 🎈".len());
}

#[tokio::test]
async fn test_panicking_hook_only_drops_its_connection() {
    struct Fragile;
    impl Handler for Fragile {
        fn content(&self, cx: &Context<'_>) -> String {
            if cx.request.path == "/boom" {
                panic!("hook failure");
            }
            "fine".into()
        }
    }

    let _running = common::start(Fragile, &[38_107], json!({})).await;
    let client = common::client();

    assert!(client.get(common::url(38_107, "/boom")).send().await.is_err());

    let res = client.get(common::url(38_107, "/")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "fine");
}
