use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use cpbl_highlights::{HighlightsService, QueryDefaults, YoutubeClient};
use cpbl_standings::StandingsClient;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const STANDINGS_PAGE: &str = r#"<html><body>
<div class="RecordTableWrap">
  <table>
    <caption>球隊對戰戰績</caption>
    <tr>
      <th>排名</th><th>球隊</th><th>出賽數</th><th>勝-和-敗</th><th>勝率</th>
      <th>勝差</th><th>淘汰指數</th><th>連勝/連敗</th><th>近十場戰績</th>
    </tr>
    <tr>
      <td>1</td><td><a href="/teams/1">Team A</a></td><td>100</td><td>60-0-40</td>
      <td>0.600</td><td>-</td><td>5.0</td><td>W3</td><td>7-3</td>
    </tr>
  </table>
</div>
</body></html>"#;

struct Upstreams {
    standings: MockServer,
    youtube: MockServer,
}

async fn upstreams() -> Upstreams {
    Upstreams {
        standings: MockServer::start().await,
        youtube: MockServer::start().await,
    }
}

fn app(upstreams: &Upstreams, api_key: Option<&str>, playlist_id: Option<&str>) -> Router {
    let standings = StandingsClient::new(
        5,
        "cpbl-test/0.1",
        &format!("{}/standings/season", upstreams.standings.uri()),
        "https://www.cpbl.com.tw",
    )
    .expect("standings client");
    let youtube =
        YoutubeClient::with_base_url(api_key, 5, "cpbl-test/0.1", &upstreams.youtube.uri())
            .expect("youtube client");

    build_app(AppState {
        standings: Arc::new(standings),
        highlights: Arc::new(HighlightsService::new(
            youtube,
            playlist_id.map(str::to_owned),
        )),
        query_defaults: QueryDefaults::default(),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, headers, json)
}

#[tokio::test]
async fn health_reports_ok_with_request_id() {
    let upstreams = upstreams().await;
    let (status, headers, json) = get(app(&upstreams, None, None), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(headers.contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn standings_returns_fragment_and_rows() {
    let upstreams = upstreams().await;
    Mock::given(method("GET"))
        .and(path("/standings/season"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STANDINGS_PAGE))
        .mount(&upstreams.standings)
        .await;

    let (status, _, json) = get(app(&upstreams, None, None), "/api/standings").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["source"]
        .as_str()
        .is_some_and(|s| s.ends_with("/standings/season")));
    assert!(json["updatedAt"].is_string());
    assert!(json["html"].as_str().is_some_and(|h| h.contains("Team A")));
    assert_eq!(json["rows"][0]["team"], "Team A");
    assert_eq!(json["rows"][0]["teamUrl"], "https://www.cpbl.com.tw/teams/1");
    assert_eq!(json["rows"][0]["eliminationNumber"], "5.0");
}

#[tokio::test]
async fn standings_upstream_failure_is_bad_gateway() {
    let upstreams = upstreams().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstreams.standings)
        .await;

    let (status, _, json) = get(app(&upstreams, None, None), "/api/standings").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("503")));
}

#[tokio::test]
async fn standings_parse_failure_is_internal_error() {
    let upstreams = upstreams().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&upstreams.standings)
        .await;

    let (status, _, json) = get(app(&upstreams, None, None), "/api/standings").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "standings block not found");
}

#[tokio::test]
async fn highlights_passes_filters_through() {
    let upstreams = upstreams().await;
    let published = chrono::Utc::now().to_rfc3339();
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "PLcpbl"))
        .and(query_param("maxResults", "50"))
        .and(query_param("key", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nextPageToken": "NEXT",
            "items": [
                {
                    "snippet": { "title": "全場精華 中信兄弟 vs 樂天桃猿", "publishedAt": published },
                    "contentDetails": { "videoId": "a" }
                },
                {
                    "snippet": { "title": "全場精華 統一獅 vs 富邦悍將", "publishedAt": published },
                    "contentDetails": { "videoId": "b" }
                }
            ]
        })))
        .expect(1)
        .mount(&upstreams.youtube)
        .await;

    let uri = "/api/highlights?limit=80&mustAll=%E5%85%84%E5%BC%9F&days=7";
    let (status, _, json) = get(app(&upstreams, Some("k"), Some("PLcpbl")), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"][0]["id"], "a");
    assert_eq!(json["nextPageToken"], "NEXT");
    assert!(json["debug"].is_object());
}

#[tokio::test]
async fn highlights_without_key_is_internal_error() {
    let upstreams = upstreams().await;

    let (status, _, json) =
        get(app(&upstreams, None, Some("PLcpbl")), "/api/highlights").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .is_some_and(|e| e.contains("YOUTUBE_API_KEY")));
}

#[tokio::test]
async fn highlights_upstream_status_is_passed_through() {
    let upstreams = upstreams().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&upstreams.youtube)
        .await;

    let (status, _, json) =
        get(app(&upstreams, Some("k"), Some("PLcpbl")), "/api/highlights").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn highlights_malformed_upstream_is_bad_gateway() {
    let upstreams = upstreams().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .mount(&upstreams.youtube)
        .await;

    let (status, _, _) = get(app(&upstreams, Some("k"), Some("PLcpbl")), "/api/highlights").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
