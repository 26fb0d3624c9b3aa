//! Integration tests for the HTTP API.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`, over a
//! small dataset covering 1990-1998.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use data_loader::{Dataset, Genre, Movie, Rating};
use serde_json::Value;
use server::AppState;
use tower::ServiceExt;

// ============================================================================
// Test Fixtures
// ============================================================================

fn movie(id: u32, year: Option<i32>, genres: &[Genre]) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        release_date: year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
        video_release_date: None,
        imdb_url: None,
        genres: genres.to_vec(),
    }
}

/// Per year Y in 1990..=1998: one Comedy and (Y - 1990) Drama movies.
/// Plus one undated Comedy.
fn build_test_app() -> Router {
    let mut movies = Vec::new();
    let mut id = 1;
    for year in 1990..=1998 {
        movies.push(movie(id, Some(year), &[Genre::Comedy]));
        id += 1;
        for _ in 0..(year - 1990) {
            movies.push(movie(id, Some(year), &[Genre::Drama]));
            id += 1;
        }
    }
    movies.push(movie(id, None, &[Genre::Comedy]));

    let ratings = vec![
        Rating { user_id: 1, movie_id: 1, rating: 4, timestamp: 881250949 },
        Rating { user_id: 2, movie_id: 2, rating: 2, timestamp: 881250950 },
    ];

    let dataset = Dataset::from_records(movies, ratings).expect("fixture should be valid");
    server::app(AppState::from_dataset(&dataset))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn health_check_returns_ok() {
    let response = get(build_test_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn summary_reports_dataset_counts() {
    let json = body_json(get(build_test_app(), "/api/summary").await).await;

    // 9 Comedy + 36 Drama + 1 undated
    assert_eq!(json["movies"], 46);
    assert_eq!(json["ratings"], 2);
    assert_eq!(json["undated_movies"], 1);
    assert_eq!(json["mean_rating"], 3.0);
    assert_eq!(json["year_span"], serde_json::json!([1990, 1998]));
}

#[tokio::test]
async fn genres_lists_full_vocabulary() {
    let json = body_json(get(build_test_app(), "/api/genres").await).await;
    let names = json.as_array().unwrap();

    assert_eq!(names.len(), 19);
    assert_eq!(names[0], "unknown");
    assert_eq!(names[10], "Film-Noir");
    assert_eq!(names[15], "Sci-Fi");
}

#[tokio::test]
async fn years_describes_range_control() {
    let json = body_json(get(build_test_app(), "/api/years").await).await;

    assert_eq!(json["min"], 1990);
    assert_eq!(json["max"], 1998);
    assert_eq!(json["value"], serde_json::json!([1990, 1998]));
    assert_eq!(json["marks"], serde_json::json!([1990, 1995]));
}

#[tokio::test]
async fn table_slices_genres_and_years() {
    let response = get(build_test_app(), "/api/table?genres=Comedy,Drama&from=1994&to=1996").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["year"], 1994);
    assert_eq!(rows[0]["counts"], serde_json::json!({"Comedy": 1, "Drama": 4}));
    assert_eq!(rows[2]["year"], 1996);
    assert_eq!(rows[2]["counts"], serde_json::json!({"Comedy": 1, "Drama": 6}));
}

#[tokio::test]
async fn chart_defaults_to_action_over_full_span() {
    let json = body_json(get(build_test_app(), "/api/chart").await).await;

    assert_eq!(json["mode"], "lines+markers");
    assert_eq!(json["years"].as_array().unwrap().len(), 9);
    assert_eq!(json["series"].as_array().unwrap().len(), 1);
    assert_eq!(json["series"][0]["genre"], "Action");
    assert!(json["series"][0]["counts"].as_array().unwrap().iter().all(|c| c == 0));
}

#[tokio::test]
async fn chart_has_series_per_genre() {
    let json = body_json(get(build_test_app(), "/api/chart?genres=Drama,Comedy&from=1997&to=2005").await).await;

    assert_eq!(json["years"], serde_json::json!([1997, 1998]));
    assert_eq!(json["series"][0]["genre"], "Drama");
    assert_eq!(json["series"][0]["counts"], serde_json::json!([7, 8]));
    assert_eq!(json["series"][1]["genre"], "Comedy");
    assert_eq!(json["series"][1]["counts"], serde_json::json!([1, 1]));
}

#[tokio::test]
async fn range_outside_data_is_empty_not_error() {
    let response = get(build_test_app(), "/api/table?genres=Drama&from=2001&to=2010").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn lone_from_after_data_is_empty() {
    let response = get(build_test_app(), "/api/table?genres=Drama&from=2001").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn lone_to_before_data_is_empty() {
    let response = get(build_test_app(), "/api/chart?genres=Drama&to=1980").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["years"], serde_json::json!([]));
    assert_eq!(json["series"][0]["counts"], serde_json::json!([]));
}

#[tokio::test]
async fn lone_bound_inside_data_uses_span_for_other_end() {
    let json = body_json(get(build_test_app(), "/api/table?genres=Drama&from=1997").await).await;
    let years: Vec<_> = json.as_array().unwrap().iter().map(|r| r["year"].clone()).collect();
    assert_eq!(years, vec![serde_json::json!(1997), serde_json::json!(1998)]);

    let json = body_json(get(build_test_app(), "/api/table?genres=Drama&to=1991").await).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["year"], 1990);
    assert_eq!(rows[1]["counts"], serde_json::json!({"Drama": 1}));
}

#[tokio::test]
async fn unknown_genre_is_bad_request() {
    let response = get(build_test_app(), "/api/chart?genres=SciFi").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_QUERY");
    assert!(json["error"].as_str().unwrap().contains("SciFi"));
}

#[tokio::test]
async fn inverted_range_is_bad_request() {
    let response = get(build_test_app(), "/api/table?genres=Drama&from=1996&to=1994").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn years_on_empty_table_is_not_found() {
    let dataset = Dataset::from_records(vec![movie(1, None, &[Genre::Drama])], vec![]).unwrap();
    let app = server::app(AppState::from_dataset(&dataset));

    let response = get(app, "/api/years").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
