use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::persistence::{self, checkins, seed};
use crate::{api, config::Config, state::AppState};
use park_core::{CheckInRequest, CheckInTarget};

async fn setup_app() -> (axum::Router, Arc<AppState>) {
    // Each pool gets its own in-memory database, which lives as long as its
    // single connection
    let mut config = Config::from_env();
    config.database_path = ":memory:".to_string();
    config.database_max_connections = 1;
    config.active_checkin_window = Duration::hours(4);

    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await
        .expect("init db");
    seed::seed_demo_park(db.pool()).await.expect("seed db");
    let state = Arc::new(AppState::new(db, config));

    let app = api::routes().with_state(state.clone());
    (app, state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn check_in(app: &axum::Router, facility_id: i64, party_size: i64) -> i64 {
    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/checkins",
            json!({
                "user_name": "casey",
                "activity_type": "pickup_game",
                "party_size": party_size,
                "facility_id": facility_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["success"], true);
    body["checkin_id"].as_i64().expect("checkin id")
}

#[tokio::test]
async fn apps_do_not_share_data() {
    let (first, _) = setup_app().await;
    let (second, _) = setup_app().await;

    check_in(&first, 2, 5).await;

    let res = second.clone().oneshot(get("/api/occupancy/2")).await.unwrap();
    assert_eq!(read_json(res).await["current"], 0);
    let res = first.clone().oneshot(get("/api/occupancy/2")).await.unwrap();
    assert_eq!(read_json(res).await["current"], 5);
}

#[tokio::test]
async fn list_and_filter_facilities() {
    let (app, _state) = setup_app().await;

    let res = app.clone().oneshot(get("/api/facilities")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let all = read_json(res).await;
    assert_eq!(all.as_array().unwrap().len(), 5);
    assert!(all[0]["latitude"].is_number());

    let res = app
        .clone()
        .oneshot(get("/api/facilities?type=tennis_court"))
        .await
        .unwrap();
    let tennis = read_json(res).await;
    assert_eq!(tennis.as_array().unwrap().len(), 1);
    assert_eq!(tennis[0]["name"], "Tennis Center");

    // Standing on the basketball court, the closest tennis court is still found
    let res = app
        .clone()
        .oneshot(get("/api/facilities/near?lat=40.1172&lon=-85.7597&limit=1"))
        .await
        .unwrap();
    let nearest = read_json(res).await;
    assert_eq!(nearest[0]["name"], "North Basketball Court");

    let res = app
        .clone()
        .oneshot(get(
            "/api/facilities/near?lat=40.1172&lon=-85.7597&limit=1&type=tennis_court",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let nearest = read_json(res).await;
    let nearest = nearest.as_array().unwrap();
    assert_eq!(nearest.len(), 1);
    assert_eq!(nearest[0]["name"], "Tennis Center");
    assert!(nearest[0]["distance_km"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn trails_filter_by_difficulty() {
    let (app, _state) = setup_app().await;

    let res = app
        .clone()
        .oneshot(get("/api/trails?difficulty=hard"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let hard = read_json(res).await;
    assert_eq!(hard.as_array().unwrap().len(), 1);
    assert_eq!(hard[0]["path_coordinates"]["type"], "LineString");

    let res = app
        .clone()
        .oneshot(get("/api/trails?difficulty=extreme"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn amenities_ranked_by_distance() {
    let (app, _state) = setup_app().await;

    let res = app
        .clone()
        .oneshot(get("/api/amenities?lat=40.1163&lon=-85.7588&limit=2"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let near = read_json(res).await;
    let near = near.as_array().unwrap();
    assert_eq!(near.len(), 2);
    assert_eq!(near[0]["name"], "Main Restrooms");
    assert!(near[0]["distance_km"].as_f64().unwrap() < 0.01);
    assert!(near[0]["distance_km"].as_f64() <= near[1]["distance_km"].as_f64());

    let res = app
        .clone()
        .oneshot(get("/api/amenities?lat=40.1163"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.clone().oneshot(get("/api/amenities")).await.unwrap();
    let all = read_json(res).await;
    assert_eq!(all.as_array().unwrap().len(), 4);
    assert!(all[0].get("distance_km").is_none());
}

#[tokio::test]
async fn checkin_validation_errors() {
    let (app, _state) = setup_app().await;

    let cases = [
        (
            json!({"user_name": "casey", "activity_type": "run", "party_size": 2}),
            StatusCode::BAD_REQUEST,
            "Must select either a facility or trail",
        ),
        (
            json!({"user_name": "casey", "activity_type": "run", "party_size": 2, "facility_id": 1, "trail_id": 1}),
            StatusCode::BAD_REQUEST,
            "Cannot select both facility and trail",
        ),
        (
            json!({"user_name": "casey", "activity_type": "run", "party_size": 51, "trail_id": 1}),
            StatusCode::BAD_REQUEST,
            "Party size must be between 1 and 50",
        ),
        (
            json!({"activity_type": "run", "party_size": 2, "trail_id": 1}),
            StatusCode::BAD_REQUEST,
            "Missing required fields",
        ),
        (
            json!({"user_name": "casey", "activity_type": "run", "party_size": 0, "facility_id": 1}),
            StatusCode::BAD_REQUEST,
            "Missing required fields",
        ),
        (
            json!({"user_name": "casey", "activity_type": "run", "party_size": 0}),
            StatusCode::BAD_REQUEST,
            "Missing required fields",
        ),
        (
            json!({"user_name": "casey", "activity_type": "run", "party_size": 2, "facility_id": 0}),
            StatusCode::BAD_REQUEST,
            "Must select either a facility or trail",
        ),
        (
            json!({"user_name": "casey", "activity_type": "run", "party_size": 2, "facility_id": 999}),
            StatusCode::NOT_FOUND,
            "Facility not found",
        ),
    ];

    for (body, status, message) in cases {
        let res = app
            .clone()
            .oneshot(send_json("POST", "/api/checkins", body))
            .await
            .unwrap();
        assert_eq!(res.status(), status);
        assert_eq!(read_json(res).await["error"], message);
    }
}

#[tokio::test]
async fn checkin_occupancy_checkout_cycle() {
    let (app, _state) = setup_app().await;

    let first = check_in(&app, 2, 4).await;
    check_in(&app, 2, 3).await;

    let res = app.clone().oneshot(get("/api/occupancy/2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let occ = read_json(res).await;
    assert_eq!(occ["capacity"], 16);
    assert_eq!(occ["current"], 7);
    assert_eq!(occ["percentage"], 44);
    assert_eq!(occ["level"], "comfortable");

    let res = app
        .clone()
        .oneshot(send_json("PUT", &format!("/api/checkins/{first}/checkout"), json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["success"], true);
    assert!(body["checkout_time"].is_string());

    let res = app.clone().oneshot(get("/api/occupancy/2")).await.unwrap();
    let occ = read_json(res).await;
    assert_eq!(occ["current"], 3);
    assert_eq!(occ["percentage"], 19);

    let res = app
        .clone()
        .oneshot(send_json("PUT", &format!("/api/checkins/{first}/checkout"), json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app
        .clone()
        .oneshot(send_json("PUT", "/api/checkins/4242/checkout", json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.clone().oneshot(get("/api/occupancy/999")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stale_checkins_fall_out_of_window() {
    let (app, state) = setup_app().await;

    let stale = CheckInRequest {
        user_name: Some("morgan".into()),
        activity_type: Some("tennis".into()),
        party_size: Some(6),
        facility_id: Some(2),
        ..Default::default()
    }
    .validate()
    .unwrap();
    assert_eq!(stale.target, CheckInTarget::Facility(2));
    checkins::create_checkin(state.pool(), &stale, Utc::now() - Duration::hours(5))
        .await
        .unwrap();
    check_in(&app, 2, 2).await;

    let res = app.clone().oneshot(get("/api/occupancy")).await.unwrap();
    let all = read_json(res).await;
    let tennis = all
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["facility_id"] == 2)
        .expect("tennis occupancy");
    assert_eq!(tennis["current"], 2);
}

#[tokio::test]
async fn recommendations_follow_occupancy_and_weather() {
    let (app, _state) = setup_app().await;

    let res = app.clone().oneshot(get("/api/recommendations")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let recs = read_json(res).await;
    let names: Vec<&str> = recs
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "North Basketball Court",
            "Tennis Center",
            "Soccer Field A",
            "Lakeside Loop",
            "Prairie Run"
        ]
    );
    assert_eq!(recs[0]["type"], "facility");
    assert_eq!(recs[0]["reason"], "Low occupancy (0/20 people)");
    assert_eq!(recs[3]["reason"], "Perfect weather for easy walking_trail");

    // Exactly half capacity drops the basketball court
    check_in(&app, 1, 10).await;
    check_in(&app, 2, 2).await;

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/weather",
            json!({"temp_c": 9.5, "condition": "Thunderstorm", "suitable_for_outdoor": false}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.clone().oneshot(get("/api/recommendations")).await.unwrap();
    let recs = read_json(res).await;
    let names: Vec<&str> = recs
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Soccer Field A", "Pickleball Courts", "Fitness Station Loop"]
    );
    assert!(recs.as_array().unwrap().iter().all(|r| r["type"] == "facility"));
}

#[tokio::test]
async fn weather_latest_observation() {
    let (app, _state) = setup_app().await;

    let res = app.clone().oneshot(get("/api/weather")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(res).await["error"], "Weather data unavailable");

    let older = (Utc::now() - Duration::hours(1)).to_rfc3339();
    for (condition, recorded_at) in [("Sunny", Utc::now().to_rfc3339()), ("Fog", older)] {
        let res = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/weather",
                json!({
                    "temp_c": 21.0,
                    "condition": condition,
                    "wind_kph": 12.0,
                    "suitable_for_outdoor": true,
                    "recorded_at": recorded_at
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app.clone().oneshot(get("/api/weather")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let weather = read_json(res).await;
    assert_eq!(weather["current"]["condition"]["text"], "Sunny");
    assert_eq!(weather["current"]["temp_c"], 21.0);
    assert_eq!(weather["current"]["wind_kph"], 12.0);
}

#[tokio::test]
async fn user_history_newest_first() {
    let (app, _state) = setup_app().await;

    check_in(&app, 1, 2).await;
    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/checkins",
            json!({
                "user_name": "casey",
                "activity_type": "walk",
                "party_size": 1,
                "trail_id": 1,
                "notes": "with the dog",
                "checkin_location": {"type": "Point", "coordinates": [-85.7585, 40.1164]}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(get("/api/checkins/user/casey"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let history = read_json(res).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["trail_name"], "Lakeside Loop");
    assert_eq!(history[0]["notes"], "with the dog");
    assert!(history[0]["facility_id"].is_null());
    assert_eq!(history[1]["facility_name"], "North Basketball Court");

    let res = app
        .clone()
        .oneshot(get("/api/checkins/user/nobody"))
        .await
        .unwrap();
    assert_eq!(read_json(res).await, json!([]));

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/checkins",
            json!({"user_name": "lee#1", "activity_type": "walk", "party_size": 1, "trail_id": 2}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(get("/api/checkins/user/lee%231"))
        .await
        .unwrap();
    let history = read_json(res).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["username"], "lee#1");
    assert_eq!(history[0]["trail_name"], "Prairie Run");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let (app, _state) = setup_app().await;

    let req = Request::builder()
        .uri("/api/facilities")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    let res = app.clone().oneshot(get("/api/trails")).await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}
