use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use bus_reservations::config::{database::DatabaseConfig, environment::EnvironmentConfig};
use bus_reservations::models::route::{City, NewRoute, Route};
use bus_reservations::models::user::{NewUser, User};
use bus_reservations::repositories::{InMemoryStore, ReservationStore, RouteStore, UserStore};
use bus_reservations::utils::jwt::generate_token;
use bus_reservations::{create_app, AppState};

struct TestApp {
    app: Router,
    state: AppState,
    store: Arc<InMemoryStore>,
}

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration: 3600,
        cors_origins: vec![],
        run_migrations: false,
        database: DatabaseConfig::with_url("postgres://localhost/unused"),
    }
}

fn create_test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::in_memory(test_config(), store.clone());
    TestApp {
        app: create_app(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    async fn user(&self, username: &str) -> (User, String) {
        let user = UserStore::create(
            self.store.as_ref(),
            &NewUser::customer(username, &format!("{}@example.cl", username)).into_user(),
        )
        .await
        .unwrap();
        let token = generate_token(user.id, &user.username, false, &self.state.jwt).unwrap();
        (user, token)
    }

    async fn route(&self, origin: City, destination: City, date: NaiveDate, hour: u32) -> Route {
        let route = NewRoute {
            origin,
            destination,
            travel_date: date,
            departure_time: NaiveTime::from_hms_opt(hour, 30, 0).unwrap(),
            price: Decimal::new(12_990, 0),
        }
        .into_route();
        RouteStore::create(self.store.as_ref(), &route).await.unwrap()
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(self.app.clone(), request).await
    }

    async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        send(self.app.clone(), request).await
    }

    async fn reserve(&self, route_id: Uuid, seats: &str, token: Option<&str>) -> (StatusCode, Value) {
        send(self.app.clone(), reserve_request(route_id, seats, token)).await
    }
}

fn reserve_request(route_id: Uuid, seats: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/api/routes/{}/reservations", route_id))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(json!({ "seats": seats }).to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn future_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 3, 15).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_reserve_three_seats() {
    let app = create_test_app();
    let (_, token) = app.user("ana").await;
    let route = app.route(City::Santiago, City::Valparaiso, future_date(), 8).await;

    let (status, body) = app.reserve(route.id, "1,2,3", Some(&token)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["seats"], json!([1, 2, 3]));
    assert_eq!(body["data"]["reservations"].as_array().unwrap().len(), 3);
    assert_eq!(app.store.reservation_count().await, 3);
}

#[tokio::test]
async fn test_conflict_rejects_whole_request() {
    let app = create_test_app();
    let (_, first) = app.user("ana").await;
    let (_, second) = app.user("bruno").await;
    let route = app.route(City::Santiago, City::Concepcion, future_date(), 9).await;

    let (status, _) = app.reserve(route.id, "5", Some(&first)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.reserve(route.id, "5,6", Some(&second)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SEAT_CONFLICT");
    assert_eq!(body["message"], "seats 5 already reserved.");
    assert_eq!(body["details"]["seats"], json!([5]));

    let occupied = app.store.occupied_seats(route.id).await.unwrap();
    assert_eq!(occupied.into_iter().collect::<Vec<_>>(), vec![5]);
}

#[tokio::test]
async fn test_invalid_selections_are_bad_requests() {
    let app = create_test_app();
    let (_, token) = app.user("ana").await;
    let route = app.route(City::Valparaiso, City::Santiago, future_date(), 7).await;

    let cases = [
        ("", "select at least one seat."),
        ("1,a", "invalid seat selection."),
        ("4,4", "seat repeated."),
        ("0,41", "seats must be between 1 and 40: 0, 41"),
    ];

    for (raw, message) in cases {
        let (status, body) = app.reserve(route.id, raw, Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "seats={:?}", raw);
        assert_eq!(body["code"], "SEAT_SELECTION_ERROR");
        assert_eq!(body["message"], message);
    }

    assert_eq!(app.store.reservation_count().await, 0);
}

#[tokio::test]
async fn test_concurrent_requests_for_same_seat() {
    let app = create_test_app();
    let (_, first) = app.user("ana").await;
    let (_, second) = app.user("bruno").await;
    let route = app.route(City::Santiago, City::Valparaiso, future_date(), 10).await;

    let a = tokio::spawn(send(app.app.clone(), reserve_request(route.id, "10", Some(&first))));
    let b = tokio::spawn(send(app.app.clone(), reserve_request(route.id, "10", Some(&second))));
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    let statuses = [a.0, b.0];
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(), 1);
    assert_eq!(app.store.reservation_count().await, 1);
}

#[tokio::test]
async fn test_reserve_requires_token() {
    let app = create_test_app();
    let route = app.route(City::Santiago, City::Valparaiso, future_date(), 8).await;

    let (status, body) = app.reserve(route.id, "1", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.reserve(route.id, "1", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(app.store.reservation_count().await, 0);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_rejected() {
    let app = create_test_app();
    let route = app.route(City::Santiago, City::Valparaiso, future_date(), 8).await;
    let token = generate_token(Uuid::new_v4(), "ghost", false, &app.state.jwt).unwrap();

    let (status, _) = app.reserve(route.id, "1", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_app();
    let (_, token) = app.user("ana").await;
    let missing = Uuid::new_v4();

    let (status, body) = app.reserve(missing, "1", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.get(&format!("/api/routes/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("/api/routes/{}/seats", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_routes_with_filters() {
    let app = create_test_app();
    let date = future_date();
    let later = app.route(City::Santiago, City::Valparaiso, date, 18).await;
    let earlier = app.route(City::Santiago, City::Valparaiso, date, 6).await;
    app.route(City::Concepcion, City::Santiago, date, 12).await;
    app.route(City::Santiago, City::Valparaiso, NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(), 8)
        .await;

    let (status, body) = app
        .get("/api/routes?origin=santiago&destination=Valparaiso&date=2099-03-15")
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![earlier.id.to_string(), later.id.to_string()]);
    assert_eq!(body[0]["departure_time"], "06:30");
    assert_eq!(body[0]["price"], "12990.00");

    let (status, body) = app.get("/api/routes?origin=&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/routes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = app.get("/api/routes?origin=Lima").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/routes?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seat_map_after_reservation() {
    let app = create_test_app();
    let (_, token) = app.user("ana").await;
    let route = app.route(City::Concepcion, City::Valparaiso, future_date(), 14).await;

    let (status, _) = app.reserve(route.id, "40, 1", Some(&token)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get(&format!("/api/routes/{}/seats", route.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_seats"], 40);
    assert_eq!(body["occupied"], json!([1, 40]));
    assert_eq!(body["available"].as_array().unwrap().len(), 38);
    assert_eq!(body["available"][0], 2);
}

#[tokio::test]
async fn test_my_reservations() {
    let app = create_test_app();
    let (_, ana) = app.user("ana").await;
    let (_, bruno) = app.user("bruno").await;
    let route = app.route(City::Santiago, City::Concepcion, future_date(), 11).await;

    app.reserve(route.id, "3,4", Some(&ana)).await;
    app.reserve(route.id, "7", Some(&bruno)).await;

    let (status, body) = app.get_with_token("/api/reservations/mine", &ana).await;
    assert_eq!(status, StatusCode::OK);
    let seats: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["seat_number"].as_i64().unwrap())
        .collect();
    assert_eq!(seats.len(), 2);
    assert!(seats.contains(&3) && seats.contains(&4));
    assert_eq!(body[0]["origin"], "Santiago");

    let (status, body) = app.get_with_token("/api/reservations/mine?limit=1", &ana).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = app.get("/api/reservations/mine").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
