use chrono::{TimeZone, Utc};
use sharedcal::calendar::{CalendarGateway, EventTimePayload, ExternalEventPayload, ListQuery};
use sharedcal::components::google_calendar::{
    GoogleCalendarClient, ServiceAccountKey, StaticToken, TokenManager, TokenSource,
};
use sharedcal::error::Error;
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXTURE_KEY: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/service_account.json"
);

fn client_for(server: &MockServer) -> GoogleCalendarClient {
    let tokens: Arc<dyn TokenSource> = Arc::new(StaticToken("test-token".to_string()));
    GoogleCalendarClient::with_base_url(&server.uri(), tokens).unwrap()
}

#[tokio::test]
async fn test_list_sends_upcoming_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendars/team-calendar/events"))
        .and(query_param("timeMin", "2024-06-01T08:00:00Z"))
        .and(query_param("maxResults", "10"))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "calendar#events",
            "items": [
                {
                    "id": "trip",
                    "summary": "Trip",
                    "start": { "date": "2024-06-10" },
                    "end": { "date": "2024-06-11" }
                },
                {
                    "id": "standup",
                    "summary": "Standup",
                    "colorId": "9",
                    "start": { "dateTime": "2024-06-10T09:00:00Z", "timeZone": "UTC" },
                    "end": { "dateTime": "2024-06-10T10:30:00Z", "timeZone": "UTC" }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let events = client_for(&server)
        .list("team-calendar", &ListQuery::upcoming(now, 10))
        .await
        .unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id.as_deref(), Some("trip"));
    assert_eq!(events[0].start.date.as_deref(), Some("2024-06-10"));
    assert_eq!(events[1].color_id.as_deref(), Some("9"));
    assert_eq!(
        events[1].start.date_time.as_deref(),
        Some("2024-06-10T09:00:00Z")
    );
}

#[tokio::test]
async fn test_list_skips_undecodable_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendars/team-calendar/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "id": "bad", "start": { "date": 20240610 } },
                {
                    "id": "good",
                    "start": { "date": "2024-06-10" },
                    "end": { "date": "2024-06-11" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let events = client_for(&server)
        .list("team-calendar", &ListQuery::upcoming(Utc::now(), 10))
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id.as_deref(), Some("good"));
}

#[tokio::test]
async fn test_list_without_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendars/team-calendar/events"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "kind": "calendar#events" })),
        )
        .mount(&server)
        .await;

    let events = client_for(&server)
        .list("team-calendar", &ListQuery::upcoming(Utc::now(), 10))
        .await
        .unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_list_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendars/team-calendar/events"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rateLimitExceeded"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .list("team-calendar", &ListQuery::upcoming(Utc::now(), 10))
        .await;

    match result {
        Err(Error::GoogleCalendar(msg)) => {
            assert!(msg.contains("403"), "unexpected message: {}", msg);
            assert!(msg.contains("rateLimitExceeded"));
        }
        other => panic!("expected Google Calendar error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_calendar_id_is_escaped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendars/family%23shared@group.calendar.google.com/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .list(
            "family#shared@group.calendar.google.com",
            &ListQuery::upcoming(Utc::now(), 10),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_insert_posts_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calendars/team-calendar/events"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "summary": "Trip",
            "start": { "date": "2024-06-10" },
            "end": { "date": "2024-06-11" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "created1",
            "status": "confirmed",
            "summary": "Trip",
            "start": { "date": "2024-06-10" },
            "end": { "date": "2024-06-11" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = ExternalEventPayload {
        summary: Some("Trip".to_string()),
        start: EventTimePayload::date("2024-06-10".to_string()),
        end: EventTimePayload::date("2024-06-11".to_string()),
        ..Default::default()
    };

    let created = client_for(&server)
        .insert("team-calendar", &payload)
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("created1"));
    assert_eq!(created.end.date.as_deref(), Some("2024-06-11"));
}

#[tokio::test]
async fn test_insert_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calendars/team-calendar/events"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .insert("team-calendar", &ExternalEventPayload::default())
        .await;
    assert!(matches!(result, Err(Error::GoogleCalendar(_))));
}

#[tokio::test]
async fn test_service_account_key_from_file() {
    let key = ServiceAccountKey::from_file(FIXTURE_KEY).unwrap();
    assert_eq!(
        key.client_email,
        "sharedcal@sharedcal-test.iam.gserviceaccount.com"
    );
    assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");

    assert!(matches!(
        ServiceAccountKey::from_file("does/not/exist.json"),
        Err(Error::Io(_))
    ));
}

#[tokio::test]
async fn test_token_manager_exchanges_and_caches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.test",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut key = ServiceAccountKey::from_file(FIXTURE_KEY).unwrap();
    key.token_uri = format!("{}/token", server.uri());

    let tokens = TokenManager::new(key);
    assert_eq!(tokens.get_token().await.unwrap(), "ya29.test");
    // Second call is served from the cache
    assert_eq!(tokens.access_token().await.unwrap(), "ya29.test");
}

#[tokio::test]
async fn test_token_manager_rejects_bad_key() {
    let key = ServiceAccountKey {
        client_email: "sharedcal@sharedcal-test.iam.gserviceaccount.com".to_string(),
        private_key: "not a key".to_string(),
        token_uri: "http://127.0.0.1:9/token".to_string(),
    };

    let result = TokenManager::new(key).get_token().await;
    assert!(matches!(result, Err(Error::Config(_))));
}

#[tokio::test]
async fn test_token_endpoint_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let mut key = ServiceAccountKey::from_file(FIXTURE_KEY).unwrap();
    key.token_uri = format!("{}/token", server.uri());

    match TokenManager::new(key).get_token().await {
        Err(Error::GoogleCalendar(msg)) => assert!(msg.contains("invalid_grant")),
        other => panic!("expected token error, got {:?}", other),
    }
}
