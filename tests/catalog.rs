use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventdesk::api::client::ApiClient;
use eventdesk::api::{categories, events, users};
use eventdesk::error::AppError;
use eventdesk::models::session::Session;
use eventdesk::models::user::Role;

fn session() -> Session {
    Session {
        identity: "7".to_string(),
        username: "organizer".to_string(),
        role: Role::Organizer,
        credential: "Basic b3JnOnNlY3JldA==".to_string(),
        name: None,
        email: None,
    }
}

#[tokio::test]
async fn event_list_tolerates_the_data_wrapper_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "name": "Jazz Night", "price": "250.5"},
                {"id": 2, "title": "Comedy Night", "price": 10.11}
            ]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let listed = events::list_events(&client, None).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].price, 250.5);
    // `title` is the fallback name field.
    assert_eq!(listed[1].name, "Comedy Night");
}

#[tokio::test]
async fn missing_event_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = events::get_event(&client, 99, None).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn event_mutation_sends_the_session_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(header("authorization", "Basic b3JnOnNlY3JldA=="))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 3, "name": "New Event", "price": 0})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let created = events::create_event(
        &client,
        &session(),
        &json!({"name": "New Event", "capacity": 40}),
    )
    .await
    .unwrap();

    assert_eq!(created.id, Some(3));
}

#[tokio::test]
async fn rejected_event_draft_surfaces_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/events/3"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Name is required"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = events::update_event(&client, &session(), 3, &json!({"name": ""}))
        .await
        .unwrap_err();

    match err {
        AppError::Validation(message) => assert_eq!(message, "Name is required"),
        other => panic!("expected Validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn categories_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Music"},
            {"id": 2, "name": "Comedy", "description": "Stand-up and improv"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/2"))
        .and(header("authorization", "Basic b3JnOnNlY3JldA=="))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let listed = categories::list_categories(&client).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].description.as_deref(), Some("Stand-up and improv"));

    categories::delete_category(&client, &session(), 2)
        .await
        .unwrap();
}

#[tokio::test]
async fn profile_update_preserves_the_role() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/users/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 7, "name": "Org Nizer", "role": "ORGANIZER"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let current = session();
    let updated = users::update_profile(
        &client,
        &current,
        &users::ProfileUpdate {
            name: Some("Org Nizer".to_string()),
            role: Some(current.role.as_str().to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.resolve_role(), Role::Organizer);
}
