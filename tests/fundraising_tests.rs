use chrono::{DateTime, TimeZone, Utc};
use donatedesk::entities::fundraising_events::{
    self, FundraisingEventStatus, FundraisingEventType,
};
use donatedesk::error::AppError;
use donatedesk::fundraising::{FundraisingEventStore, NewFundraisingEvent};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
}

fn end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap()
}

fn new_event() -> NewFundraisingEvent {
    NewFundraisingEvent {
        event_type: None,
        merchant_id: "M123".to_string(),
        event_name: "Spring drive".to_string(),
        description: Some("Goal for the new mic".to_string()),
        start_month: start(),
        end_month: end(),
        status: None,
        total_amount: 10_000,
        cost: None,
    }
}

fn stored(id: i64, status: FundraisingEventStatus) -> fundraising_events::Model {
    fundraising_events::Model {
        id,
        event_type: FundraisingEventType::Up,
        merchant_id: "M123".to_string(),
        event_name: "Spring drive".to_string(),
        description: None,
        start_month: start(),
        end_month: end(),
        status,
        total_amount: 10_000,
        cost: 0,
        created_at: Utc.with_ymd_and_hms(2025, 2, 20, 8, 30, 0).unwrap(),
    }
}

#[test]
fn test_defaults_applied_on_valid_event() {
    let before = Utc::now();
    let valid = new_event().validate().unwrap();
    assert_eq!(valid.event_type, FundraisingEventType::Up);
    assert_eq!(valid.status, FundraisingEventStatus::Active);
    assert_eq!(valid.cost, 0);

    let active = valid.into_active_model(Utc::now());
    let created_at = active.created_at.clone().unwrap();
    assert!(created_at >= before);
    assert!(active.id.is_not_set());
}

#[test]
fn test_explicit_codes_are_accepted() {
    let mut event = new_event();
    event.event_type = Some(Some(2));
    event.status = Some(Some(2));
    event.cost = Some(Some(250));
    let valid = event.validate().unwrap();
    assert_eq!(valid.event_type, FundraisingEventType::Down);
    assert_eq!(valid.status, FundraisingEventStatus::Ended);
    assert_eq!(valid.cost, 250);
}

#[test]
fn test_invalid_type_is_rejected() {
    let mut event = new_event();
    event.event_type = Some(Some(0));
    let errors = event.validate().unwrap_err();
    assert_eq!(errors.fields().len(), 1);
    assert_eq!(errors.fields()[0].field, "type");
    assert_eq!(
        errors.fields()[0].message,
        "type must be a valid fundraising event type"
    );
}

#[test]
fn test_invalid_status_is_rejected() {
    let mut event = new_event();
    event.status = Some(Some(99));
    let errors = event.validate().unwrap_err();
    assert!(errors.has_field("status"));
    assert!(!errors.has_field("type"));
    assert_eq!(
        errors.fields()[0].message,
        "status must be a valid fundraising event status"
    );
}

#[test]
fn test_all_errors_are_collected() {
    let mut event = new_event();
    event.event_type = Some(Some(-1));
    event.status = Some(Some(-1));
    event.merchant_id = "x".repeat(51);
    event.event_name = "x".repeat(101);
    let errors = event.validate().unwrap_err();
    for field in ["type", "status", "merchantId", "eventName"] {
        assert!(errors.has_field(field), "missing error for {}", field);
    }
}

#[test]
fn test_length_limits_count_characters() {
    let mut event = new_event();
    event.merchant_id = "商".repeat(50);
    event.event_name = "活".repeat(100);
    assert!(event.validate().is_ok());

    let mut event = new_event();
    event.event_name = "活".repeat(101);
    assert!(event.validate().unwrap_err().has_field("eventName"));
}

#[test]
fn test_end_before_start_is_not_rejected() {
    let mut event = new_event();
    event.start_month = end();
    event.end_month = start();
    assert!(event.validate().is_ok());
}

#[test]
fn test_deserializes_camel_case_payload() {
    let payload = json!({
        "type": 1,
        "merchantId": "M123",
        "eventName": "Spring drive",
        "startMonth": "2025-03-01T00:00:00Z",
        "endMonth": "2025-05-01T00:00:00Z",
        "totalAmount": 10000
    });
    let event: NewFundraisingEvent = serde_json::from_value(payload).unwrap();
    assert_eq!(event.event_type, Some(Some(1)));
    assert_eq!(event.status, None);
    assert_eq!(event.description, None);
    assert_eq!(event.start_month, start());
}

fn payload_with(key: &str, value: serde_json::Value) -> NewFundraisingEvent {
    let mut payload = json!({
        "merchantId": "M123",
        "eventName": "Spring drive",
        "startMonth": "2025-03-01T00:00:00Z",
        "endMonth": "2025-05-01T00:00:00Z",
        "totalAmount": 10000
    });
    payload[key] = value;
    serde_json::from_value(payload).unwrap()
}

#[test]
fn test_explicit_null_is_rejected_not_defaulted() {
    for field in ["type", "status", "cost"] {
        let errors = payload_with(field, serde_json::Value::Null)
            .validate()
            .unwrap_err();
        assert_eq!(errors.fields().len(), 1, "{}", field);
        assert_eq!(errors.fields()[0].field, field);
        assert_eq!(errors.fields()[0].message, format!("{} cannot be null", field));
    }
}

#[test]
fn test_absent_keys_take_defaults() {
    let event = payload_with("description", serde_json::Value::Null);
    assert_eq!(event.event_type, None);
    assert_eq!(event.cost, None);

    let valid = event.validate().unwrap();
    assert_eq!(valid.event_type, FundraisingEventType::Up);
    assert_eq!(valid.status, FundraisingEventStatus::Active);
    assert_eq!(valid.cost, 0);
    assert_eq!(valid.description, None);
}

#[test]
fn test_empty_strings_are_accepted() {
    let mut event = new_event();
    event.merchant_id = String::new();
    event.event_name = String::new();
    let valid = event.validate().unwrap();
    assert_eq!(valid.merchant_id, "");
    assert_eq!(valid.event_name, "");
}

#[test]
fn test_model_serializes_with_column_names() {
    let value = serde_json::to_value(stored(7, FundraisingEventStatus::Active)).unwrap();
    assert_eq!(value["type"], "UP");
    assert_eq!(value["status"], "ACTIVE");
    assert_eq!(value["merchantId"], "M123");
    assert_eq!(value["totalAmount"], 10000);
    assert!(value.get("created_at").is_some());
}

#[tokio::test]
async fn test_create_inserts_validated_event() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored(1, FundraisingEventStatus::Active)]])
        .into_connection();
    let store = FundraisingEventStore::new(db);

    let created = store.create(new_event()).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.cost, 0);
    assert_eq!(created.status, FundraisingEventStatus::Active);
}

#[tokio::test]
async fn test_create_rejects_before_touching_database() {
    // No queued results: any query would surface as a database error
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let store = FundraisingEventStore::new(db);

    let mut event = new_event();
    event.status = Some(Some(7));
    let err = store.create(event).await.unwrap_err();
    match err {
        AppError::Validation(errors) => assert!(errors.has_field("status")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_find_and_list_for_merchant() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![stored(3, FundraisingEventStatus::Active)],
            vec![
                stored(5, FundraisingEventStatus::Active),
                stored(3, FundraisingEventStatus::Ended),
            ],
        ])
        .into_connection();
    let store = FundraisingEventStore::new(db);

    let found = store.find(3).await.unwrap();
    assert_eq!(found.map(|m| m.id), Some(3));

    let listed = store.list_for_merchant("M123").await.unwrap();
    assert_eq!(listed.iter().map(|m| m.id).collect::<Vec<_>>(), vec![5, 3]);
}

#[tokio::test]
async fn test_set_status_updates_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![stored(4, FundraisingEventStatus::Active)],
            vec![stored(4, FundraisingEventStatus::Ended)],
        ])
        .into_connection();
    let store = FundraisingEventStore::new(db);

    let updated = store
        .set_status(4, FundraisingEventStatus::Ended)
        .await
        .unwrap();
    assert_eq!(updated.status, FundraisingEventStatus::Ended);
}

#[tokio::test]
async fn test_set_status_on_missing_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<fundraising_events::Model>::new()])
        .into_connection();
    let store = FundraisingEventStore::new(db);

    let err = store
        .set_status(404, FundraisingEventStatus::Ended)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
