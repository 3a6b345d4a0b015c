mod common;

use axum::http::StatusCode;
use common::{
    ADMIN_EMAIL, TEST_PASSWORD, create_record, encode_query_value, get_auth_token, list_records,
    setup_test_app,
};
use serde_json::{Value, json};

async fn seed_buildings(app: axum::Router, token: &str, buildings: &[Value]) {
    for building in buildings {
        let (status, _) = create_record(app.clone(), token, "building", building.clone()).await;
        assert_eq!(status, StatusCode::OK);
    }
}

fn names_of(page: &Value) -> Vec<String> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_defaults() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "A" }),
            json!({ "name": "B" }),
            json!({ "name": "C" }),
        ],
    )
    .await;

    let (status, page) = list_records(app, &token, "building", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 3);
    assert_eq!(page["meta"]["page"], 1);
    assert_eq!(page["meta"]["page_size"], 10);
    assert_eq!(page["meta"]["has_more"], false);
    assert_eq!(page["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_default_order_is_newest_first() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "First" }),
            json!({ "name": "Second" }),
            json!({ "name": "Third" }),
        ],
    )
    .await;

    let (_, page) = list_records(app, &token, "building", "").await;

    assert_eq!(names_of(&page), vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_list_pagination() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    let buildings: Vec<Value> = (0..25)
        .map(|i| json!({ "name": format!("Building {i:02}") }))
        .collect();
    seed_buildings(app.clone(), &token, &buildings).await;

    let (status, page) =
        list_records(app.clone(), &token, "building", "pageNumber=2&pageSize=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 10);
    assert_eq!(page["meta"]["total"], 25);
    assert_eq!(page["meta"]["page"], 2);
    assert_eq!(page["meta"]["has_more"], true);

    let (_, page) =
        list_records(app.clone(), &token, "building", "pageNumber=3&pageSize=10").await;
    assert_eq!(page["data"].as_array().unwrap().len(), 5);
    assert_eq!(page["meta"]["has_more"], false);

    let (status, page) =
        list_records(app, &token, "building", "pageNumber=99&pageSize=10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page["data"].as_array().unwrap().is_empty());
    assert_eq!(page["meta"]["total"], 25);
}

#[tokio::test]
async fn test_list_pages_do_not_overlap() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    let buildings: Vec<Value> = (0..6)
        .map(|i| json!({ "name": format!("Building {i}") }))
        .collect();
    seed_buildings(app.clone(), &token, &buildings).await;

    let (_, first) = list_records(
        app.clone(),
        &token,
        "building",
        "pageNumber=1&pageSize=3&sortField=name",
    )
    .await;
    let (_, second) = list_records(
        app,
        &token,
        "building",
        "pageNumber=2&pageSize=3&sortField=name",
    )
    .await;

    assert_eq!(
        names_of(&first),
        vec!["Building 0", "Building 1", "Building 2"]
    );
    assert_eq!(
        names_of(&second),
        vec!["Building 3", "Building 4", "Building 5"]
    );
}

#[tokio::test]
async fn test_page_size_invalid() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, body) = list_records(app, &token, "building", "pageSize=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page size invalid.");
}

#[tokio::test]
async fn test_page_number_invalid() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, body) = list_records(app, &token, "building", "pageNumber=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page number invalid.");
}

#[tokio::test]
async fn test_page_size_is_checked_before_page_number() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, body) =
        list_records(app, &token, "building", "pageNumber=-1&pageSize=-5").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page size invalid.");
}

#[tokio::test]
async fn test_page_size_is_capped() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(app.clone(), &token, &[json!({ "name": "Solo" })]).await;

    let (status, page) = list_records(app, &token, "building", "pageSize=5000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["page_size"], 100);
}

#[tokio::test]
async fn test_malformed_filters() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, body) = list_records(
        app,
        &token,
        "building",
        &format!("filters={}", encode_query_value("not json")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid filter criteria:")
    );
}

#[tokio::test]
async fn test_unknown_filter_operator() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;

    let raw = r#"[{"PropertyName":"status","Operator":"Like","Value":"Active"}]"#;
    let (status, body) = list_records(
        app,
        &token,
        "building",
        &format!("filters={}", encode_query_value(raw)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid filter criteria:")
    );
}

#[tokio::test]
async fn test_filters_equal() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "A", "status": "Active" }),
            json!({ "name": "B", "status": "Inactive" }),
            json!({ "name": "C", "status": "Active" }),
        ],
    )
    .await;

    let raw = r#"[{"PropertyName":"status","Operator":"Equal","Value":"Active"}]"#;
    let (status, page) = list_records(
        app,
        &token,
        "building",
        &format!("filters={}", encode_query_value(raw)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 2);
    assert!(
        page["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|record| record["status"] == "Active")
    );
}

#[tokio::test]
async fn test_filters_numeric_comparison() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "Small", "capacity": 100 }),
            json!({ "name": "Medium", "capacity": 250 }),
            json!({ "name": "Large", "capacity": 400 }),
        ],
    )
    .await;

    let raw = r#"[{"PropertyName":"capacity","Operator":"GreaterThan","Value":"150"}]"#;
    let (_, page) = list_records(
        app,
        &token,
        "building",
        &format!("filters={}", encode_query_value(raw)),
    )
    .await;

    assert_eq!(page["meta"]["total"], 2);
}

#[tokio::test]
async fn test_filters_combine_with_search() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "Westwood Hall", "status": "Active" }),
            json!({ "name": "Westwood Annex", "status": "Inactive" }),
            json!({ "name": "East Hall", "status": "Active" }),
        ],
    )
    .await;

    let raw = r#"[{"PropertyName":"status","Operator":"Equal","Value":"Active"}]"#;
    let (_, page) = list_records(
        app,
        &token,
        "building",
        &format!(
            "filters={}&searchTerm=westwood",
            encode_query_value(raw)
        ),
    )
    .await;

    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(names_of(&page), vec!["Westwood Hall"]);
}

#[tokio::test]
async fn test_search_term_is_case_insensitive() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "Westwood Campus" }),
            json!({ "name": "Eastside Annex" }),
        ],
    )
    .await;

    let (_, page) = list_records(app, &token, "building", "searchTerm=WESTWOOD").await;

    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(names_of(&page), vec!["Westwood Campus"]);
}

#[tokio::test]
async fn test_sort_ascending_and_descending() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "Charlie" }),
            json!({ "name": "Alpha" }),
            json!({ "name": "Bravo" }),
        ],
    )
    .await;

    let (_, page) = list_records(app.clone(), &token, "building", "sortField=name").await;
    assert_eq!(names_of(&page), vec!["Alpha", "Bravo", "Charlie"]);

    let (_, page) = list_records(
        app.clone(),
        &token,
        "building",
        "sortField=name&sortOrder=desc",
    )
    .await;
    assert_eq!(names_of(&page), vec!["Charlie", "Bravo", "Alpha"]);

    // Anything other than "desc" sorts ascending.
    let (_, page) = list_records(app, &token, "building", "sortField=name&sortOrder=upward").await;
    assert_eq!(names_of(&page), vec!["Alpha", "Bravo", "Charlie"]);
}

#[tokio::test]
async fn test_sort_by_numeric_field() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(
        app.clone(),
        &token,
        &[
            json!({ "name": "Mid", "capacity": 250 }),
            json!({ "name": "Low", "capacity": 90 }),
            json!({ "name": "High", "capacity": 400 }),
        ],
    )
    .await;

    let (_, page) = list_records(
        app,
        &token,
        "building",
        "sortField=capacity&sortOrder=desc",
    )
    .await;

    assert_eq!(names_of(&page), vec!["High", "Mid", "Low"]);
}

#[tokio::test]
async fn test_empty_parameter_values_fall_back_to_defaults() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;
    seed_buildings(app.clone(), &token, &[json!({ "name": "Solo" })]).await;

    let (status, page) = list_records(
        app,
        &token,
        "building",
        "filters=&searchTerm=&pageNumber=&pageSize=&sortField=&sortOrder=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["meta"]["page"], 1);
    assert_eq!(page["meta"]["page_size"], 10);
}

#[tokio::test]
async fn test_list_of_untouched_entity_is_empty() {
    let (app, _) = setup_test_app().await;
    let token = get_auth_token(app.clone(), ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, page) = list_records(app, &token, "feeschedule", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 0);
    assert!(page["data"].as_array().unwrap().is_empty());
}
