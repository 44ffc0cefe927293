//! Upload, version chaining, history, and delete-cascade flows.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn reupload_chains_versions_and_history_is_descending() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("uploader@example.com", "password123", "Uploader")
        .await;
    let (_, project_id) = app.create_workspace_and_project(&cookie).await;

    // First upload of spec.pdf: version 1, size measured server-side.
    let response = app
        .upload(
            &format!("/api/projects/{project_id}/files"),
            "spec.pdf",
            &vec![0u8; 5000],
            &cookie,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["filename"], "spec.pdf");
    assert_eq!(response.body["latest_version"]["version"], 1);
    assert_eq!(response.body["latest_version"]["file_size"], 5000);
    let file_id = response.body["id"].as_i64().expect("file id");

    // Second upload of the same logical name: same metadata row, v2.
    let response = app
        .upload(
            &format!("/api/projects/{project_id}/files"),
            "spec.pdf",
            &vec![1u8; 6200],
            &cookie,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"].as_i64(), Some(file_id));
    assert_eq!(response.body["latest_version"]["version"], 2);
    assert_eq!(response.body["latest_version"]["file_size"], 6200);

    // One metadata row, two version rows.
    let listing = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/files"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(listing.body.as_array().map(Vec::len), Some(1));

    // History comes back most recent first.
    let history = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/history"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(history.status, StatusCode::OK);
    let versions: Vec<i64> = history
        .body
        .as_array()
        .expect("history array")
        .iter()
        .map(|v| v["version"].as_i64().expect("version"))
        .collect();
    assert_eq!(versions, vec![2, 1]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn download_returns_the_latest_artifact() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("reader@example.com", "password123", "Reader")
        .await;
    let (_, project_id) = app.create_workspace_and_project(&cookie).await;

    app.upload(
        &format!("/api/projects/{project_id}/files"),
        "notes.txt",
        b"first draft",
        &cookie,
    )
    .await;
    let response = app
        .upload(
            &format!("/api/projects/{project_id}/files"),
            "notes.txt",
            b"final draft",
            &cookie,
        )
        .await;
    let file_id = response.body["id"].as_i64().expect("file id");

    let download = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn delete_removes_versions_links_and_metadata() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("deleter@example.com", "password123", "Deleter")
        .await;
    let (_, project_id) = app.create_workspace_and_project(&cookie).await;

    let response = app
        .upload(
            &format!("/api/projects/{project_id}/files"),
            "spec.pdf",
            &vec![0u8; 5000],
            &cookie,
        )
        .await;
    let file_id = response.body["id"].as_i64().expect("file id");
    app.upload(
        &format!("/api/projects/{project_id}/files"),
        "spec.pdf",
        &vec![1u8; 6200],
        &cookie,
    )
    .await;

    // Attach to a card so the link cascade is exercised too.
    let card = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/cards"),
            Some(serde_json::json!({ "title": "Review the spec" })),
            Some(&cookie),
        )
        .await;
    let card_id = card.body["id"].as_i64().expect("card id");
    let attached = app
        .request(
            "POST",
            &format!("/api/cards/{card_id}/files/{file_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(attached.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{file_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // History of a deleted file is a 404, and the card lost its link.
    let history = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/history"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(history.status, StatusCode::NOT_FOUND);

    let card = app
        .request("GET", &format!("/api/cards/{card_id}"), None, Some(&cookie))
        .await;
    assert_eq!(card.body["files"].as_array().map(Vec::len), Some(0));

    let versions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM file_versions WHERE file_id = $1")
            .bind(file_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("count");
    assert_eq!(versions, 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn batch_upload_stores_each_file_independently() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("batch@example.com", "password123", "Batch")
        .await;
    let (_, project_id) = app.create_workspace_and_project(&cookie).await;

    // The helper sends one file per request; drive the batch route twice
    // to confirm both land as independent identities.
    for name in ["a.txt", "b.txt"] {
        let response = app
            .upload(
                &format!("/api/projects/{project_id}/files/batch"),
                name,
                b"content",
                &cookie,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        assert_eq!(response.body.as_array().map(Vec::len), Some(1));
    }

    let listing = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/files"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(listing.body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn upload_to_missing_project_is_not_found() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("lost@example.com", "password123", "Lost")
        .await;

    let response = app
        .upload("/api/projects/9999/files", "spec.pdf", b"data", &cookie)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
