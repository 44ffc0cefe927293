//! Kanban board flows: columns, cards, connections, comments.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn columns_and_cards_round_trip() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("boarder@example.com", "password123", "Boarder")
        .await;
    let (_, project_id) = app.create_workspace_and_project(&cookie).await;

    let column = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/columns"),
            Some(serde_json::json!({ "title": "To do", "position": 0 })),
            Some(&cookie),
        )
        .await;
    assert_eq!(column.status, StatusCode::OK);
    let column_id = column.body["id"].as_i64().expect("column id");

    let card = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/cards"),
            Some(serde_json::json!({
                "title": "Write the report",
                "content": "Due Friday",
                "column_id": column_id,
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(card.status, StatusCode::OK);
    assert_eq!(card.body["column_id"].as_i64(), Some(column_id));
    let card_id = card.body["id"].as_i64().expect("card id");

    let board = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/board"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(board.status, StatusCode::OK);
    let columns = board.body.as_array().expect("board array");
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0]["cards"][0]["id"].as_i64(), Some(card_id));

    // Deleting the column archives the card instead of deleting it.
    let deleted = app
        .request(
            "DELETE",
            &format!("/api/columns/{column_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let card = app
        .request("GET", &format!("/api/cards/{card_id}"), None, Some(&cookie))
        .await;
    assert_eq!(card.status, StatusCode::OK);
    assert!(card.body["column_id"].is_null());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn connections_require_the_same_project() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("linker@example.com", "password123", "Linker")
        .await;
    let (workspace_id, project_a) = app.create_workspace_and_project(&cookie).await;

    let other = app
        .request(
            "POST",
            &format!("/api/workspaces/{workspace_id}/projects"),
            Some(serde_json::json!({ "name": "Other" })),
            Some(&cookie),
        )
        .await;
    let project_b = other.body["id"].as_i64().expect("project id");

    let a = app
        .request(
            "POST",
            &format!("/api/projects/{project_a}/cards"),
            Some(serde_json::json!({ "title": "A" })),
            Some(&cookie),
        )
        .await;
    let b = app
        .request(
            "POST",
            &format!("/api/projects/{project_a}/cards"),
            Some(serde_json::json!({ "title": "B" })),
            Some(&cookie),
        )
        .await;
    let c = app
        .request(
            "POST",
            &format!("/api/projects/{project_b}/cards"),
            Some(serde_json::json!({ "title": "C" })),
            Some(&cookie),
        )
        .await;

    let a_id = a.body["id"].as_i64().expect("card id");
    let b_id = b.body["id"].as_i64().expect("card id");
    let c_id = c.body["id"].as_i64().expect("card id");

    let connected = app
        .request(
            "POST",
            "/api/cards/connections",
            Some(serde_json::json!({ "from_card_id": a_id, "to_card_id": b_id })),
            Some(&cookie),
        )
        .await;
    assert_eq!(connected.status, StatusCode::OK);

    let cross_project = app
        .request(
            "POST",
            "/api/cards/connections",
            Some(serde_json::json!({ "from_card_id": a_id, "to_card_id": c_id })),
            Some(&cookie),
        )
        .await;
    assert_eq!(cross_project.status, StatusCode::BAD_REQUEST);

    let listed = app
        .request(
            "GET",
            &format!("/api/projects/{project_a}/connections"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn comment_deletion_is_author_only() {
    let app = TestApp::new().await;
    let author_cookie = app
        .create_verified_user("author@example.com", "password123", "Author")
        .await;
    let (_, project_id) = app.create_workspace_and_project(&author_cookie).await;

    let card = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/cards"),
            Some(serde_json::json!({ "title": "Discuss" })),
            Some(&author_cookie),
        )
        .await;
    let card_id = card.body["id"].as_i64().expect("card id");

    let comment = app
        .request(
            "POST",
            &format!("/api/cards/{card_id}/comments"),
            Some(serde_json::json!({ "content": "Looks good" })),
            Some(&author_cookie),
        )
        .await;
    let comment_id = comment.body["id"].as_i64().expect("comment id");

    let other_cookie = app
        .create_verified_user("other@example.com", "password123", "Other")
        .await;
    let forbidden = app
        .request(
            "DELETE",
            &format!("/api/cards/comments/{comment_id}"),
            None,
            Some(&other_cookie),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/cards/comments/{comment_id}"),
            None,
            Some(&author_cookie),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}
