//! Integration tests for the project management backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, SnapshotStore, SqliteSnapshots};
use crate::store::{ProjectStore, TaskStore, TeamStore, UserStore};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database and store snapshots
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let backend: Arc<dyn SnapshotStore> = Arc::new(SqliteSnapshots::new(pool));

        let users = Arc::new(UserStore::load(backend.clone()).await.unwrap());
        let teams = Arc::new(TeamStore::load(backend.clone()).await.unwrap());
        let projects = Arc::new(ProjectStore::load(backend.clone()).await.unwrap());
        let tasks = Arc::new(TaskStore::load(backend).await.unwrap());

        let config = Config {
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            users,
            teams,
            projects,
            tasks,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Open a session as the given seed account.
    async fn login_as(&self, username: &str, password: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_guarded_routes_require_session() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/users"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_success() {
    let fixture = TestFixture::new().await;

    let body = fixture.login_as("jsmith", "jsmith2024").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "jsmith");
    assert_eq!(body["data"]["userType"], "head");
    assert_eq!(body["message"], "John Smith logged in successfully");

    // Session endpoint reflects the logged-in user
    let session_resp = fixture
        .client
        .get(fixture.url("/api/auth/session"))
        .send()
        .await
        .unwrap();
    assert_eq!(session_resp.status(), 200);
    let session: Value = session_resp.json().await.unwrap();
    assert_eq!(session["data"]["isAuthenticated"], true);
    assert_eq!(session["data"]["currentUser"]["id"], 1);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/login"))
        .json(&json!({ "username": "jsmith", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_logout_closes_session() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    let logout_resp = fixture
        .client
        .post(fixture.url("/api/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(logout_resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_user_crud() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    // Create - seed has users 1-4, so the next id is 5
    let create_resp = fixture
        .client
        .post(fixture.url("/api/users"))
        .json(&json!({
            "username": "tnguyen",
            "password": "tnguyen2024",
            "email": "tam.nguyen@example.com"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["success"], true);
    assert_eq!(create_body["data"]["id"], 5);
    // Name falls back to the username when not provided
    assert_eq!(create_body["data"]["name"], "tnguyen");
    assert_eq!(create_body["data"]["userType"], "employee");
    assert_eq!(create_body["message"], "Employee created successfully");

    // Duplicate username is rejected
    let dup_resp = fixture
        .client
        .post(fixture.url("/api/users"))
        .json(&json!({
            "username": "tnguyen",
            "password": "other",
            "email": "someone.else@example.com"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(dup_resp.status(), 409);
    let dup_body: Value = dup_resp.json().await.unwrap();
    assert_eq!(dup_body["error"]["code"], "DUPLICATE_USERNAME");
    assert_eq!(dup_body["error"]["message"], "Username already exists");

    // Update
    let update_resp = fixture
        .client
        .put(fixture.url("/api/users/5"))
        .json(&json!({
            "username": "tnguyen",
            "name": "Tam Nguyen",
            "email": "tam.nguyen@example.com",
            "userType": "employee"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["name"], "Tam Nguyen");
    // Omitted password keeps the stored one
    assert_eq!(update_body["data"]["password"], "tnguyen2024");

    // Assign to a team
    let assign_resp = fixture
        .client
        .put(fixture.url("/api/users/5/team"))
        .json(&json!({ "teamId": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(assign_resp.status(), 200);
    let assign_body: Value = assign_resp.json().await.unwrap();
    assert_eq!(assign_body["data"]["teamId"], 2);

    // Remove from the team
    let remove_resp = fixture
        .client
        .delete(fixture.url("/api/users/5/team"))
        .send()
        .await
        .unwrap();
    assert_eq!(remove_resp.status(), 200);
    let remove_body: Value = remove_resp.json().await.unwrap();
    assert!(remove_body["data"]["teamId"].is_null());

    // Delete
    let delete_resp = fixture
        .client
        .delete(fixture.url("/api/users/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    // Verify deleted
    let get_resp = fixture
        .client
        .get(fixture.url("/api/users/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 404);
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["error"]["code"], "NOT_FOUND");
    assert_eq!(get_body["error"]["message"], "Employee not found");
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/forgot-password"))
        .json(&json!({
            "email": "nobody@example.com",
            "newPassword": "whatever"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "ACCOUNT_NOT_FOUND");
    assert_eq!(
        body["error"]["message"],
        "No account found with this email address"
    );
}

#[tokio::test]
async fn test_forgot_password_updates_login() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/forgot-password"))
        .json(&json!({
            "email": "maria.chen@example.com",
            "newPassword": "fresh-pass-1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Password updated successfully");

    fixture.login_as("mchen", "fresh-pass-1").await;
}

#[tokio::test]
async fn test_team_duplicate_name_case_insensitive() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/teams"))
        .json(&json!({
            "name": "platform",
            "description": "Lowercase duplicate of the seed team"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "DUPLICATE_NAME");
    assert_eq!(body["error"]["message"], "Team name already exists");
}

#[tokio::test]
async fn test_team_crud() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/teams"))
        .json(&json!({
            "name": "Security",
            "description": "AppSec and infra security"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["data"]["id"], 4);
    assert_eq!(create_body["message"], "Team created successfully");

    let update_resp = fixture
        .client
        .put(fixture.url("/api/teams/4"))
        .json(&json!({
            "name": "Product Security",
            "description": "AppSec and infra security"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["name"], "Product Security");

    let delete_resp = fixture
        .client
        .delete(fixture.url("/api/teams/4"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);
}

#[tokio::test]
async fn test_project_create_requires_head() {
    let fixture = TestFixture::new().await;
    fixture.login_as("mchen", "mchen2024").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .json(&json!({
            "name": "Shadow Project",
            "description": "",
            "teamId": 1,
            "priority": "low",
            "startDate": "2024-06-01",
            "endDate": "2024-07-01"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
    assert_eq!(
        body["error"]["message"],
        "Only administrators can create projects"
    );
}

#[tokio::test]
async fn test_project_create_as_head() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .json(&json!({
            "name": "Data Warehouse",
            "description": "<p>Centralize reporting data.</p>",
            "teamId": 1,
            "priority": "high",
            "startDate": "2024-06-01",
            "endDate": "2024-12-31"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["id"], 3);
    // New projects always start in planning
    assert_eq!(body["data"]["status"], "planning");
    assert_eq!(body["message"], "Project created successfully");

    // Duplicate name is rejected
    let dup_resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .json(&json!({
            "name": "Data Warehouse",
            "description": "",
            "teamId": 2,
            "priority": "low",
            "startDate": "2024-06-01",
            "endDate": "2024-12-31"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(dup_resp.status(), 409);
    let dup_body: Value = dup_resp.json().await.unwrap();
    assert_eq!(
        dup_body["error"]["message"],
        "Project with this name already exists"
    );
}

#[tokio::test]
async fn test_task_create_requires_head() {
    let fixture = TestFixture::new().await;
    fixture.login_as("mchen", "mchen2024").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/tasks"))
        .json(&json!({
            "title": "Sneaky task",
            "description": "",
            "projectId": 1,
            "assignedTo": 2,
            "priority": "low",
            "dueDate": "2024-06-01"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "Only administrators can create tasks"
    );
}

#[tokio::test]
async fn test_task_create_as_head() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/tasks"))
        .json(&json!({
            "title": "Wire up analytics",
            "description": "<p>Page view events for the new site.</p>",
            "projectId": 1,
            "assignedTo": 2,
            "priority": "medium",
            "dueDate": "2024-04-15"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["id"], 5);
    // New tasks always start in todo
    assert_eq!(body["data"]["status"], "todo");
    assert_eq!(body["message"], "Task created successfully");
}

#[tokio::test]
async fn test_task_update_preserves_omitted_fields() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    // Seed task 2 belongs to project 1 and is in progress; omit both
    let resp = fixture
        .client
        .put(fixture.url("/api/tasks/2"))
        .json(&json!({
            "title": "Migrate style guide v2",
            "description": "<p>Port the legacy style guide.</p>",
            "assignedTo": 3,
            "priority": "high",
            "dueDate": "2024-03-20"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Migrate style guide v2");
    assert_eq!(body["data"]["projectId"], 1);
    assert_eq!(body["data"]["status"], "in_progress");
    assert_eq!(body["data"]["priority"], "high");
}

#[tokio::test]
async fn test_task_status_drag_and_drop() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    // Reopen the completed seed task
    let resp = fixture
        .client
        .put(fixture.url("/api/tasks/4/status"))
        .json(&json!({ "status": "todo" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "todo");

    // Dropping a card for a vanished task is a silent no-op
    let noop_resp = fixture
        .client
        .put(fixture.url("/api/tasks/999/status"))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();

    assert_eq!(noop_resp.status(), 200);
    let noop_body: Value = noop_resp.json().await.unwrap();
    assert_eq!(noop_body["success"], true);
    assert!(noop_body["data"].is_null());
}

#[tokio::test]
async fn test_task_not_found_errors() {
    let fixture = TestFixture::new().await;
    fixture.login_as("jsmith", "jsmith2024").await;

    let resp = fixture
        .client
        .put(fixture.url("/api/tasks/999"))
        .json(&json!({
            "title": "Ghost",
            "description": "",
            "assignedTo": 1,
            "priority": "low",
            "dueDate": "2024-06-01"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Task not found");

    let delete_resp = fixture
        .client
        .delete(fixture.url("/api/tasks/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 404);
}

#[tokio::test]
async fn test_snapshots_survive_reload() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.sqlite");

    let pool = init_database(&db_path).await.unwrap();
    let backend: Arc<dyn SnapshotStore> = Arc::new(SqliteSnapshots::new(pool));

    {
        let teams = TeamStore::load(backend.clone()).await.unwrap();
        teams
            .create_team(crate::models::CreateTeamRequest {
                name: "Growth".to_string(),
                description: "Acquisition and retention".to_string(),
            })
            .await
            .unwrap();
    }

    // A fresh store over the same backend picks up the persisted state
    let reloaded = TeamStore::load(backend).await.unwrap();
    let teams = reloaded.list().await;
    assert_eq!(teams.len(), 4);
    assert!(teams.iter().any(|t| t.name == "Growth"));
}
