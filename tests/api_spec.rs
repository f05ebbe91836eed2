use axum::http::StatusCode;
use axum_test::TestServer;
use tempfile::TempDir;
use vaultboard::activity::CategoryCounts;
use vaultboard::api::{create_router, AppState};
use vaultboard::config::VaultConfig;
use vaultboard::models::*;

fn setup() -> (TestServer, TempDir) {
    let vault = tempfile::tempdir().expect("Failed to create vault");
    let config = VaultConfig::new(vault.path());
    config.ensure_layout().expect("Failed to create vault layout");
    let app = create_router(AppState::new(config));
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, vault)
}

fn write_item(vault: &TempDir, category: Category, name: &str, content: &str) -> String {
    let path = vault.path().join(category.rel_dir()).join(name);
    std::fs::write(&path, content).expect("Failed to write item");
    path.display().to_string()
}

mod counts {
    use super::*;

    #[tokio::test]
    async fn empty_vault_has_all_zero_counts() {
        let (server, _vault) = setup();

        let response = server.get("/api/v1/counts").await;

        response.assert_status_ok();
        let counts: CategoryCounts = response.json();
        assert_eq!(counts.needs_action, 0);
        assert_eq!(counts.pending_approval, 0);
        assert_eq!(counts.approved, 0);
        assert_eq!(counts.done, 0);
        assert_eq!(counts.rejected, 0);
    }

    #[tokio::test]
    async fn counts_reflect_items_on_disk() {
        let (server, vault) = setup();
        write_item(&vault, Category::NeedsAction, "a.md", "x");
        write_item(&vault, Category::NeedsAction, "b.md", "y");
        write_item(&vault, Category::Done, "c.md", "z");

        let counts: CategoryCounts = server.get("/api/v1/counts").await.json();

        assert_eq!(counts.needs_action, 2);
        assert_eq!(counts.done, 1);
        assert_eq!(counts.approved, 0);
    }
}

mod transitions {
    use super::*;

    #[tokio::test]
    async fn approve_moves_the_file_and_logs_the_transition() {
        let (server, vault) = setup();
        let path = write_item(&vault, Category::NeedsAction, "a.md", "review me");

        let response = server
            .post("/api/v1/approve")
            .json(&serde_json::json!({ "filepath": path }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert!(body.get("error").is_none());

        assert!(vault.path().join("Approved/a.md").exists());
        assert!(!vault.path().join("Needs_Action/a.md").exists());

        let records: Vec<TransitionRecord> = server.get("/api/v1/logs").await.json();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "approve");
        assert_eq!(records[0].filename, "a.md");
    }

    #[tokio::test]
    async fn reject_moves_the_file_into_rejected() {
        let (server, vault) = setup();
        let path = write_item(&vault, Category::PendingApproval, "b.md", "no thanks");

        let body: serde_json::Value = server
            .post("/api/v1/reject")
            .json(&serde_json::json!({ "filepath": path }))
            .await
            .json();

        assert_eq!(body["success"], true);
        assert!(vault.path().join("Rejected/b.md").exists());
    }

    #[tokio::test]
    async fn send_for_approval_moves_a_draft_into_the_social_queue() {
        let (server, vault) = setup();
        let path = write_item(&vault, Category::SocialDraft, "post.md", "draft");

        let body: serde_json::Value = server
            .post("/api/v1/send_for_approval")
            .json(&serde_json::json!({ "filepath": path }))
            .await
            .json();

        assert_eq!(body["success"], true);
        assert!(vault.path().join("Pending_Approval/social/post.md").exists());
        assert!(!vault.path().join("social/Draft/post.md").exists());
    }

    #[tokio::test]
    async fn missing_file_yields_a_structured_failure_not_an_error_status() {
        let (server, vault) = setup();
        let missing = vault.path().join("Needs_Action/ghost.md");

        let response = server
            .post("/api/v1/approve")
            .json(&serde_json::json!({ "filepath": missing.display().to_string() }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().expect("error message").contains("not found"));

        let records: Vec<TransitionRecord> = server.get("/api/v1/logs").await.json();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn empty_path_yields_a_structured_failure() {
        let (server, _vault) = setup();

        let body: serde_json::Value = server
            .post("/api/v1/approve")
            .json(&serde_json::json!({ "filepath": "" }))
            .await
            .json();

        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn path_outside_the_vault_is_refused() {
        let (server, _vault) = setup();

        let body: serde_json::Value = server
            .post("/api/v1/approve")
            .json(&serde_json::json!({ "filepath": "/etc/passwd" }))
            .await
            .json();

        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().expect("error message").contains("outside the vault"));
    }

    #[tokio::test]
    async fn destination_collision_is_refused_and_reported() {
        let (server, vault) = setup();
        let path = write_item(&vault, Category::NeedsAction, "a.md", "incoming");
        write_item(&vault, Category::Approved, "a.md", "already approved");

        let body: serde_json::Value = server
            .post("/api/v1/approve")
            .json(&serde_json::json!({ "filepath": path }))
            .await
            .json();

        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().expect("error message").contains("already exists"));
        // Both files untouched
        assert!(vault.path().join("Needs_Action/a.md").exists());
        assert!(vault.path().join("Approved/a.md").exists());
    }
}

mod listings {
    use super::*;

    #[tokio::test]
    async fn category_listing_tags_items_with_their_inferred_kind() {
        let (server, vault) = setup();
        write_item(&vault, Category::NeedsAction, "mail.md", "An Email from a client");
        write_item(&vault, Category::NeedsAction, "chat.md", "forwarded whatsapp thread");
        write_item(&vault, Category::NeedsAction, "note.md", "plain note");

        let response = server.get("/api/v1/categories/needs_action").await;

        response.assert_status_ok();
        let mut items: Vec<ListedItem> = response.json();
        items.sort_by(|a, b| a.meta.filename.cmp(&b.meta.filename));

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind, ItemKind::Whatsapp);
        assert_eq!(items[1].kind, ItemKind::Email);
        assert_eq!(items[2].kind, ItemKind::Unknown);
    }

    #[tokio::test]
    async fn unknown_category_is_a_bad_request() {
        let (server, _vault) = setup();

        let response = server.get("/api/v1/categories/mystery").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn social_drafts_lists_the_staging_directory() {
        let (server, vault) = setup();
        write_item(&vault, Category::SocialDraft, "post.md", "draft");

        let items: Vec<ItemMeta> = server.get("/api/v1/social_drafts").await.json();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "post.md");
    }

    #[tokio::test]
    async fn activity_feed_tags_entries_with_their_category_label() {
        let (server, vault) = setup();
        write_item(&vault, Category::NeedsAction, "a.md", "x");
        write_item(&vault, Category::Done, "b.md", "y");

        let entries: Vec<ActivityEntry> = server.get("/api/v1/activity").await.json();

        assert_eq!(entries.len(), 2);
        let mut labels: Vec<_> = entries.iter().map(|e| e.directory.as_str()).collect();
        labels.sort();
        assert_eq!(labels, vec!["Done", "Needs Action"]);
    }

    #[tokio::test]
    async fn activity_feed_honors_the_limit_parameter() {
        let (server, vault) = setup();
        for i in 0..5 {
            write_item(&vault, Category::NeedsAction, &format!("{}.md", i), "x");
        }

        let entries: Vec<ActivityEntry> = server.get("/api/v1/activity?limit=2").await.json();

        assert_eq!(entries.len(), 2);
    }
}

mod files {
    use super::*;

    #[tokio::test]
    async fn view_file_returns_the_raw_content() {
        let (server, vault) = setup();
        let path = write_item(&vault, Category::NeedsAction, "a.md", "# Heading\n\nBody");

        let response = server
            .get("/api/v1/file")
            .add_query_param("path", &path)
            .await;

        response.assert_status_ok();
        let item: ItemContent = response.json();
        assert_eq!(item.filename, "a.md");
        assert_eq!(item.content, "# Heading\n\nBody");
    }

    #[tokio::test]
    async fn view_file_outside_the_vault_is_a_bad_request() {
        let (server, _vault) = setup();

        let response = server
            .get("/api/v1/file")
            .add_query_param("path", "/etc/passwd")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn view_file_missing_is_not_found() {
        let (server, vault) = setup();
        let missing = vault.path().join("Needs_Action/ghost.md");

        let response = server
            .get("/api/v1/file")
            .add_query_param("path", missing.display().to_string())
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn dashboard_combines_counts_activity_and_overview_text() {
        let (server, vault) = setup();
        write_item(&vault, Category::NeedsAction, "a.md", "x");
        std::fs::write(vault.path().join("Dashboard.md"), "# Today\n\nAll quiet.")
            .expect("Failed to write dashboard");

        let response = server.get("/api/v1/dashboard").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["counts"]["needs_action"], 1);
        assert_eq!(body["activity"].as_array().expect("activity array").len(), 1);
        assert_eq!(body["overview"], "# Today\n\nAll quiet.");
    }

    #[tokio::test]
    async fn dashboard_overview_is_null_without_a_dashboard_file() {
        let (server, _vault) = setup();

        let body: serde_json::Value = server.get("/api/v1/dashboard").await.json();

        assert!(body["overview"].is_null());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (server, _vault) = setup();

        let body: serde_json::Value = server.get("/api/v1/health").await.json();

        assert_eq!(body["status"], "ok");
    }
}
