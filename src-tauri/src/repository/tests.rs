//! Repository Integration Tests
//!
//! Tests for TodoRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{NewTodo, TodoPatch};
    use crate::repository::{init_db, Repository, TodoRepository};
    use std::path::PathBuf;

    async fn setup_test_db() -> TodoRepository {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        TodoRepository::new(db_state.connection())
    }

    fn draft(content: &str) -> NewTodo {
        NewTodo::parse(content).expect("valid content")
    }

    #[tokio::test]
    async fn test_create_todo() {
        let repo = setup_test_db().await;

        let created = repo.create(&draft("  Test item  ")).await.expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.content, "Test item");
        assert!(!created.completed);
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_test_db().await;

        let created = repo.create(&draft("Find me")).await.expect("Failed to create");

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found, Some(created));

        let missing = repo.find_by_id(9999).await.expect("Find failed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_creation() {
        let repo = setup_test_db().await;

        let first = repo.create(&draft("Item 1")).await.unwrap();
        let second = repo.create(&draft("Item 2")).await.unwrap();
        let third = repo.create(&draft("Item 3")).await.unwrap();

        let todos = repo.list().await.expect("List failed");
        let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[tokio::test]
    async fn test_update_completed_refreshes_timestamp() {
        let repo = setup_test_db().await;
        let created = repo.create(&draft("Original")).await.unwrap();

        let patch = TodoPatch::new(None, Some(true));
        let updated = repo
            .update(created.id, &patch)
            .await
            .expect("Update failed")
            .expect("todo exists");

        assert!(updated.completed);
        assert_eq!(updated.content, "Original");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].completed);
        assert!(listed[0].updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let repo = setup_test_db().await;
        let created = repo.create(&draft("Keep flag")).await.unwrap();
        repo.update(created.id, &TodoPatch::new(None, Some(true))).await.unwrap();

        let renamed = repo
            .update(created.id, &TodoPatch::new(Some("Renamed".to_string()), None))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(renamed.content, "Renamed");
        assert!(renamed.completed);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = setup_test_db().await;

        let result = repo
            .update(42, &TodoPatch::new(None, Some(true)))
            .await
            .expect("Update should not error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_todo() {
        let repo = setup_test_db().await;
        let created = repo.create(&draft("To delete")).await.unwrap();

        let deleted = repo.delete(created.id).await.expect("Delete failed");
        assert_eq!(deleted.map(|t| t.id), Some(created.id));

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert!(found.is_none());

        let again = repo.delete(created.id).await.expect("Delete failed");
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_count() {
        let repo = setup_test_db().await;
        assert_eq!(repo.count().await.unwrap(), (0, 0));

        let a = repo.create(&draft("a")).await.unwrap();
        repo.create(&draft("b")).await.unwrap();
        repo.update(a.id, &TodoPatch::new(None, Some(true))).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), (1, 2));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let repo = setup_test_db().await;

        let created = repo.create(&draft("Write spec")).await.unwrap();
        let todos = repo.list().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].content, "Write spec");
        assert!(!todos[0].completed);

        repo.update(created.id, &TodoPatch::new(Some("Write spec v2".to_string()), None))
            .await
            .unwrap();
        let todos = repo.list().await.unwrap();
        assert_eq!(todos[0].content, "Write spec v2");
        assert_eq!(todos[0].id, created.id);

        repo.delete(created.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_patch_keeps_fields() {
        let repo = setup_test_db().await;
        let created = repo.create(&draft("Keep me")).await.unwrap();

        let patch = TodoPatch::new(None, None).normalized().unwrap();
        assert!(patch.is_empty());

        let updated = repo.update(created.id, &patch).await.unwrap().expect("row exists");
        assert_eq!(updated.content, "Keep me");
        assert!(!updated.completed);
        assert!(updated.updated_at >= created.updated_at);
    }
}
