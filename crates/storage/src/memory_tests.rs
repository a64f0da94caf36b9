use promptdeck_core::{FolderCatalog, NewFolder, NewPrompt, PromptPatch, PromptRecord};
use serde_json::json;

use super::*;

fn legacy_rows() -> Vec<PromptRecord> {
    serde_json::from_value(json!([
        {"id": "old", "title": "Old", "content": "c", "tags": "[\"a\"]", "folder": "Ideas",
         "created_at": "2023-01-01T00:00:00Z"},
        {"id": "new", "title": "New", "content": "c", "tags": ["b"], "folder_id": "Work",
         "created_at": "2024-01-01T00:00:00Z"}
    ]))
    .expect("rows")
}

fn ideas() -> Folder {
    Folder {
        id: "f-ideas".to_owned(),
        name: "Ideas".to_owned(),
        order: None,
        icon: None,
        color: None,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[tokio::test]
async fn fetch_all_returns_newest_first() {
    let backend = MemoryBackend::with_data(legacy_rows(), vec![ideas()]);
    let rows = backend.fetch_all().await.expect("fetch");
    let ids: Vec<_> = rows.iter().filter_map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, ["new", "old"]);
}

#[tokio::test]
async fn create_assigns_id_and_default_folder() {
    let backend = MemoryBackend::new();
    let created = backend.create(&NewPrompt::new("T", "C").tags(["X"])).await.expect("create");
    assert!(!created.id.is_empty());
    assert_eq!(created.folder, DEFAULT_FOLDER);
    assert_eq!(created.tags.as_slice(), ["x"]);
    assert_eq!(backend.fetch_all().await.expect("fetch").len(), 1);
}

#[tokio::test]
async fn create_rejects_unknown_folder() {
    let backend = MemoryBackend::new();
    let err = backend.create(&NewPrompt::new("T", "C").folder("nope")).await.expect_err("unknown");
    assert!(matches!(err, StorageError::NotFound { entity: "folder", .. }));
}

#[tokio::test]
async fn patch_normalizes_legacy_row() {
    let backend = MemoryBackend::with_data(legacy_rows(), vec![ideas()]);
    let patched =
        backend.patch("old", &PromptPatch::default().title("Renamed")).await.expect("patch");
    assert_eq!(patched.title, "Renamed");
    assert_eq!(patched.folder, "f-ideas");
    assert_eq!(patched.tags.as_slice(), ["a"]);
}

#[tokio::test]
async fn patch_missing_prompt_is_not_found() {
    let backend = MemoryBackend::new();
    let err = backend.patch("ghost", &PromptPatch::default()).await.expect_err("missing");
    assert!(matches!(err, StorageError::NotFound { entity: "prompt", .. }));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let backend = MemoryBackend::with_data(legacy_rows(), Vec::new());
    backend.delete("old").await.expect("delete");
    backend.delete("old").await.expect("delete again");
    assert_eq!(backend.fetch_all().await.expect("fetch").len(), 1);
}

#[tokio::test]
async fn folder_names_are_unique() {
    let backend = MemoryBackend::with_data(Vec::new(), vec![ideas()]);
    let err = backend.create_folder(&NewFolder::named("IDEAS")).await.expect_err("duplicate");
    assert!(err.is_duplicate());
    let err = backend.create_folder(&NewFolder::named("life")).await.expect_err("builtin");
    assert!(err.is_duplicate());
    let other = backend.create_folder(&NewFolder::named("Drafts")).await.expect("create");
    let err = backend.rename_folder(&other.id, "Ideas").await.expect_err("rename clash");
    assert!(err.is_duplicate());
}

#[tokio::test]
async fn delete_folder_reassigns_members() {
    let mut rows = legacy_rows();
    rows.push(
        serde_json::from_value(json!({"id": "ref", "title": "R", "content": "c", "folder_id": "f-ideas"}))
            .expect("row"),
    );
    let backend = MemoryBackend::with_data(rows, vec![ideas()]);
    backend.delete_folder("f-ideas", "Life").await.expect("delete folder");

    let catalog = FolderCatalog::default();
    let folders: Vec<_> = backend
        .fetch_all()
        .await
        .expect("fetch")
        .iter()
        .filter_map(|r| r.normalize(&catalog, "Work"))
        .map(|p| (p.id, p.folder))
        .collect();
    assert!(folders.contains(&("old".to_owned(), "Life".to_owned())));
    assert!(folders.contains(&("ref".to_owned(), "Life".to_owned())));
    assert!(backend.fetch_folders().await.expect("folders").is_empty());
}

#[tokio::test]
async fn builtin_folders_cannot_be_deleted() {
    let backend = MemoryBackend::new();
    let err = backend.delete_folder("Work", "Life").await.expect_err("builtin");
    assert!(matches!(err, StorageError::Rejected(_)));
}

#[tokio::test]
async fn folder_order_is_persisted() {
    let backend = MemoryBackend::with_data(Vec::new(), vec![ideas()]);
    backend.set_folder_order(&["f-ideas".to_owned()]).await.expect("order");
    let folders = backend.fetch_folders().await.expect("folders");
    assert_eq!(folders[0].order, Some(0));
}

#[tokio::test]
async fn export_round_trips() {
    let backend = MemoryBackend::with_data(legacy_rows(), vec![ideas()]);
    let doc = backend.export().await;
    let again = MemoryBackend::from_export(doc);
    assert_eq!(again.fetch_all().await.expect("fetch").len(), 2);
    assert_eq!(again.fetch_folders().await.expect("folders").len(), 1);
}
