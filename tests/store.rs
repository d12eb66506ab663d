//! Descriptor store persistence and deletion behaviour.

use std::path::PathBuf;
use web2app::{
    bundler::DeletionGuard,
    model::{WebApp, validate},
    store::{StoreError, WebAppStore},
};

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn store_path(&self) -> PathBuf {
        self.dir.path().join("data/webapps.json")
    }

    fn guard(&self) -> DeletionGuard {
        DeletionGuard::new([self.dir.path().join("data")])
    }

    async fn open(&self) -> WebAppStore {
        WebAppStore::open(self.store_path(), self.guard()).await.unwrap()
    }

    /// A fake generated bundle under the data directory.
    fn bundle(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join("data/GeneratedApps").join(format!("{name}.app"));
        std::fs::create_dir_all(path.join("Contents/MacOS")).unwrap();
        path
    }
}

fn app(name: &str) -> WebApp {
    WebApp::new(name, validate(&format!("{}.example.com", name.to_lowercase())).unwrap())
}

fn names(store: &WebAppStore) -> Vec<&str> {
    store.apps().iter().map(|a| a.name.as_str()).collect()
}

#[tokio::test]
async fn missing_file_opens_empty() {
    let fixture = Fixture::new();
    let store = fixture.open().await;
    assert!(store.apps().is_empty());
    assert!(!fixture.store_path().exists());
}

#[tokio::test]
async fn changes_survive_reopening() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;

    let mail = app("Mail").with_icon(Some(vec![1, 2, 3]));
    store.add(mail.clone()).await.unwrap();
    store.add(app("Calendar")).await.unwrap();

    let reopened = fixture.open().await;
    assert_eq!(reopened.apps(), store.apps());
    assert_eq!(reopened.get(mail.id), Some(&mail));
}

#[tokio::test]
async fn update_replaces_by_id_and_ignores_unknown() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;
    let mut mail = app("Mail");
    store.add(mail.clone()).await.unwrap();

    mail.name = "Work Mail".to_string();
    assert!(store.update(mail.clone()).await.unwrap());
    assert!(!store.update(app("Stranger")).await.unwrap());

    let reopened = fixture.open().await;
    assert_eq!(names(&reopened), ["Work Mail"]);
}

#[tokio::test]
async fn delete_removes_record_and_bundle() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;

    let mut mail = app("Mail");
    let bundle = fixture.bundle("Mail");
    mail.generated_path = Some(bundle.clone());
    store.add(mail.clone()).await.unwrap();

    let removed = store.delete(mail.id).await.unwrap();

    assert_eq!(removed.id, mail.id);
    assert!(store.apps().is_empty());
    assert!(!bundle.exists());
}

#[tokio::test]
async fn delete_keeps_bundles_outside_allowed_roots() {
    let fixture = Fixture::new();
    let elsewhere = tempfile::tempdir().unwrap();
    let foreign = elsewhere.path().join("Foreign.app");
    std::fs::create_dir_all(&foreign).unwrap();

    let mut store = fixture.open().await;
    let mut rogue = app("Rogue");
    rogue.generated_path = Some(foreign.clone());
    store.add(rogue.clone()).await.unwrap();

    store.delete(rogue.id).await.unwrap();

    assert!(store.apps().is_empty());
    assert!(foreign.exists());
}

#[tokio::test]
async fn delete_keeps_non_bundle_paths() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;
    let precious = fixture.dir.path().join("data/precious");
    std::fs::create_dir_all(&precious).unwrap();

    let mut rogue = app("Rogue");
    rogue.generated_path = Some(precious.clone());
    store.add(rogue.clone()).await.unwrap();

    store.delete(rogue.id).await.unwrap();
    assert!(precious.exists());
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;
    let stranger = app("Stranger");

    let err = store.delete(stranger.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == stranger.id));
}

#[tokio::test]
async fn delete_at_offsets() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;
    for name in ["A", "B", "C", "D"] {
        store.add(app(name)).await.unwrap();
    }

    let removed = store.delete_at(&[3, 1, 9]).await.unwrap();

    let removed: Vec<&str> = removed.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(removed, ["B", "D"]);
    assert_eq!(names(&store), ["A", "C"]);
}

#[tokio::test]
async fn move_is_persisted() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;
    for name in ["A", "B", "C"] {
        store.add(app(name)).await.unwrap();
    }

    store.move_app(&[2], 0).await.unwrap();

    assert_eq!(names(&fixture.open().await), ["C", "A", "B"]);
}

#[tokio::test]
async fn find_by_name_or_id_prefix() {
    let fixture = Fixture::new();
    let mut store = fixture.open().await;
    let mail = app("Mail");
    store.add(mail.clone()).await.unwrap();

    assert_eq!(store.find("mail").map(|a| a.id), Some(mail.id));
    assert_eq!(store.find(&mail.id.to_string()[..8]).map(|a| a.id), Some(mail.id));
    assert_eq!(store.find(&mail.id.to_string()).map(|a| a.id), Some(mail.id));
    assert!(store.find("calendar").is_none());
}

#[tokio::test]
async fn newer_document_version_is_refused() {
    let fixture = Fixture::new();
    std::fs::create_dir_all(fixture.store_path().parent().unwrap()).unwrap();
    std::fs::write(fixture.store_path(), br#"{"version": 2, "apps": []}"#).unwrap();

    let err = WebAppStore::open(fixture.store_path(), fixture.guard())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UnsupportedVersion(2)));
}
