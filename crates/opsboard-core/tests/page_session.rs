//! End-to-end test of a page session over a real state file.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use opsboard_core::config::remote::{
    AUTO_REFRESH_KEY, ConfigSource, ConfigValue, OK_CODE, RemoteConfigError,
};
use opsboard_core::storage::{USER_AVATAR_KEY, USER_INFO_KEY};
use opsboard_core::{
    FileStore, MenuItem, Navigator, PageEvent, PageMap, PageSession, SidebarView, StateStore,
};

struct FakeSidebar {
    labels: Vec<&'static str>,
}

impl SidebarView for FakeSidebar {
    fn items(&self) -> Vec<MenuItem> {
        self.labels.iter().map(|l| MenuItem::new(*l)).collect()
    }
    fn hide_item(&mut self, _label: &str) {}
    fn clear_active(&mut self) {}
    fn set_active(&mut self, _label: &str) {}
}

#[derive(Default)]
struct NullNavigator;

impl Navigator for NullNavigator {
    fn navigate(&mut self, _destination: &str) {}
}

struct StaticSource {
    enabled: &'static str,
    interval: &'static str,
}

impl ConfigSource for StaticSource {
    async fn get_value(&self, key: &str) -> Result<ConfigValue, RemoteConfigError> {
        let data = if key == AUTO_REFRESH_KEY {
            self.enabled
        } else {
            self.interval
        };
        Ok(ConfigValue {
            code: OK_CODE,
            data: data.to_string(),
        })
    }
}

fn seeded_store(dir: &tempfile::TempDir) -> FileStore {
    let path = dir.path().join("state.json");
    let mut store = FileStore::open(path);
    store
        .set(USER_AVATAR_KEY, "/upload/me.png")
        .expect("seed userAvatar");
    store
        .set(USER_INFO_KEY, r#"{"avatar":"/upload/me.png","name":"ops"}"#)
        .expect("seed userInfo");
    store
}

#[tokio::test]
async fn test_session_repairs_state_file_and_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");

    let mut session = PageSession::new(
        Box::new(seeded_store(&dir)),
        Box::new(FakeSidebar {
            labels: vec!["总览", "视图", "CMDB"],
        }),
        Box::new(NullNavigator),
        PageMap::standard(),
        "/api/总览",
    );
    let mut events = session.subscribe();

    let refreshes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&refreshes);
    let settings = session
        .initialize(
            &StaticSource {
                enabled: "false",
                interval: "",
            },
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .await;

    // Refresh disabled, default interval on the empty value.
    assert!(!settings.enabled);
    assert_eq!(settings.interval, opsboard_core::DEFAULT_REFRESH_INTERVAL);

    // Exactly one avatar-update notification for the repair pass.
    assert_eq!(
        events.try_recv().unwrap(),
        PageEvent::AvatarUpdated {
            avatar: "/api/upload/me.png".to_string()
        }
    );
    assert!(events.try_recv().is_err());

    // Navigation bound under the API mount; manual refresh still works.
    assert!(session.router().is_bound("视图"));
    assert!(!session.router().is_bound("CMDB"));
    assert_eq!(
        session.router().resolve_destination("视图").unwrap(),
        "/api/视图.html"
    );
    session.manual_refresh();
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);

    // The repair reached disk and reopening shows consistent state.
    drop(session);
    let reopened = FileStore::open(state_path);
    assert_eq!(
        reopened.get(USER_AVATAR_KEY).as_deref(),
        Some("/api/upload/me.png")
    );
    let info: serde_json::Value =
        serde_json::from_str(&reopened.get(USER_INFO_KEY).unwrap()).unwrap();
    assert_eq!(info["avatar"], "/api/upload/me.png");
    assert_eq!(info["name"], "ops");
}

#[tokio::test]
async fn test_second_session_over_fixed_state_emits_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");

    {
        let mut session = PageSession::new(
            Box::new(seeded_store(&dir)),
            Box::new(FakeSidebar {
                labels: vec!["总览"],
            }),
            Box::new(NullNavigator),
            PageMap::standard(),
            "/",
        );
        session
            .initialize(
                &StaticSource {
                    enabled: "false",
                    interval: "30",
                },
                Arc::new(|| {}),
            )
            .await;
    }

    let mut session = PageSession::new(
        Box::new(FileStore::open(state_path)),
        Box::new(FakeSidebar {
            labels: vec!["总览"],
        }),
        Box::new(NullNavigator),
        PageMap::standard(),
        "/",
    );
    let mut events = session.subscribe();
    session
        .initialize(
            &StaticSource {
                enabled: "false",
                interval: "30",
            },
            Arc::new(|| {}),
        )
        .await;

    assert!(events.try_recv().is_err(), "repair must be idempotent");
}
