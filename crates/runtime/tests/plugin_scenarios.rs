use std::collections::{HashMap, HashSet};
use std::fs;
use std::sync::{Arc, Mutex, RwLock};
use std::thread;

use destroy_core::{
    ActionEvent, ActorId, Configuration, Decision, EntityDestroyer, MessageKey, MessageSink,
    PermissionOracle, TargetRef,
};
use destroy_runtime::{
    CommandOutcome, ConfigDiagnostic, DestroyPlugin, FileConfigRepository, RuntimeConfig,
};

/// Minimal in-process host: a permission table, a set of live entities and
/// a chat log per actor.
#[derive(Default)]
struct TestServer {
    grants: RwLock<HashMap<ActorId, HashSet<String>>>,
    entities: Mutex<HashSet<TargetRef>>,
    destroy_calls: Mutex<Vec<TargetRef>>,
    chat: Mutex<Vec<(ActorId, String)>>,
}

impl TestServer {
    fn grant(&self, actor: ActorId, permission: &str) {
        self.grants
            .write()
            .unwrap()
            .entry(actor)
            .or_default()
            .insert(permission.to_owned());
    }

    fn spawn(&self, target: TargetRef) {
        self.entities.lock().unwrap().insert(target);
    }

    fn alive(&self, target: TargetRef) -> bool {
        self.entities.lock().unwrap().contains(&target)
    }

    fn chat_for(&self, actor: ActorId) -> Vec<String> {
        self.chat
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == actor)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl PermissionOracle for TestServer {
    fn has_permission(&self, actor: ActorId, permission: &str) -> bool {
        self.grants
            .read()
            .unwrap()
            .get(&actor)
            .is_some_and(|set| set.contains(permission))
    }
}

impl EntityDestroyer for TestServer {
    fn destroy(&self, target: TargetRef) {
        self.destroy_calls.lock().unwrap().push(target);
        self.entities.lock().unwrap().remove(&target);
    }
}

impl MessageSink for TestServer {
    fn send_message(&self, actor: ActorId, text: &str) {
        self.chat.lock().unwrap().push((actor, text.to_owned()));
    }
}

fn start(server: &Arc<TestServer>, config: &RuntimeConfig) -> DestroyPlugin {
    DestroyPlugin::builder()
        .config_repository(Arc::new(FileConfigRepository::new(&config.config_path)))
        .permissions(server.clone())
        .destroyer(server.clone())
        .messenger(server.clone())
        .build()
        .expect("plugin should build")
}

fn read_config(config: &RuntimeConfig) -> Configuration {
    let raw = fs::read_to_string(&config.config_path).expect("config file should exist");
    serde_json::from_str(&raw).expect("config file should be valid JSON")
}

const U: ActorId = ActorId(76561198012345678);

#[test]
fn fresh_actor_with_permission_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    let server = Arc::new(TestServer::default());
    let plugin = start(&server, &config);

    server.grant(U, "destroy.use");
    server.spawn(TargetRef(1));

    assert!(!plugin.is_enabled(U));
    assert_eq!(
        plugin.on_hammer_hit(&ActionEvent::hit(U, TargetRef(1))),
        Decision::Ignore
    );
    assert!(server.alive(TargetRef(1)));
}

#[test]
fn toggled_actor_destroys_target() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    let server = Arc::new(TestServer::default());
    let plugin = start(&server, &config);

    server.grant(U, "destroy.use");
    server.spawn(TargetRef(1));

    assert_eq!(
        plugin.handle_command(Some(U), "destroy"),
        CommandOutcome::Toggled { enabled: true }
    );
    assert_eq!(
        plugin.on_hammer_hit(&ActionEvent::hit(U, TargetRef(1))),
        Decision::Destroy(TargetRef(1))
    );

    assert!(!server.alive(TargetRef(1)));
    assert_eq!(*server.destroy_calls.lock().unwrap(), vec![TargetRef(1)]);
    assert_eq!(
        server.chat_for(U),
        vec![MessageKey::Enabled.default_template()]
    );
}

#[test]
fn already_removed_target_is_passed_through_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    let server = Arc::new(TestServer::default());
    let plugin = start(&server, &config);

    server.grant(U, "destroy.use");
    plugin.toggle(U);

    // Entity 5 was never spawned (or is already gone): the gate still
    // decides Destroy and the host treats it as a no-op.
    assert_eq!(
        plugin.on_hammer_hit(&ActionEvent::hit(U, TargetRef(5))),
        Decision::Destroy(TargetRef(5))
    );
    assert_eq!(*server.destroy_calls.lock().unwrap(), vec![TargetRef(5)]);
}

#[test]
fn toggled_actor_without_target_is_notified() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    let server = Arc::new(TestServer::default());
    let plugin = start(&server, &config);

    server.grant(U, "destroy.use");
    plugin.toggle(U);

    assert_eq!(
        plugin.on_hammer_hit(&ActionEvent::without_target(U)),
        Decision::NotifyOnly(MessageKey::EntityIsNull)
    );
    assert_eq!(
        server.chat_for(U),
        vec![
            MessageKey::Enabled.default_template(),
            MessageKey::EntityIsNull.default_template(),
        ]
    );
}

#[test]
fn event_without_actor_is_ignored_silently() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    let server = Arc::new(TestServer::default());
    let plugin = start(&server, &config);

    for event in [
        ActionEvent::new(None, Some(TargetRef(1))),
        ActionEvent::new(None, None),
    ] {
        assert_eq!(plugin.on_hammer_hit(&event), Decision::Ignore);
    }
    assert!(server.chat.lock().unwrap().is_empty());
    assert!(server.destroy_calls.lock().unwrap().is_empty());
}

#[test]
fn restart_disables_everyone() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    let server = Arc::new(TestServer::default());
    server.grant(U, "destroy.use");

    let plugin = start(&server, &config);
    plugin.toggle(U);
    assert!(plugin.is_enabled(U));
    plugin.shutdown();

    let plugin = start(&server, &config);
    assert!(!plugin.is_enabled(U));
    assert_eq!(
        plugin.on_hammer_hit(&ActionEvent::hit(U, TargetRef(1))),
        Decision::Ignore
    );
}

#[test]
fn missing_config_file_is_created_with_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("oxide").join("config.json"));
    let server = Arc::new(TestServer::default());

    let plugin = start(&server, &config);

    assert_eq!(plugin.config().permission, "destroy.use");
    assert_eq!(read_config(&config), Configuration::default());
}

#[test]
fn invalid_json_is_replaced_with_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    fs::write(&config.config_path, "{\"Permission\": \"destroy.use\",,}").unwrap();
    let server = Arc::new(TestServer::default());

    let plugin = start(&server, &config);

    assert_eq!(plugin.config().permission, "destroy.use");
    assert_eq!(read_config(&config), Configuration::default());
}

#[test]
fn custom_permission_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    fs::write(&config.config_path, r#"{"Permission":"vip.destroy"}"#).unwrap();
    let server = Arc::new(TestServer::default());
    server.grant(U, "destroy.use");

    let plugin = start(&server, &config);
    plugin.toggle(U);
    assert_eq!(
        plugin.on_hammer_hit(&ActionEvent::hit(U, TargetRef(1))),
        Decision::Ignore
    );
    plugin.shutdown();

    let plugin = start(&server, &config);
    assert_eq!(plugin.config().permission, "vip.destroy");
    assert_eq!(read_config(&config).permission, "vip.destroy");
}

#[test]
fn reload_after_file_corruption_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    fs::write(&config.config_path, r#"{"Permission":"vip.destroy"}"#).unwrap();
    let server = Arc::new(TestServer::default());
    let plugin = start(&server, &config);

    fs::write(&config.config_path, "garbage").unwrap();
    let outcome = plugin.reload_config();

    assert!(matches!(
        outcome.diagnostic,
        Some(ConfigDiagnostic::Corrupt(_))
    ));
    assert_eq!(plugin.config().permission, "destroy.use");
    assert_eq!(read_config(&config), Configuration::default());
}

#[test]
fn concurrent_toggles_and_hits_do_not_corrupt_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::new(dir.path().join("config.json"));
    let server = Arc::new(TestServer::default());
    let plugin = Arc::new(start(&server, &config));

    let actors: Vec<ActorId> = (1..=8).map(ActorId).collect();
    for &actor in &actors {
        server.grant(actor, "destroy.use");
    }

    let handles: Vec<_> = actors
        .iter()
        .map(|&actor| {
            let plugin = Arc::clone(&plugin);
            thread::spawn(move || {
                for round in 0..50u64 {
                    plugin.handle_command(Some(actor), "destroy");
                    let decision =
                        plugin.on_hammer_hit(&ActionEvent::hit(actor, TargetRef(round)));
                    assert!(matches!(decision, Decision::Ignore | Decision::Destroy(_)));
                }
            })
        })
        .collect();

    let reloader = {
        let plugin = Arc::clone(&plugin);
        thread::spawn(move || {
            for _ in 0..10 {
                let outcome = plugin.reload_config();
                assert_eq!(outcome.config.permission, "destroy.use");
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    reloader.join().unwrap();

    // 50 toggles per actor: everyone ends up switched off again.
    assert!(plugin.toggles().is_empty());
    // Every toggle produced exactly one notification.
    for &actor in &actors {
        assert_eq!(server.chat_for(actor).len(), 50);
    }
}
