use sc_app::*;
use sc_session::{Alloy, AlloyStore, Configurations, Element, SessionSnapshot};

fn initial() -> SessionSnapshot {
    SessionSnapshot::new(
        Configurations::default(),
        AlloyStore::single(Alloy {
            name: "1045".to_string(),
            compositions: vec![Element::new("C", 0.45), Element::new("Mn", 0.75)],
        }),
    )
}

fn cooling(rate: f64) -> Action {
    Action::UpdateConfigurations {
        configurations: Configurations {
            cct_cooling_rate: rate,
            ..Configurations::default()
        },
    }
}

#[test]
fn worked_example_through_the_store() {
    // Capacity 3 with the initial session as entry A.
    let mut store = SessionStore::new(initial(), &Settings { history_capacity: 3 }).unwrap();
    store.dispatch(cooling(20.0)).unwrap(); // B
    store.dispatch(cooling(30.0)).unwrap(); // C
    let outcome = store.dispatch(cooling(40.0)).unwrap(); // D evicts A
    assert_eq!(outcome, Outcome::Recorded { index: 2, evicted: true });

    store.dispatch(Action::StepBack).unwrap();
    assert_eq!(store.active().configurations.cct_cooling_rate, 30.0);

    let outcome = store.dispatch(cooling(50.0)).unwrap(); // E replaces D
    assert_eq!(outcome, Outcome::Recorded { index: 2, evicted: false });

    let rates: Vec<f64> = store
        .history()
        .iter()
        .map(|s| s.configurations.cct_cooling_rate)
        .collect();
    assert_eq!(rates, vec![20.0, 30.0, 50.0]);
}

#[test]
fn replay_reports_rejections_and_continues() {
    let script = Script {
        initial: initial(),
        actions: vec![
            cooling(20.0),
            cooling(-5.0),
            Action::StepForward,
            Action::StepBack,
            Action::JumpTo { index: 9 },
        ],
    };

    let report = replay_script(&script, &Settings::default()).unwrap();
    assert_eq!(report.steps.len(), 5);
    assert_eq!(report.rejected_count(), 1);
    assert!(report.steps[1].error.is_some());
    assert_eq!(report.steps[2].outcome, Some(Outcome::Ignored));
    assert_eq!(report.steps[3].outcome, Some(Outcome::Loaded { index: 0 }));
    assert_eq!(report.steps[4].outcome, Some(Outcome::Ignored));
    assert_eq!(report.store.history().len(), 2);
}

#[test]
fn script_parses_from_yaml() {
    let yaml = r#"
initial:
  configurations:
    grain_size: 9.0
    nucleation_start: 1.0
    nucleation_finish: 99.9
    start_temp: 880.0
    cct_cooling_rate: 10.0
  alloy_store:
    parent:
      name: "1018"
      compositions:
        - { symbol: C, weight: 0.18 }
actions:
  - type: SetDilution
    dilution: 10.0
  - type: StepBack
  - type: JumpTo
    index: 1
  - type: Reset
"#;
    let script: Script = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(script.actions.len(), 4);
    assert_eq!(script.actions[2], Action::JumpTo { index: 1 });

    let report = replay_script(&script, &Settings::default()).unwrap();
    assert_eq!(report.steps[3].outcome, Some(Outcome::Reset));
    assert_eq!(report.store.history().len(), 1);
}

#[test]
fn saved_store_resumes_with_cursor() {
    let mut store = SessionStore::new(initial(), &Settings { history_capacity: 4 }).unwrap();
    store.dispatch(cooling(20.0)).unwrap();
    store.dispatch(cooling(30.0)).unwrap();
    store.dispatch(Action::StepBack).unwrap();

    let path = std::env::temp_dir().join("sc_app_store_resume.json");
    save_store(&path, &store).unwrap();
    let mut loaded = load_store(&path).unwrap();

    assert_eq!(loaded, store);
    assert!(loaded.can_step_forward());
    assert_eq!(loaded.dispatch(Action::StepForward).unwrap(), Outcome::Loaded { index: 2 });
    assert_eq!(loaded.active().configurations.cct_cooling_rate, 30.0);
}

#[test]
fn invalid_initial_session_fails() {
    let mut bad = initial();
    bad.configurations.grain_size = 0.0;
    let err = SessionStore::new(bad, &Settings::default()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

fn saved_store_json(name: &str) -> (std::path::PathBuf, serde_json::Value) {
    let mut store = SessionStore::new(initial(), &Settings { history_capacity: 2 }).unwrap();
    store.dispatch(cooling(20.0)).unwrap();

    let path = std::env::temp_dir().join(name);
    save_store(&path, &store).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    (path, serde_json::from_str(&content).unwrap())
}

fn write_json(path: &std::path::Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn load_error_message(path: &std::path::Path) -> String {
    match load_store(path) {
        Err(AppError::Parse { what, message }) => {
            assert_eq!(what, "session store");
            message
        }
        other => panic!("expected parse failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn load_rejects_over_capacity_history() {
    let (path, mut value) = saved_store_json("sc_app_store_over_capacity.json");
    value["history"]["capacity"] = serde_json::json!(1);
    write_json(&path, &value);

    let message = load_error_message(&path);
    assert!(message.contains("capacity is 1"), "{}", message);
}

#[test]
fn load_rejects_active_differing_from_cursor_entry() {
    let (path, mut value) = saved_store_json("sc_app_store_active_mismatch.json");
    value["active"]["configurations"]["cct_cooling_rate"] = serde_json::json!(99.0);
    write_json(&path, &value);

    let message = load_error_message(&path);
    assert!(message.contains("under the cursor"), "{}", message);
}

#[test]
fn load_rejects_invalid_history_entry() {
    let (path, mut value) = saved_store_json("sc_app_store_bad_entry.json");
    value["history"]["data"][0]["configurations"]["grain_size"] = serde_json::json!(-5.0);
    write_json(&path, &value);

    let message = load_error_message(&path);
    assert!(message.contains("history entry 0"), "{}", message);
}

#[test]
fn load_accepts_untouched_file() {
    let (path, _) = saved_store_json("sc_app_store_untouched.json");
    let store = load_store(&path).unwrap();
    assert_eq!(store.history().len(), 2);
    assert_eq!(store.active().configurations.cct_cooling_rate, 20.0);
}
