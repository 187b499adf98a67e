#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use docbridge_core::config::{EngineSettings, Settings, SuggestSettings};
use docbridge_core::error::{ConfigError, EngineError};
use docbridge_core::traits::SearchBackend;
use docbridge_engine::preview::MISSING_DOCUMENT;
use docbridge_engine::{EngineClient, EngineSearch, SuggestionDeriver};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// Writing an executable while another test forks can leave it busy (ETXTBSY).
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn fake_engine(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake_engine.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn settings_for(engine: &Path) -> EngineSettings {
    EngineSettings { path: engine.to_string_lossy().into_owned(), ..EngineSettings::default() }
}

#[test]
fn missing_engine_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let err = EngineClient::new(&settings_for(&tmp.path().join("nope"))).unwrap_err();
    assert!(matches!(err, ConfigError::MissingEngine { .. }), "got {err:?}");
}

#[test]
fn search_report_becomes_ordered_hits_with_previews() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("solar.txt"), "Solar panels on the barn roof.\n").unwrap();
    let engine = fake_engine(
        tmp.path(),
        &format!(
            r#"[ "$1" = "search" ] || exit 9
echo "Loading index..."
echo "Found 3 results:"
echo "1. Document: {d}/solar.txt (Score: 0.9500)"
echo "2. Document: {d}//./gone.txt (Score: 0.4000)"
echo "3. Document: {d}/solar.txt (Score: 0.1000)""#,
            d = docs.display()
        ),
    );

    let backend = EngineSearch::from_settings(&Settings { engine: settings_for(&engine), ..Settings::default() }).unwrap();
    let hits = backend.search("solar").unwrap();

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].preview, "Solar panels on the barn roof.");
    assert_eq!(hits[1].doc_path, docs.join("gone.txt").to_string_lossy());
    assert_eq!(hits[1].preview, MISSING_DOCUMENT);
    assert_eq!(hits.iter().map(|h| h.score).collect::<Vec<_>>(), vec![0.95, 0.4, 0.1]);
}

#[test]
fn query_is_trimmed_and_passed_as_one_argument() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let engine = fake_engine(tmp.path(), "echo \"Found 1 results:\"\necho \"1. Document: /q/$2 (Score: 1.0)\"");
    let client = EngineClient::new(&settings_for(&engine)).unwrap();
    let backend = EngineSearch::new(client, Default::default());

    let hits = backend.search("  rain barrels \n").unwrap();
    assert_eq!(hits[0].doc_path, "/q/rain barrels");
}

#[test]
fn blank_query_never_invokes_the_engine() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let engine = fake_engine(tmp.path(), "exit 1");
    let backend = EngineSearch::new(EngineClient::new(&settings_for(&engine)).unwrap(), Default::default());
    assert!(backend.search("   ").unwrap().is_empty());
}

#[test]
fn non_zero_exit_is_an_invocation_failure() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let engine = fake_engine(tmp.path(), "echo 'index not found' >&2\nexit 3");
    let client = EngineClient::new(&settings_for(&engine)).unwrap();

    match client.query("solar") {
        Err(EngineError::InvocationFailed { exit_code, stderr }) => {
            assert_eq!(exit_code, Some(3));
            assert_eq!(stderr.trim(), "index not found");
        }
        other => panic!("expected invocation failure, got {other:?}"),
    }
}

#[test]
fn zero_matches_is_a_success() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let engine = fake_engine(tmp.path(), "echo 'Found 0 results:'");
    let backend = EngineSearch::new(EngineClient::new(&settings_for(&engine)).unwrap(), Default::default());
    assert!(backend.search("nothing").unwrap().is_empty());
}

#[test]
fn slow_engine_is_killed_after_the_timeout() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let engine = fake_engine(tmp.path(), "exec sleep 5");
    let client = EngineClient::new(&settings_for(&engine)).unwrap().with_timeout(Some(Duration::from_millis(200)));

    let started = std::time::Instant::now();
    let err = client.query("solar").unwrap_err();
    assert!(matches!(err, EngineError::Timeout { .. }), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
fn build_index_passes_an_absolute_directory_and_captures_output() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");
    fs::create_dir(&docs).unwrap();
    let work = tmp.path().join("work");
    fs::create_dir(&work).unwrap();
    let engine = fake_engine(tmp.path(), "echo \"indexing $1 from $(pwd)\"\necho 'skipped 1 file' >&2");
    let settings = EngineSettings { working_dir: Some(work.to_string_lossy().into_owned()), ..settings_for(&engine) };
    let client = EngineClient::new(&settings).unwrap();
    assert_eq!(client.index_dir(), work.join("index_data"));

    let output = client.build_index(&docs).unwrap();

    assert_eq!(output.exit_code, Some(0));
    let expected_work = fs::canonicalize(&work).unwrap();
    assert_eq!(output.stdout.trim(), format!("indexing {} from {}", docs.display(), expected_work.display()));
    assert_eq!(output.stderr.trim(), "skipped 1 file");
}

#[test]
fn build_index_rejects_missing_directory() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    let engine = fake_engine(tmp.path(), "exit 0");
    let client = EngineClient::new(&settings_for(&engine)).unwrap();
    let err = client.build_index(&tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, EngineError::InvalidDocumentDir { .. }), "got {err:?}");
}

#[test]
fn suggestions_come_from_engine_previews() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "Air drying herbs: airflow matters, aim for shade.").unwrap();
    let engine = fake_engine(
        tmp.path(),
        &format!("echo 'Found 1 results:'\necho '1. Document: {}/a.txt (Score: 0.5)'", tmp.path().display()),
    );
    let backend: Arc<dyn SearchBackend> = Arc::new(EngineSearch::new(EngineClient::new(&settings_for(&engine)).unwrap(), Default::default()));
    let deriver = SuggestionDeriver::new(backend, &SuggestSettings::default());

    assert!(deriver.suggest("a").is_empty());
    let got = deriver.suggest("ai");
    assert_eq!(got, vec!["ai", "aim", "air", "airflow"]);
}
