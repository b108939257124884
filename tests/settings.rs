mod common;

use qesview::data::MemorySource;
use qesview::session::{Playback, QesSettings};
use qesview::ErrorKind;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

type Log = Rc<RefCell<Vec<String>>>;

/// Record every notification of `settings` into a shared log.
fn record(settings: &mut QesSettings) -> Log {
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    settings
        .dataset_changed
        .subscribe(move |view| {
            l.borrow_mut().push(format!("dataset:{}", view.timestep_count()))
        });
    let l = Rc::clone(&log);
    settings
        .timestep_changed
        .subscribe(move |view| {
            l.borrow_mut().push(format!("timestep:{}", view.current_timestep()))
        });
    let l = Rc::clone(&log);
    settings
        .interactive_changed
        .subscribe(move |view| {
            l.borrow_mut().push(format!("interactive:{}", view.is_interactive()))
        });

    log
}

#[test]
fn new_settings_are_unloaded() {
    let settings = QesSettings::new();
    assert!(settings.reader().is_none());
    assert!(settings.source().is_none());
    assert_eq!(settings.current_timestep(), 0);
    assert!(!settings.is_interactive());
}

#[test]
fn load_directory_fires_dataset_then_interactive() {
    let dir = common::dataset();
    let mut settings = QesSettings::new();
    let log = record(&mut settings);

    settings.load_directory(dir.path()).unwrap();

    assert!(settings.reader().is_some());
    assert!(settings.is_interactive());
    assert_eq!(settings.current_timestep(), 0);
    assert_eq!(*log.borrow(), vec!["dataset:3", "interactive:true"]);
}

#[test]
fn reload_resets_timestep_without_timestep_event() {
    let dir = common::dataset();
    let mut settings = QesSettings::new();
    settings.load_directory(dir.path()).unwrap();
    settings.seek_to(2);

    let log = record(&mut settings);
    settings.load_directory(dir.path()).unwrap();

    assert_eq!(settings.current_timestep(), 0);
    // Already interactive, so only the dataset notification fires.
    assert_eq!(*log.borrow(), vec!["dataset:3"]);
}

#[test]
fn load_missing_directory_fails_and_deactivates() {
    let dir = common::dataset();
    let mut settings = QesSettings::new();
    settings.load_directory(dir.path()).unwrap();
    let log = record(&mut settings);

    let err = settings
        .load_directory(dir.path().join("does-not-exist"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(settings.reader().is_none());
    assert!(settings.source().is_none());
    assert!(!settings.is_interactive());
    assert_eq!(*log.borrow(), vec!["interactive:false"]);
}

#[test]
fn load_nonexistent_path_from_fresh_session() {
    let mut settings = QesSettings::new();
    let err = settings.load_directory("/no/such/qes/export").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(settings.reader().is_none());
    assert!(!settings.is_interactive());
}

#[test]
fn load_bad_manifest_is_all_or_nothing() {
    let dir = common::dataset_with_manifest("<Settings><Scene><Tree/></Scene></Settings>");
    let mut settings = QesSettings::new();
    let log = record(&mut settings);

    let err = settings.load_directory(dir.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(settings.reader().is_none());
    // Interactive was already false: nothing to notify.
    assert!(log.borrow().is_empty());
}

#[test]
fn load_source_accepts_any_backend() {
    let source = MemorySource::new().with_file("structure.xml", common::MANIFEST);
    let mut settings = QesSettings::new();
    settings.load_source(Arc::new(source)).unwrap();

    let reader = settings.reader().unwrap();
    assert_eq!(reader.timestep_count(), 3);
    assert_eq!(
        settings.source().unwrap().list_files().unwrap(),
        vec!["structure.xml"]
    );
}

#[test]
fn seek_to_is_idempotent() {
    let dir = common::dataset();
    let mut settings = QesSettings::new();
    settings.load_directory(dir.path()).unwrap();
    let log = record(&mut settings);

    settings.seek_to(5);
    settings.seek_to(5);

    assert_eq!(settings.current_timestep(), 5);
    assert_eq!(*log.borrow(), vec!["timestep:5"]);
}

#[test]
fn seek_clamped_stays_in_range() {
    let dir = common::dataset();
    let mut settings = QesSettings::new();
    settings.seek_clamped(4);
    assert_eq!(settings.current_timestep(), 0);

    settings.load_directory(dir.path()).unwrap();
    settings.seek_clamped(40);
    assert_eq!(settings.current_timestep(), 2);
}

#[test]
fn set_interactive_only_fires_on_change() {
    let mut settings = QesSettings::new();
    let log = record(&mut settings);

    settings.set_interactive(false);
    settings.set_interactive(true);
    settings.set_interactive(true);
    settings.set_interactive(false);

    assert_eq!(*log.borrow(), vec!["interactive:true", "interactive:false"]);
}

#[test]
fn unsubscribed_handlers_stop_receiving() {
    let mut settings = QesSettings::new();
    let hits = Rc::new(RefCell::new(0));
    let h = Rc::clone(&hits);
    let id = settings.timestep_changed.subscribe(move |_| *h.borrow_mut() += 1);

    settings.seek_to(1);
    assert!(settings.timestep_changed.unsubscribe(id));
    settings.seek_to(2);

    assert_eq!(*hits.borrow(), 1);
}

fn loaded() -> (tempfile::TempDir, QesSettings) {
    let dir = common::dataset();
    let mut settings = QesSettings::new();
    settings.load_directory(dir.path()).unwrap();
    (dir, settings)
}

#[test]
fn playback_advances_by_whole_frames() {
    let (_dir, mut settings) = loaded();
    let mut playback = Playback::new(0.5);
    playback.play();

    playback.tick(0.25, &mut settings);
    assert_eq!(settings.current_timestep(), 0);
    playback.tick(0.25, &mut settings);
    assert_eq!(settings.current_timestep(), 1);
    assert!(playback.is_playing());
}

#[test]
fn playback_stops_at_last_timestep() {
    let (_dir, mut settings) = loaded();
    let mut playback = Playback::new(0.5);
    playback.play();

    playback.tick(10.0, &mut settings);

    assert_eq!(settings.current_timestep(), 2);
    assert!(!playback.is_playing());
}

#[test]
fn paused_playback_does_nothing() {
    let (_dir, mut settings) = loaded();
    let mut playback = Playback::new(0.5);

    playback.tick(2.0, &mut settings);
    assert_eq!(settings.current_timestep(), 0);

    playback.toggle();
    assert!(playback.is_playing());
    playback.toggle();
    assert!(!playback.is_playing());
}

#[test]
fn interactive_change_stops_attached_playback() {
    let (_dir, mut settings) = loaded();
    let mut playback = Playback::new(0.5);
    let id = playback.attach(&mut settings);
    playback.play();

    settings.set_interactive(false);
    assert!(!playback.is_playing());

    assert!(playback.detach(&mut settings, id));
    playback.play();
    settings.set_interactive(true);
    assert!(playback.is_playing());
}

#[test]
fn scrub_pauses_and_seeks() {
    let (_dir, mut settings) = loaded();
    let mut playback = Playback::new(0.5);
    playback.play();

    playback.scrub(0, &mut settings);
    assert!(playback.is_playing());

    playback.scrub(2, &mut settings);
    assert!(!playback.is_playing());
    assert_eq!(settings.current_timestep(), 2);
}
