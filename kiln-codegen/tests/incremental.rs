use std::{
    fs,
    io::Write,
    path::Path,
    time::{Duration, SystemTime},
};

use kiln_codegen::{
    incremental::{Fingerprint, InputSet, Staleness, StalenessTracker},
    pipeline::{GenerationContext, ProjectInfo},
};
use kiln_core::{Coordinates, OutputLayout};
use tempfile::TempDir;
use zip::write::FileOptions;

fn coordinates() -> Coordinates {
    Coordinates::new("org.acme", "camel-foo", "1.0.0")
}

fn fingerprint(configuration: &str) -> Fingerprint {
    let ctx = GenerationContext::new(
        ProjectInfo::new(coordinates()),
        OutputLayout::new("/out/java", "/out/resources"),
    );
    Fingerprint::compute("bean", configuration, &ctx)
}

fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

fn write_jar(path: &Path, entry_time: zip::DateTime) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default().last_modified_time(entry_time);
    zip.start_file("org/acme/Foo.class", options).unwrap();
    zip.write_all(b"\xCA\xFE\xBA\xBE").unwrap();
    zip.finish().unwrap();
}

struct Fixture {
    temp: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/Foo.java"), "class Foo {}").unwrap();
        set_mtime(
            &temp.path().join("src/Foo.java"),
            SystemTime::now() - Duration::from_secs(3600),
        );
        Self { temp }
    }

    fn inputs(&self) -> InputSet {
        InputSet::new()
            .source_root(self.temp.path().join("src"))
            .classes_dir(self.temp.path().join("classes"))
            .dependency(self.temp.path().join("lib/dep.jar"))
    }

    fn tracker(&self) -> StalenessTracker {
        StalenessTracker::new(
            &self.temp.path().join("cache"),
            &coordinates(),
            "bean",
            self.inputs(),
        )
    }
}

#[test]
fn test_cache_file_name() {
    let fixture = Fixture::new();
    assert_eq!(
        fixture.tracker().cache_file(),
        fixture.temp.path().join("cache/org.acme_camel-foo_bean.json")
    );
}

#[test]
fn test_first_run_then_up_to_date() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    let fp = fingerprint("enabled=true");

    assert_eq!(tracker.check(&fp), Staleness::NoPreviousRun);
    assert!(!tracker.should_skip(&fp));

    tracker.record(&fp).unwrap();
    assert_eq!(tracker.check(&fp), Staleness::UpToDate);
    assert!(tracker.should_skip(&fp));
}

#[test]
fn test_configuration_change() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    tracker.record(&fingerprint("enabled=true")).unwrap();
    assert_eq!(
        tracker.check(&fingerprint("enabled=true;marker=x")),
        Staleness::ConfigurationChanged
    );
}

#[test]
fn test_project_name_change() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    let layout = OutputLayout::new("/out/java", "/out/resources");
    let before = GenerationContext::new(
        ProjectInfo::new(coordinates()).with_name("Camel :: Foo"),
        layout.clone(),
    );
    let after = GenerationContext::new(
        ProjectInfo::new(coordinates()).with_name("Camel :: Renamed"),
        layout,
    );
    tracker
        .record(&Fingerprint::compute("bean", "enabled=true", &before))
        .unwrap();
    assert_eq!(
        tracker.check(&Fingerprint::compute("bean", "enabled=true", &after)),
        Staleness::ConfigurationChanged
    );
}

#[test]
fn test_touched_source_is_stale() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    let fp = fingerprint("enabled=true");
    tracker.record(&fp).unwrap();

    let source = fixture.temp.path().join("src/Foo.java");
    set_mtime(&source, SystemTime::now() + Duration::from_secs(60));
    assert_eq!(tracker.check(&fp), Staleness::StaleInputs(vec![source]));
}

#[test]
fn test_newer_jar_entry_is_stale() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    let fp = fingerprint("enabled=true");
    let jar = fixture.temp.path().join("lib/dep.jar");
    fs::create_dir_all(jar.parent().unwrap()).unwrap();

    write_jar(&jar, zip::DateTime::from_date_and_time(1990, 1, 1, 0, 0, 0).unwrap());
    tracker.record(&fp).unwrap();
    assert!(tracker.should_skip(&fp));

    write_jar(&jar, zip::DateTime::from_date_and_time(2099, 1, 1, 0, 0, 0).unwrap());
    set_mtime(&jar, SystemTime::now() + Duration::from_secs(60));
    match tracker.check(&fp) {
        Staleness::StaleInputs(paths) => {
            assert_eq!(paths.len(), 1);
            assert!(paths[0].to_string_lossy().ends_with("dep.jar!/org/acme/Foo.class"));
        }
        other => panic!("unexpected staleness: {:?}", other),
    }
}

#[test]
fn test_jar_entry_capped_at_archive_mtime() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    let fp = fingerprint("enabled=true");
    let jar = fixture.temp.path().join("lib/dep.jar");
    fs::create_dir_all(jar.parent().unwrap()).unwrap();

    // Entry stamped ahead of the archive, as a zone east of UTC would.
    write_jar(&jar, zip::DateTime::from_date_and_time(2099, 1, 1, 0, 0, 0).unwrap());
    set_mtime(&jar, SystemTime::now() - Duration::from_secs(3600));
    tracker.record(&fp).unwrap();
    assert_eq!(tracker.check(&fp), Staleness::UpToDate);
}

#[test]
fn test_jar_entry_in_local_time_west_of_utc_is_stale() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    let fp = fingerprint("enabled=true");
    tracker.record(&fp).unwrap();
    // Last run at 2020-06-01 12:00 UTC.
    let recorded = SystemTime::UNIX_EPOCH + Duration::from_secs(1_591_012_800);
    set_mtime(&tracker.cache_file(), recorded);
    set_mtime(&fixture.temp.path().join("src/Foo.java"), recorded - Duration::from_secs(3600));

    // Rebuilt at 12:30 UTC by a tool stamping UTC-5 local time.
    let jar = fixture.temp.path().join("lib/dep.jar");
    fs::create_dir_all(jar.parent().unwrap()).unwrap();
    write_jar(&jar, zip::DateTime::from_date_and_time(2020, 6, 1, 7, 30, 0).unwrap());
    set_mtime(&jar, recorded + Duration::from_secs(1800));
    assert!(matches!(tracker.check(&fp), Staleness::StaleInputs(_)));

    // Untouched archives stay fresh whatever their entries claim.
    set_mtime(&jar, recorded - Duration::from_secs(60));
    assert_eq!(tracker.check(&fp), Staleness::UpToDate);
}

#[test]
fn test_corrupt_record_is_a_miss() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    fs::create_dir_all(tracker.cache_file().parent().unwrap()).unwrap();
    fs::write(tracker.cache_file(), "not json").unwrap();
    assert_eq!(
        tracker.check(&fingerprint("enabled=true")),
        Staleness::NoPreviousRun
    );
}

#[test]
fn test_clear() {
    let fixture = Fixture::new();
    let tracker = fixture.tracker();
    assert!(!tracker.clear().unwrap());
    tracker.record(&fingerprint("x")).unwrap();
    assert!(tracker.clear().unwrap());
    assert!(!tracker.cache_file().exists());
}
