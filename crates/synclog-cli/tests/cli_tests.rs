use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BROKEN: &str = "Header\n2023/06/01 08:00:00:000  Calendars:\n2023/06/01 08:00:00:001  \tWork, nobody, cal-1";

/// Temporary working area with its own config path
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    fn config_path(&self) -> PathBuf {
        self.path("config/config.toml")
    }

    /// Copy the parser's sample log into the fixture
    fn copy_sample(&self, dest_name: &str) -> PathBuf {
        let source = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("synclog-parser/tests/samples/calendar_agent.log");
        let dest = self.path(dest_name);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::copy(source, &dest).expect("Failed to copy sample log");
        dest
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("synclog").expect("Failed to find synclog binary");
        cmd.arg("--config").arg(self.config_path());
        cmd
    }
}

#[test]
fn test_parse_prints_accounts_and_calendars() {
    let fixture = TestFixture::new();
    let log = fixture.copy_sample("agent.log");

    fixture
        .command()
        .arg("parse")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("System version: Version 13.4 (Build 22F66)"))
        .stdout(predicate::str::contains("Accounts:       2 (3 calendars)"))
        .stdout(predicate::str::contains("iCloud [5C1A7E2B-ICLOUD]"))
        .stdout(predicate::str::contains(
            "Icon: https://icons.duckduckgo.com/ip3/icloud.com.ico",
        ))
        .stdout(predicate::str::contains(
            "Sync: synced 2023-06-01 07:58:12 UTC, 2 queued items",
        ))
        .stdout(predicate::str::contains("Sync: never synced, 0 queued items"))
        .stdout(predicate::str::contains("Work [CAL-WORK] #3366CC"));
}

#[test]
fn test_parse_json_prints_documents() {
    let fixture = TestFixture::new();
    let log = fixture.copy_sample("agent.log");

    let output = fixture
        .command()
        .arg("--format")
        .arg("json")
        .arg("parse")
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let documents: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let document = &documents[0];
    assert_eq!(document["LogFile"], log.display().to_string());
    assert_eq!(
        document["Accounts"]["5C1A7E2B-ICLOUD"]["SyncQueue"]["LastSync"],
        "2023-06-01T07:58:12Z"
    );
    assert_eq!(
        document["Accounts"]["9F03-EXCH"]["Calendars"]["CAL-MEET"]["Title"],
        "Meetings"
    );
}

#[test]
fn test_failing_source_does_not_block_others() {
    let fixture = TestFixture::new();
    let dir = fixture.path("logs");
    fixture.copy_sample("logs/a.log");
    fs::write(dir.join("b.log"), BROKEN).unwrap();
    fixture.copy_sample("logs/c.log");

    fixture
        .command()
        .arg("parse")
        .arg(&dir)
        .assert()
        .failure()
        .stdout(predicate::str::contains("a.log"))
        .stdout(predicate::str::contains("c.log"))
        .stderr(predicate::str::contains("b.log"))
        .stderr(predicate::str::contains("unknown account 'nobody'"))
        .stderr(predicate::str::contains("1 of 3 sources failed"));
}

#[test]
fn test_export_writes_documents() {
    let fixture = TestFixture::new();
    let log = fixture.copy_sample("agent.log");

    fixture
        .command()
        .arg("export")
        .arg(&log)
        .assert()
        .success();

    let document = fixture.path("agent.log.json");
    assert!(document.exists());

    // Exported documents are sources in their own right
    fixture
        .command()
        .arg("parse")
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains("Work [CAL-WORK] #3366CC"));
}

#[test]
fn test_export_into_out_dir() {
    let fixture = TestFixture::new();
    let log = fixture.copy_sample("agent.log");
    let out_dir = fixture.path("out");

    fixture
        .command()
        .arg("export")
        .arg(&log)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let text = fs::read_to_string(out_dir.join("agent.log.json")).unwrap();
    assert!(text.contains("\"HeaderLine\""));
    assert!(!fixture.path("agent.log.json").exists());
}

#[test]
fn test_config_init_and_show() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("config")
        .arg("init")
        .assert()
        .success();
    assert!(fixture.config_path().exists());

    fixture
        .command()
        .arg("config")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fixture
        .command()
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("[sources]"))
        .stdout(predicate::str::contains("pretty = true"));
}

#[test]
fn test_config_extensions_are_honored() {
    let fixture = TestFixture::new();
    let log = fixture.copy_sample("agent.txt");

    fixture
        .command()
        .arg("parse")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    fs::create_dir_all(fixture.config_path().parent().unwrap()).unwrap();
    fs::write(
        fixture.config_path(),
        "[sources]\nlog_extensions = [\"txt\"]\n",
    )
    .unwrap();

    fixture
        .command()
        .arg("parse")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("iCloud [5C1A7E2B-ICLOUD]"));
}

#[test]
fn test_missing_arguments_fail() {
    let fixture = TestFixture::new();
    fixture.command().arg("parse").assert().failure();
}
