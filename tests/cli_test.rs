use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run pgsvc isolated from the caller's environment.
///
/// HOME and XDG_CONFIG_HOME point into the temp dir, so the default
/// service file is `<dir>/.pg_service.conf` and no user config leaks in.
fn pgsvc(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("pgsvc");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env_remove("PGSERVICEFILE")
        .env_remove("PGSYSCONFDIR")
        .env_remove("PGSVC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Temp dir holding `pg_service.conf` with the given content.
fn service_file(content: &str) -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("pg_service.conf").write_str(content).unwrap();
    dir
}

fn read(dir: &assert_fs::TempDir) -> String {
    std::fs::read_to_string(dir.path().join("pg_service.conf")).unwrap()
}

// ─── Path resolution ────────────────────────────────────────────

#[test]
fn path_reports_missing_default_file() {
    let dir = assert_fs::TempDir::new().unwrap();

    pgsvc(&dir)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service file not found"))
        .stdout(predicate::str::contains(".pg_service.conf"));

    dir.child(".pg_service.conf").assert(predicate::path::missing());
}

#[test]
fn path_create_makes_empty_default_file() {
    let dir = assert_fs::TempDir::new().unwrap();

    pgsvc(&dir)
        .args(["path", "--create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service file:"));

    dir.child(".pg_service.conf").assert("");
}

#[test]
fn pgservicefile_variable_selects_file() {
    let dir = service_file("[from-env]\nhost=h\n");

    pgsvc(&dir)
        .env("PGSERVICEFILE", dir.path().join("pg_service.conf"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env"));
}

#[test]
fn pgsysconfdir_variable_selects_directory() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("etc/pg_service.conf")
        .write_str("[system]\nhost=h\n")
        .unwrap();

    pgsvc(&dir)
        .env("PGSYSCONFDIR", dir.path().join("etc"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("system"));
}

#[test]
fn file_flag_beats_environment() {
    let dir = service_file("[from-flag]\n");
    dir.child("other.conf").write_str("[from-env]\n").unwrap();

    pgsvc(&dir)
        .env("PGSERVICEFILE", dir.path().join("other.conf"))
        .args(["list", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from-flag"))
        .stdout(predicate::str::contains("from-env").not());
}

#[test]
fn list_without_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    pgsvc(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Service file not found"));
}

// ─── Reading ────────────────────────────────────────────────────

#[test]
fn list_in_file_order_and_sorted() {
    let dir = service_file("[zeta]\n\n[Alpha]\n\n[beta]\n");

    pgsvc(&dir)
        .args(["list", "--json", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"(?s)"zeta".*"Alpha".*"beta""#).unwrap());

    pgsvc(&dir)
        .args(["list", "--sort", "--json", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"(?s)"Alpha".*"beta".*"zeta""#).unwrap());
}

#[test]
fn list_empty_file_warns() {
    let dir = service_file("");

    pgsvc(&dir)
        .args(["list", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No services defined"));
}

#[test]
fn malformed_file_is_reported() {
    let dir = service_file("host=orphan\n[db]\n");

    pgsvc(&dir)
        .args(["list", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn show_unknown_service_fails() {
    let dir = service_file("[db]\nhost=h\n");

    pgsvc(&dir)
        .args(["show", "nope", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Service 'nope' not found"));
}

#[test]
fn export_prints_exact_block() {
    let dir = service_file("# shared\n[db1]\nhost = localhost\nport = 5432\n");

    pgsvc(&dir)
        .args(["export", "db1", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout("[db1]\nhost=localhost\nport=5432\n");
}

// ─── Writing ────────────────────────────────────────────────────

#[test]
fn create_copy_and_missing_source_scenario() {
    let dir = service_file("");

    pgsvc(&dir)
        .args([
            "create", "db1", "--set", "host=localhost", "--set", "port=5432", "--set",
            "dbname=test", "--file", "pg_service.conf",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service 'db1' created with 3 setting(s)"));

    assert_eq!(read(&dir), "[db1]\nhost=localhost\nport=5432\ndbname=test\n");

    pgsvc(&dir)
        .args(["copy", "db1", "db2", "--file", "pg_service.conf"])
        .assert()
        .success();

    pgsvc(&dir)
        .args(["show", "db2", "--json", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""host": "localhost""#))
        .stdout(predicate::str::contains(r#""dbname": "test""#));

    let before = read(&dir);
    pgsvc(&dir)
        .args(["copy", "db3", "db1", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Service 'db3' not found"));
    assert_eq!(read(&dir), before);
}

#[test]
fn create_existing_service_fails_without_writing() {
    let original = "[db1]\nhost = keep-my-spacing\n";
    let dir = service_file(original);

    pgsvc(&dir)
        .args(["create", "db1", "--set", "host=x", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(read(&dir), original);
}

#[test]
fn create_with_template() {
    let dir = service_file("");

    pgsvc(&dir)
        .args(["create", "fresh", "--template", "--set", "port=6543"])
        .args(["--file", "pg_service.conf"])
        .assert()
        .success();

    assert_eq!(read(&dir), "[fresh]\nhost=localhost\nport=6543\ndbname=test\n");
}

#[test]
fn create_with_blank_name_fails() {
    let dir = service_file("");

    pgsvc(&dir)
        .args(["create", " ", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid service name"));
}

#[test]
fn set_merges_and_writes_without_spaces() {
    let dir = service_file("[db]\nhost = old\nport = 5432\n");

    pgsvc(&dir)
        .args(["set", "db", "host=new", "sslmode=require", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service 'db' updated"));

    assert_eq!(read(&dir), "[db]\nhost=new\nport=5432\nsslmode=require\n");
}

#[test]
fn set_warns_about_unknown_choice() {
    let dir = service_file("[db]\nhost=h\n");

    pgsvc(&dir)
        .args(["set", "db", "sslmode=sometimes", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not a valid sslmode"));
}

#[test]
fn set_same_values_writes_nothing() {
    let original = "[db]\nhost = h\n";
    let dir = service_file(original);

    pgsvc(&dir)
        .args(["set", "db", "host=h", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to write"));

    assert_eq!(read(&dir), original);
}

#[test]
fn set_blank_value_is_refused() {
    let original = "[db]\nhost=h\n";
    let dir = service_file(original);

    pgsvc(&dir)
        .args(["set", "db", "user=", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Settings 'user' have empty values"));

    assert_eq!(read(&dir), original);
}

#[test]
fn set_rejects_malformed_assignment() {
    let dir = service_file("[db]\n");

    pgsvc(&dir)
        .args(["set", "db", "hostlocalhost", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected key=value"));
}

#[test]
fn set_value_with_line_break_is_refused() {
    let original = "[db]\nhost=h\n";
    let dir = service_file(original);

    pgsvc(&dir)
        .args(["set", "db", "host=a\nhost=b", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid setting 'host'"));

    assert_eq!(read(&dir), original);
}

#[test]
fn unset_removes_keys() {
    let dir = service_file("[db]\nhost=h\nuser=u\npassword=p\n");

    pgsvc(&dir)
        .args(["unset", "db", "user", "password", "--file", "pg_service.conf"])
        .assert()
        .success();

    assert_eq!(read(&dir), "[db]\nhost=h\n");
}

#[test]
fn rename_and_remove() {
    let dir = service_file("[a]\nhost=1\n\n[b]\nhost=2\n");

    pgsvc(&dir)
        .args(["rename", "a", "c", "--file", "pg_service.conf"])
        .assert()
        .success();
    pgsvc(&dir)
        .args(["remove", "b", "--file", "pg_service.conf"])
        .assert()
        .success();

    assert_eq!(read(&dir), "[c]\nhost=1\n");
}

#[test]
fn untouched_sections_and_comments_survive_a_write() {
    let dir = service_file("# team services\n\n[keep]\n; do not edit\nhost=a\n\n[edit]\nhost=b\n");

    pgsvc(&dir)
        .args(["set", "edit", "host=c", "--file", "pg_service.conf"])
        .assert()
        .success();

    assert_eq!(
        read(&dir),
        "# team services\n\n[keep]\n; do not edit\nhost=a\n\n[edit]\nhost=c\n"
    );
}

#[cfg(unix)]
#[test]
fn read_only_file_is_relaxed_and_written() {
    use std::os::unix::fs::PermissionsExt;

    let dir = service_file("[db]\nhost=h\n");
    let path = dir.path().join("pg_service.conf");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

    pgsvc(&dir)
        .args(["set", "db", "host=new", "--file", "pg_service.conf"])
        .assert()
        .success();

    assert_eq!(read(&dir), "[db]\nhost=new\n");
}

// ─── Validation and reference data ──────────────────────────────

#[test]
fn check_reports_blank_values() {
    let dir = service_file("[db]\nhost=h\npassword=\nuser=  \n");

    pgsvc(&dir)
        .args(["check", "db", "--file", "pg_service.conf"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Settings with empty values (2)"))
        .stdout(predicate::str::contains("password"))
        .stdout(predicate::str::contains("user"));
}

#[test]
fn check_passes_complete_service() {
    let dir = service_file("[db]\nhost=h\nport=5432\n");

    pgsvc(&dir)
        .args(["check", "db", "--file", "pg_service.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 settings, all with values"));
}

#[test]
fn settings_lists_descriptors() {
    let dir = assert_fs::TempDir::new().unwrap();

    pgsvc(&dir)
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("sslmode"))
        .stdout(predicate::str::contains("verify-full"))
        .stdout(predicate::str::contains("[directory]"));

    pgsvc(&dir)
        .args(["settings", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "choice""#));
}

// ─── Tool configuration ─────────────────────────────────────────

#[test]
fn config_file_sets_service_file_and_sort_order() {
    let dir = service_file("[zeta]\n\n[alpha]\n");
    dir.child("pgsvc.toml")
        .write_str(&format!(
            "service_file = {:?}\nsort_services = true\n",
            dir.path().join("pg_service.conf")
        ))
        .unwrap();

    pgsvc(&dir)
        .args(["list", "--json", "--config", "pgsvc.toml"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"(?s)"alpha".*"zeta""#).unwrap());
}

#[test]
fn invalid_config_is_reported() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("pgsvc.toml").write_str("sort_services = maybe\n").unwrap();

    pgsvc(&dir)
        .env("PGSVC_CONFIG", dir.path().join("pgsvc.toml"))
        .arg("settings")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
