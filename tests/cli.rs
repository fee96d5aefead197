use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn planner(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("planner").unwrap();
    cmd.env("PLANNER_DATA_DIR", dir.path()).env_remove("PLANNER_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    planner(&dir).arg("init").assert().success();
    dir
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    planner(&dir)
        .args(["budget", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("planner init"));
}

#[test]
fn init_seeds_categories_once() {
    let dir = initialized();

    planner(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Emergency Fund"));

    planner(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default category groups").not());
}

#[test]
fn assigned_money_rolls_into_next_month() {
    let dir = initialized();

    planner(&dir)
        .args(["account", "create", "Checking", "--balance", "1000"])
        .assert()
        .success();
    planner(&dir)
        .args(["budget", "assign", "Groceries", "100", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready to Assign: $900.00"));
    planner(&dir)
        .args([
            "txn", "add", "Checking", "-30", "--category", "Groceries", "--date", "2025-01-20",
            "--payee", "Grocer",
        ])
        .assert()
        .success();

    planner(&dir)
        .args(["budget", "show", "--month", "2025-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("February 2025"))
        .stdout(predicate::str::contains("$70.00"))
        .stdout(predicate::str::contains("Ready to Assign: $900.00"));
}

#[test]
fn currency_settings_change_output() {
    let dir = initialized();

    planner(&dir)
        .args(["config", "--currency", "€", "--decimal-separator", ","])
        .assert()
        .success();
    planner(&dir)
        .args(["account", "create", "Cash", "--account-type", "cash", "--balance", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€70,00"));
}

#[test]
fn bad_month_key_is_rejected() {
    let dir = initialized();

    planner(&dir)
        .args(["budget", "show", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn move_more_than_assigned_fails() {
    let dir = initialized();

    planner(&dir)
        .args(["budget", "assign", "Groceries", "50", "--month", "2025-01"])
        .assert()
        .success();
    planner(&dir)
        .args(["budget", "move", "Groceries", "Dining Out", "60", "--month", "2025-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds"));
}

#[test]
fn skipped_occurrence_is_left_out_of_agenda() {
    let dir = initialized();

    planner(&dir)
        .args([
            "event", "add", "Standup", "--start", "2025-01-06 09:00", "--end", "2025-01-06 10:00",
            "--repeat", "weekly",
        ])
        .assert()
        .success();
    planner(&dir)
        .args(["event", "skip", "Standup", "2025-01-13"])
        .assert()
        .success();

    planner(&dir)
        .args(["event", "agenda", "--from", "2025-01-01", "--to", "2025-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-06"))
        .stdout(predicate::str::contains("2025-01-20"))
        .stdout(predicate::str::contains("2025-01-27"))
        .stdout(predicate::str::contains("2025-01-13").not());

    planner(&dir)
        .args(["event", "show", "Standup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-13  skipped"));
}

#[test]
fn editing_a_non_occurrence_fails() {
    let dir = initialized();

    planner(&dir)
        .args([
            "event", "add", "Standup", "--start", "2025-01-06 09:00", "--end", "2025-01-06 10:00",
            "--repeat", "weekly",
        ])
        .assert()
        .success();
    planner(&dir)
        .args(["event", "edit", "Standup", "2025-01-07", "--start", "2025-01-07 11:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an occurrence"));
}

#[test]
fn unknown_frequency_is_invalid_rule() {
    let dir = initialized();

    planner(&dir)
        .args([
            "event", "add", "Pills", "--start", "2025-01-01 08:00", "--end", "2025-01-01 08:05",
            "--repeat", "hourly",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid recurrence rule"));
}

#[test]
fn exports_budget_and_agenda() {
    let dir = initialized();

    planner(&dir)
        .args(["export", "budget", "--month", "2025-01", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Month,Group,Category,Assigned,Activity,Available,Target,Needed",
        ))
        .stdout(predicate::str::contains("2025-01,Needs,Groceries,0.00,0.00,0.00,,"));

    planner(&dir)
        .args([
            "event", "add", "Dentist", "--start", "2025-01-14 15:00", "--end", "2025-01-14 16:00",
        ])
        .assert()
        .success();

    let out_file = dir.path().join("agenda.json");
    planner(&dir)
        .args(["export", "agenda", "--from", "2025-01-01", "--to", "2025-01-31", "--output"])
        .arg(&out_file)
        .assert()
        .success();

    let json = std::fs::read_to_string(&out_file).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["data"]["entries"][0]["title"], "Dentist");
    assert_eq!(parsed["data"]["entries"][0]["kind"], "single");
}

#[test]
fn audit_log_lists_changes() {
    let dir = initialized();

    planner(&dir)
        .args(["account", "create", "Checking"])
        .assert()
        .success();

    planner(&dir)
        .args(["log", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking"));
}
