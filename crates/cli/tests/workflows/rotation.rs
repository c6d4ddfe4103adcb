//! Retention outcomes observed through the binary

use crate::bakrot;
use crate::common::fixtures::TODAY;
use crate::common::BackupDir;
use anyhow::Result;

#[test]
fn test_daily_history_is_thinned() -> Result<()> {
    let dir = BackupDir::new(7, 4, 3)?;
    dir.add_daily("db1", 1..=400)?;

    let config = dir.config_arg();
    let backups = dir.backups_arg();
    let result = bakrot!(dir.root(), "--config", &config, "--today", TODAY, &backups)
        .assert_success()?;

    assert!(result.contains_stdout("Deleted 387 backups"));
    assert_eq!(result.deleting_lines(), 387);

    // Recent window untouched
    for age in 1..=6 {
        assert!(dir.has_backup("db1", age), "recent day {} removed", age);
    }

    // Oldest backup of each week and month survives
    for age in [13, 20, 27, 34, 64, 94, 124] {
        assert!(dir.has_backup("db1", age), "survivor day {} removed", age);
    }

    // Everything past the horizon is gone
    assert!(!dir.has_backup("db1", 125));
    assert!(!dir.has_backup("db1", 400));
    assert_eq!(dir.file_names()?.len(), 13);
    Ok(())
}

#[test]
fn test_second_run_deletes_nothing() -> Result<()> {
    let dir = BackupDir::new(7, 4, 3)?;
    dir.add_daily("db1", 0..=200)?;

    let config = dir.config_arg();
    let backups = dir.backups_arg();
    bakrot!(dir.root(), "--config", &config, "--today", TODAY, &backups).assert_success()?;
    let after_first = dir.file_names()?;

    let result = bakrot!(dir.root(), "--config", &config, "--today", TODAY, &backups)
        .assert_success()?;

    assert!(result.contains_stdout("Deleted 0 backups"));
    assert_eq!(dir.file_names()?, after_first);
    Ok(())
}

#[test]
fn test_non_backups_are_ignored() -> Result<()> {
    let dir = BackupDir::new(0, 0, 0)?;
    dir.add_file("readme.txt")?;
    dir.add_file("obj_2024-01-01.bak")?;
    dir.add_file("obj_99999999.bak")?;
    dir.add_backup("db1", 3)?;

    let config = dir.config_arg();
    let backups = dir.backups_arg();
    let result = bakrot!(dir.root(), "--config", &config, "--today", TODAY, &backups)
        .env("RUST_LOG", "debug")
        .assert_success()?;

    // With no windows configured every real backup is remainder
    assert!(result.contains_stdout("Deleted 1 backups"));
    assert_eq!(result.skipping_lines(), 3);
    assert_eq!(
        dir.file_names()?,
        vec!["obj_2024-01-01.bak", "obj_99999999.bak", "readme.txt"]
    );
    Ok(())
}

#[test]
fn test_objects_are_planned_independently() -> Result<()> {
    let dir = BackupDir::new(2, 1, 0)?;
    // Both objects share the same dates; each keeps its own survivor
    for object in ["sales", "crm"] {
        dir.add_daily(object, 0..=20)?;
    }

    let config = dir.config_arg();
    let backups = dir.backups_arg();
    bakrot!(dir.root(), "--config", &config, "--today", TODAY, &backups).assert_success()?;

    for object in ["sales", "crm"] {
        assert!(dir.has_backup(object, 0));
        assert!(dir.has_backup(object, 1));
        assert!(dir.has_backup(object, 8), "{} lost its weekly survivor", object);
        assert!(!dir.has_backup(object, 2));
        assert!(!dir.has_backup(object, 9));
    }
    assert_eq!(dir.file_names()?.len(), 6);
    Ok(())
}

#[test]
fn test_dry_run_keeps_files() -> Result<()> {
    let dir = BackupDir::new(7, 4, 3)?;
    dir.add_daily("db1", 1..=60)?;

    let config = dir.config_arg();
    let backups = dir.backups_arg();
    let result = bakrot!(
        dir.root(),
        "--config",
        &config,
        "--today",
        TODAY,
        "--dry-run",
        &backups
    )
    .assert_success()?;

    // 6 recent + 4 weekly + 1 monthly survivor
    assert!(result.contains_stdout("Would delete 49 backups"));
    assert_eq!(result.would_delete_lines(), 49 + 1);
    assert_eq!(result.deleting_lines(), 0);
    assert!(!result.contains_stderr("Deleted "));
    assert_eq!(dir.file_names()?.len(), 60);

    let mut logged = String::new();
    for entry in std::fs::read_dir(dir.log_dir())? {
        logged.push_str(&std::fs::read_to_string(entry?.path())?);
    }
    assert!(logged.contains("Would delete "));
    assert!(!logged.contains("Deleting "));
    assert!(!logged.contains("Deleted "));
    Ok(())
}

#[test]
fn test_log_file_is_written() -> Result<()> {
    let dir = BackupDir::new(7, 4, 3)?;
    dir.add_daily("db1", 1..=40)?;

    let config = dir.config_arg();
    let backups = dir.backups_arg();
    bakrot!(dir.root(), "--config", &config, "--today", TODAY, &backups).assert_success()?;

    let mut logged = String::new();
    for entry in std::fs::read_dir(dir.log_dir())? {
        logged.push_str(&std::fs::read_to_string(entry?.path())?);
    }

    assert!(logged.contains("Deleting "));
    assert!(logged.contains("Deleted "));
    Ok(())
}

#[test]
fn test_unusable_log_dir_still_cleans() -> Result<()> {
    let dir = BackupDir::new(7, 4, 3)?;
    dir.add_daily("db1", 1..=200)?;

    // A regular file where the log directory's parent should be
    let blocker = dir.root().join("blocker");
    std::fs::write(&blocker, b"")?;
    dir.write_config_with_logs(
        &blocker.join("logs"),
        "[rotation]\ndays = 7\nweeks = 4\nmonths = 3\n",
    )?;

    let config = dir.config_arg();
    let backups = dir.backups_arg();
    let result = bakrot!(dir.root(), "--config", &config, "--today", TODAY, &backups)
        .assert_success()?;

    assert!(result.contains_stderr("logging to console only"));
    assert!(result.contains_stdout("Deleted 187 backups"));
    assert_eq!(dir.file_names()?.len(), 13);
    Ok(())
}
