use std::io::Write;
use std::process::{Command, Stdio};
use std::str;

fn fpbridge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fpbridge"))
}

/// CLI interface tests
#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help() {
        let output = fpbridge().arg("--help").output().expect("Failed to execute command");

        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        assert!(output.status.success());
        assert!(stdout.contains("Usage:"));
        assert!(stdout.contains("fingerprint sensor"));
        assert!(stdout.contains("--echo"));
        assert!(stdout.contains("--config"));
        assert!(stdout.contains("[DEVICE]"));
        assert!(stdout.contains("[BAUD]"));
    }

    #[test]
    fn test_cli_version() {
        let output = fpbridge().arg("--version").output().expect("Failed to execute command");

        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_cli_invalid_baud() {
        let output = fpbridge()
            .args(["/dev/ttyS0", "not-a-number"])
            .output()
            .expect("Failed to execute command");

        assert!(!output.status.success());
    }

    #[test]
    fn test_cli_missing_device_fails_before_reading_stdin() {
        let mut child = fpbridge()
            .args(["/definitely/not/a/serial/port", "57600"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn");

        // The process may already be gone; a broken pipe here is fine.
        let _ = child.stdin.take().expect("stdin piped").write_all(b"get_image\n");
        let output = child.wait_with_output().expect("Failed to wait");

        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr.contains("Error:"));
        assert!(stderr.contains("/definitely/not/a/serial/port"));
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_cli_bad_config_file() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[serial\n").expect("write config");

        let output = fpbridge()
            .arg("--config")
            .arg(&path)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute command");

        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");
        assert!(!output.status.success());
        assert!(stderr.contains("Configuration error"));
    }

    #[test]
    fn test_cli_list_ports_ignores_config() {
        let home = tempfile::TempDir::new().expect("temp dir");
        let config_dir = home.path().join(".config").join("fpbridge");
        std::fs::create_dir_all(&config_dir).expect("config dir");
        std::fs::write(config_dir.join("config.toml"), "[serial\n").expect("write config");

        let output = fpbridge()
            .arg("--list-ports")
            .env("HOME", home.path())
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute command");

        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");
        assert!(!stderr.contains("Configuration error"));
    }

    #[test]
    fn test_cli_verbose_reports_config_source() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[bridge]\necho = false\n").expect("write config");

        let output = fpbridge()
            .arg("--verbose")
            .arg("--config")
            .arg(&path)
            .args(["/definitely/not/a/serial/port", "57600"])
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute command");

        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr.contains("Loaded configuration from"));
        assert!(stderr.contains("config.toml"));
    }
}
