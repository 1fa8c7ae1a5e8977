use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("failed to launch `{command}`: {source}")]
pub struct BrowserError {
    command: String,
    #[source]
    source: std::io::Error,
}

/// Platform command that opens a URL in the default browser
pub fn open_command(url: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    }

    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(url);
        command
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}

/// Spawns the opener without waiting for it
pub fn open_url(url: &str) -> Result<(), BrowserError> {
    spawn_detached(open_command(url))
}

/// Starts `command` and reaps it on a background thread
fn spawn_detached(mut command: Command) -> Result<(), BrowserError> {
    let mut child = command.spawn().map_err(|source| BrowserError {
        command: command.get_program().to_string_lossy().into_owned(),
        source,
    })?;
    std::thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => {
            tracing::debug!(%status, "Browser opener exited unsuccessfully")
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "Failed to wait for browser opener"),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_command_targets_url() {
        let command = open_command("http://127.0.0.1:2849/cviz");
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args.last().map(String::as_str), Some("http://127.0.0.1:2849/cviz"));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_detached_runs_command() {
        assert!(spawn_detached(Command::new("true")).is_ok());
    }

    #[test]
    fn test_spawn_detached_reports_missing_program() {
        let err = spawn_detached(Command::new("cviz-no-such-opener")).unwrap_err();
        assert!(err.to_string().starts_with("failed to launch `cviz-no-such-opener`"));
    }
}
