//! Desktop helpers: simulated paste, notifications, opening the editor
//!
//! These shell out to whatever the platform provides. They are best effort: a missing
//! helper is reported as an error for the caller to print, never a panic.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Send the platform paste shortcut to the focused window
pub fn auto_paste() -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        run(
            "osascript",
            &[
                "-e",
                "tell application \"System Events\" to keystroke \"v\" using command down",
            ],
        )
    }

    #[cfg(target_os = "linux")]
    {
        if which::which("xdotool").is_ok() {
            run("xdotool", &["key", "--clearmodifiers", "ctrl+v"])
        } else if which::which("wtype").is_ok() {
            run("wtype", &["-M", "ctrl", "v", "-m", "ctrl"])
        } else {
            bail!("Auto-paste needs xdotool (X11) or wtype (Wayland) on PATH")
        }
    }

    #[cfg(target_os = "windows")]
    {
        run(
            "powershell",
            &[
                "-NoProfile",
                "-Command",
                "(New-Object -ComObject WScript.Shell).SendKeys('^v')",
            ],
        )
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        bail!("Auto-paste is not supported on this platform")
    }
}

/// Show a desktop notification
pub fn notify(title: &str, body: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_applescript(body),
            escape_applescript(title)
        );
        run("osascript", &["-e", &script])
    }

    #[cfg(not(target_os = "macos"))]
    {
        if which::which("notify-send").is_err() {
            bail!("notify-send not found on PATH");
        }
        run("notify-send", &[title, body])
    }
}

/// Open VS Code on a directory without waiting for it
pub fn open_vscode(dir: &Path) -> Result<()> {
    let code = which::which("code").context("VS Code launcher `code` not found on PATH")?;
    Command::new(code)
        .arg(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open VS Code in {}", dir.display()))?;
    Ok(())
}

/// Run an editor on a file and wait for it to exit
pub fn edit_file(editor: &str, file: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(file)
        .status()
        .with_context(|| format!("Failed to start editor: {}", editor))?;

    if !status.success() {
        bail!("Editor {} exited with {}", editor, status);
    }
    Ok(())
}

fn run(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to run {}", program))?;

    if !status.success() {
        bail!("{} exited with {}", program, status);
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
