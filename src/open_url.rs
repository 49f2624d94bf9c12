use anyhow::{Context, Result, bail};
use std::process::{Command, Stdio};
use tracing::debug;

/// Open `url` with `open_command` when configured, else the system default.
pub fn open_url(url: &str, open_command: Option<&str>) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("refusing to open non-http url: {}", url);
    }
    if let Some(cmd) = open_command.map(str::trim).filter(|c| !c.is_empty()) {
        let mut parts = cmd.split_whitespace();
        let program = parts.next().unwrap_or(cmd);
        debug!(program, "opening article with configured command");
        Command::new(program)
            .args(parts)
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to run open_command '{}'", cmd))?;
        return Ok(());
    }
    open::that_detached(url).with_context(|| format!("failed to open {}", url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_other_schemes() {
        assert!(open_url("file:///etc/passwd", None).is_err());
        assert!(open_url("", Some("true")).is_err());
    }
}
