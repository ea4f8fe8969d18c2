//! Code command - Open VS Code in the notes directory

use anyhow::Result;

use mknote::config::Config;
use mknote::desktop;

/// Execute the code command
pub fn execute(config: &Config) -> Result<()> {
    let base_dir = config.base_dir();
    desktop::open_vscode(&base_dir)?;
    println!("Opened VS Code in {}", base_dir.display());
    Ok(())
}
