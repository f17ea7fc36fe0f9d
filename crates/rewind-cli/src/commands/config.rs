use std::path::Path;

use anyhow::{bail, Result};

use rewind_core::AppConfig;

/// Write the default configuration to `path`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

pub fn path(path: &Path) {
    println!("{}", path.display());
}

/// Print the configuration in effect, defaults filled in
pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join(format!("rewind-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = std::fs::remove_dir_all(&dir);

        init(&path, false).unwrap();
        assert!(path.exists());
        assert!(init(&path, false).is_err());
        init(&path, true).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.widget.default_end_time, "09:24");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
