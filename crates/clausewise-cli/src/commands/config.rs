//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Init { force } => {
            println!("{}", init_config(path, force, formatter)?);
            Ok(())
        }
    }
}

/// Write a default configuration file unless one exists.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<String> {
    if path.exists() && !force {
        return Ok(formatter.warning(&format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)?;
    Ok(formatter.success(&format!("Wrote {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Table, false);

        std::fs::write(&path, "[defaults]\nperspective = \"vendor\"\n").unwrap();
        let message = init_config(&path, false, &formatter).unwrap();
        assert!(message.contains("already exists"));
        assert_eq!(
            Config::load_from(&path).unwrap().defaults.perspective.as_deref(),
            Some("vendor")
        );

        init_config(&path, true, &formatter).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
