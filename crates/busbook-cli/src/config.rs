use std::fs;
use std::path::Path;

use anyhow::Context;
use busbook_ledger::{CredentialPolicy, LedgerConfig};
use tracing::debug;

use crate::cli::Cli;

/// Read a TOML ledger configuration. Missing keys take their defaults.
pub fn load_file(path: &Path) -> anyhow::Result<LedgerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Configuration file (if any) with command-line overrides applied.
pub fn resolve(cli: &Cli) -> anyhow::Result<LedgerConfig> {
    let mut config = match &cli.config {
        Some(path) => load_file(path)?,
        None => LedgerConfig::default(),
    };
    if let Some(data) = &cli.data {
        config.snapshot_path = Some(data.clone());
    }
    if cli.strict {
        config.credentials = CredentialPolicy::strict();
    }
    debug!(?config, "resolved configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use busbook_store::SyncMode;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn full_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busbook.toml");
        fs::write(
            &path,
            r#"
snapshot_path = "/var/lib/busbook/bookings.txt"
sync = "every_write"

[credentials]
require_credentials = true
reject_duplicate_ids = false
"#,
        )
        .unwrap();

        let config = load_file(&path).unwrap();
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/var/lib/busbook/bookings.txt")));
        assert_eq!(config.sync, SyncMode::EveryWrite);
        assert!(config.credentials.require_credentials);
        assert!(!config.credentials.reject_duplicate_ids);
    }

    #[test]
    fn empty_toml_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busbook.toml");
        fs::write(&path, "").unwrap();
        assert_eq!(load_file(&path).unwrap(), LedgerConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn flags_override_file() {
        let cli = Cli::try_parse_from(["busbook", "--data", "elsewhere.txt", "--strict", "routes"])
            .unwrap();
        let config = resolve(&cli).unwrap();
        assert_eq!(config.snapshot_path, Some(PathBuf::from("elsewhere.txt")));
        assert_eq!(config.credentials, CredentialPolicy::strict());
    }
}
