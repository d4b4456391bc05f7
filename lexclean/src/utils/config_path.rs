// lexclean/src/utils/config_path.rs
//! Resolves which catalog the CLI runs with.
//!
//! Lookup order for the user catalog: `--config FILE` (or `LEXCLEAN_CONFIG`,
//! which clap maps onto the same flag), then `<config dir>/lexclean/catalog.yaml`
//! when that file exists. Whatever is found is merged over the embedded default.

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use lexclean_core::{merge_catalogs, CatalogConfig};

use crate::cli::CatalogArgs;

const APP_DIR_NAME: &str = "lexclean";
const CATALOG_FILE_NAME: &str = "catalog.yaml";

/// `<config dir>/lexclean/catalog.yaml`, if the platform has a config dir.
pub fn default_user_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CATALOG_FILE_NAME))
}

/// The user catalog to load, if any.
///
/// An explicit path is returned even when it does not exist, so loading it
/// reports a proper error. The implicit per-user path is only used when present.
pub fn user_catalog_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    default_user_catalog_path().filter(|path| path.is_file())
}

/// Builds the effective catalog for a command from its catalog flags.
pub fn resolve_catalog(args: &CatalogArgs) -> Result<CatalogConfig> {
    let default_config = CatalogConfig::load_default()?;

    let user_config = match user_catalog_path(args.config.as_deref()) {
        Some(path) => {
            debug!("Using user catalog at {}", path.display());
            Some(CatalogConfig::load_from_file(&path)?)
        }
        None => {
            debug!("No user catalog found. Using the embedded default.");
            None
        }
    };

    let mut config = merge_catalogs(default_config, user_config);
    if !args.languages.is_empty() {
        config = config.with_languages(args.languages.iter().map(|l| l.trim().to_string()));
    }
    if args.strict {
        config = config.with_strict(true);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/nonexistent/catalog.yaml");
        assert_eq!(user_catalog_path(Some(&path)), Some(path));
    }

    #[test]
    fn test_resolve_with_user_file_and_flags() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "index:\n  max_variants_per_term: 3\ntranslations:\n  xx: [blorf]")?;
        let args = CatalogArgs {
            config: Some(file.path().to_path_buf()),
            languages: vec!["xx".to_string(), " es".to_string()],
            strict: true,
        };
        let config = resolve_catalog(&args)?;
        assert_eq!(config.term()?, "orange");
        assert_eq!(config.index.max_variants_per_term(), 3);
        assert_eq!(config.languages, Some(vec!["xx".to_string(), "es".to_string()]));
        assert!(config.index.strict());
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let args = CatalogArgs {
            config: Some(PathBuf::from("/nonexistent/lexclean/catalog.yaml")),
            ..Default::default()
        };
        assert!(resolve_catalog(&args).is_err());
    }
}
