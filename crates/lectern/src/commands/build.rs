//! Index build command.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use anyhow::Result;
use lectern_static::{BuildConfig, IndexBuilder};

/// Run the build command.
pub fn run(source: &Path, target: &Path) -> Result<()> {
    tracing::info!("Building documentation index...");

    let config = BuildConfig {
        source_dir: strip_trailing_separator(source),
        target_dir: strip_trailing_separator(target),
        ..Default::default()
    };

    let result = IndexBuilder::new(config).build()?;

    tracing::info!(
        "Rendered {} categories ({} entries) in {}ms",
        result.categories,
        result.entries,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_path.display());

    Ok(())
}

/// Strip one trailing path separator, if present.
fn strip_trailing_separator(path: &Path) -> PathBuf {
    let raw = path.as_os_str().to_string_lossy();

    match raw.strip_suffix(MAIN_SEPARATOR).or_else(|| raw.strip_suffix('/')) {
        Some(stripped) => PathBuf::from(stripped),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_trailing_separator() {
        assert_eq!(
            strip_trailing_separator(Path::new("docs/")),
            PathBuf::from("docs")
        );
        assert_eq!(
            strip_trailing_separator(Path::new("docs//")),
            PathBuf::from("docs/")
        );
    }

    #[test]
    fn leaves_clean_paths_alone() {
        assert_eq!(
            strip_trailing_separator(Path::new("docs")),
            PathBuf::from("docs")
        );
    }
}
