//! Static asset copying.

use std::fs;
use std::path::Path;

use crate::builder::BuildError;

/// Copy the named stylesheet into the reserved asset directory under the
/// fixed name `style.css`. The source file must exist; the copy is
/// byte-identical.
pub fn copy_stylesheet(
    stylesheet_dir: &Path,
    stylesheet_name: &str,
    htmldata_dir: &Path,
) -> Result<(), BuildError> {
    let source = stylesheet_dir.join(format!("{stylesheet_name}.css"));

    if !source.exists() {
        return Err(BuildError::MissingAsset(source));
    }

    fs::copy(&source, htmldata_dir.join("style.css"))
        .map_err(|e| BuildError::WriteError(e.to_string()))?;

    tracing::info!("Copied stylesheet from {}", source.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_stylesheet_bytes() {
        let temp = tempdir().unwrap();
        let styles = temp.path().join("stylesheets");
        let htmldata = temp.path().join(".htmldata");
        fs::create_dir_all(&styles).unwrap();
        fs::create_dir_all(&htmldata).unwrap();
        fs::write(styles.join("default.css"), "body { margin: 0; }").unwrap();

        copy_stylesheet(&styles, "default", &htmldata).unwrap();

        assert_eq!(
            fs::read(htmldata.join("style.css")).unwrap(),
            fs::read(styles.join("default.css")).unwrap()
        );
    }

    #[test]
    fn missing_stylesheet_is_an_error() {
        let temp = tempdir().unwrap();
        let styles = temp.path().join("stylesheets");
        let htmldata = temp.path().join(".htmldata");
        fs::create_dir_all(&styles).unwrap();
        fs::create_dir_all(&htmldata).unwrap();

        let result = copy_stylesheet(&styles, "nope", &htmldata);

        assert!(matches!(result, Err(BuildError::MissingAsset(_))));
    }
}
