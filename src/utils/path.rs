//! Path utilities: expand `~` and anchor relative names in the config dir.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `~/x` → home, absolute → unchanged, bare/relative name → inside `dir`.
pub fn resolve_in(dir: &Path, path: &str) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        dir.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_names_land_in_dir() {
        let dir = Path::new("/srv/rcheckin");
        assert_eq!(
            resolve_in(dir, "log.sqlite"),
            PathBuf::from("/srv/rcheckin/log.sqlite")
        );
        assert_eq!(
            resolve_in(dir, "/data/log.sqlite"),
            PathBuf::from("/data/log.sqlite")
        );
    }
}
