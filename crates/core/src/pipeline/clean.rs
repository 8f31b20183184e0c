use std::{
    fs::{create_dir_all, remove_dir_all},
    path::Path,
};

use log::info;

use crate::error::{Error, Result};

/// Remove the output directory.
pub fn clean(dist: &Path) -> Result<()> {
    if dist.exists() {
        remove_dir_all(dist).map_err(|e| Error::io(dist, e))?;
        println!("Removed {}", dist.display());
    } else {
        println!("Skipped {} (not found)", dist.display());
    }
    Ok(())
}

/// Leave `dist` as an existing, empty directory.
pub fn empty_dir(dist: &Path) -> Result<()> {
    if dist.exists() {
        remove_dir_all(dist).map_err(|e| Error::io(dist, e))?;
    }
    create_dir_all(dist).map_err(|e| Error::io(dist, e))?;
    info!("Emptied {}", dist.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_dir_removes_contents() {
        let dir = tempdir().unwrap();
        let dist = dir.path().join("dist");
        create_dir_all(dist.join("old")).unwrap();
        write(dist.join("stale.css"), "x").unwrap();

        empty_dir(&dist).unwrap();
        assert!(dist.is_dir());
        assert_eq!(dist.read_dir().unwrap().count(), 0);
    }

    #[test]
    fn test_empty_dir_creates_missing() {
        let dir = tempdir().unwrap();
        let dist = dir.path().join("a/b/dist");
        empty_dir(&dist).unwrap();
        assert!(dist.is_dir());
    }

    #[test]
    fn test_clean() {
        let dir = tempdir().unwrap();
        let dist = dir.path().join("dist");
        create_dir_all(&dist).unwrap();

        clean(&dist).unwrap();
        assert!(!dist.exists());
        clean(&dist).unwrap();
    }
}
