use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes a uniquely named temporary file next to the destination, then renames it into place.
/// Anything already at `path` is replaced; when several writers race, the last rename wins and
/// readers only ever see a complete file. The parent directory must already exist.
pub fn write_atomically<P: AsRef<Path>>(path: P, contents: &[u8]) -> std::io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let with_path = |err: std::io::Error| {
        std::io::Error::new(
            err.kind(),
            format!("writing {}: {}", path.display(), err),
        )
    };

    // The temporary file is deleted on drop if anything below fails
    let mut tmp = NamedTempFile::new_in(dir).map_err(with_path)?;
    tmp.write_all(contents).map_err(with_path)?;
    tmp.as_file().sync_all().map_err(with_path)?;
    tmp.persist(path).map_err(|err| with_path(err.error))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs_err::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.kml");
        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();
        assert_eq!(fs_err::read(&path).unwrap(), b"second");
        assert_eq!(files_in(dir.path()), vec!["out.kml".to_string()]);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.kml");
        let err = write_atomically(&path, b"data").unwrap_err();
        assert!(err.to_string().contains("out.kml"));
        assert!(!path.exists());
    }

    #[test]
    fn concurrent_writers_last_one_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.kml");

        let threads: Vec<_> = (0..4u8)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let contents = vec![b'a' + i; 256 * 1024];
                    for _ in 0..25 {
                        write_atomically(&path, &contents).unwrap();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        // Whole output from exactly one writer, and no leftover temporary files
        let result = fs_err::read(&path).unwrap();
        assert_eq!(result.len(), 256 * 1024);
        assert!(result.iter().all(|b| *b == result[0]));
        assert_eq!(files_in(dir.path()), vec!["out.kml".to_string()]);
    }
}
