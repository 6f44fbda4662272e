use std::{
    fmt,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::CompressError;

pub const COMPRESSED_EXTENSION: &str = "huff";

/// `<input>.huff`
pub fn compressed_name(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

/// Strips a trailing `.huff`, otherwise prefixes the file name with
/// `decompressed_`.
pub fn decompressed_name(input: &Path) -> PathBuf {
    match (input.extension(), input.file_stem()) {
        (Some(ext), Some(stem)) if ext == COMPRESSED_EXTENSION => input.with_file_name(stem),
        _ => {
            let mut name = std::ffi::OsString::from("decompressed_");
            if let Some(file_name) = input.file_name() {
                name.push(file_name);
            }
            input.with_file_name(name)
        }
    }
}

pub(crate) fn read_all(path: &Path) -> Result<Vec<u8>, CompressError> {
    fs::read(path).map_err(|e| CompressError::io(path, e))
}

/// Runs `write` against a temporary file next to `path` and moves it over
/// `path` once everything succeeded. On error the temporary file is removed
/// and `path` is left untouched.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<(), CompressError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), CompressError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| CompressError::io(path, e))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| CompressError::io(path, e))?;
    }

    temp.persist(path)
        .map_err(|e| CompressError::io(path, e.error))?;
    Ok(())
}

/// Size of a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
}

impl FileInfo {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CompressError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| CompressError::io(path, e))?;
        Ok(FileInfo {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    pub fn kib(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    pub fn mib(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filename: {}", self.path.display())?;
        writeln!(f, "Size: {} bytes", self.size)?;
        writeln!(f, "Size: {:.2} KB", self.kib())?;
        write!(f, "Size: {:.2} MB", self.mib())
    }
}

/// Two files side by side, e.g. an original and its compressed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeComparison {
    pub first: FileInfo,
    pub second: FileInfo,
}

impl SizeComparison {
    pub fn new(first: impl AsRef<Path>, second: impl AsRef<Path>) -> Result<Self, CompressError> {
        Ok(SizeComparison {
            first: FileInfo::new(first)?,
            second: FileInfo::new(second)?,
        })
    }

    pub fn difference(&self) -> u64 {
        self.first.size.abs_diff(self.second.size)
    }

    /// Bytes the second file saves over the first, negative if it is larger.
    pub fn saved(&self) -> i128 {
        self.first.size as i128 - self.second.size as i128
    }

    /// Second size as a percentage of the first, `None` when the first is empty.
    pub fn ratio(&self) -> Option<f64> {
        if self.first.size == 0 {
            return None;
        }
        Some(self.second.size as f64 / self.first.size as f64 * 100.0)
    }
}

impl fmt::Display for SizeComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "File 1: {} - {} bytes",
            self.first.path.display(),
            self.first.size
        )?;
        writeln!(
            f,
            "File 2: {} - {} bytes",
            self.second.path.display(),
            self.second.size
        )?;
        write!(f, "Difference: {} bytes", self.difference())?;
        if let Some(ratio) = self.ratio() {
            write!(f, "\nSize ratio: {:.2}%", ratio)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::Write,
        path::{Path, PathBuf},
    };

    use tempfile::tempdir;

    use crate::{
        error::CompressError,
        files::{compressed_name, decompressed_name, write_atomically, FileInfo, SizeComparison},
    };

    #[test]
    fn output_names() {
        assert_eq!(
            compressed_name(Path::new("dir/report.txt")),
            PathBuf::from("dir/report.txt.huff")
        );
        assert_eq!(
            decompressed_name(Path::new("dir/report.txt.huff")),
            PathBuf::from("dir/report.txt")
        );
        assert_eq!(
            decompressed_name(Path::new("dir/report.bin")),
            PathBuf::from("dir/decompressed_report.bin")
        );
        assert_eq!(
            decompressed_name(Path::new("archive")),
            PathBuf::from("decompressed_archive")
        );
    }

    #[test]
    fn info_and_comparison() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::write(&first, vec![0u8; 2048]).unwrap();
        fs::write(&second, vec![0u8; 512]).unwrap();

        let info = FileInfo::new(&first).unwrap();
        assert_eq!(info.size, 2048);
        assert_eq!(info.kib(), 2.0);

        let comparison = SizeComparison::new(&first, &second).unwrap();
        assert_eq!(comparison.difference(), 1536);
        assert_eq!(comparison.saved(), 1536);
        assert_eq!(comparison.ratio(), Some(25.0));

        let reversed = SizeComparison::new(&second, &first).unwrap();
        assert_eq!(reversed.difference(), 1536);
        assert_eq!(reversed.saved(), -1536);
    }

    #[test]
    fn empty_first_file_has_no_ratio() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        fs::write(&first, b"").unwrap();

        let comparison = SizeComparison::new(&first, &first).unwrap();
        assert_eq!(comparison.ratio(), None);
        assert!(!comparison.to_string().contains("ratio"));
    }

    #[test]
    fn missing_file_info() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            FileInfo::new(dir.path().join("nope")),
            Err(CompressError::Io { .. })
        ));
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");

        let result = write_atomically(&target, |w| {
            w.write_all(b"partial")?;
            Err(CompressError::EmptyInput)
        });

        assert!(matches!(result, Err(CompressError::EmptyInput)));
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn successful_write_replaces_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        fs::write(&target, b"old").unwrap();

        write_atomically(&target, |w| Ok(w.write_all(b"new")?)).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
