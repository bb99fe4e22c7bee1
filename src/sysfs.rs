use std::{
    collections::BTreeMap,
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

/// Access to kernel control files.
///
/// Everything that touches sysfs or procfs goes through this trait so the
/// shim can run against [`MemoryControl`] instead of a device.
pub trait ControlFs: Send + Sync {
    /// Contents of a control file. Only failing to open it is an error;
    /// a node that opens but cannot be read yields whatever was read.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replace the contents of an existing control file with `value`.
    /// Never creates the file.
    fn write(&self, path: &Path, value: &str) -> io::Result<()>;
}

/// Direct file I/O against the live kernel interfaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysfsControl;

impl ControlFs for SysfsControl {
    fn read(&self, path: &Path) -> io::Result<String> {
        let mut f = File::open(path)?;
        let mut buf = Vec::new();
        if let Err(e) = f.read_to_end(&mut buf) {
            log::debug!("SYSFS: read {}: {}", path.display(), e);
            buf.clear();
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn write(&self, path: &Path, value: &str) -> io::Result<()> {
        let mut f = OpenOptions::new().write(true).truncate(true).open(path)?;
        f.write_all(format!("{}\n", value).as_bytes())
    }
}

/// In-memory control tree. Writes only succeed on files that were seeded,
/// the same way sysfs refuses to create new nodes.
#[derive(Debug, Default)]
pub struct MemoryControl {
    files: Mutex<BTreeMap<PathBuf, String>>,
    writes: Mutex<Vec<(PathBuf, String)>>,
}

impl MemoryControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.set_file(path, contents);
        self
    }

    pub fn set_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), contents.into());
    }

    pub fn remove_file(&self, path: &Path) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Every successful write so far, in order: (path, value).
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ControlFs for MemoryControl {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.contents(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write(&self, path: &Path, value: &str) -> io::Result<()> {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = files
            .get_mut(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))?;
        *slot = format!("{}\n", value);
        drop(files);

        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.to_path_buf(), value.to_string()));
        Ok(())
    }
}

pub fn read_to_string(fs: &impl ControlFs, path: &Path) -> Option<String> {
    fs.read(path).ok()
}

pub fn read_u64(fs: &impl ControlFs, path: &Path) -> Option<u64> {
    let s = read_to_string(fs, path)?;
    s.trim().parse::<u64>().ok()
}

/// Parse the leading decimal number of `s`, ignoring whatever follows it.
/// Accepts an optional sign, fraction and exponent, like C `%f`.
pub fn parse_leading_f32(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let b = s.as_bytes();

    let mut end = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < b.len() && b[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < b.len() && b[end] == b'.' {
        let mut j = end + 1;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - (end + 1);
        end = j;
    }
    if digits == 0 {
        return None;
    }

    if end < b.len() && matches!(b[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < b.len() && matches!(b[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f32>().ok()
}
