use std::path::Path;

use crate::sysfs::{self, ControlFs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl MemInfo {
    pub fn total_mib(&self) -> u64 {
        self.total_kb / 1024
    }

    pub fn available_mib(&self) -> u64 {
        self.available_kb / 1024
    }
}

fn field_kb(s: &str, key: &str) -> Option<u64> {
    for line in s.lines() {
        if let Some(rest) = line.strip_prefix(key).and_then(|r| r.strip_prefix(':')) {
            return rest
                .split_whitespace()
                .next()
                .and_then(|x| x.parse::<u64>().ok());
        }
    }
    None
}

/// MemTotal and MemAvailable from /proc/meminfo.
pub fn read_meminfo(fs: &impl ControlFs, path: &Path) -> Option<MemInfo> {
    let s = sysfs::read_to_string(fs, path)?;
    Some(MemInfo {
        total_kb: field_kb(&s, "MemTotal")?,
        available_kb: field_kb(&s, "MemAvailable")?,
    })
}
