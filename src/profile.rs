use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    env, fs, io,
    path::{Path, PathBuf},
};

use crate::{config, error::ProfileError};

/// Per-device description of the control files and governor tokens.
///
/// The default profile matches the Adreno/Snapdragon layout the app shipped
/// with; other device families override it with a JSON file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeviceProfile {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "GovernorNode::cpu_default")]
    pub cpu: GovernorNode,
    #[serde(default = "GovernorNode::gpu_default")]
    pub gpu: GovernorNode,

    #[serde(default = "ThermalSource::cpu_default")]
    pub cpu_thermal: ThermalSource,
    #[serde(default = "ThermalSource::battery_default")]
    pub battery_thermal: ThermalSource,

    #[serde(default)]
    pub telemetry: TelemetryPaths,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_name() -> String {
    "default".to_string()
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            cpu: GovernorNode::cpu_default(),
            gpu: GovernorNode::gpu_default(),
            cpu_thermal: ThermalSource::cpu_default(),
            battery_thermal: ThermalSource::battery_default(),
            telemetry: TelemetryPaths::default(),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GovernorNode {
    pub path: PathBuf,

    /// Governor token per boost level; index is the level.
    pub levels: Vec<String>,
    /// Used for any level outside `levels`.
    pub default: String,

    pub turbo_on: String,
    pub turbo_off: String,
}

impl GovernorNode {
    pub fn cpu_default() -> Self {
        Self {
            path: PathBuf::from(config::CPU_GOVERNOR),
            levels: to_strings(config::CPU_GOVERNORS),
            default: config::CPU_GOV_DEFAULT.to_string(),
            turbo_on: config::GOV_TURBO.to_string(),
            turbo_off: config::CPU_GOV_NORMAL.to_string(),
        }
    }

    pub fn gpu_default() -> Self {
        Self {
            path: PathBuf::from(config::GPU_GOVERNOR),
            levels: to_strings(config::GPU_GOVERNORS),
            default: config::GPU_GOV_DEFAULT.to_string(),
            turbo_on: config::GOV_TURBO.to_string(),
            turbo_off: config::GPU_GOV_NORMAL.to_string(),
        }
    }

    pub fn governor_for(&self, level: i32) -> &str {
        usize::try_from(level)
            .ok()
            .and_then(|i| self.levels.get(i))
            .unwrap_or(&self.default)
    }

    pub fn turbo_token(&self, enable: bool) -> &str {
        if enable { &self.turbo_on } else { &self.turbo_off }
    }

    fn normalize(&mut self, label: &str) -> Result<(), ProfileError> {
        if self.path.as_os_str().is_empty() {
            return Err(ProfileError::Invalid(format!("{}: empty governor path", label)));
        }

        for t in self
            .levels
            .iter_mut()
            .chain([&mut self.default, &mut self.turbo_on, &mut self.turbo_off])
        {
            let trimmed = t.trim();
            if trimmed.len() != t.len() {
                *t = trimmed.to_string();
            }
            // A governor node takes exactly one token.
            if t.contains(|c: char| c.is_ascii_whitespace()) {
                return Err(ProfileError::Invalid(format!("{}: governor {:?} contains whitespace", label, t)));
            }
        }

        if self.default.is_empty() {
            return Err(ProfileError::Invalid(format!("{}: empty default governor", label)));
        }
        if self.turbo_on.is_empty() || self.turbo_off.is_empty() {
            return Err(ProfileError::Invalid(format!("{}: empty turbo governor", label)));
        }

        // An empty level token would write a blank line into the node.
        let default = self.default.clone();
        for t in &mut self.levels {
            if t.is_empty() {
                *t = default.clone();
            }
        }
        Ok(())
    }
}

/// Synthetic reading range, [low, high) in 0.1 C steps.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SyntheticRange {
    pub low: f32,
    pub high: f32,
}

impl SyntheticRange {
    /// Number of 0.1 C steps in the range.
    pub fn steps(&self) -> u32 {
        ((self.high - self.low) * 10.0).round().max(1.0) as u32
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ThermalSource {
    /// Tried in order; the first one that opens is used.
    pub paths: Vec<PathBuf>,
    pub divisor: f32,

    /// `None` reports the sensor as unavailable instead of inventing a value.
    #[serde(default)]
    pub synthetic: Option<SyntheticRange>,
}

impl ThermalSource {
    pub fn cpu_default() -> Self {
        Self {
            paths: config::CPU_THERMAL.iter().map(PathBuf::from).collect(),
            divisor: config::CPU_TEMP_DIVISOR,
            synthetic: Some(SyntheticRange {
                low: config::CPU_SYNTHETIC.0,
                high: config::CPU_SYNTHETIC.1,
            }),
        }
    }

    pub fn battery_default() -> Self {
        Self {
            paths: config::BATTERY_THERMAL.iter().map(PathBuf::from).collect(),
            divisor: config::BATTERY_TEMP_DIVISOR,
            synthetic: Some(SyntheticRange {
                low: config::BATTERY_SYNTHETIC.0,
                high: config::BATTERY_SYNTHETIC.1,
            }),
        }
    }

    fn validate(&self, label: &str) -> Result<(), ProfileError> {
        if !self.divisor.is_finite() || self.divisor == 0.0 {
            return Err(ProfileError::Invalid(format!("{}: bad divisor {}", label, self.divisor)));
        }
        if let Some(r) = self.synthetic {
            if !(r.low.is_finite() && r.high.is_finite() && r.low < r.high) {
                return Err(ProfileError::Invalid(format!(
                    "{}: bad synthetic range {}..{}",
                    label, r.low, r.high
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetryPaths {
    pub cpu_max_freq: PathBuf,
    pub gpu_busy_percent: Option<PathBuf>,
    pub gpu_gpubusy: PathBuf,
    pub proc_stat: PathBuf,
    pub proc_meminfo: PathBuf,
}

impl Default for TelemetryPaths {
    fn default() -> Self {
        Self {
            cpu_max_freq: PathBuf::from(config::CPU_MAX_FREQ),
            gpu_busy_percent: Some(PathBuf::from(config::GPU_BUSY_PERCENT)),
            gpu_gpubusy: PathBuf::from(config::GPU_GPUBUSY),
            proc_stat: PathBuf::from(config::PROC_STAT),
            proc_meminfo: PathBuf::from(config::PROC_MEMINFO),
        }
    }
}

fn to_strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

impl DeviceProfile {
    pub fn validate_and_normalize(&mut self) -> Result<(), ProfileError> {
        self.cpu.normalize("cpu")?;
        self.gpu.normalize("gpu")?;
        self.cpu_thermal.validate("cpu_thermal")?;
        self.battery_thermal.validate("battery_thermal")?;
        Ok(())
    }
}

/// Profile location, overridable through the environment.
pub fn profile_path() -> PathBuf {
    env::var_os(config::PROFILE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::PROFILE_PATH))
}

pub fn load(path: &Path) -> Result<DeviceProfile, ProfileError> {
    let s = fs::read_to_string(path)?;
    let mut profile = serde_json::from_str::<DeviceProfile>(&s)?;
    profile.validate_and_normalize()?;
    Ok(profile)
}

/// Load the profile at `path`, falling back to the built-in one.
pub fn load_or_default(path: &Path) -> DeviceProfile {
    match load(path) {
        Ok(p) => {
            log::info!("PROFILE: {} ({})", p.name, path.display());
            p
        }
        Err(ProfileError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("PROFILE: none at {}, using built-in", path.display());
            DeviceProfile::default()
        }
        Err(e) => {
            log::warn!("PROFILE: {} (using built-in)", e);
            DeviceProfile::default()
        }
    }
}

pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn write_profile_atomic(path: &Path, profile: &DeviceProfile) -> Result<(), ProfileError> {
    ensure_parent_dir(path)?;
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    let data = serde_json::to_string_pretty(profile)?;
    fs::write(&tmp, data.as_bytes())?;
    fs::rename(&tmp, path)?;
    Ok(())
}
