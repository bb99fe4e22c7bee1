//! Native side of KC GamePF: CPU/GPU governor switching and thermal,
//! load and memory readings over sysfs/procfs, exported to the app via JNI.

pub mod config;
pub mod control;
pub mod cpu;
pub mod error;
pub mod fmt;
pub mod governor;
pub mod gpu;
pub mod jni;
pub mod mem;
pub mod profile;
pub mod sysfs;
pub mod thermal;

pub use control::{native_version, DeviceControl};
pub use error::{ControlError, ProfileError};
pub use profile::DeviceProfile;
pub use sysfs::{ControlFs, MemoryControl, SysfsControl};
pub use thermal::Temperature;
