use std::sync::{Mutex, PoisonError};

use crate::{
    config,
    cpu::{avg_util, cpu_utils_by_core, CpuStatSample},
    error::ControlError,
    fmt::{fmt_khz, fmt_mib},
    governor,
    gpu::read_gpu_util,
    mem::{read_meminfo, MemInfo},
    profile::DeviceProfile,
    sysfs::{self, ControlFs, SysfsControl},
    thermal::{self, Temperature},
};

/// The device control shim: governor writes and sensor reads for one
/// device profile.
///
/// Calls are independent of each other. The only state kept between calls
/// is the previous /proc/stat sample used for CPU usage.
pub struct DeviceControl<F: ControlFs = SysfsControl> {
    profile: DeviceProfile,
    fs: F,
    cpu_sample: Mutex<Option<CpuStatSample>>,
}

impl DeviceControl<SysfsControl> {
    pub fn sysfs(profile: DeviceProfile) -> Self {
        Self::new(profile, SysfsControl)
    }
}

impl<F: ControlFs> DeviceControl<F> {
    pub fn new(profile: DeviceProfile, fs: F) -> Self {
        Self {
            profile,
            fs,
            cpu_sample: Mutex::new(None),
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Switch both CPU and GPU to their turbo governor, or back to normal.
    ///
    /// Both writes are attempted; the first failure is returned.
    pub fn enable_turbo_mode(&self, enable: bool) -> Result<(), ControlError> {
        log::info!("Turbo Mode {}", if enable { "Enabled" } else { "Disabled" });

        let cpu = &self.profile.cpu;
        let gpu = &self.profile.gpu;
        let cpu_res = governor::apply(&self.fs, cpu, cpu.turbo_token(enable));
        let gpu_res = governor::apply(&self.fs, gpu, gpu.turbo_token(enable));
        cpu_res.and(gpu_res)
    }

    pub fn set_cpu_boost(&self, level: i32) -> Result<(), ControlError> {
        let token = governor::apply_level(&self.fs, &self.profile.cpu, level)?;
        log::info!("CPU Boost level set to: {} ({})", level, token);
        Ok(())
    }

    pub fn set_gpu_boost(&self, level: i32) -> Result<(), ControlError> {
        let token = governor::apply_level(&self.fs, &self.profile.gpu, level)?;
        log::info!("GPU Boost level set to: {} ({})", level, token);
        Ok(())
    }

    pub fn cpu_temperature(&self) -> Temperature {
        thermal::read_temperature(&self.fs, &self.profile.cpu_thermal)
    }

    pub fn battery_temperature(&self) -> Temperature {
        thermal::read_temperature(&self.fs, &self.profile.battery_thermal)
    }

    pub fn max_cpu_frequency_khz(&self) -> u64 {
        match sysfs::read_u64(&self.fs, &self.profile.telemetry.cpu_max_freq) {
            Some(khz) => khz,
            None => {
                log::debug!("CPU: max freq unreadable, reporting {}", fmt_khz(config::CPU_MAX_FREQ_FALLBACK_KHZ));
                config::CPU_MAX_FREQ_FALLBACK_KHZ
            }
        }
    }

    pub fn gpu_usage_percent(&self) -> u8 {
        let t = &self.profile.telemetry;
        read_gpu_util(&self.fs, t.gpu_busy_percent.as_deref(), &t.gpu_gpubusy)
    }

    /// Average busy percent over all cores since the previous call.
    pub fn cpu_usage_percent(&self) -> u8 {
        let mut prev = self.cpu_sample.lock().unwrap_or_else(PoisonError::into_inner);
        cpu_utils_by_core(&self.fs, &self.profile.telemetry.proc_stat, &mut prev)
            .map(|u| avg_util(&u))
            .unwrap_or(0)
    }

    pub fn memory_info(&self) -> Option<MemInfo> {
        let m = read_meminfo(&self.fs, &self.profile.telemetry.proc_meminfo)?;
        log::trace!("MEM: {} / {}", fmt_mib(m.available_kb), fmt_mib(m.total_kb));
        Some(m)
    }
}

pub fn native_version() -> &'static str {
    config::NATIVE_VERSION
}
