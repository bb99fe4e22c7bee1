pub const NATIVE_VERSION: &str = "KC GamePF Native v1.0.0";

pub const LOG_TAG: &str = "KCGamePF";

// Device profile location
pub const PROFILE_ENV: &str = "KC_GAMEPF_PROFILE";
pub const PROFILE_PATH: &str = "/data/local/tmp/kc_gamepf/profile.json";

// Sysfs paths
pub const CPU_GOVERNOR: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";
pub const GPU_GOVERNOR: &str = "/sys/class/kgsl/kgsl-3d0/devfreq/governor";

pub const CPU_THERMAL: &[&str] = &[
    "/sys/class/thermal/thermal_zone0/temp",
    "/sys/class/thermal/thermal_zone1/temp",
];
pub const BATTERY_THERMAL: &[&str] = &[
    "/sys/class/power_supply/battery/temp",
    "/sys/class/power_supply/batt_temp",
];

pub const CPU_MAX_FREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq";
pub const GPU_BUSY_PERCENT: &str = "/sys/class/kgsl/kgsl-3d0/gpu_busy_percentage";
pub const GPU_GPUBUSY: &str = "/sys/class/kgsl/kgsl-3d0/gpubusy";

// Procfs
pub const PROC_STAT: &str = "/proc/stat";
pub const PROC_MEMINFO: &str = "/proc/meminfo";

// Governor tokens, indexed by boost level
pub const CPU_GOVERNORS: &[&str] = &["interactive", "schedutil", "performance"];
pub const GPU_GOVERNORS: &[&str] = &["msm-adreno-tz", "simple_ondemand", "performance"];
pub const CPU_GOV_DEFAULT: &str = "interactive";
pub const GPU_GOV_DEFAULT: &str = "msm-adreno-tz";

// Turbo mode governor
pub const GOV_TURBO: &str = "performance";
pub const CPU_GOV_NORMAL: &str = "interactive";
pub const GPU_GOV_NORMAL: &str = "msm-adreno-tz";

// Thermal scale: thermal zones report millidegrees, power_supply tenths
pub const CPU_TEMP_DIVISOR: f32 = 1000.0;
pub const BATTERY_TEMP_DIVISOR: f32 = 10.0;

// Synthetic fallback ranges, [low, high) in 0.1 C steps
pub const CPU_SYNTHETIC: (f32, f32) = (35.0, 55.0);
pub const BATTERY_SYNTHETIC: (f32, f32) = (30.0, 45.0);

// Reported when cpuinfo_max_freq is unreadable
pub const CPU_MAX_FREQ_FALLBACK_KHZ: u64 = 2_400_000;
