use std::{
    fs,
    path::{Path, PathBuf},
};

use kc_gamepf::{
    native_version, profile, ControlError, DeviceControl, DeviceProfile, MemoryControl,
    SysfsControl, Temperature,
};

const CPU_GOV: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";
const GPU_GOV: &str = "/sys/class/kgsl/kgsl-3d0/devfreq/governor";
const TZ0: &str = "/sys/class/thermal/thermal_zone0/temp";
const TZ1: &str = "/sys/class/thermal/thermal_zone1/temp";
const BATT: &str = "/sys/class/power_supply/battery/temp";
const BATT_ALT: &str = "/sys/class/power_supply/batt_temp";

fn device() -> DeviceControl<MemoryControl> {
    let fs = MemoryControl::new()
        .with_file(CPU_GOV, "walt\n")
        .with_file(GPU_GOV, "msm-adreno-tz\n");
    DeviceControl::new(DeviceProfile::default(), fs)
}

fn writes(ctl: &DeviceControl<MemoryControl>) -> Vec<(String, String)> {
    ctl.fs()
        .writes()
        .into_iter()
        .map(|(p, v)| (p.display().to_string(), v))
        .collect()
}

fn w(path: &str, token: &str) -> (String, String) {
    (path.to_string(), token.to_string())
}

#[test]
fn cpu_boost_levels_select_documented_governors() {
    let cases = [
        (0, "interactive"),
        (1, "schedutil"),
        (2, "performance"),
        (3, "interactive"),
        (-1, "interactive"),
        (i32::MAX, "interactive"),
    ];
    for (level, token) in cases {
        let ctl = device();
        ctl.set_cpu_boost(level).unwrap();
        assert_eq!(writes(&ctl), vec![w(CPU_GOV, token)], "level {}", level);
    }
}

#[test]
fn gpu_boost_levels_select_documented_governors() {
    let cases = [
        (0, "msm-adreno-tz"),
        (1, "simple_ondemand"),
        (2, "performance"),
        (5, "msm-adreno-tz"),
        (i32::MIN, "msm-adreno-tz"),
    ];
    for (level, token) in cases {
        let ctl = device();
        ctl.set_gpu_boost(level).unwrap();
        assert_eq!(writes(&ctl), vec![w(GPU_GOV, token)], "level {}", level);
    }
}

#[test]
fn turbo_on_then_off_writes_token_pairs() {
    let ctl = device();
    ctl.enable_turbo_mode(true).unwrap();
    ctl.enable_turbo_mode(false).unwrap();

    assert_eq!(
        writes(&ctl),
        vec![
            w(CPU_GOV, "performance"),
            w(GPU_GOV, "performance"),
            w(CPU_GOV, "interactive"),
            w(GPU_GOV, "msm-adreno-tz"),
        ]
    );
    assert_eq!(ctl.fs().contents(Path::new(CPU_GOV)).as_deref(), Some("interactive\n"));
    assert_eq!(ctl.fs().contents(Path::new(GPU_GOV)).as_deref(), Some("msm-adreno-tz\n"));
}

#[test]
fn governor_write_to_absent_node_reports_error() {
    let ctl = DeviceControl::new(DeviceProfile::default(), MemoryControl::new());
    assert!(matches!(ctl.set_cpu_boost(2), Err(ControlError::Write { .. })));
    assert!(matches!(ctl.set_gpu_boost(2), Err(ControlError::Write { .. })));
    assert!(ctl.enable_turbo_mode(true).is_err());
    assert!(ctl.fs().writes().is_empty());
}

#[test]
fn cpu_temperature_from_zone() {
    let ctl = device();
    ctl.fs().set_file(TZ0, "45000\n");
    assert_eq!(ctl.cpu_temperature(), Temperature::Sensor(45.0));

    ctl.fs().remove_file(Path::new(TZ0));
    ctl.fs().set_file(TZ1, "38500\n");
    assert_eq!(ctl.cpu_temperature(), Temperature::Sensor(38.5));
}

#[test]
fn battery_temperature_from_power_supply() {
    let ctl = device();
    ctl.fs().set_file(BATT, "350\n");
    assert_eq!(ctl.battery_temperature(), Temperature::Sensor(35.0));

    ctl.fs().remove_file(Path::new(BATT));
    ctl.fs().set_file(BATT_ALT, "412");
    assert_eq!(ctl.battery_temperature(), Temperature::Sensor(41.2));
}

#[test]
fn unreadable_sensors_fall_back_to_synthetic_range() {
    let ctl = device();
    for _ in 0..500 {
        match ctl.cpu_temperature() {
            Temperature::Synthetic(c) => assert!((35.0..55.0).contains(&c), "cpu {}", c),
            other => panic!("unexpected {:?}", other),
        }
        match ctl.battery_temperature() {
            Temperature::Synthetic(c) => assert!((30.0..45.0).contains(&c), "battery {}", c),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn malformed_zone_reads_as_zero() {
    let ctl = device();
    ctl.fs().set_file(TZ0, "error\n");
    ctl.fs().set_file(TZ1, "50000\n");
    assert_eq!(ctl.cpu_temperature(), Temperature::Sensor(0.0));
}

#[test]
fn profile_without_synthetic_reports_unavailable() {
    let mut p = DeviceProfile::default();
    p.cpu_thermal.synthetic = None;
    let ctl = DeviceControl::new(p, MemoryControl::new());

    let t = ctl.cpu_temperature();
    assert_eq!(t, Temperature::Unavailable);
    assert!(t.reported().is_nan());
    assert!(matches!(ctl.battery_temperature(), Temperature::Synthetic(_)));
}

#[test]
fn version_is_fixed() {
    assert_eq!(native_version(), "KC GamePF Native v1.0.0");
}

#[test]
fn telemetry_readings() {
    let ctl = device();
    ctl.fs().set_file("/sys/class/kgsl/kgsl-3d0/gpu_busy_percentage", "64 %\n");
    ctl.fs().set_file(
        "/proc/meminfo",
        "MemTotal:        8192000 kB\nMemAvailable:    2048000 kB\n",
    );

    assert_eq!(ctl.gpu_usage_percent(), 64);
    let m = ctl.memory_info().unwrap();
    assert_eq!(m.total_mib(), 8000);
    assert_eq!(m.available_mib(), 2000);
    assert_eq!(ctl.max_cpu_frequency_khz(), 2_400_000);
}

/// Real files, a profile pointing at them, and the direct-write backend.
#[test]
fn profile_file_drives_sysfs_backend() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let node = |name: &str| -> PathBuf { root.join(name) };

    fs::write(node("scaling_governor"), "walt\n").unwrap();
    fs::write(node("gpu_governor"), "msm-adreno-tz\n").unwrap();
    fs::write(node("zone1_temp"), "52000\n").unwrap();

    let mut p = DeviceProfile::default();
    p.name = "tmp".to_string();
    p.cpu.path = node("scaling_governor");
    p.gpu.path = node("gpu_governor");
    p.cpu_thermal.paths = vec![node("zone0_temp"), node("zone1_temp")];
    p.battery_thermal.paths = vec![node("batt_temp")];
    p.battery_thermal.synthetic = None;

    let profile_path = root.join("cfg/profile.json");
    profile::write_profile_atomic(&profile_path, &p).unwrap();

    let ctl = DeviceControl::new(profile::load_or_default(&profile_path), SysfsControl);
    assert_eq!(ctl.profile().name, "tmp");

    ctl.set_cpu_boost(1).unwrap();
    ctl.set_gpu_boost(2).unwrap();
    assert_eq!(fs::read_to_string(node("scaling_governor")).unwrap(), "schedutil\n");
    assert_eq!(fs::read_to_string(node("gpu_governor")).unwrap(), "performance\n");

    ctl.enable_turbo_mode(false).unwrap();
    assert_eq!(fs::read_to_string(node("scaling_governor")).unwrap(), "interactive\n");
    assert_eq!(fs::read_to_string(node("gpu_governor")).unwrap(), "msm-adreno-tz\n");

    assert_eq!(ctl.cpu_temperature(), Temperature::Sensor(52.0));
    assert_eq!(ctl.battery_temperature(), Temperature::Unavailable);
}

#[test]
fn zone_that_opens_but_does_not_parse_reads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let primary = root.join("zone0_temp");
    let secondary = root.join("zone1_temp");
    fs::write(&primary, [0xff, 0xfe, b'\n']).unwrap();
    fs::write(&secondary, "50000\n").unwrap();

    let mut p = DeviceProfile::default();
    p.cpu_thermal.paths = vec![primary, secondary.clone()];
    let ctl = DeviceControl::new(p, SysfsControl);
    assert_eq!(ctl.cpu_temperature(), Temperature::Sensor(0.0));

    // A directory opens but cannot be read; it still counts as the sensor.
    let mut p = DeviceProfile::default();
    p.cpu_thermal.paths = vec![root.join("zone_dir"), secondary];
    fs::create_dir(root.join("zone_dir")).unwrap();
    let ctl = DeviceControl::new(p, SysfsControl);
    assert_eq!(ctl.cpu_temperature(), Temperature::Sensor(0.0));
}
