//! Entry points for `com.kc.gamepf`.
//!
//! Nothing here throws into the JVM: failures are logged and the call
//! returns normally, like the shell-based bridge it replaces.

use std::{ffi::c_void, sync::OnceLock};

use ::jni::{
    objects::JObject,
    sys::{self, jboolean, jfloat, jint, jlong, jstring, JNI_FALSE, JNI_VERSION_1_6},
    JNIEnv,
};

use crate::{
    control::{native_version, DeviceControl},
    profile,
    sysfs::ControlFs,
};

static CONTROL: OnceLock<DeviceControl> = OnceLock::new();

/// Process-wide shim over the live sysfs tree, built on first use.
pub fn control() -> &'static DeviceControl {
    CONTROL.get_or_init(|| DeviceControl::sysfs(profile::load_or_default(&profile::profile_path())))
}

// Conversions at the JVM boundary, kept apart from the exports so they can
// run against any backend.

fn turbo_mode<F: ControlFs>(ctl: &DeviceControl<F>, enable: jboolean) {
    if let Err(e) = ctl.enable_turbo_mode(enable != JNI_FALSE) {
        log::warn!("TURBO: {}", e);
    }
}

fn cpu_boost<F: ControlFs>(ctl: &DeviceControl<F>, level: jint) {
    if let Err(e) = ctl.set_cpu_boost(level) {
        log::warn!("CPU: {}", e);
    }
}

fn gpu_boost<F: ControlFs>(ctl: &DeviceControl<F>, level: jint) {
    if let Err(e) = ctl.set_gpu_boost(level) {
        log::warn!("GPU: {}", e);
    }
}

fn cpu_temperature<F: ControlFs>(ctl: &DeviceControl<F>) -> jfloat {
    ctl.cpu_temperature().reported()
}

fn battery_temperature<F: ControlFs>(ctl: &DeviceControl<F>) -> jfloat {
    ctl.battery_temperature().reported()
}

fn max_cpu_frequency<F: ControlFs>(ctl: &DeviceControl<F>) -> jlong {
    jlong::try_from(ctl.max_cpu_frequency_khz()).unwrap_or(jlong::MAX)
}

fn total_memory<F: ControlFs>(ctl: &DeviceControl<F>) -> jlong {
    ctl.memory_info().map(|m| m.total_mib() as jlong).unwrap_or(-1)
}

fn available_memory<F: ControlFs>(ctl: &DeviceControl<F>) -> jlong {
    ctl.memory_info().map(|m| m.available_mib() as jlong).unwrap_or(-1)
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(crate::config::LOG_TAG)
            .with_max_level(log::LevelFilter::Info),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {}

#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: *mut sys::JavaVM, _reserved: *mut c_void) -> jint {
    init_logging();
    JNI_VERSION_1_6
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeEnableTurboMode(
    _env: JNIEnv,
    _this: JObject,
    enable: jboolean,
) {
    turbo_mode(control(), enable);
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeSetCPUBoost(
    _env: JNIEnv,
    _this: JObject,
    level: jint,
) {
    cpu_boost(control(), level);
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeSetGPUBoost(
    _env: JNIEnv,
    _this: JObject,
    level: jint,
) {
    gpu_boost(control(), level);
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeGetCPUTemperature(
    _env: JNIEnv,
    _this: JObject,
) -> jfloat {
    cpu_temperature(control())
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeGetBatteryTemperature(
    _env: JNIEnv,
    _this: JObject,
) -> jfloat {
    battery_temperature(control())
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeGetMaxCPUFrequency(
    _env: JNIEnv,
    _this: JObject,
) -> jlong {
    max_cpu_frequency(control())
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeGetGPUUsage(
    _env: JNIEnv,
    _this: JObject,
) -> jfloat {
    control().gpu_usage_percent() as jfloat
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeGetCPUUsage(
    _env: JNIEnv,
    _this: JObject,
) -> jfloat {
    control().cpu_usage_percent() as jfloat
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeGetTotalMemory(
    _env: JNIEnv,
    _this: JObject,
) -> jlong {
    total_memory(control())
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_PerformanceMonitor_nativeGetAvailableMemory(
    _env: JNIEnv,
    _this: JObject,
) -> jlong {
    available_memory(control())
}

#[no_mangle]
pub extern "system" fn Java_com_kc_gamepf_MainActivity_getNativeVersion(
    mut env: JNIEnv,
    _this: JObject,
) -> jstring {
    match env.new_string(native_version()) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            log::warn!("VERSION: {}", e);
            std::ptr::null_mut()
        }
    }
}
