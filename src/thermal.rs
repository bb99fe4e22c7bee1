use std::path::Path;

use rand::Rng;

use crate::{
    fmt::fmt_c,
    profile::{SyntheticRange, ThermalSource},
    sysfs::{self, ControlFs},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Temperature {
    /// Read from a thermal node.
    Sensor(f32),
    /// No node could be opened; value is made up within the source's range.
    Synthetic(f32),
    /// No node could be opened and the source has no synthetic range.
    Unavailable,
}

impl Temperature {
    pub fn celsius(self) -> Option<f32> {
        match self {
            Temperature::Sensor(c) | Temperature::Synthetic(c) => Some(c),
            Temperature::Unavailable => None,
        }
    }

    pub fn is_sensor(self) -> bool {
        matches!(self, Temperature::Sensor(_))
    }

    /// Plain float for callers that cannot tell readings apart; NaN when unavailable.
    pub fn reported(self) -> f32 {
        self.celsius().unwrap_or(f32::NAN)
    }
}

/// Raw value of the first path that can be read.
///
/// Only an unreadable file moves on to the next path. Contents that do not
/// start with a number read as 0.
pub fn read_first_raw<'a>(fs: &impl ControlFs, paths: &'a [impl AsRef<Path>]) -> Option<(&'a Path, f32)> {
    for p in paths {
        let p = p.as_ref();
        let Some(s) = sysfs::read_to_string(fs, p) else { continue };
        let raw = sysfs::parse_leading_f32(&s).unwrap_or_else(|| {
            log::debug!("THERM: unparsable {} ({:?})", p.display(), s.trim());
            0.0
        });
        return Some((p, raw));
    }
    None
}

pub fn synthetic(range: SyntheticRange, rng: &mut impl Rng) -> f32 {
    range.low + rng.gen_range(0..range.steps()) as f32 / 10.0
}

pub fn read_temperature(fs: &impl ControlFs, source: &ThermalSource) -> Temperature {
    read_temperature_with(fs, source, &mut rand::thread_rng())
}

pub fn read_temperature_with(
    fs: &impl ControlFs,
    source: &ThermalSource,
    rng: &mut impl Rng,
) -> Temperature {
    if let Some((path, raw)) = read_first_raw(fs, &source.paths) {
        let c = raw / source.divisor;
        log::trace!("THERM: {} = {}", path.display(), fmt_c(c));
        return Temperature::Sensor(c);
    }

    match source.synthetic {
        Some(range) => {
            let c = synthetic(range, rng);
            log::debug!("THERM: no readable node, synthetic {}", fmt_c(c));
            Temperature::Synthetic(c)
        }
        None => {
            log::debug!("THERM: no readable node");
            Temperature::Unavailable
        }
    }
}
