use std::path::Path;

use crate::sysfs::{self, ControlFs};

#[derive(Clone, Debug)]
pub struct CpuStatSample {
    per_cpu: Vec<(u64, u64)>, // (idle_all, total)
}

fn parse_proc_stat_percpu(s: &str) -> Option<Vec<(u64, u64)>> {
    let mut out: Vec<(u64, u64)> = Vec::new();

    for line in s.lines() {
        if !line.starts_with("cpu") { continue; }
        if line.starts_with("cpu ") { continue; }

        let mut it = line.split_whitespace();
        let cpu_label = it.next()?;
        let Some(idx) = cpu_label.get(3..).and_then(|n| n.parse::<usize>().ok()) else { continue };

        let mut vals: Vec<u64> = Vec::with_capacity(10);
        for v in it {
            if let Ok(x) = v.parse::<u64>() { vals.push(x); }
            else { break; }
        }
        if vals.len() < 4 { continue; }

        let user = vals[0];
        let nice = vals[1];
        let system = vals[2];
        let idle = vals[3];
        let iowait = *vals.get(4).unwrap_or(&0);
        let irq = *vals.get(5).unwrap_or(&0);
        let softirq = *vals.get(6).unwrap_or(&0);
        let steal = *vals.get(7).unwrap_or(&0);

        let idle_all = idle + iowait;
        let total = user + nice + system + idle + iowait + irq + softirq + steal;

        if out.len() <= idx { out.resize(idx + 1, (0, 0)); }
        out[idx] = (idle_all, total);
    }

    if out.is_empty() { None } else { Some(out) }
}

/// Per-core busy percent since `prev`; all zeros on the first sample.
pub fn cpu_utils_by_core(
    fs: &impl ControlFs,
    stat_path: &Path,
    prev: &mut Option<CpuStatSample>,
) -> Option<Vec<u8>> {
    let s = sysfs::read_to_string(fs, stat_path)?;
    let cur = parse_proc_stat_percpu(&s)?;

    let util = if let Some(p) = prev {
        let mut out = Vec::with_capacity(cur.len());
        for (i, (idle, total)) in cur.iter().enumerate() {
            let (pidle, ptotal) = p.per_cpu.get(i).copied().unwrap_or((0, 0));
            let didle = idle.saturating_sub(pidle);
            let dtotal = total.saturating_sub(ptotal);
            let u = if dtotal == 0 {
                0
            } else {
                let busy = dtotal.saturating_sub(didle);
                (busy.saturating_mul(100) / dtotal).min(100) as u8
            };
            out.push(u);
        }
        out
    } else {
        vec![0u8; cur.len()]
    };

    *prev = Some(CpuStatSample { per_cpu: cur });
    Some(util)
}

pub fn avg_util(utils: &[u8]) -> u8 {
    if utils.is_empty() { return 0; }
    let sum: u32 = utils.iter().map(|&u| u as u32).sum();
    (sum / utils.len() as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::MemoryControl;

    const STAT: &str = "/proc/stat";

    #[test]
    fn first_sample_is_zero_then_deltas() {
        let fs = MemoryControl::new().with_file(
            STAT,
            "cpu  200 0 200 1600 0 0 0 0 0 0\n\
             cpu0 100 0 100 800 0 0 0 0 0 0\n\
             cpu1 100 0 100 800 0 0 0 0 0 0\n\
             intr 12345\n",
        );
        let mut prev = None;
        assert_eq!(cpu_utils_by_core(&fs, Path::new(STAT), &mut prev), Some(vec![0, 0]));

        // cpu0: 100 busy of 200; cpu1: fully busy
        fs.set_file(
            STAT,
            "cpu  450 0 250 1700 0 0 0 0 0 0\n\
             cpu0 150 0 150 900 0 0 0 0 0 0\n\
             cpu1 300 0 100 800 0 0 0 0 0 0\n",
        );
        let utils = cpu_utils_by_core(&fs, Path::new(STAT), &mut prev).unwrap();
        assert_eq!(utils, vec![50, 100]);
        assert_eq!(avg_util(&utils), 75);
    }

    #[test]
    fn unreadable_stat_keeps_previous() {
        let mut prev = None;
        assert_eq!(cpu_utils_by_core(&MemoryControl::new(), Path::new(STAT), &mut prev), None);
        assert!(prev.is_none());
        assert_eq!(avg_util(&[]), 0);
    }
}
