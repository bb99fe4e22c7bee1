pub fn fmt_khz(khz: u64) -> String {
    if khz >= 1_000_000 {
        format!("{:.2}GHz", khz as f64 / 1_000_000.0)
    } else {
        format!("{:.0}MHz", khz as f64 / 1_000.0)
    }
}

pub fn fmt_c(c: f32) -> String {
    format!("{:.1}C", c)
}

pub fn fmt_mib(kb: u64) -> String {
    format!("{}MiB", kb / 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(fmt_khz(2_400_000), "2.40GHz");
        assert_eq!(fmt_khz(787_200), "787MHz");
        assert_eq!(fmt_c(45.0), "45.0C");
        assert_eq!(fmt_mib(8 * 1024 * 1024), "8192MiB");
    }
}
