pub fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_lowercase();

    if s.ends_with("kb") {
        let num: f64 = s
            .trim_end_matches("kb")
            .trim()
            .parse()
            .map_err(|_| format!("Invalid number in '{}'", s))?;
        Ok((num * 1024.0) as u64)
    } else if s.ends_with("mb") {
        let num: f64 = s
            .trim_end_matches("mb")
            .trim()
            .parse()
            .map_err(|_| format!("Invalid number in '{}'", s))?;
        Ok((num * 1024.0 * 1024.0) as u64)
    } else if s.ends_with("gb") {
        let num: f64 = s
            .trim_end_matches("gb")
            .trim()
            .parse()
            .map_err(|_| format!("Invalid number in '{}'", s))?;
        Ok((num * 1024.0 * 1024.0 * 1024.0) as u64)
    } else {
        // Assume bytes if no suffix
        s.parse().map_err(|_| {
            format!(
                "Invalid file size '{}'. Use format like '10MB', '1GB', or '1048576'",
                s
            )
        })
    }
}

/// A fraction in `[0, 1]`, e.g. a similarity threshold or size tolerance.
/// A trailing `%` divides by 100.
pub fn parse_ratio(s: &str) -> Result<f64, String> {
    let s = s.trim();
    let value: f64 = match s.strip_suffix('%') {
        Some(pct) => pct
            .trim()
            .parse::<f64>()
            .map(|v| v / 100.0)
            .map_err(|_| format!("Invalid percentage '{}'", s))?,
        None => s
            .parse()
            .map_err(|_| format!("Invalid ratio '{}'. Use a value like '0.8' or '80%'", s))?,
    };

    if !(0.0..=1.0).contains(&value) {
        return Err(format!("Ratio '{}' must be between 0 and 1", s));
    }
    Ok(value)
}

// Helper function to format file size
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
