#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_parse_file_size_bytes() {
        assert_eq!(parse_file_size("1024").unwrap(), 1024);
        assert_eq!(parse_file_size("0").unwrap(), 0);
        assert_eq!(parse_file_size("1048576").unwrap(), 1048576);
    }

    #[test]
    fn test_parse_file_size_units() {
        assert_eq!(parse_file_size("1KB").unwrap(), 1024);
        assert_eq!(parse_file_size("1.5KB").unwrap(), 1536);
        assert_eq!(parse_file_size("10MB").unwrap(), 10_485_760);
        assert_eq!(parse_file_size("2GB").unwrap(), 2_147_483_648);
    }

    #[test]
    fn test_parse_file_size_case_and_whitespace() {
        assert_eq!(parse_file_size("1mb").unwrap(), 1_048_576);
        assert_eq!(parse_file_size(" 1 MB ").unwrap(), 1_048_576);
        assert_eq!(parse_file_size("\t2GB\n").unwrap(), 2_147_483_648);
    }

    #[test]
    fn test_parse_file_size_invalid() {
        assert!(parse_file_size("").is_err());
        assert!(parse_file_size("abc").is_err());
        assert!(parse_file_size("1XB").is_err());
        assert!(parse_file_size("1.5.5MB").is_err());
        assert!(parse_file_size("1TB").is_err()); // Not supported
    }

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("0.8").unwrap(), 0.8);
        assert_eq!(parse_ratio("0").unwrap(), 0.0);
        assert_eq!(parse_ratio("1").unwrap(), 1.0);
        assert_eq!(parse_ratio("5%").unwrap(), 0.05);
        assert_eq!(parse_ratio(" 80 % ").unwrap(), 0.8);
    }

    #[test]
    fn test_parse_ratio_invalid() {
        assert!(parse_ratio("1.5").is_err());
        assert!(parse_ratio("-0.1").is_err());
        assert!(parse_ratio("150%").is_err());
        assert!(parse_ratio("high").is_err());
        assert!(parse_ratio("").is_err());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.0 GB");
    }
}
