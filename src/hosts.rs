//! Host list input
//!
//! One hostname per line. Lines are trimmed; blank lines and `#` comments are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read hostnames from any line source, preserving order
pub fn read_hosts<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut hosts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        hosts.push(trimmed.to_string());
    }
    Ok(hosts)
}

/// Read hostnames from a file
pub fn load_hosts<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    read_hosts(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_skips_blank_lines_and_comments() {
        let input = "example.com\n\n  # staging\n  api.example.com  \n\r\nmail.example.com";
        let hosts = read_hosts(Cursor::new(input)).unwrap();
        assert_eq!(hosts, vec!["example.com", "api.example.com", "mail.example.com"]);
    }

    #[test]
    fn test_load_hosts_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "b.example.com").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "a.example.com").unwrap();

        let hosts = load_hosts(file.path()).unwrap();
        assert_eq!(hosts, vec!["b.example.com", "a.example.com"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_hosts("/nonexistent/hosts.txt").is_err());
    }
}
