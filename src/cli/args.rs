//! CLI argument definitions using clap

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "tls-auditor")]
#[command(version)]
#[command(
    about = "Audit hostnames for expiring certificates and weak TLS protocol support",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File with one hostname per line
    #[arg(long, value_name = "FILE", env = "SUBDOMAIN_FILE_PATH")]
    pub hosts: Option<PathBuf>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    /// Telegram chat to notify
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub chat_id: Option<String>,

    /// Flag certificates expiring within this many days
    #[arg(long, value_name = "DAYS")]
    pub expiry_days: Option<i64>,

    /// Number of hosts audited in parallel
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Port to audit
    #[arg(long)]
    pub port: Option<u16>,

    /// Repeat the audit every SECS seconds
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Number of cycles in periodic mode (0 = until interrupted)
    #[arg(long, default_value = "0", requires = "interval")]
    pub count: u64,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line and environment overrides on top of file settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(hosts) = &self.hosts {
            settings.audit.hosts_file = Some(hosts.clone());
        }
        if let Some(token) = &self.bot_token {
            settings.notify.bot_token = Some(token.clone());
        }
        if let Some(chat_id) = &self.chat_id {
            settings.notify.chat_id = Some(chat_id.clone());
        }
        if let Some(days) = self.expiry_days {
            settings.audit.expiry_threshold_days = days;
        }
        if let Some(parallel) = self.parallel {
            settings.audit.parallel = parallel;
        }
        if let Some(port) = self.port {
            settings.audit.port = port;
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = Cli::try_parse_from([
            "tls-auditor",
            "--hosts",
            "domains.txt",
            "--bot-token",
            "123:abc",
            "--chat-id",
            "-100",
            "--expiry-days",
            "21",
            "--parallel",
            "8",
            "--port",
            "8443",
        ])
        .unwrap();

        let mut settings = Settings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.audit.hosts_file, Some(PathBuf::from("domains.txt")));
        assert_eq!(settings.notify.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(settings.notify.chat_id.as_deref(), Some("-100"));
        assert_eq!(settings.audit.expiry_threshold_days, 21);
        assert_eq!(settings.audit.parallel, 8);
        assert_eq!(settings.audit.port, 8443);
    }

    #[test]
    fn test_count_requires_interval() {
        assert!(Cli::try_parse_from(["tls-auditor", "--count", "3"]).is_err());

        let cli = Cli::try_parse_from(["tls-auditor", "--interval", "3600", "--count", "3"])
            .unwrap();
        assert_eq!(cli.interval(), Some(Duration::from_secs(3600)));
        assert_eq!(cli.count, 3);
    }
}
