use std::fmt;

const UNKNOWN: &str = "unknown";

/// What `build.rs` recorded about the binary.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// Labelled rows for the `version` command.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        [
            ("Build hash", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built at", self.timestamp.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "income_core {}", self.version)?;
        if self.git_hash != UNKNOWN {
            write!(f, " ({} {})", self.git_hash, self.git_status)?;
        }
        Ok(())
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("INCOME_CORE_BUILD_HASH").unwrap_or(UNKNOWN),
        git_status: option_env!("INCOME_CORE_BUILD_STATUS").unwrap_or(UNKNOWN),
        timestamp: option_env!("INCOME_CORE_BUILD_TIMESTAMP").unwrap_or(UNKNOWN),
        target: option_env!("INCOME_CORE_BUILD_TARGET").unwrap_or(UNKNOWN),
        profile: option_env!("INCOME_CORE_BUILD_PROFILE").unwrap_or(UNKNOWN),
        rustc: option_env!("INCOME_CORE_BUILD_RUSTC").unwrap_or(UNKNOWN),
    }
}
