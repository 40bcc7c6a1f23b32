//! Build metadata stamped by `build.rs`
//!
//! The demo logs [`BUILD`] once at startup; the runner tags its lifecycle
//! logs with [`BuildInfo::tag`].

use std::fmt;

/// Compile-time facts about this binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    /// Cargo opt level (0, 1, 2, 3, s, z)
    pub opt_level: &'static str,
    pub rustc: &'static str,
    pub channel: &'static str,
}

pub const BUILD: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    built_at: env!("VERGEN_BUILD_TIMESTAMP"),
    target: env!("VERGEN_CARGO_TARGET_TRIPLE"),
    opt_level: env!("VERGEN_CARGO_OPT_LEVEL"),
    rustc: env!("VERGEN_RUSTC_SEMVER"),
    channel: env!("VERGEN_RUSTC_CHANNEL"),
};

impl BuildInfo {
    /// Short tag, e.g. `0.1.0+x86_64-unknown-linux-gnu.opt3`
    pub fn tag(&self) -> String {
        format!("{}+{}.opt{}", self.version, self.target, self.opt_level)
    }

    pub fn is_optimized(&self) -> bool {
        self.opt_level != "0"
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hearth {} ({}, opt {}, rustc {} {}, built {})",
            self.version, self.target, self.opt_level, self.rustc, self.channel, self.built_at
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BuildInfo {
        BuildInfo {
            version: "0.1.0",
            built_at: "2026-01-01T00:00:00Z",
            target: "x86_64-unknown-linux-gnu",
            opt_level: "0",
            rustc: "1.85.0",
            channel: "stable",
        }
    }

    #[test]
    fn test_tag_names_version_target_and_opt_level() {
        assert_eq!(sample().tag(), "0.1.0+x86_64-unknown-linux-gnu.opt0");
        assert!(!sample().is_optimized());
    }

    #[test]
    fn test_display_is_one_line() {
        let line = sample().to_string();
        assert!(line.starts_with("hearth 0.1.0 ("));
        assert!(line.contains("rustc 1.85.0 stable"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_current_build_carries_package_version() {
        assert_eq!(BUILD.version, env!("CARGO_PKG_VERSION"));
        assert!(!BUILD.target.is_empty());
    }
}
