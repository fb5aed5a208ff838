//! Browser and OS normalization.
//!
//! Bugzilla stores free-form version and OS labels ("80 Branch", "Trunk",
//! "All"). The intake form wants a product version such as
//! `Firefox Mobile 84.0` and a concrete OS name, so this module maps one onto
//! the other. When a bug carries no version number at all, the current
//! nightly version is looked up from release metadata.

mod error;
mod metadata;

pub use error::VersionError;
pub use metadata::{ProductDetailsClient, ReleaseChannel, ReleaseMetadata};

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// iOS builds report an internal version unrelated to the desktop train.
pub const IOS_FIXED_VERSION: &str = "29.0";

/// OS used when the bug does not name one.
pub const DEFAULT_OS: &str = "Windows 10";

/// Generic OS labels and the concrete OS reported in their place.
const OS_ALIASES: [(&str, &str); 4] = [
    ("All", DEFAULT_OS),
    ("Windows", DEFAULT_OS),
    ("macOS", "Mac OS X 10.15"),
    ("iOS", "iOS 14.1"),
];

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit pattern compiles"));

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("number pattern compiles")
});

/// Browser flavour derived from the OS label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Desktop,
    /// Android.
    Mobile,
    Ios,
}

impl Platform {
    /// Derives the platform from an OS label.
    pub fn from_os(os: Option<&str>) -> Self {
        match os {
            Some(os) if os.contains("Android") => Self::Mobile,
            Some(os) if os.contains("iOS") => Self::Ios,
            _ => Self::Desktop,
        }
    }

    /// Word inserted between "Firefox" and the version, if any.
    pub fn qualifier(self) -> Option<&'static str> {
        match self {
            Self::Desktop => None,
            Self::Mobile => Some("Mobile"),
            Self::Ios => Some("iOS"),
        }
    }

    /// Release channel whose nightly applies to this platform.
    pub fn channel(self) -> ReleaseChannel {
        match self {
            Self::Desktop => ReleaseChannel::Desktop,
            Self::Mobile | Self::Ios => ReleaseChannel::Mobile,
        }
    }
}

/// Returns the concrete OS name for an OS label.
///
/// Unset labels map to [`DEFAULT_OS`], generic aliases to a representative
/// version, and anything else is returned unchanged.
pub fn resolve_os(os: Option<&str>) -> String {
    let Some(os) = os else {
        return DEFAULT_OS.to_string();
    };

    OS_ALIASES
        .iter()
        .find(|(alias, _)| *alias == os)
        .map_or(os, |(_, resolved)| *resolved)
        .to_string()
}

/// Produces the "Firefox <platform> <version>" browser string for a bug.
pub struct VersionResolver {
    metadata: Arc<dyn ReleaseMetadata>,
}

impl VersionResolver {
    /// Creates a resolver that consults `metadata` for nightly versions.
    pub fn new(metadata: Arc<dyn ReleaseMetadata>) -> Self {
        Self { metadata }
    }

    /// Resolves the browser string for a version label and OS label.
    ///
    /// The first run of digits in `version` is the major version. Without
    /// one, the current nightly for the platform's channel is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] if the nightly lookup fails. A version
    /// containing digits never fails.
    pub async fn resolve_browser(
        &self,
        version: Option<&str>,
        os: Option<&str>,
    ) -> Result<String, VersionError> {
        let platform = Platform::from_os(os);

        if let Some(major) = version.and_then(|v| DIGITS.find(v)) {
            return Ok(format_browser(platform, major.as_str()));
        }

        if platform == Platform::Ios {
            // The fixed iOS version wins regardless of the nightly number.
            return Ok(format_browser(platform, IOS_FIXED_VERSION));
        }

        let channel = platform.channel();
        debug!(?channel, "No version number on bug, using nightly");
        let nightly = self.metadata.nightly_version(channel).await?;

        if leading_number(&nightly).is_none() {
            return Err(VersionError::InvalidVersion {
                key: channel.nightly_key(),
                value: nightly,
            });
        }

        Ok(format_browser(platform, &nightly))
    }
}

fn leading_number(value: &str) -> Option<&str> {
    LEADING_NUMBER
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|number| number.as_str())
}

/// Formats the browser string. `version` must start with a number unless
/// the platform is iOS.
fn format_browser(platform: Platform, version: &str) -> String {
    let version = match platform {
        Platform::Ios => IOS_FIXED_VERSION.to_string(),
        _ => one_decimal(leading_number(version).unwrap_or("0")),
    };

    match platform.qualifier() {
        Some(qualifier) => format!("Firefox {qualifier} {version}"),
        None => format!("Firefox {version}"),
    }
}

/// Writes a decimal number (`84`, `86.05`, `.5`) with exactly one fractional
/// digit, rounding half up.
///
/// Works on the digits rather than an `f64`, so ties always round up and
/// digit runs of any length stay exact.
fn one_decimal(number: &str) -> String {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    let mut digits: Vec<u8> = whole
        .trim_start_matches('0')
        .bytes()
        .map(|digit| digit - b'0')
        .collect();
    let mut fraction = fraction.bytes().map(|digit| digit - b'0');
    digits.push(fraction.next().unwrap_or(0));

    if fraction.next().is_some_and(|digit| digit >= 5) {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let tenths = digits.pop().unwrap_or(0);
    let whole: String = if digits.is_empty() {
        "0".to_string()
    } else {
        digits.iter().map(|digit| char::from(b'0' + digit)).collect()
    };
    format!("{whole}.{tenths}")
}
