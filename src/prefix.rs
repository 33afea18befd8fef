// src/prefix.rs

//! Artifact prefixes and per-file name templates.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{MpiflowError, Result};
use crate::types::ARTIFACT_SUFFIX;

/// Append [`ARTIFACT_SUFFIX`] unless `prefix` already ends with it.
pub fn normalize(prefix: &str) -> String {
    if prefix.ends_with(ARTIFACT_SUFFIX) {
        prefix.to_string()
    } else {
        format!("{prefix}{ARTIFACT_SUFFIX}")
    }
}

/// File-name prefix shared by a family of on-disk artifacts.
///
/// Always carries the container suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactPrefix(String);

impl ArtifactPrefix {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ArtifactPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtifactPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArtifactPrefix {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ArtifactPrefix {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

static CONVERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"%(?P<flags>[-+ 0#]*)(?P<width>[0-9]*)(?:\.(?P<prec>[0-9]*))?(?P<conv>[A-Za-z%]?)",
    )
    .expect("conversion regex is valid")
});

/// Largest field width or precision accepted in a file-name template.
pub const MAX_TEMPLATE_WIDTH: usize = 4096;

/// Substitute `value` into a printf-style file-name template such as
/// `"shot%03d"`.
///
/// The template must contain exactly one integer conversion: `%d`, `%i`,
/// `%u`, `%s`, `%o`, `%x` or `%X`, with optional `-`, `+`, space, `0`, `#`
/// flags, a width and a `.precision`. Widths and precisions above
/// [`MAX_TEMPLATE_WIDTH`] are rejected. `%%` produces a literal percent
/// sign.
pub fn interpolate(template: &str, value: i64) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut last = 0;
    let mut conversions = 0;

    for caps in CONVERSION.captures_iter(template) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        out.push_str(&template[last..whole.start]);
        last = whole.end;

        let flags = caps.name("flags").map_or("", |m| m.as_str());
        let width = caps.name("width").map_or("", |m| m.as_str());
        let precision = caps.name("prec").map(|m| m.as_str());
        let conv = caps.name("conv").map_or("", |m| m.as_str());

        match conv {
            "%" if flags.is_empty() && width.is_empty() && precision.is_none() => out.push('%'),
            "d" | "i" | "u" | "s" | "o" | "x" | "X" => {
                conversions += 1;
                let spec = FieldSpec {
                    flags,
                    width: bounded(width, template)?,
                    precision: precision.map(|p| bounded(p, template)).transpose()?,
                };
                out.push_str(&format_field(value, &spec, conv));
            }
            "" => {
                return Err(MpiflowError::Template(format!(
                    "incomplete conversion '{}' in '{template}'",
                    &template[whole]
                )));
            }
            other => {
                return Err(MpiflowError::Template(format!(
                    "unsupported conversion '%{other}' in '{template}'"
                )));
            }
        }
    }
    out.push_str(&template[last..]);

    match conversions {
        1 => Ok(out),
        0 => Err(MpiflowError::Template(format!(
            "'{template}' has no integer conversion for the file number"
        ))),
        n => Err(MpiflowError::Template(format!(
            "'{template}' has {n} conversions, expected exactly one"
        ))),
    }
}

struct FieldSpec<'a> {
    flags: &'a str,
    width: usize,
    precision: Option<usize>,
}

/// Width or precision digits; empty means 0.
fn bounded(digits: &str, template: &str) -> Result<usize> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<usize>()
        .ok()
        .filter(|n| *n <= MAX_TEMPLATE_WIDTH)
        .ok_or_else(|| {
            MpiflowError::Template(format!(
                "width {digits} too big in '{template}' (max {MAX_TEMPLATE_WIDTH})"
            ))
        })
}

fn format_field(value: i64, spec: &FieldSpec<'_>, conv: &str) -> String {
    let flags = spec.flags;
    let left = flags.contains('-');

    if conv == "s" {
        let mut text = value.to_string();
        if let Some(p) = spec.precision {
            text.truncate(p);
        }
        let fill = spec.width.saturating_sub(text.len());
        return if left {
            format!("{text}{}", " ".repeat(fill))
        } else {
            format!("{}{text}", " ".repeat(fill))
        };
    }

    let magnitude = value.unsigned_abs();
    let (mut digits, radix_prefix) = match conv {
        "o" => (format!("{magnitude:o}"), "0o"),
        "x" => (format!("{magnitude:x}"), "0x"),
        "X" => (format!("{magnitude:X}"), "0X"),
        _ => (magnitude.to_string(), ""),
    };
    if let Some(p) = spec.precision {
        if digits.len() < p {
            digits.insert_str(0, &"0".repeat(p - digits.len()));
        }
    }

    let sign = if value < 0 {
        "-"
    } else if flags.contains('+') {
        "+"
    } else if flags.contains(' ') {
        " "
    } else {
        ""
    };
    let radix_prefix = if flags.contains('#') { radix_prefix } else { "" };

    let len = sign.len() + radix_prefix.len() + digits.len();
    let fill = spec.width.saturating_sub(len);

    if left {
        format!("{sign}{radix_prefix}{digits}{}", " ".repeat(fill))
    } else if flags.contains('0') {
        format!("{sign}{radix_prefix}{}{digits}", "0".repeat(fill))
    } else {
        format!("{}{sign}{radix_prefix}{digits}", " ".repeat(fill))
    }
}

/// On-disk file name of an artifact as the build engine tracks it.
///
/// Names without an extension get [`ARTIFACT_SUFFIX`]; names that already
/// carry one (`.rsf`, `.txt`, ...) are kept.
pub fn artifact_file_name(name: &str) -> String {
    let has_extension = std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| !ext.is_empty());
    if has_extension {
        name.to_string()
    } else {
        normalize(name)
    }
}
