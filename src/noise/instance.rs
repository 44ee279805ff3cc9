//! Noise-dosage instance record and its flat text format.
//!
//! Five lines of whitespace-separated fields:
//!
//! ```text
//! m n
//! alpha_1 .. alpha_m        (scientific notation)
//! d_1 .. d_m                (integers)
//! t_1 .. t_m                (scientific notation)
//! total_hours
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors raised while building, reading, or writing an instance.
#[derive(Error, Debug)]
pub enum InstanceError {
    /// Field values violate the instance invariants.
    #[error("invalid instance: {0}")]
    Invalid(String),

    /// The flat file is malformed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Largest accepted work-cycle count per machine.
///
/// Keeps the lexicographic symmetry base `max(u) + 1` far from `u64`
/// overflow and its powers small enough to stay exact as `f64` weights
/// for realistic machine counts.
pub const MAX_WORK_CYCLES: u64 = 1 << 20;

/// A worker noise-dosage scheduling instance.
///
/// `m` machines each require `d[i]` work cycles of `t[i]` hours, and every
/// cycle exposes its worker to `alpha[i]` units of noise. Each of the `n`
/// workers can work at most `total_hours`.
///
/// Fields are fixed at construction; [`NoiseDosage::new`] checks every
/// invariant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoiseDosage {
    name: String,
    m: usize,
    n: usize,
    alpha: Vec<f64>,
    d: Vec<u64>,
    t: Vec<f64>,
    total_hours: u64,
}

impl NoiseDosage {
    /// Creates a validated instance.
    ///
    /// Requires `m >= 1`, `n >= 1`, per-machine vectors of length `m`,
    /// finite non-negative `alpha` and `t`, `d[i] <= MAX_WORK_CYCLES`, and
    /// `total_hours > 0`.
    pub fn new(
        name: impl Into<String>,
        m: usize,
        n: usize,
        alpha: Vec<f64>,
        d: Vec<u64>,
        t: Vec<f64>,
        total_hours: u64,
    ) -> Result<Self, InstanceError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(InstanceError::Invalid(format!("bad instance name {name:?}")));
        }
        if m == 0 || n == 0 {
            return Err(InstanceError::Invalid(format!(
                "need at least one machine and one worker, got m={m}, n={n}"
            )));
        }
        for (field, len) in [("alpha", alpha.len()), ("d", d.len()), ("t", t.len())] {
            if len != m {
                return Err(InstanceError::Invalid(format!(
                    "{field} has {len} entries, expected {m}"
                )));
            }
        }
        for (field, values) in [("alpha", &alpha), ("t", &t)] {
            if let Some((i, x)) = values
                .iter()
                .enumerate()
                .find(|(_, x)| !x.is_finite() || **x < 0.0)
            {
                return Err(InstanceError::Invalid(format!(
                    "{field}[{i}] = {x} must be finite and non-negative"
                )));
            }
        }
        if let Some((i, x)) = d.iter().enumerate().find(|(_, x)| **x > MAX_WORK_CYCLES) {
            return Err(InstanceError::Invalid(format!(
                "d[{i}] = {x} exceeds the limit of {MAX_WORK_CYCLES} work cycles"
            )));
        }
        if total_hours == 0 {
            return Err(InstanceError::Invalid("total_hours must be positive".into()));
        }
        Ok(Self {
            name,
            m,
            n,
            alpha,
            d,
            t,
            total_hours,
        })
    }

    /// Instance name (file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of machines.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Number of workers.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Noise dosage per work cycle, per machine.
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Required work cycles per machine.
    pub fn d(&self) -> &[u64] {
        &self.d
    }

    /// Hours per work cycle, per machine.
    pub fn t(&self) -> &[f64] {
        &self.t
    }

    /// Hours available to each worker.
    pub fn total_hours(&self) -> u64 {
        self.total_hours
    }

    /// Writes the instance in the flat text format.
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{} {}", self.m, self.n)?;
        writeln!(w, "{}", join_sci(&self.alpha))?;
        let d: Vec<String> = self.d.iter().map(u64::to_string).collect();
        writeln!(w, "{}", d.join(" "))?;
        writeln!(w, "{}", join_sci(&self.t))?;
        writeln!(w, "{}", self.total_hours)?;
        Ok(())
    }

    /// Renders the flat text format into a string.
    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // writing to a Vec cannot fail
        let _ = self.write(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Formats `x` like C's `%e`: six fraction digits and a signed,
/// two-digit-minimum exponent (`1.800000e+01`).
pub fn format_sci(x: f64) -> String {
    let s = format!("{x:.6e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}

fn join_sci(values: &[f64]) -> String {
    values
        .iter()
        .map(|&x| format_sci(x))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_fields<T: FromStr>(
    line: usize,
    text: &str,
    expected: usize,
    what: &str,
) -> Result<Vec<T>, InstanceError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(InstanceError::Parse {
            line,
            message: format!("expected {expected} {what}, found {}", tokens.len()),
        });
    }
    tokens
        .iter()
        .map(|tok| {
            tok.parse::<T>().map_err(|_| InstanceError::Parse {
                line,
                message: format!("invalid {what} token {tok:?}"),
            })
        })
        .collect()
}

fn nth_line<'a>(lines: &[&'a str], idx: usize, what: &str) -> Result<&'a str, InstanceError> {
    lines.get(idx).copied().ok_or_else(|| InstanceError::Parse {
        line: idx + 1,
        message: format!("missing {what}"),
    })
}

/// Parses the flat text format.
///
/// `name` becomes the instance name. Trailing blank lines are accepted;
/// any other extra content is a parse error.
pub fn parse_noise_dosage(name: &str, text: &str) -> Result<NoiseDosage, InstanceError> {
    let lines: Vec<&str> = text.lines().collect();

    let header: Vec<usize> = parse_fields(1, nth_line(&lines, 0, "counts")?, 2, "counts")?;
    let (m, n) = (header[0], header[1]);
    let alpha: Vec<f64> = parse_fields(2, nth_line(&lines, 1, "noise dosages")?, m, "noise dosages")?;
    let d: Vec<u64> = parse_fields(3, nth_line(&lines, 2, "work cycles")?, m, "work cycle counts")?;
    let t: Vec<f64> = parse_fields(4, nth_line(&lines, 3, "cycle durations")?, m, "cycle durations")?;
    let total: Vec<u64> = parse_fields(5, nth_line(&lines, 4, "total hours")?, 1, "total hours")?;

    if let Some(extra) = lines.iter().skip(5).position(|l| !l.trim().is_empty()) {
        return Err(InstanceError::Parse {
            line: extra + 6,
            message: "unexpected content after total hours".into(),
        });
    }

    NoiseDosage::new(name, m, n, alpha, d, t, total[0])
}

/// Reads an instance file; the file stem becomes the instance name.
pub fn read_noise_dosage(path: impl AsRef<Path>) -> Result<NoiseDosage, InstanceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| InstanceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .ok_or_else(|| InstanceError::Invalid(format!("{} has no file name", path.display())))?;
    parse_noise_dosage(&name, &text)
}
