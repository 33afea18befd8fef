// src/command.rs

//! Structured command lines.
//!
//! Commands are assembled as an ordered list of words and `key=value`
//! parameters and only rendered to a single shell string when handed to the
//! build engine. Parameter formatting lives in one place ([`ParamValue`]).

use std::fmt;
use std::path::{Path, PathBuf};

/// Value of a `key=value` parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Rendered without a decimal point (`%d`).
    Int(i64),
    /// Rendered with six fractional digits (`%f`).
    Float(f64),
    /// Rendered verbatim.
    Text(String),
    /// Rendered inside double quotes.
    Quoted(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v:.6}"),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Quoted(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// One element of a command line after the program.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Inserted as-is; may hold several shell words (custom launcher flags).
    Word(String),
    Param { key: String, value: ParamValue },
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Word(w) => f.write_str(w),
            Arg::Param { key, value } => write!(f, "{key}={value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<Arg>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.push_word(word);
        self
    }

    pub fn push_word(&mut self, word: impl Into<String>) {
        self.args.push(Arg::Word(word.into()));
    }

    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.push_param(key, value);
        self
    }

    pub fn push_param(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.args.push(Arg::Param {
            key: key.to_string(),
            value: value.into(),
        });
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// All `key=value` parameters in order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.args.iter().filter_map(|arg| match arg {
            Arg::Param { key, value } => Some((key.as_str(), value)),
            Arg::Word(_) => None,
        })
    }

    /// First value given for `key`.
    pub fn param_value(&self, key: &str) -> Option<&ParamValue> {
        self.params().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Render to the single string handed to the build engine.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
