//! Call-local header sets.
//!
//! Every operation builds a fresh [`HeaderSet`], so nothing set for one call
//! can reach another. Lines are kept in raw `Name: value` form and in insertion
//! order; parsing into typed headers happens in the transport.

use std::fmt::Display;

use crate::types::Credential;

/// Header carrying the session token on every post-login call.
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// Headers sent when establishing a session.
pub const BASELINE: [&str; 4] = [
    "Accept: */*",
    "Accept-Encoding: gzip, deflate, br",
    "Connection: keep-alive",
    "User-Agent: curl/7.54.0",
];

/// Ordered raw header lines for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    lines: Vec<String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline + `Authorization: Basic …` + caller extras.
    pub fn session_create<I, S>(credential: &Credential, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        set.extend(BASELINE);
        set.push_header("Authorization", format_args!("Basic {}", credential.as_str()));
        set.extend(extra);
        set
    }

    /// Just the session token header.
    pub fn session_token(token: &str) -> Self {
        let mut set = Self::new();
        set.push_header(SESSION_HEADER, token);
        set
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn push_header(&mut self, name: &str, value: impl Display) {
        self.lines.push(format!("{name}: {value}"));
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    /// Raw lines as added, including any empty ones.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Transmittable `(name, value)` pairs. Blank and malformed lines are
    /// skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.lines.iter().filter_map(|line| split_line(line))
    }

    /// Non-blank lines that do not parse as `Name: value`.
    pub fn malformed(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && split_line(line).is_none())
    }

    /// First value for `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.trim().split_once(':')?;
    let name = name.trim();
    (!name.is_empty()).then(|| (name, value.trim()))
}
