// src/exec/redact.rs

//! Secret redaction for command lines and captured output.
//!
//! The rule set is fixed at process start and passed by reference into the
//! runner; it is never mutated at runtime. Redaction is purely cosmetic: it
//! changes what gets logged or embedded in an enriched error, never the
//! semantic error itself.

use regex::Regex;

/// One pattern to replacement pair. Every replacement is a fixed point of
/// its own pattern, which keeps [`Redactor::redact`] idempotent.
struct RedactRule {
    pattern: Regex,
    replacement: &'static str,
}

/// An immutable set of redaction rules.
pub struct Redactor {
    rules: Vec<RedactRule>,
}

impl Redactor {
    /// The standard rule set: bearer/access-token fields, deployment tokens,
    /// `--username`/`--password` flags, and `--from-literal=K=V` flags (the
    /// key is preserved, the value redacted).
    pub fn with_default_rules() -> Self {
        let rules = vec![
            rule(r#""accessToken": ".*""#, r#""accessToken": "<redacted>""#),
            rule(r"--deployment-token \S+", "--deployment-token <redacted>"),
            rule(r"--username \S+", "--username <redacted>"),
            rule(r"--password \S+", "--password <redacted>"),
            rule(
                r"--from-literal=([^=]+)=(\S+)",
                "--from-literal=$1=<redacted>",
            ),
        ];

        Self { rules }
    }

    /// Replace every secret-bearing match in `text` with its redacted form.
    ///
    /// Pure and idempotent: each replacement is a fixed point of its own
    /// pattern, so re-applying the redactor yields the same text.
    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            out = rule.pattern.replace_all(&out, rule.replacement).into_owned();
        }
        out
    }
}

fn rule(pattern: &str, replacement: &'static str) -> RedactRule {
    RedactRule {
        // The patterns are literals known at compile time; they always parse.
        pattern: Regex::new(pattern).expect("built-in redaction pattern is valid"),
        replacement,
    }
}
