use crate::domain::error::{BridgeError, BridgeResult};

/// A whitespace-tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> CommandLine<'a> {
    /// Tokenize a line. Returns `None` for blank or whitespace-only lines.
    pub fn parse(line: &'a str) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// Command name (first token)
    pub fn name(&self) -> &'a str {
        self.tokens[0]
    }

    /// Positional arguments after the command name
    pub fn args(&self) -> &[&'a str] {
        &self.tokens[1..]
    }

    /// Argument at `position` (1-based), if present
    pub fn arg(&self, position: usize) -> Option<&'a str> {
        self.tokens.get(position).copied()
    }

    /// Parse a mandatory decimal argument.
    pub fn required(&self, position: usize, name: &'static str) -> BridgeResult<i64> {
        let token = self.arg(position).ok_or_else(|| BridgeError::MissingArgument {
            command: self.name().to_string(),
            position,
            name,
        })?;
        self.convert(token, name, parse_decimal)
    }

    /// Parse an optional decimal argument, falling back to `default` when absent.
    pub fn optional(&self, position: usize, name: &'static str, default: i64) -> BridgeResult<i64> {
        match self.arg(position) {
            Some(token) => self.convert(token, name, parse_decimal),
            None => Ok(default),
        }
    }

    /// Like `optional`, but the literal may carry a `0x`/`0o`/`0b` base prefix.
    pub fn optional_prefixed(
        &self,
        position: usize,
        name: &'static str,
        default: i64,
    ) -> BridgeResult<i64> {
        match self.arg(position) {
            Some(token) => self.convert(token, name, parse_prefixed),
            None => Ok(default),
        }
    }

    fn convert(
        &self,
        token: &str,
        name: &'static str,
        parse: fn(&str) -> Option<i64>,
    ) -> BridgeResult<i64> {
        parse(token).ok_or_else(|| BridgeError::InvalidArgument {
            command: self.name().to_string(),
            name,
            value: token.to_string(),
        })
    }
}

/// Parse a base-10 integer literal: optional sign, digits, `_` allowed
/// between digits.
pub fn parse_decimal(token: &str) -> Option<i64> {
    let (negative, digits) = split_sign(token);
    parse_digits(digits, 10, false).and_then(|magnitude| apply_sign(negative, magnitude))
}

/// Parse an integer literal whose base is taken from its prefix
/// (`0x` hex, `0o` octal, `0b` binary, otherwise decimal).
///
/// Decimal literals with a leading zero are rejected unless every digit is
/// zero, so `010` is an error rather than eight or ten.
pub fn parse_prefixed(token: &str) -> Option<i64> {
    let (negative, body) = split_sign(token);

    let (radix, digits) = match body.get(..2) {
        Some("0x") | Some("0X") => (16, &body[2..]),
        Some("0o") | Some("0O") => (8, &body[2..]),
        Some("0b") | Some("0B") => (2, &body[2..]),
        _ => (10, body),
    };

    if radix == 10 && digits.starts_with('0') && digits.chars().any(|c| c != '0' && c != '_') {
        return None;
    }

    parse_digits(digits, radix, radix != 10).and_then(|magnitude| apply_sign(negative, magnitude))
}

fn split_sign(token: &str) -> (bool, &str) {
    if let Some(rest) = token.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = token.strip_prefix('+') {
        (false, rest)
    } else {
        (false, token)
    }
}

// A single `_` may follow a base prefix, e.g. `0x_ff`.
fn parse_digits(digits: &str, radix: u32, leading_underscore: bool) -> Option<i128> {
    let digits = if leading_underscore {
        digits.strip_prefix('_').unwrap_or(digits)
    } else {
        digits
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if !cleaned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    i128::from_str_radix(&cleaned, radix).ok()
}

fn apply_sign(negative: bool, magnitude: i128) -> Option<i64> {
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}
