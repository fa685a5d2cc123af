//! Run-argument strings: `program [subprogram] -key=value -flag ...`.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{Error, Result};

const QUOTES: [char; 2] = ['"', '\''];

/// Key whose value may contain spaces that the token split has broken up.
const PROGRAM_ARGS_KEY: &str = "pargs";

/// Parsed run arguments. Valueless flags map to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunArgsDescriptor {
    pub program_name: String,
    pub program_subname: String,
    pub args: BTreeMap<String, String>,
}

impl RunArgsDescriptor {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }
}

fn parse_error(token: &str, reason: &'static str) -> Error {
    error!("Run arguments not specified correctly at {:?}: {}", token, reason);
    Error::Parse {
        token: token.to_string(),
        reason,
    }
}

/// Strip one pair of matching quotes around `value`, if present.
fn unquote(value: &str) -> &str {
    for q in QUOTES {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Whether `value` opens a quote it does not close.
fn opens_quote(value: &str) -> bool {
    match value.chars().next() {
        Some(q) if QUOTES.contains(&q) => value.len() == 1 || !value[1..].ends_with(q),
        _ => false,
    }
}

/// Parse a raw run-argument string into a descriptor.
///
/// Token 0 is the program name and token 1, unless it starts with `-`, the
/// subprogram name. Every later token must be `-key=value` or `-flag`. The
/// `pargs` value is re-assembled across tokens when its opening quote is not
/// closed in the same token; its closing quote must be attached to a token.
pub fn parse_run_input(raw: &str) -> Result<RunArgsDescriptor> {
    let tokens: Vec<&str> = raw.split(' ').filter(|t| !t.is_empty()).collect();

    let Some(&program_name) = tokens.first() else {
        return Err(parse_error(raw, "missing program name"));
    };
    if program_name.starts_with('-') {
        return Err(parse_error(program_name, "program name must not start with '-'"));
    }

    let mut rest = 1;
    let program_subname = match tokens.get(1) {
        Some(t) if !t.starts_with('-') => {
            rest = 2;
            t.to_string()
        }
        _ => String::new(),
    };

    let mut args = BTreeMap::new();
    let mut i = rest;
    while i < tokens.len() {
        let token = tokens[i];
        if !token.starts_with('-') {
            return Err(parse_error(token, "argument must start with '-'"));
        }
        let body = token.trim_start_matches('-');
        let (key, value) = match body.split_once('=') {
            Some((key, value)) => (key, value),
            None => (body, ""),
        };
        if key.is_empty() {
            return Err(parse_error(token, "empty argument name"));
        }

        let value = if key == PROGRAM_ARGS_KEY && opens_quote(value) {
            let mut joined = value.to_string();
            loop {
                i += 1;
                let Some(next) = tokens.get(i) else {
                    return Err(parse_error(token, "unterminated quote in pargs"));
                };
                joined.push(' ');
                joined.push_str(next);
                if next.contains(QUOTES) {
                    break;
                }
            }
            joined[1..].trim_end_matches(QUOTES).to_string()
        } else {
            unquote(value).to_string()
        };

        args.insert(key.to_string(), value);
        i += 1;
    }

    Ok(RunArgsDescriptor {
        program_name: program_name.to_string(),
        program_subname,
        args,
    })
}
