//! Function body parsing.
//!
//! A function body interleaves `<parameter=NAME>...</parameter>` spans with
//! untagged text. Untagged text is kept as raw segments and never scanned for
//! further tags.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::model::{FunctionCall, ParameterSet};

static PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<parameter=([^>]+)>(.*?)</parameter>").expect("parameter pattern is valid")
});

/// Split a function body into raw text segments and named parameters.
///
/// Segments and parameter contents are trimmed; empty segments are dropped.
/// On a duplicate parameter name the last occurrence wins.
#[must_use]
pub fn parse_function_body(body: &str) -> (Vec<String>, ParameterSet) {
    let mut segments = Vec::new();
    let mut parameters = ParameterSet::new();
    let mut i = 0;

    // Exits either by exhaustion (a parameter closes exactly at the end of the
    // body) or by break once no further parameter is found, flushing the rest.
    while i < body.len() {
        let rest = &body[i..];
        let Some(caps) = PARAMETER.captures(rest) else {
            push_segment(&mut segments, rest);
            break;
        };
        let Some(whole) = caps.get(0) else { break };

        push_segment(&mut segments, &rest[..whole.start()]);

        let name = caps.get(1).map_or("", |m| m.as_str());
        let content = caps.get(2).map_or("", |m| m.as_str()).trim();
        trace!(parameter = name, len = content.len(), "Parsed parameter");
        parameters.insert(name, content);

        i += whole.end();
    }

    (segments, parameters)
}

/// Build a [`FunctionCall`] from a tag name and its body.
#[must_use]
pub fn parse_function_call(name: &str, body: &str) -> FunctionCall {
    let (raw_segments, parameters) = parse_function_body(body);
    FunctionCall {
        name: name.to_string(),
        parameters,
        raw_segments,
    }
}

fn push_segment(segments: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        segments.push(text.to_string());
    }
}
