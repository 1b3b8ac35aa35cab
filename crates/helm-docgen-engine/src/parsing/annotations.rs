use std::sync::OnceLock;

use regex::Regex;

use super::fence::FenceTracker;

/// Overrides a key's comment can carry.
///
/// ```text
/// # @type: string
/// # @default: global.datacenter
/// # @recurse: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// `@type`: replaces the kind inferred from the value.
    pub kind: Option<String>,
    /// `@default`: replaces the default inferred from the value.
    pub default: Option<String>,
    /// `@recurse`: `false` stops descent into the value.
    pub recurse: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Type,
    Default,
    Recurse,
}

/// One line of a comment block after the comment marker was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommentLine<'a> {
    Text(&'a str),
    Directive(Directive, &'a str),
}

impl Annotations {
    /// Scans a raw comment block for directives. Absence is not an error.
    pub fn extract(comment: &str) -> Self {
        let mut annotations = Self::default();
        for line in classify(comment) {
            let CommentLine::Directive(directive, value) = line else {
                continue;
            };
            match directive {
                Directive::Type => {
                    annotations.kind.get_or_insert_with(|| value.to_string());
                }
                Directive::Default => {
                    annotations.default.get_or_insert_with(|| value.to_string());
                }
                Directive::Recurse if annotations.recurse.is_none() => match value {
                    "true" => annotations.recurse = Some(true),
                    "false" => annotations.recurse = Some(false),
                    other => log::warn!("ignoring @recurse value {other:?}, expected true or false"),
                },
                Directive::Recurse => {}
            }
        }
        annotations
    }

    /// `@recurse: false` was given.
    pub fn stops_recursion(&self) -> bool {
        self.recurse == Some(false)
    }
}

/// Documentation text of a comment block: directive lines dropped, comment
/// markers removed, surrounding whitespace trimmed.
pub fn documentation_text(comment: &str) -> String {
    classify(comment)
        .into_iter()
        .filter_map(|line| match line {
            CommentLine::Text(text) => Some(text),
            CommentLine::Directive(..) => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Removes leading whitespace, the `#` marker and at most one following
/// space or tab. Lines without a marker are returned unchanged.
///
/// Only one marker is removed, so `# # yaml comment` inside an example keeps
/// its inner `#`.
pub fn strip_comment_marker(line: &str) -> &str {
    match line.trim_start().strip_prefix('#') {
        Some(rest) => rest
            .strip_prefix(' ')
            .or_else(|| rest.strip_prefix('\t'))
            .unwrap_or(rest),
        None => line,
    }
}

fn classify(comment: &str) -> Vec<CommentLine<'_>> {
    static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
    let directive_regex = DIRECTIVE_REGEX.get_or_init(|| {
        Regex::new(r"@(type|default|recurse): (.*)$").expect("Invalid directive regex")
    });

    let mut fences = FenceTracker::default();
    comment
        .lines()
        .map(strip_comment_marker)
        .map(|text| {
            if fences.push(text) {
                return CommentLine::Text(text);
            }
            let Some(caps) = directive_regex.captures(text) else {
                return CommentLine::Text(text);
            };
            let directive = match &caps[1] {
                "type" => Directive::Type,
                "default" => Directive::Default,
                _ => Directive::Recurse,
            };
            let value = caps.get(2).map_or("", |m| m.as_str().trim_end());
            CommentLine::Directive(directive, value)
        })
        .collect()
}
