use std::collections::HashMap;

use saphyr_parser::{Event, Parser, ScalarStyle as EventStyle, Span, Tag};

use super::resolve::{NULL_TAG, STR_TAG, resolve_plain, short_tag};
use super::{Node, NodeKind, ScalarStyle};
use crate::error::YamlError;

/// Loads the first document of `source` into a generic node tree.
///
/// Returns `Ok(None)` when the stream holds no document at all (empty input or
/// comments only).
pub fn parse(source: &str) -> Result<Option<Node>, YamlError> {
    let events = collect_events(source)?;
    let mut loader = Loader::new(source, &events);
    let root = loader.load_document()?;
    if let Some(root) = &root {
        log::debug!(
            "loaded {} root with {} content nodes",
            root.kind,
            root.content.len()
        );
    }
    Ok(root)
}

fn collect_events(source: &str) -> Result<Vec<(Event<'_>, Span)>, YamlError> {
    let mut events = Vec::new();
    for result in Parser::new_from_str(source) {
        events.push(result?);
    }
    Ok(events)
}

struct Loader<'a> {
    lines: Vec<&'a str>,
    events: &'a [(Event<'a>, Span)],
    pos: usize,
    anchors: HashMap<usize, Node>,
    /// Last 1-based source line owned by already-built content. Comment lines
    /// at or above it can't belong to nodes built later.
    consumed_line: usize,
}

impl<'a> Loader<'a> {
    fn new(source: &'a str, events: &'a [(Event<'a>, Span)]) -> Self {
        Self {
            lines: source.lines().collect(),
            events,
            pos: 0,
            anchors: HashMap::new(),
            consumed_line: 0,
        }
    }

    fn peek(&self) -> Option<&'a (Event<'a>, Span)> {
        let events = self.events;
        events.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a (Event<'a>, Span)> {
        let item = self.peek();
        self.pos += 1;
        item
    }

    fn load_document(&mut self) -> Result<Option<Node>, YamlError> {
        while let Some((event, _)) = self.advance() {
            match event {
                Event::StreamStart => continue,
                Event::DocumentStart(_) => return self.load_root(),
                _ => return Ok(None),
            }
        }
        Ok(None)
    }

    fn load_root(&mut self) -> Result<Option<Node>, YamlError> {
        match self.peek() {
            None | Some((Event::DocumentEnd | Event::StreamEnd, _)) => Ok(None),
            Some(_) => self.build_node(0).map(Some),
        }
    }

    /// Builds the node starting at the current event.
    ///
    /// `parent_indent` is the 0-based column of the owning key or sequence
    /// marker; block scalar bodies extend over lines indented past it.
    fn build_node(&mut self, parent_indent: usize) -> Result<Node, YamlError> {
        let Some((event, span)) = self.advance() else {
            return Err(YamlError::UnexpectedEnd);
        };

        match event {
            Event::Scalar(value, style, anchor_id, tag) => {
                let node = self.build_scalar(value, *style, tag.as_deref(), span, parent_indent);
                self.remember(*anchor_id, &node);
                Ok(node)
            }
            Event::SequenceStart(anchor_id, tag) => {
                let node = self.build_sequence(tag.as_deref(), span)?;
                self.remember(*anchor_id, &node);
                Ok(node)
            }
            Event::MappingStart(anchor_id, tag) => {
                let node = self.build_mapping(tag.as_deref(), span)?;
                self.remember(*anchor_id, &node);
                Ok(node)
            }
            Event::Alias(anchor_id) => {
                let line = span.start.line();
                let mut node = self
                    .anchors
                    .get(anchor_id)
                    .cloned()
                    .ok_or(YamlError::UndefinedAlias { line })?;
                node.line = line;
                node.column = span.start.col() + 1;
                node.head_comment.clear();
                self.consume(span.end.line());
                Ok(node)
            }
            _ => Err(YamlError::UnexpectedEvent {
                line: span.start.line(),
            }),
        }
    }

    fn build_scalar(
        &mut self,
        value: &str,
        style: EventStyle,
        tag: Option<&Tag>,
        span: &Span,
        parent_indent: usize,
    ) -> Node {
        let style = convert_style(style);
        let tag = match tag {
            Some(tag) => short_tag(&tag.handle, &tag.suffix),
            None if style == ScalarStyle::Plain => resolve_plain(value).to_string(),
            None => STR_TAG.to_string(),
        };

        let line = span.start.line();
        match style {
            ScalarStyle::Literal | ScalarStyle::Folded => {
                let end = self.block_scalar_end(line, parent_indent);
                self.consume(end);
            }
            // An implicit null (`key:` with nothing after it) is positioned at
            // the next token, which may sit below comments we still need.
            ScalarStyle::Plain if tag == NULL_TAG => {}
            _ => self.consume(span.end.line()),
        }

        Node {
            kind: NodeKind::Scalar,
            tag,
            value: value.to_string(),
            style,
            head_comment: String::new(),
            line,
            column: span.start.col() + 1,
            content: vec![],
        }
    }

    fn build_sequence(&mut self, tag: Option<&Tag>, span: &Span) -> Result<Node, YamlError> {
        let indent = span.start.col();
        let mut content = Vec::new();

        loop {
            match self.peek() {
                Some((Event::SequenceEnd, _)) => {
                    self.advance();
                    break;
                }
                Some((_, item_span)) => {
                    let comment = self.head_comment(item_span.start.line());
                    let mut item = self.build_node(indent)?;
                    if item.head_comment.is_empty() {
                        item.head_comment = comment;
                    }
                    content.push(item);
                }
                None => return Err(YamlError::UnexpectedEnd),
            }
        }

        Ok(Node {
            kind: NodeKind::Sequence,
            tag: tag.map_or_else(|| "!!seq".to_string(), |t| short_tag(&t.handle, &t.suffix)),
            value: String::new(),
            style: ScalarStyle::Plain,
            head_comment: String::new(),
            line: span.start.line(),
            column: indent + 1,
            content,
        })
    }

    fn build_mapping(&mut self, tag: Option<&Tag>, span: &Span) -> Result<Node, YamlError> {
        let indent = span.start.col();
        let mut content = Vec::new();

        loop {
            match self.peek() {
                Some((Event::MappingEnd, _)) => {
                    self.advance();
                    break;
                }
                Some((_, key_span)) => {
                    let comment = self.head_comment(key_span.start.line());
                    let mut key = self.build_node(indent)?;
                    key.head_comment = comment;
                    let value = self.build_node(key.column.saturating_sub(1))?;
                    content.push(key);
                    content.push(value);
                }
                None => return Err(YamlError::UnexpectedEnd),
            }
        }

        Ok(Node {
            kind: NodeKind::Mapping,
            tag: tag.map_or_else(|| "!!map".to_string(), |t| short_tag(&t.handle, &t.suffix)),
            value: String::new(),
            style: ScalarStyle::Plain,
            head_comment: String::new(),
            line: span.start.line(),
            column: indent + 1,
            content,
        })
    }

    /// Collects the block of full-line comments directly above `line`.
    ///
    /// Stops at the first blank or non-comment line and never reaches into
    /// lines owned by earlier content.
    fn head_comment(&self, line: usize) -> String {
        let mut first = line;
        while first >= 2 && first > self.consumed_line + 1 {
            match self.lines.get(first - 2) {
                Some(text) if text.trim_start().starts_with('#') => first -= 1,
                _ => break,
            }
        }

        if first >= line {
            return String::new();
        }
        self.lines[first - 1..line - 1]
            .iter()
            .map(|text| text.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Last line of a literal or folded scalar whose header is on `header_line`.
    fn block_scalar_end(&self, header_line: usize, parent_indent: usize) -> usize {
        let mut end = header_line;
        for (idx, text) in self.lines.iter().enumerate().skip(header_line) {
            if text.trim().is_empty() {
                continue;
            }
            if indent_of(text) <= parent_indent {
                break;
            }
            end = idx + 1;
        }
        end
    }

    fn consume(&mut self, line: usize) {
        self.consumed_line = self.consumed_line.max(line);
    }

    fn remember(&mut self, anchor_id: usize, node: &Node) {
        if anchor_id > 0 {
            self.anchors.insert(anchor_id, node.clone());
        }
    }
}

fn indent_of(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}

fn convert_style(style: EventStyle) -> ScalarStyle {
    match style {
        EventStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        EventStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        EventStyle::Literal => ScalarStyle::Literal,
        EventStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Plain,
    }
}
