//! Plain-text rendering of model output.
//!
//! SYSTEM CONTEXT
//! ==============
//! The analysis endpoint answers with lightweight markdown. The result panel
//! and the PDF report both show the stripped form produced here, so the two
//! never diverge.
//!
//! DESIGN
//! ======
//! Parsing goes through `pulldown-cmark` and only text-bearing events are
//! kept. Block structure is re-emitted as plain line breaks, bullets as
//! `- ` and ordered items with their number, which parse back to the same
//! output.
//!
//! One pass can still surface markup: escapes (`\*x\*`), code spans
//! (`` `__init__` ``) and entities (`&lt;b&gt;`) come out as literal markers.
//! Passes repeat until the text stops changing, so the result is a fixed
//! point and stripping it again is a no-op.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Upper bound on stripping passes. Each extra pass peels one level of
/// escaping or entity encoding; real model output settles in two.
const MAX_PASSES: usize = 32;

/// Strip bold/italic/heading/code/link markup, keeping the readable text.
#[must_use]
pub fn strip_markdown(markdown: &str) -> String {
    let mut current = strip_pass(markdown);
    for _ in 1..MAX_PASSES {
        let next = strip_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn strip_pass(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut out = PlainWriter::default();
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, options) {
        match event {
            // Adjacent and nested lists share plain line breaks; a following
            // paragraph still opens its own block.
            Event::Start(Tag::List(start)) => {
                out.line_break();
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                out.line_break();
            }
            Event::Start(Tag::Item) => {
                out.line_break();
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "- ".to_owned(),
                };
                out.push(&marker);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                if lists.is_empty() {
                    out.block_break();
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                if lists.is_empty() {
                    out.block_break();
                }
            }
            Event::Start(Tag::Paragraph | Tag::Heading { .. }) | Event::End(TagEnd::Paragraph | TagEnd::Heading(_)) => {
                if lists.is_empty() {
                    out.block_break();
                }
            }
            Event::Text(text) if in_code_block => out.push_lines(&text),
            Event::Text(text) | Event::Code(text) => out.push(&text),
            Event::SoftBreak | Event::HardBreak => out.line_break(),
            Event::Rule => out.block_break(),
            _ => {}
        }
    }

    out.finish()
}

/// Accumulates text while collapsing requested breaks into at most one blank line.
#[derive(Default)]
struct PlainWriter {
    buf: String,
    pending_newlines: usize,
}

impl PlainWriter {
    fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.buf.is_empty() {
            for _ in 0..self.pending_newlines {
                self.buf.push('\n');
            }
        }
        self.pending_newlines = 0;
        self.buf.push_str(text);
    }

    /// Push verbatim text whose lines end in `\n`, as code blocks deliver it.
    fn push_lines(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            match line.strip_suffix('\n') {
                Some(line) => {
                    self.push(line);
                    self.line_break();
                }
                None => self.push(line),
            }
        }
    }

    fn line_break(&mut self) {
        self.pending_newlines = self.pending_newlines.max(1);
    }

    fn block_break(&mut self) {
        self.pending_newlines = 2;
    }

    fn finish(self) -> String {
        self.buf.trim_end().to_owned()
    }
}
