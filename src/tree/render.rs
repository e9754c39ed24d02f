use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::arena::{NodeId, Tree};
use super::node::NodeRef;

const PIPE: char = '│';
const CORNER: char = '└';
const TEE: char = '├';
const FILLER: char = '─';

/// Render options for tree output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Show control characters in values as `\b`, `\t`, `\n`, `\r`
    pub escape_control_characters: bool,
    /// Spaces after each ancestor column
    pub indent_width: usize,
    /// Maximum depth to display, relative to the rendered node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape_control_characters: true,
            indent_width: 3,
            max_depth: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escapes(mut self, enabled: bool) -> Self {
        self.escape_control_characters = enabled;
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Replace backspace, tab, newline and carriage return with their two
/// character escape sequences.
pub fn escape_control_characters(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{8}' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn label<T: fmt::Display>(node: NodeRef<'_, T>, options: &RenderOptions) -> String {
    let text = node.value().to_string();
    if options.escape_control_characters {
        escape_control_characters(&text)
    } else {
        text
    }
}

impl<T: fmt::Display> NodeRef<'_, T> {
    /// Draw this subtree with box-drawing connectors, one node per line.
    ///
    /// ```text
    /// A
    /// ├── B
    /// │   └── D
    /// └── C
    /// ```
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut output = label(*self, options);
        let mut pending = Vec::new();
        push_children(&mut pending, *self, "", 0, options);

        while let Some(frame) = pending.pop() {
            let child = NodeRef::new(self.tree(), frame.id);

            output.push('\n');
            output.push_str(&frame.prefix);
            output.push(if frame.is_last { CORNER } else { TEE });
            output.push(FILLER);
            output.push(FILLER);
            output.push(' ');
            output.push_str(&label(child, options));

            // Once the last sibling is drawn its column stays blank below it.
            let column = if frame.is_last { ' ' } else { PIPE };
            let prefix = format!("{}{}{}", frame.prefix, column, " ".repeat(options.indent_width));
            push_children(&mut pending, child, &prefix, frame.depth + 1, options);
        }

        tracing::trace!(node = %self.id(), bytes = output.len(), "Rendered subtree");
        output
    }

    /// One-line summary: the value followed by its direct children.
    pub fn summary(&self) -> String {
        let children: Vec<String> = self
            .children()
            .map(|child| child.value().to_string())
            .collect();
        format!("{}[{}]", self.value(), children.join(", "))
    }

    /// Write the rendered subtree followed by a newline.
    pub fn write_to<W: Write>(&self, writer: &mut W, options: &RenderOptions) -> io::Result<()> {
        writeln!(writer, "{}", self.render(options))
    }

    /// Print the rendered subtree to stdout with default options.
    pub fn print(&self) {
        println!("{}", self.render(&RenderOptions::default()));
    }
}

/// A child line waiting to be drawn.
struct Frame {
    id: NodeId,
    prefix: String,
    is_last: bool,
    depth: usize,
}

/// Queue the children of `node` so they pop off `pending` in order.
fn push_children<T>(
    pending: &mut Vec<Frame>,
    node: NodeRef<'_, T>,
    prefix: &str,
    depth: usize,
    options: &RenderOptions,
) {
    if options.max_depth.is_some_and(|max_depth| depth >= max_depth) {
        return;
    }

    let total = node.child_count();
    for (i, child) in node.children().enumerate().rev() {
        pending.push(Frame {
            id: child.id(),
            prefix: prefix.to_string(),
            is_last: i + 1 == total,
            depth,
        });
    }
}

const JSON_INDENT: &str = "  ";

enum JsonStep {
    Open { id: NodeId, level: usize },
    Separator { first: bool, level: usize },
    Close { level: usize },
}

impl<T: Serialize> NodeRef<'_, T> {
    /// Export this subtree as nested `{ "value", "children" }` JSON, pretty
    /// printed with two-space indentation.
    ///
    /// Values are encoded with `serde_json`; the nesting is written with an
    /// explicit worklist, so depth is bounded only by memory.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut output = String::new();
        let mut pending = vec![JsonStep::Open {
            id: self.id(),
            level: 0,
        }];

        while let Some(step) = pending.pop() {
            match step {
                JsonStep::Open { id, level } => {
                    let node = NodeRef::new(self.tree(), id);
                    let inner = JSON_INDENT.repeat(level + 1);
                    output.push_str("{\n");
                    output.push_str(&inner);
                    output.push_str("\"value\": ");
                    output.push_str(&serde_json::to_string(node.value())?);
                    output.push_str(",\n");
                    output.push_str(&inner);
                    output.push_str("\"children\": ");

                    if node.is_leaf() {
                        output.push_str("[]\n");
                        output.push_str(&JSON_INDENT.repeat(level));
                        output.push('}');
                        continue;
                    }

                    output.push('[');
                    pending.push(JsonStep::Close { level });
                    for (i, child) in node.children().enumerate().rev() {
                        pending.push(JsonStep::Open {
                            id: child.id(),
                            level: level + 2,
                        });
                        pending.push(JsonStep::Separator {
                            first: i == 0,
                            level: level + 2,
                        });
                    }
                }
                JsonStep::Separator { first, level } => {
                    if !first {
                        output.push(',');
                    }
                    output.push('\n');
                    output.push_str(&JSON_INDENT.repeat(level));
                }
                JsonStep::Close { level } => {
                    output.push('\n');
                    output.push_str(&JSON_INDENT.repeat(level + 1));
                    output.push_str("]\n");
                    output.push_str(&JSON_INDENT.repeat(level));
                    output.push('}');
                }
            }
        }
        Ok(output)
    }
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root_ref().render(&RenderOptions::default()))
    }
}
