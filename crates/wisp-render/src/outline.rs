use std::fmt::Write;

use wisp_dsl::LayoutSpec;

use crate::render::Renderer;

/// Renders a window as an indented text outline, one widget per line.
///
/// ```text
/// Window "Demo" 300x200 [Flow]
///   Button "OK"
///   Panel [Grid 2x2]
///     Label "Hi"
/// ```
pub struct OutlineRenderer {
    out: String,
    depth: usize,
    indent: usize,
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self { out: String::new(), depth: 0, indent: 2 }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        let pad = self.depth * self.indent;
        // writing into a String cannot fail
        let _ = writeln!(self.out, "{:pad$}{}", "", args, pad = pad);
    }
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `Flow`, `Grid 2x3`, or `Grid 2x3 gap 4,5`.
pub fn describe_layout(layout: &LayoutSpec) -> String {
    match layout {
        LayoutSpec::Flow => "Flow".to_string(),
        LayoutSpec::Grid { rows, cols, hgap: Some(h), vgap: Some(v) } => {
            format!("Grid {rows}x{cols} gap {h},{v}")
        }
        LayoutSpec::Grid { rows, cols, .. } => format!("Grid {rows}x{cols}"),
    }
}

impl Renderer for OutlineRenderer {
    type Output = String;

    fn begin_window(&mut self, title: &str, width: u32, height: u32, layout: &LayoutSpec) {
        self.line(format_args!("Window {title:?} {width}x{height} [{}]", describe_layout(layout)));
        self.depth += 1;
    }

    fn button(&mut self, label: &str) {
        self.line(format_args!("Button {label:?}"));
    }

    fn label(&mut self, text: &str) {
        self.line(format_args!("Label {text:?}"));
    }

    fn text_field(&mut self, columns: u32) {
        self.line(format_args!("TextField ({columns} columns)"));
    }

    fn radio_group(&mut self, buttons: &[String]) {
        self.line(format_args!("RadioGroup"));
        self.depth += 1;
        for button in buttons {
            self.line(format_args!("Radio {button:?}"));
        }
        self.depth -= 1;
    }

    fn begin_panel(&mut self, layout: &LayoutSpec) {
        self.line(format_args!("Panel [{}]", describe_layout(layout)));
        self.depth += 1;
    }

    fn end_panel(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn finish(self) -> String {
        self.out
    }
}
