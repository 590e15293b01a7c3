// ── LayoutSpec ────────────────────────────────────────────────────────────

/// Layout manager declared by `Layout ... :` for a window or panel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum LayoutSpec {
    /// `Layout Flow:`
    Flow,
    /// `Layout Grid(rows, cols[, hgap, vgap]):`
    ///
    /// The gaps are either both present or both absent.
    Grid {
        rows: u32,
        cols: u32,
        hgap: Option<u32>,
        vgap: Option<u32>,
    },
}

impl LayoutSpec {
    pub fn grid(rows: u32, cols: u32) -> Self {
        LayoutSpec::Grid { rows, cols, hgap: None, vgap: None }
    }

    pub fn grid_with_gaps(rows: u32, cols: u32, hgap: u32, vgap: u32) -> Self {
        LayoutSpec::Grid { rows, cols, hgap: Some(hgap), vgap: Some(vgap) }
    }
}

// ── WidgetSpec ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum WidgetSpec {
    /// `Button "label";`
    Button { label: String },
    /// `Label "text";`
    Label { text: String },
    /// `Textfield 20;`
    TextField { columns: u32 },
    /// `Group Radio "a"; Radio "b"; End;`
    RadioGroup { buttons: Vec<String> },
    /// `Panel Layout ...: widgets End;`
    Panel {
        layout: LayoutSpec,
        children: Vec<WidgetSpec>,
    },
}

impl WidgetSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            WidgetSpec::Button { .. }     => "Button",
            WidgetSpec::Label { .. }      => "Label",
            WidgetSpec::TextField { .. }  => "TextField",
            WidgetSpec::RadioGroup { .. } => "RadioGroup",
            WidgetSpec::Panel { .. }      => "Panel",
        }
    }

    /// Nested widgets; empty for everything but panels.
    pub fn children(&self) -> &[WidgetSpec] {
        match self {
            WidgetSpec::Panel { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of widgets in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(WidgetSpec::count).sum::<usize>()
    }
}

// ── WindowSpec ────────────────────────────────────────────────────────────

/// The top-level parse result: one window with its layout and widget tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub layout: LayoutSpec,
    pub children: Vec<WidgetSpec>,
}

impl WindowSpec {
    /// Declared `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of widgets in the tree, panels included.
    pub fn widget_count(&self) -> usize {
        self.children.iter().map(WidgetSpec::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(label: &str) -> WidgetSpec {
        WidgetSpec::Button { label: label.into() }
    }

    #[test]
    fn widget_count_descends_into_panels() {
        let window = WindowSpec {
            title: "T".into(),
            width: 10,
            height: 20,
            layout: LayoutSpec::Flow,
            children: vec![
                button("a"),
                WidgetSpec::Panel {
                    layout: LayoutSpec::grid(1, 2),
                    children: vec![button("b"), WidgetSpec::TextField { columns: 4 }],
                },
            ],
        };
        assert_eq!(window.widget_count(), 4);
        assert_eq!(window.size(), (10, 20));
        assert_eq!(window.children[1].children().len(), 2);
        assert!(window.children[0].children().is_empty());
        assert_eq!(window.children[1].kind_name(), "Panel");
    }
}
