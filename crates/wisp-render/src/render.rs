use wisp_dsl::{LayoutSpec, WidgetSpec, WindowSpec};

// ── Renderer ──────────────────────────────────────────────────────────────

/// A UI backend that turns a parsed window into something displayable.
///
/// [`render`] walks the tree depth-first in source order and calls one
/// method per node. Panels bracket their children with
/// [`begin_panel`](Renderer::begin_panel) / [`end_panel`](Renderer::end_panel),
/// so a backend can keep its own container stack.
pub trait Renderer {
    type Output;

    fn begin_window(&mut self, title: &str, width: u32, height: u32, layout: &LayoutSpec);

    fn button(&mut self, label: &str);

    fn label(&mut self, text: &str);

    fn text_field(&mut self, columns: u32);

    /// One mutually exclusive group; `buttons` may be empty.
    fn radio_group(&mut self, buttons: &[String]);

    fn begin_panel(&mut self, layout: &LayoutSpec);

    fn end_panel(&mut self);

    fn finish(self) -> Self::Output;
}

/// Drive `renderer` over `window` and return what it produced.
pub fn render<R: Renderer>(window: &WindowSpec, mut renderer: R) -> R::Output {
    log::debug!("rendering {:?} ({}x{})", window.title, window.width, window.height);
    renderer.begin_window(&window.title, window.width, window.height, &window.layout);
    for widget in &window.children {
        render_widget(widget, &mut renderer);
    }
    renderer.finish()
}

fn render_widget<R: Renderer>(widget: &WidgetSpec, renderer: &mut R) {
    match widget {
        WidgetSpec::Button { label }      => renderer.button(label),
        WidgetSpec::Label { text }        => renderer.label(text),
        WidgetSpec::TextField { columns } => renderer.text_field(*columns),
        WidgetSpec::RadioGroup { buttons } => renderer.radio_group(buttons),
        WidgetSpec::Panel { layout, children } => {
            renderer.begin_panel(layout);
            for child in children {
                render_widget(child, renderer);
            }
            renderer.end_panel();
        }
    }
}
