use crate::ast::{LayoutSpec, WidgetSpec, WindowSpec};
use crate::error::ParseError;
use crate::lexer::{LexerOptions, Token, TokenKind, tokenize_with};

/// A rule did not match. The reason is already on the parser's trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mismatch;

type Step<T> = Result<T, Mismatch>;

/// Failure state to roll back to once a production succeeds.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    trail: usize,
    failed_at: usize,
}

/// One branch of the `Widget` ordered choice. `Ok(None)` means the branch
/// declined without consuming anything.
type Alternative<'t> = fn(&mut Parser<'t>) -> Step<Option<WidgetSpec>>;

/// Deepest accepted `Panel` nesting. One more open panel fails the whole
/// document with `Widget: Panel: nesting too deep` at that `Panel` token,
/// so neither parsing nor walking the tree can exhaust the stack.
pub const MAX_PANEL_DEPTH: usize = 256;

// ── Parser ────────────────────────────────────────────────────────────────

/// Recursive-descent parser with one token of lookahead.
///
/// The only backtracking is in the repeated productions (`Widgets`,
/// `RadioButtons`): the cursor is saved before each item and restored when
/// the item fails, which ends the repetition.
pub struct Parser<'t> {
    tokens: &'t [Token],
    /// Index of the lookahead token.
    pos: usize,
    /// Failure fragments, innermost first.
    trail: Vec<String>,
    /// 1-based index of the farthest token at which an expectation failed.
    failed_at: usize,
    /// Panels currently open around the cursor.
    depth: usize,
    /// Set when the document cannot be accepted no matter how the
    /// alternatives backtrack.
    fatal: Option<ParseError>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0, trail: Vec::new(), failed_at: 1, depth: 0, fatal: None }
    }

    /// Parse a complete document: `GUI` followed by end of input.
    pub fn parse_window(mut self) -> Result<WindowSpec, ParseError> {
        match self.window() {
            Ok(window) => {
                log::debug!(
                    "parsed window {:?} with {} widgets from {} tokens",
                    window.title,
                    window.widget_count(),
                    self.tokens.len()
                );
                Ok(window)
            }
            Err(Mismatch) => {
                let err = match self.fatal.take() {
                    Some(err) => err,
                    None => ParseError::new(self.failed_at, self.trail.join("; ")),
                };
                log::debug!("{}", err);
                Err(err)
            }
        }
    }

    fn peek(&self) -> TokenKind {
        self.tokens.get(self.pos).map(|t| t.kind).unwrap_or(TokenKind::EndOfFile)
    }

    fn describe_lookahead(&self) -> String {
        match self.tokens.get(self.pos) {
            Some(tok) => format!("{} {:?}", tok.kind, tok.lexeme),
            None => "end of file".to_string(),
        }
    }

    /// Record a failed expectation at the lookahead token.
    fn mismatch(&mut self, rule: &str, expected: &str) -> Mismatch {
        self.failed_at = self.failed_at.max(self.pos + 1);
        let found = self.describe_lookahead();
        self.trail.push(format!("{rule}: expected {expected}, found {found}"));
        Mismatch
    }

    /// Record that a nested pattern failed inside `rule`.
    fn context(&mut self, rule: &str, pattern: &str) -> Mismatch {
        self.trail.push(format!("{rule}: {pattern} pattern not found"));
        Mismatch
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint { trail: self.trail.len(), failed_at: self.failed_at }
    }

    /// Forget failures recorded since `cp`; the production they belonged to matched.
    fn discard_failures(&mut self, cp: Checkpoint) {
        self.trail.truncate(cp.trail);
        self.failed_at = cp.failed_at;
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, rule: &str) -> Step<&'t Token> {
        let tokens = self.tokens;
        match tokens.get(self.pos) {
            Some(tok) if tok.kind == kind => {
                self.pos += 1;
                Ok(tok)
            }
            _ => Err(self.mismatch(rule, kind.name())),
        }
    }

    fn expect_end(&mut self, rule: &str) -> Step<()> {
        if self.peek() == TokenKind::EndOfFile {
            Ok(())
        } else {
            Err(self.mismatch(rule, "end of file"))
        }
    }

    fn number(&mut self, rule: &str) -> Step<u32> {
        let tokens = self.tokens;
        match tokens.get(self.pos) {
            Some(tok) if tok.kind == TokenKind::Number => match tok.lexeme.parse::<u32>() {
                Ok(n) => {
                    self.pos += 1;
                    Ok(n)
                }
                Err(_) => Err(self.mismatch(rule, "an unsigned integer")),
            },
            _ => Err(self.mismatch(rule, "Number")),
        }
    }

    /// `" String "`
    fn quoted(&mut self, rule: &str) -> Step<String> {
        self.expect(TokenKind::Quotation, rule)?;
        let text = self.expect(TokenKind::String, rule)?.lexeme.clone();
        self.expect(TokenKind::Quotation, rule)?;
        Ok(text)
    }

    /// Zero or more `item`s. Restores the cursor after the failing attempt.
    fn repeat<T>(&mut self, item: fn(&mut Self) -> Step<T>) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            let saved = self.pos;
            let cp = self.checkpoint();
            match item(self) {
                Ok(value) => {
                    self.discard_failures(cp);
                    items.push(value);
                }
                Err(Mismatch) => {
                    self.pos = saved;
                    break;
                }
            }
        }
        items
    }

    // ── GUI ───────────────────────────────────────────────────────────────

    fn window(&mut self) -> Step<WindowSpec> {
        const RULE: &str = "GUI";
        self.expect(TokenKind::Window, RULE)?;
        let title = self.quoted(RULE)?;
        self.expect(TokenKind::OpenParen, RULE)?;
        let width = self.number(RULE)?;
        self.expect(TokenKind::Comma, RULE)?;
        let height = self.number(RULE)?;
        self.expect(TokenKind::CloseParen, RULE)?;
        let layout = self.layout().map_err(|_| self.context(RULE, "Layout"))?;

        let cp = self.checkpoint();
        let children = self.widgets();
        self.expect(TokenKind::End, RULE)?;
        self.discard_failures(cp);

        self.expect(TokenKind::Period, RULE)?;
        self.expect_end(RULE)?;
        Ok(WindowSpec { title, width, height, layout, children })
    }

    // ── Layout ────────────────────────────────────────────────────────────

    fn layout(&mut self) -> Step<LayoutSpec> {
        const RULE: &str = "Layout";
        self.expect(TokenKind::Layout, RULE)?;
        let layout = self.layout_type().map_err(|_| self.context(RULE, "LayoutType"))?;
        self.expect(TokenKind::Colon, RULE)?;
        Ok(layout)
    }

    fn layout_type(&mut self) -> Step<LayoutSpec> {
        const RULE: &str = "LayoutType";
        if self.accept(TokenKind::Flow) {
            return Ok(LayoutSpec::Flow);
        }
        if !self.accept(TokenKind::Grid) {
            return Err(self.mismatch(RULE, "Flow or Grid"));
        }

        self.expect(TokenKind::OpenParen, RULE)?;
        let rows = self.number(RULE)?;
        self.expect(TokenKind::Comma, RULE)?;
        let cols = self.number(RULE)?;
        if self.accept(TokenKind::CloseParen) {
            return Ok(LayoutSpec::grid(rows, cols));
        }
        if !self.accept(TokenKind::Comma) {
            return Err(self.mismatch(RULE, "Comma or CloseParen"));
        }
        let hgap = self.number(RULE)?;
        self.expect(TokenKind::Comma, RULE)?;
        let vgap = self.number(RULE)?;
        self.expect(TokenKind::CloseParen, RULE)?;
        Ok(LayoutSpec::grid_with_gaps(rows, cols, hgap, vgap))
    }

    // ── Widgets ───────────────────────────────────────────────────────────

    fn widgets(&mut self) -> Vec<WidgetSpec> {
        self.repeat(Self::widget)
    }

    /// Ordered choice over the widget kinds. A branch that fails after
    /// matching its keyword restores the cursor and fails the whole choice.
    fn widget(&mut self) -> Step<WidgetSpec> {
        let alternatives: [Alternative<'t>; 5] =
            [Self::button, Self::group, Self::label, Self::panel, Self::text_field];

        let saved = self.pos;
        for alternative in alternatives {
            match alternative(self) {
                Ok(Some(widget)) => return Ok(widget),
                Ok(None) => {}
                Err(Mismatch) => {
                    self.pos = saved;
                    return Err(Mismatch);
                }
            }
        }
        Err(self.mismatch("Widget", "Button, Group, Label, Panel or Textfield"))
    }

    fn button(&mut self) -> Step<Option<WidgetSpec>> {
        const RULE: &str = "Widget: Button";
        if !self.accept(TokenKind::Button) {
            return Ok(None);
        }
        let label = self.quoted(RULE)?;
        self.expect(TokenKind::Semicolon, RULE)?;
        Ok(Some(WidgetSpec::Button { label }))
    }

    fn label(&mut self) -> Step<Option<WidgetSpec>> {
        const RULE: &str = "Widget: Label";
        if !self.accept(TokenKind::Label) {
            return Ok(None);
        }
        let text = self.quoted(RULE)?;
        self.expect(TokenKind::Semicolon, RULE)?;
        Ok(Some(WidgetSpec::Label { text }))
    }

    fn text_field(&mut self) -> Step<Option<WidgetSpec>> {
        const RULE: &str = "Widget: Textfield";
        if !self.accept(TokenKind::Textfield) {
            return Ok(None);
        }
        let columns = self.number(RULE)?;
        self.expect(TokenKind::Semicolon, RULE)?;
        Ok(Some(WidgetSpec::TextField { columns }))
    }

    fn group(&mut self) -> Step<Option<WidgetSpec>> {
        const RULE: &str = "Widget: Group";
        if !self.accept(TokenKind::Group) {
            return Ok(None);
        }
        log::trace!("group opened at token {}", self.pos);

        let cp = self.checkpoint();
        let buttons = self.repeat(Self::radio_button);
        self.expect(TokenKind::End, RULE)?;
        self.discard_failures(cp);

        self.expect(TokenKind::Semicolon, RULE)?;
        log::trace!("group closed at token {} with {} buttons", self.pos, buttons.len());
        Ok(Some(WidgetSpec::RadioGroup { buttons }))
    }

    fn radio_button(&mut self) -> Step<String> {
        const RULE: &str = "RadioButton";
        self.expect(TokenKind::Radio, RULE)?;
        let label = self.quoted(RULE)?;
        self.expect(TokenKind::Semicolon, RULE)?;
        Ok(label)
    }

    fn panel(&mut self) -> Step<Option<WidgetSpec>> {
        const RULE: &str = "Widget: Panel";
        if !self.accept(TokenKind::Panel) {
            return Ok(None);
        }
        if self.depth >= MAX_PANEL_DEPTH {
            self.fatal = Some(ParseError::new(self.pos, format!("{RULE}: nesting too deep")));
            return Err(Mismatch);
        }
        self.depth += 1;
        let panel = self.panel_body();
        self.depth -= 1;
        panel.map(Some)
    }

    fn panel_body(&mut self) -> Step<WidgetSpec> {
        const RULE: &str = "Widget: Panel";
        log::trace!("panel opened at token {} (depth {})", self.pos, self.depth);
        let layout = self.layout().map_err(|_| self.context(RULE, "Layout"))?;

        let cp = self.checkpoint();
        let children = self.widgets();
        self.expect(TokenKind::End, RULE)?;
        self.discard_failures(cp);

        self.expect(TokenKind::Semicolon, RULE)?;
        log::trace!("panel closed at token {} with {} children", self.pos, children.len());
        Ok(WidgetSpec::Panel { layout, children })
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

pub fn parse(tokens: &[Token]) -> Result<WindowSpec, ParseError> {
    Parser::new(tokens).parse_window()
}

/// Lex and parse a source string.
pub fn parse_str(src: &str) -> Result<WindowSpec, ParseError> {
    parse_str_with(src, LexerOptions::default())
}

pub fn parse_str_with(src: &str, options: LexerOptions) -> Result<WindowSpec, ParseError> {
    let tokens = tokenize_with(src.lines(), options);
    parse(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_str;

    fn button(label: &str) -> WidgetSpec {
        WidgetSpec::Button { label: label.into() }
    }

    #[test]
    fn demo_window() {
        let window =
            parse_str(r#"Window "Demo" (300,200) Layout Flow: Button "OK"; Label "Hi"; End."#).unwrap();
        assert_eq!(
            window,
            WindowSpec {
                title: "Demo".into(),
                width: 300,
                height: 200,
                layout: LayoutSpec::Flow,
                children: vec![button("OK"), WidgetSpec::Label { text: "Hi".into() }],
            }
        );
    }

    #[test]
    fn nested_panel_keeps_its_children() {
        let src = r#"
Window "Nest" (400,300) Layout Flow:
  Panel Layout Grid(2,2):
    Button "A";
    Button "B";
  End;
End."#;
        let window = parse_str(src).unwrap();
        assert_eq!(window.children.len(), 1);
        assert_eq!(
            window.children[0],
            WidgetSpec::Panel {
                layout: LayoutSpec::grid(2, 2),
                children: vec![button("A"), button("B")],
            }
        );
    }

    #[test]
    fn siblings_after_a_panel_stay_in_the_parent() {
        let src = r#"Window "W" (1,1) Layout Flow:
            Panel Layout Flow: Label "in"; End;
            Label "out";
        End."#;
        let window = parse_str(src).unwrap();
        assert_eq!(window.children.len(), 2);
        assert_eq!(window.children[0].children().len(), 1);
        assert_eq!(window.children[1], WidgetSpec::Label { text: "out".into() });
    }

    #[test]
    fn grid_with_gaps() {
        let window = parse_str(r#"Window "G" (10,10) Layout Grid(3,4,5,6): End."#).unwrap();
        assert_eq!(window.layout, LayoutSpec::grid_with_gaps(3, 4, 5, 6));
    }

    #[test]
    fn radio_group_and_text_field() {
        let src = r#"Window "R" (10,10) Layout Flow:
            Group Radio "Red"; Radio "Dark Green"; End;
            Textfield 20;
        End."#;
        let window = parse_str(src).unwrap();
        assert_eq!(
            window.children,
            vec![
                WidgetSpec::RadioGroup { buttons: vec!["Red".into(), "Dark Green".into()] },
                WidgetSpec::TextField { columns: 20 },
            ]
        );
    }

    #[test]
    fn empty_widget_lists_are_allowed() {
        let window = parse_str(r#"Window "E" (1,2) Layout Flow: Group End; Panel Layout Flow: End; End."#)
            .unwrap();
        assert_eq!(window.children[0], WidgetSpec::RadioGroup { buttons: vec![] });
        assert_eq!(window.children[1].children().len(), 0);
    }

    #[test]
    fn long_widget_lists_do_not_recurse() {
        let mut src = String::from(r#"Window "L" (1,1) Layout Flow:"#);
        for _ in 0..20_000 {
            src.push_str(" Textfield 1;");
        }
        src.push_str(" End.");
        assert_eq!(parse_str(&src).unwrap().children.len(), 20_000);
    }

    fn nested_panels(depth: usize) -> String {
        let mut src = String::from(r#"Window "D" (1,1) Layout Flow:"#);
        src.push_str(&" Panel Layout Flow:".repeat(depth));
        src.push_str(&" End;".repeat(depth));
        src.push_str(" End.");
        src
    }

    #[test]
    fn panels_nest_up_to_the_limit() {
        let window = parse_str(&nested_panels(MAX_PANEL_DEPTH)).unwrap();
        assert_eq!(window.widget_count(), MAX_PANEL_DEPTH);
    }

    #[test]
    fn deeper_nesting_is_rejected_at_the_first_extra_panel() {
        let err = parse_str(&nested_panels(2_000)).unwrap_err();
        // twelve header tokens, then four per panel
        assert_eq!(err.position, 12 + 4 * MAX_PANEL_DEPTH + 1);
        assert_eq!(err.message, "Widget: Panel: nesting too deep");
    }

    #[test]
    fn missing_period_points_past_the_end() {
        let tokens = tokenize_str(r#"Window "Demo" (300,200) Layout Flow: Button "OK"; End"#);
        let err = parse(&tokens).unwrap_err();
        assert_eq!(err.position, tokens.len() + 1);
        assert_eq!(err.message, "GUI: expected Period, found end of file");
    }

    #[test]
    fn unmatched_end_is_rejected() {
        // Window " Demo " ( 300 , 200 ) Layout Flow : End End .
        let tokens = tokenize_str(r#"Window "Demo" (300,200) Layout Flow: End End."#);
        let err = parse(&tokens).unwrap_err();
        assert_eq!(err.position, 14);
        assert!(err.message.ends_with(r#"GUI: expected Period, found End "End""#));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let tokens = tokenize_str(r#"Window "W" (1,1) Layout Flow: End. End."#);
        let err = parse(&tokens).unwrap_err();
        assert_eq!(err.position, 15);
        assert!(err.message.contains("expected end of file"));
    }

    #[test]
    fn truncated_streams_fail_at_their_end() {
        let tokens = tokenize_str(r#"Window "W" (1,1) Layout Flow: Label "x"; End."#);
        // every strict prefix is malformed and must fail exactly where it stops
        for len in 0..tokens.len() {
            let err = parse(&tokens[..len]).unwrap_err();
            assert_eq!(err.position, len + 1, "prefix of {len} tokens: {err}");
        }
    }

    #[test]
    fn non_digit_inside_parentheses() {
        // Window " D " ( 10 , 2a ...
        let err = parse_str(r#"Window "D" (10,2a) Layout Flow: End."#).unwrap_err();
        assert_eq!(err.position, 8);
        assert_eq!(err.message, r#"GUI: expected Number, found NotFound "2a""#);
    }

    #[test]
    fn fallback_number_is_not_an_integer() {
        let err = parse_str(r#"Window "W" (1,1) Layout Flow: Textfield wide; End."#).unwrap_err();
        assert!(err.message.contains(r#"Widget: Textfield: expected an unsigned integer, found Number "wide""#));
    }

    #[test]
    fn strict_numbers_reports_not_found() {
        let opts = LexerOptions { strict_numbers: true };
        let err = parse_str_with(r#"Window "W" (1,1) Layout Flow: Textfield wide; End."#, opts).unwrap_err();
        assert!(err.message.contains(r#"Widget: Textfield: expected Number, found NotFound "wide""#));
    }

    #[test]
    fn failed_button_does_not_fall_into_other_widgets() {
        // the label is missing; Group logic must never run against `;`
        let src = r#"Window "W" (1,1) Layout Flow: Button; Group End; End."#;
        let tokens = tokenize_str(src);
        let err = parse(&tokens).unwrap_err();
        // Window " W " ( 1 , 1 ) Layout Flow : Button ;
        assert_eq!(err.position, 14);
        assert_eq!(
            err.message,
            r#"Widget: Button: expected Quotation, found Semicolon ";"; GUI: expected End, found Button "Button""#
        );
    }

    #[test]
    fn broken_panel_reports_the_nested_chain() {
        let src = r#"Window "W" (1,1) Layout Flow: Panel Layout Grid(1): End; End."#;
        let err = parse_str(src).unwrap_err();
        assert_eq!(
            err.message,
            concat!(
                r#"LayoutType: expected Comma, found CloseParen ")"; "#,
                "Layout: LayoutType pattern not found; ",
                "Widget: Panel: Layout pattern not found; ",
                r#"GUI: expected End, found Panel "Panel""#,
            )
        );
        // the `)` inside the panel's grid
        assert_eq!(err.position, 18);
    }

    #[test]
    fn missing_layout_is_reported_in_gui_context() {
        let err = parse_str(r#"Window "W" (1,1) Button "x"; End."#).unwrap_err();
        assert_eq!(
            err.message,
            r#"Layout: expected Layout, found Button "Button"; GUI: Layout pattern not found"#
        );
        assert_eq!(err.position, 10);
    }

    #[test]
    fn empty_title_is_accepted() {
        let window = parse_str(r#"Window "" (5,6) Layout Flow: End."#).unwrap();
        assert_eq!(window.title, "");
    }
}
