pub mod campaign;
pub mod copilot;
pub mod party_chat;

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};
use ratatui::Frame;

/// What a view did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewInput<C> {
    /// Not handled; falls through to the global keymap.
    Ignored,
    /// Handled inside the view.
    Consumed,
    /// Handled, and the app should run this command.
    Command(C),
}

/// Scroll position of a transcript, counted in lines up from the newest.
/// Zero follows new output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scroll {
    from_bottom: usize,
}

impl Scroll {
    /// Scroll towards older lines; `total` bounds how far.
    pub fn up(&mut self, n: usize, total: usize) {
        self.from_bottom = self.from_bottom.saturating_add(n).min(total);
    }

    pub fn down(&mut self, n: usize) {
        self.from_bottom = self.from_bottom.saturating_sub(n);
    }

    pub fn to_bottom(&mut self) {
        self.from_bottom = 0;
    }

    pub fn is_following(&self) -> bool {
        self.from_bottom == 0
    }

    /// First visible line for `total` lines in a viewport of `height`.
    pub fn first_line(&self, total: usize, height: usize) -> usize {
        total.saturating_sub(height).saturating_sub(self.from_bottom)
    }
}

/// Draw `lines` inside `block`, scrolled per `scroll`, with a scrollbar when
/// the transcript overflows.
pub(crate) fn render_transcript(frame: &mut Frame, area: Rect, block: Block<'_>, lines: Vec<Line<'static>>, scroll: Scroll) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    let total = lines.len();
    let first = scroll.first_line(total, height);
    let visible: Vec<Line> = lines.into_iter().skip(first).take(height).collect();
    frame.render_widget(Paragraph::new(visible).wrap(Wrap { trim: false }), inner);

    if total > height {
        let mut state = ScrollbarState::new(total)
            .position(first)
            .viewport_content_length(height);
        frame.render_stateful_widget(Scrollbar::new(ScrollbarOrientation::VerticalRight), area, &mut state);
    }
}
