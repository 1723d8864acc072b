//! # Banner Component
//!
//! One dismissible message above the list: red for request failures, yellow
//! for notices. Esc dismisses it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::state::{Banner, BannerKind};
use crate::tui::component::Component;

pub struct BannerView<'a> {
    pub banner: &'a Banner,
}

impl BannerView<'_> {
    /// Rows needed to show the banner at `width`, borders included.
    pub fn height(banner: &Banner, width: u16) -> u16 {
        let inner = width.saturating_sub(2).max(1) as usize;
        let chars = banner.text.chars().count().max(1);
        chars.div_ceil(inner).min(4) as u16 + 2
    }
}

impl Component for BannerView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (color, title) = match self.banner.kind {
            BannerKind::Error => (Color::Red, " Error (Esc to dismiss) "),
            BannerKind::Notice => (Color::Yellow, " Notice (Esc to dismiss) "),
        };
        let paragraph = Paragraph::new(self.banner.text.as_str())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_grows_with_text_and_is_capped() {
        let short = Banner::error("boom");
        assert_eq!(BannerView::height(&short, 80), 3);

        let long = Banner::notice("x".repeat(200));
        assert_eq!(BannerView::height(&long, 42), 2 + 4);
    }

    #[test]
    fn test_height_of_huge_body_stays_capped() {
        // 65536 rows at width 3 would wrap to 0 if cast to u16 first
        let huge = Banner::error("x".repeat(65_536));
        assert_eq!(BannerView::height(&huge, 3), 2 + 4);
    }
}
