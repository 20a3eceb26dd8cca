//! Bottom status bar: mode hints, network, notices, and text inputs

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use tonforge_app::state::{AppState, UiMode};
use tonforge_app::NoticeKind;

use crate::theme;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static str {
        match self.state.ui_mode {
            UiMode::Normal => {
                " q quit · tab focus · p projects · n/N new · r rename · d delete · D deploy · M send · G getter · f filter · / search · c clear "
            }
            UiMode::InlineEdit => " enter commit · esc cancel ",
            UiMode::SearchInput => " enter search · esc cancel ",
            UiMode::MethodInput => " enter call · esc cancel ",
            UiMode::ProjectSelector => {
                " enter open · n new · g git import · i local import · d delete · esc close "
            }
            UiMode::SelectorInput => " enter confirm · esc cancel ",
            UiMode::ConfirmDeleteProject | UiMode::ConfirmQuit => " y confirm · n cancel ",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let mut spans = vec![Span::styled(
            format!(" {} ", state.settings.network.environment),
            theme::directory(),
        )];

        if state.tx_in_flight {
            spans.push(Span::styled(" tx pending… ", theme::notice_success()));
        }

        match state.ui_mode {
            UiMode::SearchInput => {
                spans.push(Span::raw(format!(" search: {}▏", state.console.search_buffer)));
            }
            UiMode::MethodInput => {
                spans.push(Span::raw(format!(" get method: {}▏", state.method_buffer)));
            }
            _ => {
                if let Some(notice) = &state.last_notice {
                    let style = match notice.kind {
                        NoticeKind::Error => theme::notice_error(),
                        NoticeKind::Success => theme::notice_success(),
                        NoticeKind::Info => theme::hint(),
                    };
                    spans.push(Span::styled(format!(" {} ", notice.text), style));
                } else {
                    spans.push(Span::styled(self.hints(), theme::hint()));
                }
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
