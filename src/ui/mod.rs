pub mod history;
pub mod thumbnail;

use std::collections::HashMap;

use iced::{
    widget::{button, center, column, container, image::Handle, opaque, row, stack, text, text_input, Space},
    Alignment, Element, Length,
};
use uuid::Uuid;

use crate::application::AppState;
use crate::domain::Notice;

/// Main view state
#[derive(Default)]
pub struct DownloadView {
    pub link: String,
    pub thumbnails: HashMap<Uuid, Handle>,
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    LinkChanged(String),
    DownloadPressed,
    DeletePressed(Uuid),
    DeleteConfirmed,
    DeleteCancelled,
    NoticeDismissed,
    ExportPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: &DownloadMessage) {
        if let DownloadMessage::LinkChanged(link) = message {
            self.link = link.clone();
        }
    }

    pub fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, DownloadMessage> {
        let can_download = !self.link.is_empty() && !state.is_busy();
        let download_label = if state.is_busy() {
            "Downloading..."
        } else {
            "Download"
        };

        let input = row![
            text_input("Paste your url link here", &self.link)
                .on_input(DownloadMessage::LinkChanged)
                .on_submit_maybe(can_download.then_some(DownloadMessage::DownloadPressed))
                .padding(10),
            button(download_label)
                .on_press_maybe(can_download.then_some(DownloadMessage::DownloadPressed))
                .padding([10, 20]),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let content = column![
            text("Save It").size(32),
            text("Save media that suits your mood").size(16),
            Space::new().height(Length::Fixed(20.0)),
            input,
            Space::new().height(Length::Fill),
            text("Saved Items").size(18),
            history::history_strip(state.records(), &self.thumbnails),
        ]
        .padding(20)
        .spacing(10)
        .align_x(Alignment::Center);

        let base: Element<'a, DownloadMessage> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        if let Some(notice) = state.notice() {
            modal(base, notice_dialog(notice))
        } else if let Some(record) = state.pending_delete() {
            modal(base, delete_dialog(&record.link))
        } else {
            base
        }
    }
}

fn notice_dialog<'a>(notice: &Notice) -> Element<'a, DownloadMessage> {
    let mut actions = row![].spacing(10);
    if let Notice::Completed { export: Some(_) } = notice {
        actions = actions.push(button("Export...").on_press(DownloadMessage::ExportPressed));
    }
    actions = actions.push(button("OK").on_press(DownloadMessage::NoticeDismissed));

    column![
        text("Download Status").size(20),
        text(notice.message()).size(14),
        actions,
    ]
    .spacing(15)
    .into()
}

fn delete_dialog<'a>(link: &'a str) -> Element<'a, DownloadMessage> {
    column![
        text("Delete Link?").size(20),
        text(link).size(12),
        row![
            button("Cancel")
                .on_press(DownloadMessage::DeleteCancelled)
                .style(button::secondary),
            button("Delete")
                .on_press(DownloadMessage::DeleteConfirmed)
                .style(button::danger),
        ]
        .spacing(10),
    ]
    .spacing(15)
    .into()
}

fn modal<'a>(
    base: Element<'a, DownloadMessage>,
    dialog: Element<'a, DownloadMessage>,
) -> Element<'a, DownloadMessage> {
    stack![
        base,
        opaque(center(
            container(dialog)
                .padding(20)
                .max_width(360.0)
                .style(container::rounded_box)
        )),
    ]
    .into()
}
