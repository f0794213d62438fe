use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone, Utc};
use iced::{
    widget::{button, column, container, image::Handle, row, scrollable, text, Space},
    Alignment, Element, Length,
};
use url::Url;
use uuid::Uuid;

use super::DownloadMessage;
use crate::domain::{LinkRecord, RecordList};
use crate::utils::url_extension;

const CARD_SIZE: f32 = 100.0;

/// Horizontal strip of saved links.
pub fn history_strip<'a>(
    records: &'a RecordList,
    thumbnails: &'a HashMap<Uuid, Handle>,
) -> Element<'a, DownloadMessage> {
    if records.is_empty() {
        return text("Nothing saved yet").size(14).into();
    }

    let cards = records
        .iter()
        .fold(row![].spacing(10), |cards, record| {
            cards.push(card(record, thumbnails.get(&record.id)))
        });

    scrollable(cards)
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::default(),
        ))
        .width(Length::Fill)
        .into()
}

fn card<'a>(record: &'a LinkRecord, thumbnail: Option<&Handle>) -> Element<'a, DownloadMessage> {
    let preview: Element<'a, DownloadMessage> = match thumbnail {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(CARD_SIZE))
            .height(Length::Fixed(CARD_SIZE))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => container(text(placeholder_label(&record.link)).size(14))
            .width(Length::Fixed(CARD_SIZE))
            .height(Length::Fixed(CARD_SIZE))
            .center_x(Length::Fixed(CARD_SIZE))
            .center_y(Length::Fixed(CARD_SIZE))
            .style(container::bordered_box)
            .into(),
    };

    let caption = text(format!(
        "Downloaded at: {}",
        format_timestamp(&record.timestamp, &Local)
    ))
    .size(11)
    .width(Length::Fixed(CARD_SIZE));

    let delete = button(text("Delete").size(11))
        .on_press(DownloadMessage::DeletePressed(record.id))
        .style(button::danger)
        .padding([2, 6]);

    container(
        column![preview, caption, Space::new().height(Length::Fixed(4.0)), delete]
            .spacing(5)
            .align_x(Alignment::Start),
    )
    .padding(5)
    .style(container::rounded_box)
    .into()
}

/// Uppercased extension of the link, or "FILE".
fn placeholder_label(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|url| url_extension(&url))
        .map(|ext| ext.to_uppercase())
        .unwrap_or_else(|| "FILE".to_string())
}

/// Medium date, short time: `Oct 19, 2026, 3:04 PM`.
pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(zone)
        .format("%b %-d, %Y, %-I:%M %p")
        .to_string()
}
