use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::Task;
use uuid::Uuid;

use crate::application::{save_router::image_url, AppState, DownloadCoordinator};
use crate::config::AppConfig;
use crate::domain::{AppError, Notice, SavedFile};
use crate::storage::{PreferenceStore, RecordStore};
use crate::ui::{
    thumbnail::{load_thumbnail, thumbnail_from_bytes},
    DownloadMessage, DownloadView,
};

pub struct DownloadApp {
    view: DownloadView,
    state: AppState,
    coordinator: DownloadCoordinator,
}

impl DownloadApp {
    pub fn new(config: &AppConfig) -> (Self, Task<Message>) {
        let store = RecordStore::new(PreferenceStore::new(config.preferences_path()));
        let app = Self {
            view: DownloadView::default(),
            state: AppState::new(store),
            coordinator: DownloadCoordinator::from_config(config),
        };

        let thumbnails = Task::batch(
            app.state
                .records()
                .iter()
                .map(|record| app.thumbnail_task(record.id, &record.link))
                .collect::<Vec<_>>(),
        );

        (app, thumbnails)
    }

    /// Prefers the exact gallery file saved this session, otherwise asks the
    /// link itself for the image.
    fn thumbnail_task(&self, id: Uuid, link: &str) -> Task<Message> {
        if let Some(path) = self.state.saved_image(id) {
            return Task::perform(load_thumbnail(path.to_path_buf()), move |handle| {
                Message::ThumbnailLoaded(id, handle)
            });
        }

        match image_url(link) {
            Some(url) => {
                let coordinator = self.coordinator.clone();
                Task::perform(
                    async move {
                        let bytes = coordinator.fetch_preview(url).await?;
                        thumbnail_from_bytes(bytes).await
                    },
                    move |handle| Message::ThumbnailLoaded(id, handle),
                )
            }
            None => Task::none(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// (Link, outcome of fetch and save)
    DownloadFinished(String, Result<SavedFile, AppError>),
    ThumbnailLoaded(Uuid, Option<Handle>),
    /// Destination the document was exported to, `None` if cancelled
    ExportFinished(Result<Option<PathBuf>, AppError>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(&ui_msg);

            match ui_msg {
                DownloadMessage::LinkChanged(_) => {}
                DownloadMessage::DownloadPressed => {
                    let link = app.view.link.trim().to_string();
                    if link.is_empty() {
                        return Task::none();
                    }

                    match app.state.begin_download(&link) {
                        Ok(url) => {
                            let coordinator = app.coordinator.clone();
                            // iced Task::perform runs in the background tokio executor
                            return Task::perform(
                                async move { coordinator.download_and_save(url).await },
                                move |result| Message::DownloadFinished(link.clone(), result),
                            );
                        }
                        Err(e) => tracing::debug!("Download not started: {}", e),
                    }
                }
                DownloadMessage::DeletePressed(id) => {
                    app.state.request_delete(id);
                }
                DownloadMessage::DeleteConfirmed => {
                    if let Some(removed) = app.state.confirm_delete() {
                        app.view.thumbnails.remove(&removed.id);
                    }
                }
                DownloadMessage::DeleteCancelled => app.state.cancel_delete(),
                DownloadMessage::NoticeDismissed => app.state.dismiss_notice(),
                DownloadMessage::ExportPressed => {
                    if let Some(Notice::Completed {
                        export: Some(path),
                    }) = app.state.notice().cloned()
                    {
                        let coordinator = app.coordinator.clone();
                        return Task::perform(
                            async move { coordinator.export(path).await },
                            Message::ExportFinished,
                        );
                    }
                }
            }
        }
        Message::DownloadFinished(link, result) => {
            app.state.finish_download(link.clone(), result);

            let new_record = app
                .state
                .records()
                .iter()
                .find(|record| record.link == link)
                .map(|record| record.id);
            if let Some(id) = new_record {
                return app.thumbnail_task(id, &link);
            }
        }
        Message::ThumbnailLoaded(id, handle) => {
            if let Some(handle) = handle {
                if app.state.records().get(id).is_some() {
                    app.view.thumbnails.insert(id, handle);
                }
            }
        }
        Message::ExportFinished(result) => match result {
            Ok(Some(_)) => app.state.dismiss_notice(),
            Ok(None) => {}
            Err(e) => {
                tracing::error!("{}", e);
                app.state.dismiss_notice();
                app.state.show_notice(Notice::ExportFailed);
            }
        },
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view(&app.state).map(Message::UiMessage)
}
