//! Board actions against the backend

use serde::Serialize;
use shared::dto::RequestUpdatePayload;
use shared::models::{Request, RequestStatus, SiteInfo};
use shop_client::ApiClient;

use super::completion::{CompletionReport, complete};
use super::{Board, BoardTab, can_edit_to};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, NoticeLevel};

/// Result of a successful move
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveOutcome {
    pub id: i64,
    pub from: RequestStatus,
    pub to: RequestStatus,
    /// Present when the move completed the request
    pub completion: Option<CompletionReport>,
}

/// Fields the edit modal may change
#[derive(Debug, Clone, Default)]
pub struct RequestEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub status: Option<RequestStatus>,
}

pub struct BoardController<'a> {
    api: &'a ApiClient,
    bus: EventBus,
    board: Board,
    site: Option<SiteInfo>,
}

impl<'a> BoardController<'a> {
    /// Fetch the requests of `tab` and lay them out
    pub async fn load(api: &'a ApiClient, bus: EventBus, tab: BoardTab) -> AppResult<Self> {
        let requests = api.requests().list(&tab.filter()).await?;
        tracing::debug!(tab = ?tab, count = requests.len(), "board loaded");
        Ok(Self::with_requests(api, bus, tab, requests))
    }

    /// Board over requests the caller already fetched
    pub fn with_requests(
        api: &'a ApiClient,
        bus: EventBus,
        tab: BoardTab,
        requests: Vec<Request>,
    ) -> Self {
        Self {
            api,
            bus,
            board: Board::new(tab, requests),
            site: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub async fn refresh(&mut self) -> AppResult<()> {
        let tab = self.board.tab();
        let requests = self.api.requests().list(&tab.filter()).await?;
        self.board = Board::new(tab, requests);
        Ok(())
    }

    /// Store info for completion mails, fetched once
    async fn site_info(&mut self) -> Option<SiteInfo> {
        if self.site.is_none() {
            match self.api.content().site_info().await {
                Ok(info) => self.site = Some(info),
                Err(e) => tracing::warn!(error = %e, "store info unavailable"),
            }
        }
        self.site.clone()
    }

    /// Drag a card to `to`.
    ///
    /// The card moves locally first, then the status is persisted. A failed
    /// save puts the card back where it was.
    pub async fn move_card(&mut self, id: i64, to: RequestStatus) -> AppResult<Option<MoveOutcome>> {
        let from = match self.board.drag(id, to) {
            Ok(Some(from)) => from,
            Ok(None) => return Ok(None),
            Err(e) => {
                if let AppError::InvalidTransition { from, to, .. } = &e {
                    self.bus.notify(
                        NoticeLevel::Warning,
                        format!(
                            "Không thể chuyển yêu cầu #{id} từ \"{}\" sang \"{}\"",
                            from.label(),
                            to.label()
                        ),
                    );
                }
                return Err(e);
            }
        };

        if let Err(e) = self.api.requests().update_status(id, to).await {
            tracing::error!(request_id = id, error = %e, "status update failed, reverting");
            if let Some((request, _)) = self.board.remove(id) {
                self.board.restore(request, from);
            }
            self.bus.notify(
                NoticeLevel::Error,
                format!("Cập nhật trạng thái yêu cầu #{id} thất bại"),
            );
            return Err(e.into());
        }

        let completion = if to == RequestStatus::Completed {
            Some(self.run_completion(id).await)
        } else {
            None
        };

        self.bus.notify(
            NoticeLevel::Success,
            format!("Yêu cầu #{id}: {}", to.label()),
        );
        Ok(Some(MoveOutcome {
            id,
            from: from.status,
            to,
            completion,
        }))
    }

    async fn run_completion(&mut self, id: i64) -> CompletionReport {
        let site = self.site_info().await;
        let Some(request) = self.board.get(id).cloned() else {
            return CompletionReport::default();
        };
        let report = complete(self.api, &request, site.as_ref()).await;
        for failure in &report.failures {
            self.bus.notify(NoticeLevel::Warning, failure.clone());
        }
        report
    }

    /// Save the edit modal
    pub async fn edit(&mut self, id: i64, edit: RequestEdit) -> AppResult<Option<CompletionReport>> {
        let current = self
            .board
            .get(id)
            .cloned()
            .ok_or(AppError::RequestNotFound(id))?;
        if let Some(to) = edit.status
            && !can_edit_to(current.status, to)
        {
            self.bus.notify(
                NoticeLevel::Warning,
                format!(
                    "Không thể chuyển yêu cầu #{id} từ \"{}\" sang \"{}\"",
                    current.status.label(),
                    to.label()
                ),
            );
            return Err(AppError::InvalidTransition {
                id,
                from: current.status,
                to,
            });
        }

        let payload = RequestUpdatePayload {
            name: edit.name,
            email: edit.email,
            phone: edit.phone,
            address: edit.address,
            description: edit.description,
            status: edit.status.filter(|s| *s != current.status),
        };
        let newly_completed = payload.status == Some(RequestStatus::Completed);

        let updated = match self.api.requests().update(id, &payload).await {
            Ok(updated) => updated,
            Err(e) => {
                self.bus
                    .notify(NoticeLevel::Error, format!("Lưu yêu cầu #{id} thất bại: {e}"));
                return Err(e.into());
            }
        };
        self.board.upsert(updated);

        let completion = if newly_completed {
            Some(self.run_completion(id).await)
        } else {
            None
        };
        self.bus
            .notify(NoticeLevel::Success, format!("Đã lưu yêu cầu #{id}"));
        Ok(completion)
    }

    async fn set_hidden(&mut self, id: i64, hidden: bool) -> AppResult<()> {
        let mut request = self
            .board
            .get(id)
            .cloned()
            .ok_or(AppError::RequestNotFound(id))?;
        self.api.requests().set_hidden(id, hidden).await?;
        request.hidden = hidden;
        self.board.upsert(request);
        Ok(())
    }

    /// Move a request to history
    pub async fn archive(&mut self, id: i64) -> AppResult<()> {
        self.set_hidden(id, true).await?;
        self.bus
            .notify(NoticeLevel::Info, format!("Đã lưu trữ yêu cầu #{id}"));
        Ok(())
    }

    /// Bring an archived request back to its board
    pub async fn restore(&mut self, id: i64) -> AppResult<()> {
        self.set_hidden(id, false).await?;
        self.bus
            .notify(NoticeLevel::Info, format!("Đã khôi phục yêu cầu #{id}"));
        Ok(())
    }
}
