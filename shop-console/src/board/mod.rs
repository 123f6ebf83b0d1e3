//! Request status board
//!
//! Three columns (`new`, `in_progress`, `completed`) of request cards for
//! one tab. Cancelled requests of the tab sit in a side list. Moves are
//! checked against a fixed transition table before anything changes.

mod completion;
mod controller;

pub use completion::{CompletionReport, completion_mail};
pub use controller::{BoardController, MoveOutcome, RequestEdit};

use serde::Serialize;
use shared::models::{Request, RequestFilter, RequestKind, RequestStatus};

use crate::error::{AppError, AppResult};

/// Board columns, left to right
pub const COLUMNS: [RequestStatus; 3] = [
    RequestStatus::New,
    RequestStatus::InProgress,
    RequestStatus::Completed,
];

/// Which requests the board shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BoardTab {
    /// Repair tickets still on the board
    #[default]
    Repairs,
    /// Product orders still on the board
    Orders,
    /// Archived requests of both kinds
    History,
}

impl BoardTab {
    pub fn includes(&self, request: &Request) -> bool {
        match self {
            Self::Repairs => request.kind() == RequestKind::Repair && !request.hidden,
            Self::Orders => request.kind() == RequestKind::Order && !request.hidden,
            Self::History => request.hidden,
        }
    }

    /// Server-side filter for this tab
    pub fn filter(&self) -> RequestFilter {
        match self {
            Self::Repairs => RequestFilter {
                kind: Some(RequestKind::Repair),
                status: None,
                hidden: Some(false),
            },
            Self::Orders => RequestFilter {
                kind: Some(RequestKind::Order),
                status: None,
                hidden: Some(false),
            },
            Self::History => RequestFilter {
                kind: None,
                status: None,
                hidden: Some(true),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Repairs => "Sửa chữa",
            Self::Orders => "Đơn hàng",
            Self::History => "Lịch sử",
        }
    }
}

/// Drag-and-drop allow-list
pub fn can_drag(from: RequestStatus, to: RequestStatus) -> bool {
    use RequestStatus::*;
    matches!(
        (from, to),
        (New, InProgress) | (New, Completed) | (InProgress, Completed)
    )
}

/// The edit modal additionally cancels open requests; terminal states stay put
pub fn can_edit_to(from: RequestStatus, to: RequestStatus) -> bool {
    from == to || can_drag(from, to) || (!from.is_terminal() && to == RequestStatus::Cancelled)
}

/// Where a card was before a move, for undoing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub status: RequestStatus,
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    tab: BoardTab,
    columns: [Vec<Request>; 3],
    cancelled: Vec<Request>,
}

fn column_index(status: RequestStatus) -> Option<usize> {
    COLUMNS.iter().position(|s| *s == status)
}

impl Board {
    /// Lay out `requests`, keeping their order and dropping those outside `tab`
    pub fn new(tab: BoardTab, requests: Vec<Request>) -> Self {
        let mut board = Self {
            tab,
            ..Default::default()
        };
        for request in requests.into_iter().filter(|r| tab.includes(r)) {
            board.push(request);
        }
        board
    }

    pub fn tab(&self) -> BoardTab {
        self.tab
    }

    pub fn column(&self, status: RequestStatus) -> &[Request] {
        match column_index(status) {
            Some(i) => &self.columns[i],
            None => &self.cancelled,
        }
    }

    pub fn cancelled(&self) -> &[Request] {
        &self.cancelled
    }

    fn list_mut(&mut self, status: RequestStatus) -> &mut Vec<Request> {
        match column_index(status) {
            Some(i) => &mut self.columns[i],
            None => &mut self.cancelled,
        }
    }

    /// Append at the end of the request's status list
    fn push(&mut self, request: Request) {
        self.list_mut(request.status).push(request);
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum::<usize>() + self.cancelled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn placement(&self, id: i64) -> Option<Placement> {
        RequestStatus::ALL.into_iter().find_map(|status| {
            self.column(status)
                .iter()
                .position(|r| r.id == id)
                .map(|index| Placement { status, index })
        })
    }

    pub fn get(&self, id: i64) -> Option<&Request> {
        let p = self.placement(id)?;
        self.column(p.status).get(p.index)
    }

    /// Take a card off the board
    pub fn remove(&mut self, id: i64) -> Option<(Request, Placement)> {
        let placement = self.placement(id)?;
        let request = self.list_mut(placement.status).remove(placement.index);
        Some((request, placement))
    }

    /// Put a card back exactly where it was
    pub fn restore(&mut self, mut request: Request, placement: Placement) {
        request.status = placement.status;
        let list = self.list_mut(placement.status);
        let index = placement.index.min(list.len());
        list.insert(index, request);
    }

    /// Replace a card with a fresher copy; it leaves the board if it no longer belongs to the tab
    pub fn upsert(&mut self, request: Request) {
        let placement = self.remove(request.id).map(|(_, p)| p);
        if !self.tab.includes(&request) {
            return;
        }
        match placement {
            Some(p) if p.status == request.status => self.restore(request, p),
            _ => self.push(request),
        }
    }

    /// Validate and apply a drag; returns where the card came from.
    ///
    /// Rejected moves leave the board untouched. Dropping on the same
    /// column is a no-op and returns `Ok(None)`.
    pub fn drag(&mut self, id: i64, to: RequestStatus) -> AppResult<Option<Placement>> {
        let from = self.placement(id).ok_or(AppError::RequestNotFound(id))?;
        if from.status == to {
            return Ok(None);
        }
        if !can_drag(from.status, to) {
            return Err(AppError::InvalidTransition {
                id,
                from: from.status,
                to,
            });
        }
        if let Some((mut request, _)) = self.remove(id) {
            request.status = to;
            self.push(request);
        }
        Ok(Some(from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{Contact, RequestDetail};

    fn repair(id: i64, status: RequestStatus) -> Request {
        Request {
            id,
            contact: Contact {
                name: format!("Khách {id}"),
                email: Some(format!("k{id}@example.com")),
                phone: "0901234567".into(),
                address: String::new(),
            },
            detail: RequestDetail::Repair {
                service_id: Some(1),
                problem: "Màn hình vỡ".into(),
                images: Vec::new(),
            },
            status,
            hidden: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn order(id: i64, status: RequestStatus) -> Request {
        Request {
            detail: RequestDetail::Order {
                items: Vec::new(),
                total: Decimal::ZERO,
            },
            ..repair(id, status)
        }
    }

    fn ids(board: &Board, status: RequestStatus) -> Vec<i64> {
        board.column(status).iter().map(|r| r.id).collect()
    }

    fn sample() -> Board {
        Board::new(
            BoardTab::Repairs,
            vec![
                repair(1, RequestStatus::New),
                repair(2, RequestStatus::InProgress),
                repair(3, RequestStatus::Completed),
                repair(4, RequestStatus::Cancelled),
                order(5, RequestStatus::New),
            ],
        )
    }

    #[test]
    fn test_layout_by_tab() {
        let board = sample();
        assert_eq!(ids(&board, RequestStatus::New), vec![1]);
        assert_eq!(ids(&board, RequestStatus::Cancelled), vec![4]);
        assert_eq!(board.len(), 4);

        let mut hidden = repair(6, RequestStatus::Completed);
        hidden.hidden = true;
        let history = Board::new(BoardTab::History, vec![hidden, repair(7, RequestStatus::New)]);
        assert_eq!(ids(&history, RequestStatus::Completed), vec![6]);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_transition_table() {
        use RequestStatus::*;
        assert!(can_drag(New, InProgress));
        assert!(can_drag(New, Completed));
        assert!(can_drag(InProgress, Completed));
        assert!(!can_drag(InProgress, New));
        for to in RequestStatus::ALL {
            assert!(!can_drag(Completed, to));
            assert!(!can_drag(Cancelled, to));
        }
        assert!(can_edit_to(InProgress, Cancelled));
        assert!(!can_edit_to(Completed, Cancelled));
        assert!(can_edit_to(Completed, Completed));
    }

    #[test]
    fn test_drag_from_completed_leaves_board_unchanged() {
        for to in [RequestStatus::New, RequestStatus::InProgress] {
            let mut board = sample();
            let before: Vec<Vec<i64>> = COLUMNS.iter().map(|s| ids(&board, *s)).collect();
            let err = board.drag(3, to).unwrap_err();
            assert!(matches!(err, AppError::InvalidTransition { id: 3, .. }));
            let after: Vec<Vec<i64>> = COLUMNS.iter().map(|s| ids(&board, *s)).collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_drag_appends_and_restore_undoes() {
        let mut board = sample();
        let from = board.drag(1, RequestStatus::Completed).unwrap().unwrap();
        assert_eq!(ids(&board, RequestStatus::Completed), vec![3, 1]);
        assert!(board.column(RequestStatus::New).is_empty());

        let (request, _) = board.remove(1).unwrap();
        board.restore(request, from);
        assert_eq!(ids(&board, RequestStatus::New), vec![1]);
        assert_eq!(board.get(1).unwrap().status, RequestStatus::New);
    }

    #[test]
    fn test_same_column_is_noop() {
        let mut board = sample();
        assert_eq!(board.drag(2, RequestStatus::InProgress).unwrap(), None);
        assert!(matches!(
            board.drag(99, RequestStatus::New),
            Err(AppError::RequestNotFound(99))
        ));
    }

    #[test]
    fn test_upsert_drops_archived() {
        let mut board = sample();
        let mut archived = repair(2, RequestStatus::InProgress);
        archived.hidden = true;
        board.upsert(archived);
        assert!(board.get(2).is_none());
    }
}
