//! Cursor pagination for connection-style list queries.
//!
//! A list page is addressed by an opaque cursor and a direction. Cursors are
//! only ever round-tripped: they come from the remote, go into a URL, and come
//! back as the `after`/`before` argument of the next query.

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`PageRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// Page size must be at least one.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Which way to move from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Records after the cursor.
    #[default]
    Next,
    /// Records before the cursor.
    Prev,
}

impl Direction {
    /// Parse the `direction` query parameter. Anything but `prev` means next.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("prev") => Self::Prev,
            _ => Self::Next,
        }
    }

    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

/// Windowing arguments for a connection query.
///
/// Exactly one of the `after`/`first` or `before`/`last` pairs is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Return records after this cursor.
    pub after: Option<String>,
    /// Return records before this cursor.
    pub before: Option<String>,
    /// Forward page size.
    pub first: Option<i64>,
    /// Backward page size.
    pub last: Option<i64>,
}

impl PageRequest {
    /// Translate a cursor and direction into windowing arguments.
    ///
    /// ```
    /// use banzai_core::{Direction, PageRequest};
    ///
    /// let req = PageRequest::new(Some("abc".into()), Direction::Prev, 20).unwrap();
    /// assert_eq!(req.before.as_deref(), Some("abc"));
    /// assert_eq!(req.last, Some(20));
    /// assert!(req.after.is_none() && req.first.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] if `page_size` is zero.
    pub fn new(
        cursor: Option<String>,
        direction: Direction,
        page_size: u32,
    ) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        let size = Some(i64::from(page_size));
        Ok(match direction {
            Direction::Next => Self {
                after: cursor,
                before: None,
                first: size,
                last: None,
            },
            Direction::Prev => Self {
                after: None,
                before: cursor,
                first: None,
                last: size,
            },
        })
    }

    /// First page of a list.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] if `page_size` is zero.
    pub fn first_page(page_size: u32) -> Result<Self, PaginationError> {
        Self::new(None, Direction::Next, page_size)
    }

    /// Number of records requested.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.first.or(self.last).unwrap_or(0)
    }
}

/// Page boundaries as reported by the remote (`pageInfo`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// Whether records exist after this window.
    pub has_next_page: bool,
    /// Whether records exist before this window.
    pub has_previous_page: bool,
    /// Cursor of the first record.
    pub start_cursor: Option<String>,
    /// Cursor of the last record.
    pub end_cursor: Option<String>,
}

/// A record that knows its position in the page it came from.
pub trait Cursored {
    /// Opaque cursor of this record, if the remote returned one.
    fn cursor(&self) -> Option<&str>;
}

/// Prev/next affordances for a displayed window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageNavigation {
    /// Cursor to request with `direction=prev`, if "prev" is offered.
    pub prev_cursor: Option<String>,
    /// Cursor to request with `direction=next`, if "next" is offered.
    pub next_cursor: Option<String>,
}

impl PageNavigation {
    /// Decide which navigation links a window offers.
    ///
    /// "Next" requires both `has_next_page` and a full window: a short window
    /// is the last page no matter what the remote reports. Cursors come from
    /// the records actually displayed; the window's own cursors are used only
    /// when there are no records to take them from.
    #[must_use]
    pub fn resolve<T: Cursored>(window: &PageWindow, page_size: u32, records: &[T]) -> Self {
        let full_window = usize::try_from(page_size).is_ok_and(|size| records.len() == size);

        let next_cursor = if window.has_next_page && full_window {
            records
                .last()
                .and_then(Cursored::cursor)
                .map(String::from)
                .or_else(|| window.end_cursor.clone())
        } else {
            None
        };

        let prev_cursor = if window.has_previous_page {
            records
                .first()
                .and_then(Cursored::cursor)
                .map(String::from)
                .or_else(|| window.start_cursor.clone())
        } else {
            None
        };

        Self {
            prev_cursor,
            next_cursor,
        }
    }

    /// Whether a "next" link should be shown.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Whether a "prev" link should be shown.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.prev_cursor.is_some()
    }
}
