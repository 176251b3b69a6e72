//! Data table component types.
//!
//! Column headings and select filters shared by the list pages. Templates
//! render these as-is; nothing here knows about products.

/// Column heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Heading text.
    pub label: String,
    /// Optional CSS width, e.g. `10%`.
    pub width: Option<&'static str>,
}

impl TableColumn {
    /// Column sized by its content.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            width: None,
        }
    }

    /// Fix the column width.
    #[must_use]
    pub const fn width(mut self, width: &'static str) -> Self {
        self.width = Some(width);
        self
    }
}

/// Option in a select filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether this option is the current value.
    pub selected: bool,
}

impl FilterOption {
    /// Create an unselected option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }
}

/// A `<select>` bound to one query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFilter {
    /// Query parameter name.
    pub name: &'static str,
    /// Field label.
    pub label: String,
    /// Options in display order.
    pub options: Vec<FilterOption>,
}

impl SelectFilter {
    /// A select whose first option is "all" (empty value).
    ///
    /// The option matching `current` is marked selected; with no match, "all"
    /// is.
    #[must_use]
    pub fn with_all(
        name: &'static str,
        label: &str,
        all_label: &str,
        options: Vec<FilterOption>,
        current: Option<&str>,
    ) -> Self {
        let mut options: Vec<FilterOption> = std::iter::once(FilterOption::new("", all_label))
            .chain(options)
            .collect();
        mark_selected(&mut options, current.unwrap_or_default());
        Self {
            name,
            label: label.to_string(),
            options,
        }
    }

    /// A select with no "all" option.
    #[must_use]
    pub fn exact(
        name: &'static str,
        label: &str,
        mut options: Vec<FilterOption>,
        current: &str,
    ) -> Self {
        mark_selected(&mut options, current);
        Self {
            name,
            label: label.to_string(),
            options,
        }
    }

    /// Value of the selected option.
    #[must_use]
    pub fn selected_value(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
    }
}

fn mark_selected(options: &mut [FilterOption], current: &str) {
    let index = options
        .iter()
        .position(|o| o.value == current)
        .unwrap_or(0);
    for (i, option) in options.iter_mut().enumerate() {
        option.selected = i == index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<FilterOption> {
        vec![
            FilterOption::new("ACTIVE", "Active"),
            FilterOption::new("DRAFT", "Draft"),
        ]
    }

    #[test]
    fn test_with_all_selects_current() {
        let select = SelectFilter::with_all("status", "Status", "All", options(), Some("DRAFT"));
        assert_eq!(select.options.len(), 3);
        assert_eq!(select.selected_value(), Some("DRAFT"));
    }

    #[test]
    fn test_unknown_current_falls_back_to_all() {
        let select = SelectFilter::with_all("status", "Status", "All", options(), Some("GONE"));
        assert_eq!(select.selected_value(), Some(""));
        let select = SelectFilter::with_all("status", "Status", "All", options(), None);
        assert_eq!(select.options[0].label, "All");
        assert!(select.options[0].selected);
    }

    #[test]
    fn test_exact_select() {
        let select = SelectFilter::exact("sortKey", "Sort by", options(), "DRAFT");
        assert_eq!(select.options.len(), 2);
        assert_eq!(select.selected_value(), Some("DRAFT"));
    }

    #[test]
    fn test_column_width() {
        let column = TableColumn::new("Title").width("10%");
        assert_eq!(column.width, Some("10%"));
    }
}
