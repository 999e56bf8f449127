use crate::keywords::option_label;
use crate::{LoaderState, Resource, SavedSearch, SearchId};

/// Cell text for a missing location or work status.
pub const MISSING_CELL: &str = "N/A";

/// Fixed label of the link cell.
pub const LINK_LABEL: &str = "View resource";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub loader: LoaderState,
    pub options: Vec<SearchOptionView>,
    pub keywords: Vec<String>,
    pub keyword_line: String,
    pub table: Vec<ResourceRowView>,
    pub fetch_pending: bool,
    pub dirty: bool,
}

/// One entry of the multi-select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptionView {
    pub id: SearchId,
    /// The id as a decimal string, used as the option value.
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SearchOptionView {
    pub(crate) fn new(search: &SavedSearch, selected: bool) -> Self {
        Self {
            id: search.id,
            value: search.id.to_string(),
            label: option_label(&search.name, search.keywords.as_deref()),
            selected,
        }
    }
}

/// One table row: title, company, location, work status and a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRowView {
    pub title: String,
    pub company: String,
    pub location: String,
    pub work_status: String,
    pub url: String,
}

impl ResourceRowView {
    pub(crate) fn new(resource: &Resource) -> Self {
        Self {
            title: resource.title.clone(),
            company: resource.company.clone(),
            location: or_missing(resource.location.as_deref()),
            work_status: or_missing(resource.work_status.as_deref()),
            url: resource.url.clone(),
        }
    }

    /// The four text cells in column order; the fifth cell is the link.
    pub fn text_cells(&self) -> [&str; 4] {
        [&self.title, &self.company, &self.location, &self.work_status]
    }
}

fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => MISSING_CELL.to_string(),
    }
}
