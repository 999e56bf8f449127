//! Element ids and fixed texts of the tracker page.

pub const PAGE_TITLE: &str = "Resource Tracker";

pub const SELECT_SEARCHES: &str = "searchSelect";
pub const LABEL_KEYWORDS: &str = "selectedKeywords";
pub const BUTTON_SHOW: &str = "showResourcesBtn";
pub const BUTTON_CLEAR: &str = "clearResourcesBtn";
pub const TABLE_RESOURCES: &str = "resourcesTable";

pub const NAV_SAVED_SEARCHES: &str = "Manage Saved Searches";
pub const NAV_DATA_SOURCES: &str = "Manage Data Sources";

pub const COLUMN_HEADERS: [&str; 5] = ["Title", "Company", "Location", "Work Status", "Link"];
