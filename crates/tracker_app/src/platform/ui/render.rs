use std::fmt::Write;

use tracker_core::{AppViewModel, LoaderState};

/// Plain-text rendering of the view model for terminal output.
pub fn render_text(view: &AppViewModel) -> String {
    let mut out = String::new();

    match view.loader {
        LoaderState::Loading => out.push_str("Saved searches: loading...\n"),
        LoaderState::Failed => out.push_str("Saved searches: unavailable\n"),
        LoaderState::Ready if view.options.is_empty() => out.push_str("Saved searches: none\n"),
        LoaderState::Ready => {
            out.push_str("Saved searches:\n");
            for option in &view.options {
                let mark = if option.selected { 'x' } else { ' ' };
                let _ = writeln!(out, "  [{mark}] {:>4}  {}", option.value, option.label);
            }
        }
    }
    let _ = writeln!(out, "{}", view.keyword_line);
    out.push('\n');

    if view.table.is_empty() {
        out.push_str("Resources: none\n");
    } else {
        let _ = writeln!(out, "Resources ({}):", view.table.len());
        for row in &view.table {
            let [title, company, location, work_status] = row.text_cells();
            let _ = writeln!(
                out,
                "{title} | {company} | {location} | {work_status} | {}",
                row.url
            );
        }
    }
    if view.fetch_pending {
        out.push_str("(request in progress)\n");
    }
    out
}
