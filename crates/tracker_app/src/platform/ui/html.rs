use std::fmt::Write;

use tracker_core::{AppViewModel, ResourceRowView, SearchOptionView, LINK_LABEL};

use super::constants::*;
use crate::platform::config::NavLinks;

/// Renders the whole tracker page for a view model.
pub fn render_page(view: &AppViewModel, links: &NavLinks) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    let _ = writeln!(out, "    <title>{PAGE_TITLE}</title>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "    <h1>{PAGE_TITLE}</h1>");
    out.push_str("    <nav>\n");
    let _ = writeln!(
        out,
        "        <a href=\"{}\">{NAV_SAVED_SEARCHES}</a>",
        html_escape(&links.saved_searches)
    );
    let _ = writeln!(
        out,
        "        <a href=\"{}\">{NAV_DATA_SOURCES}</a>",
        html_escape(&links.data_sources)
    );
    out.push_str("    </nav>\n");

    let _ = writeln!(out, "    <select id=\"{SELECT_SEARCHES}\" multiple>");
    for option in &view.options {
        out.push_str(&render_option(option));
    }
    out.push_str("    </select>\n");
    let _ = writeln!(
        out,
        "    <p id=\"{LABEL_KEYWORDS}\">{}</p>",
        html_escape(&view.keyword_line)
    );
    let _ = writeln!(out, "    <button id=\"{BUTTON_SHOW}\">Show Resources</button>");
    let _ = writeln!(out, "    <button id=\"{BUTTON_CLEAR}\">Clear</button>");

    out.push_str(&render_table(&view.table));
    out.push_str("</body>\n</html>\n");
    out
}

/// Renders the resource table; the body holds exactly one row per resource.
pub fn render_table(rows: &[ResourceRowView]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "    <table id=\"{TABLE_RESOURCES}\">");
    out.push_str("        <thead><tr>");
    for header in COLUMN_HEADERS {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr></thead>\n        <tbody>\n");
    for row in rows {
        out.push_str("            <tr>");
        for cell in row.text_cells() {
            let _ = write!(out, "<td>{}</td>", html_escape(cell));
        }
        let _ = write!(
            out,
            "<td><a href=\"{}\" target=\"_blank\">{LINK_LABEL}</a></td>",
            html_escape(&row.url)
        );
        out.push_str("</tr>\n");
    }
    out.push_str("        </tbody>\n    </table>\n");
    out
}

fn render_option(option: &SearchOptionView) -> String {
    let selected = if option.selected { " selected" } else { "" };
    format!(
        "        <option value=\"{}\"{selected}>{}</option>\n",
        html_escape(&option.value),
        html_escape(&option.label)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
