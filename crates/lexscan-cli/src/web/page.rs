use lexscan_core::export;
use lexscan_core::model::{AnalysisRecord, Column, RuleCheck, SectionKey};
use lexscan_core::session::{Notice, Session};
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; color: #222; }
aside { width: 18rem; min-height: 100vh; background: #f3f4f6; padding: 1.5rem; box-sizing: border-box; }
main { flex: 1; padding: 1.5rem 2rem; max-width: 70rem; }
h1 { margin-top: 0; }
.notice { padding: .75rem 1rem; border-radius: .4rem; margin-bottom: 1rem; }
.notice.success { background: #dcfce7; }
.notice.info { background: #dbeafe; }
.notice.error { background: #fee2e2; }
.columns { display: flex; gap: 2rem; }
.columns > div { flex: 1; }
.rule { display: flex; gap: 1rem; border-bottom: 1px solid #e5e7eb; padding: .5rem 0; }
.rule .status { width: 4rem; font-weight: bold; }
.rule .status.pass { color: #15803d; }
.rule .status.fail { color: #b91c1c; }
.rule .body { flex: 1; }
.rule .confidence { width: 4rem; text-align: right; }
.overall { font-size: 1.2rem; font-weight: bold; margin-top: 1rem; }
button, .button { padding: .5rem 1rem; margin-top: .75rem; cursor: pointer; }
pre { background: #f9fafb; padding: 1rem; overflow-x: auto; }
"#;

const SCRIPT: &str = r#"
document.getElementById('upload').addEventListener('submit', function () {
  var status = document.getElementById('status');
  status.textContent = 'Extracting PDF…';
  document.getElementById('analyze').disabled = true;
  setTimeout(function () { status.textContent = 'Analyzing…'; }, 800);
});
"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(session: &Session) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Legislative Document Analyzer</title>\n");
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");

    render_sidebar(&mut html, session);

    html.push_str("<main>\n<h1>Legislative Document Analyzer</h1>\n");
    if let Some(notice) = session.notice() {
        render_notice(&mut html, notice);
    }
    match session.record() {
        Some(record) => render_record(&mut html, session.document_name(), record),
        None => html.push_str(
            "<p>Upload a PDF in the sidebar and press <em>Analyze Document</em> to get a summary, \
             the key legislative sections and a rule compliance check.</p>\n",
        ),
    }
    html.push_str("</main>\n");

    let _ = writeln!(html, "<script>{SCRIPT}</script>\n</body>\n</html>");
    html
}

fn render_sidebar(html: &mut String, session: &Session) {
    html.push_str("<aside>\n<h2>Upload Document</h2>\n");
    html.push_str(
        "<form id=\"upload\" method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"document\" accept=\"application/pdf,.pdf\" required>\n\
         <button id=\"analyze\" type=\"submit\">Analyze Document</button>\n</form>\n",
    );
    let status = if session.is_busy() {
        "An analysis is running\u{2026}"
    } else {
        ""
    };
    let _ = writeln!(html, "<p id=\"status\">{status}</p>");

    if session.record().is_some() {
        html.push_str(
            "<a class=\"button\" href=\"/report.json\" download>Download JSON Report</a>\n\
             <form method=\"post\" action=\"/clear\">\
             <button type=\"submit\">Clear Analysis</button></form>\n",
        );
    }
    html.push_str("</aside>\n");
}

fn render_notice(html: &mut String, notice: &Notice) {
    let class = match notice {
        Notice::Success(_) => "success",
        Notice::Info(_) => "info",
        Notice::Error(_) => "error",
    };
    let _ = writeln!(
        html,
        "<div class=\"notice {class}\">{}</div>",
        escape_html(notice.message())
    );
}

fn render_record(html: &mut String, document_name: Option<&str>, record: &AnalysisRecord) {
    if let Some(name) = document_name {
        let _ = writeln!(html, "<p>Document: <strong>{}</strong></p>", escape_html(name));
    }

    html.push_str("<h2>Summary</h2>\n<ol>\n");
    for point in &record.summary {
        let _ = writeln!(html, "<li>{}</li>", escape_html(point));
    }
    html.push_str("</ol>\n");

    html.push_str("<h2>Key Legislative Sections</h2>\n<div class=\"columns\">\n");
    for column in [Column::Left, Column::Right] {
        html.push_str("<div>\n");
        for key in SectionKey::in_column(column) {
            let _ = writeln!(
                html,
                "<h3>{}</h3>\n<p>{}</p>",
                key.label(),
                escape_html(record.sections.text_or_na(key))
            );
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");

    html.push_str("<h2>Rule Compliance Check</h2>\n");
    for check in &record.rule_checks {
        render_rule(html, check);
    }
    let _ = writeln!(
        html,
        "<p class=\"overall\">Overall: {}</p>",
        record.rules_passed_line()
    );

    let raw = export::to_json(record).unwrap_or_default();
    let _ = writeln!(
        html,
        "<details>\n<summary>View Raw JSON</summary>\n<pre>{}</pre>\n</details>",
        escape_html(&raw)
    );
}

fn render_rule(html: &mut String, check: &RuleCheck) {
    let class = match check.status {
        Some(status) => status.as_str(),
        None => "unknown",
    };
    let _ = writeln!(
        html,
        "<div class=\"rule\">\
         <div class=\"status {class}\">{}</div>\
         <div class=\"body\"><strong>{}</strong><br><small>Evidence: {}</small></div>\
         <div class=\"confidence\">{}%</div>\
         </div>",
        check.status_label(),
        escape_html(check.rule_text()),
        escape_html(check.evidence_text()),
        check.confidence_pct()
    );
}
