//! HTML rendering for the screening form
//!
//! One page serves both the empty form and the result. Every piece of
//! user-supplied or extracted text is HTML-escaped before insertion.

use html_escape::{encode_double_quoted_attribute, encode_text};
use jobscreen_common::flash::FlashMessage;

use crate::inference::ScreeningReport;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>jobscreen - Job Posting Check</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        textarea, input[type=text] {
            width: 100%;
            box-sizing: border-box;
            padding: 8px;
            font: inherit;
        }
        textarea { min-height: 220px; }
        .button {
            padding: 10px 20px;
            background: #0066cc;
            color: white;
            border: none;
            border-radius: 4px;
            margin: 10px 0;
            cursor: pointer;
        }
        .button:hover { background: #0052a3; }
        .flash { padding: 10px 15px; border-radius: 4px; margin: 10px 0; }
        .flash.warning { background: #fff4e5; border: 1px solid #f0a202; }
        .flash.error { background: #fdecea; border: 1px solid #d32f2f; }
        .result { padding: 20px; border-radius: 4px; margin: 20px 0; }
        .result.fake { background: #fdecea; }
        .result.genuine { background: #e8f5e9; }
        table { border-collapse: collapse; width: 100%; }
        th { text-align: left; width: 30%; vertical-align: top; }
        td, th { padding: 4px 8px; border-bottom: 1px solid #e0e0e0; }
    </style>
</head>
<body>
    <h1>Job Posting Check</h1>
    {{MESSAGES}}
    <form method="post" action="/">
        <label for="job_post">Job description (or a link)</label>
        <textarea id="job_post" name="job_post">{{JOB_POST}}</textarea>
        <label for="job_url">Job link</label>
        <input type="text" id="job_url" name="job_url" value="{{JOB_URL}}" placeholder="https://...">
        <button type="submit" class="button">Check posting</button>
    </form>
    {{RESULT}}
</body>
</html>
"#;

/// Data shown on one render of the page
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub messages: &'a [FlashMessage],
    pub job_post: &'a str,
    pub job_url: &'a str,
    pub report: Option<&'a ScreeningReport>,
}

/// Render the form page
pub fn render_page(view: &PageView<'_>) -> String {
    let slots = [
        ("{{MESSAGES}}", render_messages(view.messages)),
        ("{{JOB_POST}}", encode_text(view.job_post).into_owned()),
        ("{{JOB_URL}}", encode_double_quoted_attribute(view.job_url).into_owned()),
        ("{{RESULT}}", view.report.map(render_report).unwrap_or_default()),
    ];
    fill_slots(PAGE_TEMPLATE, &slots)
}

/// Substitute placeholders in one pass so inserted text is never rescanned
fn fill_slots(template: &str, slots: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((index, (name, value))) = slots
        .iter()
        .filter_map(|slot| rest.find(slot.0).map(|i| (i, slot)))
        .min_by_key(|(i, _)| *i)
    {
        out.push_str(&rest[..index]);
        out.push_str(value);
        rest = &rest[index + name.len()..];
    }
    out.push_str(rest);
    out
}

fn render_messages(messages: &[FlashMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            format!(
                r#"<div class="flash {}">{}</div>"#,
                m.level.as_str(),
                encode_text(&m.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Fake probability as a percentage with two decimals
pub fn format_probability(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

fn render_report(report: &ScreeningReport) -> String {
    let verdict = report.prediction.verdict;
    let class = if verdict.is_fake() { "fake" } else { "genuine" };

    let probability = report
        .prediction
        .fake_probability
        .map(|p| {
            format!(
                r#"<p class="probability">Fake probability: <strong>{}</strong></p>"#,
                format_probability(p)
            )
        })
        .unwrap_or_default();

    let fields = &report.fields;
    let meta = &report.meta;
    let rows = [
        ("Title", or_dash(&fields.title)),
        ("Location", or_dash(&fields.location)),
        ("Emails", or_dash(&fields.emails.join(", "))),
        ("Phones", or_dash(&fields.phones.join(", "))),
        ("Links", or_dash(&fields.links.join(", "))),
        ("Words", fields.length.to_string()),
        ("Employment type", meta.employment_type.as_str().to_string()),
        ("Experience", meta.required_experience.as_str().to_string()),
        ("Education", meta.required_education.as_str().to_string()),
        ("Industry", meta.industry.as_str().to_string()),
        ("Function", meta.function.as_str().to_string()),
        ("Remote", yes_no(meta.telecommuting).to_string()),
    ];
    let rows = rows
        .iter()
        .map(|(name, value)| format!("<tr><th>{}</th><td>{}</td></tr>", name, encode_text(value)))
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"<section class="result {class}">
        <h2>{label}</h2>
        {probability}
        <table>
            {rows}
        </table>
    </section>"#,
        class = class,
        label = verdict.label(),
        probability = probability,
        rows = rows,
    )
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_fields, MetaFeatures};
    use crate::inference::{Prediction, Verdict};

    fn report(verdict: Verdict, fake_probability: Option<f64>) -> ScreeningReport {
        ScreeningReport {
            fields: extract_fields("Title: <b>Rust</b> Dev\nLocation: Remote"),
            meta: MetaFeatures::default(),
            prediction: Prediction {
                verdict,
                fake_probability,
            },
        }
    }

    #[test]
    fn test_empty_form() {
        let html = render_page(&PageView::default());
        assert!(html.contains(r#"name="job_post""#));
        assert!(html.contains(r#"name="job_url""#));
        assert!(!html.contains("{{"));
        assert!(!html.contains("class=\"result"));
    }

    #[test]
    fn test_messages_escaped() {
        let messages = [FlashMessage::warning("<script>x</script>")];
        let html = render_page(&PageView {
            messages: &messages,
            ..Default::default()
        });
        assert!(html.contains(r#"<div class="flash warning">&lt;script&gt;x&lt;/script&gt;</div>"#));
    }

    #[test]
    fn test_fake_result_with_probability() {
        let report = report(Verdict::Fake, Some(0.8734));
        let html = render_page(&PageView {
            report: Some(&report),
            ..Default::default()
        });
        assert!(html.contains("FAKE Job Posting"));
        assert!(html.contains("87.34%"));
        assert!(html.contains("&lt;b&gt;Rust&lt;/b&gt; Dev"));
    }

    #[test]
    fn test_genuine_result_without_probability() {
        let report = report(Verdict::Genuine, None);
        let html = render_page(&PageView {
            report: Some(&report),
            ..Default::default()
        });
        assert!(html.contains("Genuine Job"));
        assert!(!html.contains("Fake probability"));
    }

    #[test]
    fn test_job_post_echoed_escaped() {
        let html = render_page(&PageView {
            job_post: "a < b & c",
            job_url: "\"quoted\"",
            ..Default::default()
        });
        assert!(html.contains("a &lt; b &amp; c</textarea>"));
        assert!(html.contains("value=\"&quot;quoted&quot;\""));
    }

    #[test]
    fn test_placeholder_text_in_input_not_expanded() {
        let html = render_page(&PageView {
            job_post: "{{RESULT}}",
            ..Default::default()
        });
        assert!(html.contains("{{RESULT}}</textarea>"));
    }

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(0.5), "50.00%");
        assert_eq!(format_probability(1.0), "100.00%");
    }
}
