//! HTML rendering for the upload form

/// What a rendered page shows below the form
#[derive(Debug, Default)]
pub struct PageView {
    /// Error messages, shown as a red list
    pub messages: Vec<String>,
    /// Answer text, shown under an "Answer:" heading
    pub answer: Option<String>,
}

impl PageView {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
            answer: None,
        }
    }

    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            answer: Some(answer.into()),
        }
    }
}

const FORM: &str = r#"<!doctype html>
<title>Chat Your PDFs</title>
<h2>Chat Your PDFs</h2>
<form method=post enctype=multipart/form-data>
  <label>Upload a PDF file:</label><br>
  <input type=file name=pdf_file accept="application/pdf"><br><br>
  <label>Ask a Question:</label><br>
  <input type=text name=question style="width:400px"><br><br>
  <input type=submit value="Get Answer">
</form>
"#;

/// Render the form page
pub fn render(view: &PageView) -> String {
    let mut html = String::from(FORM);

    if !view.messages.is_empty() {
        html.push_str("<ul style=\"color:red;\">");
        for message in &view.messages {
            html.push_str(&format!("<li>{}</li>", html_escape(message)));
        }
        html.push_str("</ul>\n");
    }

    if let Some(answer) = view.answer.as_deref().filter(|a| !a.is_empty()) {
        html.push_str(&format!(
            "<h3>Answer:</h3>\n<div style=\"white-space: pre-wrap;\">{}</div>\n",
            html_escape(answer)
        ));
    }

    html
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
