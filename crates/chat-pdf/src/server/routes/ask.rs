//! Upload-and-ask form endpoint

use axum::{
    extract::{Multipart, State},
    response::Html,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::page::{self, PageView};
use crate::server::state::AppState;
use crate::types::{Answer, UploadedPdf};

const PDF_FIELD: &str = "pdf_file";
const QUESTION_FIELD: &str = "question";

/// Fields read from the upload form
#[derive(Debug, Default)]
struct AskForm {
    pdf: Option<UploadedPdf>,
    question: String,
}

impl AskForm {
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = AskForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::InvalidForm(format!("Failed to read multipart field: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                PDF_FIELD => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| Error::InvalidForm(format!("Failed to read file: {}", e)))?;

                    // Browsers send an empty, unnamed part when no file is chosen
                    if !filename.is_empty() {
                        form.pdf = Some(UploadedPdf::new(filename, data));
                    }
                }
                QUESTION_FIELD => {
                    form.question = field.text().await.map_err(|e| {
                        Error::InvalidForm(format!("Failed to read question: {}", e))
                    })?;
                }
                other => tracing::debug!("Ignoring form field: {}", other),
            }
        }

        Ok(form)
    }
}

/// GET / - empty form
pub async fn show_form() -> Html<String> {
    Html(page::render(&PageView::default()))
}

/// POST / - answer a question about the uploaded PDF
pub async fn ask_question(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("ask", %request_id);

    let view = match handle_ask(&state, multipart).instrument(span).await {
        Ok(answer) => {
            if answer.is_unavailable() {
                tracing::info!(%request_id, "Document does not contain the answer");
            }
            PageView::with_answer(answer.text)
        }
        Err(e) => {
            tracing::warn!(%request_id, "Question failed: {}", e);
            PageView::with_message(e.user_message())
        }
    };

    Html(page::render(&view))
}

async fn handle_ask(state: &AppState, multipart: Multipart) -> Result<Answer> {
    let pipeline = state.pipeline()?;
    let form = AskForm::read(multipart).await?;

    let pdf = form.pdf.ok_or(Error::MissingUpload)?;
    let question = form.question.trim();
    if question.is_empty() {
        return Err(Error::MissingQuestion);
    }

    pipeline.answer(&pdf, question).await
}
