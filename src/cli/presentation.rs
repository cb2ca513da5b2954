//! CLI presentation: text and json formatters per command family.

use crate::export::{ExportArtifact, RecordingSurface, RenderStats, RunKind};
use crate::kitchen::{RecipeOutcome, Reply};
use crate::session::{DocumentKind, Session, UiTranslation};
use crate::ui_text::UiText;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Heading label for a session document.
pub fn document_heading(kind: DocumentKind) -> UiText {
    match kind {
        DocumentKind::Recipe => UiText::AiGeneratedRecipe,
        DocumentKind::FoodPairing => UiText::FoodPairings,
        DocumentKind::ShoppingList => UiText::ShoppingList,
    }
}

fn section(heading: &str, body: &str) -> String {
    format!("{}\n\n{}", heading, body.trim_end())
}

pub fn format_reply(heading: &str, reply: &Reply) -> String {
    section(heading, reply.text())
}

pub fn format_recipe_outcome(outcome: &RecipeOutcome, session: &Session) -> String {
    let mut parts = Vec::new();
    if let Some(joke) = &outcome.joke {
        parts.push(format!("{} {}", session.label(UiText::JokeOfTheDay), joke.text()));
    }
    parts.push(format_reply(
        session.label(UiText::AiGeneratedRecipe),
        &outcome.recipe,
    ));
    if let Some(pairing) = &outcome.pairing {
        parts.push(format_reply(session.label(UiText::FoodPairings), pairing));
    }
    parts.join("\n\n")
}

pub fn format_document(session: &Session, kind: DocumentKind) -> String {
    match session.document(kind) {
        Some(text) => section(session.label(document_heading(kind)), text),
        None => format!("No {} in this session.", kind.as_str().replace('_', " ")),
    }
}

pub fn format_all_documents(session: &Session) -> String {
    let parts: Vec<String> = DocumentKind::ALL
        .iter()
        .filter(|kind| session.document(**kind).is_some())
        .map(|kind| format_document(session, *kind))
        .collect();
    if parts.is_empty() {
        "Session is empty. Generate a recipe first!".to_string()
    } else {
        parts.join("\n\n")
    }
}

pub fn format_translation(translation: &UiTranslation) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Label", "English", translation.language.as_str()]);
    for text in UiText::ALL {
        let translated = translation
            .labels
            .get(text.key())
            .map(String::as_str)
            .unwrap_or_else(|| text.default_text());
        table.add_row(vec![text.key(), text.default_text(), translated]);
    }
    format!("UI translated to {}\n{}", translation.language, table)
}

pub fn format_dish_suggestion(dish: Option<&str>) -> String {
    match dish {
        Some(dish) => format!(
            "Traditional dish: {}\nUse it with: flavour recipe --dish \"{}\"",
            dish, dish
        ),
        None => "No traditional dish found for these ingredients.".to_string(),
    }
}

pub fn format_export_written(artifact: &ExportArtifact, path: &Path) -> String {
    let mut output = format!(
        "Exported {} ({}, {} bytes) to {}",
        artifact.file_name(),
        artifact.content_type(),
        artifact.bytes.len(),
        path.display()
    );
    output.push_str(&format!(
        "\n{} page(s), {} line(s) drawn",
        artifact.stats.pages, artifact.stats.lines_drawn
    ));
    if artifact.stats.clipped_lines > 0 {
        output.push_str(&format!(
            ", {} line(s) clipped",
            artifact.stats.clipped_lines
        ));
    }
    output
}

pub fn format_export_preview(recorded: &RecordingSurface, stats: &RenderStats) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Page", "Y", "Kind", "Text"]);
    for run in &recorded.runs {
        let kind = match run.kind {
            RunKind::Title => "title",
            RunKind::Body => "line",
        };
        table.add_row(vec![
            (run.page + 1).to_string(),
            run.y.to_string(),
            kind.to_string(),
            run.text.clone(),
        ]);
    }
    format!(
        "{}\n{} page(s), {} text run(s), {} line(s) clipped",
        table, stats.pages, stats.text_runs, stats.clipped_lines
    )
}

/// Snapshot printed by `flavour status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub provider: String,
    pub model: String,
    pub endpoint: Option<String>,
    pub api_key_configured: bool,
    pub workspace: PathBuf,
    pub config_file: Option<PathBuf>,
    pub session_store: PathBuf,
    pub documents: Vec<DocumentStatus>,
    pub ui_language: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatus {
    pub kind: String,
    pub present: bool,
    pub lines: usize,
}

impl DocumentStatus {
    pub fn collect(session: &Session) -> Vec<DocumentStatus> {
        DocumentKind::ALL
            .iter()
            .map(|kind| {
                let text = session.document(*kind);
                DocumentStatus {
                    kind: kind.as_str().to_string(),
                    present: text.is_some(),
                    lines: text.map(|t| t.lines().count()).unwrap_or(0),
                }
            })
            .collect()
    }
}

fn title(text: &str) -> String {
    format!("{}", text.bold().underline())
}

pub fn format_status_text(report: &StatusReport) -> String {
    let mut provider = Table::new();
    provider.load_preset(UTF8_BORDERS_ONLY);
    provider.add_row(vec!["Provider", report.provider.as_str()]);
    provider.add_row(vec!["Model", report.model.as_str()]);
    provider.add_row(vec![
        "Endpoint",
        report.endpoint.as_deref().unwrap_or("default"),
    ]);
    provider.add_row(vec![
        "API key",
        if report.api_key_configured {
            "configured"
        } else {
            "not required"
        },
    ]);

    let config_file = report
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "layered (user + workspace)".to_string());
    let mut workspace = Table::new();
    workspace.load_preset(UTF8_BORDERS_ONLY);
    workspace.add_row(vec!["Workspace".to_string(), report.workspace.display().to_string()]);
    workspace.add_row(vec!["Config".to_string(), config_file]);
    workspace.add_row(vec![
        "Session store".to_string(),
        report.session_store.display().to_string(),
    ]);
    workspace.add_row(vec![
        "UI language".to_string(),
        report
            .ui_language
            .clone()
            .unwrap_or_else(|| "English".to_string()),
    ]);

    let mut documents = Table::new();
    documents.load_preset(UTF8_BORDERS_ONLY);
    documents.set_header(vec!["Document", "Present", "Lines"]);
    for doc in &report.documents {
        documents.add_row(vec![
            doc.kind.clone(),
            if doc.present { "yes" } else { "no" }.to_string(),
            doc.lines.to_string(),
        ]);
    }

    format!(
        "{}\n{}\n\n{}\n{}\n\n{}\n{}",
        title("Provider"),
        provider,
        title("Workspace"),
        workspace,
        title("Session"),
        documents
    )
}
