//! CLI route: single route table and run context. Dispatches to kitchen actions,
//! the export renderer and presentation.

use crate::cli::parse::{Commands, RecipeArgs};
use crate::cli::presentation::{
    format_all_documents, format_dish_suggestion, format_document, format_export_preview,
    format_export_written, format_recipe_outcome, format_reply, format_status_text,
    format_translation, DocumentStatus, StatusReport,
};
use crate::config::{ConfigLoader, FlavourConfig};
use crate::error::{FlavourError, StorageError};
use crate::export::{self, ExportFormat};
use crate::kitchen::Kitchen;
use crate::prompt::{parse_ingredients, RecipeRequest};
use crate::provider::{ProviderFactory, TextGenerator};
use crate::session::{DocumentKind, Session, SessionStore};
use crate::ui_text::UiText;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Runtime context for CLI execution: config, session store, oracle and runtime.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: FlavourConfig,
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    store_path: PathBuf,
    store: SessionStore,
    oracle: Box<dyn TextGenerator>,
    runtime: tokio::runtime::Runtime,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    ///
    /// Fails before any command runs when the configuration is invalid or the
    /// provider has no API key.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, FlavourError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            FlavourError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let oracle = ProviderFactory::create_client(&config.provider)?;
        let store_path = config.session.resolve(&workspace_root);
        let store = SessionStore::open(&store_path)?;

        Self::with_parts(config, workspace_root, config_path, store_path, store, oracle)
    }

    /// Assemble a context from already-built parts.
    pub fn with_parts(
        config: FlavourConfig,
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        store_path: PathBuf,
        store: SessionStore,
        oracle: Box<dyn TextGenerator>,
    ) -> Result<Self, FlavourError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        info!(
            provider = oracle.provider_name(),
            model = oracle.model_name(),
            store = %store_path.display(),
            "Run context ready"
        );
        Ok(Self {
            config,
            workspace_root,
            config_path,
            store_path,
            store,
            oracle,
            runtime,
        })
    }

    pub fn config(&self) -> &FlavourConfig {
        &self.config
    }

    /// Current session as persisted.
    pub fn session(&self) -> Result<Session, FlavourError> {
        Ok(self.store.load()?)
    }

    /// Execute a CLI command via the single route table.
    ///
    /// The session is loaded before the action and saved after it, also when the
    /// action reported a warning.
    pub fn execute(&self, command: &Commands) -> Result<String, FlavourError> {
        let mut session = self.store.load()?;
        let result = self.runtime.block_on(self.execute_inner(command, &mut session));
        Self::settle(result, self.store.save(&session))
    }

    /// A failed save is reported unless the action already failed; then the
    /// action's error wins and the save failure is only logged.
    fn settle(
        result: Result<String, FlavourError>,
        saved: Result<(), StorageError>,
    ) -> Result<String, FlavourError> {
        match (result, saved) {
            (result, Ok(())) => result,
            (Ok(_), Err(save_error)) => Err(save_error.into()),
            (Err(action_error), Err(save_error)) => {
                error!(error = %save_error, "Failed to save session");
                Err(action_error)
            }
        }
    }

    async fn execute_inner(
        &self,
        command: &Commands,
        session: &mut Session,
    ) -> Result<String, FlavourError> {
        let kitchen = self.kitchen();
        match command {
            Commands::Recipe(args) => {
                let request = self.recipe_request(args);
                let outcome = kitchen.generate_recipe(session, &request).await?;
                Ok(format_recipe_outcome(&outcome, session))
            }
            Commands::Pairing { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(FlavourError::MissingInput(
                        "Please enter a recipe topic first!".to_string(),
                    ));
                }
                let reply = kitchen.food_pairing(name).await;
                session.store(DocumentKind::FoodPairing, reply.text());
                Ok(format_reply(session.label(UiText::FoodPairings), &reply))
            }
            Commands::Ask { question, language } => {
                let question = self
                    .question_or_prompt(question.as_deref(), session.label(UiText::AskQuestion))?;
                let reply = kitchen
                    .ask_chef(session, &question, language.as_deref())
                    .await?;
                Ok(format_reply(session.label(UiText::AiChefQa), &reply))
            }
            Commands::Assistant { question } => {
                let question =
                    self.question_or_prompt(question.as_deref(), "Ask a cooking question:")?;
                let reply = kitchen.ask_assistant(&question).await?;
                Ok(reply.text().to_string())
            }
            Commands::ShoppingList => {
                let reply = kitchen.shopping_list(session).await?;
                Ok(format_reply(session.label(UiText::ShoppingList), &reply))
            }
            Commands::Scale { servings } => {
                let reply = kitchen.scale_recipe(session, *servings).await?;
                Ok(format_reply(session.label(UiText::SmartScaling), &reply))
            }
            Commands::TranslateUi { language, reset } => {
                if *reset {
                    session.clear_translation();
                    return Ok("UI translation cleared.".to_string());
                }
                let translation = kitchen.translate_ui(session, language).await?;
                Ok(format_translation(&translation))
            }
            Commands::SuggestDish { ingredients } => {
                let ingredients = parse_ingredients(ingredients);
                let dish = kitchen.suggest_dish(&ingredients).await?;
                Ok(format_dish_suggestion(dish.as_deref()))
            }
            Commands::Joke => Ok(kitchen
                .joke()
                .await
                .map(|joke| format!("{} {}", session.label(UiText::JokeOfTheDay), joke.text()))
                .unwrap_or_else(|| "Jokes are turned off.".to_string())),
            Commands::Export {
                format,
                output,
                input,
                preview,
            } => self.handle_export(
                session,
                *format,
                output.as_deref(),
                input.as_deref(),
                *preview,
            ),
            Commands::Show { document } => Ok(match document {
                Some(target) => format_document(session, target.kind()),
                None => format_all_documents(session),
            }),
            Commands::Status { format } => self.handle_status(session, format),
        }
    }

    fn kitchen(&self) -> Kitchen<'_> {
        Kitchen::new(self.oracle.as_ref())
            .with_jokes(self.config.kitchen.jokes)
            .with_language(self.config.kitchen.language.clone())
    }

    fn recipe_request(&self, args: &RecipeArgs) -> RecipeRequest {
        RecipeRequest {
            topic: args.topic.clone(),
            ingredients: args
                .ingredients
                .as_deref()
                .map(parse_ingredients)
                .unwrap_or_default(),
            word_count: args.word_count.unwrap_or(self.config.kitchen.word_count),
            dietary: args.diet,
            max_cooking_minutes: args.max_minutes,
            flavor: args.flavor,
            language: args
                .language
                .clone()
                .or_else(|| Some(self.config.kitchen.language.clone())),
            cuisine: args.cuisine.clone(),
            servings: args.servings,
            matched_dish: args.dish.clone(),
            include_nutrition: self.config.kitchen.include_nutrition && !args.no_nutrition,
        }
    }

    /// Use the given question, or ask for one on an interactive terminal.
    fn question_or_prompt(&self, question: Option<&str>, prompt: &str) -> Result<String, FlavourError> {
        if let Some(question) = question {
            return Ok(question.to_string());
        }
        if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
            return Ok(String::new());
        }

        use dialoguer::Input;
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FlavourError::InvalidInput(format!("Failed to get user input: {}", e)))
    }

    fn handle_export(
        &self,
        session: &Session,
        format: ExportFormat,
        output: Option<&Path>,
        input: Option<&Path>,
        preview: bool,
    ) -> Result<String, FlavourError> {
        let text = match input {
            Some(path) => std::fs::read_to_string(path)?,
            None => session
                .document(DocumentKind::ShoppingList)
                .ok_or_else(|| {
                    FlavourError::MissingInput(
                        "No shopping list yet. Run shopping-list first!".to_string(),
                    )
                })?
                .to_string(),
        };

        if preview {
            let (recorded, stats) = export::preview(&text, format, &self.config.export)?;
            return Ok(format_export_preview(&recorded, &stats));
        }

        let artifact = export::export_text(&text, format, &self.config.export)?;
        let dir = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.resolve_output_dir());
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(artifact.file_name());
        std::fs::write(&path, &artifact.bytes)?;
        debug!(path = %path.display(), "Export written");
        Ok(format_export_written(&artifact, &path))
    }

    fn resolve_output_dir(&self) -> PathBuf {
        let dir = &self.config.export.output_dir;
        if dir.is_absolute() {
            dir.clone()
        } else {
            self.workspace_root.join(dir)
        }
    }

    fn handle_status(&self, session: &Session, format: &str) -> Result<String, FlavourError> {
        let report = StatusReport {
            provider: self.oracle.provider_name().to_string(),
            model: self.oracle.model_name().to_string(),
            endpoint: self.config.provider.endpoint.clone(),
            api_key_configured: self.config.provider.resolve_api_key().is_some(),
            workspace: self.workspace_root.clone(),
            config_file: self.config_path.clone(),
            session_store: self.store_path.clone(),
            documents: DocumentStatus::collect(session),
            ui_language: session.translation().map(|t| t.language.clone()),
        };
        if format == "json" {
            serde_json::to_string_pretty(&report)
                .map_err(|e| FlavourError::InvalidInput(e.to_string()))
        } else {
            Ok(format_status_text(&report))
        }
    }
}
