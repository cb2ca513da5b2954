//! Kitchen actions
//!
//! One method per user action. Each validates its input first (a warning and zero
//! oracle calls when required input is missing), then runs a short sequential
//! chain of oracle calls. Oracle failures never abort an action: they become the
//! feature's fixed fallback text, with the typed cause kept alongside.

use crate::error::{FlavourError, GenerationError};
use crate::prompt::{self, RecipeRequest, SERVINGS_RANGE};
use crate::provider::TextGenerator;
use crate::session::{DocumentKind, Session, UiTranslation};
use crate::ui_text::UiText;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

mod jokes;

pub use jokes::{JokeSource, CANNED_JOKES};

pub const RECIPE_FALLBACK: &str = "Sorry, an error occurred!";
pub const PAIRING_FALLBACK: &str = "No pairing suggestions available.";
pub const CHEF_FALLBACK: &str = "Error fetching answer.";
pub const ASSISTANT_FALLBACK: &str = "Sorry, I couldn't fetch an answer right now.";
pub const SHOPPING_LIST_FALLBACK: &str = "No ingredients found.";
pub const SCALE_FALLBACK: &str = "Unable to scale recipe.";
pub const JOKE_FALLBACK: &str = "Oops! Couldn't fetch a joke this time.";

/// Outcome of one oracle-backed feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Generated(String),
    Fallback {
        message: String,
        cause: GenerationError,
    },
}

impl Reply {
    fn from_result(result: Result<String, GenerationError>, fallback: &str, feature: &str) -> Self {
        match result {
            Ok(text) => Reply::Generated(text),
            Err(cause) => {
                warn!(feature, error = %cause, "Oracle call failed, using fallback");
                Reply::Fallback {
                    message: fallback.to_string(),
                    cause,
                }
            }
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Generated(text) => text,
            Reply::Fallback { message, .. } => message,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reply::Fallback { .. })
    }

    pub fn generated(&self) -> Option<&str> {
        match self {
            Reply::Generated(text) => Some(text),
            Reply::Fallback { .. } => None,
        }
    }
}

/// Everything one "generate recipe" action produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeOutcome {
    pub joke: Option<Reply>,
    pub recipe: Reply,
    /// Absent when the recipe failed or there was nothing to pair with
    pub pairing: Option<Reply>,
}

fn required_text(value: &str, message: &str) -> Result<String, FlavourError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FlavourError::MissingInput(message.to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}

fn current_recipe(session: &Session) -> Result<&str, FlavourError> {
    session
        .document(DocumentKind::Recipe)
        .ok_or_else(|| FlavourError::MissingInput("Generate a recipe first!".to_string()))
}

pub struct Kitchen<'a> {
    oracle: &'a dyn TextGenerator,
    jokes: JokeSource,
    language: String,
}

impl<'a> Kitchen<'a> {
    pub fn new(oracle: &'a dyn TextGenerator) -> Self {
        Self {
            oracle,
            jokes: JokeSource::Canned,
            language: "English".to_string(),
        }
    }

    pub fn with_jokes(mut self, jokes: JokeSource) -> Self {
        self.jokes = jokes;
        self
    }

    /// Default answer language for follow-up questions.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Generate a recipe and its food pairings, replacing the session's documents.
    ///
    /// On recipe failure the session keeps its previous documents.
    pub async fn generate_recipe(
        &self,
        session: &mut Session,
        request: &RecipeRequest,
    ) -> Result<RecipeOutcome, FlavourError> {
        request.validate()?;

        let joke = self.joke().await;
        let prompt = request.to_prompt();
        info!(
            provider = self.oracle.provider_name(),
            model = self.oracle.model_name(),
            prompt_chars = prompt.len(),
            "Generating recipe"
        );
        let recipe = Reply::from_result(self.oracle.generate(&prompt).await, RECIPE_FALLBACK, "recipe");

        let Some(text) = recipe.generated() else {
            return Ok(RecipeOutcome {
                joke,
                recipe,
                pairing: None,
            });
        };

        session.store(DocumentKind::Recipe, text);
        session.clear(DocumentKind::ShoppingList);
        session.clear(DocumentKind::FoodPairing);

        let pairing = match request.subject() {
            Some(subject) => {
                let reply = self.food_pairing(subject).await;
                session.store(DocumentKind::FoodPairing, reply.text());
                Some(reply)
            }
            None => None,
        };

        Ok(RecipeOutcome {
            joke,
            recipe,
            pairing,
        })
    }

    /// Suggest dishes, drinks, and desserts that go with `recipe_name`.
    pub async fn food_pairing(&self, recipe_name: &str) -> Reply {
        let prompt = prompt::food_pairing_prompt(recipe_name);
        Reply::from_result(self.oracle.generate(&prompt).await, PAIRING_FALLBACK, "food_pairing")
    }

    /// Live Q&A about the current recipe.
    pub async fn ask_chef(
        &self,
        session: &Session,
        question: &str,
        language: Option<&str>,
    ) -> Result<Reply, FlavourError> {
        let question = required_text(question, "Please enter a question.")?;
        let recipe = session.document(DocumentKind::Recipe).unwrap_or_default();
        let language = language.unwrap_or(self.language.as_str());
        let prompt = prompt::chef_question_prompt(recipe, &question, language);
        Ok(Reply::from_result(
            self.oracle.generate(&prompt).await,
            CHEF_FALLBACK,
            "ask_chef",
        ))
    }

    /// General cooking question, independent of the current recipe.
    pub async fn ask_assistant(&self, question: &str) -> Result<Reply, FlavourError> {
        let question = required_text(question, "Please enter a question.")?;
        let prompt = prompt::assistant_prompt(&question);
        Ok(Reply::from_result(
            self.oracle.generate(&prompt).await,
            ASSISTANT_FALLBACK,
            "assistant",
        ))
    }

    /// Extract a shopping list from the current recipe and keep it for export.
    pub async fn shopping_list(&self, session: &mut Session) -> Result<Reply, FlavourError> {
        let prompt = prompt::extract_ingredients_prompt(current_recipe(session)?);
        let reply = Reply::from_result(
            self.oracle.generate(&prompt).await,
            SHOPPING_LIST_FALLBACK,
            "shopping_list",
        );
        if let Some(text) = reply.generated() {
            session.store(DocumentKind::ShoppingList, text);
        }
        Ok(reply)
    }

    /// Rewrite the current recipe's quantities for `servings` people.
    pub async fn scale_recipe(&self, session: &Session, servings: u32) -> Result<Reply, FlavourError> {
        let recipe = current_recipe(session)?;
        if !SERVINGS_RANGE.contains(&servings) {
            return Err(FlavourError::InvalidInput(format!(
                "Servings must be between {} and {}, got {}",
                SERVINGS_RANGE.start(),
                SERVINGS_RANGE.end(),
                servings
            )));
        }
        let prompt = prompt::scale_recipe_prompt(recipe, servings);
        Ok(Reply::from_result(
            self.oracle.generate(&prompt).await,
            SCALE_FALLBACK,
            "scale_recipe",
        ))
    }

    /// Translate every UI label into `language` and cache the result in the session.
    ///
    /// A label whose translation fails keeps its English text.
    pub async fn translate_ui(
        &self,
        session: &mut Session,
        language: &str,
    ) -> Result<UiTranslation, FlavourError> {
        let language = required_text(language, "Please enter a language.")?;
        let mut labels = BTreeMap::new();
        let mut failures = 0usize;

        for text in UiText::ALL {
            let prompt = prompt::translate_prompt(text.default_text(), &language);
            let translated = match self.oracle.generate(&prompt).await {
                Ok(translated) => translated,
                Err(error) => {
                    failures += 1;
                    debug!(key = text.key(), error = %error, "Keeping untranslated label");
                    text.default_text().to_string()
                }
            };
            labels.insert(text.key().to_string(), translated);
        }

        if failures > 0 {
            warn!(language = %language, failures, "Some UI labels were not translated");
        }

        let translation = UiTranslation { language, labels };
        session.set_translation(translation.clone());
        Ok(translation)
    }

    /// Name a traditional or regional dish using the given ingredients.
    ///
    /// `Ok(None)` means the oracle had no suggestion.
    pub async fn suggest_dish(&self, ingredients: &[String]) -> Result<Option<String>, FlavourError> {
        if prompt::non_blank_ingredients(ingredients).is_empty() {
            return Err(FlavourError::MissingInput(
                "Please enter ingredients first!".to_string(),
            ));
        }
        let prompt = prompt::traditional_dish_prompt(ingredients);
        match self.oracle.generate(&prompt).await {
            Ok(dish) => Ok(Some(dish)),
            Err(error) => {
                warn!(error = %error, "Could not find a traditional dish");
                Ok(None)
            }
        }
    }

    /// A joke to read while waiting, per the configured source.
    pub async fn joke(&self) -> Option<Reply> {
        match self.jokes {
            JokeSource::Off => None,
            JokeSource::Canned => Some(Reply::Generated(jokes::pick_canned().to_string())),
            JokeSource::Oracle => Some(Reply::from_result(
                self.oracle.generate(&prompt::joke_prompt()).await,
                JOKE_FALLBACK,
                "joke",
            )),
        }
    }
}
