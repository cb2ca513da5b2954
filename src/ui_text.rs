//! Translatable UI labels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UiText {
    Title,
    Settings,
    GenerateRecipe,
    AiGeneratedRecipe,
    FoodPairings,
    AiChefQa,
    AskQuestion,
    AskAiChef,
    ShoppingList,
    EnableShoppingList,
    SmartScaling,
    ScaleRecipe,
    JokeOfTheDay,
}

impl UiText {
    pub const ALL: [UiText; 13] = [
        UiText::Title,
        UiText::Settings,
        UiText::GenerateRecipe,
        UiText::AiGeneratedRecipe,
        UiText::FoodPairings,
        UiText::AiChefQa,
        UiText::AskQuestion,
        UiText::AskAiChef,
        UiText::ShoppingList,
        UiText::EnableShoppingList,
        UiText::SmartScaling,
        UiText::ScaleRecipe,
        UiText::JokeOfTheDay,
    ];

    /// Stable key used in the session cache.
    pub fn key(&self) -> &'static str {
        match self {
            UiText::Title => "title",
            UiText::Settings => "settings",
            UiText::GenerateRecipe => "generate_recipe",
            UiText::AiGeneratedRecipe => "ai_generated_recipe",
            UiText::FoodPairings => "food_pairings",
            UiText::AiChefQa => "ai_chef_qa",
            UiText::AskQuestion => "ask_question",
            UiText::AskAiChef => "ask_ai_chef",
            UiText::ShoppingList => "shopping_list",
            UiText::EnableShoppingList => "enable_shopping_list",
            UiText::SmartScaling => "smart_scaling",
            UiText::ScaleRecipe => "scale_recipe",
            UiText::JokeOfTheDay => "joke_of_the_day",
        }
    }

    /// English source text.
    pub fn default_text(&self) -> &'static str {
        match self {
            UiText::Title => "Flavour Fusion: AI Recipe Generator",
            UiText::Settings => "⚙️ Settings",
            UiText::GenerateRecipe => "Generate Recipe 🍽️",
            UiText::AiGeneratedRecipe => "📜 AI-Generated Recipe:",
            UiText::FoodPairings => "🍷 Food Pairing Suggestions:",
            UiText::AiChefQa => "🧑‍🍳 Live Q&A with AI Chef",
            UiText::AskQuestion => "Ask a question about the recipe:",
            UiText::AskAiChef => "Ask AI Chef 🤖",
            UiText::ShoppingList => "🛒 Shopping List",
            UiText::EnableShoppingList => "Enable Shopping List",
            UiText::SmartScaling => "🍽️ Smart Recipe Scaling",
            UiText::ScaleRecipe => "🔄 Scale Recipe",
            UiText::JokeOfTheDay => "💡 Joke of the day:",
        }
    }

    pub fn from_key(key: &str) -> Option<UiText> {
        UiText::ALL.iter().copied().find(|text| text.key() == key)
    }
}
