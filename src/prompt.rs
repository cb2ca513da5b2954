//! Prompt assembly.
//!
//! [`RecipeRequest`] holds the user's recipe options and turns them into one
//! prompt deterministically; the remaining functions build the prompts for the
//! other kitchen features.

use crate::error::FlavourError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

pub const WORD_COUNT_RANGE: RangeInclusive<u32> = 100..=2000;
pub const COOKING_MINUTES_RANGE: RangeInclusive<u32> = 5..=120;
pub const SERVINGS_RANGE: RangeInclusive<u32> = 1..=100;
pub const DEFAULT_WORD_COUNT: u32 = 500;

const NUTRITION_CLAUSE: &str = " Also, provide a detailed nutritional breakdown for each ingredient used, including total calories, proteins, fats, and carbs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryPreference {
    Vegan,
    Vegetarian,
    GlutenFree,
    Keto,
    Paleo,
    Halal,
    Kosher,
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DietaryPreference::Vegan => "Vegan",
            DietaryPreference::Vegetarian => "Vegetarian",
            DietaryPreference::GlutenFree => "Gluten-Free",
            DietaryPreference::Keto => "Keto",
            DietaryPreference::Paleo => "Paleo",
            DietaryPreference::Halal => "Halal",
            DietaryPreference::Kosher => "Kosher",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FlavorProfile {
    Spicy,
    Sweet,
    Savory,
    Sour,
    Umami,
}

impl fmt::Display for FlavorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlavorProfile::Spicy => "Spicy",
            FlavorProfile::Sweet => "Sweet",
            FlavorProfile::Savory => "Savory",
            FlavorProfile::Sour => "Sour",
            FlavorProfile::Umami => "Umami",
        };
        f.write_str(label)
    }
}

/// Split a comma-separated ingredient field, dropping blanks.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed ingredients, blanks dropped.
pub fn non_blank_ingredients(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Options collected for one recipe generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub topic: Option<String>,
    pub ingredients: Vec<String>,
    pub word_count: u32,
    pub dietary: Option<DietaryPreference>,
    pub max_cooking_minutes: Option<u32>,
    pub flavor: Option<FlavorProfile>,
    pub language: Option<String>,
    pub cuisine: Option<String>,
    pub servings: Option<u32>,
    /// Traditional dish the user accepted from a suggestion
    pub matched_dish: Option<String>,
    pub include_nutrition: bool,
}

impl Default for RecipeRequest {
    fn default() -> Self {
        Self {
            topic: None,
            ingredients: Vec::new(),
            word_count: DEFAULT_WORD_COUNT,
            dietary: None,
            max_cooking_minutes: None,
            flavor: None,
            language: None,
            cuisine: None,
            servings: None,
            matched_dish: None,
            include_nutrition: true,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<(), FlavourError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(FlavourError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}

impl RecipeRequest {
    pub fn topic(&self) -> Option<&str> {
        non_blank(&self.topic)
    }

    pub fn matched_dish(&self) -> Option<&str> {
        non_blank(&self.matched_dish)
    }

    pub fn has_ingredients(&self) -> bool {
        self.ingredients.iter().any(|item| !item.trim().is_empty())
    }

    /// What the recipe is about, for follow-up prompts.
    pub fn subject(&self) -> Option<&str> {
        self.matched_dish().or_else(|| self.topic())
    }

    /// The only invariant checked before any oracle call, plus range bounds.
    pub fn validate(&self) -> Result<(), FlavourError> {
        if self.topic().is_none() && !self.has_ingredients() {
            return Err(FlavourError::MissingInput(
                "Please enter either a recipe topic or ingredients!".to_string(),
            ));
        }
        check_range("Word count", self.word_count, &WORD_COUNT_RANGE)?;
        if let Some(minutes) = self.max_cooking_minutes {
            check_range("Cooking time", minutes, &COOKING_MINUTES_RANGE)?;
        }
        if let Some(servings) = self.servings {
            check_range("Servings", servings, &SERVINGS_RANGE)?;
        }
        Ok(())
    }

    /// Build the recipe prompt. Clause order is fixed.
    pub fn to_prompt(&self) -> String {
        let mut prompt = format!("Write a {}-word recipe", self.word_count);
        if let Some(dish) = self.matched_dish() {
            prompt.push_str(&format!(" for {}", dish));
        } else if let Some(topic) = self.topic() {
            prompt.push_str(&format!(" on {}", topic));
        }
        if let Some(language) = non_blank(&self.language) {
            prompt.push_str(&format!(" in {}", language));
        }
        prompt.push('.');

        if self.has_ingredients() {
            prompt.push_str(&format!(
                " Use only these ingredients: {}.",
                non_blank_ingredients(&self.ingredients).join(", ")
            ));
        }
        if let Some(dietary) = self.dietary {
            prompt.push_str(&format!(" Ensure the recipe follows a {} diet.", dietary));
        }
        if let Some(minutes) = self.max_cooking_minutes {
            prompt.push_str(&format!(
                " The total cooking time should be under {} minutes.",
                minutes
            ));
        }
        if let Some(flavor) = self.flavor {
            prompt.push_str(&format!(" Make the dish {} in taste.", flavor));
        }
        if let Some(cuisine) = non_blank(&self.cuisine) {
            prompt.push_str(&format!(" Give it an authentic {} cuisine style.", cuisine));
        }
        if let Some(servings) = self.servings {
            prompt.push_str(&format!(" The recipe should serve {} people.", servings));
        }
        if self.include_nutrition {
            prompt.push_str(NUTRITION_CLAUSE);
        }
        prompt
    }
}

pub fn food_pairing_prompt(recipe_name: &str) -> String {
    format!(
        "Suggest complementary dishes, drinks, and desserts for {}.",
        recipe_name
    )
}

pub fn chef_question_prompt(recipe: &str, question: &str, language: &str) -> String {
    format!(
        "The following is a recipe: {}. The user asks: {}. Provide a helpful answer in {}.",
        recipe, question, language
    )
}

pub fn assistant_prompt(question: &str) -> String {
    format!(
        "You are a cooking assistant. Answer the following question with clear, detailed cooking advice: {}",
        question
    )
}

/// One ingredient per line so the result can be exported as-is.
pub fn extract_ingredients_prompt(recipe: &str) -> String {
    format!(
        "Extract ingredients from this recipe as a plain list with one ingredient per line:\n\n{}",
        recipe
    )
}

pub fn scale_recipe_prompt(recipe: &str, servings: u32) -> String {
    format!(
        "Adjust ingredient quantities in this recipe to serve {} people:\n\n{}",
        servings, recipe
    )
}

pub fn translate_prompt(text: &str, target_language: &str) -> String {
    format!("Translate the following text into {}: {}", target_language, text)
}

pub fn joke_prompt() -> String {
    "Tell me a unique and funny programming joke.".to_string()
}

pub fn traditional_dish_prompt(ingredients: &[String]) -> String {
    format!(
        "Suggest a well-known traditional or regional dish that uses these ingredients: {}. Only return the dish name.",
        non_blank_ingredients(ingredients).join(", ")
    )
}
