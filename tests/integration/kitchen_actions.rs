//! Kitchen action integration tests against the fake generator.

use flavour_fusion::error::{FlavourError, GenerationError};
use flavour_fusion::kitchen::{
    JokeSource, Kitchen, ASSISTANT_FALLBACK, CHEF_FALLBACK, PAIRING_FALLBACK, RECIPE_FALLBACK,
    SCALE_FALLBACK, SHOPPING_LIST_FALLBACK,
};
use flavour_fusion::prompt::{DietaryPreference, RecipeRequest};
use flavour_fusion::provider::FakeGenerator;
use flavour_fusion::session::{DocumentKind, Session};
use flavour_fusion::ui_text::UiText;

fn kitchen(oracle: &FakeGenerator) -> Kitchen<'_> {
    Kitchen::new(oracle).with_jokes(JokeSource::Off)
}

#[tokio::test]
async fn test_empty_topic_and_ingredients_is_a_warning_with_no_calls() {
    let oracle = FakeGenerator::answering("never used");
    let mut session = Session::new();

    let request = RecipeRequest {
        topic: Some("   ".to_string()),
        ..Default::default()
    };
    let err = kitchen(&oracle)
        .generate_recipe(&mut session, &request)
        .await
        .unwrap_err();

    assert!(err.is_warning());
    assert_eq!(
        err.to_string(),
        "Please enter either a recipe topic or ingredients!"
    );
    assert_eq!(oracle.call_count(), 0);
    assert_eq!(session, Session::new());
}

#[tokio::test]
async fn test_recipe_stores_recipe_and_pairing() {
    let oracle = FakeGenerator::new()
        .with_response("complementary dishes", "Chianti and tiramisu")
        .with_default_response("Layer pasta, sauce and cheese.");
    let mut session = Session::new();
    session.store(DocumentKind::ShoppingList, "stale list");

    let request = RecipeRequest {
        topic: Some("lasagna".to_string()),
        dietary: Some(DietaryPreference::Vegetarian),
        ..Default::default()
    };
    let outcome = kitchen(&oracle)
        .generate_recipe(&mut session, &request)
        .await
        .unwrap();

    assert_eq!(outcome.recipe.text(), "Layer pasta, sauce and cheese.");
    assert_eq!(
        outcome.pairing.as_ref().map(|p| p.text()),
        Some("Chianti and tiramisu")
    );
    assert_eq!(
        session.document(DocumentKind::Recipe),
        Some("Layer pasta, sauce and cheese.")
    );
    assert_eq!(
        session.document(DocumentKind::FoodPairing),
        Some("Chianti and tiramisu")
    );
    assert_eq!(session.document(DocumentKind::ShoppingList), None);

    let prompts = oracle.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].starts_with("Write a 500-word recipe on lasagna."));
    assert!(prompts[0].contains("Ensure the recipe follows a Vegetarian diet."));
}

#[tokio::test]
async fn test_recipe_failure_uses_fallback_and_keeps_session() {
    let oracle = FakeGenerator::failing(GenerationError::RequestFailed("timeout".into()));
    let mut session = Session::new();
    session.store(DocumentKind::Recipe, "Old recipe");

    let request = RecipeRequest {
        ingredients: vec!["rice".to_string(), "egg".to_string()],
        ..Default::default()
    };
    let outcome = kitchen(&oracle)
        .generate_recipe(&mut session, &request)
        .await
        .unwrap();

    assert!(outcome.recipe.is_fallback());
    assert_eq!(outcome.recipe.text(), RECIPE_FALLBACK);
    assert_eq!(outcome.pairing, None);
    assert_eq!(session.document(DocumentKind::Recipe), Some("Old recipe"));
    assert_eq!(oracle.call_count(), 1);
}

#[tokio::test]
async fn test_every_feature_has_its_own_fallback() {
    let oracle = FakeGenerator::failing(GenerationError::RateLimited("quota".into()));
    let kitchen = kitchen(&oracle);
    let mut session = Session::new();
    session.store(DocumentKind::Recipe, "Boil an egg.");

    assert_eq!(kitchen.food_pairing("eggs").await.text(), PAIRING_FALLBACK);
    assert_eq!(
        kitchen
            .ask_chef(&session, "How long?", None)
            .await
            .unwrap()
            .text(),
        CHEF_FALLBACK
    );
    assert_eq!(
        kitchen.ask_assistant("What is a roux?").await.unwrap().text(),
        ASSISTANT_FALLBACK
    );
    assert_eq!(
        kitchen.scale_recipe(&session, 4).await.unwrap().text(),
        SCALE_FALLBACK
    );

    let list = kitchen.shopping_list(&mut session).await.unwrap();
    assert_eq!(list.text(), SHOPPING_LIST_FALLBACK);
    assert_eq!(session.document(DocumentKind::ShoppingList), None);
}

#[tokio::test]
async fn test_fallback_keeps_typed_cause() {
    let oracle = FakeGenerator::failing(GenerationError::MalformedRequest("bad field".into()));
    let reply = kitchen(&oracle).ask_assistant("Why?").await.unwrap();
    match reply {
        flavour_fusion::kitchen::Reply::Fallback { cause, .. } => {
            assert!(cause.is_request_problem());
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blank_question_is_a_warning() {
    let oracle = FakeGenerator::answering("answer");
    let session = Session::new();
    let err = kitchen(&oracle)
        .ask_chef(&session, "  ", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FlavourError::MissingInput(_)));
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_shopping_list_needs_a_recipe() {
    let oracle = FakeGenerator::answering("Eggs");
    let mut session = Session::new();
    let err = kitchen(&oracle)
        .shopping_list(&mut session)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Generate a recipe first!");
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_ask_chef_uses_default_language() {
    let oracle = FakeGenerator::answering("Ten minutes.");
    let mut session = Session::new();
    session.store(DocumentKind::Recipe, "Boil an egg.");

    let kitchen = Kitchen::new(&oracle)
        .with_jokes(JokeSource::Off)
        .with_language("Spanish");
    kitchen.ask_chef(&session, "How long?", None).await.unwrap();
    kitchen
        .ask_chef(&session, "How long?", Some("German"))
        .await
        .unwrap();

    let prompts = oracle.prompts();
    assert!(prompts[0].ends_with("Provide a helpful answer in Spanish."));
    assert!(prompts[1].ends_with("Provide a helpful answer in German."));
}

#[tokio::test]
async fn test_translate_ui_keeps_english_on_failure() {
    let oracle = FakeGenerator::new()
        .with_failure(
            UiText::ShoppingList.default_text(),
            GenerationError::RequestFailed("down".into()),
        )
        .with_default_response("traduit");
    let mut session = Session::new();

    let translation = kitchen(&oracle)
        .translate_ui(&mut session, "French")
        .await
        .unwrap();

    assert_eq!(oracle.call_count(), UiText::ALL.len());
    assert_eq!(translation.language, "French");
    assert_eq!(session.label(UiText::Title), "traduit");
    assert_eq!(
        session.label(UiText::ShoppingList),
        UiText::ShoppingList.default_text()
    );
}

#[tokio::test]
async fn test_whitespace_ingredients_count_as_missing() {
    let oracle = FakeGenerator::answering("recipe");
    let kitchen = kitchen(&oracle);
    let mut session = Session::new();

    let request = RecipeRequest {
        ingredients: vec!["   ".to_string(), String::new()],
        ..Default::default()
    };
    let err = kitchen
        .generate_recipe(&mut session, &request)
        .await
        .unwrap_err();
    assert!(err.is_warning());
    assert_eq!(session, Session::new());

    let err = kitchen.suggest_dish(&["  ".to_string()]).await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter ingredients first!");
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_suggest_dish() {
    let oracle = FakeGenerator::answering("Shakshuka");
    let kitchen = kitchen(&oracle);

    let err = kitchen.suggest_dish(&[]).await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter ingredients first!");

    let dish = kitchen
        .suggest_dish(&["eggs".to_string(), "tomato".to_string()])
        .await
        .unwrap();
    assert_eq!(dish.as_deref(), Some("Shakshuka"));

    let failing = FakeGenerator::failing(GenerationError::EmptyResponse);
    let none = Kitchen::new(&failing)
        .suggest_dish(&["eggs".to_string()])
        .await
        .unwrap();
    assert_eq!(none, None);
}
