//! Prompt rendering and result parsing for the creative recipe mix.

use crate::domain::recipe::PublicRecipe;

/// System persona sent alongside every mix prompt.
pub const MIX_PERSONA: &str = "You are an expert creative chef.";

const PROMPT_HEADER: &str =
    "Creatively combine the following recipes and propose a new, innovative recipe:";
const PROMPT_FOOTER: &str = "Respond with a title and a description for the new recipe.";

/// Render the generation prompt for the given public recipes.
///
/// One `- {title}: {description}` line per recipe, in the order the caller
/// collected them. Collection order is fixed by the repository contract
/// (ascending recipe id) so the rendered prompt is reproducible.
pub fn render_mix_prompt(recipes: &[PublicRecipe]) -> String {
    let mut prompt = String::from(PROMPT_HEADER);
    prompt.push_str("\n\n");
    for entry in recipes {
        let recipe = entry.recipe();
        prompt.push_str("- ");
        prompt.push_str(recipe.title().as_ref());
        prompt.push_str(": ");
        prompt.push_str(recipe.description());
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(PROMPT_FOOTER);
    prompt
}

/// Derived recipe produced by one composition request.
///
/// Never persisted and never owned; it exists only for the duration of the
/// response that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedRecipe {
    title: String,
    description: String,
}

impl MixedRecipe {
    /// Parse the generated completion text into a derived recipe.
    ///
    /// The parse is total: the first non-empty line of the trimmed text
    /// becomes the title and the whole trimmed text is kept as the
    /// description, so no completion shape can fail here. An empty
    /// completion yields empty fields.
    pub fn from_generated_text(text: &str) -> Self {
        let trimmed = text.trim();
        let title = trimmed
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_owned();
        Self {
            title,
            description: trimmed.to_owned(),
        }
    }

    /// Title derived from the generated text.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Full generated description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::recipe::{Recipe, RecipeDraft, RecipeId, Title};
    use crate::domain::user::{UserId, Username};
    use rstest::rstest;

    fn public_recipe(title: &str, description: &str, author: &str) -> PublicRecipe {
        let recipe: Recipe = RecipeDraft::new(
            Title::new(title).expect("title"),
            Some(description.to_owned()),
            Some(true),
        )
        .into_recipe(RecipeId::random(), UserId::random());
        PublicRecipe::new(recipe, Username::new(author).expect("author"))
    }

    #[test]
    fn prompt_lists_every_recipe_exactly_once_in_order() {
        let recipes = vec![
            public_recipe("Soup", "Warm broth", "ada"),
            public_recipe("Salad", "Crisp greens", "bob"),
        ];

        let prompt = render_mix_prompt(&recipes);

        assert!(prompt.starts_with(PROMPT_HEADER));
        assert!(prompt.ends_with(PROMPT_FOOTER));
        assert_eq!(prompt.matches("- Soup: Warm broth").count(), 1);
        assert_eq!(prompt.matches("- Salad: Crisp greens").count(), 1);
        let soup = prompt.find("- Soup").expect("soup line");
        let salad = prompt.find("- Salad").expect("salad line");
        assert!(soup < salad, "lines must keep collection order");
    }

    #[test]
    fn prompt_renders_empty_descriptions() {
        let recipes = vec![public_recipe("Toast", "", "ada")];
        let prompt = render_mix_prompt(&recipes);
        assert!(prompt.contains("- Toast: \n"));
    }

    #[rstest]
    #[case(
        "Hearty Soup Salad\n\nA bowl of warm broth over crisp greens.",
        "Hearty Soup Salad"
    )]
    #[case("  One line only  ", "One line only")]
    #[case("\n\n  Leading blanks\nBody", "Leading blanks")]
    fn parse_takes_first_non_empty_line_as_title(#[case] text: &str, #[case] title: &str) {
        let mixed = MixedRecipe::from_generated_text(text);
        assert_eq!(mixed.title(), title);
        assert_eq!(mixed.description(), text.trim());
    }

    #[test]
    fn parse_of_empty_completion_yields_empty_fields() {
        let mixed = MixedRecipe::from_generated_text("   \n  ");
        assert_eq!(mixed.title(), "");
        assert_eq!(mixed.description(), "");
    }
}
