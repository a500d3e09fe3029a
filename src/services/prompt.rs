//! Renders a seed movie into the model instruction.

use crate::models::SeedMovie;

/// Number of recommendations the model is asked for
pub const REQUESTED_RECOMMENDATIONS: usize = 6;

/// System message sent alongside every recommendation prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that responds only with valid JSON arrays. \
Never include explanatory text, only the JSON array. Always use straight quotes, never smart quotes.";

/// Builds the user instruction for a seed movie.
///
/// Pure function of its input: the same seed always renders the same text.
pub fn build_prompt(seed: &SeedMovie) -> String {
    let mut prompt = format!(
        "You are a movie recommendation assistant. Based on the movie \"{}\" ({}), with this plot: \"{}\", \
recommend {} similar movies. For EACH movie, explain specifically WHY it's similar - mention themes, \
tone, style, plot elements, or character types. Make the reason 1-2 full sentences.\n\n",
        seed.title,
        seed.genre_names(),
        seed.overview,
        REQUESTED_RECOMMENDATIONS,
    );

    prompt.push_str(
        "You MUST respond with ONLY a valid flat JSON array of objects. Each object must have exactly \
two keys: \"title\" and \"reason\". Use regular straight quotes and apostrophes only, never smart quotes. \
Do not use any backslashes anywhere in the response. Include every closing brace and bracket so the \
response is valid JSON.\n\nFormat:\n[",
    );

    for i in 1..=REQUESTED_RECOMMENDATIONS {
        if i > 1 {
            prompt.push_str(",\n");
        }
        prompt.push_str(&format!(
            "{{\"title\": \"Movie Title {}\", \"reason\": \"Specific explanation\"}}",
            i
        ));
    }

    prompt.push_str("]\n\nRespond with ONLY the JSON array. No other text.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;

    fn seed() -> SeedMovie {
        SeedMovie {
            title: "Inception".to_string(),
            overview: "A thief who steals corporate secrets through dream-sharing technology.".to_string(),
            genres: vec![
                Genre { id: 28, name: "Action".to_string() },
                Genre { id: 878, name: "Science Fiction".to_string() },
                Genre { id: 12, name: "Adventure".to_string() },
            ],
        }
    }

    #[test]
    fn test_prompt_names_seed_verbatim() {
        let prompt = build_prompt(&seed());

        assert!(prompt.contains("\"Inception\""));
        assert!(prompt.contains(
            "\"A thief who steals corporate secrets through dream-sharing technology.\""
        ));
        assert!(prompt.contains("(Action, Science Fiction, Adventure)"));
    }

    #[test]
    fn test_prompt_requests_six_flat_objects() {
        let prompt = build_prompt(&seed());

        assert!(prompt.contains("recommend 6 similar movies"));
        assert!(prompt.contains("\"title\" and \"reason\""));
        assert!(prompt.contains("Movie Title 6"));
        assert!(!prompt.contains("Movie Title 7"));
    }

    #[test]
    fn test_prompt_forbids_escapes_and_extra_text() {
        let prompt = build_prompt(&seed());

        assert!(prompt.contains("backslashes"));
        assert!(prompt.contains("smart quotes"));
        assert!(prompt.ends_with("Respond with ONLY the JSON array. No other text."));
        assert!(!prompt.contains('\\'));
    }

    #[test]
    fn test_format_example_is_valid_json() {
        let prompt = build_prompt(&seed());
        let start = prompt.find('[').unwrap();
        let end = prompt.rfind(']').unwrap();

        let example: Vec<serde_json::Value> = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert_eq!(example.len(), REQUESTED_RECOMMENDATIONS);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&seed()), build_prompt(&seed()));
    }

    #[test]
    fn test_prompt_without_genres() {
        let mut seed = seed();
        seed.genres.clear();

        assert!(build_prompt(&seed).contains("\"Inception\" ()"));
    }
}
