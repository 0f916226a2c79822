use issuepulse::services::text_normalizer::clean;
use proptest::prelude::*;
use regex::Regex;

/// Text with the fragments the normalizer targets mixed into ordinary words.
fn noisy_text() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        "[a-zA-Z]{1,8}",
        "[0-9]{1,4}",
        Just(" ".to_string()),
        Just("\n\t".to_string()),
        Just("<b>".to_string()),
        Just("</code>".to_string()),
        Just("https://example.com/a?b=1".to_string()),
        Just("http".to_string()),
        Just("HTTP".to_string()),
        Just("!?.,;".to_string()),
        Just("é😀".to_string()),
    ];
    prop::collection::vec(fragment, 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    /// Property: cleaning is idempotent
    #[test]
    fn prop_clean_is_idempotent(text in noisy_text()) {
        let once = clean(&text);
        prop_assert_eq!(clean(&once), once);
    }

    /// Property: idempotence also holds for arbitrary unicode input
    #[test]
    fn prop_clean_is_idempotent_any_string(text in any::<String>()) {
        let once = clean(&text);
        prop_assert_eq!(clean(&once), once);
    }

    /// Property: output is lowercase ASCII letters separated by single spaces
    #[test]
    fn prop_output_character_class(text in noisy_text()) {
        let cleaned = clean(&text);
        prop_assert!(cleaned.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        prop_assert!(!cleaned.starts_with(' '));
        prop_assert!(!cleaned.ends_with(' '));
        prop_assert!(!cleaned.contains("  "));
    }

    /// Property: no URL survives cleaning, including ones assembled by the
    /// cleaning steps themselves
    #[test]
    fn prop_no_url_in_output(text in noisy_text()) {
        let url = Regex::new(r"http\S").unwrap();
        prop_assert!(!url.is_match(&clean(&text)));
    }

    /// Property: tags never leak their brackets
    #[test]
    fn prop_no_tag_fragments(text in noisy_text()) {
        let cleaned = clean(&text);
        prop_assert!(!cleaned.contains('<'));
        prop_assert!(!cleaned.contains('>'));
    }

    /// Property: plain lowercase words separated by single spaces pass unchanged
    #[test]
    fn prop_clean_words_are_fixed_points(words in prop::collection::vec("[a-gi-z][a-z]{0,6}", 1..10)) {
        let text = words.join(" ");
        prop_assume!(!text.contains("http"));
        prop_assert_eq!(clean(&text), text);
    }
}
