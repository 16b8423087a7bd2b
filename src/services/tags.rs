//! Hashtag Parser
//!
//! Extracts #hashtags from caption text and persists them as tagging rows.

use crate::db::tagging_repo;
use crate::error::Result;
use crate::models::TaggableRef;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::PgPool;

/// Regex pattern for matching hashtags: a '#' not preceded by a word
/// character, followed by one or more word characters.
static HASHTAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\B#\w+").expect("Invalid hashtag regex"));

/// Extract hashtags from caption text.
///
/// Returns the tags in order of appearance with the leading '#' stripped and
/// lowercased. Duplicates are kept.
///
/// # Examples
/// ```
/// use photogram_service::services::extract_tags;
///
/// let caption = "Great #Sunset at #the-beach!";
/// assert_eq!(extract_tags(caption), vec!["sunset", "the"]);
/// ```
pub fn extract_tags(caption: &str) -> Vec<String> {
    HASHTAG_REGEX
        .find_iter(caption)
        .map(|m| m.as_str()[1..].to_lowercase())
        .collect()
}

/// Persist one tagging row per tag extracted from the caption.
///
/// Called as an explicit pipeline step after the owning row is saved, not
/// inside its transaction: a failure here leaves the entity without tags
/// rather than rolling it back. Rows are append-only and never deduplicated,
/// and caption edits do not trigger re-extraction (known limitation).
pub async fn persist_tags(pool: &PgPool, taggable: TaggableRef, caption: &str) -> Result<()> {
    for tag in extract_tags(caption) {
        tagging_repo::create_tagging(pool, taggable, &tag).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_tag() {
        assert_eq!(extract_tags("good morning #coffee"), vec!["coffee"]);
    }

    #[test]
    fn test_extract_multiple_tags() {
        assert_eq!(
            extract_tags("#monday #motivation at the gym"),
            vec!["monday", "motivation"]
        );
    }

    #[test]
    fn test_tags_are_lowercased() {
        assert_eq!(extract_tags("loving this #SunSet"), vec!["sunset"]);
    }

    #[test]
    fn test_hyphen_breaks_token() {
        // '#the-beach' tokenizes as 'the'; the hyphen is not a word character
        assert_eq!(
            extract_tags("Great #Sunset at #the-beach!"),
            vec!["sunset", "the"]
        );
    }

    #[test]
    fn test_hash_inside_word_is_not_a_tag() {
        // '\B' requires the '#' not be preceded by a word character
        assert!(extract_tags("price is 100#200").is_empty());
    }

    #[test]
    fn test_bare_hash_is_not_a_tag() {
        assert!(extract_tags("just a # sign").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(extract_tags("#sun and #sun again"), vec!["sun", "sun"]);
    }

    #[test]
    fn test_underscores_and_digits() {
        assert_eq!(
            extract_tags("#beach_day_2024 was great"),
            vec!["beach_day_2024"]
        );
    }

    #[test]
    fn test_no_tags() {
        assert!(extract_tags("a plain caption").is_empty());
    }
}
