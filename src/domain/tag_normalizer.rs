// src/domain/tag_normalizer.rs
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::domain::error::DomainResult;
use crate::domain::repositories::repository::TagRepository;
use crate::domain::tag::Tag;

/// Resolve a raw comma-separated tag string into tag records.
///
/// Titles already stored are returned as the stored records, first, in the
/// order the store returns them. Every other title follows as a pending tag
/// without ID. Nothing is written here; pending tags are created when the
/// bookmark carrying them is saved.
#[instrument(skip(tags), level = "debug")]
pub fn normalize_tags<R>(tag_string: &str, tags: &R) -> DomainResult<Vec<Tag>>
where
    R: TagRepository + ?Sized,
{
    let titles = Tag::parse_titles(tag_string);
    if titles.is_empty() {
        return Ok(Vec::new());
    }

    let existing = tags.find_by_titles(&titles)?;
    let known: HashSet<&str> = existing.iter().map(Tag::title).collect();

    let pending = titles
        .iter()
        .filter(|title| !known.contains(title.as_str()))
        .map(Tag::pending)
        .collect::<DomainResult<Vec<_>>>()?;

    debug!(
        "Normalized {} tag(s): {} existing, {} new",
        titles.len(),
        existing.len(),
        pending.len()
    );

    Ok(existing.into_iter().chain(pending).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct StubTags {
        stored: Vec<Tag>,
        lookups: Mutex<usize>,
    }

    impl TagRepository for StubTags {
        fn find_by_titles(&self, titles: &[String]) -> Result<Vec<Tag>, DomainError> {
            *self.lookups.lock().unwrap() += 1;
            Ok(self
                .stored
                .iter()
                .filter(|tag| titles.iter().any(|t| t == tag.title()))
                .cloned()
                .collect())
        }

        fn get_all(&self) -> Result<Vec<Tag>, DomainError> {
            Ok(self.stored.clone())
        }
    }

    #[test]
    fn given_messy_input_when_normalize_then_distinct_titles_only() {
        let repo = StubTags::default();
        let tags = normalize_tags(" a, b ,a,,c ", &repo).unwrap();

        let titles: Vec<&str> = tags.iter().map(Tag::title).collect();
        assert_eq!(titles.len(), 3);
        let set: HashSet<&str> = titles.into_iter().collect();
        assert_eq!(set, HashSet::from(["a", "b", "c"]));
        assert!(tags.iter().all(|t| !t.is_persisted()));
    }

    #[test]
    fn given_existing_a_when_normalize_a_b_then_reuses_a_and_creates_b() {
        let repo = StubTags {
            stored: vec![Tag::new(7, "a")],
            ..Default::default()
        };

        let tags = normalize_tags("a,b", &repo).unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0], Tag::new(7, "a"));
        assert_eq!(tags[1].title(), "b");
        assert_eq!(tags[1].id, None);
    }

    #[test]
    fn given_case_variant_of_existing_when_normalize_then_new_tag() {
        let repo = StubTags {
            stored: vec![Tag::new(1, "rust")],
            ..Default::default()
        };

        let tags = normalize_tags("Rust", &repo).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, None);
    }

    #[test]
    fn given_blank_input_when_normalize_then_empty_without_lookup() {
        let repo = StubTags::default();
        assert!(normalize_tags(" , ,", &repo).unwrap().is_empty());
        assert_eq!(*repo.lookups.lock().unwrap(), 0);
    }
}
