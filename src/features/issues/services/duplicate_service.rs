use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::issues::models::{Issue, IssueCategory};

/// Titles shorter than this are not checked for duplicates
pub const MIN_TITLE_CHARS: usize = 10;

/// Number of leading title tokens compared against existing titles
pub const PREFIX_TOKENS: usize = 3;

/// Maximum straight-line distance in raw degrees.
///
/// Longitude is not scaled by latitude, so the effective radius is roughly
/// 0.5 km north-south and shrinks east-west away from the equator.
pub const PROXIMITY_DEGREES: f64 = 0.005;

pub const MAX_CANDIDATES: usize = 5;

/// A report being drafted by a citizen
#[derive(Debug, Clone)]
pub struct DuplicateDraft {
    pub title: String,
    pub category: IssueCategory,
    pub coordinates: Option<(f64, f64)>,
}

impl DuplicateDraft {
    pub fn is_checkable(&self) -> bool {
        self.title.chars().count() >= MIN_TITLE_CHARS
    }
}

/// Lowercased first tokens of a title, joined by single spaces
pub fn title_prefix(title: &str) -> String {
    title
        .split_whitespace()
        .take(PREFIX_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Either string contains the other, ignoring case
fn titles_overlap(existing_title: &str, prefix: &str) -> bool {
    let existing = existing_title.to_lowercase();
    existing.contains(prefix) || prefix.contains(existing.as_str())
}

pub fn degree_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let d_lat = a.0 - b.0;
    let d_lng = a.1 - b.1;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}

/// Narrow a set of existing issues down to likely duplicates of `draft`.
///
/// Keeps store order and returns at most [`MAX_CANDIDATES`].
pub fn filter_candidates<I>(draft: &DuplicateDraft, issues: I) -> Vec<Issue>
where
    I: IntoIterator<Item = Issue>,
{
    if !draft.is_checkable() {
        return Vec::new();
    }

    let prefix = title_prefix(&draft.title);

    issues
        .into_iter()
        .filter(|issue| issue.category == draft.category && issue.status.is_open())
        .filter(|issue| titles_overlap(&issue.title, &prefix))
        .filter(|issue| match draft.coordinates {
            Some(origin) => issue
                .coordinates()
                .is_some_and(|point| degree_distance(origin, point) < PROXIMITY_DEGREES),
            None => true,
        })
        .take(MAX_CANDIDATES)
        .collect()
}

/// Finds existing open issues that probably describe the same problem
pub struct DuplicateService {
    pool: PgPool,
}

impl DuplicateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Never fails: a store error is logged and treated as "no duplicates"
    pub async fn find_candidates(&self, draft: &DuplicateDraft) -> Vec<Issue> {
        if !draft.is_checkable() {
            return Vec::new();
        }

        match self.list_open_in_category(draft.category).await {
            Ok(open) => {
                let candidates = filter_candidates(draft, open);
                tracing::debug!(
                    "Duplicate check for '{}' ({}) found {} candidate(s)",
                    draft.title,
                    draft.category,
                    candidates.len()
                );
                candidates
            }
            Err(e) => {
                tracing::warn!("Duplicate check failed, continuing without it: {}", e);
                Vec::new()
            }
        }
    }

    async fn list_open_in_category(&self, category: IssueCategory) -> Result<Vec<Issue>> {
        let sql = format!(
            "SELECT {} FROM issues \
             WHERE category = $1 AND status NOT IN ('resolved', 'rejected') \
             ORDER BY created_at DESC",
            Issue::COLUMNS
        );

        sqlx::query_as::<_, Issue>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list open issues for duplicate check: {:?}", e);
                AppError::Database(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::issues::models::fixtures::{issue, issue_at};
    use crate::features::issues::models::IssueStatus;

    fn draft(title: &str, coordinates: Option<(f64, f64)>) -> DuplicateDraft {
        DuplicateDraft {
            title: title.to_string(),
            category: IssueCategory::Pothole,
            coordinates,
        }
    }

    #[test]
    fn test_title_prefix_takes_three_tokens() {
        assert_eq!(
            title_prefix("Large  Pothole on Main Street"),
            "large pothole on"
        );
        assert_eq!(title_prefix("Pothole"), "pothole");
    }

    #[test]
    fn test_degree_distance_is_euclidean() {
        let d = degree_distance((0.0, 0.0), (0.003, 0.004));
        assert!((d - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_short_title_returns_nothing() {
        let existing = vec![issue("Pothole")];
        assert!(filter_candidates(&draft("Pothole", None), existing).is_empty());
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        // 9 characters, 18 bytes
        assert!(!draft("ééééééééé", None).is_checkable());
        assert!(draft("éééééééééé", None).is_checkable());
    }

    #[test]
    fn test_title_length_counts_raw_input() {
        // "Pothole" plus padding reaches 10 characters as typed
        assert!(draft("  Pothole ", None).is_checkable());
        assert!(!draft(" Pothole ", None).is_checkable());
    }

    #[test]
    fn test_no_open_issues_returns_empty() {
        let draft = draft("Large pothole on Main Street", None);
        assert!(filter_candidates(&draft, Vec::new()).is_empty());
    }

    #[test]
    fn test_other_category_is_ignored() {
        let streetlight = Issue {
            category: IssueCategory::Streetlight,
            ..issue("Large pothole on Main Street")
        };
        let draft = draft("Large pothole on Main Street", None);
        assert!(filter_candidates(&draft, vec![streetlight]).is_empty());
    }

    #[test]
    fn test_prefix_matches_in_both_directions() {
        let longer = issue("Large pothole on Main Street near the school gate");
        let shorter = issue("large POTHOLE");
        let unrelated = issue("Garbage overflowing on Main Street");

        let draft = draft("Large pothole on Main Street near school", None);
        let found = filter_candidates(&draft, vec![longer.clone(), shorter.clone(), unrelated]);

        let ids: Vec<_> = found.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![longer.id, shorter.id]);
    }

    #[test]
    fn test_resolved_twin_is_excluded() {
        let open = issue("Large pothole on Main Street");
        let resolved = Issue {
            id: uuid::Uuid::new_v4(),
            status: IssueStatus::Resolved,
            ..open.clone()
        };
        let rejected = Issue {
            id: uuid::Uuid::new_v4(),
            status: IssueStatus::Rejected,
            ..open.clone()
        };

        let draft = draft("Large pothole on Main Street", None);
        let found = filter_candidates(&draft, vec![resolved, rejected, open.clone()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, open.id);
    }

    #[test]
    fn test_far_issue_is_excluded_when_draft_has_coordinates() {
        let near = issue_at("Large pothole on Main Street", 40.7129, -74.0061);
        let far = issue_at("Large pothole on Main Street", 40.7228, -74.0060);

        let draft = draft("Large pothole on Main Street", Some((40.7128, -74.0060)));
        let found = filter_candidates(&draft, vec![far, near.clone()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, near.id);
    }

    #[test]
    fn test_issue_without_coordinates_is_excluded_when_draft_has_them() {
        let unplaced = issue("Large pothole on Main Street");
        let draft = draft("Large pothole on Main Street", Some((40.7128, -74.0060)));
        assert!(filter_candidates(&draft, vec![unplaced]).is_empty());
    }

    #[test]
    fn test_distance_ignores_coordinates_when_draft_has_none() {
        let far = issue_at("Large pothole on Main Street", 10.0, 10.0);
        let draft = draft("Large pothole on Main Street", None);
        assert_eq!(filter_candidates(&draft, vec![far]).len(), 1);
    }

    #[test]
    fn test_at_most_five_candidates_in_store_order() {
        let existing: Vec<Issue> = (0..8)
            .map(|_| issue("Large pothole on Main Street"))
            .collect();
        let expected: Vec<_> = existing.iter().take(5).map(|i| i.id).collect();

        let draft = draft("Large pothole on Main Street", None);
        let found = filter_candidates(&draft, existing);
        assert_eq!(found.iter().map(|i| i.id).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_main_street_scenario() {
        let existing = Issue {
            complaint_count: 4,
            ..issue_at("Large pothole on Main Street", 40.7129, -74.0061)
        };
        let draft = draft(
            "Large pothole on Main Street near school",
            Some((40.7128, -74.0060)),
        );

        let found = filter_candidates(&draft, vec![existing.clone()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, existing.id);
    }

    #[tokio::test]
    async fn test_store_failure_fails_open() {
        let service = DuplicateService::new(lazy_test_pool());
        let draft = draft("Large pothole on Main Street", None);
        assert!(service.find_candidates(&draft).await.is_empty());
    }

    #[tokio::test]
    async fn test_short_title_skips_the_store() {
        let service = DuplicateService::new(lazy_test_pool());
        assert!(service.find_candidates(&draft("Pothole", None)).await.is_empty());
    }
}
