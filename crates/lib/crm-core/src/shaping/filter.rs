use crm_model::CrmObject;
use crm_model::schema::{PROP_COMPANY, PROP_JOBTITLE};

/// Case-insensitive substring exclusions over `company` and `jobtitle`.
///
/// Matching is substring based: a broad term such as `"co"` removes every
/// contact whose company merely contains those letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionFilter {
    companies: Vec<String>,
    job_titles: Vec<String>,
}

/// Result of applying an [`ExclusionFilter`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub kept: Vec<CrmObject>,
    pub excluded_count: usize,
}

impl ExclusionFilter {
    /// Builds a filter. Terms are trimmed and case-folded; blank terms are
    /// dropped since they would match every value.
    pub fn new<C, J>(companies: C, job_titles: J) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        Self {
            companies: normalize_terms(companies),
            job_titles: normalize_terms(job_titles),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.job_titles.is_empty()
    }

    /// Whether the object matches any exclusion term. Missing or non-text
    /// values never match.
    #[must_use]
    pub fn excludes(&self, object: &CrmObject) -> bool {
        matches_any(object.property_str(PROP_COMPANY), &self.companies)
            || matches_any(object.property_str(PROP_JOBTITLE), &self.job_titles)
    }

    #[must_use]
    pub fn apply(&self, objects: Vec<CrmObject>) -> FilterOutcome {
        if self.is_empty() {
            return FilterOutcome {
                kept: objects,
                excluded_count: 0,
            };
        }

        let before = objects.len();
        let kept: Vec<CrmObject> = objects
            .into_iter()
            .filter(|object| !self.excludes(object))
            .collect();
        let excluded_count = before - kept.len();
        FilterOutcome {
            kept,
            excluded_count,
        }
    }
}

fn normalize_terms<I>(terms: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    terms
        .into_iter()
        .map(|term| term.as_ref().trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

fn matches_any(value: Option<&str>, terms: &[String]) -> bool {
    let Some(value) = value else {
        return false;
    };
    if terms.is_empty() {
        return false;
    }
    let folded = value.to_lowercase();
    terms.iter().any(|term| folded.contains(term.as_str()))
}
