//! Result shaping: client-side exclusion filtering followed by compaction.
//!
//! Filtering always runs on raw property values. Compaction truncates text,
//! so any filter over a truncatable field must run before it.

pub mod compact;
pub mod filter;

use crm_model::ResultPage;

pub use compact::{
    CompactObject,
    CompactOptions,
    CompactPage,
    DEFAULT_MAX_PROPERTY_LENGTH,
    PageMeta,
    PropertyLimit,
    TRUNCATION_MARKER,
    compact,
    compact_page,
};
pub use filter::{ExclusionFilter, FilterOutcome};

/// Filters then compacts a page.
///
/// `_meta.excluded` is reported whenever an exclusion predicate was active,
/// including when it removed nothing.
#[must_use]
pub fn shape_page(
    page: ResultPage,
    exclusions: &ExclusionFilter,
    options: &CompactOptions,
) -> CompactPage {
    if exclusions.is_empty() {
        return compact_page(page, options);
    }

    let ResultPage {
        results,
        total,
        paging,
    } = page;
    let FilterOutcome {
        kept,
        excluded_count,
    } = exclusions.apply(results);

    let mut shaped = compact_page(
        ResultPage {
            results: kept,
            total,
            paging,
        },
        options,
    );
    shaped.meta = Some(PageMeta {
        excluded: excluded_count,
    });
    shaped
}
