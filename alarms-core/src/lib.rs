//! Client side engine behind the alarms page: facet counts, filtering,
//! grouping, saved searches and the local overlay of rule edits.
//!
//! Everything here is synchronous and pure except [`loader`], which joins the
//! three list requests the page needs before it can render.

pub mod datasources;
pub mod facets;
pub mod filters;
pub mod grouping;
pub mod insight;
pub mod loader;
pub mod overlay;
pub mod record;
pub mod saved_search;
pub mod summary;
pub mod templates;
pub mod view_state;

pub use datasources::DatasourceDirectory;
pub use facets::{Facet, FacetIndex};
pub use filters::{AlertFilters, FacetSelection, RuleFilters};
pub use grouping::{AlertGroupBy, Bucket, RuleGroupBy};
pub use insight::{InsightBundle, InsightProvider, TemplateInsights};
pub use loader::{RecordSet, RecordSource, SourceError, Subscription};
pub use overlay::{RuleDraft, RuleOverlay};
pub use record::{AlertFacet, FacetedRecord, RuleFacet};
pub use saved_search::{SavedSearch, SavedSearchStore};
pub use summary::ListingState;
pub use view_state::{Tab, ViewState};
