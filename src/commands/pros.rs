// Local professional finder controller

use super::GenerationContext;
use crate::gemini::{requests, GeminiError, GenerativeBackend, LatLng};
use crate::models::state_machine::{RequestLifecycle, RequestTicket};
use crate::models::{ProfessionalCategory, SearchResult};
use crate::parsers::{adapt_search_result, map_source_cards, render_markdown, MapSourceCard};
use crate::utils::lock_mutex_recover;
use serde::Serialize;
use std::sync::Mutex;

pub const NO_CITY_MESSAGE: &str = "Select a city in the Design Studio to find local professionals.";
pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const NO_MAP_LOCATIONS_MESSAGE: &str = "No map locations returned.";

/// Grounded search for businesses of `category_phrase` in `city`
pub async fn find_local_pros(
    backend: &dyn GenerativeBackend,
    model: &str,
    city: &str,
    category_phrase: &str,
    location_hint: LatLng,
) -> Result<SearchResult, GeminiError> {
    let request = requests::local_pros_request(city, category_phrase, location_hint)?;
    let response = backend.generate_content(model, &request).await?;
    Ok(adapt_search_result(&response))
}

/// Results pane of the finder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ProsResults {
    Loading,
    Ready {
        markdown: String,
        html: String,
        cards: Vec<MapSourceCard>,
        /// Set when the answer carried no citation chunks at all
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
    },
    Empty { message: String },
}

/// What the finder screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ProsView {
    /// No city; nothing was requested
    Placeholder { message: String },
    Shown {
        heading: String,
        category: ProfessionalCategory,
        categories: Vec<ProfessionalCategory>,
        results: ProsResults,
    },
}

impl ProsView {
    pub fn results(&self) -> Option<&ProsResults> {
        match self {
            ProsView::Shown { results, .. } => Some(results),
            ProsView::Placeholder { .. } => None,
        }
    }
}

struct ProsInner {
    category: ProfessionalCategory,
    results: RequestLifecycle<SearchResult>,
}

impl ProsInner {
    fn new() -> Self {
        Self {
            category: ProfessionalCategory::default(),
            results: RequestLifecycle::new(),
        }
    }
}

/// Finder state: active category plus the search lifecycle
pub struct ProsState {
    inner: Mutex<ProsInner>,
}

impl ProsState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ProsInner::new()),
        }
    }

    pub fn category(&self) -> ProfessionalCategory {
        lock_mutex_recover(&self.inner).category
    }

    pub fn results(&self) -> Option<SearchResult> {
        lock_mutex_recover(&self.inner).results.value().cloned()
    }

    pub fn is_loading(&self) -> bool {
        lock_mutex_recover(&self.inner).results.is_loading()
    }

    /// Start a search for the active category; `None` without a city
    pub fn begin(&self, city: &str) -> Option<(RequestTicket, ProfessionalCategory)> {
        if city.is_empty() {
            return None;
        }
        let mut inner = lock_mutex_recover(&self.inner);
        let ticket = inner.results.begin();
        Some((ticket, inner.category))
    }

    /// Screen shown: architects tab, no results, one search if there is a city
    pub fn mount(&self, city: &str) -> Option<(RequestTicket, ProfessionalCategory)> {
        {
            let mut inner = lock_mutex_recover(&self.inner);
            inner.category = ProfessionalCategory::default();
            inner.results.reset();
        }
        self.begin(city)
    }

    pub fn unmount(&self) {
        lock_mutex_recover(&self.inner).results.reset();
    }

    /// Switch tabs. Selecting the tab already shown does nothing.
    pub fn set_category(
        &self,
        category: ProfessionalCategory,
        city: &str,
    ) -> Option<(RequestTicket, ProfessionalCategory)> {
        {
            let mut inner = lock_mutex_recover(&self.inner);
            if inner.category == category {
                return None;
            }
            inner.category = category;
        }
        self.begin(city)
    }

    /// The shared city changed while the finder is shown
    pub fn city_changed(&self, previous: &str, current: &str) -> Option<(RequestTicket, ProfessionalCategory)> {
        if previous == current {
            return None;
        }
        self.begin(current)
    }

    /// Perform the search for `ticket`.
    ///
    /// Failures are logged and otherwise silent: the previous results stay.
    pub async fn run(
        &self,
        ctx: &GenerationContext,
        ticket: RequestTicket,
        city: &str,
        category: ProfessionalCategory,
    ) -> bool {
        log::debug!(
            "Searching {} in {} (request #{})",
            category,
            city,
            ticket.seq()
        );

        let outcome = find_local_pros(
            ctx.backend.as_ref(),
            &ctx.text_model,
            city,
            category.search_phrase(),
            ctx.grounding,
        )
        .await;

        let applied = {
            let mut inner = lock_mutex_recover(&self.inner);
            match outcome {
                Ok(result) => inner.results.replace(ticket, Some(result)),
                Err(e) => {
                    log::error!("Professional search failed: {}", e);
                    inner.results.keep(ticket)
                }
            }
        };

        if !applied {
            log::debug!("Discarding stale search (request #{})", ticket.seq());
        }
        applied
    }

    /// Switch tabs and wait for the resulting search
    pub async fn select(
        &self,
        ctx: &GenerationContext,
        category: ProfessionalCategory,
        city: &str,
    ) -> ProsView {
        if let Some((ticket, category)) = self.set_category(category, city) {
            self.run(ctx, ticket, city, category).await;
        }
        self.view(city)
    }

    pub fn view(&self, city: &str) -> ProsView {
        if city.is_empty() {
            return ProsView::Placeholder {
                message: NO_CITY_MESSAGE.to_string(),
            };
        }

        let inner = lock_mutex_recover(&self.inner);
        let results = if inner.results.is_loading() {
            ProsResults::Loading
        } else if let Some(result) = inner.results.value() {
            ProsResults::Ready {
                markdown: result.text.clone(),
                html: render_markdown(&result.text),
                cards: map_source_cards(&result.chunks),
                notice: result
                    .chunks
                    .is_empty()
                    .then(|| NO_MAP_LOCATIONS_MESSAGE.to_string()),
            }
        } else {
            ProsResults::Empty {
                message: NO_RESULTS_MESSAGE.to_string(),
            }
        };

        ProsView::Shown {
            heading: format!("Local Professionals in {}", city),
            category: inner.category,
            categories: vec![
                ProfessionalCategory::Architects,
                ProfessionalCategory::Contractors,
                ProfessionalCategory::Suppliers,
            ],
            results,
        }
    }
}

impl Default for ProsState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_city_shows_placeholder() {
        let pros = ProsState::new();
        assert!(pros.mount("").is_none());
        assert_eq!(
            pros.view(""),
            ProsView::Placeholder {
                message: NO_CITY_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_mount_starts_on_architects() {
        let pros = ProsState::new();
        pros.set_category(ProfessionalCategory::Suppliers, "");
        let (_, category) = pros.mount("Lahore").unwrap();
        assert_eq!(category, ProfessionalCategory::Architects);
        assert_eq!(pros.view("Lahore").results(), Some(&ProsResults::Loading));
    }

    #[test]
    fn test_same_category_does_not_search() {
        let pros = ProsState::new();
        assert!(pros
            .set_category(ProfessionalCategory::Architects, "Lahore")
            .is_none());
        assert!(pros
            .set_category(ProfessionalCategory::Contractors, "Lahore")
            .is_some());
    }

    #[test]
    fn test_city_change_triggers_only_for_new_non_empty_city() {
        let pros = ProsState::new();
        assert!(pros.city_changed("Lahore", "Lahore").is_none());
        assert!(pros.city_changed("Lahore", "").is_none());
        assert!(pros.city_changed("Lahore", "Multan").is_some());
    }

    #[test]
    fn test_idle_view_shows_no_results() {
        let view = ProsState::new().view("Quetta");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "shown");
        assert_eq!(json["heading"], "Local Professionals in Quetta");
        assert_eq!(json["results"]["status"], "empty");
        assert_eq!(json["results"]["message"], NO_RESULTS_MESSAGE);
    }
}
