// Design studio controller: visualization requests and view-mode selection

use super::GenerationContext;
use crate::gemini::{requests, GeminiError, GenerativeBackend};
use crate::models::state_machine::{RequestLifecycle, RequestTicket};
use crate::models::{HouseSpecs, ViewMode};
use crate::parsers::extract_image_data_uri;
use crate::utils::lock_mutex_recover;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;

/// Ask the image model for a rendering of `specs` framed by `view_mode`.
///
/// A reply without inline image data is [`GeminiError::NoImage`].
pub async fn generate_architecture_image(
    backend: &dyn GenerativeBackend,
    model: &str,
    specs: &HouseSpecs,
    view_mode: ViewMode,
) -> Result<String, GeminiError> {
    let request = requests::architecture_image_request(specs, view_mode)?;
    let response = backend.generate_content(model, &request).await?;
    extract_image_data_uri(&response).ok_or(GeminiError::NoImage)
}

/// What the visualizer pane shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DesignImage {
    Empty { title: String, hint: String },
    Loading { message: String, detail: String },
    Ready { uri: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignView {
    pub view_mode: ViewMode,
    pub view_modes: Vec<ViewMode>,
    /// False while loading or when city/plot size are missing
    pub can_visualize: bool,
    pub image: DesignImage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

struct DesignInner {
    view_mode: ViewMode,
    image: RequestLifecycle<String>,
}

impl DesignInner {
    fn new() -> Self {
        Self {
            view_mode: ViewMode::default(),
            image: RequestLifecycle::new(),
        }
    }
}

/// Visualizer state for the design screen
pub struct DesignState {
    inner: Mutex<DesignInner>,
}

impl DesignState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(DesignInner::new()),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        lock_mutex_recover(&self.inner).view_mode
    }

    /// Change the framing for the next visualization. Does not issue a request.
    pub fn set_view_mode(&self, view_mode: ViewMode) {
        lock_mutex_recover(&self.inner).view_mode = view_mode;
    }

    pub fn is_loading(&self) -> bool {
        lock_mutex_recover(&self.inner).image.is_loading()
    }

    /// Fresh screen: exterior framing, no image, outstanding replies dropped
    pub fn mount(&self) {
        let mut inner = lock_mutex_recover(&self.inner);
        inner.view_mode = ViewMode::default();
        inner.image.reset();
    }

    pub fn unmount(&self) {
        lock_mutex_recover(&self.inner).image.reset();
    }

    /// Start a visualization: clear the current image and enter loading.
    ///
    /// Returns `None` and changes nothing when the specs are not ready.
    pub fn begin(&self, specs: &HouseSpecs) -> Option<(RequestTicket, ViewMode)> {
        if !specs.is_ready() {
            log::debug!("Visualize skipped: city or plot size missing");
            return None;
        }
        let mut inner = lock_mutex_recover(&self.inner);
        let ticket = inner.image.begin_clearing();
        Some((ticket, inner.view_mode))
    }

    /// Perform the request for `ticket` and settle the view with its outcome.
    ///
    /// Returns whether the reply was applied; a superseded ticket changes nothing.
    pub async fn run(
        &self,
        ctx: &GenerationContext,
        ticket: RequestTicket,
        specs: &HouseSpecs,
        view_mode: ViewMode,
    ) -> bool {
        log::debug!(
            "Visualizing {} view for {} (request #{})",
            view_mode,
            specs.city,
            ticket.seq()
        );

        let outcome =
            generate_architecture_image(ctx.backend.as_ref(), &ctx.image_model, specs, view_mode)
                .await;

        let image = match outcome {
            Ok(uri) => Some(uri),
            Err(e) => {
                log::error!("Image generation failed: {}", e);
                None
            }
        };

        let applied = lock_mutex_recover(&self.inner).image.replace(ticket, image);
        if !applied {
            log::debug!("Discarding stale visualization (request #{})", ticket.seq());
        }
        applied
    }

    /// Begin and run in one go, returning the settled view
    pub async fn visualize(&self, ctx: &GenerationContext, specs: &HouseSpecs) -> DesignView {
        if let Some((ticket, view_mode)) = self.begin(specs) {
            self.run(ctx, ticket, specs, view_mode).await;
        }
        self.view(specs)
    }

    pub fn image(&self) -> Option<String> {
        lock_mutex_recover(&self.inner).image.value().cloned()
    }

    pub fn view(&self, specs: &HouseSpecs) -> DesignView {
        let inner = lock_mutex_recover(&self.inner);
        let loading = inner.image.is_loading();

        let image = if loading {
            DesignImage::Loading {
                message: format!("Designing your {} home in {}...", specs.style, specs.city),
                detail: format!("Integrating {}...", specs.features),
            }
        } else if let Some(uri) = inner.image.value() {
            DesignImage::Ready { uri: uri.clone() }
        } else {
            DesignImage::Empty {
                title: "No design generated yet".to_string(),
                hint: "Enter specifications and click \"Visualize Structure\"".to_string(),
            }
        };

        DesignView {
            view_mode: inner.view_mode,
            view_modes: ViewMode::ALL.to_vec(),
            can_visualize: !loading && specs.is_ready(),
            image,
            generated_at: inner.image.value().and(inner.image.settled_at()),
        }
    }
}

impl Default for DesignState {
    fn default() -> Self {
        Self::new()
    }
}
