// Cost estimator controller

use super::GenerationContext;
use crate::gemini::{requests, GeminiError, GenerativeBackend};
use crate::models::state_machine::{RequestLifecycle, RequestTicket};
use crate::models::{CostEstimate, HouseSpecs};
use crate::parsers::parse_cost_estimate;
use crate::utils::{format_amount, format_millions, lock_mutex_recover};
use serde::Serialize;
use std::sync::Mutex;

/// Chart and legend colours, cycled by row index
pub const CHART_COLORS: [&str; 5] = ["#10b981", "#3b82f6", "#f59e0b", "#6366f1", "#ec4899"];

pub const NOT_READY_MESSAGE: &str = "Please enter design details in the Design Studio first.";

/// Request a structured estimate and validate it.
///
/// Empty text, invalid JSON and schema violations are all errors.
pub async fn generate_cost_estimate(
    backend: &dyn GenerativeBackend,
    model: &str,
    specs: &HouseSpecs,
) -> Result<CostEstimate, GeminiError> {
    let request = requests::cost_estimate_request(specs)?;
    let response = backend.generate_content(model, &request).await?;
    let text = response.text().ok_or(GeminiError::EmptyResponse)?;
    Ok(parse_cost_estimate(&text)?)
}

/// One legend/breakdown row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRow {
    pub category: String,
    pub description: String,
    pub amount: f64,
    /// e.g. `PKR 18,000,000`
    pub amount_display: String,
    pub color: &'static str,
    /// Fraction of the breakdown sum, for the chart
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub currency: String,
    pub total_estimated_cost: f64,
    /// e.g. `PKR 45.00 Million`
    pub total_display: String,
    pub summary: String,
    pub rows: Vec<EstimateRow>,
}

impl EstimateReport {
    pub fn from_estimate(estimate: &CostEstimate) -> Self {
        let sum = estimate.breakdown_sum();
        let rows = estimate
            .breakdown
            .iter()
            .enumerate()
            .map(|(i, item)| EstimateRow {
                category: item.category.clone(),
                description: item.description.clone(),
                amount: item.amount,
                amount_display: format!("{} {}", estimate.currency, format_amount(item.amount)),
                color: CHART_COLORS[i % CHART_COLORS.len()],
                share: if sum > 0.0 { item.amount / sum } else { 0.0 },
            })
            .collect();

        Self {
            currency: estimate.currency.clone(),
            total_estimated_cost: estimate.total_estimated_cost,
            total_display: format!(
                "{} {} Million",
                estimate.currency,
                format_millions(estimate.total_estimated_cost)
            ),
            summary: estimate.summary.clone(),
            rows,
        }
    }
}

/// What the estimator screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EstimateView {
    /// Specs incomplete; nothing was requested
    Placeholder { message: String },
    Loading { header: String, message: String },
    Ready { header: String, report: EstimateReport },
    /// Idle, or the last request failed
    Empty { header: String },
}

impl EstimateView {
    pub fn is_loading(&self) -> bool {
        matches!(self, EstimateView::Loading { .. })
    }

    pub fn report(&self) -> Option<&EstimateReport> {
        match self {
            EstimateView::Ready { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Estimate lifecycle for the estimator screen
pub struct EstimateState {
    lifecycle: Mutex<RequestLifecycle<CostEstimate>>,
}

impl EstimateState {
    pub fn new() -> Self {
        Self {
            lifecycle: Mutex::new(RequestLifecycle::new()),
        }
    }

    pub fn estimate(&self) -> Option<CostEstimate> {
        lock_mutex_recover(&self.lifecycle).value().cloned()
    }

    pub fn is_loading(&self) -> bool {
        lock_mutex_recover(&self.lifecycle).is_loading()
    }

    /// Enter loading for a new estimate; `None` when the specs are not ready
    pub fn begin(&self, specs: &HouseSpecs) -> Option<RequestTicket> {
        if !specs.is_ready() {
            return None;
        }
        Some(lock_mutex_recover(&self.lifecycle).begin())
    }

    /// Screen shown: start from scratch and request once if the specs allow
    pub fn mount(&self, specs: &HouseSpecs) -> Option<RequestTicket> {
        lock_mutex_recover(&self.lifecycle).reset();
        self.begin(specs)
    }

    pub fn unmount(&self) {
        lock_mutex_recover(&self.lifecycle).reset();
    }

    /// Perform the request for `ticket`. Failures clear the estimate.
    ///
    /// Returns whether the reply was applied.
    pub async fn run(&self, ctx: &GenerationContext, ticket: RequestTicket, specs: &HouseSpecs) -> bool {
        log::debug!("Estimating costs for {} (request #{})", specs.city, ticket.seq());

        let estimate = match generate_cost_estimate(ctx.backend.as_ref(), &ctx.text_model, specs).await {
            Ok(estimate) => Some(estimate),
            Err(e) => {
                log::error!("Cost estimation failed: {}", e);
                None
            }
        };

        let applied = lock_mutex_recover(&self.lifecycle).replace(ticket, estimate);
        if !applied {
            log::debug!("Discarding stale estimate (request #{})", ticket.seq());
        }
        applied
    }

    /// Manual refresh: same request again, settled before returning
    pub async fn refresh(&self, ctx: &GenerationContext, specs: &HouseSpecs) -> EstimateView {
        if let Some(ticket) = self.begin(specs) {
            self.run(ctx, ticket, specs).await;
        }
        self.view(specs)
    }

    pub fn view(&self, specs: &HouseSpecs) -> EstimateView {
        if !specs.is_ready() {
            return EstimateView::Placeholder {
                message: NOT_READY_MESSAGE.to_string(),
            };
        }

        let header = format!(
            "Based on current market rates in {} for a {} plot.",
            specs.city, specs.plot_size
        );
        let lifecycle = lock_mutex_recover(&self.lifecycle);

        if lifecycle.is_loading() {
            EstimateView::Loading {
                header,
                message: format!(
                    "Analyzing materials, labor, and {} requirements...",
                    specs.layout
                ),
            }
        } else if let Some(estimate) = lifecycle.value() {
            EstimateView::Ready {
                header,
                report: EstimateReport::from_estimate(estimate),
            }
        } else {
            EstimateView::Empty { header }
        }
    }
}

impl Default for EstimateState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostEstimateItem;

    fn sample() -> CostEstimate {
        CostEstimate {
            currency: "PKR".to_string(),
            total_estimated_cost: 45_000_000.0,
            breakdown: (0..6)
                .map(|i| CostEstimateItem {
                    category: format!("Row {}", i),
                    amount: 1_000_000.0,
                    description: String::new(),
                })
                .collect(),
            summary: "Premium build".to_string(),
        }
    }

    #[test]
    fn test_report_formatting() {
        let report = EstimateReport::from_estimate(&sample());
        assert_eq!(report.total_display, "PKR 45.00 Million");
        assert_eq!(report.rows[0].amount_display, "PKR 1,000,000");
        assert_eq!(report.rows[0].color, "#10b981");
        assert_eq!(report.rows[4].color, "#ec4899");
        // palette wraps around
        assert_eq!(report.rows[5].color, "#10b981");
        assert!((report.rows[0].share - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_breakdown_has_zero_shares() {
        let mut estimate = sample();
        for item in &mut estimate.breakdown {
            item.amount = 0.0;
        }
        let report = EstimateReport::from_estimate(&estimate);
        assert!(report.rows.iter().all(|row| row.share == 0.0));
    }

    #[test]
    fn test_not_ready_shows_placeholder() {
        let state = EstimateState::new();
        let specs = HouseSpecs {
            city: String::new(),
            ..HouseSpecs::default()
        };
        assert!(state.mount(&specs).is_none());
        assert_eq!(
            state.view(&specs),
            EstimateView::Placeholder {
                message: NOT_READY_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_mount_enters_loading() {
        let state = EstimateState::new();
        let specs = HouseSpecs::default();
        assert!(state.mount(&specs).is_some());

        match state.view(&specs) {
            EstimateView::Loading { header, message } => {
                assert_eq!(
                    header,
                    "Based on current market rates in Karachi for a 500 Sq Yards plot."
                );
                assert_eq!(
                    message,
                    "Analyzing materials, labor, and 5 Bed, 6 Bath, Drawing, Dining requirements..."
                );
            }
            other => panic!("expected loading, got {:?}", other),
        }
    }

    #[test]
    fn test_unmount_clears_loading() {
        let state = EstimateState::new();
        state.mount(&HouseSpecs::default());
        state.unmount();
        assert!(!state.is_loading());
        assert!(matches!(state.view(&HouseSpecs::default()), EstimateView::Empty { .. }));
    }
}
