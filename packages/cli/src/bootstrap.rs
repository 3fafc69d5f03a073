// ABOUTME: Page-load orchestration tying token guard, validation and presentation together
// ABOUTME: One call to Gate::run takes a page from Loading to exactly one terminal state

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use accessgate_client::{ClientError, TokenValidator, ValidationClient};
use accessgate_core::{AccessGrant, GateResult, SessionContext};
use accessgate_view::{
    apply_plan, populate_fields, DisplayState, Page, PopulateReport, PresentationController,
    RenderPlan,
};

use crate::config::GateConfig;

/// What happened during one page load
#[derive(Debug, Clone, Serialize)]
pub struct PageLoadReport {
    pub state: DisplayState,
    /// Error kind when access was not granted
    pub error: Option<&'static str>,
    /// Whether a validation request was attempted
    pub validated: bool,
    pub plan: RenderPlan,
    pub populated: Option<PopulateReport>,
}

/// The access gate for a single configured deployment.
pub struct Gate<V> {
    config: GateConfig,
    validator: V,
}

impl Gate<ValidationClient> {
    pub fn from_config(config: GateConfig) -> Result<Self, ClientError> {
        let validator = ValidationClient::new(config.client.clone())?;
        Ok(Self::new(config, validator))
    }
}

impl<V: TokenValidator> Gate<V> {
    pub fn new(config: GateConfig, validator: V) -> Self {
        Self { config, validator }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Run the gate for a page served at `location`.
    ///
    /// Local token failures settle the page without contacting the endpoint.
    /// Otherwise exactly one validation request is made. Fields are only
    /// populated once the page is active.
    pub async fn run<P: Page + ?Sized>(&self, location: &Url, page: &mut P) -> PageLoadReport {
        let mut controller = PresentationController::new(self.config.links.clone())
            .with_warning_days(self.config.warning_days);

        let session = SessionContext::establish(
            location,
            &self.config.token_param,
            &self.config.token_format,
        );
        let outcome: GateResult<AccessGrant> = match session {
            Ok(session) => self.validator.validate(&session).await.into_grant(),
            Err(err) => Err(err),
        };
        let validated = !matches!(&outcome, Err(err) if err.is_local());

        let plan = controller.conclude(&outcome);
        apply_plan(page, &plan);

        let populated = match (&outcome, controller.state().is_active()) {
            (Ok(AccessGrant { customer: Some(customer), .. }), true) => {
                Some(populate_fields(page, customer))
            }
            _ => {
                debug!("No customer data to populate");
                None
            }
        };

        let error = outcome.as_ref().err().map(|err| err.kind());
        info!(
            state = controller.state().name(),
            error = ?error,
            validated,
            "Page load settled"
        );

        PageLoadReport {
            state: controller.state().clone(),
            error,
            validated,
            plan,
            populated,
        }
    }
}
