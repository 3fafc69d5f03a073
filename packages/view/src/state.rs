// ABOUTME: Display state machine for a single page load
// ABOUTME: Loading is the only non-terminal state; every outcome maps to exactly one terminal state

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use accessgate_config::constants::DEFAULT_WARNING_DAYS;
use accessgate_core::{AccessGrant, GateError, GateResult};

use crate::render::{render, Links, RenderPlan};

/// Near-expiry notice shown on top of active content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryWarning {
    pub days_remaining: i64,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    Loading,
    Denied { message: String },
    Expired { expired_on: Option<NaiveDate> },
    Active { warning: Option<ExpiryWarning> },
}

impl DisplayState {
    /// Map a validation outcome to its terminal state.
    ///
    /// `warning_days` is inclusive: a grant with exactly that many days left
    /// still gets the banner.
    pub fn resolve(outcome: &GateResult<AccessGrant>, warning_days: i64) -> Self {
        match outcome {
            Ok(grant) => {
                let warning = grant
                    .days_remaining
                    .filter(|days| *days <= warning_days)
                    .map(|days| ExpiryWarning {
                        days_remaining: days,
                        expires_on: grant.expires_on,
                    });
                DisplayState::Active { warning }
            }
            Err(GateError::ExpiredToken { expired_on }) => DisplayState::Expired {
                expired_on: *expired_on,
            },
            Err(err) => DisplayState::Denied {
                message: err.user_message(),
            },
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, DisplayState::Loading)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DisplayState::Active { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayState::Loading => "loading",
            DisplayState::Denied { .. } => "denied",
            DisplayState::Expired { .. } => "expired",
            DisplayState::Active { .. } => "active",
        }
    }
}

/// Tracks the current display state and hands out render plans.
#[derive(Debug, Clone)]
pub struct PresentationController {
    state: DisplayState,
    links: Links,
    warning_days: i64,
}

impl PresentationController {
    pub fn new(links: Links) -> Self {
        Self {
            state: DisplayState::Loading,
            links,
            warning_days: DEFAULT_WARNING_DAYS,
        }
    }

    pub fn with_warning_days(mut self, warning_days: i64) -> Self {
        self.warning_days = warning_days;
        self
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Move to the state implied by `outcome` and return what to draw.
    pub fn conclude(&mut self, outcome: &GateResult<AccessGrant>) -> RenderPlan {
        let next = DisplayState::resolve(outcome, self.warning_days);
        self.enter(next)
    }

    /// Enter `next`. Only one transition out of Loading happens per page
    /// load; later requests are ignored and produce an empty plan.
    pub fn enter(&mut self, next: DisplayState) -> RenderPlan {
        if self.state.is_terminal() {
            warn!(
                current = self.state.name(),
                requested = next.name(),
                "Display state already settled, ignoring transition"
            );
            return RenderPlan::default();
        }
        info!(state = next.name(), "Entering display state");
        let plan = render(&next, &self.links);
        self.state = next;
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accessgate_core::constants::{MISSING_TOKEN_MESSAGE, TRANSPORT_FAILURE_MESSAGE};
    use rstest::rstest;

    fn grant(days: Option<i64>) -> GateResult<AccessGrant> {
        Ok(AccessGrant {
            customer: None,
            days_remaining: days,
            expires_on: NaiveDate::from_ymd_opt(2025, 6, 1),
        })
    }

    #[rstest]
    #[case(Some(45), false)]
    #[case(Some(31), false)]
    #[case(Some(30), true)]
    #[case(Some(10), true)]
    #[case(Some(0), true)]
    #[case(None, false)]
    fn test_warning_threshold(#[case] days: Option<i64>, #[case] warned: bool) {
        let state = DisplayState::resolve(&grant(days), 30);
        let DisplayState::Active { warning } = state else {
            panic!("expected active state");
        };
        assert_eq!(warning.is_some(), warned);
    }

    #[test]
    fn test_expired_maps_to_expired_state() {
        let expired_on = NaiveDate::from_ymd_opt(2025, 1, 1);
        let state = DisplayState::resolve(&Err(GateError::ExpiredToken { expired_on }), 30);
        assert_eq!(state, DisplayState::Expired { expired_on });
    }

    #[test]
    fn test_errors_map_to_denied_messages() {
        let state = DisplayState::resolve(&Err(GateError::MissingToken), 30);
        assert_eq!(
            state,
            DisplayState::Denied {
                message: MISSING_TOKEN_MESSAGE.to_string()
            }
        );

        let state = DisplayState::resolve(
            &Err(GateError::TransportFailure("dns error: no such host".to_string())),
            30,
        );
        assert_eq!(
            state,
            DisplayState::Denied {
                message: TRANSPORT_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_controller_settles_once() {
        let mut controller = PresentationController::new(Links::default());
        assert_eq!(controller.state(), &DisplayState::Loading);

        let plan = controller.conclude(&grant(Some(45)));
        assert!(!plan.is_empty());
        assert!(controller.state().is_active());

        let second = controller.conclude(&Err(GateError::MalformedToken));
        assert!(second.is_empty());
        assert!(controller.state().is_active());
    }

    #[test]
    fn test_controller_custom_threshold() {
        let mut controller = PresentationController::new(Links::default()).with_warning_days(60);
        controller.conclude(&grant(Some(45)));
        assert!(matches!(
            controller.state(),
            DisplayState::Active { warning: Some(_) }
        ));
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_value(DisplayState::Denied {
            message: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "denied");
        assert_eq!(json["message"], "nope");
    }
}
