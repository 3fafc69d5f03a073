// ABOUTME: Pure mapping from display state to render instructions
// ABOUTME: Holds all user-facing copy for the denial, expiration and warning views

use chrono::NaiveDate;
use serde::Serialize;

use accessgate_config::constants::{DEFAULT_EXTEND_URL, DEFAULT_PURCHASE_URL};

use crate::state::{DisplayState, ExpiryWarning};

/// Call-to-action destinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Links {
    pub purchase: String,
    pub extend: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            purchase: DEFAULT_PURCHASE_URL.to_string(),
            extend: DEFAULT_EXTEND_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Full-page status view replacing the tool on denial or expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub icon: String,
    pub title: String,
    pub message: String,
    pub action: Link,
}

/// Non-blocking notice pinned to the top of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub headline: String,
    pub body: String,
    pub action: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "view", rename_all = "snake_case")]
pub enum RenderInstruction {
    HideLoading,
    ShowContent,
    HideContent,
    ReplaceBody(StatusView),
    InsertBanner(Banner),
}

/// Ordered instructions for one state change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderPlan(Vec<RenderInstruction>);

impl RenderPlan {
    pub fn instructions(&self) -> &[RenderInstruction] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderInstruction> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.0.iter().find_map(|i| match i {
            RenderInstruction::InsertBanner(banner) => Some(banner),
            _ => None,
        })
    }

    pub fn status_view(&self) -> Option<&StatusView> {
        self.0.iter().find_map(|i| match i {
            RenderInstruction::ReplaceBody(view) => Some(view),
            _ => None,
        })
    }

    pub fn reveals_content(&self) -> bool {
        self.0.contains(&RenderInstruction::ShowContent)
    }
}

impl From<Vec<RenderInstruction>> for RenderPlan {
    fn from(instructions: Vec<RenderInstruction>) -> Self {
        Self(instructions)
    }
}

/// Format a date the way it is shown to users, e.g. `June 1, 2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Instructions that take the page from Loading to `state`.
pub fn render(state: &DisplayState, links: &Links) -> RenderPlan {
    let instructions = match state {
        DisplayState::Loading => Vec::new(),
        DisplayState::Denied { message } => vec![
            RenderInstruction::HideLoading,
            RenderInstruction::HideContent,
            RenderInstruction::ReplaceBody(denied_view(message, links)),
        ],
        DisplayState::Expired { expired_on } => vec![
            RenderInstruction::HideLoading,
            RenderInstruction::HideContent,
            RenderInstruction::ReplaceBody(expired_view(*expired_on, links)),
        ],
        DisplayState::Active { warning } => {
            let mut instructions = vec![RenderInstruction::HideLoading, RenderInstruction::ShowContent];
            if let Some(warning) = warning {
                instructions.push(RenderInstruction::InsertBanner(expiry_banner(warning, links)));
            }
            instructions
        }
    };
    RenderPlan(instructions)
}

fn denied_view(message: &str, links: &Links) -> StatusView {
    StatusView {
        icon: "🔒".to_string(),
        title: "Access Denied".to_string(),
        message: message.to_string(),
        action: Link {
            label: "View Pricing & Purchase".to_string(),
            href: links.purchase.clone(),
        },
    }
}

fn expired_view(expired_on: Option<NaiveDate>, links: &Links) -> StatusView {
    let message = match expired_on {
        Some(date) => format!("Your access expired on {}.", format_date(date)),
        None => "Your access has expired.".to_string(),
    };
    StatusView {
        icon: "⏰".to_string(),
        title: "Access Expired".to_string(),
        message,
        action: Link {
            label: "Extend Access".to_string(),
            href: links.extend.clone(),
        },
    }
}

fn expiry_banner(warning: &ExpiryWarning, links: &Links) -> Banner {
    let days = warning.days_remaining.max(0);
    let unit = if days == 1 { "day" } else { "days" };
    let body = match warning.expires_on {
        Some(date) => format!(
            "Your access expires in {} {} ({}).",
            days,
            unit,
            format_date(date)
        ),
        None => format!("Your access expires in {} {}.", days, unit),
    };
    Banner {
        headline: "⚠️ Access Expiring Soon!".to_string(),
        body,
        action: Link {
            label: "Extend for 90 More Days →".to_string(),
            href: links.extend.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()), "June 1, 2025");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), "January 1, 2025");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()), "December 25, 2024");
    }

    #[test]
    fn test_loading_renders_nothing() {
        assert!(render(&DisplayState::Loading, &Links::default()).is_empty());
    }

    #[test]
    fn test_denied_plan() {
        let plan = render(
            &DisplayState::Denied {
                message: "Invalid token format.".to_string(),
            },
            &Links::default(),
        );

        assert_eq!(
            plan.instructions(),
            &[
                RenderInstruction::HideLoading,
                RenderInstruction::HideContent,
                RenderInstruction::ReplaceBody(StatusView {
                    icon: "🔒".to_string(),
                    title: "Access Denied".to_string(),
                    message: "Invalid token format.".to_string(),
                    action: Link {
                        label: "View Pricing & Purchase".to_string(),
                        href: "https://www.myfairclaim.com/pricing".to_string(),
                    },
                }),
            ]
        );
        assert!(!plan.reveals_content());
    }

    #[test]
    fn test_expired_plan_formats_date_and_links_extension() {
        let plan = render(
            &DisplayState::Expired {
                expired_on: NaiveDate::from_ymd_opt(2025, 1, 1),
            },
            &Links::default(),
        );

        let view = plan.status_view().unwrap();
        assert_eq!(view.title, "Access Expired");
        assert_eq!(view.message, "Your access expired on January 1, 2025.");
        assert_eq!(view.action.href, "https://www.myfairclaim.com/extend-access");
        assert!(!plan.reveals_content());
        assert!(plan.instructions().contains(&RenderInstruction::HideContent));
    }

    #[test]
    fn test_expired_plan_without_date() {
        let plan = render(&DisplayState::Expired { expired_on: None }, &Links::default());
        assert_eq!(plan.status_view().unwrap().message, "Your access has expired.");
    }

    #[test]
    fn test_active_plan_with_banner() {
        let plan = render(
            &DisplayState::Active {
                warning: Some(ExpiryWarning {
                    days_remaining: 10,
                    expires_on: NaiveDate::from_ymd_opt(2025, 6, 1),
                }),
            },
            &Links::default(),
        );

        assert!(plan.reveals_content());
        assert!(plan.status_view().is_none());
        let banner = plan.banner().unwrap();
        assert_eq!(banner.body, "Your access expires in 10 days (June 1, 2025).");
        assert_eq!(banner.action.href, "https://www.myfairclaim.com/extend-access");
    }

    #[test]
    fn test_banner_singular_day_without_date() {
        let plan = render(
            &DisplayState::Active {
                warning: Some(ExpiryWarning {
                    days_remaining: 1,
                    expires_on: None,
                }),
            },
            &Links::default(),
        );
        assert_eq!(plan.banner().unwrap().body, "Your access expires in 1 day.");
    }

    #[test]
    fn test_active_plan_without_banner() {
        let plan = render(&DisplayState::Active { warning: None }, &Links::default());
        assert_eq!(
            plan.instructions(),
            &[RenderInstruction::HideLoading, RenderInstruction::ShowContent]
        );
    }

    #[test]
    fn test_custom_links() {
        let links = Links {
            purchase: "https://shop.example.com/buy".to_string(),
            extend: "https://shop.example.com/extend".to_string(),
        };
        let plan = render(
            &DisplayState::Denied {
                message: "x".to_string(),
            },
            &links,
        );
        assert_eq!(plan.status_view().unwrap().action.href, "https://shop.example.com/buy");
    }
}
