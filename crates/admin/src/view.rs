//! Screen selection: which top-level view the operator sees, derived purely
//! from the session phase and the chosen section.

use superstore_auth::SessionPhase;

/// The two admin sections, switchable from the shell navigation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AdminView {
    #[default]
    Products,
    Users,
}

impl AdminView {
    pub fn label(self) -> &'static str {
        match self {
            AdminView::Products => "Products",
            AdminView::Users => "Users",
        }
    }
}

/// What is on screen right now.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The startup handshake has not finished.
    Loading,

    /// Unauthenticated; the only offered action is signing in.
    LoginPrompt,

    /// Authenticated; the selected section is shown.
    Shell(AdminView),
}

/// Session phase decides the screen; the chosen section only matters once
/// authenticated.
pub fn select_screen(phase: SessionPhase, view: AdminView) -> Screen {
    match phase {
        SessionPhase::Loading => Screen::Loading,
        SessionPhase::Unauthenticated => Screen::LoginPrompt,
        SessionPhase::Authenticated => Screen::Shell(view),
    }
}

/// Render a price for the product table, two decimals with a dollar sign.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}
