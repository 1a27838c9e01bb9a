mod breadcrumbs;
mod layout;
mod spinner;
mod theme;

pub use breadcrumbs::Breadcrumbs;
pub use layout::{AppLayout, RootLayout};
pub use spinner::{LoadingSpinner, SpinnerSize};
pub use theme::{ThemeProvider, ThemeToggle};
