// src/widgets/mod.rs
//! View values shared across screens.

pub mod nav;
pub mod stat_card;
pub mod toast;

pub use nav::{nav_items, NavItem, NavbarUser};
pub use stat_card::StatCard;
pub use toast::{Notifier, Toast, ToastKind};
