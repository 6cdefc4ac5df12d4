//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Reusable UI components (header, query bar, status, footer)
//! - `modals`: Modal dialogs (cloud selector, token input, permissions)
//! - `panels`: Main panels (sidebar, response panel)
//! - `tabs`: Response viewers (preview, headers, snippets, toolkit, card)
//! - `styling`: Color schemes and style constants

mod components;
mod modals;
mod panels;
pub mod styling;
mod tabs;

pub use components::{
    render_footer, render_header, render_query_bar, render_status_bar, render_terms_banner,
};
pub use modals::{
    render_clear_confirmation_modal, render_cloud_selector_modal, render_permissions_panel,
    render_token_input_modal,
};
pub use panels::{render_response_panel, render_sidebar, SidebarWidgets};
