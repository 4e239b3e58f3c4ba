//! Tauri commands
//! This module defines all the commands that can be invoked from the frontend.

use std::sync::Arc;

use log::info;
use tauri::{AppHandle, State};

use crate::app;
use crate::state::AppState;
use crate::ui::webview::{WebviewDocument, WebviewNotifier};

/// Initializes the panel once the page's DOM is ready.
///
/// # Arguments
/// * `element_ids` - The ids of the elements present in the page
/// * `app_handle` - The Tauri app handle
/// * `app_state` - The application state
///
/// # Returns
/// Nothing, but emits "ui-patch" events that put the panel in its
/// disconnected state. Calling it again (after a reload) drops the previous
/// page's handlers and disconnects the device it held.
#[tauri::command]
pub async fn ui_ready(
    element_ids: Vec<String>,
    app_handle: AppHandle,
    app_state: State<'_, AppState>,
) -> Result<(), String> {
    info!("Page ready with {} elements", element_ids.len());
    app::release(&app_state.session(), &app_state.link_ops(), &app_state.clicks).await;

    let document = WebviewDocument::new(app_handle.clone(), element_ids, app_state.clicks.clone());
    let notifier = Arc::new(WebviewNotifier::new(app_handle));

    let session = app::init(
        &document,
        app_state.link_ops(),
        notifier,
        app_state.labels(),
        app_state.wiring_options(),
    )
    .map_err(|e| e.to_string())?;
    app_state.set_session(session);
    Ok(())
}

/// Runs the click handlers of an element.
///
/// # Arguments
/// * `element_id` - The id of the clicked element
/// * `app_state` - The application state
#[tauri::command]
pub async fn ui_click(element_id: String, app_state: State<'_, AppState>) -> Result<(), String> {
    let handlers = app_state
        .clicks
        .handlers(&element_id)
        .ok_or_else(|| format!("No click handler registered for #{}", element_id))?;

    for handler in handlers {
        handler().await;
    }
    Ok(())
}
