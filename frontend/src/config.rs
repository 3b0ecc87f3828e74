//! Reads the dashboard configuration the server embeds in the page as
//! `<meta name="dashboard-config" content="{...json...}">`.

use presenter::DashboardConfig;

const CONFIG_SELECTOR: &str = "meta[name=\"dashboard-config\"]";

fn meta_content() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document.query_selector(CONFIG_SELECTOR).ok()??;
    meta.get_attribute("content")
}

/// Falls back to defaults when the tag is absent or invalid. Runs before the
/// logger exists, so problems go straight to the console.
pub fn load() -> DashboardConfig {
    let Some(content) = meta_content() else {
        return DashboardConfig::default();
    };
    match DashboardConfig::from_json(&content) {
        Ok(config) => config,
        Err(err) => {
            gloo_console::error!(format!("{}; using defaults", err));
            DashboardConfig::default()
        }
    }
}
