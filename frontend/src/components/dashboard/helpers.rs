//! Small DOM utilities used by `update.rs` and `view.rs`.

use chrono::{DateTime, Utc};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::html::Scope;
use yew::{AttrValue, Html};

use super::messages::Msg;
use super::state::DashboardComponent;

const TOAST_DURATION_MS: u32 = 3000;

/// Displays a temporary notification at the bottom of the screen.
///
/// The message is inserted as text, so server-provided error messages
/// cannot inject markup. The toast removes itself after three seconds.
///
/// # Arguments
/// * `message` - The text content to display in the toast.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
        toast.set_text_content(Some(message));
        toast.set_class_name("toast");
        let html_toast: HtmlElement = toast.unchecked_into();
        let style = html_toast.style();
        style.set_property("position", "fixed").ok();
        style.set_property("bottom", "20px").ok();
        style.set_property("left", "50%").ok();
        style.set_property("transform", "translateX(-50%)").ok();
        style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
        style.set_property("color", "#fff").ok();
        style.set_property("padding", "10px 20px").ok();
        style.set_property("border-radius", "4px").ok();
        style.set_property("z-index", "10000").ok();

        if body.append_child(&html_toast).is_ok() {
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
                html_toast.remove();
            });
        }
    }
}

/// Sends `msg` to the component after `millis` milliseconds.
///
/// # Arguments
/// * `link` - Scope of the dashboard component.
/// * `millis` - Delay before delivery.
/// * `msg` - The message to deliver.
pub fn send_later(link: &Scope<DashboardComponent>, millis: u32, msg: Msg) {
    let link = link.clone();
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(millis).await;
        link.send_message(msg);
    });
}

/// Current wall-clock time from the browser.
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Wraps markup produced by the presenter's sanitizing renderer.
pub fn trusted_html(markup: &str) -> Html {
    Html::from_html_unchecked(AttrValue::from(markup.to_string()))
}
