//! Slide-in side panel with a dimmed backdrop. Escape, the backdrop and the
//! owner's close buttons all report through `on_close`.

use uuid::Uuid;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::{classes, html, Callback, Component, Context, Html, Properties};

pub struct DetailSheet {
    pub id: String,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    #[prop_or_default]
    pub expanded: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

impl Component for DetailSheet {
    type Message = ();
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let on_close = ctx.props().on_close.clone();
        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                on_close.emit(());
            }
        });
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document
                .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        }

        Self {
            id: format!("id-{}", Uuid::new_v4()),
            keydown: Some(keydown),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let active = props.open.then_some("active");
        let on_backdrop = props.on_close.reform(|_| ());

        html! {
            <>
                <div class={classes!("detail-backdrop", active)} onclick={on_backdrop} />
                <aside
                    id={self.id.clone()}
                    class={classes!("detail-panel", active, props.expanded.then_some("expanded"))}
                >
                    { props.children.clone() }
                </aside>
            </>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        lock_body_scroll(ctx.props().open);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(keydown), Some(document)) =
            (self.keydown.take(), web_sys::window().and_then(|w| w.document()))
        {
            let _ = document
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        }
        lock_body_scroll(false);
    }
}

/// Hides page scrolling behind an open panel.
fn lock_body_scroll(locked: bool) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let value = if locked { "hidden" } else { "" };
        let _ = body.style().set_property("overflow", value);
    }
}
