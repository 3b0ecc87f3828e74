//! Drop zone plus hidden file picker, with the progress bar underneath.

use presenter::upload::{validate_dropped, UploadStage};
use web_sys::{DragEvent, Event, File, HtmlInputElement};
use yew::{classes, html, Callback, Component, Context, Html, NodeRef, Properties};

#[derive(Properties, PartialEq)]
pub struct UploadZoneProps {
    pub stage: UploadStage,
    pub on_file: Callback<File>,
    /// Message for a dropped file that is not a CSV.
    pub on_reject: Callback<String>,
}

pub enum Msg {
    Browse,
    DragOver(bool),
    Picked,
    Dropped(Option<File>),
}

pub struct UploadZone {
    input_ref: NodeRef,
    dragging: bool,
}

impl UploadZone {
    /// Clears the input so picking the same file again still fires `change`.
    fn take_picked(&self) -> Option<File> {
        let input = self.input_ref.cast::<HtmlInputElement>()?;
        let file = input.files().and_then(|files| files.get(0));
        input.set_value("");
        file
    }
}

impl Component for UploadZone {
    type Message = Msg;
    type Properties = UploadZoneProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            input_ref: NodeRef::default(),
            dragging: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Browse => {
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
                false
            }
            Msg::DragOver(dragging) => {
                let changed = self.dragging != dragging;
                self.dragging = dragging;
                changed
            }
            Msg::Picked => {
                if let Some(file) = self.take_picked() {
                    ctx.props().on_file.emit(file);
                }
                false
            }
            Msg::Dropped(file) => {
                self.dragging = false;
                if let Some(file) = file {
                    match validate_dropped(&file.name()) {
                        Ok(()) => ctx.props().on_file.emit(file),
                        Err(err) => ctx.props().on_reject.emit(err.to_string()),
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let stage = ctx.props().stage;

        let ondragover = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragOver(true)
        });
        let ondragleave = link.callback(|_: DragEvent| Msg::DragOver(false));
        let ondrop = link.callback(|e: DragEvent| {
            e.prevent_default();
            let file = e
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            Msg::Dropped(file)
        });
        let onchange = link.callback(|_: Event| Msg::Picked);

        html! {
            <div class="upload-section">
                <div
                    class={classes!("upload-zone", self.dragging.then_some("dragover"))}
                    onclick={link.callback(|_| Msg::Browse)}
                    {ondragover}
                    {ondragleave}
                    {ondrop}
                >
                    <i class="material-icons upload-icon">{"cloud_upload"}</i>
                    <h3>{"Drop your CSV file here"}</h3>
                    <p>{"or click to browse"}</p>
                </div>
                <input
                    type="file"
                    accept=".csv"
                    style="display: none;"
                    ref={self.input_ref.clone()}
                    {onchange}
                />
                {
                    if stage.is_visible() {
                        html! {
                            <div class="upload-progress">
                                <div class="progress-bar">
                                    <div class="progress-fill" style={format!("width: {}%;", stage.percent())} />
                                </div>
                                <div class="progress-text">{ stage.label() }</div>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}
