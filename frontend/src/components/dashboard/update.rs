//! Elm-style update function for the dashboard page.
//!
//! Every branch moves the presenter state first, then spawns whatever request
//! that transition handed back. Responses come back as messages carrying the
//! request they answer, so the presenter can drop stale ones.

use gloo_file::futures::read_as_bytes;
use gloo_file::Blob;
use presenter::detail::{generate_ai_analysis, GenerationRequest, PageRequest};
use presenter::upload::{PROGRESS_HIDE_DELAY_MS, VIEW_SWITCH_DELAY_MS};
use presenter::{auth, history, paginator, upload, DashboardError, UploadFile};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::session;

use super::helpers::{send_later, show_toast};
use super::messages::Msg;
use super::state::{ActiveView, DashboardComponent};

const ROWS_SCROLL_DELAY_MS: u32 = 400;

pub fn update(
    component: &mut DashboardComponent,
    ctx: &Context<DashboardComponent>,
    msg: Msg,
) -> bool {
    let dashboard = &mut component.dashboard;

    match msg {
        Msg::SetView(view) => {
            let changed = component.active_view != view;
            component.active_view = view;
            changed
        }
        Msg::FilePicked(file) => {
            if let Err(err) = dashboard.begin_upload(file.size() as u64) {
                show_toast(&err.to_string());
                return false;
            }
            let link = ctx.link().clone();
            let backend = ctx.props().backend.clone();
            let config = dashboard.config().clone();
            spawn_local(async move {
                let outcome = match read_upload(file).await {
                    Ok(upload) => upload::upload_file(&*backend, &upload, &config).await,
                    Err(err) => Err(err),
                };
                link.send_message(Msg::UploadSettled(outcome));
            });
            true
        }
        Msg::FileRejected(message) => {
            show_toast(&message);
            false
        }
        Msg::UploadSettled(outcome) => {
            dashboard.upload_finished(&outcome);
            match outcome {
                Ok(file_id) => {
                    let link = ctx.link().clone();
                    let backend = ctx.props().backend.clone();
                    spawn_local(async move {
                        let outcome = upload::run_analysis(&*backend, &file_id).await;
                        link.send_message(Msg::Analyzed(outcome));
                    });
                }
                Err(err) => show_toast(&format!("Error: {}", err)),
            }
            true
        }
        Msg::Analyzed(outcome) => {
            match dashboard.analysis_finished(outcome) {
                Ok(()) => {
                    let link = ctx.link();
                    send_later(link, PROGRESS_HIDE_DELAY_MS, Msg::HideProgress);
                    send_later(link, VIEW_SWITCH_DELAY_MS, Msg::SetView(ActiveView::Analyze));
                    link.send_message(Msg::LoadHistory);
                }
                Err(err) => show_toast(&format!("Error: {}", err)),
            }
            true
        }
        Msg::HideProgress => {
            dashboard.hide_progress();
            true
        }
        Msg::ClearUpload => {
            dashboard.clear_result();
            true
        }
        Msg::Export => {
            match dashboard.export_url() {
                Ok(url) => session::redirect(&url),
                Err(err) => show_toast(&err.to_string()),
            }
            false
        }
        Msg::LoadHistory => {
            let request = dashboard.history_mut().begin_reload();
            let link = ctx.link().clone();
            let backend = ctx.props().backend.clone();
            spawn_local(async move {
                let entries = history::fetch_history(&*backend).await;
                link.send_message(Msg::HistoryLoaded(request, entries));
            });
            false
        }
        Msg::HistoryLoaded(request, entries) => dashboard.history_mut().finish_reload(&request, entries),
        Msg::ClearHistory => {
            if !session::confirm("Clear all history?") || !dashboard.history_mut().begin_clear() {
                return false;
            }
            let link = ctx.link().clone();
            let backend = ctx.props().backend.clone();
            spawn_local(async move {
                let outcome = history::clear_history(&*backend).await;
                link.send_message(Msg::HistoryCleared(outcome));
            });
            true
        }
        Msg::HistoryCleared(outcome) => {
            show_toast(&outcome.toast());
            dashboard.history_mut().finish_clear(&outcome);
            true
        }
        Msg::ViewHistory(analysis_id) => {
            let request = dashboard.begin_view_history(analysis_id);
            let link = ctx.link().clone();
            let backend = ctx.props().backend.clone();
            spawn_local(async move {
                let outcome = history::fetch_result(&*backend, request.analysis_id).await;
                link.send_message(Msg::HistoryResultLoaded(request, outcome));
            });
            false
        }
        Msg::HistoryResultLoaded(request, outcome) => {
            match dashboard.finish_view_history(&request, outcome) {
                Ok(true) => {
                    component.active_view = ActiveView::Analyze;
                    true
                }
                Ok(false) => false,
                Err(err) => {
                    show_toast(&err.to_string());
                    false
                }
            }
        }
        Msg::SelectIssue(index) => dashboard.select_issue(index),
        Msg::CloseIssue => {
            let was_open = dashboard.detail().is_open();
            dashboard.close_issue();
            was_open
        }
        Msg::ToggleAffectedRows => {
            if let Some(request) = dashboard.toggle_affected_rows() {
                load_page(ctx, request);
                send_later(ctx.link(), ROWS_SCROLL_DELAY_MS, Msg::ScrollToRows);
            }
            true
        }
        Msg::ScrollToRows => {
            if let Some(section) = component.rows_ref.cast::<web_sys::Element>() {
                section.scroll_into_view();
            }
            false
        }
        Msg::NextPage => match dashboard.next_page() {
            Some(request) => {
                load_page(ctx, request);
                true
            }
            None => false,
        },
        Msg::PreviousPage => match dashboard.previous_page() {
            Some(request) => {
                load_page(ctx, request);
                true
            }
            None => false,
        },
        Msg::PageLoaded(request, outcome) => dashboard.finish_page(&request, outcome),
        Msg::GenerateAnalysis => {
            if let Some(request) = dashboard.begin_generation() {
                generate(component, ctx, request);
            }
            true
        }
        Msg::AnalysisGenerated(request, outcome) => dashboard.finish_generation(&request, outcome),
        Msg::ToggleFullAnalysis => {
            dashboard.toggle_full_analysis();
            true
        }
        Msg::Logout => {
            if !session::confirm("Are you sure you want to logout?") {
                return false;
            }
            session::clear_user();
            let backend = ctx.props().backend.clone();
            spawn_local(async move {
                auth::logout(&*backend).await;
                session::redirect(session::LOGIN_PATH);
            });
            false
        }
    }
}

async fn read_upload(file: web_sys::File) -> Result<UploadFile, DashboardError> {
    let name = file.name();
    let mime_type = Some(file.type_()).filter(|t| !t.is_empty());
    let bytes = read_as_bytes(&Blob::from(file))
        .await
        .map_err(|err| DashboardError::Upload(format!("Could not read {}: {}", name, err)))?;
    Ok(UploadFile {
        name,
        mime_type,
        bytes,
    })
}

fn load_page(ctx: &Context<DashboardComponent>, request: PageRequest) {
    let link = ctx.link().clone();
    let backend = ctx.props().backend.clone();
    spawn_local(async move {
        let outcome = paginator::fetch_page(&*backend, request.analysis_id, &request.query).await;
        link.send_message(Msg::PageLoaded(request, outcome));
    });
}

fn generate(
    component: &DashboardComponent,
    ctx: &Context<DashboardComponent>,
    request: GenerationRequest,
) {
    let link = ctx.link().clone();
    let backend = ctx.props().backend.clone();
    let headers = component.dashboard.config().section_headers.clone();
    let renderer = component.dashboard.renderer();
    spawn_local(async move {
        let outcome = generate_ai_analysis(&*backend, &request, &headers, &renderer).await;
        link.send_message(Msg::AnalysisGenerated(request, outcome));
    });
}
