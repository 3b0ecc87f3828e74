//! View rendering for the dashboard page.
//!
//! Three views share the page and only the active one carries the `active`
//! class. The issue detail panel sits outside them so it can slide over any
//! view. AI-generated sections arrive as sanitized HTML from the presenter's
//! markdown renderer and are injected as is; everything else is plain text.

use presenter::analysis_view::AnalysisView;
use presenter::detail::{GenerationState, IssueDetail, TableState};
use presenter::history::HistoryItemView;
use presenter::paginator::AffectedRowsTable;
use presenter::sections::AnalysisSections;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::sheet::DetailSheet;
use crate::components::stats_grid::{StatCard, StatsGrid};
use crate::components::upload_zone::UploadZone;

use super::helpers::{now, trusted_html};
use super::messages::Msg;
use super::state::{ActiveView, DashboardComponent};

pub fn view(component: &DashboardComponent, ctx: &Context<DashboardComponent>) -> Html {
    let link = ctx.link();
    let detail = component.dashboard.detail();

    html! {
        <div class="dashboard">
            { build_sidebar(component, link) }
            <main class="main-content">
                { build_upload_view(component, link) }
                { build_analyze_view(component, link) }
                { build_history_view(component, link) }
            </main>
            <DetailSheet
                open={detail.is_open()}
                expanded={detail.is_table_expanded()}
                on_close={link.callback(|_| Msg::CloseIssue)}
            >
                { build_detail_panel(component, link) }
            </DetailSheet>
        </div>
    }
}

fn view_class(component: &DashboardComponent, view: ActiveView) -> Classes {
    classes!("view", (component.active_view == view).then_some("active"))
}

fn build_sidebar(component: &DashboardComponent, link: &Scope<DashboardComponent>) -> Html {
    html! {
        <nav class="sidebar">
            <div class="logo">{"Data Quality"}</div>
            <ul class="nav-list">
                { for ActiveView::ALL.iter().map(|&view| {
                    let active = (component.active_view == view).then_some("active");
                    html! {
                        <li
                            class={classes!("nav-item", active)}
                            data-view={view.key()}
                            onclick={link.callback(move |_| Msg::SetView(view))}
                        >
                            <i class="material-icons">{ view.icon() }</i>
                            <span>{ view.label() }</span>
                        </li>
                    }
                }) }
            </ul>
            <div
                class="user-avatar"
                title="Click to logout"
                style="cursor: pointer;"
                onclick={link.callback(|_| Msg::Logout)}
            >
                <span id="user-display-name">{ component.display_name() }</span>
            </div>
        </nav>
    }
}

fn build_upload_view(component: &DashboardComponent, link: &Scope<DashboardComponent>) -> Html {
    let dashboard = &component.dashboard;

    html! {
        <section id="upload-view" class={view_class(component, ActiveView::Upload)}>
            <h2>{"Upload Data"}</h2>
            <UploadZone
                stage={dashboard.upload_stage()}
                on_file={link.callback(Msg::FilePicked)}
                on_reject={link.callback(Msg::FileRejected)}
            />
            {
                match dashboard.view() {
                    Some(analysis) => html! {
                        <>
                            <StatsGrid columns={4}>
                                <StatCard label="Rows" value={analysis.stats.total_rows.clone()} />
                                <StatCard label="Columns" value={analysis.stats.total_columns.clone()} />
                                <StatCard label="File Size" value={analysis.stats.file_size.clone()} />
                                <StatCard
                                    label="Quality Score"
                                    value={analysis.stats.quality_score.clone()}
                                    value_class={Some(analysis.band.css_class())}
                                />
                            </StatsGrid>
                            <div class="upload-actions">
                                <button class="btn-secondary" id="clear-btn" onclick={link.callback(|_| Msg::ClearUpload)}>
                                    {"Clear"}
                                </button>
                            </div>
                        </>
                    },
                    None => html! {},
                }
            }
        </section>
    }
}

fn build_analyze_view(component: &DashboardComponent, link: &Scope<DashboardComponent>) -> Html {
    let body = match component.dashboard.view() {
        Some(analysis) => build_analysis(component, analysis, link),
        None => empty_state("Upload a CSV file to see its analysis"),
    };

    html! {
        <section id="analyze-view" class={view_class(component, ActiveView::Analyze)}>
            { body }
        </section>
    }
}

fn build_analysis(
    component: &DashboardComponent,
    analysis: &AnalysisView,
    link: &Scope<DashboardComponent>,
) -> Html {
    let radius = component.dashboard.config().gauge_radius;
    let gauge = &analysis.gauge;
    let size = radius * 2.0 + 30.0;
    let center = size / 2.0;
    let indicator = |on: bool| classes!("indicator", on.then_some("active"));

    html! {
        <>
            <div class="analysis-header">
                <div>
                    <h2>{"Analysis Results"}</h2>
                    <p id="analysis-subtitle">{ analysis.filename.clone() }</p>
                </div>
                <button class="btn-primary" id="export-btn" onclick={link.callback(|_| Msg::Export)}>
                    {"Export Report"}
                </button>
            </div>

            <div class="quality-overview">
                <svg class="score-ring" width={size.to_string()} height={size.to_string()}>
                    <circle class="score-track" cx={center.to_string()} cy={center.to_string()} r={radius.to_string()} />
                    <circle
                        id="score-circle"
                        cx={center.to_string()}
                        cy={center.to_string()}
                        r={radius.to_string()}
                        stroke={gauge.color}
                        style={format!(
                            "stroke-dasharray: {}; stroke-dashoffset: {};",
                            gauge.circumference, gauge.offset
                        )}
                    />
                </svg>
                <div id="quality-score-display" class={classes!("score-value", analysis.band.css_class())}>
                    { analysis.score }
                </div>
                <p id="quality-summary-text">{ analysis.summary }</p>
                <div class="quality-indicators">
                    <span id="indicator-complete" class={indicator(analysis.indicators.complete)}>{"Complete"}</span>
                    <span id="indicator-valid" class={indicator(analysis.indicators.valid)}>{"Valid"}</span>
                    <span id="indicator-consistent" class={indicator(analysis.indicators.consistent)}>{"Consistent"}</span>
                </div>
            </div>

            <div class="issues-section">
                <div class="section-header">
                    <h3>{"Issues"}</h3>
                    <span id="issues-count">{ analysis.issues_label.clone() }</span>
                </div>
                <div id="issues-grid" class="issues-grid">
                    { build_issue_cards(analysis, link) }
                </div>
            </div>

            <div id="columns-table" class="columns-table">
                <div class="column-row header">
                    <div class="column-name">{"Column Name"}</div>
                    <div class="column-type">{"Type"}</div>
                    <div class="column-missing">{"Missing"}</div>
                    <div class="column-unique">{"Unique"}</div>
                    <div class="column-status">{"Status"}</div>
                </div>
                { for analysis.column_rows.iter().map(|row| html! {
                    <div class="column-row">
                        <div class="column-name">{ row.name.clone() }</div>
                        <div class="column-type">{ row.data_type.clone() }</div>
                        <div class="column-missing">{ row.missing.clone() }</div>
                        <div class="column-unique">{ row.unique.clone() }</div>
                        <div class="column-status">
                            <span class={classes!("status-badge", row.status.css_class())}>{ row.status.label() }</span>
                        </div>
                    </div>
                }) }
            </div>
        </>
    }
}

fn build_issue_cards(analysis: &AnalysisView, link: &Scope<DashboardComponent>) -> Html {
    if !analysis.has_issues() {
        return empty_state("No issues detected");
    }

    analysis
        .issue_cards
        .iter()
        .map(|card| {
            let index = card.index;
            html! {
                <div
                    class={classes!("issue-card", card.severity_class.clone())}
                    data-issue-index={index.to_string()}
                    onclick={link.callback(move |_| Msg::SelectIssue(index))}
                >
                    <div class="issue-header">
                        <div class="issue-type">{ card.type_label.clone() }</div>
                        <div class="issue-count">{ card.count.clone() }</div>
                    </div>
                    <h4 class="issue-title">{ card.title.clone() }</h4>
                    <p class="issue-description">{ card.description.clone() }</p>
                </div>
            }
        })
        .collect()
}

fn build_history_view(component: &DashboardComponent, link: &Scope<DashboardComponent>) -> Html {
    let history = component.dashboard.history();
    let now = now();

    let list = if history.is_empty() {
        empty_state("No analysis history yet")
    } else {
        history
            .entries()
            .iter()
            .map(|entry| {
                let item = HistoryItemView::new(entry, now);
                let id = item.id;
                html! {
                    <div class="history-item" data-analysis-id={id.to_string()}>
                        <div class="history-score">
                            <div class="history-score-value">{ item.score }</div>
                        </div>
                        <div class="history-info">
                            <div class="history-filename">{ item.filename }</div>
                            <div class="history-meta">{ item.meta }</div>
                        </div>
                        <div class="history-date">{ item.when }</div>
                        <button class="history-action" onclick={link.callback(move |_| Msg::ViewHistory(id))}>
                            {"View"}
                        </button>
                    </div>
                }
            })
            .collect()
    };

    html! {
        <section id="history-view" class={view_class(component, ActiveView::History)}>
            <div class="section-header">
                <h2>{"Analysis History"}</h2>
                <button
                    class="btn-secondary"
                    id="clear-history-btn"
                    disabled={history.is_clearing()}
                    onclick={link.callback(|_| Msg::ClearHistory)}
                >
                    {"Clear History"}
                </button>
            </div>
            <div id="history-list">{ list }</div>
        </section>
    }
}

fn build_detail_panel(component: &DashboardComponent, link: &Scope<DashboardComponent>) -> Html {
    let store = component.dashboard.detail();
    let Some(detail) = store.active() else {
        return html! {};
    };
    let action_label = if store.is_table_expanded() {
        "Collapse Table"
    } else {
        "View Affected Rows"
    };

    html! {
        <>
            <div class="detail-header">
                <div>
                    <span id="detail-issue-type" class="detail-type">{ detail.type_label.clone() }</span>
                    <span id="detail-severity" class={classes!("detail-severity", detail.severity_class.clone())}>
                        { detail.severity_class.clone() }
                    </span>
                </div>
                <button id="detail-close" class="icon-btn" onclick={link.callback(|_| Msg::CloseIssue)}>
                    <i class="material-icons">{"close"}</i>
                </button>
            </div>
            <h3 id="detail-title">{ detail.title.clone() }</h3>
            <p id="detail-description">{ detail.description.clone() }</p>
            <div class="detail-metrics">
                <div class="detail-metric">
                    <div class="metric-label">{"Affected Records"}</div>
                    <div id="detail-count" class="metric-value">{ detail.count.clone() }</div>
                </div>
                <div class="detail-metric">
                    <div class="metric-label">{"Of Dataset"}</div>
                    <div id="detail-percentage" class="metric-value">{ detail.percentage_label.clone() }</div>
                </div>
            </div>

            { build_generation(component, detail, link) }

            <section
                id="affected-rows-section"
                ref={component.rows_ref.clone()}
                style={if store.is_table_expanded() { "display: block;" } else { "display: none;" }}
            >
                { build_table(store.table(), link) }
            </section>

            <div class="detail-footer">
                <button id="detail-dismiss" class="btn-secondary" onclick={link.callback(|_| Msg::CloseIssue)}>
                    {"Dismiss"}
                </button>
                <button id="detail-action" class="btn-primary" onclick={link.callback(|_| Msg::ToggleAffectedRows)}>
                    { action_label }
                </button>
            </div>
        </>
    }
}

fn build_generation(
    component: &DashboardComponent,
    detail: &IssueDetail,
    link: &Scope<DashboardComponent>,
) -> Html {
    let generate = link.callback(|_| Msg::GenerateAnalysis);

    match component.dashboard.detail().generation() {
        GenerationState::Idle => html! {
            <div id="ai-analysis-container" class="ai-analysis-container">
                <p class="ai-helper">{ detail.helper_text.clone() }</p>
                <button class="btn-secondary" id="generate-analysis-btn" onclick={generate}>
                    { detail.generate_label }
                </button>
            </div>
        },
        GenerationState::Generating => html! {
            <div id="ai-analysis-container" class="ai-analysis-container">
                <p class="ai-helper">{ detail.helper_text.clone() }</p>
                <button class="btn-secondary" id="generate-analysis-btn" disabled=true>
                    <div class="spinner" />
                    {"Generating Analysis..."}
                </button>
            </div>
        },
        GenerationState::Failed(message) => html! {
            <div id="ai-analysis-container" class="ai-analysis-container">
                <p class="ai-error">{ message.clone() }</p>
                <button class="btn-secondary" id="generate-analysis-btn-retry" onclick={generate}>
                    {"Retry"}
                </button>
            </div>
        },
        GenerationState::Ready(sections) => build_sections(component, sections, link),
    }
}

fn or_unavailable(markup: &str, fallback: &str) -> Html {
    if markup.is_empty() {
        trusted_html(fallback)
    } else {
        trusted_html(markup)
    }
}

fn build_sections(
    component: &DashboardComponent,
    sections: &AnalysisSections,
    link: &Scope<DashboardComponent>,
) -> Html {
    let open = component.dashboard.detail().is_full_analysis_open();
    let headers = &component.dashboard.config().section_headers;

    let summary = if sections.summary.is_empty() {
        html! {}
    } else {
        let toggle_label = if open { "Hide Full Analysis" } else { "Show Full Analysis" };
        let icon_style = if open { "transform: rotate(180deg);" } else { "transform: rotate(0deg);" };
        html! {
            <div id="executive-summary" class="executive-summary">
                <h4>{ headers.summary.clone() }</h4>
                <div id="summary-text">{ trusted_html(&sections.summary) }</div>
                <button
                    id="btn-show-full-analysis"
                    class="btn-text"
                    onclick={link.callback(|_| Msg::ToggleFullAnalysis)}
                >
                    <i id="expand-icon" class="material-icons" style={icon_style}>{"expand_more"}</i>
                    <span id="expand-text">{ toggle_label }</span>
                </button>
            </div>
        }
    };

    html! {
        <>
            { summary }
            <div
                id="full-analysis-sections"
                style={if open { "display: block;" } else { "display: none;" }}
            >
                <div class="detail-section">
                    <h4>{ headers.impact.clone() }</h4>
                    <div id="detail-impact">
                        { or_unavailable(&sections.impact, "<p>Analysis unavailable.</p>") }
                    </div>
                </div>
                <div class="detail-section">
                    <h4>{ headers.recommendations.clone() }</h4>
                    <div id="detail-recommendations">
                        { or_unavailable(&sections.recommendations, "<p>Recommendations unavailable.</p>") }
                    </div>
                </div>
                <div class="detail-section">
                    <h4>{ headers.context.clone() }</h4>
                    <div id="detail-context">
                        { or_unavailable(&sections.context, "<p>Context unavailable.</p>") }
                    </div>
                </div>
            </div>
        </>
    }
}

fn build_table(state: &TableState, link: &Scope<DashboardComponent>) -> Html {
    match state {
        TableState::Hidden => html! {},
        TableState::Loading => html! {
            <div id="table-loading" class="table-loading">
                <div class="spinner" />
                <span>{"Loading affected rows..."}</span>
            </div>
        },
        TableState::Empty => html! {
            <div id="table-empty" class="table-empty">{"No affected rows found."}</div>
        },
        TableState::Failed(message) => html! {
            <div id="table-error" class="table-error">
                <span id="table-error-message">{ message.clone() }</span>
            </div>
        },
        TableState::Loaded(table) => build_loaded_table(table, link),
    }
}

fn build_loaded_table(table: &AffectedRowsTable, link: &Scope<DashboardComponent>) -> Html {
    let pagination = match &table.pagination {
        Some(controls) => html! {
            <div id="table-pagination" class="table-pagination">
                <button
                    id="btn-prev-page"
                    disabled={!controls.has_previous}
                    onclick={link.callback(|_| Msg::PreviousPage)}
                >
                    {"Previous"}
                </button>
                <span id="pagination-info">{ controls.label.clone() }</span>
                <button
                    id="btn-next-page"
                    disabled={!controls.has_next}
                    onclick={link.callback(|_| Msg::NextPage)}
                >
                    {"Next"}
                </button>
            </div>
        },
        None => html! {},
    };

    html! {
        <div id="table-container">
            <div id="table-row-count" class="table-caption">{ table.caption.clone() }</div>
            <div class="table-scroll">
                <table class="affected-rows-table">
                    <thead id="table-head">
                        <tr>
                            { for table.columns.iter().map(|col| html! {
                                <th class={col.class}>{ col.label.clone() }</th>
                            }) }
                        </tr>
                    </thead>
                    <tbody id="table-body">
                        { for table.rows.iter().map(|row| html! {
                            <tr>
                                { for row.iter().zip(&table.columns).map(|(value, col)| html! {
                                    <td class={col.class} title={value.clone()}>{ value.clone() }</td>
                                }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
            { pagination }
        </div>
    }
}

fn empty_state(text: &'static str) -> Html {
    html! {
        <div class="empty-state">
            <p class="empty-text">{ text }</p>
        </div>
    }
}
