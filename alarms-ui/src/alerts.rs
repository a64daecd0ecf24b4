use crate::datetime::{printable_age_since, printable_local_date};
use crate::facet_panel::{facet_sections, FacetPanel};
use crate::page_state::SearchState;
use crate::saved_searches::saved_search_bar;
use alarms_core::grouping::group_alerts;
use alarms_core::summary::AlertCounts;
use alarms_core::{
    AlertFacet, AlertFilters, AlertGroupBy, DatasourceDirectory, InsightProvider, ListingState,
    TemplateInsights, ViewState,
};
use api_structs::{Alert, AlertState};
use leptos::logging::log;
use leptos::*;

pub fn severity_badge(severity: api_structs::Severity) -> impl IntoView {
    view! {
        <span class=format!("badge severity--{}", severity.as_str())>{severity.as_str()}</span>
    }
}

#[component]
pub fn AlertsTab(
    alerts: Signal<Vec<Alert>>,
    directory: Signal<DatasourceDirectory>,
    loading: Signal<bool>,
    view_state: RwSignal<ViewState>,
    search: SearchState<AlertFilters>,
) -> impl IntoView {
    let SearchState { query, filters, .. } = search;

    let visible = create_memo(move |_| {
        alerts.with(|alerts| filters.with(|f| f.apply(alerts, &query.get())))
    });
    let listing = Signal::derive(move || {
        ListingState::new(alerts.with(Vec::len), visible.with(Vec::len))
    });
    let sections = Signal::derive(move || {
        alerts.with(|alerts| {
            filters.with(|f| {
                facet_sections(&alerts[..], &f.selection, AlertFacet::title, move |choice| {
                    filters.update(|f| choice.apply(&mut f.selection))
                })
            })
        })
    });
    let active_count = Signal::derive(move || filters.with(|f| f.selection.active_count()));
    let on_clear = Callback::new(move |_| filters.update(|f| f.selection.clear()));

    let counts = move || {
        let counts = alerts.with(|alerts| AlertCounts::new(alerts));
        format!(
            "{} alerts, {} active, {} pending, {} acknowledged",
            counts.total,
            counts.in_state(AlertState::Active),
            counts.in_state(AlertState::Pending),
            counts.in_state(AlertState::Acknowledged)
        )
    };

    let group_by_options = AlertGroupBy::ALL
        .iter()
        .map(|by| {
            let by = *by;
            view! {
                <option
                    value=by.title()
                    selected=move || filters.with(|f| f.group_by == by)
                >
                    {format!("Group by: {}", by.title())}
                </option>
            }
        })
        .collect_view();
    let on_group_by = move |ev: leptos::ev::Event| {
        let selected = event_target_value(&ev);
        if let Some(by) = AlertGroupBy::ALL.iter().find(|by| by.title() == selected) {
            filters.update(|f| f.group_by = *by);
        }
    };

    let listing_view = move || {
        if loading.get() {
            return view! { <div class="empty">"Loading alerts..."</div> }.into_view();
        }
        if let Some(message) = listing.get().message("alerts") {
            return view! { <div class="empty">{message}</div> }.into_view();
        }
        let by = filters.with(|f| f.group_by);
        let directory = directory.get();
        match by {
            AlertGroupBy::None => alerts_table(visible.get(), &directory, view_state).into_view(),
            _ => group_alerts(&visible.get(), by)
                .into_iter()
                .map(|bucket| {
                    let key = bucket.key.clone();
                    let title = match by {
                        AlertGroupBy::Datasource => directory.display_name(&bucket.key).to_string(),
                        _ => bucket.key.clone(),
                    };
                    let breakdown = bucket
                        .aggregates
                        .by_severity
                        .iter()
                        .map(|(severity, count)| format!("{count} {severity}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let expanded = {
                        let key = key.clone();
                        Signal::derive(move || view_state.with(|v| v.is_group_expanded(&key)))
                    };
                    let count = bucket.count();
                    let table = alerts_table(bucket.members, &directory, view_state);
                    view! {
                        <div class="group">
                            <div
                                class="group__header"
                                on:click=move |_| view_state.update(|v| v.toggle_group(&key))
                            >
                                <span>{move || if expanded.get() { "v" } else { ">" }}</span>
                                <span>{format!("{} ({})", title, count)}</span>
                                <span class="group__breakdown">{breakdown}</span>
                            </div>
                            <div style:display=move || if expanded.get() { "block" } else { "none" }>
                                {table}
                            </div>
                        </div>
                    }
                })
                .collect_view(),
        }
    };

    let flyout = move || {
        let id = view_state.with(|v| v.flyout().map(str::to_string))?;
        let all = alerts.get();
        let alert = all.iter().find(|a| a.id == id)?.clone();
        let directory = directory.get();
        let bundle = TemplateInsights::new(&all, &directory).summarize(&alert);
        Some(alert_flyout(alert, bundle, &directory, view_state))
    };

    view! {
        <div class="page">
            <FacetPanel
                sections=sections
                view_state=view_state
                active_count=active_count
                on_clear=on_clear
            />
            <div class="listing">
                <div class="toolbar">
                    <input
                        type="search"
                        placeholder="Search alerts"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <select on:change=on_group_by>
                        {group_by_options}
                    </select>
                    <span class="facet-panel__count">{counts}</span>
                </div>
                {saved_search_bar(search, view_state)}
                {listing_view}
            </div>
            {flyout}
        </div>
    }
}

fn alerts_table(
    alerts: Vec<Alert>,
    directory: &DatasourceDirectory,
    view_state: RwSignal<ViewState>,
) -> impl IntoView {
    let rows = alerts
        .into_iter()
        .map(|alert| {
            let id = alert.id.clone();
            let datasource = directory.display_name(&alert.datasource_id).to_string();
            view! {
                <tr class="row-container" on:click=move |_| view_state.update(|v| v.open_flyout(&id))>
                    <td class="alarm-table__cell">{severity_badge(alert.severity)}</td>
                    <td class="alarm-table__cell">{alert.name}</td>
                    <td class="alarm-table__cell">{alert.state.as_str()}</td>
                    <td class="alarm-table__cell">{datasource}</td>
                    <td class="alarm-table__cell">{alert.message}</td>
                    <td class="alarm-table__cell">{printable_age_since(alert.start_time)}</td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <table class="alarm-table">
            <tr>
                <th class="alarm-table__cell">"Severity"</th>
                <th class="alarm-table__cell">"Name"</th>
                <th class="alarm-table__cell">"State"</th>
                <th class="alarm-table__cell">"Datasource"</th>
                <th class="alarm-table__cell">"Message"</th>
                <th class="alarm-table__cell">"Started"</th>
            </tr>
            {rows}
        </table>
    }
}

fn key_values(map: &api_structs::Labels) -> impl IntoView {
    map.iter()
        .map(|(key, value)| {
            view! { <p style="margin: 2px 0">{format!("{key}={value}")}</p> }
        })
        .collect_view()
}

fn alert_flyout(
    alert: Alert,
    bundle: alarms_core::InsightBundle,
    directory: &DatasourceDirectory,
    view_state: RwSignal<ViewState>,
) -> impl IntoView {
    let impact = bundle
        .impact
        .into_iter()
        .map(|entity| view! { <li>{format!("{}: {}", entity.kind, entity.name)}</li> })
        .collect_view();
    let related = bundle
        .related
        .into_iter()
        .map(|related| {
            let id = related.id.clone();
            view! {
                <li style="cursor: pointer" on:click=move |_| view_state.update(|v| v.open_flyout(&id))>
                    {format!(
                        "{} ({}, {}) {:.0}%",
                        related.name,
                        related.state,
                        related.severity,
                        related.correlation * 100.0
                    )}
                </li>
            }
        })
        .collect_view();
    let (low, high) = bundle
        .series
        .iter()
        .fold((f64::MAX, f64::MIN), |(low, high), point| {
            (low.min(point.value), high.max(point.value))
        });
    let raw = serde_json::to_string_pretty(&alert.raw).unwrap_or_default();
    let name = alert.name.clone();
    view! {
        <div class="flyout">
            <div class="toolbar">
                <h3 style="flex-grow: 1">{name}</h3>
                <button
                    class="button"
                    on:click=move |_| log!("Acknowledge is not sent anywhere yet")
                >
                    "Acknowledge"
                </button>
                <button class="button" on:click=move |_| view_state.update(|v| v.close_flyout())>
                    "Close"
                </button>
            </div>
            <p>{severity_badge(alert.severity)}" "{alert.state.as_str()}</p>
            <p>{format!("Datasource: {}", directory.display_name(&alert.datasource_id))}</p>
            <p>{format!("Started: {}", printable_local_date(alert.start_time))}</p>
            <p>{format!("Last updated: {}", printable_local_date(alert.last_updated))}</p>
            <h4>"Summary"</h4>
            <p>{bundle.summary}</p>
            <h4>"Likely cause"</h4>
            <p>{bundle.root_cause}</p>
            <h4>"Recommendation"</h4>
            <p>{bundle.recommendation}</p>
            <h4>"Impact"</h4>
            <ul>{impact}</ul>
            <h4>"Last 24h"</h4>
            <p>{format!("{} points, between {:.1} and {:.1}", bundle.series.len(), low, high)}</p>
            <h4>"Related alerts"</h4>
            <ul>{related}</ul>
            <h4>"Labels"</h4>
            {key_values(&alert.labels)}
            <h4>"Annotations"</h4>
            {key_values(&alert.annotations)}
            <h4>"Raw"</h4>
            <pre>{raw}</pre>
        </div>
    }
}
