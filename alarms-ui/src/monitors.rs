use crate::alerts::severity_badge;
use crate::datetime::{printable_age_since, printable_local_date};
use crate::facet_panel::{facet_sections, FacetPanel};
use crate::page_state::SearchState;
use crate::saved_searches::saved_search_bar;
use alarms_core::grouping::group_rules;
use alarms_core::summary::RuleCounts;
use alarms_core::templates::wizard_templates;
use alarms_core::{
    DatasourceDirectory, ListingState, RuleDraft, RuleFacet, RuleFilters, RuleGroupBy,
    RuleOverlay, ViewState,
};
use api_structs::rule::{ComparisonOperator, Threshold};
use api_structs::{Datasource, Labels, MonitorType, Rule, RuleStatus, Severity};
use leptos::logging::log;
use leptos::*;
use std::str::FromStr;

const CREATE_POPOVER: &str = "create-monitor";
const WIZARD_POPOVER: &str = "monitor-wizard";

#[component]
pub fn MonitorsTab(
    overlay: RwSignal<RuleOverlay>,
    datasources: Signal<Vec<Datasource>>,
    directory: Signal<DatasourceDirectory>,
    loading: Signal<bool>,
    view_state: RwSignal<ViewState>,
    search: SearchState<RuleFilters>,
) -> impl IntoView {
    let SearchState { query, filters, .. } = search;

    let rules = create_memo(move |_| overlay.with(RuleOverlay::visible));
    let visible = create_memo(move |_| {
        rules.with(|rules| filters.with(|f| f.apply(rules, &query.get())))
    });
    let listing = Signal::derive(move || {
        ListingState::new(rules.with(Vec::len), visible.with(Vec::len))
    });
    let sections = Signal::derive(move || {
        rules.with(|rules| {
            filters.with(|f| {
                facet_sections(&rules[..], &f.selection, RuleFacet::title, move |choice| {
                    filters.update(|f| choice.apply(&mut f.selection))
                })
            })
        })
    });
    let active_count = Signal::derive(move || filters.with(|f| f.selection.active_count()));
    let on_clear = Callback::new(move |_| filters.update(|f| f.selection.clear()));

    let counts = move || {
        let counts = rules.with(|rules| RuleCounts::new(rules));
        format!(
            "{} monitors, {} enabled, {} disabled, {} muted",
            counts.total, counts.enabled, counts.disabled, counts.muted
        )
    };
    let selected_count = move || view_state.with(|v| v.selected_rows().count());
    let delete_selected = move |_| {
        let ids: Vec<String> =
            view_state.with_untracked(|v| v.selected_rows().map(str::to_string).collect());
        overlay.update(|overlay| {
            overlay.delete(&ids);
        });
        view_state.update(|v| v.clear_selection());
    };

    let group_by_options = RuleGroupBy::ALL
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
        if let Some(by) = RuleGroupBy::ALL.iter().find(|by| by.title() == selected) {
            filters.update(|f| f.group_by = *by);
        }
    };

    let listing_view = move || {
        if loading.get() {
            return view! { <div class="empty">"Loading monitors..."</div> }.into_view();
        }
        if let Some(message) = listing.get().message("monitors") {
            return view! { <div class="empty">{message}</div> }.into_view();
        }
        let by = filters.with(|f| f.group_by);
        let directory = directory.get();
        match by {
            RuleGroupBy::None => {
                rules_table(visible.get(), &directory, overlay, view_state).into_view()
            }
            _ => group_rules(&visible.get(), by)
                .into_iter()
                .map(|bucket| {
                    let key = bucket.key.clone();
                    let title = match by {
                        RuleGroupBy::Datasource => directory.display_name(&bucket.key).to_string(),
                        _ => bucket.key.clone(),
                    };
                    let breakdown = format!(
                        "{} enabled, {} disabled",
                        bucket.aggregates.enabled, bucket.aggregates.disabled
                    );
                    let expanded = {
                        let key = key.clone();
                        Signal::derive(move || view_state.with(|v| v.is_group_expanded(&key)))
                    };
                    let count = bucket.count();
                    let table = rules_table(bucket.members, &directory, overlay, view_state);
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
        let rule = overlay.with(|overlay| overlay.get(&id))?;
        Some(rule_flyout(rule, &directory.get(), view_state))
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
                        placeholder="Search monitors"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <select on:change=on_group_by>
                        {group_by_options}
                    </select>
                    <button
                        class="button button--danger"
                        disabled=move || selected_count() == 0
                        on:click=delete_selected
                    >
                        {move || format!("Delete selected ({})", selected_count())}
                    </button>
                    <button
                        class="button"
                        on:click=move |_| view_state.update(|v| v.toggle_popover(CREATE_POPOVER))
                    >
                        "Create monitor"
                    </button>
                    <button
                        class="button"
                        on:click=move |_| view_state.update(|v| v.toggle_popover(WIZARD_POPOVER))
                    >
                        "Suggest monitors"
                    </button>
                    <span class="facet-panel__count">{counts}</span>
                </div>
                <Show when=move || view_state.with(|v| v.is_popover_open(CREATE_POPOVER))>
                    <CreateMonitorForm overlay=overlay datasources=datasources view_state=view_state/>
                </Show>
                <Show when=move || view_state.with(|v| v.is_popover_open(WIZARD_POPOVER))>
                    <MonitorWizard overlay=overlay datasources=datasources view_state=view_state/>
                </Show>
                {saved_search_bar(search, view_state)}
                {listing_view}
            </div>
            {flyout}
        </div>
    }
}

fn rules_table(
    rules: Vec<Rule>,
    directory: &DatasourceDirectory,
    overlay: RwSignal<RuleOverlay>,
    view_state: RwSignal<ViewState>,
) -> impl IntoView {
    let rows = rules
        .into_iter()
        .map(|rule| {
            let id = rule.id.clone();
            let datasource = directory.display_name(&rule.datasource_id).to_string();
            let silence_label = match rule.status {
                RuleStatus::Muted => "Unmute",
                _ => "Silence",
            };
            let checked = {
                let id = id.clone();
                move || view_state.with(|v| v.is_row_selected(&id))
            };
            let on_check = {
                let id = id.clone();
                move |_| view_state.update(|v| v.toggle_row(&id))
            };
            let on_open = {
                let id = id.clone();
                move |_| view_state.update(|v| v.open_flyout(&id))
            };
            let on_silence = {
                let id = id.clone();
                move |_| {
                    let status = overlay
                        .try_update(|overlay| overlay.toggle_silence(&id))
                        .flatten();
                    log!("Monitor {} is now {:?}", id, status);
                }
            };
            let on_clone = {
                let rule = rule.clone();
                move |_| {
                    overlay.update(|overlay| {
                        overlay.clone_rule(&rule);
                    })
                }
            };
            view! {
                <tr class="row-container">
                    <td class="alarm-table__cell">
                        <input type="checkbox" prop:checked=checked on:change=on_check/>
                    </td>
                    <td class="alarm-table__cell" on:click=on_open.clone()>{severity_badge(rule.severity)}</td>
                    <td class="alarm-table__cell" on:click=on_open.clone()>{rule.name}</td>
                    <td class="alarm-table__cell" on:click=on_open.clone()>{rule.status.as_str()}</td>
                    <td class="alarm-table__cell" on:click=on_open.clone()>{rule.health_status.as_str()}</td>
                    <td class="alarm-table__cell" on:click=on_open.clone()>{rule.monitor_type.as_str()}</td>
                    <td class="alarm-table__cell" on:click=on_open>{datasource}</td>
                    <td class="alarm-table__cell">{if rule.enabled { "enabled" } else { "disabled" }}</td>
                    <td class="alarm-table__cell">
                        <button class="button" on:click=on_silence>{silence_label}</button>
                        <button class="button" on:click=on_clone>"Clone"</button>
                    </td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <table class="alarm-table">
            <tr>
                <th class="alarm-table__cell"></th>
                <th class="alarm-table__cell">"Severity"</th>
                <th class="alarm-table__cell">"Name"</th>
                <th class="alarm-table__cell">"Status"</th>
                <th class="alarm-table__cell">"Health"</th>
                <th class="alarm-table__cell">"Type"</th>
                <th class="alarm-table__cell">"Datasource"</th>
                <th class="alarm-table__cell">"Enabled"</th>
                <th class="alarm-table__cell"></th>
            </tr>
            {rows}
        </table>
    }
}

fn rule_flyout(
    rule: Rule,
    directory: &DatasourceDirectory,
    view_state: RwSignal<ViewState>,
) -> impl IntoView {
    let history = rule
        .alert_history
        .iter()
        .map(|entry| {
            view! {
                <li>{format!(
                    "{} {} {}",
                    printable_local_date(entry.timestamp),
                    entry.state,
                    entry.message
                )}</li>
            }
        })
        .collect_view();
    let routing = rule
        .notification_routing
        .iter()
        .map(|route| view! { <li>{format!("{}: {}", route.channel, route.destination)}</li> })
        .collect_view();
    let labels = rule
        .labels
        .iter()
        .map(|(key, value)| view! { <p style="margin: 2px 0">{format!("{key}={value}")}</p> })
        .collect_view();
    let threshold = format!(
        "{} {} {}",
        rule.threshold.operator, rule.threshold.value, rule.threshold.unit
    );
    view! {
        <div class="flyout">
            <div class="toolbar">
                <h3 style="flex-grow: 1">{rule.name.clone()}</h3>
                <button class="button" on:click=move |_| view_state.update(|v| v.close_flyout())>
                    "Close"
                </button>
            </div>
            <p>{severity_badge(rule.severity)}" "{rule.status.as_str()}" / "{rule.health_status.as_str()}</p>
            <p>{format!("Datasource: {}", directory.display_name(&rule.datasource_id))}</p>
            <p>{format!("Group: {}", rule.group.clone().unwrap_or_default())}</p>
            <p>{format!("Created by {} {}", rule.created_by, printable_age_since(rule.created_at))}</p>
            <p>{format!("Last modified: {}", printable_local_date(rule.last_modified))}</p>
            <h4>"Query"</h4>
            <pre>{rule.query.clone()}</pre>
            <h4>"Condition"</h4>
            <p>{rule.condition.clone()}</p>
            <p>{threshold}</p>
            <h4>"Labels"</h4>
            {labels}
            <h4>"Alert history"</h4>
            <ul>{history}</ul>
            <h4>"Notifications"</h4>
            <ul>{routing}</ul>
            {rule.ai_summary.clone().map(|summary| view! { <h4>"Summary"</h4><p>{summary}</p> })}
        </div>
    }
}

fn datasource_options(datasources: Signal<Vec<Datasource>>) -> impl IntoView {
    move || {
        datasources
            .get()
            .into_iter()
            .map(|ds| view! { <option value=ds.id.clone()>{ds.name}</option> })
            .collect_view()
    }
}

#[component]
fn CreateMonitorForm(
    overlay: RwSignal<RuleOverlay>,
    datasources: Signal<Vec<Datasource>>,
    view_state: RwSignal<ViewState>,
) -> impl IntoView {
    let name = create_rw_signal(String::new());
    let datasource_id = create_rw_signal(
        datasources.with_untracked(|ds| ds.first().map(|ds| ds.id.clone()).unwrap_or_default()),
    );
    let query = create_rw_signal(String::new());
    let condition = create_rw_signal(String::new());
    let threshold = create_rw_signal(String::from("0"));
    let severity = create_rw_signal(Severity::Medium);
    let monitor_type = create_rw_signal(MonitorType::Metric);
    let enabled = create_rw_signal(true);
    let group = create_rw_signal(String::new());
    let (error_r, error_w) = create_signal(Option::<String>::None);

    let submit = move |_| {
        let datasource_id = datasource_id.get_untracked();
        let datasource_type = datasources.with_untracked(|ds| {
            ds.iter()
                .find(|ds| ds.id == datasource_id)
                .map(|ds| ds.kind.clone())
        });
        let Some(datasource_type) = datasource_type else {
            error_w.set(Some("a datasource must be selected".to_string()));
            return;
        };
        let draft = RuleDraft {
            name: name.get_untracked(),
            datasource_id,
            datasource_type,
            severity: severity.get_untracked(),
            monitor_type: monitor_type.get_untracked(),
            query: query.get_untracked(),
            condition: condition.get_untracked(),
            threshold: Threshold {
                operator: ComparisonOperator::GreaterThan,
                value: threshold.get_untracked().trim().parse().unwrap_or(0.0),
                unit: String::new(),
            },
            enabled: enabled.get_untracked(),
            group: Some(group.get_untracked()),
            labels: Labels::new(),
            annotations: Labels::new(),
        };
        match overlay.try_update(|overlay| overlay.create(draft)) {
            Some(Ok(rule)) => {
                log!("Created monitor {}", rule.id);
                error_w.set(None);
                view_state.update(|v| v.close_popover());
            }
            Some(Err(e)) => error_w.set(Some(e.to_string())),
            None => {}
        }
    };

    let severity_options = Severity::ALL
        .iter()
        .map(|s| {
            let default = *s == Severity::Medium;
            view! { <option value=s.as_str() selected=default>{s.as_str()}</option> }
        })
        .collect_view();
    let type_options = MonitorType::ALL
        .iter()
        .map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
        .collect_view();

    view! {
        <div class="form popover">
            <h4>"New monitor"</h4>
            <div class="toolbar">
                <input type="text" placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))/>
                <select on:change=move |ev| datasource_id.set(event_target_value(&ev))>
                    {datasource_options(datasources)}
                </select>
                <select on:change=move |ev| {
                    if let Ok(s) = Severity::from_str(&event_target_value(&ev)) {
                        severity.set(s)
                    }
                }>
                    {severity_options}
                </select>
                <select on:change=move |ev| {
                    if let Ok(t) = MonitorType::from_str(&event_target_value(&ev)) {
                        monitor_type.set(t)
                    }
                }>
                    {type_options}
                </select>
            </div>
            <div class="toolbar">
                <input type="text" placeholder="Query" style="flex-grow: 1"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))/>
            </div>
            <div class="toolbar">
                <input type="text" placeholder="Condition"
                    prop:value=move || condition.get()
                    on:input=move |ev| condition.set(event_target_value(&ev))/>
                <span>"Above"</span>
                <input type="number"
                    prop:value=move || threshold.get()
                    on:input=move |ev| threshold.set(event_target_value(&ev))/>
                <input type="text" placeholder="Group"
                    prop:value=move || group.get()
                    on:input=move |ev| group.set(event_target_value(&ev))/>
                <label>
                    <input type="checkbox"
                        prop:checked=move || enabled.get()
                        on:change=move |ev| enabled.set(event_target_checked(&ev))/>
                    "Enabled"
                </label>
            </div>
            <p style="color: #f87171">{move || error_r.get()}</p>
            <button class="button" on:click=submit>"Create"</button>
        </div>
    }
}

#[component]
fn MonitorWizard(
    overlay: RwSignal<RuleOverlay>,
    datasources: Signal<Vec<Datasource>>,
    view_state: RwSignal<ViewState>,
) -> impl IntoView {
    let datasource_id = create_rw_signal(
        datasources.with_untracked(|ds| ds.first().map(|ds| ds.id.clone()).unwrap_or_default()),
    );
    let drafts = move || {
        let id = datasource_id.get();
        datasources.with(|ds| {
            ds.iter()
                .find(|ds| ds.id == id)
                .map(wizard_templates)
                .unwrap_or_default()
        })
    };
    let preview = move || {
        drafts()
            .into_iter()
            .map(|draft| {
                view! {
                    <li>
                        {severity_badge(draft.severity)}" "{draft.name}
                        <pre style="margin: 2px 0">{draft.query}</pre>
                    </li>
                }
            })
            .collect_view()
    };
    let accept = move |_| {
        let created = overlay
            .try_update(|overlay| overlay.create_many(drafts()))
            .map(|rules| rules.len())
            .unwrap_or(0);
        log!("Wizard created {} monitor(s)", created);
        view_state.update(|v| v.close_popover());
    };
    view! {
        <div class="form popover">
            <h4>"Suggested monitors"</h4>
            <select on:change=move |ev| datasource_id.set(event_target_value(&ev))>
                {datasource_options(datasources)}
            </select>
            <ul>{preview}</ul>
            <button class="button" on:click=accept>"Create all"</button>
        </div>
    }
}
