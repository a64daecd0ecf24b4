use alarms_core::{ListingState, RuleOverlay};
use api_structs::{Alert, Datasource};
use leptos::*;

#[component]
pub fn DatasourcesTab(
    datasources: Signal<Vec<Datasource>>,
    alerts: Signal<Vec<Alert>>,
    overlay: RwSignal<RuleOverlay>,
    loading: Signal<bool>,
) -> impl IntoView {
    let rows = move || {
        let rules = overlay.with(RuleOverlay::visible);
        alerts.with(|alerts| {
            datasources
                .get()
                .into_iter()
                .map(|ds| {
                    let alert_count = alerts.iter().filter(|a| a.datasource_id == ds.id).count();
                    let rule_count = rules.iter().filter(|r| r.datasource_id == ds.id).count();
                    view! {
                        <tr class="row-container">
                            <td class="alarm-table__cell">{ds.name}</td>
                            <td class="alarm-table__cell">{ds.kind.display_name().to_string()}</td>
                            <td class="alarm-table__cell">{ds.url}</td>
                            <td class="alarm-table__cell">{if ds.enabled { "enabled" } else { "disabled" }}</td>
                            <td class="alarm-table__cell">{alert_count}</td>
                            <td class="alarm-table__cell">{rule_count}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };
    let view = move || {
        if loading.get() {
            return view! { <div class="empty">"Loading datasources..."</div> }.into_view();
        }
        let total = datasources.with(Vec::len);
        if let Some(message) = ListingState::new(total, total).message("datasources") {
            return view! { <div class="empty">{message}</div> }.into_view();
        }
        view! {
            <table class="alarm-table">
                <tr>
                    <th class="alarm-table__cell">"Name"</th>
                    <th class="alarm-table__cell">"Type"</th>
                    <th class="alarm-table__cell">"URL"</th>
                    <th class="alarm-table__cell">"Status"</th>
                    <th class="alarm-table__cell">"Alerts"</th>
                    <th class="alarm-table__cell">"Monitors"</th>
                </tr>
                {rows}
            </table>
        }
        .into_view()
    };
    view! {
        <div class="page">
            <div class="listing">{view}</div>
        </div>
    }
}
