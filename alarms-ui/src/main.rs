use alarms_core::loader::{load, LoadStatus};
use alarms_core::{DatasourceDirectory, RecordSet, RuleOverlay, Subscription, Tab};
use leptos::logging::log;
use leptos::*;

mod alerts;
mod api;
mod datasources;
mod datetime;
mod facet_panel;
mod monitors;
mod page_state;
mod saved_searches;

use alerts::AlertsTab;
use datasources::DatasourcesTab;
use monitors::MonitorsTab;
use page_state::PageState;

/// Empty means same origin as the UI
const API_SERVER_URL_NO_TRAILING_SLASH: &str =
    match option_env!("API_SERVER_URL_NO_TRAILING_SLASH") {
        Some(url) => url,
        None => "",
    };

fn main() {
    _ = console_log::init();
    console_error_panic_hook::set_once();
    mount_to_body(|| view! {   <App/> });
    log!("Loaded up!");
}

#[component]
pub fn App() -> impl IntoView {
    let (records, set_records) = create_signal(RecordSet::default());
    let (loading, set_loading) = create_signal(true);
    let overlay = create_rw_signal(RuleOverlay::default());
    let page_state = PageState::new();
    let view_state = page_state.view_state;

    let subscription = Subscription::new();
    on_cleanup({
        let subscription = subscription.clone();
        move || subscription.cancel()
    });
    spawn_local(async move {
        let source = api::HttpSource::new(API_SERVER_URL_NO_TRAILING_SLASH);
        let Some(outcome) = load(&source, &subscription).await else {
            log!("Page went away before the load finished");
            return;
        };
        if let LoadStatus::Degraded(e) = &outcome.status {
            log!("Failed to load alarms data, showing empty lists: {}", e);
        }
        overlay.set(RuleOverlay::new(outcome.records.rules.clone()));
        set_records.set(outcome.records);
        set_loading.set(false);
    });

    let alerts = Signal::derive(move || records.with(|r| r.alerts.clone()));
    let datasources = Signal::derive(move || records.with(|r| r.datasources.clone()));
    let directory = Signal::derive(move || records.with(|r| DatasourceDirectory::new(&r.datasources)));
    let loading = Signal::derive(move || loading.get());

    let tab_buttons = Tab::ALL
        .iter()
        .map(|tab| {
            let tab = *tab;
            view! {
                <button
                    class="navigation__button"
                    class=("navigation__button--active", move || page_state.tab.get() == tab)
                    on:click=move |_| view_state.update(|v| v.switch_tab(tab))
                >
                    {tab.title()}
                </button>
            }
        })
        .collect_view();

    let page = move || match page_state.tab.get() {
        Tab::Alerts => view! {
            <AlertsTab
                alerts=alerts
                directory=directory
                loading=loading
                view_state=view_state
                search=page_state.alerts
            />
        }
        .into_view(),
        Tab::Monitors => view! {
            <MonitorsTab
                overlay=overlay
                datasources=datasources
                directory=directory
                loading=loading
                view_state=view_state
                search=page_state.monitors
            />
        }
        .into_view(),
        Tab::Datasources => view! {
            <DatasourcesTab
                datasources=datasources
                alerts=alerts
                overlay=overlay
                loading=loading
            />
        }
        .into_view(),
    };

    view! {
        <>
            <header>
                <nav class="navigation">
                    {tab_buttons}
                </nav>
            </header>
            {page}
        </>
    }
}
