use alarms_core::{AlertFilters, RuleFilters, SavedSearchStore, Tab, ViewState};
use leptos::*;

/// Query, filters and saved searches of one listing tab
pub struct SearchState<F: 'static> {
    pub query: RwSignal<String>,
    pub filters: RwSignal<F>,
    pub saved: RwSignal<SavedSearchStore<F>>,
}

impl<F: 'static> Clone for SearchState<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for SearchState<F> {}

impl<F: Default + 'static> SearchState<F> {
    pub fn new() -> Self {
        Self {
            query: create_rw_signal(String::new()),
            filters: create_rw_signal(F::default()),
            saved: create_rw_signal(SavedSearchStore::default()),
        }
    }
}

/// Everything the page owns. Created once by `App`, so the tabs can be
/// mounted and unmounted without losing what the user typed or saved.
#[derive(Clone, Copy)]
pub struct PageState {
    pub view_state: RwSignal<ViewState>,
    /// Only changes when the tab does, unlike the rest of `view_state`
    pub tab: Memo<Tab>,
    pub alerts: SearchState<AlertFilters>,
    pub monitors: SearchState<RuleFilters>,
}

impl PageState {
    pub fn new() -> Self {
        let view_state = create_rw_signal(ViewState::default());
        Self {
            view_state,
            tab: create_memo(move |_| view_state.with(|v| v.tab)),
            alerts: SearchState::new(),
            monitors: SearchState::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saved_searches::SAVE_POPOVER;
    use alarms_core::{AlertFacet, RuleFacet};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn view_state_changes_keep_tab_and_search_state() {
        let runtime = create_runtime();
        let page = PageState::new();
        let renders = Rc::new(Cell::new(0));
        create_effect({
            let renders = Rc::clone(&renders);
            move |_| {
                page.tab.get();
                renders.set(renders.get() + 1);
            }
        });
        assert_eq!(renders.get(), 1);

        page.alerts.query.set("disk".to_string());
        page.alerts
            .filters
            .update(|f| f.selection.toggle(AlertFacet::State, "active"));
        let saved_id = page
            .alerts
            .saved
            .try_update(|store| {
                store
                    .save("disk alerts", "disk", &page.alerts.filters.get_untracked())
                    .map(|search| search.id.clone())
            })
            .flatten()
            .unwrap();

        page.view_state.update(|v| v.toggle_facet("State"));
        page.view_state.update(|v| v.open_flyout("a1"));
        page.view_state.update(|v| v.toggle_row("a1"));
        page.view_state.update(|v| v.toggle_popover(SAVE_POPOVER));
        page.view_state.update(|v| v.close_popover());

        assert_eq!(renders.get(), 1);
        assert_eq!(page.alerts.query.get_untracked(), "disk");
        assert_eq!(
            page.alerts
                .filters
                .with_untracked(|f| f.selection.active_count()),
            1
        );
        let (query, filters) = page
            .alerts
            .saved
            .with_untracked(|store| store.load(&saved_id))
            .unwrap();
        assert_eq!(query, "disk");
        assert_eq!(filters, page.alerts.filters.get_untracked());

        page.alerts.saved.update(|store| {
            store.delete(&saved_id);
        });
        assert!(page.alerts.saved.with_untracked(|store| store.is_empty()));

        runtime.dispose();
    }

    #[test]
    fn switching_tabs_keeps_each_tab_filters() {
        let runtime = create_runtime();
        let page = PageState::new();
        page.alerts
            .filters
            .update(|f| f.selection.toggle(AlertFacet::Severity, "critical"));
        page.monitors
            .filters
            .update(|f| f.selection.toggle(RuleFacet::Enabled, "disabled"));

        page.view_state.update(|v| v.switch_tab(Tab::Monitors));
        assert_eq!(page.tab.get_untracked(), Tab::Monitors);
        page.view_state.update(|v| v.switch_tab(Tab::Alerts));
        assert_eq!(page.tab.get_untracked(), Tab::Alerts);

        let critical_kept = page
            .alerts
            .filters
            .with_untracked(|f| f.selection.is_selected(AlertFacet::Severity, "critical"));
        assert!(critical_kept);
        let disabled_kept = page
            .monitors
            .filters
            .with_untracked(|f| f.selection.is_selected(RuleFacet::Enabled, "disabled"));
        assert!(disabled_kept);

        runtime.dispose();
    }
}
