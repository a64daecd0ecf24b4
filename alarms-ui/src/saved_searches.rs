use crate::page_state::SearchState;
use alarms_core::ViewState;
use leptos::logging::log;
use leptos::*;

pub(crate) const SAVE_POPOVER: &str = "save-search";

/// Save button plus one chip per saved search. Loading a chip replaces the
/// active query and filters wholesale.
pub fn saved_search_bar<F>(
    search: SearchState<F>,
    view_state: RwSignal<ViewState>,
) -> impl IntoView
where
    F: Clone + 'static,
{
    let SearchState {
        query,
        filters,
        saved: store,
    } = search;
    let (name_r, name_w) = create_signal(String::new());
    let save = move |_| {
        let name = name_r.get();
        let saved = store
            .try_update(|entries| {
                entries
                    .save(&name, &query.get_untracked(), &filters.get_untracked())
                    .is_some()
            })
            .unwrap_or(false);
        if saved {
            name_w.set(String::new());
            view_state.update(|v| v.close_popover());
        } else {
            log!("Not saving a search without a name");
        }
    };
    let chips = move || {
        store.with(|entries| {
            entries
                .list()
                .iter()
                .map(|entry| {
                    let load_id = entry.id.clone();
                    let delete_id = entry.id.clone();
                    let on_load = move |_| {
                        if let Some((saved_query, saved_filters)) =
                            store.with_untracked(|entries| entries.load(&load_id))
                        {
                            query.set(saved_query);
                            filters.set(saved_filters);
                        }
                    };
                    let on_delete = move |_| {
                        store.update(|entries| {
                            entries.delete(&delete_id);
                        })
                    };
                    view! {
                        <span class="badge severity--info">
                            <a style="cursor: pointer" on:click=on_load>{entry.name.clone()}</a>
                            " "
                            <a style="cursor: pointer" on:click=on_delete>"x"</a>
                        </span>
                    }
                })
                .collect_view()
        })
    };
    view! {
        <div class="saved-searches">
            <span>"Saved searches:"</span>
            {chips}
            <button
                class="button"
                on:click=move |_| view_state.update(|v| v.toggle_popover(SAVE_POPOVER))
            >
                "Save current"
            </button>
            <Show when=move || view_state.with(|v| v.is_popover_open(SAVE_POPOVER))>
                <div class="popover">
                    <input
                        type="text"
                        placeholder="Name"
                        prop:value=move || name_r.get()
                        on:input=move |ev| name_w.set(event_target_value(&ev))
                    />
                    <button class="button" on:click=save>"Save"</button>
                </div>
            </Show>
        </div>
    }
}
