use alarms_core::{FacetIndex, FacetSelection, FacetedRecord, ViewState};
use leptos::*;
use std::rc::Rc;

/// One click in the facet panel
#[derive(Debug, Clone, PartialEq)]
pub enum FacetChoice<K> {
    Fixed(K, String),
    Label(String, String),
}

impl<K: Ord + Copy> FacetChoice<K> {
    pub fn apply(self, selection: &mut FacetSelection<K>) {
        match self {
            FacetChoice::Fixed(facet, value) => selection.toggle(facet, &value),
            FacetChoice::Label(key, value) => selection.toggle_label(&key, &value),
        }
    }
}

#[derive(Clone)]
pub struct FacetOption {
    pub value: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Clone)]
pub struct FacetSection {
    pub title: String,
    pub options: Vec<FacetOption>,
    on_toggle: Rc<dyn Fn(String)>,
}

/// Sections for every fixed facet followed by one per label key. Counts come
/// from the whole collection, not from what the current filters leave.
pub fn facet_sections<R, F>(
    records: &[R],
    selection: &FacetSelection<R::Facet>,
    title_of: fn(&R::Facet) -> &'static str,
    on_choice: F,
) -> Vec<FacetSection>
where
    R: FacetedRecord,
    F: Fn(FacetChoice<R::Facet>) + Clone + 'static,
{
    let index = FacetIndex::build(records);
    let mut sections = vec![];
    for (facet, values) in index.facets() {
        let facet = *facet;
        let on_choice = on_choice.clone();
        sections.push(FacetSection {
            title: title_of(&facet).to_string(),
            options: values
                .options()
                .map(|(value, count)| FacetOption {
                    value: value.to_string(),
                    count,
                    selected: selection.is_selected(facet, value),
                })
                .collect(),
            on_toggle: Rc::new(move |value| on_choice(FacetChoice::Fixed(facet, value))),
        });
    }
    for (key, values) in index.label_facets() {
        let label_key = key.to_string();
        let on_choice = on_choice.clone();
        sections.push(FacetSection {
            title: format!("label: {key}"),
            options: values
                .options()
                .map(|(value, count)| FacetOption {
                    value: value.to_string(),
                    count,
                    selected: selection.is_label_selected(key, value),
                })
                .collect(),
            on_toggle: Rc::new(move |value| {
                on_choice(FacetChoice::Label(label_key.clone(), value))
            }),
        });
    }
    sections
}

#[component]
pub fn FacetPanel(
    #[prop(into)] sections: Signal<Vec<FacetSection>>,
    view_state: RwSignal<ViewState>,
    #[prop(into)] active_count: Signal<usize>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let sections_view = move || {
        sections
            .get()
            .into_iter()
            .map(|section| {
                let title = section.title.clone();
                let collapsed = {
                    let title = title.clone();
                    Signal::derive(move || view_state.with(|v| v.is_facet_collapsed(&title)))
                };
                let toggle_collapsed = {
                    let title = title.clone();
                    move |_| view_state.update(|v| v.toggle_facet(&title))
                };
                let options = section
                    .options
                    .into_iter()
                    .map(|option| {
                        let on_toggle = Rc::clone(&section.on_toggle);
                        let value = option.value.clone();
                        view! {
                            <label class="facet-panel__option">
                                <span>
                                    <input
                                        type="checkbox"
                                        prop:checked=option.selected
                                        on:change=move |_| on_toggle(value.clone())
                                    />
                                    {option.value}
                                </span>
                                <span class="facet-panel__count">{option.count}</span>
                            </label>
                        }
                    })
                    .collect_view();
                view! {
                    <div>
                        <div class="facet-panel__title" on:click=toggle_collapsed>
                            <span>{title}</span>
                            <span>{move || if collapsed.get() { "+" } else { "-" }}</span>
                        </div>
                        <div style:display=move || if collapsed.get() { "none" } else { "block" }>
                            {options}
                        </div>
                    </div>
                }
            })
            .collect_view()
    };
    view! {
        <aside class="facet-panel">
            <div class="toolbar">
                <span>{move || format!("{} filter(s) active", active_count.get())}</span>
                <button
                    class="button"
                    disabled=move || active_count.get() == 0
                    on:click=move |_| on_clear.call(())
                >
                    "Clear"
                </button>
            </div>
            {sections_view}
        </aside>
    }
}
