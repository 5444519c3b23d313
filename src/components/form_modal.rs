//! Form Modal Component
//!
//! Create/edit form rendered from a resource's `FieldSpec` list.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::ListParams;
use crate::context::use_app_context;
use crate::crud::{Crud, FormMode};
use crate::forms::{remote_option, split_lines, FieldKind, FieldSpec, FieldValue};
use crate::media::media_url;
use crate::resource::AdminResource;
use crate::task::TaskScope;

#[component]
pub fn FormModal<R: AdminResource>(crud: Crud<R>) -> impl IntoView {
    view! {
        {move || {
            let mode = crud.mode.get();
            mode.is_open().then(|| {
                let heading = match mode {
                    FormMode::Edit(_) => format!("Edit {}", R::SINGULAR),
                    _ => format!("Add {}", R::SINGULAR),
                };
                let saving = move || crud.state.with(|s| s.saving);
                view! {
                    <div class="modal-backdrop">
                        <form
                            class="form-modal"
                            on:submit=move |ev: web_sys::SubmitEvent| {
                                ev.prevent_default();
                                crud.submit();
                            }
                        >
                            <h2>{heading}</h2>
                            {R::fields().into_iter().map(|spec| view! { <FormField crud=crud spec=spec/> }).collect_view()}
                            {move || crud.form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                            <div class="modal-actions">
                                <button type="button" class="btn secondary" on:click=move |_| crud.close_form()>
                                    "Cancel"
                                </button>
                                <button type="submit" class="btn primary" disabled=saving>
                                    {move || if saving() { "Saving..." } else { "Save" }}
                                </button>
                            </div>
                        </form>
                    </div>
                }
            })
        }}
    }
}

/// One labelled input, picked by field kind
#[component]
fn FormField<R: AdminResource>(crud: Crud<R>, spec: FieldSpec) -> impl IntoView {
    let name = spec.name;
    let text = move || crud.values.with(|v| v.text(name).to_string());
    let set_text = move |value: String| crud.set_value(name, FieldValue::Text(value));

    let input = match spec.kind {
        FieldKind::Text | FieldKind::Url | FieldKind::Number | FieldKind::Date => {
            let input_type = match spec.kind {
                FieldKind::Url => "url",
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                _ => "text",
            };
            view! {
                <input type=input_type name=name placeholder=spec.placeholder prop:value=text on:input=move |ev| set_text(event_target_value(&ev))/>
            }
            .into_any()
        }
        FieldKind::TextArea => view! {
            <textarea name=name rows="4" placeholder=spec.placeholder prop:value=text on:input=move |ev| set_text(event_target_value(&ev))></textarea>
        }
        .into_any(),
        FieldKind::Lines => {
            let joined = move || {
                crud.values.with(|v| match v.get(name) {
                    Some(FieldValue::Lines(lines)) => lines.join("\n"),
                    _ => String::new(),
                })
            };
            view! {
                <textarea
                    name=name
                    rows="4"
                    placeholder="One entry per line"
                    prop:value=joined
                    on:input=move |ev| crud.set_value(name, FieldValue::Lines(split_lines(&event_target_value(&ev))))
                ></textarea>
            }
            .into_any()
        }
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                name=name
                prop:checked=move || crud.values.with(|v| v.get(name) == Some(&FieldValue::Flag(true)))
                on:change=move |ev| crud.set_value(name, FieldValue::Flag(event_target_checked(&ev)))
            />
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select name=name on:change=move |ev| set_text(event_target_value(&ev))>
                <option value="" selected=move || text().is_empty()>"Select..."</option>
                {options.iter().map(|(value, label)| view! {
                    <option value=*value selected=move || text() == *value>{*label}</option>
                }).collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Remote { endpoint, label_key } => view! {
            <RemoteSelect name=name endpoint=endpoint label_key=label_key value=Signal::derive(text) on_change=Callback::new(move |id| crud.set_value(name, FieldValue::Text(id)))/>
        }
        .into_any(),
        FieldKind::File { accept } => {
            let config = crud.config();
            let existing = move || {
                crud.values.with(|v| match v.get(name) {
                    Some(FieldValue::File { existing_url, attached }) => (existing_url.clone(), attached.clone()),
                    _ => (None, None),
                })
            };
            view! {
                <div class="file-field">
                    <input
                        type="file"
                        name=name
                        accept=accept
                        on:change=move |ev| {
                            let file = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                                .and_then(|input| input.files())
                                .and_then(|list| list.get(0));
                            crud.attach_file(name, file);
                        }
                    />
                    {move || {
                        let (url, attached) = existing();
                        match (attached, media_url(url.as_deref(), &config)) {
                            (Some(file_name), _) => view! { <span class="file-hint">"Selected: " {file_name}</span> }.into_any(),
                            (None, Some(url)) => view! {
                                <a class="file-hint" href=url target="_blank">"Current file"</a>
                            }
                            .into_any(),
                            (None, None) => ().into_any(),
                        }
                    }}
                </div>
            }
            .into_any()
        }
    };

    view! {
        <label class="form-field">
            <span class="field-label">
                {spec.label}
                {spec.required.then_some(" *")}
            </span>
            {input}
        </label>
    }
}

/// `<select>` whose options come from another collection
#[component]
fn RemoteSelect(
    name: &'static str,
    endpoint: &'static str,
    label_key: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (options, set_options) = signal(Vec::<(String, String)>::new());
    let (failed, set_failed) = signal(false);

    TaskScope::bound().spawn(async move {
        match ctx.client().get_list::<serde_json::Value>(endpoint, &ListParams::default()).await {
            Ok(page) => {
                let loaded = page.items.iter().filter_map(|item| remote_option(item, label_key)).collect();
                set_options.try_set(loaded);
            }
            Err(err) => {
                log::warn!("[form] options for {} failed: {}", endpoint, err);
                set_failed.try_set(true);
            }
        }
    });

    view! {
        <select name=name on:change=move |ev| on_change.run(event_target_value(&ev))>
            <option value="" selected=move || value.get().is_empty()>"Select..."</option>
            {move || options.get().into_iter().map(|(id, label)| {
                let selected_id = id.clone();
                view! { <option value=id selected=move || value.get() == selected_id>{label}</option> }
            }).collect_view()}
        </select>
        <Show when=move || failed.get()>
            <span class="form-error">"Could not load options"</span>
        </Show>
    }
}
