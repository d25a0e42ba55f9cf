use common::model::email::{EmailType, EMAIL_TONES};
use common::model::generation::LoadingState;
use common::model::template::SavedTemplate;
use js_sys::{Date, Object, Reflect};
use wasm_bindgen::JsValue;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::{Field, Msg, Sidebar, Tab};

pub fn view(sidebar: &Sidebar, ctx: &Context<Sidebar>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let tab_class = |tab: Tab| classes!("tab-btn", (sidebar.tab == tab).then_some("active"));

    html! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h1><i class="material-icons">{"auto_awesome"}</i>{"Sirz Mail"}</h1>
                <p>{"Template Generator"}</p>
            </div>
            <div class="tab-bar">
                <button class={tab_class(Tab::Create)} onclick={link.callback(|_| Msg::SetTab(Tab::Create))}>
                    <i class="material-icons">{"add"}</i>{"Create New"}
                </button>
                <button class={tab_class(Tab::Saved)} onclick={link.callback(|_| Msg::SetTab(Tab::Saved))}>
                    <i class="material-icons">{"library_books"}</i>{ format!("Saved ({})", props.templates.len()) }
                </button>
            </div>
            <div class="sidebar-content">
                {
                    match sidebar.tab {
                        Tab::Create => build_form(sidebar, props.loading, link),
                        Tab::Saved => build_saved_list(&props.templates, &props.on_load, &props.on_delete),
                    }
                }
            </div>
            <div class="sidebar-footer">{"Powered by Gemini 2.5 Flash"}</div>
        </aside>
    }
}

fn edit_input(link: &Scope<Sidebar>, field: fn() -> Field) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Edit(field(), input.value())
    })
}

fn edit_select(link: &Scope<Sidebar>, field: fn() -> Field) -> Callback<Event> {
    link.callback(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::Edit(field(), select.value())
    })
}

fn build_form(sidebar: &Sidebar, loading: LoadingState, link: &Scope<Sidebar>) -> Html {
    let options = &sidebar.options;
    let generating = loading == LoadingState::Generating;

    html! {
        <form class="options-form" onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        })}>
            <label>{"Email Type"}</label>
            <select onchange={edit_select(link, || Field::Type)}>
                { for EmailType::ALL.iter().map(|t| html! {
                    <option value={t.label()} selected={*t == options.email_type}>{ t.label() }</option>
                }) }
            </select>

            <label>{"Topic / Subject"}</label>
            <input
                type="text"
                required=true
                placeholder="e.g. Summer Sale"
                value={options.topic.clone()}
                oninput={edit_input(link, || Field::Topic)}
            />

            <div class="form-row">
                <div>
                    <label>{"Audience"}</label>
                    <input
                        type="text"
                        placeholder="e.g. New Users"
                        value={options.audience.clone()}
                        oninput={edit_input(link, || Field::Audience)}
                    />
                </div>
                <div>
                    <label>{"Tone"}</label>
                    <select onchange={edit_select(link, || Field::Tone)}>
                        { for EMAIL_TONES.iter().map(|tone| html! {
                            <option value={*tone} selected={*tone == options.tone}>{ *tone }</option>
                        }) }
                    </select>
                </div>
            </div>

            <label>{"Additional Context"}</label>
            <textarea
                rows="4"
                placeholder="Key points, special offers..."
                value={options.additional_context.clone()}
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::Edit(Field::Context, input.value())
                })}
            />

            <button type="submit" class="generate-btn" disabled={generating}>
                if generating {
                    <i class="material-icons spin">{"autorenew"}</i>{"Generating..."}
                } else {
                    <i class="material-icons">{"auto_awesome"}</i>{"Generate Template"}
                }
            </button>
        </form>
    }
}

fn build_saved_list(
    templates: &[SavedTemplate],
    on_load: &Callback<String>,
    on_delete: &Callback<String>,
) -> Html {
    if templates.is_empty() {
        return html! {
            <div class="empty-state">
                <i class="material-icons">{"library_books"}</i>
                <p class="title">{"No saved templates"}</p>
                <p>{"Generate and save a template to see it here."}</p>
            </div>
        };
    }

    html! {
        <div class="saved-list">
            { for templates.iter().map(|template| {
                let load_id = template.id.clone();
                let delete_id = template.id.clone();
                let on_load = on_load.clone();
                let on_delete = on_delete.clone();
                html! {
                    <div key={template.id.clone()} class="saved-card" onclick={move |_| on_load.emit(load_id.clone())}>
                        <div class="saved-card-header">
                            <h3>{ &template.name }</h3>
                            <button
                                class="delete-btn"
                                title="Delete Template"
                                onclick={move |e: MouseEvent| {
                                    e.stop_propagation();
                                    on_delete.emit(delete_id.clone());
                                }}
                            >
                                <i class="material-icons">{"delete"}</i>
                            </button>
                        </div>
                        <div class="saved-card-date">
                            <i class="material-icons">{"schedule"}</i>{ format_date(template.created_at) }
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

/// "Mar 5, 02:30 PM" style creation date.
fn format_date(timestamp_ms: u64) -> String {
    let date = Date::new(&JsValue::from_f64(timestamp_ms as f64));
    let options = Object::new();
    for (key, value) in [
        ("month", "short"),
        ("day", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
    ] {
        let _ = Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }
    String::from(date.to_locale_date_string("en-US", &options))
}
