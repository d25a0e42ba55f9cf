use editor::SaveDialog;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::editor::{EditorComponent, Msg};

pub fn save_dialog(dialog: &SaveDialog, link: &Scope<EditorComponent>) -> Html {
    if !dialog.is_open() {
        return html! {};
    }
    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="modal-header">
                    <h3>{"Save Template"}</h3>
                    <button class="close-btn" onclick={link.callback(|_| Msg::CloseSave)}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                <form onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::SubmitSave
                })}>
                    <label for="template-name">{"Template Name"}</label>
                    <input
                        id="template-name"
                        type="text"
                        placeholder="e.g. Summer Sale V1"
                        required=true
                        value={dialog.name.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SaveNameInput(input.value())
                        })}
                    />
                    <div class="modal-actions">
                        <button type="button" class="secondary" onclick={link.callback(|_| Msg::CloseSave)}>{"Cancel"}</button>
                        <button type="submit" class="primary">{"Save Template"}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
