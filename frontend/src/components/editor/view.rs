//! View rendering for the editor component.
//!
//! Layout: action bar (mode and device toggles, save/copy/send/export),
//! the canvas (content-editable document or source textarea), the selection
//! ring with its floating image toolbar, a footer strip and the dialogs.

use editor::{DevicePreview, Mode, Overlay};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::dialogs::{save_dialog, send_dialog};
use super::dom_surface::TOOLBAR_CLASS;
use super::messages::Msg;
use super::state::EditorComponent;

pub fn view(component: &EditorComponent, ctx: &Context<EditorComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div class="editor-root">
            { build_action_bar(component, link) }
            <div class="editor-canvas">
                { build_visual_pane(component, link) }
                { build_code_pane(component, link) }
            </div>
            { build_image_toolbar(component, link) }
            { build_footer(component) }
            { save_dialog(&component.save_dialog, link) }
            { send_dialog(&component.send_dialog, link) }
        </div>
    }
}

fn icon_button(icon: &str, label: &str, onclick: Callback<MouseEvent>, active: bool) -> Html {
    html! {
        <button class={classes!("icon-btn", active.then_some("active"))} title={label.to_string()} {onclick}>
            <i class="material-icons">{ icon }</i>
            <span class="icon-label">{ label }</span>
        </button>
    }
}

fn build_action_bar(component: &EditorComponent, link: &Scope<EditorComponent>) -> Html {
    let mode = component.editor.mode();
    let device = component.editor.device();
    let copied = component.copy.is_visible();

    html! {
        <div class="action-bar">
            <div class="toggle-group">
                { icon_button("visibility", "Visual", link.callback(|_| Msg::SetMode(Mode::Visual)), mode == Mode::Visual) }
                { icon_button("code", "Code", link.callback(|_| Msg::SetMode(Mode::Code)), mode == Mode::Code) }
            </div>
            {
                if mode == Mode::Visual {
                    html! {
                        <div class="toggle-group">
                            { icon_button("desktop_windows", "Desktop", link.callback(|_| Msg::SetDevice(DevicePreview::Desktop)), device == DevicePreview::Desktop) }
                            { icon_button("smartphone", "Mobile", link.callback(|_| Msg::SetDevice(DevicePreview::Mobile)), device == DevicePreview::Mobile) }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <div class="actions">
                { icon_button("save", "Save", link.callback(|_| Msg::OpenSave), false) }
                { icon_button(if copied { "check" } else { "content_copy" }, if copied { "Copied" } else { "Copy" }, link.callback(|_| Msg::Copy), copied) }
                { icon_button("send", "Send", link.callback(|_| Msg::OpenSend), false) }
                { icon_button("download", "Export", link.callback(|_| Msg::Export), false) }
            </div>
        </div>
    }
}

fn build_visual_pane(component: &EditorComponent, link: &Scope<EditorComponent>) -> Html {
    let hidden = component.editor.mode() != Mode::Visual;
    let frame_style = match component.editor.device().frame_size() {
        Some((width, height)) => format!("width:{}px;height:{}px;", width, height),
        None => String::new(),
    };
    let frame_class = match component.editor.device() {
        DevicePreview::Desktop => "frame frame-desktop",
        DevicePreview::Mobile => "frame frame-mobile",
    };

    html! {
        <div class={frame_class} style={frame_style} hidden={hidden}>
            <div
                ref={component.visual_ref.clone()}
                class="visual-editor"
                contenteditable="true"
                oninput={link.callback(|_: InputEvent| Msg::VisualInput)}
                onclick={link.callback(Msg::EditorClick)}
            />
        </div>
    }
}

fn build_code_pane(component: &EditorComponent, link: &Scope<EditorComponent>) -> Html {
    if component.editor.mode() != Mode::Code {
        return html! {};
    }
    html! {
        <div class="code-frame">
            <textarea
                class="code-editor"
                spellcheck="false"
                value={component.editor.document().as_str().to_string()}
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::CodeInput(input.value())
                })}
            />
        </div>
    }
}

fn build_image_toolbar(component: &EditorComponent, link: &Scope<EditorComponent>) -> Html {
    let Some(Overlay { ring, toolbar_top, toolbar_left }) = component.editor.overlay() else {
        return html! {};
    };
    let ring_style = format!(
        "top:{}px;left:{}px;width:{}px;height:{}px;",
        ring.top, ring.left, ring.width, ring.height
    );
    let toolbar_style = format!("top:{}px;left:{}px;", toolbar_top, toolbar_left);
    let url = component.editor.url_input().unwrap_or_default().to_string();

    html! {
        <>
            <div class="selection-ring" style={ring_style} />
            <div class={TOOLBAR_CLASS} style={toolbar_style}>
                <div class="toolbar-header">
                    <span><i class="material-icons">{"image"}</i>{"Edit Image"}</span>
                    <button class="close-btn" onclick={link.callback(|_| Msg::DismissImage)}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                <button class="upload-btn" onclick={link.callback(|_| Msg::OpenFilePicker)}>
                    <i class="material-icons">{"upload"}</i>{"Upload"}
                </button>
                <input
                    type="file"
                    accept="image/*"
                    hidden=true
                    ref={component.file_input_ref.clone()}
                    onchange={link.callback(|e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::FilePicked(input.files().and_then(|files| files.get(0)))
                    })}
                />
                <form onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::SubmitImageUrl
                })}>
                    <input
                        type="text"
                        class="url-input"
                        placeholder="Or paste image URL..."
                        value={url}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::ImageUrlInput(input.value())
                        })}
                    />
                </form>
            </div>
        </>
    }
}

fn build_footer(component: &EditorComponent) -> Html {
    html! {
        <div class="footer-strip">
            <span>{ component.editor.footer_tip() }</span>
            <span>{ format!("{} chars", component.editor.char_count()) }</span>
        </div>
    }
}
