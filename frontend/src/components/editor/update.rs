//! Update function for the editor component.
//!
//! Every mutation of the document goes through `component.editor`; this
//! module only translates DOM events into editor calls and schedules the
//! asynchronous pieces (file reads, clipboard writes, timers).

use editor::export::COPY_FEEDBACK_MS;
use editor::send::{SEND_DELAY_MS, SENT_CLOSE_MS};
use editor::{EditorError, SendStage, UploadOutcome};
use gloo_file::futures::read_as_bytes;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::browser;

use super::messages::Msg;
use super::state::EditorComponent;

pub fn update(component: &mut EditorComponent, ctx: &Context<EditorComponent>, msg: Msg) -> bool {
    match msg {
        Msg::SetMode(mode) => {
            component.editor.switch_mode(mode);
            true
        }
        Msg::SetDevice(device) => {
            component.editor.set_device(device);
            true
        }
        Msg::VisualInput => {
            report(component.editor.capture_from_rendered());
            true
        }
        Msg::CodeInput(text) => {
            report(component.editor.capture_from_raw(text));
            true
        }
        Msg::EditorClick(event) => {
            let target = component.editor.surface().click_target(event.target());
            let response = component.editor.click(target);
            if response.prevent_default {
                event.prevent_default();
            }
            if response.stop_propagation {
                event.stop_propagation();
            }
            true
        }
        Msg::ViewportChanged => component.editor.viewport_changed(),
        Msg::DismissImage => component.editor.dismiss_selection(),
        Msg::ImageUrlInput(value) => component.editor.set_url_input(value),
        Msg::SubmitImageUrl => {
            report(component.editor.submit_url_input());
            true
        }
        Msg::OpenFilePicker => {
            if let Some(input) = component.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FilePicked(file) => {
            let pending = component.editor.begin_upload(file);
            // Reset so picking the same file again fires `change`.
            if let Some(input) = component.file_input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
            }
            let Some(pending) = pending else {
                return false;
            };
            let (ticket, file) = pending.into_parts();
            let mime = file.type_();
            let file = gloo_file::File::from(file);
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_as_bytes(&file).await {
                    Ok(bytes) => link.send_message(Msg::UploadRead {
                        ticket,
                        bytes,
                        mime,
                    }),
                    Err(e) => gloo_console::error!(format!("Failed to read image: {}", e)),
                }
            });
            false
        }
        Msg::UploadRead {
            ticket,
            bytes,
            mime,
        } => match component.editor.complete_upload(ticket, &bytes, Some(&mime)) {
            Ok(UploadOutcome::Applied) => true,
            Ok(UploadOutcome::Discarded(_)) => false,
            Err(e) => {
                report::<()>(Err(e));
                true
            }
        },
        Msg::Copy => {
            let text = component.editor.clipboard_text().to_string();
            let link = ctx.link().clone();
            spawn_local(async move {
                match browser::copy_text(&text).await {
                    Ok(()) => link.send_message(Msg::Copied),
                    Err(e) => gloo_console::error!(format!("Copy failed: {}", e)),
                }
            });
            false
        }
        Msg::Copied => {
            let token = component.copy.show();
            let link = ctx.link().clone();
            spawn_local(async move {
                TimeoutFuture::new(COPY_FEEDBACK_MS).await;
                link.send_message(Msg::CopyReset(token));
            });
            true
        }
        Msg::CopyReset(token) => component.copy.revert(token),
        Msg::Export => {
            if let Err(e) = browser::download(&component.editor.export_file()) {
                gloo_console::error!(format!("Export failed: {}", e));
            }
            false
        }
        Msg::OpenSave => {
            component.save_dialog.open();
            true
        }
        Msg::CloseSave => {
            component.save_dialog.close();
            true
        }
        Msg::SaveNameInput(name) => {
            component.save_dialog.name = name;
            false
        }
        Msg::SubmitSave => match component.save_dialog.submit() {
            Some(name) => {
                let content = component.editor.document().snapshot();
                ctx.props().on_save.emit((name, content));
                true
            }
            None => false,
        },
        Msg::OpenSend => {
            component.send_dialog.open();
            true
        }
        Msg::CloseSend => {
            component.send_dialog.close();
            true
        }
        Msg::SendRecipientInput(value) => {
            component.send_dialog.recipient = value;
            false
        }
        Msg::SendSubjectInput(value) => {
            component.send_dialog.subject = value;
            false
        }
        Msg::SubmitSend => match component.send_dialog.begin_send() {
            Ok(true) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    TimeoutFuture::new(SEND_DELAY_MS).await;
                    link.send_message(Msg::SendFinished);
                });
                true
            }
            Ok(false) => false,
            Err(e) => {
                gloo_console::warn!(e.to_string());
                false
            }
        },
        Msg::SendFinished => {
            if !component.send_dialog.finish_send() {
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                TimeoutFuture::new(SENT_CLOSE_MS).await;
                link.send_message(Msg::SendClosed);
            });
            true
        }
        Msg::SendClosed => {
            if component.send_dialog.stage() != &SendStage::Sent {
                return false;
            }
            component.send_dialog.close();
            true
        }
        Msg::OpenMailClient => {
            browser::open_in_new_tab(&component.send_dialog.mailto());
            false
        }
    }
}

fn report<T>(result: Result<T, EditorError>) {
    if let Err(e) = result {
        gloo_console::warn!(e.to_string());
    }
}
