use editor::{SendDialog, SendStage};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::editor::{EditorComponent, Msg};

pub fn send_dialog(dialog: &SendDialog, link: &Scope<EditorComponent>) -> Html {
    let body = match dialog.stage() {
        SendStage::Closed => return html! {},
        SendStage::Sent => html! {
            <div class="send-success">
                <i class="material-icons">{"check_circle"}</i>
                <h4>{"Email Sent!"}</h4>
                <p>{"Your test email has been successfully queued."}</p>
            </div>
        },
        stage => {
            let sending = *stage == SendStage::Sending;
            html! {
                <form onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::SubmitSend
                })}>
                    <p class="hint">{"This is a preview simulation. To send real emails, you would typically integrate with an ESP (Mailchimp, SendGrid, etc). You can also try opening your default mail client below."}</p>
                    <label for="send-recipient">{"Recipient"}</label>
                    <input
                        id="send-recipient"
                        type="email"
                        required=true
                        placeholder="you@example.com"
                        value={dialog.recipient.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SendRecipientInput(input.value())
                        })}
                    />
                    <label for="send-subject">{"Subject"}</label>
                    <input
                        id="send-subject"
                        type="text"
                        required=true
                        placeholder="My Awesome Template"
                        value={dialog.subject.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SendSubjectInput(input.value())
                        })}
                    />
                    <div class="modal-actions">
                        <button type="button" class="secondary" onclick={link.callback(|_| Msg::OpenMailClient)}>
                            <i class="material-icons">{"mail"}</i>{"Open in Mail App"}
                        </button>
                        <button type="submit" class="primary" disabled={sending}>
                            if sending {
                                {"Sending..."}
                            } else {
                                <i class="material-icons">{"send"}</i>{"Send Test"}
                            }
                        </button>
                    </div>
                </form>
            }
        }
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="modal-header">
                    <h3>{"Send Test Email"}</h3>
                    <button class="close-btn" onclick={link.callback(|_| Msg::CloseSend)}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                { body }
            </div>
        </div>
    }
}
