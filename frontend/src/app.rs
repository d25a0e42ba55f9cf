use common::model::email::EmailOptions;
use editor::{GenerationGate, GenerationTicket, TemplateLibrary, DEFAULT_TEMPLATE};
use yew::{html, Component, Context, Html};

use crate::components::editor::EditorComponent;
use crate::components::sidebar::Sidebar;
use crate::services::browser;
use crate::services::generate::generate_template;
use crate::services::storage::LocalStore;

const DELETE_PROMPT: &str = "Are you sure you want to delete this template?";

pub enum Msg {
    Generate(EmailOptions),
    Generated(GenerationTicket, Result<String, String>),
    DismissNotice,
    LoadTemplate(String),
    DeleteTemplate(String),
    Save((String, String)),
}

pub struct App {
    gate: GenerationGate,
    library: TemplateLibrary<LocalStore>,
    /// Content handed to the editor on the last `revision` bump.
    content: String,
    revision: u64,
}

impl App {
    fn load(&mut self, html: String) {
        self.content = html;
        self.revision += 1;
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            gate: GenerationGate::new(),
            library: TemplateLibrary::open(LocalStore),
            content: DEFAULT_TEMPLATE.to_string(),
            revision: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Generate(options) => {
                if let Err(e) = options.validate() {
                    gloo_console::warn!(e.to_string());
                    return false;
                }
                let Some(ticket) = self.gate.begin() else {
                    return false;
                };
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = generate_template(&options).await;
                    link.send_message(Msg::Generated(ticket, result));
                });
                true
            }
            Msg::Generated(ticket, result) => {
                if let Some(html) = self.gate.finish(ticket, result) {
                    self.load(html);
                }
                true
            }
            Msg::DismissNotice => {
                self.gate.dismiss_notice();
                true
            }
            Msg::LoadTemplate(id) => match self.library.get(&id) {
                Some(template) => {
                    let content = template.content.clone();
                    self.load(content);
                    true
                }
                None => false,
            },
            Msg::DeleteTemplate(id) => {
                match self.library.delete(&id, || browser::confirm(DELETE_PROMPT)) {
                    Ok(removed) => removed,
                    Err(e) => {
                        gloo_console::error!(format!("Failed to delete template: {}", e));
                        false
                    }
                }
            }
            Msg::Save((name, content)) => match self.library.add(&name, content) {
                Ok(_) => true,
                Err(e) => {
                    gloo_console::error!(format!("Failed to save template: {}", e));
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="app">
                <Sidebar
                    loading={self.gate.state()}
                    templates={self.library.templates().to_vec()}
                    on_generate={link.callback(Msg::Generate)}
                    on_load={link.callback(Msg::LoadTemplate)}
                    on_delete={link.callback(Msg::DeleteTemplate)}
                />
                <main class="workspace">
                    if let Some(notice) = self.gate.notice() {
                        <div class="notice-banner">
                            <i class="material-icons">{"error_outline"}</i>
                            <span>{ notice.to_string() }</span>
                            <button onclick={link.callback(|_| Msg::DismissNotice)}>{"Dismiss"}</button>
                        </div>
                    }
                    <EditorComponent
                        content={self.content.clone()}
                        revision={self.revision}
                        on_save={link.callback(Msg::Save)}
                    />
                </main>
            </div>
        }
    }
}
