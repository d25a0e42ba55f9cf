//! Sidebar with the generation form and the saved-template list.

use common::model::email::{EmailOptions, EmailType};
use common::model::generation::LoadingState;
use common::model::template::SavedTemplate;
use yew::prelude::*;

mod view;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Create,
    Saved,
}

pub enum Field {
    Type,
    Topic,
    Audience,
    Tone,
    Context,
}

pub enum Msg {
    SetTab(Tab),
    Edit(Field, String),
    Submit,
}

#[derive(Properties, PartialEq, Clone)]
pub struct SidebarProps {
    pub loading: LoadingState,
    pub templates: Vec<SavedTemplate>,
    pub on_generate: Callback<EmailOptions>,
    pub on_load: Callback<String>,
    pub on_delete: Callback<String>,
}

pub struct Sidebar {
    pub tab: Tab,
    pub options: EmailOptions,
}

impl Component for Sidebar {
    type Message = Msg;
    type Properties = SidebarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            tab: Tab::Create,
            options: EmailOptions::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetTab(tab) => {
                self.tab = tab;
                true
            }
            Msg::Edit(field, value) => {
                let options = &mut self.options;
                match field {
                    Field::Type => {
                        if let Some(email_type) = EmailType::from_label(&value) {
                            options.email_type = email_type;
                        }
                    }
                    Field::Topic => options.topic = value,
                    Field::Audience => options.audience = value,
                    Field::Tone => options.tone = value,
                    Field::Context => options.additional_context = value,
                }
                false
            }
            Msg::Submit => {
                if ctx.props().loading == LoadingState::Generating {
                    return false;
                }
                match self.options.validate() {
                    Ok(()) => ctx.props().on_generate.emit(self.options.clone()),
                    Err(e) => gloo_console::warn!(e.to_string()),
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
