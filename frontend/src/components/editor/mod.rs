//! Dual-mode email editor: root module wiring the Yew `Component`
//! implementation to its state, update and view submodules.
//!
//! The rendered document lives in a content-editable `div` that Yew never
//! renders children into; [`dom_surface::DomSurface`] owns its contents. The
//! `div` stays mounted in `Code` mode (hidden) so a rebuild always has a
//! target.

use yew::prelude::*;

mod dialogs;
mod dom_surface;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::EditorProps;
pub use state::EditorComponent;

impl Component for EditorComponent {
    type Message = Msg;
    type Properties = EditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        EditorComponent::new(ctx)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.revision != self.revision {
            self.revision = props.revision;
            self.editor.set_from_external(props.content.to_string());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.editor.surface().flush_pending();
        }
    }
}
