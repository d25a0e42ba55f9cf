//! Runtime state of the editor component.

use editor::{CopyIndicator, Editor, SaveDialog, SendDialog};
use yew::prelude::*;

use super::dom_surface::DomSurface;

pub struct EditorComponent {
    pub editor: Editor<DomSurface>,
    /// The content-editable container.
    pub visual_ref: NodeRef,
    pub file_input_ref: NodeRef,
    pub copy: CopyIndicator,
    pub save_dialog: SaveDialog,
    pub send_dialog: SendDialog,
    /// Last `revision` prop applied to the document.
    pub revision: u64,
}

impl EditorComponent {
    pub fn new(ctx: &Context<Self>) -> Self {
        let visual_ref = NodeRef::default();
        let on_viewport = ctx.link().callback(|_| super::Msg::ViewportChanged);
        let surface = DomSurface::new(visual_ref.clone(), on_viewport);
        let props = ctx.props();
        Self {
            editor: Editor::new(surface, props.content.to_string()),
            visual_ref,
            file_input_ref: NodeRef::default(),
            copy: CopyIndicator::new(),
            save_dialog: SaveDialog::default(),
            send_dialog: SendDialog::new(),
            revision: props.revision,
        }
    }
}
