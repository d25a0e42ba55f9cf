use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct EditorProps {
    /// HTML to load into the editor.
    pub content: AttrValue,
    /// Bumped by the parent whenever `content` should replace the document,
    /// even when the text is the same as before.
    pub revision: u64,
    /// Called with `(name, content)` when the user saves a template.
    pub on_save: Callback<(String, String)>,
}
