use common::model::generation::LoadingState;
use editor::{
    ClickTarget, DEFAULT_TEMPLATE, Editor, GenerationGate, MemoryStore, Mode, Rect,
    RenderedSurface, TemplateLibrary, TreeSurface,
};
use pretty_assertions::assert_eq;

const TWO_IMAGES: &str = r#"<table width="600">
  <tr><td><img src="https://cdn.example/a.png" alt="A" width=120 /></td></tr>
  <tr><td><p style="color:#333">Hello &amp; welcome</p></td></tr>
  <tr><td><img alt='B' src='https://cdn.example/b.png'></td></tr>
</table>"#;

fn new_editor(html: &str) -> Editor<TreeSurface> {
    Editor::new(TreeSurface::new(), html)
}

fn select_image(editor: &mut Editor<TreeSurface>, index: usize) {
    let handle = editor.surface().image_handles()[index];
    editor.click(ClickTarget::image(handle));
}

#[test]
fn capture_then_rebuild_is_byte_identical() {
    let mut editor = new_editor(DEFAULT_TEMPLATE);
    editor.capture_from_rendered().unwrap();
    let first = editor.document().snapshot();

    editor.set_from_external(first.clone());
    editor.capture_from_rendered().unwrap();
    assert_eq!(editor.document().as_str(), first);
    assert_eq!(first, DEFAULT_TEMPLATE);
}

#[test]
fn raw_text_survives_a_visual_round_trip() {
    let mut editor = new_editor(DEFAULT_TEMPLATE);
    editor.switch_mode(Mode::Code);
    let raw = "<h1>Raw</h1>\n<p>typed <b>by hand</b></p>";
    editor.capture_from_raw(raw).unwrap();

    editor.switch_mode(Mode::Visual);
    editor.switch_mode(Mode::Code);
    assert_eq!(editor.document().as_str(), raw);
}

#[test]
fn mode_switch_clears_the_selection_and_its_listeners() {
    let mut editor = new_editor(TWO_IMAGES);
    select_image(&mut editor, 0);
    assert!(editor.selected().is_some());
    assert_eq!(editor.surface().active_watches(), 1);

    editor.switch_mode(Mode::Code);
    assert!(editor.selected().is_none());
    editor.switch_mode(Mode::Visual);
    assert!(editor.selected().is_none());
    assert_eq!(editor.surface().active_watches(), 0);
}

#[test]
fn replacing_one_image_leaves_everything_else_untouched() {
    let mut editor = new_editor(TWO_IMAGES);
    select_image(&mut editor, 0);
    editor.set_url_input("https://img.example/new.png");
    assert!(editor.submit_url_input().unwrap());

    let expected = TWO_IMAGES.replacen(
        "https://cdn.example/a.png",
        "https://img.example/new.png",
        1,
    );
    assert_eq!(editor.document().as_str(), expected);
}

#[test]
fn uploading_into_the_second_image_only_changes_its_source() {
    let mut editor = new_editor(TWO_IMAGES);
    select_image(&mut editor, 1);
    let ticket = editor.begin_upload(Some(vec![0x47u8])).unwrap().ticket();
    editor.complete_upload(ticket, b"GIF89a", None).unwrap();

    let expected = TWO_IMAGES.replacen(
        "'https://cdn.example/b.png'",
        "'data:image/gif;base64,R0lGODlh'",
        1,
    );
    assert_eq!(editor.document().as_str(), expected);
    assert!(editor.selected().is_some());
}

#[test]
fn empty_url_submission_is_a_no_op() {
    let mut editor = new_editor(TWO_IMAGES);
    select_image(&mut editor, 0);
    editor.set_url_input("");
    assert!(!editor.submit_url_input().unwrap());
    assert!(!editor.replace_image_from_url("   ").unwrap());
    assert_eq!(editor.document().as_str(), TWO_IMAGES);
}

#[test]
fn scrolling_keeps_the_same_image_selected() {
    let mut editor = new_editor(TWO_IMAGES);
    let handle = editor.surface().image_handles()[0];
    editor.click(ClickTarget::image(handle));

    let overlay = editor.overlay().unwrap();
    assert_eq!(overlay.ring, Rect::default());
    assert_eq!(overlay.toolbar_top, 10.0);
    assert!(editor.viewport_changed());
    assert_eq!(editor.selected(), Some(handle));

    editor.dismiss_selection();
    assert!(editor.overlay().is_none());
    assert!(!editor.viewport_changed());
}

#[test]
fn saved_templates_are_snapshots() {
    let mut editor = new_editor(DEFAULT_TEMPLATE);
    let mut library = TemplateLibrary::open(MemoryStore::new());

    editor
        .edit_rendered(|surface| {
            let tree = surface.tree_mut();
            let heading = tree.elements_named("h1")[0];
            let text = tree.children(heading)[0];
            tree.set_text(text, "Spring launch");
        })
        .unwrap();
    let saved_text = editor.document().snapshot();
    let id = library.add("T1", editor.document().as_str()).unwrap().id.clone();

    editor
        .edit_rendered(|surface| {
            let tree = surface.tree_mut();
            let heading = tree.elements_named("h1")[0];
            let text = tree.children(heading)[0];
            tree.set_text(text, "Summer launch");
        })
        .unwrap();

    assert_ne!(editor.document().as_str(), saved_text);
    assert_eq!(library.get(&id).unwrap().content, saved_text);
    assert!(saved_text.contains("Spring launch"));
}

#[test]
fn loading_a_saved_template_replaces_the_document() {
    let mut editor = new_editor(DEFAULT_TEMPLATE);
    let mut library = TemplateLibrary::open(MemoryStore::new());
    let id = library.add("Short", "<p>short</p>").unwrap().id.clone();

    let content = library.get(&id).unwrap().content.clone();
    editor.set_from_external(content);
    assert_eq!(editor.surface().serialize(), "<p>short</p>");
    assert_eq!(editor.document().as_str(), "<p>short</p>");
}

#[test]
fn deletion_needs_confirmation() {
    let mut library = TemplateLibrary::open(MemoryStore::new());
    let keep = library.add("keep", "<p>1</p>").unwrap().id.clone();
    let drop_id = library.add("drop", "<p>2</p>").unwrap().id.clone();

    assert!(!library.delete(&drop_id, || false).unwrap());
    assert_eq!(library.templates().len(), 2);

    assert!(library.delete(&drop_id, || true).unwrap());
    let ids: Vec<_> = library.templates().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec![keep]);
}

#[test]
fn double_submit_leaves_one_outstanding_call() {
    let mut gate = GenerationGate::new();
    let mut outstanding = Vec::new();
    for _ in 0..2 {
        if let Some(ticket) = gate.begin() {
            outstanding.push(ticket);
        }
    }
    assert_eq!(outstanding.len(), 1);
    assert_eq!(gate.state(), LoadingState::Generating);

    let mut editor = new_editor(DEFAULT_TEMPLATE);
    let ticket = outstanding.remove(0);
    if let Some(html) = gate.finish(ticket, Ok("<p>generated</p>".into())) {
        editor.set_from_external(html);
    }
    assert_eq!(editor.document().as_str(), "<p>generated</p>");
}

#[test]
fn failed_generation_keeps_the_document() {
    let mut gate = GenerationGate::new();
    let editor = new_editor(DEFAULT_TEMPLATE);
    let ticket = gate.begin().unwrap();
    assert!(gate.finish(ticket, Err("API Key is missing".into())).is_none());
    assert_eq!(editor.document().as_str(), DEFAULT_TEMPLATE);
    assert_eq!(gate.notice(), Some("API Key is missing"));
}
