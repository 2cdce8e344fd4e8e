use loaderkit_compiler::{generate, GenerateOptions};
use loaderkit_editor::{
    keys, Action, AppState, EditorShell, JsonFileStore, MemoryStore, OptionsPatch,
    PreferencesStore, ShellConfig, Tool,
};
use loaderkit_model::{preset, Canvas, Framework, PresetName, Shape, ShapeModel};
use loaderkit_preview::{MarkupSandbox, RenderError, RenderOutput, Sandbox, Scope};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Records every source the shell hands to the sandbox
struct RecordingSandbox {
    inner: MarkupSandbox,
    executed: Rc<RefCell<Vec<String>>>,
}

impl Sandbox for RecordingSandbox {
    fn native_dialect(&self) -> Framework {
        self.inner.native_dialect()
    }

    fn execute(&self, source: &str, scope: &Scope) -> Result<RenderOutput, RenderError> {
        self.executed.borrow_mut().push(source.to_string());
        self.inner.execute(source, scope)
    }
}

fn shell_with(preferences: Box<dyn PreferencesStore>) -> (EditorShell, Rc<RefCell<Vec<String>>>) {
    let executed = Rc::new(RefCell::new(Vec::new()));
    let sandbox = RecordingSandbox {
        inner: MarkupSandbox::new(),
        executed: executed.clone(),
    };
    let shell = EditorShell::new(Box::new(sandbox), preferences, ShellConfig::default());
    // startup render
    executed.borrow_mut().clear();
    (shell, executed)
}

fn shell() -> (EditorShell, Rc<RefCell<Vec<String>>>) {
    shell_with(Box::new(MemoryStore::new()))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Primitives drawn in the last good preview
fn previewed_primitives(shell: &mut EditorShell) -> Option<usize> {
    let preview = shell.view().preview?;
    preview.root.find("clipPath").map(|clip| clip.children().len())
}

#[test]
fn test_option_edits_collapse_into_one_render() {
    let (mut shell, executed) = shell();
    let start = Instant::now();

    shell.edit_field(OptionsPatch::default().width(300.0), start);
    shell.edit_field(OptionsPatch::default().width(310.0), start + ms(100));
    shell.edit_field(OptionsPatch::default().primary_color("#222"), start + ms(200));
    shell.edit_field(OptionsPatch::default().width(320.0), start + ms(300));

    assert!(!shell.tick(start + ms(700)).fired());
    assert_eq!(shell.state().model.canvas.width, 400.0);
    assert!(executed.borrow().is_empty());

    let tick = shell.tick(start + ms(800));
    assert_eq!(
        tick.options,
        Some(OptionsPatch::default().width(320.0).primary_color("#222"))
    );
    assert_eq!(executed.borrow().len(), 1);
    assert_eq!(shell.state().model.canvas.width, 320.0);
    assert_eq!(shell.state().model.primary_color, "#222");

    assert!(!shell.tick(start + ms(5000)).fired());
    assert_eq!(executed.borrow().len(), 1);
}

#[test]
fn test_source_edits_collapse_and_feed_back() {
    let (mut shell, executed) = shell();
    let start = Instant::now();
    let target = ShapeModel::new(Canvas::new(200.0, 80.0))
        .with_primitives(vec![Shape::circle(40.0, 40.0, 20.0)]);
    let final_source = generate(&target, &GenerateOptions::default()).unwrap();

    shell.edit_source("const MyLoader = () => (", start);
    shell.edit_source("const MyLoader = () => (<ContentLoader", start + ms(150));
    shell.edit_source(final_source.clone(), start + ms(300));
    assert_eq!(shell.state().edited_source.as_deref(), Some(final_source.as_str()));

    let tick = shell.tick(start + ms(800));
    assert!(tick.preview.is_some());
    assert_eq!(*executed.borrow(), vec![final_source]);
    assert!(shell.state().model.approx_eq(&target, 1e-9));
    assert!(shell.state().canvas_stale);
    assert!(shell.state().edited_source.is_none());
}

#[test]
fn test_render_error_keeps_model_and_edited_text() {
    let (mut shell, _) = shell();
    let before = shell.state().model.clone();
    let start = Instant::now();

    shell.dispatch(Action::FocusEditor(true));
    shell.edit_source("const MyLoader = () => (<ContentLoader>)", start);
    shell.tick(start + ms(600));

    let view = shell.view();
    assert_eq!(shell.state().model, before);
    assert!(view.error.is_some());
    assert_eq!(view.source, "const MyLoader = () => (<ContentLoader>)");
    assert!(view.export_source.starts_with("import ContentLoader"));
}

#[test]
fn test_vue_source_is_translated_for_the_preview() {
    let (mut shell, executed) = shell();
    shell.dispatch(Action::SetFramework(Framework::Vue));

    let model = preset(PresetName::Code);
    let vue = generate(&model, &GenerateOptions::new(Framework::Vue)).unwrap();
    let start = Instant::now();
    shell.edit_source(vue, start);
    shell.tick(start + ms(500));

    let executed = executed.borrow();
    assert!(executed.last().unwrap().starts_with("const MyLoader = () => ("));
    assert!(shell.state().model.approx_eq(&model, 1e-9));
}

#[test]
fn test_preset_replaces_scene() {
    let (mut shell, _) = shell();
    shell.dispatch(Action::Draw(Shape::rect(1.0, 1.0, 5.0, 5.0)));
    shell.dispatch(Action::SetFields(OptionsPatch::default().rtl(true)));

    shell.dispatch(Action::SelectPreset(PresetName::Instagram));

    assert_eq!(shell.state().model, preset(PresetName::Instagram));
    assert!(!shell
        .state()
        .model
        .primitives
        .contains(&Shape::rect(1.0, 1.0, 5.0, 5.0)));
    assert!(!shell.state().model.rtl);
    assert_eq!(shell.state().selected, None);
}

#[test]
fn test_fatal_error_resets_to_defaults() {
    let (mut shell, _) = shell();
    shell.dispatch(Action::SetFramework(Framework::Vue));
    shell.dispatch(Action::SelectTool(Tool::Circle));
    shell.dispatch(Action::SelectPreset(PresetName::Code));

    shell.dispatch(Action::SelectItem(Some(99)));

    let state = shell.state();
    assert_eq!(state.model, ShapeModel::default());
    assert_eq!(state.framework, Framework::React);
    assert_eq!(state.tool, Tool::Select);
    assert_eq!(shell.preferences().get(keys::FRAMEWORK).as_deref(), Some("react"));
}

#[test]
fn test_unrenderable_state_recovers_in_view() {
    let (mut shell, _) = shell();
    shell.dispatch(Action::ReplaceShapes(vec![Shape::circle(f64::NAN, 1.0, 1.0)]));

    let view = shell.view();

    assert_eq!(shell.state().model, ShapeModel::default());
    assert!(view.source.starts_with("const MyLoader = () => ("));
}

#[test]
fn test_canvas_waits_for_editor_focus() {
    let (mut shell, _) = shell();
    shell.dispatch(Action::FocusEditor(true));
    shell.dispatch(Action::SelectPreset(PresetName::BulletList));

    assert!(!shell.view().render_canvas);

    shell.dispatch(Action::FocusEditor(false));
    assert!(shell.view().render_canvas);

    shell.dispatch(Action::CanvasRendered);
    assert!(!shell.view().render_canvas);
}

#[test]
fn test_reset_colors() {
    let (mut shell, _) = shell();
    shell.dispatch(Action::SetFields(
        OptionsPatch::default().primary_color("#000").secondary_color("#111"),
    ));
    shell.dispatch(Action::ResetColors);

    let defaults = AppState::default();
    assert_eq!(shell.state().model.primary_color, defaults.model.primary_color);
    assert_eq!(shell.state().model.secondary_color, defaults.model.secondary_color);
}

#[test]
fn test_preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    {
        let store = JsonFileStore::open(&path).unwrap();
        let (mut shell, _) = shell_with(Box::new(store));
        shell.dispatch(Action::SetFramework(Framework::Vue));
        shell.dispatch(Action::SelectPreset(PresetName::Code));
        shell.dispatch(Action::SetFields(OptionsPatch::default().guideline("Loading code")));
    }

    let store = JsonFileStore::open(&path).unwrap();
    let (shell, _) = shell_with(Box::new(store));

    assert_eq!(shell.state().framework, Framework::Vue);
    assert_eq!(shell.state().model.primitives, preset(PresetName::Code).primitives);
    assert_eq!(shell.state().model.canvas, Canvas::new(400.0, 70.0));
    assert_eq!(shell.state().model.guideline, "Loading code");
}

#[test]
fn test_preview_renders_at_startup() {
    let (mut shell, _) = shell();

    assert_eq!(previewed_primitives(&mut shell), Some(6));
}

#[test]
fn test_preview_follows_model_changes() {
    let (mut shell, executed) = shell();

    shell.dispatch(Action::SelectPreset(PresetName::Code));
    assert_eq!(previewed_primitives(&mut shell), Some(9));

    shell.dispatch(Action::Draw(Shape::circle(20.0, 20.0, 5.0)));
    assert_eq!(previewed_primitives(&mut shell), Some(10));

    shell.dispatch(Action::ReplaceShapes(vec![Shape::rect(0.0, 0.0, 10.0, 10.0)]));
    assert_eq!(previewed_primitives(&mut shell), Some(1));

    shell.dispatch(Action::SetFramework(Framework::Vue));
    assert_eq!(previewed_primitives(&mut shell), Some(1));
    assert_eq!(executed.borrow().len(), 4);

    shell.dispatch(Action::SelectTool(Tool::Circle));
    assert_eq!(executed.borrow().len(), 4);
}

#[test]
fn test_preset_clears_error_from_discarded_edit() {
    let (mut shell, _) = shell();
    let start = Instant::now();
    shell.edit_source("const MyLoader = () => (<ContentLoader>)", start);
    shell.tick(start + ms(600));
    assert!(shell.view().error.is_some());

    shell.dispatch(Action::SelectPreset(PresetName::Code));

    let view = shell.view();
    assert_eq!(view.error, None);
    assert_eq!(view.source, generate(&preset(PresetName::Code), &GenerateOptions::default()).unwrap());
}

#[test]
fn test_model_change_drops_queued_hand_edit() {
    let (mut shell, executed) = shell();
    let start = Instant::now();
    shell.edit_source("const MyLoader = () => (<ContentLoader />)", start);

    shell.dispatch(Action::SelectPreset(PresetName::BulletList));

    assert!(!shell.tick(start + ms(600)).fired());
    assert_eq!(shell.state().model, preset(PresetName::BulletList));
    assert_eq!(executed.borrow().len(), 1);
}

#[test]
fn test_corrupt_preference_keeps_persisted_drawing() {
    let drawing = vec![Shape::circle(50.0, 50.0, 20.0)];
    let store = MemoryStore::new()
        .with(keys::DRAW, serde_json::to_string(&drawing).unwrap())
        .with(keys::SPEED, "NaN");

    let (mut shell, _) = shell_with(Box::new(store));
    let view = shell.view();

    assert_eq!(shell.state().model.primitives, drawing);
    assert_eq!(shell.state().model.speed, 2.0);
    assert!(view.preview.is_some());
}
