use crate::{generate, generate_for, lower, print, CodegenError, GenerateOptions, OutputMode};
use loaderkit_model::{preset, Canvas, Framework, PresetName, Shape, ShapeModel};
use loaderkit_parser::{parse, AttrValue};

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn single_rect_model() -> ShapeModel {
    ShapeModel::new(Canvas::new(400.0, 160.0))
        .with_primitives(vec![Shape::rect(0.0, 0.0, 100.0, 10.0)])
        .with_colors("#f3f3f3", "#ecebeb")
}

#[test]
fn test_react_preview_layout() {
    let result = generate(&preset(PresetName::Facebook), &GenerateOptions::default())
        .expect("Failed to generate");

    println!("Generated code:\n{}", result);

    let expected = r##"const MyLoader = () => (
  <ContentLoader
    speed={2}
    width={400}
    height={160}
    primaryColor="#f3f3f3"
    secondaryColor="#ecebeb"
  >
    <rect x={70} y={15} rx={4} ry={4} width={117} height={6.4} />
    <rect x={70} y={35} rx={3} ry={3} width={85} height={6.4} />
    <rect x={0} y={80} rx={3} ry={3} width={350} height={6.4} />
    <rect x={0} y={100} rx={3} ry={3} width={380} height={6.4} />
    <rect x={0} y={120} rx={3} ry={3} width={201} height={6.4} />
    <circle cx={30} cy={30} r={30} />
  </ContentLoader>
)
"##;
    assert_eq!(result, expected);
}

#[test]
fn test_vue_preview_layout() {
    let result = generate(&single_rect_model(), &GenerateOptions::new(Framework::Vue))
        .expect("Failed to generate");

    let expected = r##"const MyLoader = {
  components: { ContentLoader },
  template: `
    <content-loader
      :speed="2"
      :width="400"
      :height="160"
      primary-color="#f3f3f3"
      secondary-color="#ecebeb"
    >
      <rect :x="0" :y="0" :rx="0" :ry="0" :width="100" :height="10" />
    </content-loader>
  `
}
"##;
    assert_eq!(result, expected);
}

#[test]
fn test_export_mode_only_adds_import() {
    let model = single_rect_model();

    for framework in Framework::ALL {
        let preview = generate(&model, &GenerateOptions::new(framework)).unwrap();
        let export = generate(
            &model,
            &GenerateOptions::new(framework).with_mode(OutputMode::Export),
        )
        .unwrap();

        assert!(export.starts_with("import "));
        assert!(export.ends_with(&preview));
        assert!(export.contains(framework.package()));
    }

    let vue = generate(
        &model,
        &GenerateOptions::new(Framework::Vue).with_mode(OutputMode::Export),
    )
    .unwrap();
    assert!(vue.starts_with("import { ContentLoader } from \"vue-content-loader\"\n\n"));
}

#[test]
fn test_dimensions_and_colors_verbatim() {
    let model = single_rect_model().with_colors("rgb(200, 200, 200)", "#ABCDEF");

    let react = generate(&model, &GenerateOptions::default()).unwrap();
    let react = normalize_whitespace(&react);
    assert!(react.contains("width={400}"));
    assert!(react.contains("height={160}"));
    assert!(react.contains("primaryColor=\"rgb(200, 200, 200)\""));
    assert!(react.contains("secondaryColor=\"#ABCDEF\""));

    let vue = generate(&model, &GenerateOptions::new(Framework::Vue)).unwrap();
    assert!(vue.contains(":width=\"400\""));
    assert!(vue.contains("primary-color=\"rgb(200, 200, 200)\""));
}

#[test]
fn test_numbers_round_to_two_decimals() {
    let model = ShapeModel::new(Canvas::new(400.0, 160.0))
        .with_primitives(vec![Shape::circle(10.456, 0.1 + 0.2, -0.001)]);

    let result = generate(&model, &GenerateOptions::default()).unwrap();
    assert!(result.contains("<circle cx={10.46} cy={0.3} r={0} />"));
}

#[test]
fn test_rtl_and_guideline_props() {
    let mut model = single_rect_model();
    model.rtl = true;
    model.guideline = "Loading \"posts\"".to_string();

    let react = generate(&model, &GenerateOptions::default()).unwrap();
    assert!(react.contains("\n    rtl\n"));
    assert!(react.contains(r#"title={"Loading \"posts\""}"#));

    let vue = generate(&model, &GenerateOptions::new(Framework::Vue)).unwrap();
    assert!(vue.contains(":rtl=\"true\""));
    assert!(vue.contains("title=\"Loading &quot;posts&quot;\""));
}

#[test]
fn test_generated_code_parses_back() {
    let mut model = preset(PresetName::BulletList);
    model.rtl = true;
    model.guideline = "a `tricky` ${title} & <more>".to_string();

    for framework in Framework::ALL {
        let options = GenerateOptions::new(framework).with_mode(OutputMode::Export);
        let source = generate(&model, &options).unwrap();
        let document = parse(&source).expect("generated code should parse");

        assert_eq!(document.dialect, framework);
        assert_eq!(document.root.children.len(), model.primitives.len());
        assert_eq!(
            document.root.attr("title"),
            Some(&AttrValue::Str(model.guideline.clone()))
        );
        assert_eq!(document.root.attr("rtl").and_then(AttrValue::as_bool), Some(true));
    }
}

#[test]
fn test_print_of_lowered_document_is_stable() {
    let model = preset(PresetName::Instagram);
    let options = GenerateOptions::new(Framework::Vue);

    let document = lower(&model, &options).unwrap();
    let first = print(&document);
    let reparsed = parse(&first).unwrap();

    assert_eq!(print(&reparsed), first);
}

#[test]
fn test_non_finite_value_is_rejected() {
    let mut model = single_rect_model();
    model.primitives.push(Shape::circle(5.0, f64::NAN, 2.0));

    let err = generate(&model, &GenerateOptions::default()).unwrap_err();
    assert_eq!(
        err,
        CodegenError::NonFiniteValue {
            field: "primitives[1].cy".to_string()
        }
    );
}

#[test]
fn test_unsupported_framework_selector() {
    let err = generate_for(&single_rect_model(), "svelte", OutputMode::Preview).unwrap_err();

    assert!(matches!(err, CodegenError::UnsupportedFramework(_)));
    assert!(err.to_string().contains("svelte"));
    assert!(generate_for(&single_rect_model(), "Vue", OutputMode::Preview).is_ok());
}

#[test]
fn test_invalid_component_name() {
    for name in ["", "my-loader", "2Fast", "default"] {
        let options = GenerateOptions::default().with_component_name(name);
        assert!(matches!(
            generate(&single_rect_model(), &options),
            Err(CodegenError::InvalidComponentName(_))
        ));
    }

    let options = GenerateOptions::default().with_component_name("ProfileSkeleton");
    let result = generate(&single_rect_model(), &options).unwrap();
    assert!(result.starts_with("const ProfileSkeleton = () => ("));
}

#[test]
fn test_empty_scene() {
    let model = ShapeModel::new(Canvas::new(200.0, 100.0));
    let result = generate(&model, &GenerateOptions::default()).unwrap();

    assert!(result.contains("secondaryColor=\"#ecebeb\"\n  />\n"));
    assert!(parse(&result).unwrap().root.children.is_empty());
}

#[test]
fn test_huge_values_stay_valid_numbers() {
    let model = ShapeModel::new(Canvas::new(1e307, 160.0))
        .with_primitives(vec![Shape::rect(0.0, 0.0, 1e306, 10.0)]);

    for framework in Framework::ALL {
        let source = generate(&model, &GenerateOptions::new(framework)).unwrap();
        assert!(!source.contains("inf"), "{}", source);

        let document = parse(&source).unwrap();
        assert_eq!(document.root.attr("width").and_then(AttrValue::as_number), Some(1e307));
    }
}

#[test]
fn test_line_terminators_are_escaped_in_jsx_strings() {
    let mut model = single_rect_model();
    model.guideline = "one\r\ntwo\u{2028}three".to_string();

    let react = generate(&model, &GenerateOptions::default()).unwrap();
    assert!(react.contains(r#"title={"one\r\ntwo\u2028three"}"#));
    assert!(!react.contains('\r'));
    assert!(!react.contains('\u{2028}'));

    let document = parse(&react).unwrap();
    assert_eq!(
        document.root.attr("title"),
        Some(&AttrValue::Str(model.guideline.clone()))
    );
}
