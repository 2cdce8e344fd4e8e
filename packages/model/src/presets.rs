//! Built-in starting scenes.
//!
//! Presets are constructed fresh on every lookup, so selecting one always hands
//! out a copy the editor is free to mutate.

use crate::error::UnknownPresetError;
use crate::shape::{Canvas, Shape, ShapeModel};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetName {
    Facebook,
    Instagram,
    Code,
    BulletList,
}

impl PresetName {
    pub const ALL: [PresetName; 4] = [
        PresetName::Facebook,
        PresetName::Instagram,
        PresetName::Code,
        PresetName::BulletList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Facebook => "facebook",
            PresetName::Instagram => "instagram",
            PresetName::Code => "code",
            PresetName::BulletList => "bulletList",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPresetError { name: s.to_string() })
    }
}

/// Look up a preset scene by name
pub fn preset(name: PresetName) -> ShapeModel {
    match name {
        PresetName::Facebook => facebook(),
        PresetName::Instagram => instagram(),
        PresetName::Code => code(),
        PresetName::BulletList => bullet_list(),
    }
}

/// Every preset, in menu order
pub fn presets() -> Vec<(PresetName, ShapeModel)> {
    PresetName::ALL.into_iter().map(|name| (name, preset(name))).collect()
}

fn facebook() -> ShapeModel {
    ShapeModel::new(Canvas::new(400.0, 160.0)).with_primitives(vec![
        Shape::rounded_rect(70.0, 15.0, 117.0, 6.4, 4.0),
        Shape::rounded_rect(70.0, 35.0, 85.0, 6.4, 3.0),
        Shape::rounded_rect(0.0, 80.0, 350.0, 6.4, 3.0),
        Shape::rounded_rect(0.0, 100.0, 380.0, 6.4, 3.0),
        Shape::rounded_rect(0.0, 120.0, 201.0, 6.4, 3.0),
        Shape::circle(30.0, 30.0, 30.0),
    ])
}

fn instagram() -> ShapeModel {
    ShapeModel::new(Canvas::new(400.0, 470.0)).with_primitives(vec![
        Shape::circle(30.0, 30.0, 30.0),
        Shape::rounded_rect(75.0, 13.0, 100.0, 13.0, 4.0),
        Shape::rounded_rect(75.0, 37.0, 50.0, 8.0, 4.0),
        Shape::rounded_rect(0.0, 70.0, 400.0, 400.0, 5.0),
    ])
}

fn code() -> ShapeModel {
    ShapeModel::new(Canvas::new(400.0, 70.0)).with_primitives(vec![
        Shape::rounded_rect(0.0, 0.0, 70.0, 10.0, 3.0),
        Shape::rounded_rect(80.0, 0.0, 100.0, 10.0, 3.0),
        Shape::rounded_rect(190.0, 0.0, 10.0, 10.0, 3.0),
        Shape::rounded_rect(15.0, 20.0, 130.0, 10.0, 3.0),
        Shape::rounded_rect(155.0, 20.0, 130.0, 10.0, 3.0),
        Shape::rounded_rect(15.0, 40.0, 90.0, 10.0, 3.0),
        Shape::rounded_rect(115.0, 40.0, 60.0, 10.0, 3.0),
        Shape::rounded_rect(185.0, 40.0, 60.0, 10.0, 3.0),
        Shape::rounded_rect(0.0, 60.0, 30.0, 10.0, 3.0),
    ])
}

fn bullet_list() -> ShapeModel {
    let mut primitives = Vec::new();
    for row in 0..4 {
        let top = 15.0 + 30.0 * row as f64;
        primitives.push(Shape::circle(10.0, top + 5.0, 8.0));
        primitives.push(Shape::rounded_rect(25.0, top, 220.0, 10.0, 5.0));
    }
    ShapeModel::new(Canvas::new(400.0, 120.0)).with_primitives(primitives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for name in PresetName::ALL {
            assert_eq!(name.as_str().parse::<PresetName>(), Ok(name));
        }
        assert!("twitter".parse::<PresetName>().is_err());
    }

    #[test]
    fn test_presets_fit_their_canvas() {
        for (name, model) in presets() {
            assert!(!model.primitives.is_empty(), "{} is empty", name);
            for shape in &model.primitives {
                assert_eq!(
                    &shape.clamped(&model.canvas),
                    shape,
                    "{} has a primitive outside its canvas",
                    name
                );
            }
        }
    }

    #[test]
    fn test_preset_lookup_returns_copies() {
        let mut first = preset(PresetName::Code);
        first.primitives.clear();

        assert_eq!(preset(PresetName::Code).primitives.len(), 9);
    }

    #[test]
    fn test_default_model_is_facebook() {
        let model = ShapeModel::default();
        assert_eq!(model.canvas, Canvas::new(400.0, 160.0));
        assert_eq!(model, preset(PresetName::Facebook));
    }
}
