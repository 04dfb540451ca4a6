//! # Part Model
//!
//! One renderable entity of a snapshot.
//!
//! Parts come from an external simulation that does not validate what it
//! sends, so deserialization is deliberately forgiving: every field except
//! `id` has a fallback, and fallbacks never fail the whole snapshot.
//!
//! ```text
//! {id, type?, size:[w,h,d], pos:[x,y,z], rotation?:[x,y,z], color, transparency?, isPlayer?}
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::math::Vec3;

/// Stable identifier of a part within a snapshot.
pub type PartId = String;

/// Closed set of shapes a part can take.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartType {
    /// Box with full extents `size`.
    #[default]
    Block,
    /// Sphere, `size.x` is the diameter.
    Ball,
    /// Upright cylinder, `size.x` diameter and `size.y` height.
    Cylinder,
    /// Ramp, `size.x` base and `size.y` height.
    Wedge,
    /// Corner ramp spanning `size`.
    CornerWedge,
}

impl PartType {
    /// Every shape, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Block,
        Self::Ball,
        Self::Cylinder,
        Self::Wedge,
        Self::CornerWedge,
    ];

    /// Resolves a wire name. Unknown names are blocks.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Ball" => Self::Ball,
            "Cylinder" => Self::Cylinder,
            "Wedge" => Self::Wedge,
            "CornerWedge" => Self::CornerWedge,
            _ => Self::Block,
        }
    }

    /// Wire name of the shape.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Block => "Block",
            Self::Ball => "Ball",
            Self::Cylinder => "Cylinder",
            Self::Wedge => "Wedge",
            Self::CornerWedge => "CornerWedge",
        }
    }
}

impl std::fmt::Display for PartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PartType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One entity of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Join key between snapshots.
    #[serde(deserialize_with = "lenient::id")]
    pub id: PartId,
    /// Shape.
    #[serde(rename = "type", default, deserialize_with = "lenient::part_type")]
    pub part_type: PartType,
    /// Shape dimensions, meaning depends on `part_type`.
    #[serde(default, deserialize_with = "lenient::vec3")]
    pub size: Vec3,
    /// World position.
    #[serde(default, deserialize_with = "lenient::vec3")]
    pub pos: Vec3,
    /// Euler angles in degrees.
    #[serde(default, deserialize_with = "lenient::vec3")]
    pub rotation: Vec3,
    /// Material colour.
    #[serde(default, deserialize_with = "lenient::color")]
    pub color: Color,
    /// 0 is opaque, 1 fully transparent.
    #[serde(default, deserialize_with = "lenient::transparency")]
    pub transparency: f32,
    /// Player entities carry a floating name label.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_player: bool,
}

impl Part {
    /// Creates an opaque white block at the origin.
    #[must_use]
    pub fn new(id: impl Into<PartId>) -> Self {
        Self {
            id: id.into(),
            part_type: PartType::Block,
            size: Vec3::new(1.0, 1.0, 1.0),
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            color: Color::WHITE,
            transparency: 0.0,
            is_player: false,
        }
    }

    /// Builder: shape and dimensions.
    #[must_use]
    pub fn with_shape(mut self, part_type: PartType, size: Vec3) -> Self {
        self.part_type = part_type;
        self.size = size;
        self
    }

    /// Builder: position.
    #[must_use]
    pub fn at(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    /// Builder: rotation in degrees.
    #[must_use]
    pub fn rotated(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    /// Builder: player flag.
    #[must_use]
    pub fn player(mut self) -> Self {
        self.is_player = true;
        self
    }

    /// Material opacity derived from transparency.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        1.0 - self.transparency
    }
}

/// Acknowledgment returned for a kick request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickAck {
    /// Always `true`; enqueueing cannot fail.
    pub success: bool,
}

/// Per-field fallbacks. Each reads whatever JSON is there and never rejects
/// a part except for an unusable id.
mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::PartType;
    use crate::color::Color;
    use crate::math::Vec3;

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(id),
            Value::Number(n) => Ok(number_id(&n)),
            other => Err(D::Error::custom(format!(
                "part id must be a string or number, got {other}"
            ))),
        }
    }

    /// Integral numbers render without a fraction, so `1` and `1.0` agree.
    fn number_id(n: &serde_json::Number) -> String {
        if let Some(i) = n.as_i64() {
            return i.to_string();
        }
        if let Some(u) = n.as_u64() {
            return u.to_string();
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        }
    }

    pub fn part_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PartType, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map_or(PartType::Block, PartType::from_name))
    }

    pub fn vec3<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let component = |i: usize| {
            value
                .get(i)
                .and_then(Value::as_f64)
                .map_or(0.0, |c| c as f32)
        };
        Ok(Vec3::new(component(0), component(1), component(2)))
    }

    pub fn color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        Value::deserialize(deserializer).map(|value| Color::from_json(&value))
    }

    pub fn transparency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_f64().map_or(0.0, |t| (t as f32).clamp(0.0, 1.0)))
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Bool(b) => b,
            Value::Null => false,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_part() {
        let part: Part = serde_json::from_value(json!({
            "id": "p1",
            "type": "Ball",
            "size": [2, 2, 2],
            "pos": [0, 5, 0],
            "rotation": [0, 90, 0],
            "color": "#ff0000",
            "transparency": 0.25,
            "isPlayer": true
        }))
        .unwrap();

        assert_eq!(part.id, "p1");
        assert_eq!(part.part_type, PartType::Ball);
        assert_eq!(part.size, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(part.pos, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(part.rotation, Vec3::new(0.0, 90.0, 0.0));
        assert_eq!(part.color, Color::new(1.0, 0.0, 0.0));
        assert!((part.opacity() - 0.75).abs() < f32::EPSILON);
        assert!(part.is_player);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let part: Part = serde_json::from_value(json!({ "id": 7 })).unwrap();

        assert_eq!(part.id, "7");
        assert_eq!(part.part_type, PartType::Block);
        assert_eq!(part.size, Vec3::ZERO);
        assert_eq!(part.rotation, Vec3::ZERO);
        assert_eq!(part.color, Color::WHITE);
        assert_eq!(part.transparency, 0.0);
        assert!(!part.is_player);
    }

    #[test]
    fn test_unknown_type_is_block() {
        let part: Part =
            serde_json::from_value(json!({ "id": "a", "type": "MeshPart" })).unwrap();
        assert_eq!(part.part_type, PartType::Block);

        let part: Part = serde_json::from_value(json!({ "id": "a", "type": null })).unwrap();
        assert_eq!(part.part_type, PartType::Block);
    }

    #[test]
    fn test_partial_vectors() {
        let part: Part =
            serde_json::from_value(json!({ "id": "a", "rotation": [null, 45] })).unwrap();
        assert_eq!(part.rotation, Vec3::new(0.0, 45.0, 0.0));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(serde_json::from_value::<Part>(json!({ "type": "Ball" })).is_err());
        assert!(serde_json::from_value::<Part>(json!({ "id": null })).is_err());
    }

    #[test]
    fn test_numeric_ids() {
        let id = |value: serde_json::Value| serde_json::from_value::<Part>(json!({ "id": value })).unwrap().id;
        assert_eq!(id(json!(1)), "1");
        assert_eq!(id(json!(1.0)), "1");
        assert_eq!(id(json!(-3.0)), "-3");
        assert_eq!(id(json!(2.5)), "2.5");
        assert_eq!(id(json!("1.0")), "1.0");
    }

    #[test]
    fn test_type_names_roundtrip() {
        for part_type in PartType::ALL {
            assert_eq!(PartType::from_name(part_type.name()), part_type);
        }
    }
}
