//! Generic parameter validation.
//!
//! One engine interprets the declarative `OperationSpec` table from
//! `models::catalog`: presence, type conformance, numeric and length
//! bounds, mutual exclusion, image resolution, and cross-field
//! constraints. Validation is all-or-nothing; nothing reaches the payload
//! builder until every rule has passed.

use crate::error::{ImageGenError, Result};
use crate::models::{
    catalog, Constraint, FieldDefault, FieldKind, FieldSpec, FieldValue, OperationSpec,
    ResolvedImage, ValidatedRequest,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use std::io::Cursor;
use std::path::Path;

/// Validate raw arguments for a named operation.
pub fn validate(operation: &str, args: &Value) -> Result<ValidatedRequest> {
    let spec = catalog::lookup(operation)
        .ok_or_else(|| ImageGenError::UnknownOperation(operation.to_string()))?;
    validate_operation(spec, args)
}

/// Validate raw arguments against an already-resolved spec.
pub fn validate_operation(spec: &OperationSpec, args: &Value) -> Result<ValidatedRequest> {
    let empty = serde_json::Map::new();
    let map = match args {
        Value::Object(m) => m,
        Value::Null => &empty,
        _ => {
            return Err(ImageGenError::out_of_range(
                "arguments",
                "expected a JSON object",
            ))
        }
    };

    let mut req = ValidatedRequest::default();
    // (group, field) pairs actually supplied by the caller.
    let mut grouped: Vec<(&'static str, &'static str)> = Vec::new();

    for field in spec.fields {
        match supplied_value(map, field) {
            Some(raw) => {
                let value = coerce(field, raw)?;
                if let Some(group) = field.group {
                    grouped.push((group, field.name));
                }
                req.insert(field.name, value);
            }
            None => {
                if field.required {
                    return Err(ImageGenError::MissingField {
                        operation: spec.name.to_string(),
                        field: field.name.to_string(),
                    });
                }
                if let Some(default) = field.default {
                    req.insert(field.name, default_value(default));
                }
            }
        }
    }

    for (i, (group_a, name_a)) in grouped.iter().enumerate() {
        for (group_b, name_b) in &grouped[i + 1..] {
            if group_a == group_b {
                return Err(ImageGenError::ConflictingFields {
                    first: name_a.to_string(),
                    second: name_b.to_string(),
                });
            }
        }
    }

    for constraint in spec.constraints {
        apply_constraint(spec, constraint, &req)?;
    }

    Ok(req)
}

fn supplied_value<'a>(map: &'a serde_json::Map<String, Value>, field: &FieldSpec) -> Option<&'a Value> {
    let direct = map.get(field.name);
    let value = direct.or_else(|| field.aliases.iter().find_map(|alias| map.get(*alias)));
    value.filter(|v| !v.is_null())
}

fn default_value(default: FieldDefault) -> FieldValue {
    match default {
        FieldDefault::Int(v) => FieldValue::Int(v),
        FieldDefault::Float(v) => FieldValue::Float(v),
        FieldDefault::Str(v) => FieldValue::Text(v.to_string()),
    }
}

fn coerce(field: &FieldSpec, raw: &Value) -> Result<FieldValue> {
    match field.kind {
        FieldKind::Text { min_len, max_len } => {
            let s = expect_str(field, raw)?;
            let len = s.chars().count();
            if len < min_len || len > max_len {
                return Err(ImageGenError::out_of_range(
                    field.name,
                    format!("length {} outside {}..={} characters", len, min_len, max_len),
                ));
            }
            Ok(FieldValue::Text(s.to_string()))
        }
        FieldKind::Integer { min, max } => {
            let v = expect_int(field, raw)?;
            check_int_range(field, v, min, max)?;
            Ok(FieldValue::Int(v))
        }
        FieldKind::Dimension { min, max, step } => {
            let v = expect_int(field, raw)?;
            check_int_range(field, v, min, max)?;
            if v % step != 0 {
                return Err(ImageGenError::out_of_range(
                    field.name,
                    format!("{} is not divisible by {}", v, step),
                ));
            }
            Ok(FieldValue::Int(v))
        }
        FieldKind::Float { min, max } => {
            let v = raw.as_f64().ok_or_else(|| {
                ImageGenError::out_of_range(field.name, "expected a number")
            })?;
            if !v.is_finite() || v < min || v > max {
                return Err(ImageGenError::out_of_range(
                    field.name,
                    format!("{} outside {}..={}", v, min, max),
                ));
            }
            Ok(FieldValue::Float(v))
        }
        FieldKind::Choice { allowed } => {
            let s = expect_str(field, raw)?;
            if !allowed.contains(&s) {
                return Err(ImageGenError::out_of_range(
                    field.name,
                    format!("'{}' is not one of {}", s, allowed.join(", ")),
                ));
            }
            Ok(FieldValue::Text(s.to_string()))
        }
        FieldKind::Colors { max } => {
            let items = raw.as_array().ok_or_else(|| {
                ImageGenError::out_of_range(field.name, "expected an array of hex color strings")
            })?;
            if items.is_empty() || items.len() > max {
                return Err(ImageGenError::out_of_range(
                    field.name,
                    format!("expected 1..={} colors, got {}", max, items.len()),
                ));
            }
            let mut colors = Vec::with_capacity(items.len());
            for item in items {
                let s = item.as_str().filter(|s| is_hex_color(s)).ok_or_else(|| {
                    ImageGenError::out_of_range(
                        field.name,
                        format!("'{}' is not a #RRGGBB hex color", item),
                    )
                })?;
                colors.push(s.to_string());
            }
            Ok(FieldValue::Colors(colors))
        }
        FieldKind::Image => {
            let s = expect_str(field, raw)?;
            Ok(FieldValue::Image(resolve_image(field.name, s)?))
        }
    }
}

fn expect_str<'a>(field: &FieldSpec, raw: &'a Value) -> Result<&'a str> {
    raw.as_str()
        .ok_or_else(|| ImageGenError::out_of_range(field.name, "expected a string"))
}

fn expect_int(field: &FieldSpec, raw: &Value) -> Result<i64> {
    raw.as_i64()
        .ok_or_else(|| ImageGenError::out_of_range(field.name, "expected an integer"))
}

fn check_int_range(field: &FieldSpec, v: i64, min: i64, max: i64) -> Result<()> {
    if v < min || v > max {
        return Err(ImageGenError::out_of_range(
            field.name,
            format!("{} outside {}..={}", v, min, max),
        ));
    }
    Ok(())
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Resolve an image argument to raw bytes. A value naming an existing
/// file is read from disk; anything else must be valid base64. Dimensions
/// are probed from the header without a full decode.
fn resolve_image(field: &str, value: &str) -> Result<ResolvedImage> {
    let bytes = if Path::new(value).exists() {
        std::fs::read(value).map_err(|e| ImageGenError::UnreadableImage {
            field: field.to_string(),
            message: format!("failed to read {}: {}", value, e),
        })?
    } else {
        BASE64
            .decode(value.trim())
            .map_err(|_| ImageGenError::UnreadableImage {
                field: field.to_string(),
                message: "not an existing file path and not valid base64".to_string(),
            })?
    };

    let (width, height) = image::ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| ImageGenError::UnreadableImage {
            field: field.to_string(),
            message: e.to_string(),
        })?
        .into_dimensions()
        .map_err(|e| ImageGenError::UnreadableImage {
            field: field.to_string(),
            message: format!("unrecognized image data: {}", e),
        })?;

    Ok(ResolvedImage {
        bytes,
        width,
        height,
    })
}

fn apply_constraint(
    spec: &OperationSpec,
    constraint: &Constraint,
    req: &ValidatedRequest,
) -> Result<()> {
    match constraint {
        Constraint::MinDimensions { field, min } => {
            if let Some(img) = req.image(field) {
                if img.width < *min || img.height < *min {
                    return Err(ImageGenError::out_of_range(
                        *field,
                        format!(
                            "image is {}x{}, below the minimum of {}px per side",
                            img.width, img.height, min
                        ),
                    ));
                }
            }
            Ok(())
        }
        Constraint::PixelArea { field, max, min } => {
            if let Some(img) = req.image(field) {
                let pixels = img.pixel_count();
                if pixels > *max {
                    return Err(ImageGenError::out_of_range(
                        *field,
                        format!(
                            "image has {} pixels ({}x{}), exceeding the maximum of {}",
                            pixels, img.width, img.height, max
                        ),
                    ));
                }
                if let Some(min) = min {
                    if pixels < *min {
                        return Err(ImageGenError::out_of_range(
                            *field,
                            format!("image has {} pixels, below the minimum of {}", pixels, min),
                        ));
                    }
                }
            }
            Ok(())
        }
        Constraint::MaskMatchesImage { mask, image } => {
            if let (Some(mask_img), Some(input)) = (req.image(mask), req.image(image)) {
                if (mask_img.width, mask_img.height) != (input.width, input.height) {
                    return Err(ImageGenError::out_of_range(
                        *mask,
                        format!(
                            "mask dimensions {}x{} do not match image dimensions {}x{}",
                            mask_img.width, mask_img.height, input.width, input.height
                        ),
                    ));
                }
            }
            Ok(())
        }
        Constraint::AnyPositive { fields } => {
            if fields.iter().any(|f| req.int_or(f, 0) > 0) {
                Ok(())
            } else {
                Err(ImageGenError::out_of_range(
                    fields.join("/"),
                    "at least one direction must be greater than zero",
                ))
            }
        }
        Constraint::RequireOne { fields } => {
            if fields.iter().any(|f| req.contains(f)) {
                Ok(())
            } else {
                Err(ImageGenError::MissingField {
                    operation: spec.name.to_string(),
                    field: fields.join(" or "),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::GrayImage::new(width, height);
        let mut out = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    fn png_b64(width: u32, height: u32) -> String {
        BASE64.encode(png_bytes(width, height))
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = validate("generate_video", &json!({})).unwrap_err();
        assert!(matches!(err, ImageGenError::UnknownOperation(_)));
    }

    #[test]
    fn missing_prompt_is_rejected() {
        let err = validate("generate_image", &json!({})).unwrap_err();
        match err {
            ImageGenError::MissingField { field, .. } => assert_eq!(field, "prompt"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn nova_defaults_are_applied() {
        let req = validate("generate_image", &json!({"prompt": "a red barn"})).unwrap();
        assert_eq!(req.int("width"), Some(1024));
        assert_eq!(req.int("height"), Some(1024));
        assert_eq!(req.int("seed"), Some(0));
        assert_eq!(req.int("number_of_images"), Some(1));
        assert_eq!(req.float("cfg_scale"), Some(6.5));
        assert_eq!(req.text("quality"), Some("standard"));
    }

    #[test]
    fn nova_width_must_be_divisible_and_in_range() {
        // 100 is both below the 320 minimum and not divisible by 16.
        let err = validate(
            "generate_image",
            &json!({"prompt": "x", "width": 100, "height": 1024}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "width"));

        let err = validate(
            "generate_image",
            &json!({"prompt": "x", "width": 1000, "height": 1024}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "width"));
    }

    #[test]
    fn nova_prompt_length_is_bounded() {
        let long = "x".repeat(1025);
        let err = validate("generate_image", &json!({ "prompt": long })).unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "prompt"));

        // The same length is fine for the long-form Stability family.
        let long = "x".repeat(1025);
        assert!(validate("generate_image_sd35", &json!({ "prompt": long })).is_ok());

        let too_long = "x".repeat(10_001);
        let err = validate("generate_image_sd35", &json!({ "prompt": too_long })).unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "prompt"));
    }

    #[test]
    fn sd35_aspect_ratio_enum_is_enforced() {
        let err = validate(
            "generate_image_sd35",
            &json!({"prompt": "x", "aspect_ratio": "4:3"}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "aspect_ratio"));

        let req = validate("generate_image_sd35", &json!({"prompt": "x"})).unwrap();
        assert_eq!(req.text("aspect_ratio"), Some("1:1"));
    }

    #[test]
    fn sd35_seed_bound_differs_from_nova() {
        assert!(validate(
            "generate_image_sd35",
            &json!({"prompt": "x", "seed": 4_294_967_294i64}),
        )
        .is_ok());
        let err = validate(
            "generate_image_sd35",
            &json!({"prompt": "x", "seed": 4_294_967_295i64}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "seed"));

        let err = validate(
            "generate_image",
            &json!({"prompt": "x", "seed": 900_000_000}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "seed"));
    }

    #[test]
    fn colors_must_be_hex() {
        let err = validate(
            "generate_image_with_colors",
            &json!({"prompt": "x", "colors": ["red"]}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "colors"));

        let too_many: Vec<String> = (0..11).map(|i| format!("#00000{}", i)).collect();
        let err = validate(
            "generate_image_with_colors",
            &json!({"prompt": "x", "colors": too_many}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "colors"));

        assert!(validate(
            "generate_image_with_colors",
            &json!({"prompt": "x", "colors": ["#FF9800", "#0066cc"]}),
        )
        .is_ok());
    }

    #[test]
    fn image_resolves_from_base64_and_from_path() {
        let req = validate(
            "transform_image_sd35",
            &json!({"prompt": "x", "image": png_b64(64, 64), "strength": 0.5}),
        )
        .unwrap();
        let img = req.image("image").unwrap();
        assert_eq!((img.width, img.height), (64, 64));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        std::fs::write(&path, png_bytes(128, 96)).unwrap();
        let req = validate(
            "transform_image_sd35",
            &json!({"prompt": "x", "image": path.to_str().unwrap(), "strength": 0.5}),
        )
        .unwrap();
        let img = req.image("image").unwrap();
        assert_eq!((img.width, img.height), (128, 96));
    }

    #[test]
    fn garbage_image_is_unreadable() {
        let err = validate(
            "transform_image_sd35",
            &json!({"prompt": "x", "image": "not/a/path/and/not/base64!!", "strength": 0.5}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::UnreadableImage { ref field, .. } if field == "image"));

        // Valid base64 that is not an image fails at dimension probing.
        let err = validate(
            "transform_image_sd35",
            &json!({"prompt": "x", "image": BASE64.encode(b"hello world"), "strength": 0.5}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::UnreadableImage { .. }));
    }

    #[test]
    fn image_below_minimum_dimension_is_rejected() {
        let err = validate(
            "transform_image_sd35",
            &json!({"prompt": "x", "image": png_b64(32, 64), "strength": 0.5}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "image"));
    }

    #[test]
    fn upscale_pixel_budgets_differ_per_variant() {
        // 1200x1200 = 1.44M pixels: over the 1MP creative budget, well
        // within the 9.4MP conservative budget.
        let image = png_b64(1200, 1200);
        let err = validate(
            "upscale_creative",
            &json!({"image": image, "prompt": "sharpen"}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "image"));

        let image = png_b64(1200, 1200);
        assert!(validate(
            "upscale_conservative",
            &json!({"image": image, "prompt": "sharpen"}),
        )
        .is_ok());
    }

    #[test]
    fn mask_and_search_prompt_are_mutually_exclusive() {
        let err = validate(
            "inpaint_image",
            &json!({
                "image": png_b64(64, 64),
                "mask": png_b64(64, 64),
                "search_prompt": "the dog",
                "prompt": "a cat",
            }),
        )
        .unwrap_err();
        match err {
            ImageGenError::ConflictingFields { first, second } => {
                assert_eq!((first.as_str(), second.as_str()), ("mask", "search_prompt"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn edit_operations_require_exactly_one_selector() {
        // A search prompt alone is a valid selector.
        assert!(validate(
            "inpaint_image",
            &json!({
                "image": png_b64(64, 64),
                "search_prompt": "the dog",
                "prompt": "a cat",
            }),
        )
        .is_ok());

        // Neither selector fails before any remote call.
        let err = validate(
            "remove_object",
            &json!({"image": png_b64(64, 64)}),
        )
        .unwrap_err();
        match err {
            ImageGenError::MissingField { field, .. } => {
                assert_eq!(field, "mask or search_prompt");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn mask_dimensions_must_match_image() {
        let err = validate(
            "inpaint_image",
            &json!({
                "image": png_b64(128, 128),
                "mask": png_b64(64, 64),
                "prompt": "a cat",
            }),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "mask"));
    }

    #[test]
    fn outpaint_requires_a_direction() {
        let err = validate(
            "outpaint_image",
            &json!({"image": png_b64(64, 64), "prompt": "more sky"}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { .. }));

        assert!(validate(
            "outpaint_image",
            &json!({"image": png_b64(64, 64), "prompt": "more sky", "up": 256}),
        )
        .is_ok());

        let err = validate(
            "outpaint_image",
            &json!({"image": png_b64(64, 64), "prompt": "more sky", "up": 2001}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "up"));
    }

    #[test]
    fn control_image_accepts_the_api_alias() {
        let req = validate(
            "sketch_to_image",
            &json!({"image": png_b64(64, 64), "prompt": "a castle"}),
        )
        .unwrap();
        assert!(req.image("control_image").is_some());
        assert_eq!(req.float("control_strength"), Some(0.7));
    }

    #[test]
    fn style_transfer_defaults() {
        let req = validate(
            "style_transfer",
            &json!({
                "init_image": png_b64(64, 64),
                "style_image": png_b64(80, 80),
                "prompt": "oil painting",
            }),
        )
        .unwrap();
        assert_eq!(req.float("composition_fidelity"), Some(0.9));
        assert_eq!(req.float("style_strength"), Some(1.0));
        assert_eq!(req.float("change_strength"), Some(0.9));
    }

    #[test]
    fn mask_operations_validate_geometry_bounds() {
        let err = validate(
            "create_rectangular_mask",
            &json!({"width": 0, "height": 100, "x": 0, "y": 0, "mask_width": 10, "mask_height": 10}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "width"));

        let err = validate(
            "create_ellipse_mask",
            &json!({"width": 100, "height": 100, "center_x": 50, "center_y": 50, "radius_x": 0, "radius_y": 10}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "radius_x"));

        // Full masks carry no feather field; the extra argument is ignored.
        let full = validate(
            "create_full_mask",
            &json!({"width": 100, "height": 100, "feather": 60}),
        );
        assert!(full.is_ok());

        let err = validate(
            "create_rectangular_mask",
            &json!({"width": 100, "height": 100, "x": 0, "y": 0, "mask_width": 10, "mask_height": 10, "feather": 60}),
        )
        .unwrap_err();
        assert!(matches!(err, ImageGenError::OutOfRange { ref field, .. } if field == "feather"));
    }
}
