//! Wire payload construction.
//!
//! Maps a validated request to the JSON body each Bedrock model family
//! expects. Nova Canvas uses nested task-type envelopes; the Stability
//! models take flat bodies. Builders only read fields the catalog already
//! validated, so they stay free of bounds checks.

use crate::error::{ImageGenError, Result};
use crate::models::{ModelFamily, OperationSpec, ValidatedRequest};
use serde_json::{json, Value};

/// A ready-to-send invocation body paired with its target model.
#[derive(Debug, Clone)]
pub struct Payload {
    pub model_id: &'static str,
    pub body: Value,
}

pub fn build(spec: &OperationSpec, req: &ValidatedRequest) -> Result<Payload> {
    let model_id = spec.model_id.ok_or_else(|| {
        ImageGenError::Config(format!("operation {} has no remote model", spec.name))
    })?;

    let body = match spec.family {
        ModelFamily::NovaText => {
            let mut params = json!({ "text": req.text_or("prompt", "") });
            set_opt_str(&mut params, "negativeText", req.text("negative_prompt"));
            json!({
                "taskType": "TEXT_IMAGE",
                "textToImageParams": params,
                "imageGenerationConfig": nova_generation_config(req),
            })
        }
        ModelFamily::NovaColorGuided => {
            let mut params = json!({
                "colors": req.colors("colors").unwrap_or(&[]),
                "text": req.text_or("prompt", ""),
            });
            set_opt_str(&mut params, "negativeText", req.text("negative_prompt"));
            json!({
                "taskType": "COLOR_GUIDED_GENERATION",
                "colorGuidedGenerationParams": params,
                "imageGenerationConfig": nova_generation_config(req),
            })
        }
        ModelFamily::Sd35Text => {
            let mut body = stability_base(req);
            body["mode"] = json!("text-to-image");
            body["aspect_ratio"] = json!(req.text_or("aspect_ratio", "1:1"));
            body
        }
        ModelFamily::Sd35Image => {
            let mut body = stability_base(req);
            body["mode"] = json!("image-to-image");
            body["image"] = json!(require_b64(spec, req, "image")?);
            body["strength"] = json!(req.float_or("strength", 0.5));
            body
        }
        ModelFamily::UpscaleCreative => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "image")?);
            body["creativity"] = json!(req.float_or("creativity", 0.3));
            set_opt_str(&mut body, "style_preset", req.text("style_preset"));
            body
        }
        ModelFamily::UpscaleConservative => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "image")?);
            body
        }
        ModelFamily::UpscaleFast => json!({
            "image": require_b64(spec, req, "image")?,
            "output_format": req.text_or("output_format", "png"),
        }),
        ModelFamily::Inpaint => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "image")?);
            set_selector(spec, req, &mut body)?;
            body["grow_mask"] = json!(req.int_or("grow_mask", 5));
            body
        }
        ModelFamily::EraseObject => {
            let mut body = json!({
                "image": require_b64(spec, req, "image")?,
                "grow_mask": req.int_or("grow_mask", 5),
                "seed": req.int_or("seed", 0),
                "output_format": req.text_or("output_format", "png"),
            });
            set_selector(spec, req, &mut body)?;
            body
        }
        ModelFamily::Outpaint => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "image")?);
            body["left"] = json!(req.int_or("left", 0));
            body["right"] = json!(req.int_or("right", 0));
            body["up"] = json!(req.int_or("up", 0));
            body["down"] = json!(req.int_or("down", 0));
            body["creativity"] = json!(req.float_or("creativity", 0.5));
            body
        }
        ModelFamily::SearchReplace => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "image")?);
            body["search_prompt"] = json!(require_text(spec, req, "search_prompt")?);
            body
        }
        ModelFamily::SearchRecolor => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "image")?);
            body["select_prompt"] = json!(require_text(spec, req, "select_prompt")?);
            body
        }
        // Background removal always returns PNG to keep transparency.
        ModelFamily::RemoveBackground => json!({
            "image": require_b64(spec, req, "image")?,
            "output_format": "png",
        }),
        ModelFamily::ControlSketch | ModelFamily::ControlStructure => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "control_image")?);
            body["control_strength"] = json!(req.float_or("control_strength", 0.7));
            body
        }
        ModelFamily::StyleGuide => {
            let mut body = stability_base(req);
            body["image"] = json!(require_b64(spec, req, "reference_image")?);
            body["fidelity"] = json!(req.float_or("fidelity", 0.5));
            body
        }
        ModelFamily::StyleTransfer => {
            let mut body = stability_base(req);
            body["init_image"] = json!(require_b64(spec, req, "init_image")?);
            body["style_image"] = json!(require_b64(spec, req, "style_image")?);
            body["composition_fidelity"] = json!(req.float_or("composition_fidelity", 0.9));
            body["style_strength"] = json!(req.float_or("style_strength", 1.0));
            body["change_strength"] = json!(req.float_or("change_strength", 0.9));
            body
        }
        ModelFamily::MaskRectangle | ModelFamily::MaskEllipse | ModelFamily::MaskFull => {
            return Err(ImageGenError::Config(format!(
                "operation {} renders locally and takes no payload",
                spec.name
            )))
        }
    };

    Ok(Payload { model_id, body })
}

/// Fields every flat Stability body starts from. The prompt is skipped for
/// the prompt-less operations rather than sent empty.
fn stability_base(req: &ValidatedRequest) -> Value {
    let mut body = json!({
        "seed": req.int_or("seed", 0),
        "output_format": req.text_or("output_format", "png"),
    });
    set_opt_str(&mut body, "prompt", req.text("prompt"));
    set_opt_str(&mut body, "negative_prompt", req.text("negative_prompt"));
    body
}

fn nova_generation_config(req: &ValidatedRequest) -> Value {
    json!({
        "width": req.int_or("width", 1024),
        "height": req.int_or("height", 1024),
        "quality": req.text_or("quality", "standard"),
        "cfgScale": req.float_or("cfg_scale", 6.5),
        "seed": req.int_or("seed", 0),
        "numberOfImages": req.int_or("number_of_images", 1),
    })
}

/// Region selector for the mask-based edit operations: a manual mask when
/// one was supplied, otherwise the search prompt. Validation guarantees
/// exactly one is present.
fn set_selector(spec: &OperationSpec, req: &ValidatedRequest, body: &mut Value) -> Result<()> {
    match req.image("mask") {
        Some(mask) => body["mask"] = json!(mask.to_base64()),
        None => body["search_prompt"] = json!(require_text(spec, req, "search_prompt")?),
    }
    Ok(())
}

fn set_opt_str(obj: &mut Value, key: &str, value: Option<&str>) {
    if let (Some(map), Some(value)) = (obj.as_object_mut(), value) {
        map.insert(key.to_string(), json!(value));
    }
}

fn require_b64(spec: &OperationSpec, req: &ValidatedRequest, field: &str) -> Result<String> {
    req.image(field)
        .map(|img| img.to_base64())
        .ok_or_else(|| ImageGenError::MissingField {
            operation: spec.name.to_string(),
            field: field.to_string(),
        })
}

fn require_text(spec: &OperationSpec, req: &ValidatedRequest, field: &str) -> Result<String> {
    req.text(field)
        .map(str::to_string)
        .ok_or_else(|| ImageGenError::MissingField {
            operation: spec.name.to_string(),
            field: field.to_string(),
        })
}
