//! Declarative operation catalog.
//!
//! Every supported tool operation is described here as data: its target
//! model, its parameter schema, and its cross-field constraints. The
//! validation engine in `crate::validate` interprets this table; nothing
//! else in the crate hardcodes per-operation rules.

use once_cell::sync::Lazy;
use std::collections::HashMap;

// Bedrock model identifiers.
pub const NOVA_CANVAS_MODEL_ID: &str = "amazon.nova-canvas-v1:0";
pub const SD35_LARGE_MODEL_ID: &str = "stability.sd3-5-large-v1:0";
pub const STABLE_UPSCALE_CREATIVE_MODEL_ID: &str = "us.stability.stable-creative-upscale-v1:0";
pub const STABLE_UPSCALE_CONSERVATIVE_MODEL_ID: &str =
    "us.stability.stable-conservative-upscale-v1:0";
pub const STABLE_UPSCALE_FAST_MODEL_ID: &str = "us.stability.stable-fast-upscale-v1:0";
pub const STABLE_INPAINT_MODEL_ID: &str = "us.stability.stable-image-inpaint-v1:0";
pub const STABLE_OUTPAINT_MODEL_ID: &str = "us.stability.stable-outpaint-v1:0";
pub const STABLE_SEARCH_REPLACE_MODEL_ID: &str = "us.stability.stable-image-search-replace-v1:0";
pub const STABLE_SEARCH_RECOLOR_MODEL_ID: &str = "us.stability.stable-image-search-recolor-v1:0";
pub const STABLE_ERASE_OBJECT_MODEL_ID: &str = "us.stability.stable-image-erase-object-v1:0";
pub const STABLE_REMOVE_BACKGROUND_MODEL_ID: &str =
    "us.stability.stable-image-remove-background-v1:0";
pub const STABLE_CONTROL_SKETCH_MODEL_ID: &str = "us.stability.stable-image-control-sketch-v1:0";
pub const STABLE_CONTROL_STRUCTURE_MODEL_ID: &str =
    "us.stability.stable-image-control-structure-v1:0";
pub const STABLE_STYLE_GUIDE_MODEL_ID: &str = "us.stability.stable-image-style-guide-v1:0";
pub const STABLE_STYLE_TRANSFER_MODEL_ID: &str = "us.stability.stable-style-transfer-v1:0";

// Prompt and seed bounds differ between the Nova and Stability families.
pub const MAX_PROMPT_LENGTH_NOVA: usize = 1024;
pub const MAX_PROMPT_LENGTH_STABILITY: usize = 10_000;
pub const NOVA_MAX_SEED: i64 = 858_993_459;
pub const STABILITY_MAX_SEED: i64 = 4_294_967_294;

// Input pixel budgets per upscale variant.
pub const MIN_IMAGE_DIMENSION: u32 = 64;
pub const MAX_CREATIVE_UPSCALE_INPUT_PIXELS: u64 = 1_048_576;
pub const MAX_CONSERVATIVE_UPSCALE_INPUT_PIXELS: u64 = 9_437_184;
pub const MAX_FAST_UPSCALE_INPUT_PIXELS: u64 = 1_048_576;
pub const MIN_FAST_UPSCALE_INPUT_PIXELS: u64 = 1024;

pub const MAX_OUTPAINT_DIRECTION_PIXELS: i64 = 2000;
pub const MAX_MASK_FEATHER: i64 = 50;
// Mask canvases are bounded to keep render buffers sane.
pub const MAX_MASK_CANVAS: i64 = 16_384;

pub const OUTPUT_FORMATS: &[&str] = &["jpeg", "png", "webp"];
pub const QUALITIES: &[&str] = &["standard", "premium"];

pub const ASPECT_RATIOS: &[&str] = &[
    "16:9", "1:1", "21:9", "2:3", "3:2", "4:5", "5:4", "9:16", "9:21",
];

pub const STYLE_PRESETS: &[&str] = &[
    "3d-model",
    "analog-film",
    "anime",
    "cinematic",
    "comic-book",
    "digital-art",
    "enhance",
    "fantasy-art",
    "isometric",
    "line-art",
    "low-poly",
    "modeling-compound",
    "neon-punk",
    "origami",
    "photographic",
    "pixel-art",
    "tile-texture",
];

/// Wire-format family an operation belongs to. Selects the payload shape
/// in `crate::payload`; the three mask families never leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    NovaText,
    NovaColorGuided,
    Sd35Text,
    Sd35Image,
    UpscaleCreative,
    UpscaleConservative,
    UpscaleFast,
    Inpaint,
    Outpaint,
    SearchReplace,
    SearchRecolor,
    EraseObject,
    RemoveBackground,
    ControlSketch,
    ControlStructure,
    StyleGuide,
    StyleTransfer,
    MaskRectangle,
    MaskEllipse,
    MaskFull,
}

impl ModelFamily {
    /// Mask operations render locally and never invoke Bedrock.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ModelFamily::MaskRectangle | ModelFamily::MaskEllipse | ModelFamily::MaskFull
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// UTF-8 string with a character-count range.
    Text { min_len: usize, max_len: usize },
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    /// Integer that must additionally be divisible by `step`.
    Dimension { min: i64, max: i64, step: i64 },
    /// String restricted to a fixed set of values.
    Choice { allowed: &'static [&'static str] },
    /// File path or inline base64; resolved to raw bytes at validation.
    Image,
    /// 1..=max `#RRGGBB` color strings.
    Colors { max: usize },
}

#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    Int(i64),
    Float(f64),
    Str(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
    /// Alternative argument names accepted on input (the AWS Stability
    /// control APIs call every image field `image`).
    pub aliases: &'static [&'static str],
    /// Fields sharing a group are mutually exclusive.
    pub group: Option<&'static str>,
}

impl FieldSpec {
    const fn req(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            kind,
            required: true,
            default: None,
            aliases: &[],
            group: None,
        }
    }

    const fn opt(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            kind,
            required: false,
            default: None,
            aliases: &[],
            group: None,
        }
    }

    const fn def(name: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        FieldSpec {
            name,
            kind,
            required: false,
            default: Some(default),
            aliases: &[],
            group: None,
        }
    }

    const fn grouped(name: &'static str, kind: FieldKind, required: bool, group: &'static str) -> Self {
        FieldSpec {
            name,
            kind,
            required,
            default: None,
            aliases: &[],
            group: Some(group),
        }
    }

    const fn aliased(name: &'static str, kind: FieldKind, aliases: &'static [&'static str]) -> Self {
        FieldSpec {
            name,
            kind,
            required: true,
            default: None,
            aliases,
            group: None,
        }
    }
}

/// Cross-field rules the per-field checks cannot express. Enforced by the
/// validator after all fields are resolved, before any payload is built.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Both sides of the named image must be at least `min` pixels.
    MinDimensions { field: &'static str, min: u32 },
    /// Total pixel count of the named image must stay within the budget.
    PixelArea {
        field: &'static str,
        max: u64,
        min: Option<u64>,
    },
    /// Mask dimensions must match the input image exactly.
    MaskMatchesImage {
        mask: &'static str,
        image: &'static str,
    },
    /// At least one of the named integer fields must be greater than zero.
    AnyPositive { fields: &'static [&'static str] },
    /// At least one of the named fields must be supplied. Combined with an
    /// exclusion group this makes the set exactly-one.
    RequireOne { fields: &'static [&'static str] },
}

#[derive(Debug)]
pub struct OperationSpec {
    pub name: &'static str,
    pub family: ModelFamily,
    pub model_id: Option<&'static str>,
    pub fields: &'static [FieldSpec],
    pub constraints: &'static [Constraint],
    /// Prefix for generated output filenames.
    pub filename_prefix: &'static str,
}

// Fields shared across the Stability-family operations.
const STABILITY_PROMPT: FieldSpec = FieldSpec::req(
    "prompt",
    FieldKind::Text {
        min_len: 1,
        max_len: MAX_PROMPT_LENGTH_STABILITY,
    },
);
const STABILITY_NEGATIVE_PROMPT: FieldSpec = FieldSpec::opt(
    "negative_prompt",
    FieldKind::Text {
        min_len: 1,
        max_len: MAX_PROMPT_LENGTH_STABILITY,
    },
);
const STABILITY_SEED: FieldSpec = FieldSpec::def(
    "seed",
    FieldKind::Integer {
        min: 0,
        max: STABILITY_MAX_SEED,
    },
    FieldDefault::Int(0),
);
const OUTPUT_FORMAT: FieldSpec = FieldSpec::def(
    "output_format",
    FieldKind::Choice {
        allowed: OUTPUT_FORMATS,
    },
    FieldDefault::Str("png"),
);
const FILENAME: FieldSpec = FieldSpec::opt(
    "filename",
    FieldKind::Text {
        min_len: 1,
        max_len: 128,
    },
);
const IMAGE: FieldSpec = FieldSpec::req("image", FieldKind::Image);
const FEATHER: FieldSpec = FieldSpec::def(
    "feather",
    FieldKind::Integer {
        min: 0,
        max: MAX_MASK_FEATHER,
    },
    FieldDefault::Int(0),
);
const MASK_CANVAS_WIDTH: FieldSpec = FieldSpec::req(
    "width",
    FieldKind::Integer {
        min: 1,
        max: MAX_MASK_CANVAS,
    },
);
const MASK_CANVAS_HEIGHT: FieldSpec = FieldSpec::req(
    "height",
    FieldKind::Integer {
        min: 1,
        max: MAX_MASK_CANVAS,
    },
);

// Fields shared across the Nova Canvas operations.
const NOVA_PROMPT: FieldSpec = FieldSpec::req(
    "prompt",
    FieldKind::Text {
        min_len: 1,
        max_len: MAX_PROMPT_LENGTH_NOVA,
    },
);
const NOVA_NEGATIVE_PROMPT: FieldSpec = FieldSpec::opt(
    "negative_prompt",
    FieldKind::Text {
        min_len: 1,
        max_len: MAX_PROMPT_LENGTH_NOVA,
    },
);
const NOVA_WIDTH: FieldSpec = FieldSpec::def(
    "width",
    FieldKind::Dimension {
        min: 320,
        max: 4096,
        step: 16,
    },
    FieldDefault::Int(1024),
);
const NOVA_HEIGHT: FieldSpec = FieldSpec::def(
    "height",
    FieldKind::Dimension {
        min: 320,
        max: 4096,
        step: 16,
    },
    FieldDefault::Int(1024),
);
const NOVA_QUALITY: FieldSpec = FieldSpec::def(
    "quality",
    FieldKind::Choice { allowed: QUALITIES },
    FieldDefault::Str("standard"),
);
const NOVA_CFG_SCALE: FieldSpec = FieldSpec::def(
    "cfg_scale",
    FieldKind::Float { min: 1.1, max: 10.0 },
    FieldDefault::Float(6.5),
);
const NOVA_SEED: FieldSpec = FieldSpec::def(
    "seed",
    FieldKind::Integer {
        min: 0,
        max: NOVA_MAX_SEED,
    },
    FieldDefault::Int(0),
);
const NOVA_NUMBER_OF_IMAGES: FieldSpec = FieldSpec::def(
    "number_of_images",
    FieldKind::Integer { min: 1, max: 5 },
    FieldDefault::Int(1),
);

const UNIT_INTERVAL: FieldKind = FieldKind::Float { min: 0.0, max: 1.0 };

const GROW_MASK: FieldSpec = FieldSpec::def(
    "grow_mask",
    FieldKind::Integer { min: 0, max: 20 },
    FieldDefault::Int(5),
);

// A manual mask and a search prompt are two ways of selecting the region
// to edit; the edit operations require exactly one of them.
const MASK_SELECTOR: FieldSpec = FieldSpec::grouped("mask", FieldKind::Image, false, "selector");
const SEARCH_SELECTOR: FieldSpec = FieldSpec::grouped(
    "search_prompt",
    FieldKind::Text {
        min_len: 1,
        max_len: MAX_PROMPT_LENGTH_STABILITY,
    },
    false,
    "selector",
);

pub static OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: "generate_image",
        family: ModelFamily::NovaText,
        model_id: Some(NOVA_CANVAS_MODEL_ID),
        fields: &[
            NOVA_PROMPT,
            NOVA_NEGATIVE_PROMPT,
            NOVA_WIDTH,
            NOVA_HEIGHT,
            NOVA_QUALITY,
            NOVA_CFG_SCALE,
            NOVA_SEED,
            NOVA_NUMBER_OF_IMAGES,
            FILENAME,
        ],
        constraints: &[],
        filename_prefix: "nova_canvas",
    },
    OperationSpec {
        name: "generate_image_with_colors",
        family: ModelFamily::NovaColorGuided,
        model_id: Some(NOVA_CANVAS_MODEL_ID),
        fields: &[
            NOVA_PROMPT,
            FieldSpec::req("colors", FieldKind::Colors { max: 10 }),
            NOVA_NEGATIVE_PROMPT,
            NOVA_WIDTH,
            NOVA_HEIGHT,
            NOVA_QUALITY,
            NOVA_CFG_SCALE,
            NOVA_SEED,
            NOVA_NUMBER_OF_IMAGES,
            FILENAME,
        ],
        constraints: &[],
        filename_prefix: "nova_canvas_color",
    },
    OperationSpec {
        name: "generate_image_sd35",
        family: ModelFamily::Sd35Text,
        model_id: Some(SD35_LARGE_MODEL_ID),
        fields: &[
            STABILITY_PROMPT,
            FieldSpec::def(
                "aspect_ratio",
                FieldKind::Choice {
                    allowed: ASPECT_RATIOS,
                },
                FieldDefault::Str("1:1"),
            ),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[],
        filename_prefix: "sd35",
    },
    OperationSpec {
        name: "transform_image_sd35",
        family: ModelFamily::Sd35Image,
        model_id: Some(SD35_LARGE_MODEL_ID),
        fields: &[
            STABILITY_PROMPT,
            IMAGE,
            FieldSpec::req("strength", UNIT_INTERVAL),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[Constraint::MinDimensions {
            field: "image",
            min: MIN_IMAGE_DIMENSION,
        }],
        filename_prefix: "sd35_transform",
    },
    OperationSpec {
        name: "upscale_creative",
        family: ModelFamily::UpscaleCreative,
        model_id: Some(STABLE_UPSCALE_CREATIVE_MODEL_ID),
        fields: &[
            IMAGE,
            STABILITY_PROMPT,
            FieldSpec::def(
                "creativity",
                FieldKind::Float { min: 0.1, max: 0.5 },
                FieldDefault::Float(0.3),
            ),
            FieldSpec::opt(
                "style_preset",
                FieldKind::Choice {
                    allowed: STYLE_PRESETS,
                },
            ),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[
            Constraint::MinDimensions {
                field: "image",
                min: MIN_IMAGE_DIMENSION,
            },
            Constraint::PixelArea {
                field: "image",
                max: MAX_CREATIVE_UPSCALE_INPUT_PIXELS,
                min: None,
            },
        ],
        filename_prefix: "upscale_creative",
    },
    OperationSpec {
        name: "upscale_conservative",
        family: ModelFamily::UpscaleConservative,
        model_id: Some(STABLE_UPSCALE_CONSERVATIVE_MODEL_ID),
        fields: &[
            IMAGE,
            STABILITY_PROMPT,
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[
            Constraint::MinDimensions {
                field: "image",
                min: MIN_IMAGE_DIMENSION,
            },
            Constraint::PixelArea {
                field: "image",
                max: MAX_CONSERVATIVE_UPSCALE_INPUT_PIXELS,
                min: None,
            },
        ],
        filename_prefix: "upscale_conservative",
    },
    OperationSpec {
        name: "upscale_fast",
        family: ModelFamily::UpscaleFast,
        model_id: Some(STABLE_UPSCALE_FAST_MODEL_ID),
        fields: &[IMAGE, OUTPUT_FORMAT, FILENAME],
        constraints: &[
            Constraint::MinDimensions {
                field: "image",
                min: MIN_IMAGE_DIMENSION,
            },
            Constraint::PixelArea {
                field: "image",
                max: MAX_FAST_UPSCALE_INPUT_PIXELS,
                min: Some(MIN_FAST_UPSCALE_INPUT_PIXELS),
            },
        ],
        filename_prefix: "upscale_fast",
    },
    OperationSpec {
        name: "inpaint_image",
        family: ModelFamily::Inpaint,
        model_id: Some(STABLE_INPAINT_MODEL_ID),
        fields: &[
            IMAGE,
            MASK_SELECTOR,
            SEARCH_SELECTOR,
            STABILITY_PROMPT,
            STABILITY_NEGATIVE_PROMPT,
            GROW_MASK,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[
            Constraint::MinDimensions {
                field: "image",
                min: MIN_IMAGE_DIMENSION,
            },
            Constraint::RequireOne {
                fields: &["mask", "search_prompt"],
            },
            Constraint::MaskMatchesImage {
                mask: "mask",
                image: "image",
            },
        ],
        filename_prefix: "inpaint",
    },
    OperationSpec {
        name: "remove_object",
        family: ModelFamily::EraseObject,
        model_id: Some(STABLE_ERASE_OBJECT_MODEL_ID),
        fields: &[
            IMAGE,
            MASK_SELECTOR,
            SEARCH_SELECTOR,
            GROW_MASK,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[
            Constraint::MinDimensions {
                field: "image",
                min: MIN_IMAGE_DIMENSION,
            },
            Constraint::RequireOne {
                fields: &["mask", "search_prompt"],
            },
            Constraint::MaskMatchesImage {
                mask: "mask",
                image: "image",
            },
        ],
        filename_prefix: "remove_object",
    },
    OperationSpec {
        name: "outpaint_image",
        family: ModelFamily::Outpaint,
        model_id: Some(STABLE_OUTPAINT_MODEL_ID),
        fields: &[
            IMAGE,
            STABILITY_PROMPT,
            FieldSpec::def(
                "left",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_OUTPAINT_DIRECTION_PIXELS,
                },
                FieldDefault::Int(0),
            ),
            FieldSpec::def(
                "right",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_OUTPAINT_DIRECTION_PIXELS,
                },
                FieldDefault::Int(0),
            ),
            FieldSpec::def(
                "up",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_OUTPAINT_DIRECTION_PIXELS,
                },
                FieldDefault::Int(0),
            ),
            FieldSpec::def(
                "down",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_OUTPAINT_DIRECTION_PIXELS,
                },
                FieldDefault::Int(0),
            ),
            FieldSpec::def("creativity", UNIT_INTERVAL, FieldDefault::Float(0.5)),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[
            Constraint::MinDimensions {
                field: "image",
                min: MIN_IMAGE_DIMENSION,
            },
            Constraint::AnyPositive {
                fields: &["left", "right", "up", "down"],
            },
        ],
        filename_prefix: "outpaint",
    },
    OperationSpec {
        name: "search_and_replace",
        family: ModelFamily::SearchReplace,
        model_id: Some(STABLE_SEARCH_REPLACE_MODEL_ID),
        fields: &[
            IMAGE,
            FieldSpec::req(
                "search_prompt",
                FieldKind::Text {
                    min_len: 1,
                    max_len: MAX_PROMPT_LENGTH_STABILITY,
                },
            ),
            STABILITY_PROMPT,
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[Constraint::MinDimensions {
            field: "image",
            min: MIN_IMAGE_DIMENSION,
        }],
        filename_prefix: "search_replace",
    },
    OperationSpec {
        name: "search_and_recolor",
        family: ModelFamily::SearchRecolor,
        model_id: Some(STABLE_SEARCH_RECOLOR_MODEL_ID),
        fields: &[
            IMAGE,
            FieldSpec::req(
                "select_prompt",
                FieldKind::Text {
                    min_len: 1,
                    max_len: MAX_PROMPT_LENGTH_STABILITY,
                },
            ),
            STABILITY_PROMPT,
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[Constraint::MinDimensions {
            field: "image",
            min: MIN_IMAGE_DIMENSION,
        }],
        filename_prefix: "search_recolor",
    },
    OperationSpec {
        name: "remove_background",
        family: ModelFamily::RemoveBackground,
        model_id: Some(STABLE_REMOVE_BACKGROUND_MODEL_ID),
        fields: &[IMAGE, FILENAME],
        constraints: &[Constraint::MinDimensions {
            field: "image",
            min: MIN_IMAGE_DIMENSION,
        }],
        filename_prefix: "remove_background",
    },
    OperationSpec {
        name: "sketch_to_image",
        family: ModelFamily::ControlSketch,
        model_id: Some(STABLE_CONTROL_SKETCH_MODEL_ID),
        fields: &[
            FieldSpec::aliased("control_image", FieldKind::Image, &["image"]),
            STABILITY_PROMPT,
            FieldSpec::def("control_strength", UNIT_INTERVAL, FieldDefault::Float(0.7)),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[Constraint::MinDimensions {
            field: "control_image",
            min: MIN_IMAGE_DIMENSION,
        }],
        filename_prefix: "sketch",
    },
    OperationSpec {
        name: "structure_control",
        family: ModelFamily::ControlStructure,
        model_id: Some(STABLE_CONTROL_STRUCTURE_MODEL_ID),
        fields: &[
            FieldSpec::aliased("control_image", FieldKind::Image, &["image"]),
            STABILITY_PROMPT,
            FieldSpec::def("control_strength", UNIT_INTERVAL, FieldDefault::Float(0.7)),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[Constraint::MinDimensions {
            field: "control_image",
            min: MIN_IMAGE_DIMENSION,
        }],
        filename_prefix: "structure",
    },
    OperationSpec {
        name: "style_guide",
        family: ModelFamily::StyleGuide,
        model_id: Some(STABLE_STYLE_GUIDE_MODEL_ID),
        fields: &[
            FieldSpec::aliased("reference_image", FieldKind::Image, &["image"]),
            STABILITY_PROMPT,
            FieldSpec::def("fidelity", UNIT_INTERVAL, FieldDefault::Float(0.5)),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[Constraint::MinDimensions {
            field: "reference_image",
            min: MIN_IMAGE_DIMENSION,
        }],
        filename_prefix: "style_guide",
    },
    OperationSpec {
        name: "style_transfer",
        family: ModelFamily::StyleTransfer,
        model_id: Some(STABLE_STYLE_TRANSFER_MODEL_ID),
        fields: &[
            FieldSpec::req("init_image", FieldKind::Image),
            FieldSpec::req("style_image", FieldKind::Image),
            STABILITY_PROMPT,
            FieldSpec::def("composition_fidelity", UNIT_INTERVAL, FieldDefault::Float(0.9)),
            FieldSpec::def("style_strength", UNIT_INTERVAL, FieldDefault::Float(1.0)),
            FieldSpec::def("change_strength", UNIT_INTERVAL, FieldDefault::Float(0.9)),
            STABILITY_NEGATIVE_PROMPT,
            STABILITY_SEED,
            OUTPUT_FORMAT,
            FILENAME,
        ],
        constraints: &[
            Constraint::MinDimensions {
                field: "init_image",
                min: MIN_IMAGE_DIMENSION,
            },
            Constraint::MinDimensions {
                field: "style_image",
                min: MIN_IMAGE_DIMENSION,
            },
        ],
        filename_prefix: "style_transfer",
    },
    OperationSpec {
        name: "create_rectangular_mask",
        family: ModelFamily::MaskRectangle,
        model_id: None,
        fields: &[
            MASK_CANVAS_WIDTH,
            MASK_CANVAS_HEIGHT,
            FieldSpec::req(
                "x",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FieldSpec::req(
                "y",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FieldSpec::req(
                "mask_width",
                FieldKind::Integer {
                    min: 1,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FieldSpec::req(
                "mask_height",
                FieldKind::Integer {
                    min: 1,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FEATHER,
            FILENAME,
        ],
        constraints: &[],
        filename_prefix: "mask",
    },
    OperationSpec {
        name: "create_ellipse_mask",
        family: ModelFamily::MaskEllipse,
        model_id: None,
        fields: &[
            MASK_CANVAS_WIDTH,
            MASK_CANVAS_HEIGHT,
            FieldSpec::req(
                "center_x",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FieldSpec::req(
                "center_y",
                FieldKind::Integer {
                    min: 0,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FieldSpec::req(
                "radius_x",
                FieldKind::Integer {
                    min: 1,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FieldSpec::req(
                "radius_y",
                FieldKind::Integer {
                    min: 1,
                    max: MAX_MASK_CANVAS,
                },
            ),
            FEATHER,
            FILENAME,
        ],
        constraints: &[],
        filename_prefix: "mask",
    },
    OperationSpec {
        name: "create_full_mask",
        family: ModelFamily::MaskFull,
        model_id: None,
        fields: &[MASK_CANVAS_WIDTH, MASK_CANVAS_HEIGHT, FILENAME],
        constraints: &[],
        filename_prefix: "mask",
    },
];

static BY_NAME: Lazy<HashMap<&'static str, &'static OperationSpec>> =
    Lazy::new(|| OPERATIONS.iter().map(|spec| (spec.name, spec)).collect());

/// Look up an operation by its tool name.
pub fn lookup(name: &str) -> Option<&'static OperationSpec> {
    BY_NAME.get(name).copied()
}
