//! Host enums, flags and name lookups

use crate::error::{Error, Result};
use phf::phf_map;

// Operator return flags
pub const OPERATOR_RUNNING_MODAL: i32 = 1 << 0;
pub const OPERATOR_CANCELLED: i32 = 1 << 1;
pub const OPERATOR_FINISHED: i32 = 1 << 2;
pub const OPERATOR_PASS_THROUGH: i32 = 1 << 3;

// wmOperatorType.flag
pub const OPTYPE_REGISTER: i32 = 1 << 0;
pub const OPTYPE_UNDO: i32 = 1 << 1;
pub const OPTYPE_BLOCKING: i32 = 1 << 2;
pub const OPTYPE_MACRO: i32 = 1 << 3;
pub const OPTYPE_GRAB_CURSOR_XY: i32 = 1 << 4;
pub const OPTYPE_GRAB_CURSOR_X: i32 = 1 << 5;
pub const OPTYPE_GRAB_CURSOR_Y: i32 = 1 << 6;
pub const OPTYPE_PRESET: i32 = 1 << 7;
pub const OPTYPE_INTERNAL: i32 = 1 << 8;
pub const OPTYPE_LOCK_BYPASS: i32 = 1 << 9;
pub const OPTYPE_UNDO_GROUPED: i32 = 1 << 10;
pub const OPTYPE_DEPENDS_ON_CURSOR: i32 = 1 << 11;

// SpaceText.flags
pub const ST_SCROLL_SELECT: i32 = 1 << 0;
pub const ST_FLAG_UNUSED_4: i32 = 1 << 4;
pub const ST_FIND_WRAP: i32 = 1 << 5;
pub const ST_FIND_ALL: i32 = 1 << 6;
pub const ST_SHOW_MARGIN: i32 = 1 << 7;
pub const ST_MATCH_CASE: i32 = 1 << 8;
pub const ST_FIND_ACTIVATE: i32 = 1 << 9;

// Space types
pub const SPACE_EMPTY: i32 = 0;
pub const SPACE_VIEW3D: i32 = 1;
pub const SPACE_GRAPH: i32 = 2;
pub const SPACE_OUTLINER: i32 = 3;
pub const SPACE_PROPERTIES: i32 = 4;
pub const SPACE_FILE: i32 = 5;
pub const SPACE_IMAGE: i32 = 6;
pub const SPACE_INFO: i32 = 7;
pub const SPACE_SEQ: i32 = 8;
pub const SPACE_TEXT: i32 = 9;
pub const SPACE_ACTION: i32 = 12;
pub const SPACE_NLA: i32 = 13;
pub const SPACE_NODE: i32 = 16;
pub const SPACE_CONSOLE: i32 = 18;
pub const SPACE_USERPREF: i32 = 19;
pub const SPACE_CLIP: i32 = 20;
pub const SPACE_TOPBAR: i32 = 21;
pub const SPACE_STATUSBAR: i32 = 22;
pub const SPACE_SPREADSHEET: i32 = 23;

// Region types
pub const RGN_TYPE_WINDOW: i32 = 0;
pub const RGN_TYPE_HEADER: i32 = 1;
pub const RGN_TYPE_CHANNELS: i32 = 2;
pub const RGN_TYPE_TEMPORARY: i32 = 3;
pub const RGN_TYPE_UI: i32 = 4;
pub const RGN_TYPE_TOOLS: i32 = 5;
pub const RGN_TYPE_TOOL_PROPS: i32 = 6;
pub const RGN_TYPE_PREVIEW: i32 = 7;
pub const RGN_TYPE_HUD: i32 = 8;
pub const RGN_TYPE_NAV_BAR: i32 = 9;
pub const RGN_TYPE_EXECUTE: i32 = 10;
pub const RGN_TYPE_FOOTER: i32 = 11;
pub const RGN_TYPE_TOOL_HEADER: i32 = 12;
pub const RGN_TYPE_XR: i32 = 13;

// Text.flags
pub const TXT_ISDIRTY: i32 = 1 << 0;
pub const TXT_ISMEM: i32 = 1 << 2;
pub const TXT_ISEXT: i32 = 1 << 3;
pub const TXT_ISSCRIPT: i32 = 1 << 4;
pub const TXT_FLAG_UNUSED_8: i32 = 1 << 8;
pub const TXT_FLAG_UNUSED_9: i32 = 1 << 9;
pub const TXT_TABSTOSPACES: i32 = 1 << 10;

/// Scripting-layer area type names
pub static AREA_TYPES: phf::Map<&'static str, i32> = phf_map! {
    "EMPTY" => SPACE_EMPTY,
    "VIEW_3D" => SPACE_VIEW3D,
    "IMAGE_EDITOR" => SPACE_IMAGE,
    "NODE_EDITOR" => SPACE_NODE,
    "SEQUENCE_EDITOR" => SPACE_SEQ,
    "CLIP_EDITOR" => SPACE_CLIP,
    "DOPESHEET_EDITOR" => SPACE_ACTION,
    "GRAPH_EDITOR" => SPACE_GRAPH,
    "NLA_EDITOR" => SPACE_NLA,
    "TEXT_EDITOR" => SPACE_TEXT,
    "CONSOLE" => SPACE_CONSOLE,
    "INFO" => SPACE_INFO,
    "TOPBAR" => SPACE_TOPBAR,
    "OUTLINER" => SPACE_OUTLINER,
    "PROPERTIES" => SPACE_PROPERTIES,
    "FILE_BROWSER" => SPACE_FILE,
    "SPREADSHEET" => SPACE_SPREADSHEET,
    "PREFERENCES" => SPACE_USERPREF,
};

/// Scripting-layer region type names
pub static REGION_TYPES: phf::Map<&'static str, i32> = phf_map! {
    "WINDOW" => RGN_TYPE_WINDOW,
    "HEADER" => RGN_TYPE_HEADER,
    "CHANNELS" => RGN_TYPE_CHANNELS,
    "TEMPORARY" => RGN_TYPE_TEMPORARY,
    "UI" => RGN_TYPE_UI,
    "TOOLS" => RGN_TYPE_TOOLS,
    "TOOL_PROPS" => RGN_TYPE_TOOL_PROPS,
    "PREVIEW" => RGN_TYPE_PREVIEW,
    "HUD" => RGN_TYPE_HUD,
    "NAVIGATION_BAR" => RGN_TYPE_NAV_BAR,
    "EXECUTE" => RGN_TYPE_EXECUTE,
    "FOOTER" => RGN_TYPE_FOOTER,
    "TOOL_HEADER" => RGN_TYPE_TOOL_HEADER,
};

/// Space type for an area type name, e.g. `"TEXT_EDITOR"`
pub fn area_to_enum(name: &str) -> Result<i32> {
    AREA_TYPES.get(name).copied().ok_or_else(|| Error::UnknownName {
        kind: "area",
        name: name.to_string(),
    })
}

/// Region type for a region type name, e.g. `"WINDOW"`
pub fn region_to_enum(name: &str) -> Result<i32> {
    REGION_TYPES.get(name).copied().ok_or_else(|| Error::UnknownName {
        kind: "region",
        name: name.to_string(),
    })
}
