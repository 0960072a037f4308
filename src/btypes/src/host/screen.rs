//! Screens, areas, regions and spaces

use crate::schema::Scalar::{Bool, Char, F32, I16, I32};
use crate::schema::{FieldType, Predicate, Schema};

pub(super) fn declarations() -> Vec<Schema> {
    vec![
        Schema::new("View2D")
            .field("tot", FieldType::schema("rctf"))
            .field("cur", FieldType::schema("rctf"))
            .field("vert", FieldType::schema("rcti"))
            .field("hor", FieldType::schema("rcti"))
            .field("mask", FieldType::schema("rcti"))
            .field("min", FieldType::schema("vec2f"))
            .field("max", FieldType::schema("vec2f"))
            .field("minzoom", F32)
            .field("maxzoom", F32)
            .field("scroll", I16)
            .field("scroll_ui", I16)
            .field("keeptot", I16)
            .field("keepzoom", I16)
            .field("keepofs", I16)
            .field("flag", I16)
            .field("align", I16)
            .field("win", FieldType::schema("vec2s"))
            .field("oldwin", FieldType::schema("vec2s"))
            .field("around", I16)
            .when(Predicate::before((2, 91)), |f| {
                f.field("tab_offset", FieldType::scalar_ptr(F32))
                    .field("tab_num", I32)
                    .field("tab_cur", I32)
            })
            .field("alpha_vert", Char)
            .field("alpha_hor", Char)
            .when(Predicate::after((2, 92)), |f| f.field("_pad6", FieldType::chars(6)))
            .field("sms", FieldType::ptr())
            .field("smooth_timer", FieldType::ptr()),
        Schema::new("Panel_Runtime")
            .field("region_ofsx", I32)
            .field("_pad4", FieldType::chars(4))
            .when(Predicate::after((2, 83)), |f| {
                f.field("custom_data_ptr", FieldType::ptr_to("PointerRNA"))
                    .field("block", FieldType::ptr_to("uiBlock"))
            })
            .when(Predicate::before((3, 1)), |f| f.field("context", FieldType::ptr())),
        Schema::new("DrawCache")
            .field("line_height", FieldType::scalar_ptr(I32))
            .field("total_lines", I32)
            .field("nlines", I32)
            .field("winx", I32)
            .field("wordwrap", I32)
            .field("showlnum", I32)
            .field("tabnumber", I32)
            .field("lheight", I16)
            .field("cwidth_px", Char)
            .field("text_id", FieldType::chars(66))
            .field("update_flag", I16)
            .field("valid_head", I32)
            .field("valid_tail", I32),
        Schema::new("SpaceText_Runtime")
            .field("_lheight_px", I32)
            .field("cwidth_px", I32)
            .field("scroll_region_handle", FieldType::schema("rcti"))
            .field("scroll_region_select", FieldType::schema("rcti"))
            .field("lnum", I32)
            .field("viewlines", I32)
            .field("scroll_px_per_line", F32)
            .field("_offs_px", FieldType::schema("vec2i"))
            .field("_pad1", FieldType::chars(4))
            .field("drawcache", FieldType::ptr_to("DrawCache")),
        Schema::new("SpaceLink")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("regionbase", FieldType::list_of("ARegion"))
            .field("spacetype", Char)
            .field("link_flag", Char)
            .field("_pad0", FieldType::chars(6)),
        Schema::new("SpaceText")
            .field("next", FieldType::ptr_to("SpaceLink"))
            .field("prev", FieldType::ptr_to("SpaceLink"))
            .field("regionbase", FieldType::list_of("ARegion"))
            .field("spacetype", Char)
            .field("link_flag", Char)
            .field("pad0", FieldType::chars(6))
            .field("text", FieldType::ptr_to("Text"))
            .field("top", I32)
            .field("left", I32)
            .field("_pad1", FieldType::chars(4))
            .field("flags", I16)
            .field("lheight", I16)
            .field("tabnumber", I32)
            .field("wordwrap", Char)
            .field("doplugins", Char)
            .field("showlnum", Char)
            .field("showsyntax", Char)
            .field("line_hlight", Char)
            .field("overwrite", Char)
            .field("live_edit", Char)
            .field("_pad2", FieldType::chars(1))
            .field("findstr", FieldType::chars(256))
            .field("replacestr", FieldType::chars(256))
            .field("margin_column", I16)
            .field("_pad3", FieldType::chars(2))
            .field("runtime", FieldType::schema("SpaceText_Runtime")),
        Schema::new("SpaceType")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("name", FieldType::chars(64))
            .field("spaceid", I32)
            .field("iconid", I32)
            .field("create", FieldType::function())
            .field("free", FieldType::function())
            .field("init", FieldType::function())
            .field("exit", FieldType::function())
            .field("listener", FieldType::function())
            .field("deactivate", FieldType::function())
            .field("refresh", FieldType::function())
            .field("duplicate", FieldType::function())
            .field("operatortypes", FieldType::function())
            .field("keymap", FieldType::function())
            .field("dropboxes", FieldType::function())
            .field("gizmos", FieldType::function())
            .field("context", FieldType::function())
            .field("id_remap", FieldType::function())
            .field("space_subtype_get", FieldType::function())
            .field("space_subtype_set", FieldType::function())
            .field("space_subtype_item_extend", FieldType::function())
            .when(Predicate::after((3, 3, 0)), |f| {
                f.field("blend_read_data", FieldType::function())
                    .field("blend_read_lib", FieldType::function())
                    .field("blend_write", FieldType::function())
            })
            .field("regiontypes", FieldType::list_of("ARegionType"))
            .field("keymapflag", I32),
        Schema::new("ARegionType")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("regionid", I32)
            .field("init", FieldType::function())
            .field("exit", FieldType::function())
            .field("draw", FieldType::function())
            .when(Predicate::after((2, 83)), |f| f.field("draw_overlay", FieldType::function()))
            .field("layout", FieldType::function())
            .field("snap_size", FieldType::function())
            .field("listener", FieldType::function())
            .field("message_subscribe", FieldType::function())
            .field("free", FieldType::function())
            .field("duplicate", FieldType::function())
            .field("operatortypes", FieldType::function())
            .field("keymap", FieldType::function())
            .field("cursor", FieldType::function())
            .field("context", FieldType::function())
            .when(Predicate::after((2, 83)), |f| {
                f.field("on_view2d_changed", FieldType::function())
            })
            .field("drawcalls", FieldType::list())
            .field("paneltypes", FieldType::list())
            .field("headertypes", FieldType::list())
            .field("minsize", FieldType::schema("vec2i"))
            .field("prefsize", FieldType::schema("vec2i"))
            .field("keymapflag", I32)
            .field("do_lock", I16)
            .field("lock", I16)
            .field("clip_gizmo_events_by_ui", Bool)
            .field("event_cursor", I16),
        Schema::new("ARegion_Runtime")
            .field("category", FieldType::cstring())
            .field("visible_rect", FieldType::schema("rcti"))
            .field("offset_x", I32)
            .field("offset_y", I32)
            .field("block_name_map", FieldType::ptr()),
        Schema::new("ARegion")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("view2D", FieldType::schema("View2D"))
            .field("winrct", FieldType::schema("rcti"))
            .field("drawrct", FieldType::schema("rcti"))
            .field("winx", I16)
            .field("winy", I16)
            .field("visible", I16)
            .field("regiontype", I16)
            .field("alignment", I16)
            .field("flag", I16)
            .field("sizex", I16)
            .field("sizey", I16)
            .field("do_draw", I16)
            .field("do_draw_overlay", I16)
            .field("overlap", I16)
            .field("flagfullscreen", I16)
            .field("type", FieldType::ptr_to("ARegionType"))
            .field("uiblocks", FieldType::list_of("uiBlock"))
            .field("panels", FieldType::list())
            .field("panels_category_active", FieldType::list())
            .field("ui_lists", FieldType::list())
            .field("ui_previews", FieldType::list())
            .field("handlers", FieldType::list_of("wmEventHandler"))
            .field("panels_category", FieldType::list())
            .field("gizmo_map", FieldType::ptr())
            .field("regiontimer", FieldType::ptr())
            .field("draw_buffer", FieldType::ptr())
            .field("headerstr", FieldType::cstring())
            .field("regiondata", FieldType::ptr())
            .field("runtime", FieldType::schema("ARegion_Runtime")),
        Schema::new("ScrArea_Runtime")
            .field("tool", FieldType::ptr())
            .field("is_tool_set", Char)
            .field("_pad0", FieldType::chars(7)),
        Schema::new("ScrArea")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("v1", FieldType::ptr())
            .field("v2", FieldType::ptr())
            .field("v3", FieldType::ptr())
            .field("v4", FieldType::ptr())
            .field("full", FieldType::ptr_to("bScreen"))
            .field("totrct", FieldType::schema("rcti"))
            .field("spacetype", Char)
            .field("butspacetype", Char)
            .field("butspacetype_subtype", I16)
            .field("win", FieldType::schema("vec2s"))
            .field("headertype", Char)
            .field("do_refresh", Char)
            .field("flag", I16)
            .field("region_active_win", I16)
            .field("_pad2", FieldType::chars(2))
            .field("type", FieldType::ptr_to("SpaceType"))
            .field("global", FieldType::ptr())
            .field("spacedata", FieldType::list_of("SpaceLink"))
            .field("regionbase", FieldType::list_of("ARegion"))
            .field("handlers", FieldType::list())
            .field("actionzones", FieldType::list_of("AZone"))
            .field("runtime", FieldType::schema("ScrArea_Runtime")),
        // Not part of the DNA; screen_intern.h
        Schema::new("AZone")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("region", FieldType::ptr_to("ARegion"))
            .field("type", I32)
            .union(
                "edge_or_direction",
                [
                    ("edge", FieldType::Scalar(I32)),
                    ("direction", FieldType::Scalar(I32)),
                ],
            )
            .field("x1", I16)
            .field("y1", I16)
            .field("x2", I16)
            .field("y2", I16)
            .field("rect", FieldType::schema("rcti"))
            .field("rect_hidden", FieldType::schema("rcti"))
            .field("alpha", F32)
            .field("_pad0", FieldType::chars(4)),
        Schema::new("bScreen")
            .field("id", FieldType::schema("ID"))
            .field("vertbase", FieldType::list())
            .field("edgebase", FieldType::list())
            .field("areabase", FieldType::list_of("ScrArea"))
            .field("regionbase", FieldType::list_of("ARegion"))
            .field("scene", FieldType::ptr())
            .field("flag", I16)
            .field("winid", I16)
            .field("redraws_flag", I16)
            .field("temp", Char)
            .field("state", Char)
            .field("do_draw", Char)
            .field("do_refresh", Char)
            .field("do_draw_gesture", Char)
            .field("do_draw_paintcursor", Char)
            .field("do_draw_drag", Char)
            .field("skip_handling", Char)
            .field("scrubbing", Char)
            .field("_pad1", FieldType::chars(1))
            .field("active_region", FieldType::ptr_to("ARegion"))
            .field("animtimer", FieldType::ptr())
            .field("context", FieldType::ptr())
            .field("tooltip", FieldType::ptr())
            .field("preview", FieldType::ptr()),
    ]
}
