//! Vectors, rectangles, IDs, texts and user preferences

use crate::schema::Scalar::{self, Char, F32, F64, I16, I32, U32};
use crate::schema::{FieldType, Predicate, Schema};

fn vec2(name: &str, scalar: Scalar) -> Schema {
    Schema::new(name).field("x", scalar).field("y", scalar)
}

fn rect(name: &str, scalar: Scalar) -> Schema {
    Schema::new(name)
        .field("xmin", scalar)
        .field("xmax", scalar)
        .field("ymin", scalar)
        .field("ymax", scalar)
}

fn solid_lights() -> FieldType {
    FieldType::array(FieldType::schema("SolidLight"), 4)
}

pub(super) fn declarations() -> Vec<Schema> {
    vec![
        vec2("vec2i", I32),
        vec2("vec2s", I16),
        vec2("vec2f", F32),
        rect("rctf", F32),
        rect("rcti", I32),
        Schema::new("blenderVector")
            .field("begin_", FieldType::ptr())
            .field("end_", FieldType::ptr())
            .field("capacity_end_", FieldType::ptr()),
        Schema::new("PointerRNA")
            .field("owner_id", FieldType::ptr_to("ID"))
            .field("type", FieldType::ptr())
            .field("data", FieldType::ptr()),
        Schema::new("ID_Runtime_Remap")
            .field("status", I32)
            .field("skipped_refcounted", I32)
            .field("skipped_direct", I32)
            .field("skipped_indirect", I32),
        Schema::new("ID_Runtime").field("remap", FieldType::schema("ID_Runtime_Remap")),
        Schema::new("ID")
            .field("next", FieldType::ptr())
            .field("prev", FieldType::ptr())
            .field("newid", FieldType::SelfPointer)
            .field("lib", FieldType::ptr())
            .when(Predicate::after((2, 91)), |f| f.field("asset_data", FieldType::ptr()))
            .field("name", FieldType::chars(66))
            .field("flag", I16)
            .field("tag", I32)
            .field("us", I32)
            .field("icon_id", I32)
            .field("recalc", U32)
            .field("recalc_up_to_undo_push", U32)
            .field("recalc_after_undo_push", U32)
            .field("session_uuid", U32)
            .field("properties", FieldType::ptr())
            .field("override_library", FieldType::ptr())
            .field("orig_id", FieldType::SelfPointer)
            .field("py_instance", FieldType::ptr())
            .select(|c| {
                c.when(Predicate::after((2, 93)), |f| {
                    f.field("library_weak_reference", FieldType::ptr())
                })
                .when(Predicate::after((2, 83)), |f| f.field("_pad1", FieldType::ptr()))
            })
            .when(Predicate::after((3, 1)), |f| {
                f.field("runtime", FieldType::schema("ID_Runtime"))
            }),
        Schema::new("TextLine")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("line", FieldType::cstring())
            .field("format", FieldType::cstring())
            .field("len", I32)
            .field("_pad0", FieldType::chars(4)),
        Schema::new("Text")
            .field("id", FieldType::schema("ID"))
            .field("filepath", FieldType::cstring())
            .field("compiled", FieldType::ptr())
            .field("flags", I32)
            .select(|c| {
                c.when(Predicate::before((2, 90)), |f| f.field("nlines", I32))
                    .otherwise(|f| f.field("_pad0", FieldType::chars(4)))
            })
            .field("lines", FieldType::list_of("TextLine"))
            .field("curl", FieldType::ptr_to("TextLine"))
            .field("sell", FieldType::ptr_to("TextLine"))
            .field("curc", I32)
            .field("selc", I32)
            .field("mtime", F64),
        Schema::new("SolidLight")
            .field("flag", I32)
            .field("smooth", F32)
            .when(Predicate::before((3, 3, 1)), |f| f.field("_pad0", FieldType::chars(8)))
            .field("col", FieldType::array(F32, 4))
            .field("spec", FieldType::array(F32, 4))
            .field("vec", FieldType::array(F32, 4)),
        user_def(),
    ]
}

/// Leading part of the user preferences, up to `widget_unit`
fn user_def() -> Schema {
    let path = || FieldType::chars(768);
    Schema::new("UserDef")
        .field("versionfile", I32)
        .field("subversionfile", I32)
        .field("flag", I32)
        .field("dupflag", U32)
        .field("pref_flag", Char)
        .field("savetime", Char)
        .field("mouse_emulate_3_button_modifier", Char)
        .field("_pad4", FieldType::chars(1))
        .field("tempdir", path())
        .field("fontdir", path())
        .field("renderdir", FieldType::chars(1024))
        .field("render_cachedir", path())
        .field("textudir", path())
        .field("pythondir", path())
        .field("sounddir", path())
        .field("i18ndir", path())
        .field("image_editor", FieldType::chars(1024))
        .field("anim_player", FieldType::chars(1024))
        .field("anim_player_preset", I32)
        .field("v2d_min_gridsize", I16)
        .field("timecode_style", I16)
        .field("versions", I16)
        .field("dbl_click_time", I16)
        .select(|c| {
            c.when(Predicate::after((2, 83)), |f| f.field("_pad0", FieldType::chars(3)))
                .otherwise(|f| {
                    f.field("_pad0", FieldType::chars(2))
                        .field("wheellinescroll", Char)
                })
        })
        .field("mini_axis_type", Char)
        .field("uiflag", I32)
        .field("uiflag2", Char)
        .field("gpu_flag", Char)
        .field("_pad8", FieldType::chars(6))
        .field("app_flag", Char)
        .field("viewzoom", Char)
        .field("language", I16)
        .field("mixbufsize", I32)
        .field("audiodevice", I32)
        .field("audiorate", I32)
        .field("audioformat", I32)
        .field("audiochannels", I32)
        .field("ui_scale", F32)
        .field("ui_line_width", I32)
        .field("dpi", I32)
        .field("dpi_fac", F32)
        .field("inv_dpi_fac", F32)
        .field("pixelsize", F32)
        .field("virtual_pixel", I32)
        .field("scrollback", I32)
        .field("node_margin", Char)
        .field("_pad2", FieldType::chars(1))
        .field("transopts", I16)
        .field("menuthreshold1", I16)
        .field("menuthreshold2", I16)
        .field("app_template", FieldType::chars(64))
        .field("themes", FieldType::list())
        .field("uifonts", FieldType::list())
        .field("uistyles", FieldType::list())
        .field("user_keymaps", FieldType::list())
        .field("user_keyconfig_prefs", FieldType::list())
        .field("addons", FieldType::list())
        .field("autoexec_paths", FieldType::list())
        .field("user_menus", FieldType::list())
        .when(Predicate::after((2, 83)), |f| f.field("asset_libraries", FieldType::list()))
        .field("keyconfigstr", FieldType::chars(64))
        .when(Predicate::after((3, 3, 3)), |f| f.field("active_asset_library", I16))
        .field("undosteps", I16)
        .when(Predicate::before((3, 3, 4)), |f| f.field("_pad1", FieldType::chars(2)))
        .field("undomemory", I32)
        .field("gpu_viewport_quality", F32)
        .field("gp_manhattan_dist", I16)
        .field("gp_euclidean_dist", I16)
        .field("gp_eraser", I16)
        .field("gp_settings", I16)
        .field("_pad13", FieldType::chars(4))
        .field("light_param", FieldType::Deferred(solid_lights))
        .field("light_ambient", FieldType::array(F32, 3))
        .field("gizmo_flag", Char)
        .field("gizmo_size", Char)
        .when(Predicate::after((2, 83)), |f| {
            f.field("gizmo_size_navigate_v3d", Char)
                .field("_pad3", FieldType::chars(5))
        })
        .field("edit_studio_light", I16)
        .field("lookdev_sphere_size", I16)
        .field("vbotimeout", I16)
        .field("vbocollectrate", I16)
        .field("textimeout", I16)
        .field("texcollectrate", I16)
        .field("memcachelimit", I32)
        .field("prefetchframes", I32)
        .field("pad_rot_angle", F32)
        .field("_pad12", FieldType::chars(4))
        .field("rvisize", I16)
        .field("rvibright", I16)
        .field("recent_files", I16)
        .field("smooth_viewtx", I16)
        .field("glreslimit", I16)
        .field("color_picker_type", I16)
        .field("auto_smoothing_new", Char)
        .field("ipo_new", Char)
        .field("keyhandles_new", Char)
        .field("_pad11", FieldType::chars(4))
        .field("view_frame_type", Char)
        .field("view_frame_keyframes", I32)
        .field("view_frame_seconds", F32)
        .select(|c| {
            c.when(Predicate::after((3, 3, 4)), |f| {
                f.field("gpu_backend", I16).field("_pad7", FieldType::chars(4))
            })
            .otherwise(|f| f.field("_pad7", FieldType::chars(6)))
        })
        .field("widget_unit", I16)
}
