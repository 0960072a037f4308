//! Window manager: windows, events, handlers, operators and the context

use crate::schema::Scalar::{Bool, Char, I16, I32};
use crate::schema::{FieldType, Predicate, Schema};

pub(super) fn declarations() -> Vec<Schema> {
    vec![
        Schema::new("wmEvent")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("type", I16)
            .field("val", I16)
            .select(|c| {
                c.when(Predicate::before((3, 2)), |f| {
                    f.field("posx", I16)
                        .field("posy", I16)
                        .field("mvalx", I16)
                        .field("mvaly", I16)
                })
                .otherwise(|f| {
                    f.field("posx", I32)
                        .field("posy", I32)
                        .field("mvalx", I32)
                        .field("mvaly", I32)
                })
            })
            .field("utf8_buf", FieldType::chars(6))
            .when(Predicate::before((3, 2, 2)), |f| f.field("ascii", Char))
            .field("modifier", Char),
        Schema::new("wmEventHandler")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("type", I32)
            .field("flag", Char)
            .field("poll", FieldType::function()),
        Schema::new("wmEventHandler_Op_Context")
            .field("win", FieldType::ptr_to("wmWindow"))
            .field("area", FieldType::ptr_to("ScrArea"))
            .field("region", FieldType::ptr_to("ARegion"))
            .field("region_type", I16),
        Schema::new("wmEventHandler_Op")
            .field("head", FieldType::schema("wmEventHandler"))
            .field("op", FieldType::ptr_to("wmOperator"))
            .field("is_file_select", Bool)
            .field("context", FieldType::schema("wmEventHandler_Op_Context")),
        Schema::new("wmOperator")
            .field("next", FieldType::SelfPointer)
            .field("prev", FieldType::SelfPointer)
            .field("idname", FieldType::chars(64))
            .field("properties", FieldType::ptr())
            .field("type", FieldType::ptr_to("wmOperatorType"))
            .field("customdata", FieldType::ptr())
            .field("pyinstance", FieldType::ptr())
            .field("ptr", FieldType::ptr_to("PointerRNA"))
            .field("reports", FieldType::ptr_to("ReportList"))
            .field("macro", FieldType::list_of("wmOperator"))
            .field("opm", FieldType::SelfPointer)
            .field("layout", FieldType::ptr())
            .field("flag", I16)
            .field("_pad6", FieldType::chars(6)),
        Schema::new("wmOperatorType")
            .field("name", FieldType::cstring())
            .field("idname", FieldType::cstring())
            .field("translation_context", FieldType::cstring())
            .field("description", FieldType::cstring())
            .field("undo_group", FieldType::cstring())
            .field("exec", FieldType::function())
            .field("check", FieldType::scalar_ptr(Bool))
            .field("invoke", FieldType::function())
            .field("cancel", FieldType::function())
            .field("modal", FieldType::function())
            .field("poll", FieldType::function())
            .field("poll_property", FieldType::function())
            .field("ui", FieldType::function())
            .field("get_name", FieldType::function())
            .field("get_description", FieldType::function())
            .field("srna", FieldType::ptr())
            .field("last_properties", FieldType::ptr())
            .field("prop", FieldType::ptr())
            .field("macro", FieldType::list())
            .field("modalkeymap", FieldType::ptr())
            .field("pyop_poll", FieldType::function())
            .field("rna_ext", FieldType::array(FieldType::ptr(), 4))
            .when(Predicate::after((2, 93)), |f| f.field("cursor_pending", I32))
            .field("flag", I16),
        Schema::new("bContextPollMsgDyn_Params")
            .field("get_fn", FieldType::function())
            .field("free_fn", FieldType::function())
            .field("user_data", FieldType::ptr()),
        Schema::new("bContext_wm")
            .field("manager", FieldType::ptr_to("wmWindowManager"))
            .field("window", FieldType::ptr_to("wmWindow"))
            .field("workspace", FieldType::ptr())
            .field("screen", FieldType::ptr_to("bScreen"))
            .field("area", FieldType::ptr_to("ScrArea"))
            .field("region", FieldType::ptr_to("ARegion"))
            .field("menu", FieldType::ptr_to("ARegion"))
            .field("gizmo_group", FieldType::ptr())
            .field("store", FieldType::ptr())
            .field("operator_poll_msg", FieldType::cstring())
            .field(
                "operator_poll_msg_dyn_params",
                FieldType::schema("bContextPollMsgDyn_Params"),
            ),
        Schema::new("bContext_data")
            .field("main", FieldType::ptr())
            .field("scene", FieldType::ptr())
            .field("recursion", I32)
            .field("py_init", Bool)
            .field("py_context", FieldType::ptr())
            .field("py_context_orig", FieldType::ptr()),
        Schema::new("bContext")
            .field("thread", I32)
            .field("wm", FieldType::schema("bContext_wm"))
            .field("data", FieldType::schema("bContext_data")),
        Schema::new("ReportList")
            .field("list", FieldType::list())
            .field("printlevel", I32)
            .field("storelevel", I32)
            .field("flag", I32)
            .field("_pad4", FieldType::chars(4))
            .field("reporttimer", FieldType::ptr()),
        window(),
        Schema::new("wmWindowManager")
            .field("id", FieldType::schema("ID"))
            .field("windrawable", FieldType::ptr_to("wmWindow"))
            .field("winactive", FieldType::ptr_to("wmWindow"))
            .field("windows", FieldType::list_of("wmWindow"))
            .field("initialized", I16)
            .field("file_saved", I16)
            .field("op_undo_depth", I16)
            .field("outliner_sync_select_dirty", I16)
            .field("operators", FieldType::list_of("wmOperator"))
            .field("notifier_queue", FieldType::list())
            .when(Predicate::after((3, 2, 2)), |f| {
                f.field("notifier_queue_set", FieldType::ptr())
            })
            .field("reports", FieldType::schema("ReportList"))
            .field("jobs", FieldType::list())
            .field("paintcursors", FieldType::list())
            .field("drags", FieldType::list())
            .field("keyconfigs", FieldType::list())
            .field("defaultconf", FieldType::ptr())
            .field("addonconf", FieldType::ptr())
            .field("userconf", FieldType::ptr())
            .field("timers", FieldType::list())
            .field("autosavetimer", FieldType::ptr())
            .field("undo_stack", FieldType::ptr())
            .field("is_interface_locked", Char)
            .field("_pad7", FieldType::chars(7))
            .field("message_bus", FieldType::ptr()),
    ]
}

fn window() -> Schema {
    Schema::new("wmWindow")
        .field("next", FieldType::SelfPointer)
        .field("prev", FieldType::SelfPointer)
        .field("ghostwin", FieldType::ptr())
        .field("gpuctx", FieldType::ptr())
        .field("parent", FieldType::SelfPointer)
        .field("scene", FieldType::ptr())
        .field("new_scene", FieldType::ptr())
        .field("view_layer_name", FieldType::chars(64))
        .when(Predicate::since((3, 3)), |f| f.field("unpinned_scene", FieldType::ptr()))
        .field("workspace_hook", FieldType::ptr())
        .field("global_areas", FieldType::array(FieldType::list(), 3))
        .field("screen", FieldType::ptr_to("bScreen"))
        .when(Predicate::after((2, 92)), |f| f.field("winid", I32))
        .field("pos", FieldType::array(I16, 2))
        .field("size", FieldType::array(I16, 2))
        .field("windowstate", Char)
        .field("active", Char)
        .when(Predicate::before((3, 0)), |f| f.field("_pad0", FieldType::chars(4)))
        .field("cursor", I16)
        .field("lastcursor", I16)
        .field("modalcursor", I16)
        .field("grabcursor", I16)
        .when(Predicate::since((3, 5)), |f| {
            f.field("pie_event_type_lock", I16)
                .field("pie_event_type_last", I16)
        })
        .field("addmousemove", Char)
        .field("tag_cursor_refresh", Char)
        .when(Predicate::until((2, 93)), |f| f.field("winid", I32))
        .when(Predicate::after((2, 93)), |f| {
            f.field("event_queue_check_click", Char)
                .field("event_queue_check_drag", Char)
                .field("event_queue_check_drag_handled", Char)
        })
        .select(|c| {
            c.when(Predicate::until((3, 5)), |f| f.field("_pad0", FieldType::chars(1)))
                .otherwise(|f| {
                    f.field("event_queue_consecutive_gesture_type", Char)
                        .field("event_queue_consecutive_gesture_xy", FieldType::array(I32, 2))
                        .field("event_queue_consecutive_gesture_data", FieldType::ptr())
                })
        })
        .when(Predicate::before((3, 5)), |f| {
            f.field("pie_event_type_lock", I16)
                .field("pie_event_type_last", I16)
        })
        .field("eventstate", FieldType::ptr_to("wmEvent"))
        .when(Predicate::after((3, 1)), |f| {
            f.field("event_last_handled", FieldType::ptr_to("wmEvent"))
        })
        .when(Predicate::before((3, 2)), |f| f.field("tweak", FieldType::ptr()))
        .field("ime_data", FieldType::ptr())
        .field("event_queue", FieldType::list_of("wmEvent"))
        .field("handlers", FieldType::list_of("wmEventHandler"))
        .field("modalhandlers", FieldType::list_of("wmEventHandler"))
        .field("gesture", FieldType::list())
        .field("stereo3d_format", FieldType::ptr())
        .field("drawcalls", FieldType::list())
        .field("cursor_keymap_status", FieldType::ptr())
}
