//! Interface blocks, buttons and popups

use crate::schema::Scalar::{Bool, Char, F32, F64, I16, I32, I8, U32, U8};
use crate::schema::{FieldType, Predicate, Schema};

pub(super) fn declarations() -> Vec<Schema> {
    vec![
        Schema::new("uiBlockInteraction_CallbackData")
            .field("begin_fn", FieldType::function())
            .field("end_fn", FieldType::function())
            .field("update_fn", FieldType::function())
            .field("arg1", FieldType::ptr()),
        Schema::new("uiPopupBlockCreate")
            .field("create_func", FieldType::function())
            .field("handle_create_func", FieldType::function())
            .field("arg", FieldType::ptr())
            .field("arg_free", FieldType::function())
            .field("event_xy", FieldType::schema("vec2i"))
            .field("butregion", FieldType::ptr_to("ARegion"))
            .field("but", FieldType::ptr_to("uiBut")),
        Schema::new("uiKeyNavLock")
            .field("is_keynav", Bool)
            .field("event_xy", FieldType::schema("vec2i")),
        block(),
        Schema::new("IconTextOverlay").field("text", FieldType::chars(5)),
        button(),
        Schema::new("uiPopupMenu")
            .field("block", FieldType::ptr_to("uiBlock"))
            .field("layout", FieldType::ptr())
            .field("but", FieldType::ptr_to("uiBut"))
            .field("butregion", FieldType::ptr_to("ARegion"))
            .when(Predicate::after((3, 3, 1)), |f| f.field("title", FieldType::cstring()))
            .field("mxy", FieldType::schema("vec2i"))
            .field("popup", Bool)
            .field("slideout", Bool)
            // A std::function wrapper from 3.3.2 on; only its first word is declared
            .field("menu_func", FieldType::ptr())
            .field("menu_arg", FieldType::ptr()),
    ]
}

/// Leading part of `uiBlock`, up to the popup handle
fn block() -> Schema {
    Schema::new("uiBlock")
        .field("next", FieldType::SelfPointer)
        .field("prev", FieldType::SelfPointer)
        .field("buttons", FieldType::list_of("uiBut"))
        .field("panel", FieldType::ptr())
        .field("oldblock", FieldType::SelfPointer)
        .field("butstore", FieldType::list())
        .select(|c| {
            c.when(Predicate::since((3, 3, 2)), |f| {
                f.field("button_groups", FieldType::schema("blenderVector"))
            })
            .when(Predicate::after((2, 82)), |f| f.field("button_groups", FieldType::list()))
        })
        .field("layouts", FieldType::list())
        .field("curlayout", FieldType::ptr())
        .field("contexts", FieldType::list())
        .when(Predicate::after((2, 93)), |f| f.field("views", FieldType::list()))
        .when(Predicate::after((3, 3, 1)), |f| f.field("dynamic_listeners", FieldType::list()))
        .field("name", FieldType::chars(128))
        .field("winmat", FieldType::array(FieldType::array(F32, 4), 4))
        .field("rect", FieldType::schema("rctf"))
        .field("aspect", F32)
        .field("puphash", U32)
        .field("func", FieldType::function())
        .field("func_arg1", FieldType::ptr())
        .field("func_arg2", FieldType::ptr())
        .field("funcN", FieldType::function())
        .field("func_argN", FieldType::ptr())
        .field("butm_func", FieldType::function())
        .field("butm_func_arg", FieldType::ptr())
        .field("handle_func", FieldType::function())
        .field("handle_func_arg", FieldType::ptr())
        .when(Predicate::after((2, 93)), |f| {
            f.field(
                "custom_interaction_callbacks",
                FieldType::schema("uiBlockInteraction_CallbackData"),
            )
        })
        .field("block_event_func", FieldType::scalar_ptr(I32))
        .field("drawextra", FieldType::function())
        .field("drawextra_arg1", FieldType::ptr())
        .field("drawextra_arg2", FieldType::ptr())
        .field("flag", I32)
        .field("alignnr", I16)
        .field("content_hints", I16)
        .field("direction", Char)
        .field("theme_style", Char)
        .field("emboss", I32)
        .field("auto_open", Bool)
        .field("_pad5", FieldType::chars(5))
        .field("auto_open_last", F64)
        .field("lockstr", FieldType::cstring())
        .field("lock", Bool)
        .field("active", Bool)
        .field("tooltipdisabled", Bool)
        .field("endblock", Bool)
        .field("bounds_type", I32)
        .field("bounds_offset", FieldType::array(I32, 2))
        .field("bounds", I32)
        .field("minbounds", I32)
        .field("safety", FieldType::schema("rctf"))
        .field("saferct", FieldType::list())
        .field("handle", FieldType::ptr())
}

fn button() -> Schema {
    Schema::new("uiBut")
        .field("next", FieldType::SelfPointer)
        .field("prev", FieldType::SelfPointer)
        .when(Predicate::after((2, 90)), |f| f.field("layout", FieldType::ptr()))
        .field("flag", I32)
        .field("drawflag", I32)
        .field("type", I32)
        .field("pointype", I32)
        .field("bit", I16)
        .field("bitnr", I16)
        .field("retval", I16)
        .field("strwidth", I16)
        .field("alignnr", I16)
        .field("ofs", I16)
        .field("pos", I16)
        .field("selsta", I16)
        .field("selend", I16)
        .field("str", FieldType::cstring())
        .field("strdata", FieldType::chars(128))
        .field("drawstr", FieldType::chars(400))
        .field("rect", FieldType::schema("rctf"))
        .field("poin", FieldType::cstring())
        .field("hardmin", F32)
        .field("hardmax", F32)
        .field("softmin", F32)
        .field("softmax", F32)
        .field("a1", F32)
        .field("a2", F32)
        .field("col", FieldType::array(U8, 4))
        .when(Predicate::after((3, 1)), |f| {
            f.field("identity_cmp_func", FieldType::function())
        })
        .field("func", FieldType::function())
        .field("func_arg1", FieldType::ptr())
        .field("func_arg2", FieldType::ptr())
        .field("funcN", FieldType::function())
        .when(Predicate::after((2, 82)), |f| f.field("func_argN", FieldType::ptr()))
        .field("context", FieldType::ptr())
        .field("autocomplete_func", FieldType::function())
        .field("autofunc_arg", FieldType::ptr())
        .when(Predicate::before((2, 83)), |f| {
            f.field("search_create_func", FieldType::function())
                .field("search_func", FieldType::function())
                .field("free_search_arg", Bool)
                .field("search_arg", FieldType::ptr())
        })
        .field("rename_func", FieldType::function())
        .field("rename_arg1", FieldType::ptr())
        .field("rename_orig", FieldType::ptr())
        .field("hold_func", FieldType::function())
        .field("hold_argN", FieldType::ptr())
        .field("tip", FieldType::cstring())
        .field("tip_func", FieldType::function())
        .field("tip_arg", FieldType::ptr())
        .when(Predicate::after((2, 93)), |f| f.field("tip_arg_free", FieldType::function()))
        .field("disabled_info", FieldType::cstring())
        .field("icon", I32)
        .variant(
            "emboss",
            [
                (Predicate::before((2, 93)), FieldType::Scalar(Char)),
                (Predicate::Always, FieldType::Scalar(I32)),
            ],
        )
        .variant(
            "pie_dir",
            [
                (Predicate::before((3, 2)), FieldType::Scalar(I8)),
                (Predicate::Always, FieldType::Scalar(I32)),
            ],
        )
        .field("changed", Bool)
        .field("unit_type", U8)
        .when(Predicate::before((3, 3)), |f| f.field("modifier_key", I16))
        .field("iconadd", I16)
        .field("block_create_func", FieldType::function())
        .field("menu_create_func", FieldType::function())
        .field("menu_step_func", FieldType::function())
        .field("rnapoin", FieldType::schema("PointerRNA"))
        .field("rnaprop", FieldType::ptr())
        .field("rnaindex", I32)
        .when(Predicate::before((2, 93)), |f| {
            f.field("rnasearchpoin", FieldType::array(FieldType::ptr(), 3))
                .field("rnasearchprop", FieldType::ptr())
        })
        .field("optype", FieldType::ptr_to("wmOperatorType"))
        .field("opptr", FieldType::ptr_to("PointerRNA"))
        .field("opcontext", I32)
        .field("menu_key", U8)
        .field("extra_op_icons", FieldType::list())
        .field("dragtype", Char)
        .field("dragflag", I16)
        .field("dragpoin", FieldType::ptr())
        .field("imb", FieldType::ptr())
        .field("imb_scale", F32)
        .field("active", FieldType::ptr())
        .field("custom_data", FieldType::ptr())
        .field("editstr", FieldType::cstring())
        .field("editval", FieldType::scalar_ptr(F64))
        .field("editvec", FieldType::scalar_ptr(F32))
        .when(Predicate::before((2, 93)), |f| {
            f.field("editcoba", FieldType::ptr())
                .field("editcumap", FieldType::ptr())
                .field("editprofile", FieldType::ptr())
        })
        .field("pushed_state_func", FieldType::function())
        .field("pushed_state_arg", FieldType::ptr())
        .when(Predicate::after((3, 3)), |f| {
            f.field("icon_overlay_text", FieldType::schema("IconTextOverlay"))
                .field("_pad0", FieldType::chars(3))
        })
        .field("block", FieldType::ptr_to("uiBlock"))
}
