#[macro_use]
mod common;

tests! {
    field_is_created_on_first_assignment:
    "class Box {} var b = Box(); b.contents = \"gift\"; print b.contents;" => "gift",
}

tests_err! {
    getting_an_undefined_field_is_a_runtime_error:
    "class Box {} var b = Box(); print b.contents;" => "Undefined property 'contents'.",
}

tests_err! {
    setting_a_field_on_a_non_instance_is_a_runtime_error:
    "var n = 1; n.x = 2;" => "Only instances have fields.",
}
