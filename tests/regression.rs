#[macro_use]
mod common;

tests! {
    deeply_nested_blocks_still_resolve_the_right_binding:
    "var a = 1; { { { print a; } } }" => "1.0",
}

tests! {
    reassigning_through_several_scopes_mutates_the_declaring_scope:
    "var a = 1; fun set() { a = 2; } set(); print a;" => "2.0",
}
