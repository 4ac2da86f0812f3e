#[macro_use]
mod common;

tests! {
    inner_scope_shadows_outer:
    "var a = \"outer\"; { var a = \"inner\"; print a; } print a;" => "inner", "outer",
}

tests! {
    block_value_is_last_statements_value:
    "{ 1; 2; 3; }" => ,
}
