#[macro_use]
mod common;

tests_err! {
    using_this_outside_a_class_is_a_resolve_error:
    "print this;" => "Can't use 'this' outside of a class.",
}
