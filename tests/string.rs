#[macro_use]
mod common;

tests! {
    strings_concatenate_with_plus:
    "print \"foo\" + \"bar\";" => "foobar",
}

tests! {
    sub_string_extracts_a_slice:
    "print subString(\"hello world\", 6, 5);" => "world",
}
