#[macro_use]
mod common;

tests! {
    nil_and_false_are_falsy_everything_else_is_truthy:
    "if (nil) print \"bad\"; else print \"nil is falsy\"; \
     if (0) print \"zero is truthy\";" => "nil is falsy", "zero is truthy",
}
