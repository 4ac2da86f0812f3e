#[macro_use]
mod common;

tests! {
    or_short_circuits_on_a_truthy_left_operand:
    "print 1 or 2;" => "1.0",
}

tests! {
    or_evaluates_the_right_operand_when_left_is_falsy:
    "print false or \"ok\";" => "ok",
}

tests! {
    and_short_circuits_on_a_falsy_left_operand:
    "print false and 1;" => "false",
}

tests! {
    and_evaluates_the_right_operand_when_left_is_truthy:
    "print true and \"ok\";" => "ok",
}
