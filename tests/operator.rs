#[macro_use]
mod common;

tests! {
    division_by_zero_yields_infinity_not_a_runtime_error:
    "print 1 / 0;" => "inf",
}

tests! {
    plus_concatenates_a_string_and_a_number:
    "print \"a\" + 1;" => "a1.0",
}

tests! {
    unary_minus_negates_a_number:
    "print -(1 + 2);" => "-3.0",
}

tests! {
    zero_and_negative_zero_compare_equal:
    "print 0 == -0;" => "true",
}

tests_err! {
    subtracting_a_string_from_a_number_is_a_runtime_error:
    "print 1 - \"a\";" => "Operand must be a number.",
}

tests_err! {
    adding_a_number_and_a_boolean_is_a_runtime_error:
    "print 1 + true;" => "Operands must be two numbers or two strings.",
}
