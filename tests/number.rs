#[macro_use]
mod common;

tests! {
    whole_numbers_still_print_with_a_decimal_point:
    "print 3;" => "3.0",
}

tests! {
    fractional_numbers_print_without_trailing_zeros:
    "print 3.25;" => "3.25",
}
