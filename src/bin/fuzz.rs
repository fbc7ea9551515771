#[macro_use]
extern crate afl;
extern crate postfix_calc;

use std::str;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(line) = str::from_utf8(data) {
            // Any outcome is fine as long as nothing panics.
            let _ = postfix_calc::calculate(line);
        }
    });
}
