use crate::commands::EXIT_OK;
use crate::output::{Printer, codec_rows, profile_rows};

pub fn run_codecs() -> i32 {
    let printer = Printer::new(false);

    printer.heading("Codecs");
    for row in codec_rows() {
        println!("  {row}");
    }

    printer.heading("ProRes profiles");
    for row in profile_rows() {
        println!("  {row}");
    }

    EXIT_OK
}
