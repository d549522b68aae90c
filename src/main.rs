//! rhtlogger main entrypoint.

use rhtlogger::run;
use rhtlogger::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
